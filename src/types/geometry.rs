use serde::{Deserialize, Serialize};

/// Screen-space rectangle in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width of the box
    pub width: f32,
    /// Height of the box
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Extent along `axis` (width for columns, height for rows)
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Col => self.width,
            Axis::Row => self.height,
        }
    }

    /// Position of one of the box edges along `axis`.
    ///
    /// Columns read the horizontal edges; `Inner` is the left edge in
    /// left-to-right documents and the right edge in right-to-left ones.
    /// Rows read the vertical edges and ignore direction.
    pub fn edge(&self, axis: Axis, side: EdgeSide, direction: Direction) -> f32 {
        match (axis, side, direction) {
            (Axis::Col, EdgeSide::Inner, Direction::Ltr)
            | (Axis::Col, EdgeSide::Outer, Direction::Rtl) => self.left(),
            (Axis::Col, EdgeSide::Outer, Direction::Ltr)
            | (Axis::Col, EdgeSide::Inner, Direction::Rtl) => self.right(),
            (Axis::Row, EdgeSide::Inner, _) => self.top(),
            (Axis::Row, EdgeSide::Outer, _) => self.bottom(),
        }
    }
}

/// Which family of logical units is being measured or resized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Logical rows (resized with horizontal bars)
    Row,
    /// Logical columns (resized with vertical bars)
    Col,
}

impl Axis {
    /// The other axis
    pub fn cross(self) -> Axis {
        match self {
            Axis::Col => Axis::Row,
            Axis::Row => Axis::Col,
        }
    }

    /// Inline style / legacy attribute carrying the size on this axis
    pub fn size_property(self) -> &'static str {
        match self {
            Axis::Col => "width",
            Axis::Row => "height",
        }
    }

    /// Span attribute extending a cell along this axis
    pub fn span_attribute(self) -> &'static str {
        match self {
            Axis::Col => "colspan",
            Axis::Row => "rowspan",
        }
    }

    /// CSS cursor shown while hovering a bar on this axis
    pub fn cursor(self) -> &'static str {
        match self {
            Axis::Col => "col-resize",
            Axis::Row => "row-resize",
        }
    }

    /// Data attribute carrying the boundary index on a bar element
    pub fn index_attribute(self) -> &'static str {
        match self {
            Axis::Col => "data-col",
            Axis::Row => "data-row",
        }
    }

    /// Parse `"col"` / `"column"` / `"row"`
    pub fn parse(value: &str) -> Option<Axis> {
        match value.trim().to_ascii_lowercase().as_str() {
            "col" | "column" | "width" => Some(Axis::Col),
            "row" | "height" => Some(Axis::Row),
            _ => None,
        }
    }

    /// Coordinate of a point along this axis
    pub fn pick(self, x: f32, y: f32) -> f32 {
        match self {
            Axis::Col => x,
            Axis::Row => y,
        }
    }
}

/// Document writing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// Parse an HTML `dir` attribute value; anything but `rtl` is left-to-right
    pub fn from_dir_attribute(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("rtl") => Direction::Rtl,
            _ => Direction::Ltr,
        }
    }
}

/// Edge of a cell box relative to the start of its logical unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSide {
    /// Leading edge (left in LTR, right in RTL, top for rows)
    Inner,
    /// Trailing edge (right in LTR, left in RTL, bottom for rows)
    Outer,
}
