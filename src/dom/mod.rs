//! The document the overlay works against.
//!
//! The geometry core never touches a document directly. Everything it needs
//! (measuring boxes, reading and writing sizes, adding and removing overlay
//! elements, walking from a cell to its table) goes through [`TableDom`].
//!
//! - [`MemoryDom`]: in-memory document used by tests, the CLI and
//!   `describe_table`
//! - `WebDom` (wasm32 only): the live browser document via `web-sys`

mod memory;
#[cfg(target_arch = "wasm32")]
mod web;

pub use memory::{MemoryDom, NodeId};
#[cfg(target_arch = "wasm32")]
pub use web::WebDom;

use crate::layout::{BoundaryBar, CellMetrics, LogicalGrid, ResizePlan};
use crate::length::{parse_length, parse_span, Length};
use crate::types::{
    Axis, Direction, Rect, ResizeConfig, SnapshotCell, SnapshotRow, TableSnapshot, MAX_COLSPAN,
    MAX_ROWSPAN,
};

/// Marker attribute telling the host editor to drop an element from content
pub const BOGUS_ATTRIBUTE: &str = "data-bar-bogus";

/// Capabilities of the host document
pub trait TableDom {
    /// Handle of a document element
    type Element: Clone + PartialEq + std::fmt::Debug;

    /// Screen position and box size of `element`
    fn measure(&self, element: &Self::Element) -> Rect;

    /// Inline style property, `None` when unset or empty
    fn get_style(&self, element: &Self::Element, property: &str) -> Option<String>;

    fn set_style(&mut self, element: &Self::Element, property: &str, value: &str);

    fn get_attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    fn clear_attribute(&mut self, element: &Self::Element, name: &str);

    /// Create an overlay element on top of the document
    fn create_overlay(&mut self, template: &OverlayTemplate) -> Option<Self::Element>;

    /// Detach `element` from the document
    fn remove_element(&mut self, element: &Self::Element);

    /// Closest element named `tag`, starting at `element` itself
    fn query_ancestor(&self, element: &Self::Element, tag: &str) -> Option<Self::Element>;

    /// Rows of `table` in document order, each with its cells
    fn table_rows(&self, table: &Self::Element) -> Vec<(Self::Element, Vec<Self::Element>)>;

    /// Writing direction of the editable content
    fn direction(&self) -> Direction;
}

/// What an overlay element is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// A resize bar for the units on this axis
    Bar(Axis),
    /// Full-viewport element catching pointer events while dragging
    Blocker,
}

/// Everything needed to create one overlay element
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayTemplate {
    pub kind: OverlayKind,
    /// Position and size; ignored for the blocker, which covers the viewport
    pub rect: Rect,
    /// Boundary index carried by bars
    pub index: Option<usize>,
    /// CSS cursor while hovering
    pub cursor: Option<&'static str>,
    /// Space-separated classes
    pub class: String,
    /// Paint with a translucent background
    pub visible: bool,
}

impl OverlayTemplate {
    /// Overlay element for a resize bar
    pub fn bar(bar: &BoundaryBar, config: &ResizeConfig) -> Self {
        Self {
            kind: OverlayKind::Bar(bar.axis),
            rect: bar.rect,
            index: Some(bar.index),
            cursor: Some(bar.axis.cursor()),
            class: format!("{} {}", config.bar_class, config.axis_class(bar.axis)),
            visible: config.debug_bars,
        }
    }

    /// Overlay element catching pointer events during a drag
    pub fn blocker() -> Self {
        Self {
            kind: OverlayKind::Blocker,
            rect: Rect::default(),
            index: None,
            cursor: None,
            class: String::new(),
            visible: false,
        }
    }

    /// Inline style declarations for the element
    pub fn style_declarations(&self) -> Vec<(&'static str, String)> {
        let mut style = vec![
            ("margin", "0".to_string()),
            ("padding", "0".to_string()),
        ];
        match self.kind {
            OverlayKind::Blocker => {
                style.push(("position", "fixed".to_string()));
                style.push(("left", "0px".to_string()));
                style.push(("top", "0px".to_string()));
                style.push(("width", "100%".to_string()));
                style.push(("height", "100%".to_string()));
            }
            OverlayKind::Bar(_) => {
                style.push(("position", "absolute".to_string()));
                style.push(("left", format_px(self.rect.x)));
                style.push(("top", format_px(self.rect.y)));
                style.push(("width", format_px(self.rect.width)));
                style.push(("height", format_px(self.rect.height)));
            }
        }
        if let Some(cursor) = self.cursor {
            style.push(("cursor", cursor.to_string()));
        }
        if self.visible {
            style.push(("background-color", "blue".to_string()));
            style.push(("opacity", "0.5".to_string()));
        }
        style
    }

    /// Attributes for the element, besides `class` and `style`
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = vec![(BOGUS_ATTRIBUTE, "all".to_string())];
        if let OverlayKind::Bar(axis) = self.kind {
            attributes.push(("unselectable", "true".to_string()));
            if let Some(index) = self.index {
                attributes.push((axis.index_attribute(), index.to_string()));
            }
        }
        attributes
    }
}

/// `12.5` -> `"12.5px"`
pub fn format_px(value: f32) -> String {
    format!("{value}px")
}

/// Read the rows and cells of `table`, with spans defaulting to 1
pub fn capture_snapshot<D: TableDom>(dom: &D, table: &D::Element) -> TableSnapshot<D::Element> {
    let rows = dom
        .table_rows(table)
        .into_iter()
        .map(|(row, cells)| SnapshotRow {
            element: row,
            cells: cells
                .into_iter()
                .map(|cell| {
                    let rowspan =
                        parse_span(dom.get_attribute(&cell, "rowspan").as_deref(), MAX_ROWSPAN);
                    let colspan =
                        parse_span(dom.get_attribute(&cell, "colspan").as_deref(), MAX_COLSPAN);
                    SnapshotCell::new(cell, rowspan, colspan)
                })
                .collect(),
        })
        .collect();
    TableSnapshot::new(table.clone(), rows)
}

/// Fresh logical grid for `table` as it is right now
pub fn build_grid<D: TableDom>(dom: &D, table: &D::Element) -> LogicalGrid<D::Element> {
    LogicalGrid::build(capture_snapshot(dom, table))
}

/// Reads cell sizes and boxes through a [`TableDom`]
pub struct DomMetrics<'a, D> {
    dom: &'a D,
}

impl<'a, D: TableDom> DomMetrics<'a, D> {
    pub fn new(dom: &'a D) -> Self {
        Self { dom }
    }
}

impl<D: TableDom> CellMetrics<D::Element> for DomMetrics<'_, D> {
    /// Inline style first, legacy attribute second
    fn declared_size(&self, element: &D::Element, axis: Axis) -> Option<Length> {
        let property = axis.size_property();
        self.dom
            .get_style(element, property)
            .and_then(|value| parse_length(&value))
            .or_else(|| {
                self.dom
                    .get_attribute(element, property)
                    .and_then(|value| parse_length(&value))
            })
    }

    fn rect(&self, element: &D::Element) -> Rect {
        self.dom.measure(element)
    }

    fn direction(&self) -> Direction {
        self.dom.direction()
    }
}

/// Write a resize plan back: inline sizes on cells, rows and the table,
/// legacy size attributes cleared.
pub fn write_plan<D: TableDom>(dom: &mut D, table: &D::Element, plan: &ResizePlan<D::Element>) {
    let property = plan.axis.size_property();

    for row in &plan.rows {
        dom.set_style(&row.element, property, &format_px(row.size));
        dom.clear_attribute(&row.element, property);
    }
    for cell in &plan.cells {
        dom.set_style(&cell.element, property, &format_px(cell.size));
        dom.clear_attribute(&cell.element, property);
    }

    dom.set_style(table, property, &format_px(plan.total));
    dom.clear_attribute(table, property);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_format_px() {
        assert_eq!(format_px(120.0), "120px");
        assert_eq!(format_px(12.5), "12.5px");
    }

    #[test]
    fn test_bar_overlay_template() {
        let bar = BoundaryBar {
            axis: Axis::Col,
            index: 2,
            rect: Rect::new(48.0, 0.0, 4.0, 40.0),
        };
        let template = OverlayTemplate::bar(&bar, &ResizeConfig::default());
        assert_eq!(template.class, "table-resize-bar table-resize-bar-col");
        assert_eq!(template.cursor, Some("col-resize"));

        let style = template.style_declarations();
        assert!(style.contains(&("left", "48px".to_string())));
        assert!(style.contains(&("height", "40px".to_string())));
        assert!(style.contains(&("cursor", "col-resize".to_string())));

        let attributes = template.attributes();
        assert!(attributes.contains(&("data-col", "2".to_string())));
        assert!(attributes.contains(&(BOGUS_ATTRIBUTE, "all".to_string())));
    }

    #[test]
    fn test_blocker_template_covers_viewport() {
        let style = OverlayTemplate::blocker().style_declarations();
        assert!(style.contains(&("position", "fixed".to_string())));
        assert!(style.contains(&("width", "100%".to_string())));
        assert!(!style.iter().any(|(name, _)| *name == "cursor"));
    }

    #[test]
    fn test_declared_size_prefers_style() {
        let mut dom = MemoryDom::new();
        let cell = dom.create_element("td", Some(dom.body()));
        dom.set_attribute(&cell, "width", "50%");
        let metrics = DomMetrics::new(&dom);
        assert_eq!(
            metrics.declared_size(&cell, Axis::Col),
            Some(Length::Percent(50.0))
        );

        dom.set_style(&cell, "width", "80px");
        let metrics = DomMetrics::new(&dom);
        assert_eq!(metrics.declared_size(&cell, Axis::Col), Some(Length::Px(80.0)));
        assert_eq!(metrics.declared_size(&cell, Axis::Row), None);
    }
}
