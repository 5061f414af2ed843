//! Test fixtures for building laid-out tables in memory.
//!
//! [`TableBuilder`] places cells on a logical grid the way a browser would,
//! gives every logical column and row a pixel size, and computes each cell's
//! box from the units it covers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fixtures::TableBuilder;
//!
//! let table = TableBuilder::new()
//!     .widths(&[60.0, 40.0])
//!     .row(&[(1, 2)])
//!     .row(&[(1, 1), (1, 1)])
//!     .build();
//! assert_eq!(table.cells[0].len(), 1);
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

use std::collections::HashSet;

use tablegrip::dom::{MemoryDom, NodeId, TableDom};
use tablegrip::{Direction, Rect};

/// Default column width in fixtures
pub const UNIT_WIDTH: f32 = 50.0;
/// Default row height in fixtures
pub const UNIT_HEIGHT: f32 = 20.0;

/// A table inside a [`MemoryDom`]
pub struct BuiltTable {
    pub dom: MemoryDom,
    pub table: NodeId,
    pub rows: Vec<NodeId>,
    /// Cells per document row, in document order
    pub cells: Vec<Vec<NodeId>>,
}

impl BuiltTable {
    pub fn cell(&self, row: usize, index: usize) -> NodeId {
        self.cells[row][index]
    }
}

/// Builder for tables with explicit per-unit pixel sizes.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    origin: (f32, f32),
    widths: Vec<f32>,
    heights: Vec<f32>,
    direction: Direction,
    rows: Vec<Vec<(usize, usize)>>,
    sections: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-left corner of the table
    pub fn origin(mut self, x: f32, y: f32) -> Self {
        self.origin = (x, y);
        self
    }

    /// Width of each logical column; missing ones use [`UNIT_WIDTH`]
    pub fn widths(mut self, widths: &[f32]) -> Self {
        self.widths = widths.to_vec();
        self
    }

    /// Height of each logical row; missing ones use [`UNIT_HEIGHT`]
    pub fn heights(mut self, heights: &[f32]) -> Self {
        self.heights = heights.to_vec();
        self
    }

    pub fn rtl(mut self) -> Self {
        self.direction = Direction::Rtl;
        self
    }

    /// Put rows inside a `<tbody>`
    pub fn with_tbody(mut self) -> Self {
        self.sections = true;
        self
    }

    /// Add a document row of cells given as `(rowspan, colspan)`
    pub fn row(mut self, cells: &[(usize, usize)]) -> Self {
        self.rows.push(cells.to_vec());
        self
    }

    /// Add `count` rows of `cols` plain cells each
    pub fn plain(mut self, count: usize, cols: usize) -> Self {
        for _ in 0..count {
            self.rows.push(vec![(1, 1); cols]);
        }
        self
    }

    fn width(&self, col: usize) -> f32 {
        self.widths.get(col).copied().unwrap_or(UNIT_WIDTH)
    }

    fn height(&self, row: usize) -> f32 {
        self.heights.get(row).copied().unwrap_or(UNIT_HEIGHT)
    }

    pub fn build(self) -> BuiltTable {
        // Place cells first to learn the logical size
        let mut occupied: HashSet<(usize, usize)> = HashSet::new();
        let mut placed: Vec<Vec<(usize, usize, usize, usize)>> = Vec::new();
        let mut max_cols = 0;
        let mut max_rows = self.rows.len();
        for (r, cells) in self.rows.iter().enumerate() {
            let mut row = Vec::new();
            for &(rowspan, colspan) in cells {
                let mut c = 0;
                while occupied.contains(&(r, c)) {
                    c += 1;
                }
                for dr in 0..rowspan {
                    for dc in 0..colspan {
                        occupied.insert((r + dr, c + dc));
                    }
                }
                max_cols = max_cols.max(c + colspan);
                max_rows = max_rows.max(r + rowspan);
                row.push((r, c, rowspan, colspan));
            }
            placed.push(row);
        }

        let total_width: f32 = (0..max_cols).map(|c| self.width(c)).sum();
        let total_height: f32 = (0..max_rows).map(|r| self.height(r)).sum();
        let (ox, oy) = self.origin;

        let mut dom = MemoryDom::new();
        dom.set_direction(self.direction);
        let body = dom.body();
        let table = dom.create_element("table", Some(body));
        dom.set_rect(table, Rect::new(ox, oy, total_width, total_height));
        let parent = if self.sections {
            dom.create_element("tbody", Some(table))
        } else {
            table
        };

        let mut rows = Vec::new();
        let mut cells = Vec::new();
        for row in &placed {
            let tr = dom.create_element("tr", Some(parent));
            rows.push(tr);
            let mut row_cells = Vec::new();
            for &(r, c, rowspan, colspan) in row {
                let td = dom.create_element("td", Some(tr));
                if rowspan != 1 {
                    dom.set_attribute(&td, "rowspan", &rowspan.to_string());
                }
                if colspan != 1 {
                    dom.set_attribute(&td, "colspan", &colspan.to_string());
                }

                let before: f32 = (0..c).map(|k| self.width(k)).sum();
                let width: f32 = (c..c + colspan).map(|k| self.width(k)).sum();
                let x = match self.direction {
                    Direction::Ltr => ox + before,
                    Direction::Rtl => ox + total_width - before - width,
                };
                let y = oy + (0..r).map(|k| self.height(k)).sum::<f32>();
                let height: f32 = (r..r + rowspan).map(|k| self.height(k)).sum();
                dom.set_rect(td, Rect::new(x, y, width, height));
                row_cells.push(td);
            }
            cells.push(row_cells);
        }

        BuiltTable {
            dom,
            table,
            rows,
            cells,
        }
    }
}
