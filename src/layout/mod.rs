//! Table geometry: the logical grid and everything computed from it.
//!
//! This module handles:
//! - Building a logical grid from rows of (possibly spanned) cells
//! - Choosing one representative cell per logical row and column
//! - Deducing pixel sizes per row and column, including spanned ones
//! - Computing size deltas for a dragged boundary and expanding them back
//!   onto cells and rows
//! - Placing the resize bars
//!
//! Everything here is pure computation over a snapshot; reading and writing
//! the live document happens in [`crate::dom`].

mod apply;
mod bars;
mod blocks;
mod deltas;
mod grid;
mod sizes;

pub use apply::{
    plan_resize, recalculate_cell_heights, recalculate_cell_sizes, recalculate_row_heights,
    recalculate_widths, total, CellSize, ResizePlan, RowSize,
};
pub use bars::{bar_rects, compute_bars, find_positions, BarPosition, BoundaryBar};
pub use blocks::{blocks, column_blocks, pick_representative, row_blocks, Block};
pub use deltas::{apply_deltas, determine_deltas};
pub use grid::{GridCell, GridRow, LogicalGrid};
pub use sizes::{
    column_widths, deduce_from_edges, deduce_size, deduce_sizes, edge_positions, row_heights,
    CellMetrics,
};
