//! Turning per-unit sizes back into per-element sizes.
//!
//! A cell gets the sum of the units it spans. For rows, every document row is
//! also given the height of its own logical row.

use super::deltas::{apply_deltas, determine_deltas};
use super::grid::LogicalGrid;
use super::sizes::{deduce_sizes, CellMetrics};
use crate::types::Axis;

/// Absolute size computed for one cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellSize<E> {
    /// Handle of the cell element
    pub element: E,
    /// Sum of the sizes of the spanned units
    pub size: f32,
    /// Span along the resized axis
    pub span: usize,
}

/// Absolute height computed for one document row
#[derive(Debug, Clone, PartialEq)]
pub struct RowSize<E> {
    /// Handle of the row element
    pub element: E,
    /// Height of the logical row
    pub size: f32,
}

/// Sum of `sizes[start..end]`, ignoring indices past the end
pub fn total(start: usize, end: usize, sizes: &[f32]) -> f32 {
    sizes
        .iter()
        .skip(start)
        .take(end.saturating_sub(start))
        .sum()
}

/// Size of every cell along `axis`, in document order
pub fn recalculate_cell_sizes<E: Clone>(
    grid: &LogicalGrid<E>,
    axis: Axis,
    sizes: &[f32],
) -> Vec<CellSize<E>> {
    grid.cells()
        .iter()
        .map(|cell| CellSize {
            element: cell.element.clone(),
            size: total(cell.origin(axis), cell.end(axis), sizes),
            span: cell.span(axis),
        })
        .collect()
}

/// Width of every cell
pub fn recalculate_widths<E: Clone>(grid: &LogicalGrid<E>, widths: &[f32]) -> Vec<CellSize<E>> {
    recalculate_cell_sizes(grid, Axis::Col, widths)
}

/// Height of every cell
pub fn recalculate_cell_heights<E: Clone>(
    grid: &LogicalGrid<E>,
    heights: &[f32],
) -> Vec<CellSize<E>> {
    recalculate_cell_sizes(grid, Axis::Row, heights)
}

/// Height of every document row
pub fn recalculate_row_heights<E: Clone>(
    grid: &LogicalGrid<E>,
    heights: &[f32],
) -> Vec<RowSize<E>> {
    grid.rows()
        .iter()
        .zip(heights.iter())
        .map(|(row, &size)| RowSize {
            element: row.element.clone(),
            size,
        })
        .collect()
}

/// Everything needed to write one resize back to the document
#[derive(Debug, Clone, PartialEq)]
pub struct ResizePlan<E> {
    /// Axis being resized
    pub axis: Axis,
    /// Unit sizes before the drag
    pub sizes: Vec<f32>,
    /// Per-unit adjustments
    pub deltas: Vec<f32>,
    /// Unit sizes after the drag
    pub new_sizes: Vec<f32>,
    /// New table extent on the axis (sum of `new_sizes`)
    pub total: f32,
    /// New size of every cell
    pub cells: Vec<CellSize<E>>,
    /// New height of every document row (empty for column resizes)
    pub rows: Vec<RowSize<E>>,
}

/// Compute the new geometry after dragging boundary `index` by `step`.
///
/// Columns and rows go through the same steps: deduce unit sizes, compute
/// deltas, then expand back onto spanned cells.
pub fn plan_resize<E: Clone>(
    grid: &LogicalGrid<E>,
    axis: Axis,
    metrics: &impl CellMetrics<E>,
    table_extent: f32,
    index: usize,
    step: f32,
    min: f32,
) -> ResizePlan<E> {
    let sizes = deduce_sizes(grid, axis, metrics, table_extent, min);
    let deltas = determine_deltas(&sizes, index, step, min);
    let new_sizes = apply_deltas(&sizes, &deltas);
    let total: f32 = new_sizes.iter().sum();
    let cells = recalculate_cell_sizes(grid, axis, &new_sizes);
    let rows = match axis {
        Axis::Row => recalculate_row_heights(grid, &new_sizes),
        Axis::Col => Vec::new(),
    };

    ResizePlan {
        axis,
        sizes,
        deltas,
        new_sizes,
        total,
        cells,
        rows,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::length::Length;
    use crate::types::{Direction, Rect, SnapshotCell, SnapshotRow, TableSnapshot};

    struct DeclaredOnly;

    impl CellMetrics<(usize, usize)> for DeclaredOnly {
        fn declared_size(&self, _element: &(usize, usize), _axis: Axis) -> Option<Length> {
            Some(Length::Px(100.0))
        }

        fn rect(&self, _element: &(usize, usize)) -> Rect {
            Rect::default()
        }

        fn direction(&self) -> Direction {
            Direction::Ltr
        }
    }

    /// 2x3 table whose first row is one cell spanning all columns
    fn grid() -> LogicalGrid<(usize, usize)> {
        let rows = vec![
            SnapshotRow {
                element: (0, usize::MAX),
                cells: vec![SnapshotCell::new((0, 0), 1, 3)],
            },
            SnapshotRow {
                element: (1, usize::MAX),
                cells: (0..3).map(|c| SnapshotCell::single((1, c))).collect(),
            },
        ];
        LogicalGrid::build(TableSnapshot::new((usize::MAX, usize::MAX), rows))
    }

    #[test]
    fn test_total() {
        let sizes = [10.0, 20.0, 30.0];
        assert_eq!(total(0, 3, &sizes), 60.0);
        assert_eq!(total(1, 2, &sizes), 20.0);
        assert_eq!(total(2, 5, &sizes), 30.0);
        assert_eq!(total(2, 1, &sizes), 0.0);
    }

    #[test]
    fn test_spanned_cell_gets_sum() {
        let widths = recalculate_widths(&grid(), &[50.0, 60.0, 70.0]);
        assert_eq!(widths.len(), 4);
        assert_eq!(widths[0].size, 180.0);
        assert_eq!(widths[0].span, 3);
        assert_eq!(widths[2].size, 60.0);
    }

    #[test]
    fn test_row_heights_per_document_row() {
        let grid = grid();
        let rows = recalculate_row_heights(&grid, &[30.0, 40.0]);
        assert_eq!(
            rows,
            vec![
                RowSize {
                    element: (0, usize::MAX),
                    size: 30.0
                },
                RowSize {
                    element: (1, usize::MAX),
                    size: 40.0
                },
            ]
        );
        let cells = recalculate_cell_heights(&grid, &[30.0, 40.0]);
        assert_eq!(cells[0].size, 30.0);
        assert_eq!(cells[3].size, 40.0);
    }

    #[test]
    fn test_plan_column_resize() {
        let plan = plan_resize(&grid(), Axis::Col, &DeclaredOnly, 300.0, 0, 20.0, 10.0);
        assert_eq!(plan.sizes, vec![100.0, 100.0, 100.0]);
        assert_eq!(plan.deltas, vec![20.0, -20.0, 0.0]);
        assert_eq!(plan.new_sizes, vec![120.0, 80.0, 100.0]);
        assert_eq!(plan.total, 300.0);
        assert_eq!(plan.cells[0].size, 300.0);
        assert!(plan.rows.is_empty());
    }

    #[test]
    fn test_plan_row_resize_uses_same_deltas() {
        let plan = plan_resize(&grid(), Axis::Row, &DeclaredOnly, 200.0, 1, -95.0, 10.0);
        assert_eq!(plan.deltas, vec![0.0, -90.0]);
        assert_eq!(plan.total, 110.0);
        assert_eq!(plan.rows[1].size, 10.0);
    }
}
