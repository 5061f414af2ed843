//! Pixel size of every logical row and column.
//!
//! Unspanned representatives report their declared size (inline style, then
//! legacy attribute). Everything else is deduced from the measured edges of
//! the representatives: the gap between the nearest known edge before a unit
//! and the nearest known edge after it is shared evenly by the units in
//! between.

use super::blocks::{blocks, Block};
use super::grid::LogicalGrid;
use crate::length::Length;
use crate::types::{Axis, Direction, EdgeSide, Rect};

/// Read access to the rendered document needed to size a table
pub trait CellMetrics<E> {
    /// Size declared on `element` along `axis`, if any
    fn declared_size(&self, element: &E, axis: Axis) -> Option<Length>;

    /// Screen-space box of `element`
    fn rect(&self, element: &E) -> Rect;

    /// Writing direction of the document
    fn direction(&self) -> Direction;
}

/// Measured boundary positions for the units on `axis`.
///
/// Entry `i < n` is the inner edge of unit `i`, entry `n` the outer edge of
/// the last unit. An edge is only known when a representative actually
/// starts there, or when one ends right before it.
pub fn edge_positions<E>(
    blocks: &[Block<'_, E>],
    axis: Axis,
    metrics: &impl CellMetrics<E>,
) -> Vec<Option<f32>> {
    let direction = metrics.direction();
    let count = blocks.len();

    let mut edges: Vec<Option<f32>> = blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            block
                .filter(|cell| cell.origin(axis) == index)
                .map(|cell| {
                    metrics
                        .rect(&cell.element)
                        .edge(axis, EdgeSide::Inner, direction)
                })
        })
        .collect();

    if count == 0 {
        return edges;
    }

    // Edges no representative starts at may still be closed by one ending there
    let mut closing: Vec<Option<f32>> = vec![None; count + 1];
    for cell in blocks.iter().copied().flatten() {
        if let Some(slot) = closing.get_mut(cell.end(axis)) {
            if slot.is_none() {
                *slot = Some(
                    metrics
                        .rect(&cell.element)
                        .edge(axis, EdgeSide::Outer, direction),
                );
            }
        }
    }
    edges.push(None);
    for (slot, closed) in edges.iter_mut().zip(closing).skip(1) {
        if slot.is_none() {
            *slot = closed;
        }
    }

    edges
}

/// Size of unit `index` from the nearest known edges around it.
///
/// Returns `None` when either side has no known edge or the gap is empty.
pub fn deduce_size(edges: &[Option<f32>], index: usize) -> Option<f32> {
    deduce_from_edges(edges).into_iter().nth(index).flatten()
}

/// [`deduce_size`] for every unit at once, in a single sweep each way.
///
/// Unit `i` spreads the gap between the nearest known edge at or before `i`
/// and the nearest one after it evenly over the units in between.
pub fn deduce_from_edges(edges: &[Option<f32>]) -> Vec<Option<f32>> {
    let units = edges.len().saturating_sub(1);

    let mut next: Option<(usize, f32)> = None;
    let mut after: Vec<Option<(usize, f32)>> = edges
        .iter()
        .enumerate()
        .rev()
        .map(|(k, edge)| {
            let strictly_after = next;
            if let Some(pos) = edge {
                next = Some((k, *pos));
            }
            strictly_after
        })
        .collect();
    after.reverse();

    let mut before: Option<(usize, f32)> = None;
    edges
        .iter()
        .enumerate()
        .zip(after)
        .take(units)
        .map(|((k, edge), after)| {
            if let Some(pos) = edge {
                before = Some((k, *pos));
            }
            let (before_index, before_pos) = before?;
            let (after_index, after_pos) = after?;
            let size = (after_pos - before_pos).abs() / (after_index - before_index) as f32;
            (size.is_finite() && size > 0.0).then_some(size)
        })
        .collect()
}

/// Sizes of every unit on `axis`, each at least `min`.
///
/// `table_extent` is the table's current size on the same axis, used to
/// resolve percentages.
pub fn deduce_sizes<E>(
    grid: &LogicalGrid<E>,
    axis: Axis,
    metrics: &impl CellMetrics<E>,
    table_extent: f32,
    min: f32,
) -> Vec<f32> {
    let blocks = blocks(grid, axis);
    let deduced = deduce_from_edges(&edge_positions(&blocks, axis, metrics));

    blocks
        .iter()
        .zip(deduced)
        .enumerate()
        .map(|(index, (block, deduced))| {
            let declared = block
                .filter(|cell| cell.span(axis) == 1)
                .and_then(|cell| metrics.declared_size(&cell.element, axis))
                .map(|length| length.to_px(table_extent))
                .filter(|px| px.is_finite() && *px > 0.0);

            let size = declared.or(deduced);
            match size {
                Some(size) => size.max(min),
                None => {
                    log::debug!("no measurement for {axis:?} {index}, using minimum {min}");
                    min
                }
            }
        })
        .collect()
}

/// Width of every logical column
pub fn column_widths<E>(
    grid: &LogicalGrid<E>,
    metrics: &impl CellMetrics<E>,
    table_width: f32,
    min: f32,
) -> Vec<f32> {
    deduce_sizes(grid, Axis::Col, metrics, table_width, min)
}

/// Height of every logical row
pub fn row_heights<E>(
    grid: &LogicalGrid<E>,
    metrics: &impl CellMetrics<E>,
    table_height: f32,
    min: f32,
) -> Vec<f32> {
    deduce_sizes(grid, Axis::Row, metrics, table_height, min)
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
    use crate::types::{SnapshotCell, SnapshotRow, TableSnapshot};
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeMetrics {
        rects: HashMap<&'static str, Rect>,
        sizes: HashMap<(&'static str, Axis), Length>,
        direction: Direction,
    }

    impl CellMetrics<&'static str> for FakeMetrics {
        fn declared_size(&self, element: &&'static str, axis: Axis) -> Option<Length> {
            self.sizes.get(&(*element, axis)).copied()
        }

        fn rect(&self, element: &&'static str) -> Rect {
            self.rects.get(element).copied().unwrap_or_default()
        }

        fn direction(&self) -> Direction {
            self.direction
        }
    }

    fn grid(rows: Vec<Vec<(&'static str, usize, usize)>>) -> LogicalGrid<&'static str> {
        let rows = rows
            .into_iter()
            .map(|cells| SnapshotRow {
                element: "tr",
                cells: cells
                    .into_iter()
                    .map(|(name, rowspan, colspan)| SnapshotCell::new(name, rowspan, colspan))
                    .collect(),
            })
            .collect();
        LogicalGrid::build(TableSnapshot::new("table", rows))
    }

    #[test]
    fn test_deduce_size_adjacent_edges() {
        let edges = [Some(0.0), Some(50.0), Some(120.0)];
        assert_eq!(deduce_size(&edges, 0), Some(50.0));
        assert_eq!(deduce_size(&edges, 1), Some(70.0));
        assert_eq!(deduce_size(&edges, 2), None);
    }

    #[test]
    fn test_deduce_size_spreads_over_missing_edges() {
        let edges = [Some(100.0), None, None, Some(160.0)];
        assert_eq!(deduce_size(&edges, 0), Some(20.0));
        assert_eq!(deduce_size(&edges, 1), Some(20.0));
        assert_eq!(deduce_size(&edges, 2), Some(20.0));
    }

    #[test]
    fn test_deduce_size_missing_side() {
        assert_eq!(deduce_size(&[None, Some(10.0)], 0), None);
        assert_eq!(deduce_size(&[Some(10.0), None], 0), None);
        assert_eq!(deduce_size(&[Some(10.0), Some(10.0)], 0), None);
        assert_eq!(deduce_size(&[], 0), None);
    }

    #[test]
    fn test_declared_sizes_used_for_single_cells() {
        let grid = grid(vec![vec![("a", 1, 1), ("b", 1, 1)]]);
        let mut metrics = FakeMetrics::default();
        metrics.sizes.insert(("a", Axis::Col), Length::Px(80.0));
        metrics.sizes.insert(("b", Axis::Col), Length::Percent(25.0));

        let widths = column_widths(&grid, &metrics, 400.0, 10.0);
        assert_eq!(widths, vec![80.0, 100.0]);
    }

    #[test]
    fn test_spanned_cell_split_evenly() {
        let grid = grid(vec![vec![("wide", 1, 2)]]);
        let mut metrics = FakeMetrics::default();
        metrics.rects.insert("wide", Rect::new(100.0, 0.0, 40.0, 20.0));

        let widths = column_widths(&grid, &metrics, 40.0, 10.0);
        assert_eq!(widths, vec![20.0, 20.0]);
    }

    #[test]
    fn test_measured_middle_edge() {
        let grid = grid(vec![
            vec![("wide", 1, 2)],
            vec![("left", 1, 1), ("right", 1, 1)],
        ]);
        let mut metrics = FakeMetrics::default();
        metrics.rects.insert("wide", Rect::new(100.0, 0.0, 40.0, 20.0));
        metrics.rects.insert("left", Rect::new(100.0, 20.0, 20.0, 20.0));
        metrics.rects.insert("right", Rect::new(120.0, 20.0, 20.0, 20.0));

        let blocks = blocks(&grid, Axis::Col);
        let edges = edge_positions(&blocks, Axis::Col, &metrics);
        assert_eq!(edges, vec![Some(100.0), Some(120.0), Some(140.0)]);
        assert_eq!(column_widths(&grid, &metrics, 40.0, 10.0), vec![20.0, 20.0]);
    }

    #[test]
    fn test_rtl_edges() {
        let grid = grid(vec![vec![("first", 1, 1), ("second", 1, 1)]]);
        let mut metrics = FakeMetrics {
            direction: Direction::Rtl,
            ..FakeMetrics::default()
        };
        metrics.rects.insert("first", Rect::new(200.0, 0.0, 100.0, 20.0));
        metrics.rects.insert("second", Rect::new(100.0, 0.0, 100.0, 20.0));

        let blocks = blocks(&grid, Axis::Col);
        let edges = edge_positions(&blocks, Axis::Col, &metrics);
        assert_eq!(edges, vec![Some(300.0), Some(200.0), Some(100.0)]);
        assert_eq!(column_widths(&grid, &metrics, 200.0, 10.0), vec![100.0, 100.0]);
    }

    #[test]
    fn test_row_heights_from_edges_and_minimum() {
        let grid = grid(vec![
            vec![("tall", 2, 1), ("a", 1, 1)],
            vec![("b", 1, 1)],
        ]);
        let mut metrics = FakeMetrics::default();
        metrics.rects.insert("tall", Rect::new(0.0, 0.0, 50.0, 60.0));
        metrics.rects.insert("a", Rect::new(50.0, 0.0, 50.0, 25.0));
        metrics.rects.insert("b", Rect::new(50.0, 25.0, 50.0, 35.0));
        metrics.sizes.insert(("a", Axis::Row), Length::Px(4.0));

        let heights = row_heights(&grid, &metrics, 60.0, 10.0);
        // Declared 4px is clamped to the minimum; row 1 comes from its edges
        assert_eq!(heights, vec![10.0, 35.0]);
    }

    #[test]
    fn test_unmeasurable_falls_back_to_minimum() {
        let grid = grid(vec![vec![("a", 1, 1)]]);
        let metrics = FakeMetrics::default();
        assert_eq!(column_widths(&grid, &metrics, 0.0, 10.0), vec![10.0]);
    }

    #[test]
    fn test_ragged_rows_close_edges_from_covering_cell() {
        // Row 0 holds one 40px cell, row 1 one cell spanning both columns
        let grid = grid(vec![vec![("short", 1, 1)], vec![("wide", 1, 2)]]);
        let mut metrics = FakeMetrics::default();
        metrics.rects.insert("short", Rect::new(0.0, 0.0, 40.0, 20.0));
        metrics.rects.insert("wide", Rect::new(0.0, 20.0, 100.0, 20.0));

        let blocks = blocks(&grid, Axis::Col);
        let edges = edge_positions(&blocks, Axis::Col, &metrics);
        assert_eq!(edges, vec![Some(0.0), Some(40.0), Some(100.0)]);
        assert_eq!(column_widths(&grid, &metrics, 100.0, 10.0), vec![40.0, 60.0]);
    }

    #[test]
    fn test_no_units_no_edges() {
        let grid = grid(vec![]);
        let metrics = FakeMetrics::default();
        assert!(edge_positions(&blocks(&grid, Axis::Col), Axis::Col, &metrics).is_empty());
    }
}
