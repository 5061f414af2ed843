//! Screen-space rectangles of the resize bars.
//!
//! N logical units get N bars: one on the inner edge of units 1..N and one
//! on the outer edge of the last unit. There is no bar on the table's own
//! leading edge.

use serde::Serialize;

use super::blocks::{blocks, Block};
use super::grid::LogicalGrid;
use super::sizes::{edge_positions, CellMetrics};
use crate::types::{Axis, EdgeSide, Rect};

/// A bar position along its axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarPosition {
    /// Boundary index (the bar sits after unit `index`)
    pub index: usize,
    /// Coordinate of the boundary along the axis
    pub position: f32,
}

/// A resize bar ready to be drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundaryBar {
    /// Axis of the units this bar resizes
    pub axis: Axis,
    /// Boundary index
    pub index: usize,
    /// Bar rectangle in screen space
    pub rect: Rect,
}

impl BoundaryBar {
    /// Coordinate of the bar's leading side along its axis (`left` / `top`)
    pub fn start(&self) -> f32 {
        match self.axis {
            Axis::Col => self.rect.x,
            Axis::Row => self.rect.y,
        }
    }
}

/// Boundary positions for the units on `axis`.
///
/// Edges of representatives that start elsewhere are interpolated between
/// the nearest measured edges; when that is impossible the representative's
/// own edge is used.
pub fn find_positions<E>(
    blocks: &[Block<'_, E>],
    axis: Axis,
    metrics: &impl CellMetrics<E>,
) -> Vec<BarPosition> {
    let count = blocks.len();
    if count == 0 {
        return Vec::new();
    }

    let edges = fill_missing_edges(&edge_positions(blocks, axis, metrics));
    let direction = metrics.direction();
    let mut positions = Vec::with_capacity(count);

    for edge in 1..=count {
        let measured = edges.get(edge).copied().flatten();
        let position = measured.or_else(|| {
            let side = if edge == count {
                EdgeSide::Outer
            } else {
                EdgeSide::Inner
            };
            blocks
                .get(edge.min(count - 1))
                .copied()
                .flatten()
                .map(|cell| metrics.rect(&cell.element).edge(axis, side, direction))
        });

        match position {
            Some(position) => positions.push(BarPosition {
                index: edge - 1,
                position,
            }),
            None => log::debug!("no representative for {axis:?} boundary {}", edge - 1),
        }
    }

    positions
}

/// Known edges kept, missing ones interpolated linearly between their
/// nearest known neighbours
fn fill_missing_edges(edges: &[Option<f32>]) -> Vec<Option<f32>> {
    let mut next: Option<(usize, f32)> = None;
    let mut after: Vec<Option<(usize, f32)>> = edges
        .iter()
        .enumerate()
        .rev()
        .map(|(k, edge)| {
            if let Some(pos) = edge {
                next = Some((k, *pos));
            }
            next
        })
        .collect();
    after.reverse();

    let mut before: Option<(usize, f32)> = None;
    edges
        .iter()
        .enumerate()
        .zip(after)
        .map(|((k, edge), after)| {
            if let Some(pos) = edge {
                before = Some((k, *pos));
                return Some(*pos);
            }
            let (before_index, before_pos) = before?;
            let (after_index, after_pos) = after?;
            let steps = (k - before_index) as f32;
            let span = (after_index - before_index) as f32;
            Some(before_pos + (after_pos - before_pos) * steps / span)
        })
        .collect()
}

/// Bar rectangles centered on `positions`, spanning the whole table across
pub fn bar_rects(
    positions: &[BarPosition],
    axis: Axis,
    table: Rect,
    thickness: f32,
) -> Vec<BoundaryBar> {
    positions
        .iter()
        .map(|bar| {
            let rect = match axis {
                Axis::Col => Rect::new(
                    bar.position - thickness / 2.0,
                    table.y,
                    thickness,
                    table.height,
                ),
                Axis::Row => Rect::new(
                    table.x,
                    bar.position - thickness / 2.0,
                    table.width,
                    thickness,
                ),
            };
            BoundaryBar {
                axis,
                index: bar.index,
                rect,
            }
        })
        .collect()
}

/// All bars of a table: row bars first, then column bars
pub fn compute_bars<E>(
    grid: &LogicalGrid<E>,
    metrics: &impl CellMetrics<E>,
    table: Rect,
    thickness: f32,
) -> Vec<BoundaryBar> {
    let mut bars = Vec::with_capacity(grid.max_rows() + grid.max_cols());
    for axis in [Axis::Row, Axis::Col] {
        let positions = find_positions(&blocks(grid, axis), axis, metrics);
        bars.extend(bar_rects(&positions, axis, table, thickness));
    }
    bars
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
    use crate::types::{Direction, SnapshotCell, SnapshotRow, TableSnapshot};
    use std::collections::HashMap;

    struct Boxes {
        rects: HashMap<&'static str, Rect>,
        direction: Direction,
    }

    impl CellMetrics<&'static str> for Boxes {
        fn declared_size(&self, _element: &&'static str, _axis: Axis) -> Option<Length> {
            None
        }

        fn rect(&self, element: &&'static str) -> Rect {
            self.rects.get(element).copied().unwrap_or_default()
        }

        fn direction(&self) -> Direction {
            self.direction
        }
    }

    /// 2x2 table of 50x20 cells at the origin, named "r{row}c{col}"
    fn plain(direction: Direction) -> (LogicalGrid<&'static str>, Boxes) {
        let names = [["r0c0", "r0c1"], ["r1c0", "r1c1"]];
        let mut rects = HashMap::new();
        let rows = names
            .iter()
            .enumerate()
            .map(|(r, row)| SnapshotRow {
                element: "tr",
                cells: row
                    .iter()
                    .enumerate()
                    .map(|(c, &name)| {
                        let col = match direction {
                            Direction::Ltr => c,
                            Direction::Rtl => 1 - c,
                        };
                        rects.insert(
                            name,
                            Rect::new(col as f32 * 50.0, r as f32 * 20.0, 50.0, 20.0),
                        );
                        SnapshotCell::single(name)
                    })
                    .collect(),
            })
            .collect();
        let grid = LogicalGrid::build(TableSnapshot::new("table", rows));
        (grid, Boxes { rects, direction })
    }

    #[test]
    fn test_column_positions_ltr() {
        let (grid, boxes) = plain(Direction::Ltr);
        let positions = find_positions(&blocks(&grid, Axis::Col), Axis::Col, &boxes);
        assert_eq!(
            positions,
            vec![
                BarPosition {
                    index: 0,
                    position: 50.0
                },
                BarPosition {
                    index: 1,
                    position: 100.0
                },
            ]
        );
    }

    #[test]
    fn test_column_positions_rtl() {
        let (grid, boxes) = plain(Direction::Rtl);
        let positions = find_positions(&blocks(&grid, Axis::Col), Axis::Col, &boxes);
        let xs: Vec<f32> = positions.iter().map(|p| p.position).collect();
        assert_eq!(xs, vec![50.0, 0.0]);
    }

    #[test]
    fn test_bar_rects_centered() {
        let (grid, boxes) = plain(Direction::Ltr);
        let table = Rect::new(0.0, 0.0, 100.0, 40.0);
        let bars = compute_bars(&grid, &boxes, table, 4.0);

        assert_eq!(bars.len(), 4);
        let rows: Vec<&BoundaryBar> = bars.iter().filter(|b| b.axis == Axis::Row).collect();
        assert_eq!(rows[0].rect, Rect::new(0.0, 18.0, 100.0, 4.0));
        assert_eq!(rows[1].rect, Rect::new(0.0, 38.0, 100.0, 4.0));

        let cols: Vec<&BoundaryBar> = bars.iter().filter(|b| b.axis == Axis::Col).collect();
        assert_eq!(cols[0].rect, Rect::new(48.0, 0.0, 4.0, 40.0));
        assert_eq!(cols[1].index, 1);
        assert_eq!(cols[1].start(), 98.0);
    }

    #[test]
    fn test_spanned_boundary_interpolated() {
        let rows = vec![SnapshotRow {
            element: "tr",
            cells: vec![SnapshotCell::new("wide", 1, 3)],
        }];
        let grid = LogicalGrid::build(TableSnapshot::new("table", rows));
        let boxes = Boxes {
            rects: HashMap::from([("wide", Rect::new(0.0, 0.0, 90.0, 20.0))]),
            direction: Direction::Ltr,
        };
        let positions = find_positions(&blocks(&grid, Axis::Col), Axis::Col, &boxes);
        let xs: Vec<f32> = positions.iter().map(|p| p.position).collect();
        assert_eq!(xs, vec![30.0, 60.0, 90.0]);
    }

    #[test]
    fn test_empty_grid_has_no_bars() {
        let grid = LogicalGrid::build(TableSnapshot::<&'static str>::new("table", Vec::new()));
        let boxes = Boxes {
            rects: HashMap::new(),
            direction: Direction::Ltr,
        };
        assert!(compute_bars(&grid, &boxes, Rect::default(), 4.0).is_empty());
    }
}
