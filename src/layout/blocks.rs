//! Representative cell selection per logical row and column.
//!
//! A spanned cell cannot tell how wide a single one of its columns is, so
//! each logical unit is represented by a cell that starts there and, when
//! possible, does not span past it. Units no cell starts at (ragged rows
//! under a wide cell) are represented by the first cell covering them.

use super::grid::{GridCell, LogicalGrid};
use crate::types::Axis;

/// Representative of one logical unit; `None` only for units no cell covers
pub type Block<'a, E> = Option<&'a GridCell<E>>;

/// Pick the last preferred candidate, else the first candidate, else the fallback
pub fn pick_representative<T: Copy>(
    candidates: &[T],
    is_preferred: impl Fn(&T) -> bool,
    fallback: impl FnOnce() -> Option<T>,
) -> Option<T> {
    candidates
        .iter()
        .rev()
        .find(|candidate| is_preferred(*candidate))
        .or_else(|| candidates.first())
        .copied()
        .or_else(fallback)
}

/// Representatives for every logical unit on `axis`, indexed by unit
pub fn blocks<E>(grid: &LogicalGrid<E>, axis: Axis) -> Vec<Block<'_, E>> {
    let cross_count = grid.count(axis.cross());

    (0..grid.count(axis))
        .map(|index| {
            let mut seen: Vec<usize> = Vec::new();
            let mut candidates: Vec<&GridCell<E>> = Vec::new();
            let mut first_covering: Option<&GridCell<E>> = None;

            for cross in 0..cross_count {
                let (row, col) = match axis {
                    Axis::Col => (cross, index),
                    Axis::Row => (index, cross),
                };
                let Some(id) = grid.id_at(row, col) else {
                    continue;
                };
                if seen.contains(&id) {
                    continue;
                }
                seen.push(id);
                if let Some(cell) = grid.get_at(row, col) {
                    first_covering.get_or_insert(cell);
                    if cell.origin(axis) == index {
                        candidates.push(cell);
                    }
                }
            }

            pick_representative(
                &candidates,
                |cell| cell.span(axis) == 1,
                || first_covering.or_else(|| grid.get_along(axis, index, 0)),
            )
        })
        .collect()
}

/// Representatives for every logical column
pub fn column_blocks<E>(grid: &LogicalGrid<E>) -> Vec<Block<'_, E>> {
    blocks(grid, Axis::Col)
}

/// Representatives for every logical row
pub fn row_blocks<E>(grid: &LogicalGrid<E>) -> Vec<Block<'_, E>> {
    blocks(grid, Axis::Row)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::{SnapshotCell, SnapshotRow, TableSnapshot};

    fn grid(layout: &[&[(usize, usize)]]) -> LogicalGrid<String> {
        let rows = layout
            .iter()
            .enumerate()
            .map(|(r, cells)| SnapshotRow {
                element: format!("r{r}"),
                cells: cells
                    .iter()
                    .enumerate()
                    .map(|(c, &(rowspan, colspan))| {
                        SnapshotCell::new(format!("r{r}c{c}"), rowspan, colspan)
                    })
                    .collect(),
            })
            .collect();
        LogicalGrid::build(TableSnapshot::new("table".to_string(), rows))
    }

    fn names<E: Clone>(blocks: &[Block<'_, E>]) -> Vec<Option<E>> {
        blocks
            .iter()
            .map(|block| block.map(|cell| cell.element.clone()))
            .collect()
    }

    #[test]
    fn test_pick_representative() {
        let candidates = [1, 2, 3, 4];
        assert_eq!(
            pick_representative(&candidates, |n| n % 2 == 0, || None),
            Some(4)
        );
        assert_eq!(
            pick_representative(&candidates, |n| *n > 10, || None),
            Some(1)
        );
        assert_eq!(
            pick_representative(&[] as &[i32], |_| true, || Some(9)),
            Some(9)
        );
        assert_eq!(pick_representative(&[] as &[i32], |_| true, || None), None);
    }

    #[test]
    fn test_unspanned_cell_preferred_over_spanned() {
        // Row 0: one cell spanning both columns. Row 1: two plain cells.
        let grid = grid(&[&[(1, 2)], &[(1, 1), (1, 1)]]);
        let cols = column_blocks(&grid);
        assert_eq!(
            names(&cols),
            vec![Some("r1c0".to_string()), Some("r1c1".to_string())]
        );
    }

    #[test]
    fn test_spanned_origin_used_when_no_single() {
        let grid = grid(&[&[(1, 2), (1, 1)], &[(1, 2), (1, 1)]]);
        let cols = column_blocks(&grid);
        // Column 0: both candidates span 2, the first one is used
        assert_eq!(cols[0].unwrap().element, "r0c0");
        // Column 1: nothing starts there, the first covering cell is used
        assert_eq!(cols[1].unwrap().element, "r0c0");
        assert_eq!(cols[2].unwrap().element, "r1c1");
    }

    #[test]
    fn test_row_blocks_symmetric() {
        // Cell r0c0 spans two rows; row 1 only has a plain cell at column 1
        let grid = grid(&[&[(2, 1), (1, 1)], &[(1, 1)]]);
        let rows = row_blocks(&grid);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].unwrap().element, "r0c1");
        assert_eq!(rows[1].unwrap().element, "r1c0");
    }

    #[test]
    fn test_rowspanned_cell_counted_once() {
        let grid = grid(&[&[(3, 1), (1, 1)], &[(1, 1)], &[(1, 1)]]);
        let cols = column_blocks(&grid);
        assert_eq!(cols[0].unwrap().element, "r0c0");
        // Last single cell starting at column 1 wins
        assert_eq!(cols[1].unwrap().element, "r2c0");
    }

    #[test]
    fn test_block_count_matches_grid() {
        let grid = grid(&[&[(1, 3)], &[(2, 1), (1, 2)], &[(1, 1), (1, 1)]]);
        assert_eq!(column_blocks(&grid).len(), grid.max_cols());
        assert_eq!(row_blocks(&grid).len(), grid.max_rows());
        assert!(column_blocks(&grid).iter().all(Option::is_some));
    }

    #[test]
    fn test_ragged_column_uses_covering_cell() {
        // Row 0 is shorter than row 1; column 1 is only reached by r1c0
        let grid = grid(&[&[(1, 1)], &[(1, 2)]]);
        let cols = column_blocks(&grid);
        assert_eq!(grid.max_cols(), 2);
        assert_eq!(cols[0].unwrap().element, "r0c0");
        assert_eq!(cols[1].unwrap().element, "r1c0");
    }
}
