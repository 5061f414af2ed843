//! Logical grid ("jenga grid") for tables with merged cells.
//!
//! Every declared cell is placed once, at the first free column of its row,
//! and then occupies its whole rowspan x colspan footprint. Lookups by
//! (row, col) are O(1) and every position inside a footprint resolves to the
//! same [`GridCell`].

use std::collections::HashMap;

use crate::types::{Axis, TableSnapshot};

/// A declared cell placed on the logical grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell<E> {
    /// Handle of the cell element
    pub element: E,
    /// Number of logical rows covered
    pub rowspan: usize,
    /// Number of logical columns covered
    pub colspan: usize,
    /// Logical row of the top-left corner
    pub origin_row: usize,
    /// Logical column of the top-left corner
    pub origin_col: usize,
}

impl<E> GridCell<E> {
    /// Span along `axis`
    pub fn span(&self, axis: Axis) -> usize {
        match axis {
            Axis::Col => self.colspan,
            Axis::Row => self.rowspan,
        }
    }

    /// First logical index covered along `axis`
    pub fn origin(&self, axis: Axis) -> usize {
        match axis {
            Axis::Col => self.origin_col,
            Axis::Row => self.origin_row,
        }
    }

    /// One past the last logical index covered along `axis`
    pub fn end(&self, axis: Axis) -> usize {
        self.origin(axis) + self.span(axis)
    }
}

/// A document row and the cells it declares
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow<E> {
    /// Handle of the row element
    pub element: E,
    /// Indices into [`LogicalGrid::cells`], in document order
    pub cells: Vec<usize>,
}

/// Normalized row x column view of a table
#[derive(Debug, Clone)]
pub struct LogicalGrid<E> {
    table: E,
    cells: Vec<GridCell<E>>,
    rows: Vec<GridRow<E>>,
    access: HashMap<(usize, usize), usize>,
    max_rows: usize,
    max_cols: usize,
}

impl<E> LogicalGrid<E> {
    /// Lay out a snapshot on the logical grid.
    ///
    /// Overlapping footprints are not rejected: the later cell takes over the
    /// contested positions.
    pub fn build(snapshot: TableSnapshot<E>) -> Self {
        let mut cells = Vec::with_capacity(snapshot.cell_count());
        let mut rows = Vec::with_capacity(snapshot.rows.len());
        let mut access: HashMap<(usize, usize), usize> = HashMap::new();
        let mut max_rows = 0;
        let mut max_cols = 0;

        for (row_index, row) in snapshot.rows.into_iter().enumerate() {
            let mut row_cells = Vec::with_capacity(row.cells.len());

            for cell in row.cells {
                let mut start = 0;
                while access.contains_key(&(row_index, start)) {
                    start += 1;
                }

                let id = cells.len();
                let rowspan = cell.rowspan.max(1);
                let colspan = cell.colspan.max(1);

                for i in 0..colspan {
                    for j in 0..rowspan {
                        let position = (row_index + j, start + i);
                        if let Some(previous) = access.insert(position, id) {
                            log::trace!(
                                "cell {id} overlaps cell {previous} at {position:?}; keeping the later one"
                            );
                        }
                        max_rows = max_rows.max(position.0 + 1);
                        max_cols = max_cols.max(position.1 + 1);
                    }
                }

                cells.push(GridCell {
                    element: cell.element,
                    rowspan,
                    colspan,
                    origin_row: row_index,
                    origin_col: start,
                });
                row_cells.push(id);
            }

            rows.push(GridRow {
                element: row.element,
                cells: row_cells,
            });
        }

        LogicalGrid {
            table: snapshot.table,
            cells,
            rows,
            access,
            max_rows,
            max_cols,
        }
    }

    /// Handle of the table element
    pub fn table(&self) -> &E {
        &self.table
    }

    /// Number of logical rows
    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Number of logical columns
    pub fn max_cols(&self) -> usize {
        self.max_cols
    }

    /// Number of logical units along `axis`
    pub fn count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Col => self.max_cols,
            Axis::Row => self.max_rows,
        }
    }

    /// Cell occupying logical position (row, col)
    pub fn get_at(&self, row: usize, col: usize) -> Option<&GridCell<E>> {
        self.access
            .get(&(row, col))
            .and_then(|&id| self.cells.get(id))
    }

    /// Cell at logical `index` on `axis`, `cross` units along the other axis.
    ///
    /// `get_along(Axis::Col, c, r)` is `get_at(r, c)`.
    pub fn get_along(&self, axis: Axis, index: usize, cross: usize) -> Option<&GridCell<E>> {
        match axis {
            Axis::Col => self.get_at(cross, index),
            Axis::Row => self.get_at(index, cross),
        }
    }

    /// Arena index of the cell at (row, col)
    pub(crate) fn id_at(&self, row: usize, col: usize) -> Option<usize> {
        self.access.get(&(row, col)).copied()
    }

    /// Every placed cell, in document order
    pub fn cells(&self) -> &[GridCell<E>] {
        &self.cells
    }

    /// Every document row, in document order
    pub fn rows(&self) -> &[GridRow<E>] {
        &self.rows
    }
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
    use crate::types::{SnapshotCell, SnapshotRow};

    /// Cells are named by their document position, e.g. `"r1c0"`
    fn snapshot(layout: &[&[(usize, usize)]]) -> TableSnapshot<String> {
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
        TableSnapshot::new("table".to_string(), rows)
    }

    #[test]
    fn test_plain_table() {
        let grid = LogicalGrid::build(snapshot(&[
            &[(1, 1), (1, 1), (1, 1)],
            &[(1, 1), (1, 1), (1, 1)],
        ]));

        assert_eq!(grid.max_rows(), 2);
        assert_eq!(grid.max_cols(), 3);
        for r in 0..2 {
            for c in 0..3 {
                let cell = grid.get_at(r, c).unwrap();
                assert_eq!(cell.element, format!("r{r}c{c}"));
                assert_eq!((cell.origin_row, cell.origin_col), (r, c));
            }
        }
        assert_eq!(grid.cells().len(), 6);
        assert_eq!(grid.rows()[1].element, "r1");
    }

    #[test]
    fn test_colspan_shares_one_cell() {
        let grid = LogicalGrid::build(snapshot(&[&[(1, 1), (1, 1), (1, 1), (1, 2)]]));

        let left = grid.get_at(0, 3).unwrap();
        let right = grid.get_at(0, 4).unwrap();
        assert!(std::ptr::eq(left, right));
        assert_eq!(left.origin_col, 3);
        assert_eq!(left.colspan, 2);
        assert_eq!(grid.max_cols(), 5);
    }

    #[test]
    fn test_rowspan_pushes_later_rows_right() {
        let grid = LogicalGrid::build(snapshot(&[&[(2, 1), (1, 1)], &[(1, 1)]]));

        let spanning = grid.get_at(1, 0).unwrap();
        assert_eq!(spanning.element, "r0c0");
        assert_eq!(spanning.origin_row, 0);

        let shifted = grid.get_at(1, 1).unwrap();
        assert_eq!(shifted.element, "r1c0");
        assert_eq!(shifted.origin_col, 1);
        assert_eq!(grid.max_rows(), 2);
    }

    #[test]
    fn test_rowspan_past_last_row_extends_grid() {
        let grid = LogicalGrid::build(snapshot(&[&[(3, 1), (1, 1)]]));
        assert_eq!(grid.max_rows(), 3);
        assert!(grid.get_at(2, 0).is_some());
        assert!(grid.get_at(2, 1).is_none());
        assert_eq!(grid.rows().len(), 1);
    }

    #[test]
    fn test_overlap_later_cell_wins() {
        // r0c1 spans down into row 1, r1c0 spans right into the same spot
        let grid = LogicalGrid::build(snapshot(&[&[(1, 1), (2, 1)], &[(1, 3)]]));
        assert_eq!(grid.get_at(1, 1).unwrap().element, "r1c0");
        assert_eq!(grid.get_at(0, 1).unwrap().element, "r0c1");
    }

    #[test]
    fn test_empty_table() {
        let grid = LogicalGrid::build(snapshot(&[]));
        assert_eq!(grid.max_rows(), 0);
        assert_eq!(grid.max_cols(), 0);
        assert!(grid.get_at(0, 0).is_none());
    }

    #[test]
    fn test_get_along_is_symmetric() {
        let grid = LogicalGrid::build(snapshot(&[&[(1, 1), (1, 1)], &[(1, 1), (1, 1)]]));
        assert_eq!(grid.get_along(Axis::Col, 1, 0).unwrap().element, "r0c1");
        assert_eq!(grid.get_along(Axis::Row, 1, 0).unwrap().element, "r1c0");
        assert_eq!(grid.count(Axis::Row), 2);
    }
}
