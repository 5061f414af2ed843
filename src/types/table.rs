/// Largest `colspan` honoured; larger values are clamped, as browsers do
pub const MAX_COLSPAN: usize = 1000;

/// Largest `rowspan` honoured
pub const MAX_ROWSPAN: usize = 65534;

/// One cell of a table as declared in the document
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotCell<E> {
    /// Handle of the cell element
    pub element: E,
    /// Number of logical rows covered (>= 1)
    pub rowspan: usize,
    /// Number of logical columns covered (>= 1)
    pub colspan: usize,
}

impl<E> SnapshotCell<E> {
    /// Create a cell, clamping spans to `1..=MAX_ROWSPAN` / `1..=MAX_COLSPAN`
    pub fn new(element: E, rowspan: usize, colspan: usize) -> Self {
        Self {
            element,
            rowspan: rowspan.clamp(1, MAX_ROWSPAN),
            colspan: colspan.clamp(1, MAX_COLSPAN),
        }
    }

    /// An unspanned cell
    pub fn single(element: E) -> Self {
        Self::new(element, 1, 1)
    }
}

/// One `<tr>` of a table
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRow<E> {
    /// Handle of the row element
    pub element: E,
    /// Cells in document order
    pub cells: Vec<SnapshotCell<E>>,
}

/// Read-only capture of a table's rows and cells at one point in time.
///
/// Built fresh from the document before every redraw or resize so that no
/// geometry outlives the DOM state it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot<E> {
    /// Handle of the `<table>` element
    pub table: E,
    /// Rows in document order
    pub rows: Vec<SnapshotRow<E>>,
}

impl<E> TableSnapshot<E> {
    pub fn new(table: E, rows: Vec<SnapshotRow<E>>) -> Self {
        Self { table, rows }
    }

    /// Total number of declared cells
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).sum()
    }
}
