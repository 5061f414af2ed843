//! Serializable table descriptions and the layout reports computed from them.
//!
//! A [`TableDescription`] captures what the overlay would read from a live
//! page: rows of cells with their spans, explicit sizes and measured boxes.
//! It is turned into a [`MemoryDom`] so reports go through exactly the same
//! code as the browser overlay.

use serde::{Deserialize, Serialize};

use crate::dom::{build_grid, DomMetrics, MemoryDom, NodeId, TableDom};
use crate::error::{Result, TablegripError};
use crate::layout::{blocks, compute_bars, deduce_sizes, BoundaryBar, GridCell};
use crate::overlay::ResizeOverlay;
use crate::types::{Axis, Direction, Rect, ResizeConfig};

fn one() -> usize {
    1
}

/// A table as measured on a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescription {
    #[serde(default)]
    pub direction: Direction,
    /// Table box; defaults to the bounding box of the cells
    #[serde(default)]
    pub rect: Option<Rect>,
    #[serde(default)]
    pub rows: Vec<RowDescription>,
    #[serde(default)]
    pub config: ResizeConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDescription {
    /// Inline `height`, e.g. `"24px"`
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub cells: Vec<CellDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellDescription {
    #[serde(default = "one")]
    pub rowspan: usize,
    #[serde(default = "one")]
    pub colspan: usize,
    /// Inline `width`, e.g. `"120px"` or `"25%"`
    #[serde(default)]
    pub width: Option<String>,
    /// Inline `height`
    #[serde(default)]
    pub height: Option<String>,
    /// Measured box
    #[serde(default)]
    pub rect: Rect,
}

impl Default for CellDescription {
    fn default() -> Self {
        Self {
            rowspan: 1,
            colspan: 1,
            width: None,
            height: None,
            rect: Rect::default(),
        }
    }
}

impl TableDescription {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build an in-memory document holding this table.
    ///
    /// Returns the document and the table element.
    pub fn to_document(&self) -> Result<(MemoryDom, NodeId)> {
        let mut dom = MemoryDom::new();
        dom.set_direction(self.direction);
        let body = dom.body();
        let table = dom.create_element("table", Some(body));
        let tbody = dom.create_element("tbody", Some(table));

        let mut bounds: Option<Rect> = None;
        for (r, row) in self.rows.iter().enumerate() {
            let tr = dom.create_element("tr", Some(tbody));
            if let Some(height) = &row.height {
                dom.set_style(&tr, "height", height);
            }

            for (c, cell) in row.cells.iter().enumerate() {
                validate_rect(&cell.rect)
                    .map_err(|e| TablegripError::Description(format!("row {r}, cell {c}: {e}")))?;

                let td = dom.create_element("td", Some(tr));
                dom.set_rect(td, cell.rect);
                if cell.rowspan != 1 {
                    dom.set_attribute(&td, "rowspan", &cell.rowspan.to_string());
                }
                if cell.colspan != 1 {
                    dom.set_attribute(&td, "colspan", &cell.colspan.to_string());
                }
                if let Some(width) = &cell.width {
                    dom.set_style(&td, "width", width);
                }
                if let Some(height) = &cell.height {
                    dom.set_style(&td, "height", height);
                }
                bounds = Some(bounds.map_or(cell.rect, |b| union(b, cell.rect)));
            }
        }

        let rect = match self.rect {
            Some(rect) => {
                validate_rect(&rect)
                    .map_err(|e| TablegripError::Description(format!("table: {e}")))?;
                rect
            }
            None => bounds.unwrap_or_default(),
        };
        dom.set_rect(table, rect);
        Ok((dom, table))
    }
}

fn validate_rect(rect: &Rect) -> std::result::Result<(), String> {
    let values = [rect.x, rect.y, rect.width, rect.height];
    if values.iter().any(|v| !v.is_finite()) {
        return Err("rect has a non-finite value".to_string());
    }
    if rect.width < 0.0 || rect.height < 0.0 {
        return Err("rect has a negative size".to_string());
    }
    Ok(())
}

fn union(a: Rect, b: Rect) -> Rect {
    let left = a.left().min(b.left());
    let top = a.top().min(b.top());
    let right = a.right().max(b.right());
    let bottom = a.bottom().max(b.bottom());
    Rect::new(left, top, right - left, bottom - top)
}

/// Where a representative cell sits on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
    pub rowspan: usize,
    pub colspan: usize,
}

impl<E> From<&GridCell<E>> for CellPosition {
    fn from(cell: &GridCell<E>) -> Self {
        Self {
            row: cell.origin_row,
            col: cell.origin_col,
            rowspan: cell.rowspan,
            colspan: cell.colspan,
        }
    }
}

/// Geometry of a described table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    pub rows: usize,
    pub cols: usize,
    pub direction: Direction,
    pub table: Rect,
    /// Representative of each logical column
    pub column_blocks: Vec<Option<CellPosition>>,
    /// Representative of each logical row
    pub row_blocks: Vec<Option<CellPosition>>,
    pub column_widths: Vec<f32>,
    pub row_heights: Vec<f32>,
    pub bars: Vec<BoundaryBar>,
}

/// Compute the layout report for `description`
pub fn describe(description: &TableDescription) -> Result<LayoutReport> {
    let (dom, table) = description.to_document()?;
    let config = &description.config;
    let grid = build_grid(&dom, &table);
    let metrics = DomMetrics::new(&dom);
    let table_rect = dom.measure(&table);

    let positions = |axis: Axis| -> Vec<Option<CellPosition>> {
        blocks(&grid, axis)
            .into_iter()
            .map(|block| block.map(CellPosition::from))
            .collect()
    };

    Ok(LayoutReport {
        rows: grid.max_rows(),
        cols: grid.max_cols(),
        direction: dom.direction(),
        table: table_rect,
        column_blocks: positions(Axis::Col),
        row_blocks: positions(Axis::Row),
        column_widths: deduce_sizes(
            &grid,
            Axis::Col,
            &metrics,
            table_rect.width,
            config.min_width,
        ),
        row_heights: deduce_sizes(
            &grid,
            Axis::Row,
            &metrics,
            table_rect.height,
            config.min_height,
        ),
        bars: compute_bars(&grid, &metrics, table_rect, config.bar_thickness),
    })
}

/// New size of one cell after a simulated drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellResize {
    pub row: usize,
    pub col: usize,
    pub size: f32,
}

/// Outcome of dropping a boundary after dragging it by `delta`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragReport {
    pub axis: Axis,
    pub index: usize,
    pub delta: f32,
    pub sizes: Vec<f32>,
    pub deltas: Vec<f32>,
    pub new_sizes: Vec<f32>,
    pub total: f32,
    pub cells: Vec<CellResize>,
}

/// Drag boundary `index` on `axis` by `delta` and report the new sizes
pub fn simulate_drag(
    description: &TableDescription,
    axis: Axis,
    index: usize,
    delta: f32,
) -> Result<DragReport> {
    let (dom, table) = description.to_document()?;
    let origins: Vec<(usize, usize)> = build_grid(&dom, &table)
        .cells()
        .iter()
        .map(|cell| (cell.origin_row, cell.origin_col))
        .collect();

    let mut overlay = ResizeOverlay::new(dom, description.config.clone());
    let plan = overlay.adjust(axis, &table, delta, index);

    let cells = origins
        .iter()
        .zip(&plan.cells)
        .map(|(&(row, col), cell)| CellResize {
            row,
            col,
            size: cell.size,
        })
        .collect();

    Ok(DragReport {
        axis,
        index,
        delta,
        sizes: plan.sizes,
        deltas: plan.deltas,
        new_sizes: plan.new_sizes,
        total: plan.total,
        cells,
    })
}

/// [`describe`] from and to JSON
pub fn describe_json(json: &str) -> Result<String> {
    let report = describe(&TableDescription::from_json(json)?)?;
    Ok(serde_json::to_string(&report)?)
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

    fn cell(x: f32, width: f32) -> CellDescription {
        CellDescription {
            rect: Rect::new(x, 0.0, width, 20.0),
            ..CellDescription::default()
        }
    }

    #[test]
    fn test_minimal_json() {
        let description =
            TableDescription::from_json(r#"{"rows":[{"cells":[{"rect":{"x":0,"y":0,"width":40,"height":20}}]}]}"#)
                .unwrap();
        assert_eq!(description.rows[0].cells[0].colspan, 1);
        assert_eq!(description.config, ResizeConfig::default());

        let report = describe(&description).unwrap();
        assert_eq!((report.rows, report.cols), (1, 1));
        assert_eq!(report.column_widths, vec![40.0]);
        assert_eq!(report.table, Rect::new(0.0, 0.0, 40.0, 20.0));
    }

    #[test]
    fn test_negative_rect_rejected() {
        let description = TableDescription {
            rows: vec![RowDescription {
                height: None,
                cells: vec![cell(0.0, -5.0)],
            }],
            ..TableDescription::default()
        };
        let err = describe(&description).unwrap_err();
        assert!(matches!(err, TablegripError::Description(_)));
        assert!(err.to_string().contains("row 0, cell 0"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            describe_json("{ rows: "),
            Err(TablegripError::Json(_))
        ));
    }

    #[test]
    fn test_simulate_drag_reports_cells() {
        let description = TableDescription {
            rows: vec![RowDescription {
                height: None,
                cells: vec![cell(0.0, 60.0), cell(60.0, 40.0)],
            }],
            ..TableDescription::default()
        };
        let report = simulate_drag(&description, Axis::Col, 1, 25.0).unwrap();
        assert_eq!(report.sizes, vec![60.0, 40.0]);
        assert_eq!(report.new_sizes, vec![60.0, 65.0]);
        assert_eq!(report.total, 125.0);
        assert_eq!(
            report.cells[1],
            CellResize {
                row: 0,
                col: 1,
                size: 65.0
            }
        );
    }
}
