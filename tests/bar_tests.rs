//! Tests for resize bar placement.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use fixtures::{BuiltTable, TableBuilder};
use tablegrip::dom::{build_grid, DomMetrics, TableDom};
use tablegrip::layout::{compute_bars, BoundaryBar};
use tablegrip::{Axis, Rect, MAX_ROWSPAN};
use test_case::test_case;

fn bars_of(built: &BuiltTable) -> Vec<BoundaryBar> {
    let grid = build_grid(&built.dom, &built.table);
    let metrics = DomMetrics::new(&built.dom);
    compute_bars(&grid, &metrics, built.dom.measure(&built.table), 4.0)
}

fn on_axis(bars: &[BoundaryBar], axis: Axis) -> Vec<BoundaryBar> {
    bars.iter().filter(|bar| bar.axis == axis).copied().collect()
}

#[test_case(TableBuilder::new().plain(3, 4) ; "plain")]
#[test_case(TableBuilder::new().row(&[(1, 3)]).row(&[(1, 1), (1, 2)]) ; "colspans")]
#[test_case(TableBuilder::new().row(&[(3, 1), (1, 1)]).row(&[(1, 1)]).row(&[(1, 1)]) ; "rowspan")]
#[test_case(TableBuilder::new().row(&[(2, 2), (1, 1)]).row(&[(1, 1)]).row(&[(1, 1), (1, 1), (1, 1)]) ; "block merge")]
#[test_case(TableBuilder::new().row(&[(1, 4)]) ; "only a spanned cell")]
#[test_case(TableBuilder::new().row(&[(1, 1)]).row(&[(1, 2)]) ; "ragged rows")]
#[test_case(TableBuilder::new().rtl().row(&[(1, 2), (1, 1)]).plain(1, 3) ; "right to left")]
fn test_one_bar_per_unit(builder: TableBuilder) {
    let built = builder.build();
    let grid = build_grid(&built.dom, &built.table);
    let bars = bars_of(&built);

    let rows = on_axis(&bars, Axis::Row);
    let cols = on_axis(&bars, Axis::Col);
    assert_eq!(rows.len(), grid.max_rows());
    assert_eq!(cols.len(), grid.max_cols());
    assert!(rows.iter().enumerate().all(|(i, bar)| bar.index == i));
    assert!(cols.iter().enumerate().all(|(i, bar)| bar.index == i));
}

#[test]
fn test_column_bars_span_table_height() {
    let built = TableBuilder::new().origin(10.0, 30.0).plain(2, 2).build();
    let cols = on_axis(&bars_of(&built), Axis::Col);
    assert_eq!(cols[0].rect, Rect::new(58.0, 30.0, 4.0, 40.0));
    assert_eq!(cols[1].rect, Rect::new(108.0, 30.0, 4.0, 40.0));
}

#[test]
fn test_row_bars_span_table_width() {
    let built = TableBuilder::new()
        .heights(&[20.0, 35.0])
        .plain(2, 3)
        .build();
    let rows = on_axis(&bars_of(&built), Axis::Row);
    assert_eq!(rows[0].rect, Rect::new(0.0, 18.0, 150.0, 4.0));
    assert_eq!(rows[1].rect, Rect::new(0.0, 53.0, 150.0, 4.0));
}

#[test]
fn test_rtl_bars_sit_on_left_edges() {
    let built = TableBuilder::new()
        .rtl()
        .widths(&[30.0, 70.0])
        .plain(1, 2)
        .build();
    let cols = on_axis(&bars_of(&built), Axis::Col);
    // Column 0 is rightmost: [70, 100]; column 1 is [0, 70]
    let centers: Vec<f32> = cols.iter().map(|bar| bar.start() + 2.0).collect();
    assert_eq!(centers, vec![70.0, 0.0]);
}

#[test]
fn test_bar_inside_merge_is_interpolated() {
    let built = TableBuilder::new()
        .widths(&[40.0, 40.0, 40.0])
        .row(&[(1, 3)])
        .build();
    let cols = on_axis(&bars_of(&built), Axis::Col);
    let centers: Vec<f32> = cols.iter().map(|bar| bar.start() + 2.0).collect();
    assert_eq!(centers, vec![40.0, 80.0, 120.0]);
}

#[test]
fn test_ragged_rows_bars_on_real_edges() {
    let built = TableBuilder::new()
        .widths(&[40.0, 60.0])
        .row(&[(1, 1)])
        .row(&[(1, 2)])
        .build();
    let cols = on_axis(&bars_of(&built), Axis::Col);
    let centers: Vec<f32> = cols.iter().map(|bar| bar.start() + 2.0).collect();
    assert_eq!(centers, vec![40.0, 100.0]);
}

#[test]
fn test_tallest_rowspan_gets_every_bar() {
    let built = TableBuilder::new().row(&[(MAX_ROWSPAN, 1)]).build();
    let rows = on_axis(&bars_of(&built), Axis::Row);
    assert_eq!(rows.len(), MAX_ROWSPAN);
    assert_eq!(rows[0].start() + 2.0, 20.0);
}
