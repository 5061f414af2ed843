//! Tests for size deduction from declared sizes and measured boxes.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use common::{assert_sizes_near, init_logging};
use fixtures::TableBuilder;
use tablegrip::dom::{build_grid, write_plan, DomMetrics, TableDom};
use tablegrip::layout::{column_widths, deduce_sizes, plan_resize, row_heights};
use tablegrip::Axis;

#[test]
fn test_measured_plain_widths() {
    let built = TableBuilder::new()
        .widths(&[30.0, 70.0, 45.0])
        .plain(2, 3)
        .build();
    let grid = build_grid(&built.dom, &built.table);
    let metrics = DomMetrics::new(&built.dom);
    assert_eq!(
        column_widths(&grid, &metrics, 145.0, 10.0),
        vec![30.0, 70.0, 45.0]
    );
    assert_eq!(row_heights(&grid, &metrics, 40.0, 10.0), vec![20.0, 20.0]);
}

#[test]
fn test_spanned_cell_split_evenly() {
    init_logging();
    // One cell from x=100 to x=140 covering two columns, nothing else
    let built = TableBuilder::new()
        .origin(100.0, 0.0)
        .widths(&[20.0, 20.0])
        .row(&[(1, 2)])
        .build();
    let grid = build_grid(&built.dom, &built.table);
    let metrics = DomMetrics::new(&built.dom);
    assert_eq!(column_widths(&grid, &metrics, 40.0, 10.0), vec![20.0, 20.0]);
}

#[test]
fn test_spanned_cell_with_measured_midpoint() {
    let built = TableBuilder::new()
        .origin(100.0, 0.0)
        .widths(&[20.0, 20.0])
        .row(&[(1, 2)])
        .row(&[(1, 1), (1, 1)])
        .build();
    let grid = build_grid(&built.dom, &built.table);
    let metrics = DomMetrics::new(&built.dom);
    assert_eq!(column_widths(&grid, &metrics, 40.0, 10.0), vec![20.0, 20.0]);
}

#[test]
fn test_uneven_columns_under_spans() {
    // Column 1 is only covered by spanned cells; its size comes from the
    // edges around it.
    let built = TableBuilder::new()
        .widths(&[40.0, 60.0, 30.0])
        .row(&[(1, 1), (1, 2)])
        .row(&[(1, 2), (1, 1)])
        .build();
    let grid = build_grid(&built.dom, &built.table);
    let metrics = DomMetrics::new(&built.dom);
    assert_sizes_near(
        &column_widths(&grid, &metrics, 130.0, 10.0),
        &[40.0, 60.0, 30.0],
    );
}

#[test]
fn test_ragged_rows_keep_measured_widths() {
    // Row 0 stops after one column; row 1 is a single cell across both
    let built = TableBuilder::new()
        .widths(&[40.0, 60.0])
        .row(&[(1, 1)])
        .row(&[(1, 2)])
        .build();
    let grid = build_grid(&built.dom, &built.table);
    let metrics = DomMetrics::new(&built.dom);
    assert_eq!(grid.max_cols(), 2);
    assert_eq!(column_widths(&grid, &metrics, 100.0, 10.0), vec![40.0, 60.0]);
}

#[test]
fn test_declared_style_wins_over_box() {
    let mut built = TableBuilder::new().plain(1, 2).build();
    let first = built.cell(0, 0);
    built.dom.set_style(&first, "width", "80px");

    let grid = build_grid(&built.dom, &built.table);
    let metrics = DomMetrics::new(&built.dom);
    assert_eq!(column_widths(&grid, &metrics, 100.0, 10.0), vec![80.0, 50.0]);
}

#[test]
fn test_legacy_attribute_used_without_style() {
    let mut built = TableBuilder::new().plain(1, 2).build();
    let second = built.cell(0, 1);
    built.dom.set_attribute(&second, "width", "65");

    let grid = build_grid(&built.dom, &built.table);
    let metrics = DomMetrics::new(&built.dom);
    assert_eq!(column_widths(&grid, &metrics, 100.0, 10.0), vec![50.0, 65.0]);
}

#[test]
fn test_percent_uses_table_extent() {
    let mut built = TableBuilder::new().widths(&[100.0, 300.0]).plain(1, 2).build();
    let first = built.cell(0, 0);
    built.dom.set_style(&first, "width", "25%");

    let grid = build_grid(&built.dom, &built.table);
    let metrics = DomMetrics::new(&built.dom);
    let extent = built.dom.measure(&built.table).width;
    assert_eq!(extent, 400.0);
    assert_eq!(
        deduce_sizes(&grid, Axis::Col, &metrics, extent, 10.0),
        vec![100.0, 300.0]
    );
}

#[test]
fn test_garbage_size_falls_back_to_box() {
    let mut built = TableBuilder::new().plain(1, 2).build();
    let first = built.cell(0, 0);
    built.dom.set_style(&first, "width", "auto");
    built.dom.set_attribute(&first, "width", "wide");

    let grid = build_grid(&built.dom, &built.table);
    let metrics = DomMetrics::new(&built.dom);
    assert_eq!(column_widths(&grid, &metrics, 100.0, 10.0), vec![50.0, 50.0]);
}

#[test]
fn test_sizes_never_below_minimum() {
    let built = TableBuilder::new()
        .widths(&[4.0, 50.0])
        .heights(&[2.0])
        .plain(1, 2)
        .build();
    let grid = build_grid(&built.dom, &built.table);
    let metrics = DomMetrics::new(&built.dom);
    assert_eq!(column_widths(&grid, &metrics, 54.0, 10.0), vec![10.0, 50.0]);
    assert_eq!(row_heights(&grid, &metrics, 2.0, 10.0), vec![10.0]);
}

#[test]
fn test_written_sizes_read_back_unchanged() {
    let mut built = TableBuilder::new()
        .widths(&[40.0, 90.0, 60.0])
        .row(&[(1, 2), (1, 1)])
        .row(&[(1, 1), (1, 1), (1, 1)])
        .build();

    let plan = {
        let grid = build_grid(&built.dom, &built.table);
        let metrics = DomMetrics::new(&built.dom);
        plan_resize(&grid, Axis::Col, &metrics, 190.0, 1, 25.0, 10.0)
    };
    assert_eq!(plan.new_sizes, vec![40.0, 115.0, 35.0]);
    write_plan(&mut built.dom, &built.table, &plan);

    let grid = build_grid(&built.dom, &built.table);
    let metrics = DomMetrics::new(&built.dom);
    assert_eq!(column_widths(&grid, &metrics, 190.0, 10.0), plan.new_sizes);
}

#[test]
fn test_written_row_heights_read_back_unchanged() {
    let mut built = TableBuilder::new()
        .heights(&[20.0, 30.0, 25.0])
        .row(&[(2, 1), (1, 1)])
        .row(&[(1, 1)])
        .row(&[(1, 1), (1, 1)])
        .build();

    let plan = {
        let grid = build_grid(&built.dom, &built.table);
        let metrics = DomMetrics::new(&built.dom);
        plan_resize(&grid, Axis::Row, &metrics, 75.0, 0, 6.0, 10.0)
    };
    assert_eq!(plan.new_sizes, vec![26.0, 24.0, 25.0]);
    write_plan(&mut built.dom, &built.table, &plan);

    let grid = build_grid(&built.dom, &built.table);
    let metrics = DomMetrics::new(&built.dom);
    assert_eq!(row_heights(&grid, &metrics, 75.0, 10.0), plan.new_sizes);
}
