//! Tests for boundary drag deltas.
//!
//! Inner boundaries trade space between the two neighbouring units; the
//! trailing boundary grows or shrinks the last unit (and so the table).
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use tablegrip::layout::{apply_deltas, determine_deltas};
use test_case::test_case;

#[test_case(&[100.0, 100.0, 100.0], 1, 20.0, &[0.0, 20.0, -20.0] ; "middle boundary grows")]
#[test_case(&[100.0, 100.0, 100.0], 1, 95.0, &[0.0, 95.0, -90.0] ; "next unit clamps to min")]
#[test_case(&[100.0, 100.0, 100.0], 1, -20.0, &[0.0, -20.0, 20.0] ; "middle boundary shrinks")]
#[test_case(&[100.0, 100.0, 100.0], 1, -200.0, &[0.0, -90.0, 90.0] ; "this unit clamps to min")]
#[test_case(&[100.0, 100.0, 100.0], 0, 30.0, &[30.0, -30.0, 0.0] ; "leading boundary")]
#[test_case(&[100.0, 100.0], 1, -300.0, &[0.0, -90.0] ; "trailing boundary clamps")]
#[test_case(&[100.0, 100.0], 1, 40.0, &[0.0, 40.0] ; "trailing boundary grows table")]
#[test_case(&[100.0], 0, -50.0, &[-50.0] ; "single unit")]
#[test_case(&[100.0], 0, -500.0, &[-90.0] ; "single unit clamps")]
fn test_determine_deltas(sizes: &[f32], index: usize, step: f32, expected: &[f32]) {
    assert_eq!(determine_deltas(sizes, index, step, 10.0), expected);
}

#[test_case(2 ; "one past the end")]
#[test_case(usize::MAX ; "far out of range")]
fn test_out_of_range_boundary_is_noop(index: usize) {
    assert_eq!(determine_deltas(&[50.0, 60.0], index, 25.0, 10.0), vec![0.0, 0.0]);
}

#[test]
fn test_empty_sizes() {
    assert!(determine_deltas(&[], 0, 10.0, 10.0).is_empty());
}

#[test]
fn test_inner_drag_keeps_total() {
    let sizes = [80.0, 45.0, 120.0, 30.0];
    for index in 0..3 {
        for step in [-200.0, -20.0, 0.0, 15.0, 200.0] {
            let deltas = determine_deltas(&sizes, index, step, 10.0);
            let new_sizes = apply_deltas(&sizes, &deltas);
            let before: f32 = sizes.iter().sum();
            let after: f32 = new_sizes.iter().sum();
            if step <= 0.0 || sizes[index + 1] - step >= 10.0 {
                assert_eq!(before, after, "index {index} step {step}");
            }
            assert!(
                new_sizes.iter().all(|&s| s >= 10.0),
                "index {index} step {step}: {new_sizes:?}"
            );
        }
    }
}
