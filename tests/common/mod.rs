//! Common test utilities and assertion helpers.
//!
//! Helpers for reading sizes back out of a [`MemoryDom`] and asserting on
//! computed geometry.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use tablegrip::dom::{MemoryDom, NodeId};
use tablegrip::length::{parse_length, Length};

// Re-export fixtures for convenience
pub use super::fixtures::*;

/// Route `log` output through the test harness (`RUST_LOG=debug` to see it)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Pixel value of an inline style, panicking when absent or not in px
pub fn style_px(dom: &MemoryDom, element: NodeId, property: &str) -> f32 {
    match dom.style(element, property).and_then(parse_length) {
        Some(Length::Px(px)) => px,
        other => panic!("expected a px {property} on {element:?}, got {other:?}"),
    }
}

/// Assert two float vectors match within half a pixel
pub fn assert_sizes_near(actual: &[f32], expected: &[f32]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "size vectors differ in length: {actual:?} vs {expected:?}"
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() < 0.5,
            "size {i} differs: {actual:?} vs {expected:?}"
        );
    }
}
