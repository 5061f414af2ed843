//! Size adjustments for a dragged boundary.
//!
//! Dragging an inner boundary moves space between the two units next to it;
//! only the trailing boundary changes the overall table extent.

/// Per-unit size deltas for dragging boundary `index` by `step` pixels.
///
/// `index` names the boundary after unit `index`; the last index is the
/// table's trailing edge. No unit that shrinks ends up below `min`. An
/// out-of-range `index` yields all zeros.
pub fn determine_deltas(sizes: &[f32], index: usize, step: f32, min: f32) -> Vec<f32> {
    let mut deltas = vec![0.0; sizes.len()];
    let last = match sizes.len().checked_sub(1) {
        Some(last) if index <= last => last,
        _ => return deltas,
    };

    if last == 0 || index == last {
        on_trailing(sizes, &mut deltas, index, step, min);
    } else {
        on_leading_or_middle(sizes, &mut deltas, index, step, min);
    }
    deltas
}

/// Boundary between `index` and `index + 1`: the pair keeps its total size
fn on_leading_or_middle(sizes: &[f32], deltas: &mut [f32], index: usize, step: f32, min: f32) {
    let (Some(&this), Some(&next)) = (sizes.get(index), sizes.get(index + 1)) else {
        return;
    };

    let (this_delta, next_delta) = if step >= 0.0 {
        let new_next = min.max(next - step);
        (step, new_next - next)
    } else {
        let new_this = min.max(this + step);
        let applied = new_this - this;
        (applied, -applied)
    };

    if let Some(d) = deltas.get_mut(index) {
        *d = this_delta;
    }
    if let Some(d) = deltas.get_mut(index + 1) {
        *d = next_delta;
    }
}

/// Trailing edge (or a table with a single unit): only this unit changes
fn on_trailing(sizes: &[f32], deltas: &mut [f32], index: usize, step: f32, min: f32) {
    let Some(&this) = sizes.get(index) else {
        return;
    };
    let delta = if step >= 0.0 {
        step
    } else {
        min.max(this + step) - this
    };
    if let Some(d) = deltas.get_mut(index) {
        *d = delta;
    }
}

/// Apply `deltas` to `sizes` element-wise
pub fn apply_deltas(sizes: &[f32], deltas: &[f32]) -> Vec<f32> {
    sizes
        .iter()
        .zip(deltas.iter().chain(std::iter::repeat(&0.0)))
        .map(|(size, delta)| size + delta)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_boundary_grow() {
        let deltas = determine_deltas(&[100.0, 100.0, 100.0], 1, 20.0, 10.0);
        assert_eq!(deltas, vec![0.0, 20.0, -20.0]);
    }

    #[test]
    fn test_middle_boundary_grow_clamps_neighbour() {
        let deltas = determine_deltas(&[100.0, 100.0, 100.0], 1, 150.0, 10.0);
        assert_eq!(deltas, vec![0.0, 150.0, -90.0]);
    }

    #[test]
    fn test_leading_boundary_shrink_is_complementary() {
        let deltas = determine_deltas(&[100.0, 50.0, 30.0], 0, -30.0, 10.0);
        assert_eq!(deltas, vec![-30.0, 30.0, 0.0]);

        let clamped = determine_deltas(&[100.0, 50.0, 30.0], 0, -500.0, 10.0);
        assert_eq!(clamped, vec![-90.0, 90.0, 0.0]);
    }

    #[test]
    fn test_trailing_boundary() {
        assert_eq!(
            determine_deltas(&[100.0, 100.0], 1, -300.0, 10.0),
            vec![0.0, -90.0]
        );
        assert_eq!(
            determine_deltas(&[100.0, 100.0], 1, 40.0, 10.0),
            vec![0.0, 40.0]
        );
    }

    #[test]
    fn test_single_unit() {
        assert_eq!(determine_deltas(&[50.0], 0, 25.0, 10.0), vec![25.0]);
        assert_eq!(determine_deltas(&[50.0], 0, -100.0, 10.0), vec![-40.0]);
    }

    #[test]
    fn test_out_of_range_and_empty() {
        assert_eq!(determine_deltas(&[100.0, 100.0], 2, 20.0, 10.0), vec![0.0, 0.0]);
        assert_eq!(determine_deltas(&[50.0], 3, 20.0, 10.0), vec![0.0]);
        assert!(determine_deltas(&[], 0, 20.0, 10.0).is_empty());
    }

    #[test]
    fn test_apply_deltas() {
        assert_eq!(
            apply_deltas(&[100.0, 100.0, 100.0], &[0.0, 20.0, -20.0]),
            vec![100.0, 120.0, 80.0]
        );
        assert_eq!(apply_deltas(&[10.0, 20.0], &[5.0]), vec![15.0, 20.0]);
    }
}
