//! Coordinate-array bookkeeping for the inference step.

/// Returns the identity coordinates `[0.0, 1.0, ..., n-1]`.
///
/// These seed the external optimizer before any correction is estimated.
pub fn starting_coordinates(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

/// Stably sorts `values` ascending in place and returns `(forward, backward)`
/// index maps.
///
/// `backward[rank]` is the original index of the value now at `rank`;
/// `forward[original]` is the rank the value at `original` moved to. The
/// backward map is the permutation array used to reorder sections before
/// warping. Equal values keep their original relative order.
pub fn sorted_indices(values: &mut [f64]) -> (Vec<usize>, Vec<usize>) {
    let mut backward: Vec<usize> = (0..values.len()).collect();
    backward.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let sorted: Vec<f64> = backward.iter().map(|&i| values[i]).collect();
    values.copy_from_slice(&sorted);

    let mut forward = vec![0usize; backward.len()];
    for (rank, &original) in backward.iter().enumerate() {
        forward[original] = rank;
    }
    (forward, backward)
}
