//! Row-wise helpers shared by the per-point arrays

use std::collections::BTreeSet;

use ndarray::{Array2, Axis};

/// Indices in `0..n` that are not in `removed`, in order
pub(crate) fn kept_indices(n: usize, removed: &BTreeSet<usize>) -> Vec<usize> {
    (0..n).filter(|i| !removed.contains(i)).collect()
}

/// Drop the given rows, preserving the order of the rest
pub(crate) fn remove_rows(array: &Array2<f64>, removed: &BTreeSet<usize>) -> Array2<f64> {
    array.select(Axis(0), &kept_indices(array.nrows(), removed))
}

/// Drop the given positions from a vector, preserving the order of the rest
pub(crate) fn remove_items<T>(items: &mut Vec<T>, removed: &BTreeSet<usize>) {
    if removed.is_empty() {
        return;
    }
    let mut index = 0;
    items.retain(|_| {
        let keep = !removed.contains(&index);
        index += 1;
        keep
    });
}
