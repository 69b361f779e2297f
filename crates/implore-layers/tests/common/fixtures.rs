//! Deterministic point data shared by the integration tests

use ndarray::Array2;

use implore_layers::PropertyColumn;

/// `n` points in `ndim` dimensions spread over `[0, scale)`.
///
/// Coordinates follow a fixed scramble of the indices, so every run sees the
/// same layout and no two points coincide for `n < 97`.
pub fn scattered_points(n: usize, ndim: usize, scale: f64) -> Array2<f64> {
    Array2::from_shape_fn((n, ndim), |(i, j)| {
        let k = (i * 37 + j * 61 + 11) % 97;
        scale * k as f64 / 97.0
    })
}

/// Categorical column repeating `values` to length `n`
pub fn cycled_labels(values: &[&str], n: usize) -> PropertyColumn {
    values
        .iter()
        .cycle()
        .take(n)
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .into()
}

/// Continuous column repeating `values` to length `n`
#[allow(dead_code)]
pub fn cycled_values(values: &[f64], n: usize) -> PropertyColumn {
    values.iter().cycle().take(n).copied().collect::<Vec<_>>().into()
}

/// The 4×3 coordinates used by the slicing tests
#[allow(dead_code)]
pub fn slicing_coords() -> Array2<f64> {
    ndarray::array![
        [0.0, 1.0, 1.0],
        [0.0, 2.0, 2.0],
        [1.0, 3.0, 3.0],
        [3.0, 3.0, 3.0]
    ]
}
