//! Projection of n-dimensional points onto the displayed slice

use ndarray::{Array1, Array2, Axis};

use crate::colormap::Color;
use crate::dims::Dims;

/// The points visible in the current slice, restricted to the displayed axes
#[derive(Clone, Debug, PartialEq)]
pub struct SliceView {
    /// Indices of the visible points in the full point set, ascending
    pub indices: Vec<usize>,
    /// Displayed coordinates, one row per visible point
    pub data: Array2<f64>,
    /// Displayed sizes scaled by `scale`
    pub size: Array2<f64>,
    pub edge_color: Vec<Color>,
    pub face_color: Vec<Color>,
    /// Shrink factor of each point from its distance to the slice
    pub scale: Array1<f64>,
}

impl SliceView {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Mean displayed size of every visible point
    pub fn mean_size(&self) -> Array1<f64> {
        self.size
            .mean_axis(Axis(1))
            .unwrap_or_else(|| Array1::zeros(self.len()))
    }
}

/// Select the points that intersect the slice at `dims.point()`.
///
/// Without `n_dimensional` a point is visible when its sliced coordinates,
/// truncated toward zero, match the slicing position. With `n_dimensional`
/// a point is visible while the slice passes through its marker, and its
/// displayed size shrinks with the distance.
pub fn project(
    data: &Array2<f64>,
    sizes: &Array2<f64>,
    edge_color: &[Color],
    face_color: &[Color],
    dims: &Dims,
    n_dimensional: bool,
) -> SliceView {
    let displayed = dims.displayed();
    let hidden = dims.not_displayed();
    let point = dims.point();

    let (indices, scale): (Vec<usize>, Vec<f64>) = if hidden.is_empty() {
        (0..data.nrows()).map(|i| (i, 1.0)).unzip()
    } else if !n_dimensional {
        (0..data.nrows())
            .filter(|&i| {
                hidden
                    .iter()
                    .all(|&d| data[[i, d]] as i64 == point[d] as i64)
            })
            .map(|i| (i, 1.0))
            .unzip()
    } else {
        (0..data.nrows())
            .filter_map(|i| {
                hidden.iter().try_fold(1.0, |factor, &d| {
                    let half = sizes[[i, d]] / 2.0;
                    let distance = (data[[i, d]] - point[d]).abs();
                    if distance > half {
                        None
                    } else if half > 0.0 {
                        Some(factor * (half - distance) / half)
                    } else {
                        Some(factor)
                    }
                })
                .map(|factor| (i, factor))
            })
            .unzip()
    };

    let scale = Array1::from(scale);
    let data = data.select(Axis(0), &indices).select(Axis(1), &displayed);
    let mut size = sizes.select(Axis(0), &indices).select(Axis(1), &displayed);
    for (mut row, factor) in size.axis_iter_mut(Axis(0)).zip(scale.iter()) {
        row *= *factor;
    }

    SliceView {
        edge_color: indices.iter().filter_map(|&i| edge_color.get(i).copied()).collect(),
        face_color: indices.iter().filter_map(|&i| face_color.get(i).copied()).collect(),
        indices,
        data,
        size,
        scale,
    }
}
