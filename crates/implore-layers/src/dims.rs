//! Dimension bookkeeping for n-dimensional layers
//!
//! Tracks which axes are displayed, the slicing position along the others,
//! and the data extent per axis.

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{LayerResult, ValueError};

/// Axis order, slicing position and extent of a layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dims {
    ndim: usize,
    ndisplay: usize,
    order: Vec<usize>,
    point: Vec<f64>,
    range: Vec<(f64, f64, f64)>,
}

impl Dims {
    /// `ndim` axes in identity order, displaying the last two
    pub fn new(ndim: usize) -> Self {
        Self {
            ndim,
            ndisplay: 2,
            order: (0..ndim).collect(),
            point: vec![0.0; ndim],
            range: vec![(0.0, 1.0, 1.0); ndim],
        }
    }

    pub fn ndim(&self) -> usize {
        self.ndim
    }

    pub fn ndisplay(&self) -> usize {
        self.ndisplay
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Slicing position along every axis
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    /// (min, max, step) per axis
    pub fn range(&self) -> &[(f64, f64, f64)] {
        &self.range
    }

    /// Displayed axes: the last `ndisplay` entries of the axis order
    pub fn displayed(&self) -> Vec<usize> {
        self.order[self.split()..].to_vec()
    }

    /// Sliced axes
    pub fn not_displayed(&self) -> Vec<usize> {
        self.order[..self.split()].to_vec()
    }

    fn split(&self) -> usize {
        self.ndim - self.ndisplay.min(self.ndim)
    }

    pub fn set_ndisplay(&mut self, ndisplay: usize) -> LayerResult<()> {
        if !(2..=3).contains(&ndisplay) {
            return Err(ValueError::NDisplay { ndisplay }.into());
        }
        self.ndisplay = ndisplay;
        Ok(())
    }

    pub fn set_point(&mut self, axis: usize, value: f64) -> LayerResult<()> {
        let ndim = self.ndim;
        let slot = self
            .point
            .get_mut(axis)
            .ok_or(ValueError::AxisOutOfRange { axis, ndim })?;
        *slot = value;
        Ok(())
    }

    /// Set the axis order; must be a permutation of `0..ndim`
    pub fn set_order(&mut self, order: Vec<usize>) -> LayerResult<()> {
        let mut sorted = order.clone();
        sorted.sort_unstable();
        if sorted != (0..self.ndim).collect::<Vec<_>>() {
            return Err(ValueError::AxisOrder {
                order,
                ndim: self.ndim,
            }
            .into());
        }
        self.order = order;
        Ok(())
    }

    /// Recompute the per-axis extent of `data`
    pub(crate) fn update_range(&mut self, data: &Array2<f64>) {
        self.range = if data.nrows() == 0 {
            vec![(0.0, 1.0, 1.0); self.ndim]
        } else {
            data.axis_iter(Axis(1))
                .map(|column| {
                    let (min, max) = column.iter().fold(
                        (f64::INFINITY, f64::NEG_INFINITY),
                        |(lo, hi), &v| (lo.min(v), hi.max(v)),
                    );
                    (min, max, 1.0)
                })
                .collect()
        };
    }

    /// Start over with a different number of axes, keeping `ndisplay`
    pub(crate) fn reset(&mut self, ndim: usize) {
        let ndisplay = self.ndisplay;
        *self = Dims::new(ndim);
        self.ndisplay = ndisplay;
    }
}
