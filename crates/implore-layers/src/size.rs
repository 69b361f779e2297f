//! Per-point, per-dimension marker sizes

use std::collections::BTreeSet;

use ndarray::{s, Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::array::remove_rows;
use crate::error::{LayerResult, ValueError};

/// Default marker size
pub const DEFAULT_SIZE: f64 = 10.0;

/// Size as given by the user
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeSpec {
    /// One size for every point and dimension
    Scalar(f64),
    /// One size per dimension, shared by every point
    Vector(Vec<f64>),
    /// N×D sizes, or D×N (transposed on use)
    Array(Array2<f64>),
}

impl SizeSpec {
    /// Broadcast to an `n`×`ndim` array
    pub fn resolve(&self, n: usize, ndim: usize) -> LayerResult<Array2<f64>> {
        let bad_shape = |shape: Vec<usize>| ValueError::SizeShape {
            shape,
            points: n,
            ndim,
        };

        match self {
            SizeSpec::Scalar(v) => Ok(Array2::from_elem((n, ndim), *v)),
            SizeSpec::Vector(v) if v.len() == ndim => {
                Ok(Array2::from_shape_fn((n, ndim), |(_, j)| v[j]))
            }
            SizeSpec::Vector(v) => Err(bad_shape(vec![v.len()]).into()),
            SizeSpec::Array(a) if a.dim() == (n, ndim) => Ok(a.clone()),
            SizeSpec::Array(a) if a.dim() == (ndim, n) => Ok(a.t().to_owned()),
            SizeSpec::Array(a) if a.dim() == (1, ndim) => {
                Ok(Array2::from_shape_fn((n, ndim), |(_, j)| a[[0, j]]))
            }
            SizeSpec::Array(a) => Err(bad_shape(a.shape().to_vec()).into()),
        }
    }
}

impl Default for SizeSpec {
    fn default() -> Self {
        SizeSpec::Scalar(DEFAULT_SIZE)
    }
}

impl From<f64> for SizeSpec {
    fn from(v: f64) -> Self {
        SizeSpec::Scalar(v)
    }
}

impl From<Vec<f64>> for SizeSpec {
    fn from(v: Vec<f64>) -> Self {
        SizeSpec::Vector(v)
    }
}

impl From<Array2<f64>> for SizeSpec {
    fn from(a: Array2<f64>) -> Self {
        SizeSpec::Array(a)
    }
}

/// Size array plus the size given to new points
#[derive(Clone, Debug, PartialEq)]
pub struct SizeModel {
    sizes: Array2<f64>,
    current: f64,
}

impl SizeModel {
    pub fn new(sizes: Array2<f64>, current: f64) -> Self {
        Self { sizes, current }
    }

    /// N×D sizes
    pub fn sizes(&self) -> &Array2<f64> {
        &self.sizes
    }

    /// Size given to the displayed dimensions of new points
    pub fn current(&self) -> f64 {
        self.current
    }

    pub(crate) fn set_sizes(&mut self, sizes: Array2<f64>) {
        self.sizes = sizes;
    }

    /// Set the current size and resize the selected points. Dimensions with a
    /// zero size stay zero.
    pub(crate) fn set_current(&mut self, value: f64, selected: &BTreeSet<usize>) {
        self.current = value;
        let rows = self.sizes.nrows();
        for &index in selected.iter().filter(|&&i| i < rows) {
            self.sizes
                .row_mut(index)
                .mapv_inplace(|old| if old > 0.0 { value } else { 0.0 });
        }
    }

    /// Adopt the size of the selection when it is uniform on the displayed axes
    pub(crate) fn select(&mut self, selected: &BTreeSet<usize>, displayed: &[usize]) {
        let values: Vec<f64> = selected
            .iter()
            .filter(|&&i| i < self.sizes.nrows())
            .flat_map(|&i| displayed.iter().map(move |&d| (i, d)))
            .map(|(i, d)| self.sizes[[i, d]])
            .collect();

        if let Some(&first) = values.first() {
            if values.iter().all(|&v| v == first) {
                self.current = first;
            }
        }
    }

    /// Append `n` rows: a copy of the last row with the displayed dimensions
    /// set to the current size
    pub(crate) fn on_points_added(&mut self, n: usize, displayed: &[usize]) -> LayerResult<()> {
        let ndim = self.sizes.ncols();
        let mut row = match self.sizes.nrows() {
            0 => Array1::from_elem(ndim, self.current),
            last => self.sizes.row(last - 1).to_owned(),
        };
        for &d in displayed.iter().filter(|&&d| d < ndim) {
            row[d] = self.current;
        }

        for _ in 0..n {
            self.sizes.push_row(row.view())?;
        }
        Ok(())
    }

    /// Append explicit rows (paste)
    pub(crate) fn append_rows(&mut self, rows: ArrayView2<f64>) -> LayerResult<()> {
        self.sizes.append(Axis(0), rows)?;
        Ok(())
    }

    pub(crate) fn on_points_removed(&mut self, removed: &BTreeSet<usize>) {
        self.sizes = remove_rows(&self.sizes, removed);
    }

    pub(crate) fn truncate(&mut self, n: usize) {
        if n < self.sizes.nrows() {
            self.sizes = self.sizes.slice(s![..n, ..]).to_owned();
        }
    }

    /// Discard every row and start over with `n`×`ndim` rows of the current size
    pub(crate) fn reset(&mut self, n: usize, ndim: usize) {
        self.sizes = Array2::from_elem((n, ndim), self.current);
    }

    pub(crate) fn rows(&self, indices: &[usize]) -> Array2<f64> {
        self.sizes.select(Axis(0), indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_resolve_scalar_and_vector() {
        let sizes = SizeSpec::Scalar(5.0).resolve(3, 2).unwrap();
        assert_eq!(sizes, Array2::from_elem((3, 2), 5.0));

        let sizes = SizeSpec::Vector(vec![1.0, 5.0, 5.0]).resolve(2, 3).unwrap();
        assert_eq!(sizes, array![[1.0, 5.0, 5.0], [1.0, 5.0, 5.0]]);

        assert!(SizeSpec::Vector(vec![1.0]).resolve(2, 3).is_err());
    }

    #[test]
    fn test_resolve_transposed() {
        let transposed = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let sizes = SizeSpec::Array(transposed.clone()).resolve(3, 2).unwrap();
        assert_eq!(sizes, transposed.t());
    }

    #[test]
    fn test_resolve_unbroadcastable() {
        let err = SizeSpec::Array(Array2::zeros((3, 8))).resolve(10, 2).unwrap_err();
        assert!(err.is_value_error());
    }

    #[test]
    fn test_added_rows_keep_hidden_dims() {
        let mut model = SizeModel::new(array![[0.0, 5.0, 5.0]], 13.0);
        model.on_points_added(1, &[1, 2]).unwrap();
        assert_eq!(model.sizes().row(1), array![0.0, 13.0, 13.0]);
    }

    #[test]
    fn test_added_rows_on_empty_model() {
        let mut model = SizeModel::new(Array2::zeros((0, 2)), 10.0);
        model.on_points_added(2, &[0, 1]).unwrap();
        assert_eq!(model.sizes(), &Array2::from_elem((2, 2), 10.0));
    }

    #[test]
    fn test_current_size_follows_uniform_selection() {
        let mut model = SizeModel::new(array![[5.0, 5.0], [5.0, 5.0], [20.0, 20.0]], 10.0);
        model.select(&BTreeSet::from([0, 1]), &[0, 1]);
        assert_eq!(model.current(), 5.0);

        model.select(&BTreeSet::from([1, 2]), &[0, 1]);
        assert_eq!(model.current(), 5.0);

        model.set_current(16.0, &BTreeSet::from([0]));
        assert_eq!(model.sizes().row(0), array![16.0, 16.0]);
        assert_eq!(model.sizes().row(1), array![5.0, 5.0]);
    }

    #[test]
    fn test_zero_sizes_stay_zero() {
        let mut model = SizeModel::new(array![[0.0, 5.0, 5.0]], 10.0);
        model.set_current(16.0, &BTreeSet::from([0]));
        assert_eq!(model.sizes().row(0), array![0.0, 16.0, 16.0]);
    }

    #[test]
    fn test_set_current_skips_stale_indices() {
        let mut model = SizeModel::new(array![[5.0, 5.0], [5.0, 5.0]], 10.0);
        model.set_current(12.0, &BTreeSet::from([1, 7]));
        assert_eq!(model.current(), 12.0);
        assert_eq!(model.sizes(), &array![[5.0, 5.0], [12.0, 12.0]]);
    }
}
