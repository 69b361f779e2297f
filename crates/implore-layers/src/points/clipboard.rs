//! Copy and paste of selected points

use ndarray::{Array2, Axis};

use super::PointsLayer;
use crate::colormap::Color;
use crate::error::{LayerResult, ValueError};
use crate::properties::PropertyColumn;

/// Snapshot of the selected points
#[derive(Clone, Debug, PartialEq)]
pub struct Clipboard {
    data: Array2<f64>,
    properties: Vec<(String, PropertyColumn)>,
    size: Array2<f64>,
    edge_color: Vec<Color>,
    face_color: Vec<Color>,
    point: Vec<f64>,
}

impl Clipboard {
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn properties(&self) -> &[(String, PropertyColumn)] {
        &self.properties
    }

    pub fn size(&self) -> &Array2<f64> {
        &self.size
    }

    pub fn edge_color(&self) -> &[Color] {
        &self.edge_color
    }

    pub fn face_color(&self) -> &[Color] {
        &self.face_color
    }

    /// Slicing position when the points were copied
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PointsLayer {
    /// Contents of the clipboard, if anything has been copied
    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    /// Copy the selected points. With nothing selected the clipboard is emptied.
    pub fn copy_data(&mut self) {
        if self.selected.is_empty() {
            self.clipboard = None;
            return;
        }

        let indices: Vec<usize> = self.selected.iter().copied().collect();
        let pick = |colors: &[Color]| indices.iter().map(|&i| colors[i]).collect::<Vec<_>>();

        self.clipboard = Some(Clipboard {
            data: self.data.select(Axis(0), &indices),
            properties: self.properties.take_rows(&indices),
            size: self.size.rows(&indices),
            edge_color: pick(self.edge.values()),
            face_color: pick(self.face.values()),
            point: self.dims.point().to_vec(),
        });
        tracing::debug!("Copied {} points", indices.len());
    }

    /// Append the copied points and select them.
    ///
    /// If the slice moved since the copy, the pasted points are shifted along
    /// the sliced axes so they land in the current slice.
    pub fn paste_data(&mut self) -> LayerResult<()> {
        let Some(clipboard) = self.clipboard.clone() else {
            return Ok(());
        };
        let added = clipboard.len();
        if added == 0 {
            return Ok(());
        }
        if clipboard.data.ncols() != self.ndim() {
            return Err(ValueError::CoordinateDims {
                expected: self.ndim(),
                actual: clipboard.data.ncols(),
            }
            .into());
        }

        let mut data = clipboard.data;
        let point = self.dims.point();
        for axis in self.dims.not_displayed() {
            let offset = point[axis] - clipboard.point[axis];
            data.column_mut(axis).mapv_inplace(|v| v + offset);
        }

        let start = self.len();
        self.data.append(Axis(0), data.view())?;
        self.size.append_rows(clipboard.size.view())?;
        self.properties.append_columns(&clipboard.properties, added);
        self.edge.append(&clipboard.edge_color);
        self.face.append(&clipboard.face_color);
        self.selected = (start..start + added).collect();

        self.dims.update_range(&self.data);
        self.update_thumbnail();
        tracing::debug!("Pasted {} points", added);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, s};

    #[test]
    fn test_copy_and_paste() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let mut layer = PointsLayer::new(data).unwrap();

        layer.paste_data().unwrap();
        assert_eq!(layer.len(), 3);

        layer.copy_data();
        assert!(layer.clipboard().is_none());

        layer.set_selected_data([0, 1]).unwrap();
        layer.copy_data();
        layer.paste_data().unwrap();
        assert_eq!(layer.len(), 5);
        assert_eq!(layer.data().slice(s![..2, ..]), layer.data().slice(s![3.., ..]));
        assert_eq!(layer.selected_data().iter().copied().collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(layer.size().nrows(), 5);

        layer.set_selected_data([]).unwrap();
        layer.copy_data();
        layer.paste_data().unwrap();
        assert!(layer.clipboard().is_none());
        assert_eq!(layer.len(), 5);
    }

    #[test]
    fn test_paste_into_moved_slice() {
        let data = array![[0.0, 1.0, 1.0], [0.0, 2.0, 2.0], [1.0, 3.0, 3.0]];
        let mut layer = PointsLayer::new(data).unwrap();

        layer.set_selected_data([0]).unwrap();
        layer.copy_data();
        layer.set_point(0, 1.0).unwrap();
        layer.paste_data().unwrap();

        assert_eq!(layer.data().row(3), array![1.0, 1.0, 1.0]);
        assert_eq!(layer.view_indices(), vec![2, 3]);
    }
}
