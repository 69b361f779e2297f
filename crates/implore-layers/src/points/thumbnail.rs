//! Thumbnail raster of the current slice

use ndarray::{s, Array3};

use super::PointsLayer;

/// Shape of the thumbnail: rows, columns, RGBA
pub const THUMBNAIL_SHAPE: (usize, usize, usize) = (32, 32, 4);

/// Points beyond this count are subsampled when drawing the thumbnail
pub const MAX_POINTS_THUMBNAIL: usize = 1024;

impl PointsLayer {
    /// RGBA thumbnail of the current slice
    pub fn thumbnail(&self) -> &Array3<f32> {
        &self.thumbnail
    }

    /// Redraw the thumbnail.
    ///
    /// Each point of the current slice colors one pixel with its face color,
    /// after scaling the data extent of the last two displayed axes into the
    /// thumbnail. Alpha is scaled by the layer opacity.
    pub fn update_thumbnail(&mut self) {
        let (rows, cols, _) = THUMBNAIL_SHAPE;
        let mut image = Array3::<f32>::zeros(THUMBNAIL_SHAPE);
        image.slice_mut(s![.., .., 3]).fill(1.0);

        let view = self.view();
        let displayed = self.dims.displayed();
        if !view.is_empty() && displayed.len() >= 2 {
            let range = self.dims.range();
            let axes = [displayed[displayed.len() - 2], displayed[displayed.len() - 1]];
            let mins = axes.map(|a| range[a].0);
            let extent = axes.map(|a| (range[a].1 - range[a].0 + 1.0).max(1.0));
            let zoom = (rows as f64 / extent[0]).min(cols as f64 / extent[1]);

            let columns = view.data.ncols();
            let stride = view.len().div_ceil(MAX_POINTS_THUMBNAIL);
            for k in (0..view.len()).step_by(stride) {
                let pixel = |j: usize, max: usize| {
                    let v = (view.data[[k, columns - 2 + j]] - mins[j] + 0.5) * zoom;
                    v.floor().clamp(0.0, (max - 1) as f64) as usize
                };
                let (y, x) = (pixel(0, rows), pixel(1, cols));
                let color = view.face_color[k].to_array();
                for (c, value) in color.iter().enumerate() {
                    image[[y, x, c]] = *value;
                }
            }
        }

        let opacity = self.opacity as f32;
        image.slice_mut(s![.., .., 3]).mapv_inplace(|a| a * opacity);
        self.thumbnail = image;
    }
}
