//! Hit testing, status messages and the selection box

use serde::{Deserialize, Serialize};

use super::PointsLayer;

/// Axis-aligned box around a group of points, in displayed coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionBox {
    /// Outline handles: top-left, top-center, top-right, right-center,
    /// bottom-right, bottom-center, bottom-left, left-center
    pub handles: [[f64; 2]; 8],
    pub center: [f64; 2],
}

impl InteractionBox {
    /// Box spanning `min` to `max`
    pub fn from_bounds(min: [f64; 2], max: [f64; 2]) -> Self {
        let mid = |a: [f64; 2], b: [f64; 2]| [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0];
        let tl = [min[0], min[1]];
        let tr = [max[0], min[1]];
        let br = [max[0], max[1]];
        let bl = [min[0], max[1]];

        Self {
            handles: [tl, mid(tl, tr), tr, mid(tr, br), br, mid(br, bl), bl, mid(bl, tl)],
            center: mid(tl, br),
        }
    }

    /// The four corners, clockwise from top-left
    pub fn corners(&self) -> [[f64; 2]; 4] {
        [self.handles[0], self.handles[2], self.handles[4], self.handles[6]]
    }

    pub fn contains(&self, point: [f64; 2]) -> bool {
        let [min, _, _, _, max, ..] = self.handles;
        (min[0]..=max[0]).contains(&point[0]) && (min[1]..=max[1]).contains(&point[1])
    }
}

impl PointsLayer {
    /// Index of the topmost point under the cursor.
    ///
    /// A point is under the cursor when, on every displayed axis, the cursor
    /// lies within half the point's displayed size. Among several hits the
    /// highest index wins.
    pub fn get_value(&self) -> Option<usize> {
        let view = self.view();
        let displayed = self.dims.displayed();

        (0..view.len()).rev().find_map(|k| {
            let hit = displayed.iter().enumerate().all(|(j, &axis)| {
                let distance = (view.data[[k, j]] - self.coordinates[axis]).abs();
                distance <= view.size[[k, j]] / 2.0
            });
            hit.then_some(view.indices[k])
        })
    }

    /// Status bar message for the cursor position
    pub fn get_message(&self) -> String {
        let coords = self
            .coordinates
            .iter()
            .map(|c| (c.round() as i64).to_string())
            .collect::<Vec<_>>()
            .join(", ");

        match self.get_value() {
            Some(index) => format!("{} [{}], index {}", self.name, coords, index),
            None => format!("{} [{}]", self.name, coords),
        }
    }

    /// Box around the squares of the given points of the current slice.
    ///
    /// `view_indices` index into [`view`](Self::view), not the full point set.
    /// Returns `None` when no valid index is given.
    pub fn interaction_box(&self, view_indices: &[usize]) -> Option<InteractionBox> {
        let view = self.view();
        let columns = view.data.ncols();
        if columns < 2 {
            return None;
        }
        let sizes = view.mean_size();

        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for &k in view_indices.iter().filter(|&&k| k < view.len()) {
            let half = sizes[k] / 2.0;
            for j in 0..2 {
                let v = view.data[[k, columns - 2 + j]];
                min[j] = min[j].min(v - half);
                max[j] = max[j].max(v + half);
            }
        }

        if min[0] > max[0] {
            return None;
        }
        Some(InteractionBox::from_bounds(min, max))
    }
}
