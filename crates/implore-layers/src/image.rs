//! Heuristics for image-like layer data

use ndarray::ArrayD;

/// Image data: one array, or a list of resolution levels
#[derive(Clone, Debug, PartialEq)]
pub enum ImageData<A> {
    Single(ArrayD<A>),
    Levels(Vec<ArrayD<A>>),
}

impl<A> ImageData<A> {
    /// Shape of every level (one entry for a single array)
    pub fn shapes(&self) -> Vec<&[usize]> {
        match self {
            ImageData::Single(array) => vec![array.shape()],
            ImageData::Levels(levels) => levels.iter().map(|l| l.shape()).collect(),
        }
    }

    /// Shape of the full-resolution data
    pub fn shape(&self) -> Option<&[usize]> {
        self.shapes().into_iter().next()
    }

    pub fn num_levels(&self) -> usize {
        match self {
            ImageData::Single(_) => 1,
            ImageData::Levels(levels) => levels.len(),
        }
    }
}

impl<A> From<ArrayD<A>> for ImageData<A> {
    fn from(array: ArrayD<A>) -> Self {
        ImageData::Single(array)
    }
}

impl<A> From<Vec<ArrayD<A>>> for ImageData<A> {
    fn from(levels: Vec<ArrayD<A>>) -> Self {
        ImageData::Levels(levels)
    }
}

/// Whether the last axis of `shape` holds RGB or RGBA channels
pub fn guess_rgb(shape: &[usize]) -> bool {
    shape.len() > 2 && matches!(shape.last(), Some(3 | 4))
}

/// Whether `data` looks like a multiscale pyramid.
///
/// A single array never is; a list of levels is when it has more than one
/// level and each level has strictly fewer elements than the previous one.
pub fn guess_pyramid<A>(data: &ImageData<A>) -> bool {
    match data {
        ImageData::Single(_) => false,
        ImageData::Levels(levels) => guess_pyramid_shapes(levels.iter().map(|l| l.shape())),
    }
}

/// [`guess_pyramid`] on level shapes alone
pub fn guess_pyramid_shapes<S: AsRef<[usize]>>(shapes: impl IntoIterator<Item = S>) -> bool {
    let sizes: Vec<u128> = shapes
        .into_iter()
        .map(|shape| {
            shape
                .as_ref()
                .iter()
                .fold(1u128, |acc, &d| acc.saturating_mul(d as u128))
        })
        .collect();
    sizes.len() > 1 && sizes.windows(2).all(|pair| pair[0] > pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;
    use rstest::rstest;

    fn zeros(shape: &[usize]) -> ArrayD<f64> {
        ArrayD::zeros(IxDyn(shape))
    }

    #[rstest]
    #[case(&[10, 15], false)]
    #[case(&[10, 15, 6], false)]
    #[case(&[10, 15, 3], true)]
    #[case(&[10, 15, 4], true)]
    fn test_guess_rgb(#[case] shape: &[usize], #[case] expected: bool) {
        assert_eq!(guess_rgb(shape), expected);
    }

    #[test]
    fn test_single_array_is_not_pyramid() {
        assert!(!guess_pyramid(&ImageData::from(zeros(&[10, 15]))));
        assert!(!guess_pyramid(&ImageData::from(zeros(&[10, 15, 6]))));
    }

    #[test]
    fn test_guess_pyramid_levels() {
        let one = ImageData::from(vec![zeros(&[10, 15, 6])]);
        assert!(!guess_pyramid(&one));

        let equal = ImageData::from(vec![zeros(&[10, 15, 6]), zeros(&[10, 15, 6])]);
        assert!(!guess_pyramid(&equal));

        let shrinking = ImageData::from(vec![zeros(&[10, 15, 6]), zeros(&[5, 7, 3])]);
        assert!(guess_pyramid(&shrinking));
        assert_eq!(shrinking.num_levels(), 2);
        assert_eq!(shrinking.shape(), Some(&[10, 15, 6][..]));

        let partial = ImageData::from(vec![zeros(&[10, 15, 6]), zeros(&[10, 7, 3])]);
        assert!(guess_pyramid(&partial));
    }

    #[test]
    fn test_guess_pyramid_large_shapes() {
        let s = 8192;
        assert!(guess_pyramid_shapes([[s; 3], [s / 2; 3], [s / 4; 3]]));
        assert!(guess_pyramid_shapes([vec![usize::MAX, 4], vec![usize::MAX, 2]]));
    }
}
