//! Layer data as produced by file readers
//!
//! A reader returns [`LayerData`]: the raw data, a metadata map of layer
//! options, and optionally the kind of layer the data is meant for.

use std::fmt;
use std::str::FromStr;

use ndarray::Ix2;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::PointsConfig;
use crate::error::{LayerResult, ValueError};
use crate::image::{guess_pyramid, guess_rgb, ImageData};
use crate::points::PointsLayer;

/// Kind of layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Image,
    Labels,
    Points,
    Shapes,
    Surface,
    Vectors,
}

impl LayerType {
    pub fn name(&self) -> &'static str {
        match self {
            LayerType::Image => "image",
            LayerType::Labels => "labels",
            LayerType::Points => "points",
            LayerType::Shapes => "shapes",
            LayerType::Surface => "surface",
            LayerType::Vectors => "vectors",
        }
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayerType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(LayerType::Image),
            "labels" => Ok(LayerType::Labels),
            "points" => Ok(LayerType::Points),
            "shapes" => Ok(LayerType::Shapes),
            "surface" => Ok(LayerType::Surface),
            "vectors" => Ok(LayerType::Vectors),
            _ => Err(ValueError::UnknownLayerType {
                layer_type: s.to_string(),
            }),
        }
    }
}

/// Data, options and layer kind returned by a reader
#[derive(Clone, Debug, PartialEq)]
pub struct LayerData {
    pub data: ImageData<f64>,
    pub metadata: Map<String, Value>,
    pub layer_type: Option<LayerType>,
}

impl LayerData {
    /// Data with no metadata and no layer kind
    pub fn new(data: impl Into<ImageData<f64>>) -> Self {
        Self {
            data: data.into(),
            metadata: Map::new(),
            layer_type: None,
        }
    }

    /// Image data, with `rgb` and `is_pyramid` guessed from the shapes
    pub fn image(data: impl Into<ImageData<f64>>) -> Self {
        let data = data.into();
        let rgb = data.shape().is_some_and(guess_rgb);
        let is_pyramid = guess_pyramid(&data);

        Self::new(data)
            .with_layer_type(LayerType::Image)
            .with_metadata("rgb", rgb)
            .with_metadata("is_pyramid", is_pyramid)
    }

    pub fn with_layer_type(mut self, layer_type: LayerType) -> Self {
        self.layer_type = Some(layer_type);
        self
    }

    /// Add one metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Build a point layer from N×D coordinates, reading layer options from
    /// the metadata
    pub fn to_points_layer(&self) -> LayerResult<PointsLayer> {
        if let Some(layer_type) = self.layer_type.filter(|t| *t != LayerType::Points) {
            return Err(ValueError::WrongLayerType {
                expected: LayerType::Points.to_string(),
                actual: layer_type.to_string(),
            }
            .into());
        }

        let coords = match &self.data {
            ImageData::Single(array) => array.clone().into_dimensionality::<Ix2>()?,
            ImageData::Levels(levels) => {
                return Err(ValueError::WrongLayerType {
                    expected: LayerType::Points.to_string(),
                    actual: format!("multiscale data with {} levels", levels.len()),
                }
                .into())
            }
        };

        let config: PointsConfig = serde_json::from_value(Value::Object(self.metadata.clone()))
            .map_err(|e| ValueError::InvalidConfig {
                message: e.to_string(),
            })?;
        PointsLayer::with_config(coords, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, ArrayD, IxDyn};

    #[test]
    fn test_layer_type_parse() {
        assert_eq!("points".parse::<LayerType>().unwrap(), LayerType::Points);
        assert_eq!("Image".parse::<LayerType>().unwrap(), LayerType::Image);
        assert!("volume".parse::<LayerType>().is_err());
        assert_eq!(LayerType::Vectors.to_string(), "vectors");
    }

    #[test]
    fn test_image_metadata() {
        let data = LayerData::image(ArrayD::<f64>::zeros(IxDyn(&[10, 15, 3])));
        assert_eq!(data.layer_type, Some(LayerType::Image));
        assert_eq!(data.metadata["rgb"], Value::Bool(true));
        assert_eq!(data.metadata["is_pyramid"], Value::Bool(false));
    }

    #[test]
    fn test_to_points_layer() {
        let coords = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
        let data = LayerData::new(coords)
            .with_layer_type(LayerType::Points)
            .with_metadata("name", "spots")
            .with_metadata("size", 4.0);

        let layer = data.to_points_layer().unwrap();
        assert_eq!(layer.name(), "spots");
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.current_size(), 10.0);
        assert_eq!(layer.size()[[0, 0]], 4.0);
    }

    #[test]
    fn test_to_points_layer_with_property_map() {
        let coords = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
        let data = LayerData::new(coords)
            .with_metadata("properties", serde_json::json!({"point_type": ["A", "B"]}))
            .with_metadata("face_color", "point_type");

        let layer = data.to_points_layer().unwrap();
        assert_eq!(layer.properties().num_columns(), 1);
        assert_eq!(
            layer.color_property(crate::color::ColorTarget::Face),
            Some("point_type")
        );
    }

    #[test]
    fn test_to_points_layer_rejects_images() {
        let data = LayerData::image(ArrayD::<f64>::zeros(IxDyn(&[4, 4])));
        assert!(data.to_points_layer().unwrap_err().is_value_error());

        let cube = LayerData::new(ArrayD::<f64>::zeros(IxDyn(&[2, 2, 2])));
        assert!(cube.to_points_layer().is_err());
    }
}
