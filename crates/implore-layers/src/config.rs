//! Construction options for point layers
//!
//! [`PointsConfig`] collects everything [`PointsLayer::with_config`] needs
//! besides the coordinates. Every field has a default, so a config can be
//! deserialized from a partial JSON document.
//!
//! [`PointsLayer::with_config`]: crate::points::PointsLayer::with_config

use serde::{Deserialize, Serialize};

use crate::color::{ColorSpec, ColorTarget};
use crate::error::{LayerResult, ValueError};
use crate::points::{Blending, Symbol};
use crate::properties::PropertyColumn;
use crate::size::SizeSpec;

/// Options for building a point layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsConfig {
    /// Layer name
    pub name: String,

    /// Property columns in insertion order. Read from a JSON object
    /// (`{"name": [...]}`) or a list of `[name, values]` pairs.
    #[serde(with = "property_columns")]
    pub properties: Vec<(String, PropertyColumn)>,

    /// Marker size
    pub size: SizeSpec,

    /// Width of the marker outline
    pub edge_width: f64,

    /// Edge color, or the name of a property to color by
    pub edge_color: ColorSpec,

    /// Palette for categorical edge colors (None = default palette)
    pub edge_color_cycle: Option<Vec<ColorSpec>>,

    /// Colormap for continuous edge colors
    pub edge_colormap: String,

    /// Fixed contrast limits for continuous edge colors (None = fit to data)
    pub edge_contrast_limits: Option<(f64, f64)>,

    /// Face color, or the name of a property to color by
    pub face_color: ColorSpec,

    /// Palette for categorical face colors (None = default palette)
    pub face_color_cycle: Option<Vec<ColorSpec>>,

    /// Colormap for continuous face colors
    pub face_colormap: String,

    /// Fixed contrast limits for continuous face colors (None = fit to data)
    pub face_contrast_limits: Option<(f64, f64)>,

    pub symbol: Symbol,

    /// Opacity in [0, 1]
    pub opacity: f64,

    pub blending: Blending,

    pub visible: bool,

    /// Render points in every slice their marker intersects
    pub n_dimensional: bool,

    /// Number of displayed dimensions (2 or 3)
    pub ndisplay: usize,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            name: "Points".to_string(),
            properties: Vec::new(),
            size: SizeSpec::default(),
            edge_width: 1.0,
            edge_color: ColorSpec::from("black"),
            edge_color_cycle: None,
            edge_colormap: "viridis".to_string(),
            edge_contrast_limits: None,
            face_color: ColorSpec::from("white"),
            face_color_cycle: None,
            face_colormap: "viridis".to_string(),
            face_contrast_limits: None,
            symbol: Symbol::default(),
            opacity: 1.0,
            blending: Blending::default(),
            visible: true,
            n_dimensional: false,
            ndisplay: 2,
        }
    }
}

impl PointsConfig {
    /// Create a config with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> LayerResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            ValueError::InvalidConfig {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Set the layer name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a property column
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        column: impl Into<PropertyColumn>,
    ) -> Self {
        self.properties.push((name.into(), column.into()));
        self
    }

    /// Set the marker size
    pub fn with_size(mut self, size: impl Into<SizeSpec>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_edge_width(mut self, width: f64) -> Self {
        self.edge_width = width;
        self
    }

    /// Set the color of one channel
    pub fn with_color(mut self, target: ColorTarget, color: impl Into<ColorSpec>) -> Self {
        match target {
            ColorTarget::Edge => self.edge_color = color.into(),
            ColorTarget::Face => self.face_color = color.into(),
        }
        self
    }

    /// Set the categorical palette of one channel
    pub fn with_color_cycle<C: Into<ColorSpec>>(
        mut self,
        target: ColorTarget,
        cycle: impl IntoIterator<Item = C>,
    ) -> Self {
        let cycle = Some(cycle.into_iter().map(Into::into).collect());
        match target {
            ColorTarget::Edge => self.edge_color_cycle = cycle,
            ColorTarget::Face => self.face_color_cycle = cycle,
        }
        self
    }

    /// Set the colormap of one channel
    pub fn with_colormap(mut self, target: ColorTarget, name: impl Into<String>) -> Self {
        match target {
            ColorTarget::Edge => self.edge_colormap = name.into(),
            ColorTarget::Face => self.face_colormap = name.into(),
        }
        self
    }

    /// Fix the contrast limits of one channel
    pub fn with_contrast_limits(mut self, target: ColorTarget, low: f64, high: f64) -> Self {
        match target {
            ColorTarget::Edge => self.edge_contrast_limits = Some((low, high)),
            ColorTarget::Face => self.face_contrast_limits = Some((low, high)),
        }
        self
    }

    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = symbol;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_blending(mut self, blending: Blending) -> Self {
        self.blending = blending;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_n_dimensional(mut self, n_dimensional: bool) -> Self {
        self.n_dimensional = n_dimensional;
        self
    }

    pub fn with_ndisplay(mut self, ndisplay: usize) -> Self {
        self.ndisplay = ndisplay;
        self
    }

    pub(crate) fn color(&self, target: ColorTarget) -> &ColorSpec {
        match target {
            ColorTarget::Edge => &self.edge_color,
            ColorTarget::Face => &self.face_color,
        }
    }

    pub(crate) fn color_cycle(&self, target: ColorTarget) -> Option<&[ColorSpec]> {
        match target {
            ColorTarget::Edge => self.edge_color_cycle.as_deref(),
            ColorTarget::Face => self.face_color_cycle.as_deref(),
        }
    }

    pub(crate) fn colormap(&self, target: ColorTarget) -> &str {
        match target {
            ColorTarget::Edge => &self.edge_colormap,
            ColorTarget::Face => &self.face_colormap,
        }
    }

    pub(crate) fn contrast_limits(&self, target: ColorTarget) -> Option<(f64, f64)> {
        match target {
            ColorTarget::Edge => self.edge_contrast_limits,
            ColorTarget::Face => self.face_contrast_limits,
        }
    }
}

mod property_columns {
    use std::fmt;

    use serde::de::{MapAccess, SeqAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use crate::properties::PropertyColumn;

    pub fn serialize<S: Serializer>(
        columns: &[(String, PropertyColumn)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(columns.len()))?;
        for (name, column) in columns {
            map.serialize_entry(name, column)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, PropertyColumn)>, D::Error> {
        deserializer.deserialize_any(ColumnsVisitor)
    }

    struct ColumnsVisitor;

    impl<'de> Visitor<'de> for ColumnsVisitor {
        type Value = Vec<(String, PropertyColumn)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of property columns or a list of [name, values] pairs")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut columns = Vec::new();
            while let Some(entry) = access.next_entry::<String, PropertyColumn>()? {
                columns.push(entry);
            }
            Ok(columns)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut columns = Vec::new();
            while let Some(entry) = access.next_element::<(String, PropertyColumn)>()? {
                columns.push(entry);
            }
            Ok(columns)
        }
    }
}
