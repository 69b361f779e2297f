//! Color specifications and resolution
//!
//! A point layer has two structurally identical color channels, edge and face.
//! Each channel is a [`ColorChannel`] and is addressed with a [`ColorTarget`].
//!
//! User-facing color input is a [`ColorSpec`]: a color name, hex string or
//! property name, a list of 3/4 components, or one color per point.

mod channel;
mod names;

pub use channel::ColorChannel;
pub use names::{default_color_cycle, named_color};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::colormap::Color;
use crate::error::{LayerError, LayerResult, ValueError};

/// Which color channel of a layer an operation addresses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTarget {
    Edge,
    Face,
}

impl ColorTarget {
    /// Both channels, edge first
    pub const ALL: [ColorTarget; 2] = [ColorTarget::Edge, ColorTarget::Face];

    pub fn name(&self) -> &'static str {
        match self {
            ColorTarget::Edge => "edge",
            ColorTarget::Face => "face",
        }
    }
}

impl fmt::Display for ColorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a channel produces its per-point colors
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Colors are assigned explicitly
    #[default]
    Direct,
    /// Categorical property values are assigned colors from a cycle
    Cycle,
    /// Continuous property values are mapped through a colormap
    Colormap,
}

impl ColorMode {
    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::Direct => "direct",
            ColorMode::Cycle => "cycle",
            ColorMode::Colormap => "colormap",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(ColorMode::Direct),
            "cycle" => Ok(ColorMode::Cycle),
            "colormap" => Ok(ColorMode::Colormap),
            other => Err(ValueError::UnknownColorMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// A color as given by the user
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Color name, hex string, or the name of a property column
    Name(String),
    /// A single RGB or RGBA color
    Components(Vec<f32>),
    /// One RGB or RGBA color per point
    Array(Vec<Vec<f32>>),
}

impl ColorSpec {
    /// Resolve to a single color. Property names do not resolve.
    pub fn to_color(&self) -> LayerResult<Color> {
        match self {
            ColorSpec::Name(name) => Ok(transform_color(name)?),
            ColorSpec::Components(components) => Ok(color_from_components(components)?),
            ColorSpec::Array(rows) => match rows.as_slice() {
                [row] => Ok(color_from_components(row)?),
                _ => Err(ValueError::ColorArrayLength {
                    expected: 1,
                    actual: rows.len(),
                }
                .into()),
            },
        }
    }

    /// Resolve a per-point array
    pub fn to_colors(&self) -> LayerResult<Vec<Color>> {
        match self {
            ColorSpec::Array(rows) => rows
                .iter()
                .map(|row| color_from_components(row).map_err(LayerError::from))
                .collect(),
            single => Ok(vec![single.to_color()?]),
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(name: &str) -> Self {
        ColorSpec::Name(name.to_string())
    }
}

impl From<String> for ColorSpec {
    fn from(name: String) -> Self {
        ColorSpec::Name(name)
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        ColorSpec::Components(color.to_array().to_vec())
    }
}

impl From<[f32; 4]> for ColorSpec {
    fn from(rgba: [f32; 4]) -> Self {
        ColorSpec::Components(rgba.to_vec())
    }
}

impl From<[f32; 3]> for ColorSpec {
    fn from(rgb: [f32; 3]) -> Self {
        ColorSpec::Components(rgb.to_vec())
    }
}

impl From<Vec<Color>> for ColorSpec {
    fn from(colors: Vec<Color>) -> Self {
        ColorSpec::Array(colors.iter().map(|c| c.to_array().to_vec()).collect())
    }
}

/// Convert a color name or hex string into a normalized RGBA color
pub fn transform_color(spec: &str) -> Result<Color, ValueError> {
    let trimmed = spec.trim();
    named_color(trimmed)
        .or_else(|| {
            trimmed
                .starts_with('#')
                .then(|| Color::from_hex(trimmed))
                .flatten()
        })
        .ok_or_else(|| ValueError::UnknownColor {
            spec: spec.to_string(),
        })
}

fn color_from_components(components: &[f32]) -> Result<Color, ValueError> {
    Color::from_components(components).ok_or(ValueError::ColorComponents {
        len: components.len(),
    })
}
