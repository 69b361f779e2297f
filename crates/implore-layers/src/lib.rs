//! implore-layers - Layer model for n-dimensional scientific data
//!
//! This crate provides the data model behind implore's annotation layers: an
//! editable set of n-dimensional points with per-point properties, sizes and
//! colors, sliced for display along the non-displayed axes.
//!
//! # Key Components
//!
//! - **PointsLayer**: Point set with selection, drag, copy/paste and hit testing
//! - **PropertyTable**: Named categorical or continuous per-point annotations
//! - **ColorChannel**: Edge and face colors, set directly or mapped from properties
//! - **Dims**: Displayed axes and slicing position
//! - **SliceView**: The points of the current slice, ready to draw
//! - **LayerData**: Reader output, with image heuristics for RGB and pyramids
//!
//! # Color Modes
//!
//! Each color channel runs in one of three modes:
//!
//! - **Direct**: Colors are assigned explicitly
//! - **Cycle**: Categorical property values draw colors from a palette
//! - **Colormap**: Continuous property values are mapped through a colormap

pub mod color;
pub mod colormap;
pub mod config;
pub mod dims;
pub mod error;
pub mod export;
pub mod image;
pub mod points;
pub mod properties;
pub mod size;
pub mod slice;
pub mod types;

mod array;

pub use color::{
    default_color_cycle, named_color, transform_color, ColorChannel, ColorMode, ColorSpec,
    ColorTarget,
};
pub use colormap::{builtin_colormap_names, get_colormap, Color, Colormap};
pub use config::PointsConfig;
pub use dims::Dims;
pub use error::{LayerError, LayerResult, LayerWarning, TypeError, ValueError};
pub use export::SvgElement;
pub use image::{guess_pyramid, guess_pyramid_shapes, guess_rgb, ImageData};
pub use points::{
    Blending, Clipboard, InteractionBox, Mode, PointsLayer, Symbol, MAX_POINTS_THUMBNAIL,
    THUMBNAIL_SHAPE,
};
pub use properties::{PropertyColumn, PropertyKind, PropertyRow, PropertyTable, PropertyValue};
pub use size::{SizeModel, SizeSpec, DEFAULT_SIZE};
pub use slice::{project, SliceView};
pub use types::{LayerData, LayerType};
