//! Error types for implore-layers
//!
//! Provides error handling for:
//! - Value errors: malformed or mismatched input (shapes, lengths, names)
//! - Type errors: operations that are invalid for the data they act on
//! - Export failures
//!
//! Non-fatal conditions are reported as [`LayerWarning`]s, which are returned
//! alongside a successful result and logged at `warn` level.

use std::fmt;

use thiserror::Error;

use crate::color::ColorTarget;

/// Main error type for layer operations
#[derive(Error, Debug)]
pub enum LayerError {
    /// Malformed or mismatched input
    #[error("Invalid value: {0}")]
    Value(#[from] ValueError),

    /// Operation invalid for the type of the data
    #[error("Invalid type: {0}")]
    Type(#[from] TypeError),

    /// Array shape errors from ndarray
    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// SVG serialization errors
    #[error("SVG export failed: {message}")]
    Xml { message: String },
}

impl LayerError {
    /// Whether this error reports malformed or mismatched input
    pub fn is_value_error(&self) -> bool {
        matches!(self, LayerError::Value(_))
    }

    /// Whether this error reports an operation invalid for the data type
    pub fn is_type_error(&self) -> bool {
        matches!(self, LayerError::Type(_))
    }
}

/// Errors raised for malformed or mismatched input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    /// Point data must have at least two dimensions
    #[error("Points data must have at least 2 dimensions, got {ndim}")]
    DataDims { ndim: usize },

    /// Coordinates with the wrong number of dimensions
    #[error("Expected coordinates with {expected} dimensions, got {actual}")]
    CoordinateDims { expected: usize, actual: usize },

    /// Property column length does not match the number of points
    #[error("Property '{name}' has {actual} values, expected {expected}")]
    PropertyLength {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Same property name given twice
    #[error("Property '{name}' given more than once")]
    DuplicateProperty { name: String },

    /// Property values mixing strings and numbers
    #[error("Property '{name}' mixes categorical and continuous values")]
    MixedPropertyTypes { name: String },

    /// Property name not in the table
    #[error("Property '{name}' not found")]
    UnknownProperty { name: String },

    /// Property value of the wrong kind for its column
    #[error("Property '{name}' expects {expected} values")]
    PropertyValueType { name: String, expected: String },

    /// Size array that can't be broadcast to the points
    #[error(
        "Size array of shape {shape:?} can't be broadcast to {points} points with {ndim} dimensions"
    )]
    SizeShape {
        shape: Vec<usize>,
        points: usize,
        ndim: usize,
    },

    /// Per-point color array with the wrong number of rows
    #[error("Color array has {actual} rows, expected {expected}")]
    ColorArrayLength { expected: usize, actual: usize },

    /// Color given with the wrong number of components
    #[error("Color must have 3 or 4 components, got {len}")]
    ColorComponents { len: usize },

    /// Color name that is neither a known color nor a property
    #[error("'{spec}' is not a recognized color or property name")]
    UnknownColor { spec: String },

    /// Empty color cycle
    #[error("Color cycle must contain at least one color")]
    EmptyColorCycle,

    /// Unknown colormap name
    #[error("Unknown colormap: {name}")]
    UnknownColormap { name: String },

    /// Contrast limits with low above high
    #[error("Invalid contrast limits ({low}, {high})")]
    ContrastLimits { low: f64, high: f64 },

    /// Color mode that needs properties on a layer without any
    #[error("{mode} color mode requires properties, but the layer has none")]
    NoProperties { mode: String },

    /// Unknown interaction mode
    #[error("Unknown mode: {mode}")]
    UnknownMode { mode: String },

    /// Unknown color mode
    #[error("Unknown color mode: {mode}")]
    UnknownColorMode { mode: String },

    /// Unknown symbol
    #[error("Unknown symbol: {symbol}")]
    UnknownSymbol { symbol: String },

    /// Unknown blending mode
    #[error("Unknown blending: {blending}")]
    UnknownBlending { blending: String },

    /// Unknown layer type
    #[error("Unknown layer type: {layer_type}")]
    UnknownLayerType { layer_type: String },

    /// Layer data describing a different layer type
    #[error("Expected {expected} layer data, got {actual}")]
    WrongLayerType { expected: String, actual: String },

    /// Selected index outside the point set
    #[error("Index {index} out of range for {len} points")]
    SelectionOutOfRange { index: usize, len: usize },

    /// Axis outside the layer dimensions
    #[error("Axis {axis} out of range for {ndim} dimensions")]
    AxisOutOfRange { axis: usize, ndim: usize },

    /// Axis order that is not a permutation
    #[error("Invalid axis order {order:?} for {ndim} dimensions")]
    AxisOrder { order: Vec<usize>, ndim: usize },

    /// Number of displayed dimensions other than 2 or 3
    #[error("Number of displayed dimensions must be 2 or 3, got {ndisplay}")]
    NDisplay { ndisplay: usize },

    /// Opacity outside [0, 1]
    #[error("Opacity must be between 0 and 1, got {value}")]
    Opacity { value: f64 },

    /// Configuration that failed to deserialize
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Errors raised when an operation doesn't apply to the data type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    /// Colormaps only map continuous properties
    #[error("Colormap mode requires a continuous property, but '{property}' is categorical")]
    CategoricalColormap { property: String },
}

/// Result type alias for layer operations
pub type LayerResult<T> = Result<T, LayerError>;

/// Non-fatal conditions reported by layer operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerWarning {
    /// The property driving a color channel disappeared from the table
    ColorPropertyDropped { target: ColorTarget, property: String },

    /// No property was set for a color channel, so the first one was used
    ColorPropertyAutoSelected { target: ColorTarget, property: String },
}

impl LayerWarning {
    /// Log the warning through `tracing`
    pub(crate) fn emit(self) -> Self {
        tracing::warn!("{}", self);
        self
    }
}

impl fmt::Display for LayerWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerWarning::ColorPropertyDropped { target, property } => write!(
                f,
                "property '{}' used for {} color dropped, {} color mode switched to direct",
                property, target, target
            ),
            LayerWarning::ColorPropertyAutoSelected { target, property } => write!(
                f,
                "{} color property was not set, using '{}'",
                target, property
            ),
        }
    }
}
