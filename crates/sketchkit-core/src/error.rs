//! Error handling for SketchKit
//!
//! Provides error types for the layers of the editor:
//! - Shape errors (property edits, lookups)
//! - Render errors (surface creation, image encoding)
//!
//! Geometry itself never fails: degenerate shapes simply do not pick and
//! invalid scale factors are ignored. All error types use `thiserror`.

use thiserror::Error;

/// Shape error type
///
/// Raised when a property edit or a figure lookup cannot be applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// The shape kind does not expose this property
    #[error("Property '{property}' is not supported by {shape_type} shapes")]
    UnsupportedProperty {
        /// The shape type tag.
        shape_type: String,
        /// The requested property key.
        property: String,
    },

    /// The value cannot be applied to the property
    #[error("Invalid value {value} for '{property}': {reason}")]
    InvalidValue {
        /// The property key.
        property: String,
        /// The rejected value.
        value: f64,
        /// Why the value was rejected.
        reason: String,
    },

    /// No shape with this id exists in the figure
    #[error("Shape not found: {id}")]
    NotFound {
        /// The missing shape id.
        id: String,
    },

    /// No group with this id exists
    #[error("Group not found: {id}")]
    GroupNotFound {
        /// The missing group id.
        id: String,
    },
}

/// Render error type
///
/// Represents failures of a raster backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The backend refused the requested surface size
    #[error("Invalid surface size {width}x{height}")]
    InvalidSurfaceSize {
        /// The requested width in pixels.
        width: u32,
        /// The requested height in pixels.
        height: u32,
    },

    /// Encoding the rendered image failed
    #[error("Image encoding failed: {message}")]
    Encode {
        /// The encoder message.
        message: String,
    },
}

/// Main error type for SketchKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Shape error
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Render error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error was caused by a rejected property edit
    pub fn is_property_error(&self) -> bool {
        matches!(
            self,
            Error::Shape(ShapeError::UnsupportedProperty { .. })
                | Error::Shape(ShapeError::InvalidValue { .. })
        )
    }
}

/// Result type for SketchKit operations
pub type Result<T> = std::result::Result<T, Error>;
