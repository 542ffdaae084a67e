//! Error handling for GridPlan
//!
//! Provides the geometry errors shared by every layer of the workspace:
//! invalid sizes, empty rectangles and out-of-range values.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a grid value violates the invariants of the grid model,
/// e.g. a footprint with a zero or negative extent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Width or height is not strictly positive
    #[error("Invalid size {width}x{height}: both extents must be > 0")]
    InvalidSize {
        /// The offending width.
        width: i32,
        /// The offending height.
        height: i32,
    },

    /// Rectangle has no area
    #[error("Invalid rectangle at ({x}, {y}) with extent {width}x{height}")]
    InvalidRect {
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
        /// Width.
        width: i32,
        /// Height.
        height: i32,
    },

    /// A real-valued attribute is negative or not finite
    #[error("Invalid value for {name}: {value}")]
    InvalidValue {
        /// The attribute name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}
