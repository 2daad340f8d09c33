//! Error types for lumen-core operations.
//!
//! Two families of failure exist in the output chain:
//!
//! - **Configuration errors** are raised while building a topology, a palette,
//!   a filter or a stack. They are fatal and deterministic: the same arguments
//!   always fail the same way.
//! - **Context mismatches** are raised at use time, when a buffer bound to one
//!   [`Context`](crate::Context) is handed to a component bound to another.
//!
//! Clamping of live [`Vixel`](crate::Vixel) values is a silent normalization
//! and never produces an error.
//!
//! # Usage
//!
//! ```rust
//! use lumen_core::{Error, Grid};
//!
//! let err = Grid::new(0, 4).unwrap_err();
//! assert!(err.is_configuration_error());
//! assert!(matches!(err, Error::InvalidGrid { rows: 0, columns: 4 }));
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or driving the output chain.
///
/// # Categories
///
/// - **Topology**: [`InvalidDimensions`](Error::InvalidDimensions),
///   [`InvalidGrid`](Error::InvalidGrid), [`EmptyContext`](Error::EmptyContext),
///   [`InfeasibleScatter`](Error::InfeasibleScatter)
/// - **Palettes and filters**: [`InvalidSteps`](Error::InvalidSteps),
///   [`AmbiguousRange`](Error::AmbiguousRange), [`EmptyPalette`](Error::EmptyPalette),
///   [`EmptyPaletteCollection`](Error::EmptyPaletteCollection)
/// - **Stacks**: [`InvalidLayerCount`](Error::InvalidLayerCount)
/// - **Use time**: [`ContextMismatch`](Error::ContextMismatch)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Context width and height are negative, not finite, or both zero.
    #[error("invalid context size {width}x{height}: a context needs a size in at least one dimension")]
    InvalidDimensions {
        /// Requested width
        width: f32,
        /// Requested height
        height: f32,
    },

    /// A grid needs at least one row and one column.
    #[error("invalid grid {rows}x{columns}: rows and columns must be > 0")]
    InvalidGrid {
        /// Requested row count
        rows: usize,
        /// Requested column count
        columns: usize,
    },

    /// A context must hold at least one point.
    #[error("a context needs at least one point")]
    EmptyContext,

    /// The requested minimum point distance cannot be satisfied in the area.
    #[error("cannot scatter {point_count} points {distance} apart in an area of {area}")]
    InfeasibleScatter {
        /// Number of points requested
        point_count: usize,
        /// Requested minimum distance
        distance: f32,
        /// Available area (width * height)
        area: f32,
    },

    /// A palette or filter step count is below its minimum.
    #[error("invalid step count {steps}: at least {min} steps are required")]
    InvalidSteps {
        /// Requested step count
        steps: usize,
        /// Minimum accepted step count
        min: usize,
    },

    /// An exclusive range with a fractional upper bound has no last value.
    #[error("ambiguous exclusive range {from}..{to}: the upper bound must be integral")]
    AmbiguousRange {
        /// Range start
        from: f32,
        /// Range end (exclusive)
        to: f32,
    },

    /// A palette needs at least one control color.
    #[error("a palette needs at least one color")]
    EmptyPalette,

    /// A palette collection needs at least one palette.
    #[error("a palette collection needs at least one palette")]
    EmptyPaletteCollection,

    /// A stack needs at least one layer.
    #[error("invalid layer count {0}: a stack needs at least one layer")]
    InvalidLayerCount(usize),

    /// Two components that must share a context do not.
    #[error("the context of the given object does not match")]
    ContextMismatch,
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: f32, height: f32) -> Self {
        Self::InvalidDimensions { width, height }
    }

    /// Creates an [`Error::InvalidSteps`] error.
    #[inline]
    pub fn invalid_steps(steps: usize, min: usize) -> Self {
        Self::InvalidSteps { steps, min }
    }

    /// Returns `true` for construction-time errors.
    #[inline]
    pub fn is_configuration_error(&self) -> bool {
        !self.is_context_mismatch()
    }

    /// Returns `true` if this is a use-time context mismatch.
    #[inline]
    pub fn is_context_mismatch(&self) -> bool {
        matches!(self, Self::ContextMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(-1.0, 2.0);
        let msg = err.to_string();
        assert!(msg.contains("-1x2"));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_invalid_steps() {
        let err = Error::invalid_steps(1, 2);
        assert!(err.to_string().contains("at least 2"));
        assert!(!err.is_context_mismatch());
    }

    #[test]
    fn test_context_mismatch() {
        let err = Error::ContextMismatch;
        assert!(err.is_context_mismatch());
        assert!(!err.is_configuration_error());
    }
}
