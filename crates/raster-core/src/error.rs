//! Error types for raster-core operations.
//!
//! Buffer construction is the only fallible step in this crate: a
//! [`PixelBuffer`](crate::PixelBuffer) must hold exactly
//! `width * height * 4` bytes and cover a non-empty area.
//!
//! # Usage
//!
//! ```rust
//! use raster_core::{Error, PixelBuffer};
//!
//! let err = PixelBuffer::new(2, 2, vec![0; 3]).unwrap_err();
//! assert!(matches!(err, Error::LengthMismatch { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or addressing pixel buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, or the byte count would
    /// overflow `usize`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Pixel data length does not match `width * height * 4`.
    #[error("pixel data length {got} does not match {width}x{height} RGBA ({expected} bytes)")]
    LengthMismatch {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}
