//! # raster-core
//!
//! Core types for the raster editing engine.
//!
//! This crate provides the foundational types used throughout the workspace:
//!
//! - [`PixelBuffer`] - Immutable RGBA8 image buffer
//! - [`Channel`] - Channel selector for the interleaved RGBA layout
//! - [`Error`] - Buffer construction and access errors
//!
//! ## Design Philosophy
//!
//! A [`PixelBuffer`] never changes after construction. Every editing
//! operation in `raster-ops` reads one buffer and allocates a new one, so a
//! previous state stays valid for undo and for derived views (histogram,
//! preview) while an edit is being prepared:
//!
//! ```
//! use raster_core::PixelBuffer;
//!
//! let gray = PixelBuffer::filled(10, 10, [128, 128, 128, 255]).unwrap();
//! assert_eq!(gray.pixel(9, 9), [128, 128, 128, 255]);
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! raster-core (this crate)
//!    ^
//!    +-- raster-ops  (resize, curves, filters, histogram)
//!    +-- raster-io   (PNG decode/encode)
//!    +-- raster-view (viewport, sampling, editor session)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod pixel;

pub use buffer::PixelBuffer;
pub use error::{Error, Result};
pub use pixel::{Channel, CHANNELS, Rgba};

/// Prelude module for convenient imports.
///
/// ```
/// use raster_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::error::{Error, Result};
    pub use crate::pixel::{Channel, CHANNELS, Rgba};
}
