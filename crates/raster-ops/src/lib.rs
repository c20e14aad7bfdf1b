//! # raster-ops
//!
//! Pixel-buffer operations for the raster editor.
//!
//! Every operation is a pure function: it borrows a [`PixelBuffer`] and
//! returns a new one, leaving the input untouched.
//!
//! # Modules
//!
//! - [`resize`] - Nearest-neighbor resampling
//! - [`curve`] - Two-point tone curves
//! - [`filter`] - Convolution filters
//! - [`histogram`] - Per-channel intensity histograms
//!
//! # Common Operations
//!
//! ## Resize
//!
//! ```rust,ignore
//! use raster_ops::resize::resize;
//!
//! let smaller = resize(&image, 320, 200)?;
//! ```
//!
//! ## Tone curve
//!
//! ```rust,ignore
//! use raster_ops::curve::{apply_curve, CurvePoint, CurvePoints};
//!
//! let points = CurvePoints::new(CurvePoint::new(0, 0), CurvePoint::new(128, 255))?;
//! let brighter = apply_curve(&image, &points)?;
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - Process rows on the rayon thread pool.
//!
//! [`PixelBuffer`]: raster_core::PixelBuffer

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod parallel;
pub mod curve;
pub mod filter;
pub mod histogram;
pub mod resize;

pub use curve::{apply_curve, CurvePoint, CurvePoints};
pub use error::{OpsError, OpsResult};
pub use filter::{apply_filter, Kernel};
pub use histogram::Histogram;
pub use resize::resize;
