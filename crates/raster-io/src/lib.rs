//! # raster-io
//!
//! Decode/encode adapter between files and [`PixelBuffer`]s.
//!
//! The editing engine never touches files; this crate is the collaborator
//! that turns PNG bytes into RGBA8 buffers and back.
//!
//! - [`read`] / [`write`] - Path-based helpers, dispatched on extension
//! - [`png`] - PNG codec
//! - [`decode_async`] - One-shot background decode
//!
//! ```rust,ignore
//! let image = raster_io::read("photo.png")?;
//! raster_io::write("edited-image.png", &image)?;
//! ```

#![warn(missing_docs)]

mod decode;
mod error;
pub mod png;

use std::path::Path;

use raster_core::PixelBuffer;

pub use decode::{decode_async, DecodeHandle};
pub use error::{IoError, IoResult};

/// File name used when exporting without an explicit path.
pub const DEFAULT_EXPORT_NAME: &str = "edited-image.png";

/// Reads an image file.
///
/// # Errors
///
/// [`IoError::UnsupportedFormat`] for extensions other than `.png`.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    ensure_png(path)?;
    png::read(path)
}

/// Writes an image file.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    ensure_png(path)?;
    png::write(path, image)
}

fn ensure_png(path: &Path) -> IoResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => Ok(()),
        other => Err(IoError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}
