//! Nearest-neighbor resampling.
//!
//! Each destination pixel copies the source pixel it falls on. There is no
//! blending, so intensities are preserved and hard edges stay hard.
//!
//! # Mapping
//!
//! ```text
//! sx = floor(dx * src_w / dst_w)    clamped to [0, src_w - 1]
//! sy = floor(dy * src_h / dst_h)    clamped to [0, src_h - 1]
//! ```
//!
//! The products are computed in `u64`, so the mapping is exact for any
//! `u32` dimensions.
//!
//! # Example
//!
//! ```rust
//! use raster_core::PixelBuffer;
//! use raster_ops::resize::resize;
//!
//! let src = PixelBuffer::filled(10, 10, [128, 128, 128, 255]).unwrap();
//! let dst = resize(&src, 5, 3).unwrap();
//! assert_eq!(dst.dimensions(), (5, 3));
//! assert_eq!(dst.pixel(4, 2), [128, 128, 128, 255]);
//! ```

use raster_core::{CHANNELS, PixelBuffer};
use tracing::debug;

use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};

/// Resizes `src` to `dst_w x dst_h` with nearest-neighbor sampling.
///
/// Width and height are independent; the aspect ratio is not preserved
/// unless the caller asks for it (see [`fit_dimensions`]).
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] if either target dimension is zero.
pub fn resize(src: &PixelBuffer, dst_w: u32, dst_h: u32) -> OpsResult<PixelBuffer> {
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "destination size must be > 0, got {dst_w}x{dst_h}"
        )));
    }

    let (src_w, src_h) = src.dimensions();
    debug!(src_w, src_h, dst_w, dst_h, "nearest-neighbor resize");

    // Source column for every destination column, shared by all rows.
    let columns: Vec<usize> = (0..dst_w)
        .map(|dx| source_index(dx, src_w, dst_w) as usize * CHANNELS)
        .collect();

    let stride = dst_w as usize * CHANNELS;
    let mut dst = vec![0u8; stride * dst_h as usize];

    for_each_row(&mut dst, stride, |dy, row| {
        let sy = source_index(dy as u32, src_h, dst_h);
        let src_row = src.row(sy);
        for (out, &sx) in row.chunks_exact_mut(CHANNELS).zip(&columns) {
            out.copy_from_slice(&src_row[sx..sx + CHANNELS]);
        }
    });

    Ok(PixelBuffer::new(dst_w, dst_h, dst)?)
}

/// Maps destination index `d` on an axis of length `dst_len` to the source
/// axis of length `src_len`.
#[inline]
pub fn source_index(d: u32, src_len: u32, dst_len: u32) -> u32 {
    let s = u64::from(d) * u64::from(src_len) / u64::from(dst_len);
    s.min(u64::from(src_len) - 1) as u32
}

/// Calculates the aspect-preserving dimensions that fit inside a box.
///
/// # Example
///
/// ```rust
/// use raster_ops::resize::fit_dimensions;
///
/// // Fit 1920x1080 into 640x480 box
/// assert_eq!(fit_dimensions(1920, 1080, 640, 480), (640, 360));
/// ```
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let scale_w = f64::from(max_w) / f64::from(src_w.max(1));
    let scale_h = f64::from(max_h) / f64::from(src_h.max(1));
    let scale = scale_w.min(scale_h);

    let new_w = ((f64::from(src_w) * scale).round() as u32).max(1);
    let new_h = ((f64::from(src_h) * scale).round() as u32).max(1);

    (new_w, new_h)
}
