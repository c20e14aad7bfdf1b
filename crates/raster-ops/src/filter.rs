//! Convolution filters.
//!
//! Filters follow the same contract as tone curves: they read a buffer and
//! return a new one. R, G and B are convolved in `f32`, rounded and clamped
//! to `[0, 255]` on store; alpha is copied unchanged. Samples outside the
//! image repeat the nearest edge pixel.
//!
//! # Kernels
//!
//! - [`Kernel::box_blur`] - Simple average blur
//! - [`Kernel::gaussian`] - Gaussian blur (smooth)
//! - [`Kernel::sharpen`] - Laplacian sharpening
//! - [`Kernel::edge_detect`] - Laplacian edges
//!
//! # Example
//!
//! ```rust
//! use raster_core::PixelBuffer;
//! use raster_ops::filter::{apply_filter, Kernel};
//!
//! let src = PixelBuffer::filled(8, 8, [90, 90, 90, 255]).unwrap();
//! let blurred = apply_filter(&src, &Kernel::gaussian(5, 1.5)).unwrap();
//! assert_eq!(blurred.pixel(4, 4), [90, 90, 90, 255]);
//! ```

use raster_core::{CHANNELS, PixelBuffer};
use tracing::{debug, trace};

use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};

/// 4-neighbour Laplacian, positive center. Sums to zero, so flat regions
/// map to black.
const LAPLACIAN: [f32; 9] = [
    0.0, -1.0, 0.0, //
    -1.0, 4.0, -1.0, //
    0.0, -1.0, 0.0,
];

/// Square or rectangular weight grid centered on the output pixel.
///
/// Both sides are odd so the kernel has a center tap. Weights are applied
/// as-is: a kernel that should preserve brightness must sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Weights, row-major, `width * height` entries.
    pub data: Vec<f32>,
    /// Columns (odd).
    pub width: usize,
    /// Rows (odd).
    pub height: usize,
}

impl Kernel {
    /// Wraps a `width x height` grid of row-major weights.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] when a side is even (no center tap)
    /// or `weights` holds a different number of entries.
    pub fn from_weights(width: usize, height: usize, weights: Vec<f32>) -> OpsResult<Self> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(OpsError::InvalidParameter(format!(
                "kernel {width}x{height} has no center tap"
            )));
        }
        let expected = width * height;
        if weights.len() != expected {
            return Err(OpsError::InvalidParameter(format!(
                "kernel {width}x{height} needs {expected} weights, got {}",
                weights.len()
            )));
        }
        Ok(Self {
            data: weights,
            width,
            height,
        })
    }

    /// Creates a box blur kernel (simple average). Even sizes are rounded up.
    ///
    /// ```rust
    /// use raster_ops::filter::Kernel;
    ///
    /// let k = Kernel::box_blur(4);
    /// assert_eq!((k.width, k.height), (5, 5));
    /// ```
    pub fn box_blur(size: usize) -> Self {
        let size = odd(size);
        let count = size * size;
        Self {
            data: vec![1.0 / count as f32; count],
            width: size,
            height: size,
        }
    }

    /// Creates a normalized Gaussian kernel.
    ///
    /// * `size` - Kernel size (made odd)
    /// * `sigma` - Standard deviation
    pub fn gaussian(size: usize, sigma: f32) -> Self {
        let size = odd(size);
        let half = (size / 2) as i32;
        let sigma2 = 2.0 * sigma.max(f32::EPSILON) * sigma.max(f32::EPSILON);

        let mut data = Vec::with_capacity(size * size);
        let mut sum = 0.0f32;
        for y in -half..=half {
            for x in -half..=half {
                let w = (-((x * x + y * y) as f32) / sigma2).exp();
                data.push(w);
                sum += w;
            }
        }
        for w in &mut data {
            *w /= sum;
        }

        Self { data, width: size, height: size }
    }

    /// Unsharp-style 3x3 kernel: identity plus `amount` times the
    /// Laplacian. Weights sum to one for any `amount`; `0.0` is the
    /// identity.
    pub fn sharpen(amount: f32) -> Self {
        let mut data = LAPLACIAN.map(|w| w * amount).to_vec();
        data[4] += 1.0;
        Self {
            data,
            width: 3,
            height: 3,
        }
    }

    /// 3x3 Laplacian: zero on flat areas, bright along edges.
    pub fn edge_detect() -> Self {
        Self {
            data: LAPLACIAN.to_vec(),
            width: 3,
            height: 3,
        }
    }

    /// Returns the kernel radius (half-size) as `(rx, ry)`.
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }
}

#[inline]
fn odd(size: usize) -> usize {
    if size % 2 == 0 { size + 1 } else { size }
}

/// Convolves R, G and B of `buf` with `kernel`, returning a new buffer.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if the kernel data does not match its
/// declared dimensions (possible when fields were edited directly).
pub fn apply_filter(buf: &PixelBuffer, kernel: &Kernel) -> OpsResult<PixelBuffer> {
    if kernel.data.len() != kernel.width * kernel.height
        || kernel.width % 2 == 0
        || kernel.height % 2 == 0
    {
        return Err(OpsError::InvalidParameter(format!(
            "malformed {}x{} kernel with {} weights",
            kernel.width,
            kernel.height,
            kernel.data.len()
        )));
    }

    let (width, height) = buf.dimensions();
    debug!(width, height, kernel_w = kernel.width, kernel_h = kernel.height, "apply filter");

    let (rx, ry) = kernel.radius();
    let stride = buf.stride();
    let mut dst = vec![0u8; buf.pixels().len()];

    for_each_row(&mut dst, stride, |y, row| {
        for x in 0..width as usize {
            let mut sums = [0.0f32; 3];
            for ky in 0..kernel.height {
                let sy = y as i64 + ky as i64 - ry as i64;
                for kx in 0..kernel.width {
                    let sx = x as i64 + kx as i64 - rx as i64;
                    let px = buf.pixel_clamped(sx, sy);
                    let kw = kernel.data[ky * kernel.width + kx];
                    sums[0] += f32::from(px[0]) * kw;
                    sums[1] += f32::from(px[1]) * kw;
                    sums[2] += f32::from(px[2]) * kw;
                }
            }

            let i = x * CHANNELS;
            row[i] = store(sums[0]);
            row[i + 1] = store(sums[1]);
            row[i + 2] = store(sums[2]);
            row[i + 3] = buf.row(y as u32)[i + 3];
        }
    });

    trace!("filter done");
    Ok(PixelBuffer::new(width, height, dst)?)
}

#[inline]
fn store(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_validation() {
        assert!(Kernel::from_weights(3, 3, vec![1.0; 9]).is_ok());
        assert!(Kernel::from_weights(1, 5, vec![0.2; 5]).is_ok());
        assert!(Kernel::from_weights(2, 2, vec![1.0; 4]).is_err());
        assert!(Kernel::from_weights(3, 3, vec![1.0; 8]).is_err());
    }

    #[test]
    fn test_gaussian_normalized() {
        let k = Kernel::gaussian(5, 1.0);
        let sum: f32 = k.data.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert_eq!(k.radius(), (2, 2));
    }

    #[test]
    fn test_blur_constant_image() {
        let src = PixelBuffer::filled(6, 4, [200, 100, 50, 10]).unwrap();
        let out = apply_filter(&src, &Kernel::box_blur(3)).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_edge_detect_flat_is_black() {
        let src = PixelBuffer::filled(5, 5, [77, 77, 77, 128]).unwrap();
        let out = apply_filter(&src, &Kernel::edge_detect()).unwrap();
        assert!(out.iter_pixels().all(|p| p == [0, 0, 0, 128]));
    }

    #[test]
    fn test_box_blur_spreads_impulse() {
        let src = PixelBuffer::from_fn(3, 3, |x, y| {
            if (x, y) == (1, 1) { [90, 0, 0, 255] } else { [0, 0, 0, 255] }
        })
        .unwrap();
        let out = apply_filter(&src, &Kernel::box_blur(3)).unwrap();
        assert_eq!(out.pixel(1, 1)[0], 10);
        assert_eq!(out.pixel(0, 0)[0], 10);
    }

    #[test]
    fn test_sharpen_clamps() {
        let src = PixelBuffer::from_fn(3, 1, |x, _| {
            if x == 1 { [250, 5, 0, 255] } else { [0, 250, 0, 255] }
        })
        .unwrap();
        let out = apply_filter(&src, &Kernel::sharpen(1.0)).unwrap();
        assert_eq!(out.pixel(1, 0)[0], 255);
        assert_eq!(out.pixel(1, 0)[1], 0);
    }

    #[test]
    fn test_sharpen_preserves_brightness() {
        for amount in [0.0, 0.5, 1.0, 3.0] {
            let k = Kernel::sharpen(amount);
            let sum: f32 = k.data.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "amount {amount}: sum {sum}");
        }
        assert_eq!(Kernel::sharpen(1.0).data[4], 5.0);

        let src = PixelBuffer::from_fn(4, 4, |x, y| [(x * 60) as u8, (y * 60) as u8, 7, 200]).unwrap();
        assert_eq!(apply_filter(&src, &Kernel::sharpen(0.0)).unwrap(), src);
    }

    #[test]
    fn test_malformed_kernel_rejected() {
        let src = PixelBuffer::filled(2, 2, [0; 4]).unwrap();
        let k = Kernel { data: vec![1.0; 3], width: 3, height: 3 };
        assert!(matches!(apply_filter(&src, &k), Err(OpsError::InvalidParameter(_))));
    }
}
