//! Immutable RGBA8 pixel buffer.
//!
//! [`PixelBuffer`] is the data model shared by every component: decoders
//! produce it, editing operations consume one and return a fresh one, and
//! the viewer samples it.
//!
//! # Memory Layout
//!
//! Row-major, top-left origin, four bytes per pixel in R, G, B, A order.
//! The invariant `pixels.len() == width * height * 4` is checked on
//! construction and holds for the lifetime of the buffer.
//!
//! # Memory Management
//!
//! Pixel bytes live behind an [`Arc`], so cloning a buffer (for example to
//! push it on an undo stack) shares the allocation instead of copying it.
//!
//! ```rust
//! use raster_core::PixelBuffer;
//!
//! let buf = PixelBuffer::from_fn(4, 2, |x, y| [x as u8, y as u8, 0, 255]).unwrap();
//! let copy = buf.clone();
//! assert_eq!(copy.pixel(3, 1), [3, 1, 0, 255]);
//! assert_eq!(buf.pixels().len(), 4 * 2 * 4);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::pixel::{CHANNELS, Rgba};
use crate::{Error, Result};

/// Owned, immutable RGBA8 image.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Pixel data (Arc for cheap cloning)
    data: Arc<Vec<u8>>,
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
}

impl PixelBuffer {
    /// Creates a buffer from existing RGBA bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if either dimension is zero or the
    ///   byte count overflows.
    /// - [`Error::LengthMismatch`] if `pixels.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height)?;
        if pixels.len() != expected {
            return Err(Error::LengthMismatch {
                width,
                height,
                expected,
                got: pixels.len(),
            });
        }
        Ok(Self {
            data: Arc::new(pixels),
            width,
            height,
        })
    }

    /// Creates a buffer with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: Rgba) -> Result<Self> {
        let len = byte_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / CHANNELS {
            data.extend_from_slice(&rgba);
        }
        Self::new(width, height, data)
    }

    /// Creates a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Rgba,
    {
        let len = byte_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self::new(width, height, data)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved RGBA bytes.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    /// Bytes of a single row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Iterates over pixels in row-major order.
    pub fn iter_pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(CHANNELS)
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image. Use
    /// [`get_pixel`](Self::get_pixel) or [`pixel_clamped`](Self::pixel_clamped)
    /// for untrusted coordinates.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.read(x as usize, y as usize)
    }

    /// Pixel at `(x, y)`, or [`Error::OutOfBounds`].
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<Rgba> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok(self.read(x as usize, y as usize))
    }

    /// Pixel at `(x, y)` with coordinates clamped to the image edge.
    pub fn pixel_clamped(&self, x: i64, y: i64) -> Rgba {
        let (cx, cy) = self.clamp_coords(x, y);
        self.read(cx as usize, cy as usize)
    }

    /// Clamps signed coordinates into `[0, width-1] x [0, height-1]`.
    #[inline]
    pub fn clamp_coords(&self, x: i64, y: i64) -> (u32, u32) {
        let cx = x.clamp(0, i64::from(self.width) - 1);
        let cy = y.clamp(0, i64::from(self.height) - 1);
        (cx as u32, cy as u32)
    }

    /// Consumes the buffer and returns its bytes, copying only if shared.
    pub fn into_pixels(self) -> Vec<u8> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone())
    }

    #[inline]
    fn read(&self, x: usize, y: usize) -> Rgba {
        let i = (y * self.width as usize + x) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Byte length for an RGBA image, rejecting empty or overflowing sizes.
fn byte_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "byte count overflows"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_checks_length() {
        assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { expected: 16, got: 15, .. }));
    }

    #[test]
    fn zero_area_rejected() {
        assert!(matches!(
            PixelBuffer::new(0, 4, Vec::new()),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(PixelBuffer::filled(3, 0, [0, 0, 0, 0]).is_err());
    }

    #[test]
    fn filled_and_access() {
        let buf = PixelBuffer::filled(3, 2, [1, 2, 3, 4]).unwrap();
        assert_eq!(buf.dimensions(), (3, 2));
        assert_eq!(buf.pixel_count(), 6);
        assert_eq!(buf.pixel(2, 1), [1, 2, 3, 4]);
        assert_eq!(buf.row(1).len(), 12);
        assert_eq!(buf.iter_pixels().count(), 6);
    }

    #[test]
    fn from_fn_is_row_major() {
        let buf = PixelBuffer::from_fn(3, 2, |x, y| [x as u8, y as u8, 0, 255]).unwrap();
        assert_eq!(&buf.pixels()[..8], &[0, 0, 0, 255, 1, 0, 0, 255]);
        assert_eq!(buf.pixel(0, 1), [0, 1, 0, 255]);
    }

    #[test]
    fn get_pixel_out_of_bounds() {
        let buf = PixelBuffer::filled(2, 2, [0; 4]).unwrap();
        let err = buf.get_pixel(2, 0).unwrap_err();
        assert!(err.is_bounds_error());
    }

    #[test]
    fn clamped_access() {
        let buf = PixelBuffer::from_fn(4, 3, |x, y| [x as u8, y as u8, 0, 255]).unwrap();
        assert_eq!(buf.clamp_coords(-5, 99), (0, 2));
        assert_eq!(buf.pixel_clamped(10, -1), [3, 0, 0, 255]);
    }

    #[test]
    fn clones_share_storage() {
        let buf = PixelBuffer::filled(8, 8, [9; 4]).unwrap();
        let copy = buf.clone();
        assert_eq!(buf, copy);
        assert_eq!(buf.pixels().as_ptr(), copy.pixels().as_ptr());
        drop(copy);
        assert_eq!(buf.into_pixels().len(), 256);
    }
}
