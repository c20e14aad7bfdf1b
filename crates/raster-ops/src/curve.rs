//! Two-point tone curves.
//!
//! A tone curve is defined by an *enter* point and an *exit* point. Inputs
//! at or below `enter.input` map to `enter.output`, inputs at or above
//! `exit.input` map to `exit.output`, and inputs in between follow the
//! straight line through both points:
//!
//! ```text
//! out
//! 255 |            exit o-------
//!     |               /
//!     |             /
//!     |-----o enter
//!   0 +------------------------ in
//!     0                      255
//! ```
//!
//! # Algorithm
//!
//! 1. **Validation**: [`CurvePoints`] only holds pairs with
//!    `enter.input < exit.input`, so the slope is always defined.
//! 2. **Pre-render**: the curve is evaluated once per intensity into a
//!    256-entry [`CurveLut`], rounding half to even and clamping to
//!    `[0, 255]` on store, the same as an 8-bit clamped store.
//! 3. **Apply**: R, G and B of every pixel go through the table. Alpha is
//!    copied unchanged.
//!
//! # Example
//!
//! ```rust
//! use raster_core::PixelBuffer;
//! use raster_ops::curve::{apply_curve, CurvePoint, CurvePoints};
//!
//! let points = CurvePoints::new(CurvePoint::new(50, 0), CurvePoint::new(200, 255)).unwrap();
//! let src = PixelBuffer::filled(1, 1, [30, 125, 220, 77]).unwrap();
//! let out = apply_curve(&src, &points).unwrap();
//! assert_eq!(out.pixel(0, 0), [0, 128, 255, 77]);
//! ```

use std::fmt;

use raster_core::{CHANNELS, PixelBuffer};
use tracing::debug;

use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};

/// One control point of a tone curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurvePoint {
    /// Input intensity.
    pub input: u8,
    /// Output intensity.
    pub output: u8,
}

impl CurvePoint {
    /// Creates a control point.
    pub const fn new(input: u8, output: u8) -> Self {
        Self { input, output }
    }
}

impl fmt::Display for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.input, self.output)
    }
}

/// Validated enter/exit pair with `enter.input < exit.input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurvePoints {
    enter: CurvePoint,
    exit: CurvePoint,
}

impl Default for CurvePoints {
    fn default() -> Self {
        Self::identity()
    }
}

impl CurvePoints {
    /// The identity curve `{0 -> 0, 255 -> 255}`.
    pub const fn identity() -> Self {
        Self {
            enter: CurvePoint::new(0, 0),
            exit: CurvePoint::new(255, 255),
        }
    }

    /// Creates a curve, rejecting pairs whose inputs are not strictly
    /// increasing.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] if `enter.input >= exit.input`.
    pub fn new(enter: CurvePoint, exit: CurvePoint) -> OpsResult<Self> {
        if enter.input >= exit.input {
            return Err(OpsError::InvalidParameter(format!(
                "curve enter input {} must be below exit input {}",
                enter.input, exit.input
            )));
        }
        Ok(Self { enter, exit })
    }

    /// Enter (low) control point.
    #[inline]
    pub const fn enter(&self) -> CurvePoint {
        self.enter
    }

    /// Exit (high) control point.
    #[inline]
    pub const fn exit(&self) -> CurvePoint {
        self.exit
    }

    /// Returns a copy with a new enter point, or an error if it would break
    /// the ordering.
    pub fn with_enter(&self, enter: CurvePoint) -> OpsResult<Self> {
        Self::new(enter, self.exit)
    }

    /// Returns a copy with a new exit point, or an error if it would break
    /// the ordering.
    pub fn with_exit(&self, exit: CurvePoint) -> OpsResult<Self> {
        Self::new(self.enter, exit)
    }

    /// Returns `true` for the identity mapping.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Slope `a` and intercept `b` of the middle segment (`out = a*in + b`).
    pub fn slope_intercept(&self) -> (f64, f64) {
        let (x1, y1) = (f64::from(self.enter.input), f64::from(self.enter.output));
        let (x2, y2) = (f64::from(self.exit.input), f64::from(self.exit.output));
        let a = (y2 - y1) / (x2 - x1);
        (a, y1 - a * x1)
    }

    /// Vertices of the curve as drawn in the editor chart, left to right.
    pub fn polyline(&self) -> [(u8, u8); 4] {
        [
            (0, self.enter.output),
            (self.enter.input, self.enter.output),
            (self.exit.input, self.exit.output),
            (255, self.exit.output),
        ]
    }

    /// Evaluates the curve for one intensity.
    pub fn eval(&self, v: u8) -> u8 {
        if v <= self.enter.input {
            return self.enter.output;
        }
        if v >= self.exit.input {
            return self.exit.output;
        }
        // Same line as `a*v + b`, arranged so the division is the last step
        // and exact midpoints (e.g. 127.5) survive for rounding.
        let rise = f64::from(self.exit.output) - f64::from(self.enter.output);
        let run = f64::from(self.exit.input) - f64::from(self.enter.input);
        let y = f64::from(self.enter.output) + f64::from(v - self.enter.input) * rise / run;
        store(y)
    }
}

impl fmt::Display for CurvePoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.enter, self.exit)
    }
}

/// Clamp-on-store into the 8-bit range. Exact halves round to even.
#[inline]
fn store(y: f64) -> u8 {
    y.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Pre-rendered 256-entry lookup table for a tone curve.
#[derive(Clone, PartialEq, Eq)]
pub struct CurveLut {
    table: [u8; 256],
}

impl CurveLut {
    /// Evaluates `points` for every intensity.
    pub fn new(points: &CurvePoints) -> Self {
        let mut table = [0u8; 256];
        for (v, out) in table.iter_mut().enumerate() {
            *out = points.eval(v as u8);
        }
        Self { table }
    }

    /// Mapped value of `v`.
    #[inline]
    pub fn map(&self, v: u8) -> u8 {
        self.table[v as usize]
    }

    /// Returns `true` if the table maps every value to itself.
    pub fn is_bypass(&self) -> bool {
        self.table.iter().enumerate().all(|(i, &v)| i == v as usize)
    }
}

impl fmt::Debug for CurveLut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveLut")
            .field("bypass", &self.is_bypass())
            .finish()
    }
}

/// Applies a tone curve to R, G and B of every pixel, returning a new
/// buffer. Alpha passes through.
pub fn apply_curve(buf: &PixelBuffer, points: &CurvePoints) -> OpsResult<PixelBuffer> {
    debug!(curve = %points, "apply tone curve");
    apply_lut(buf, &CurveLut::new(points))
}

/// Applies a pre-rendered table to R, G and B of every pixel.
pub fn apply_lut(buf: &PixelBuffer, lut: &CurveLut) -> OpsResult<PixelBuffer> {
    let stride = buf.stride();
    let mut dst = vec![0u8; buf.pixels().len()];

    for_each_row(&mut dst, stride, |y, row| {
        let src_row = buf.row(y as u32);
        for (out, px) in row
            .chunks_exact_mut(CHANNELS)
            .zip(src_row.chunks_exact(CHANNELS))
        {
            out[0] = lut.map(px[0]);
            out[1] = lut.map(px[1]);
            out[2] = lut.map(px[2]);
            out[3] = px[3];
        }
    });

    Ok(PixelBuffer::new(buf.width(), buf.height(), dst)?)
}
