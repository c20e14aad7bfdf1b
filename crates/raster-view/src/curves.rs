//! Tone-curve editing session.
//!
//! Holds the control points while the curves dialog is open, a histogram of
//! the image being edited and, when preview is on, the curve applied to that
//! image. Nothing here replaces the session's image; that happens on commit.

use raster_core::PixelBuffer;
use raster_ops::curve::{CurveLut, apply_lut};
use raster_ops::histogram::{DEFAULT_CHART_HEIGHT, HistogramBars};
use raster_ops::{CurvePoint, CurvePoints, Histogram, OpsResult};
use tracing::debug;

use crate::messages::{CurveField, CurveHandle};

/// Open curves dialog state.
#[derive(Debug, Clone)]
pub struct CurveSession {
    points: CurvePoints,
    preview_enabled: bool,
    preview: Option<PixelBuffer>,
    histogram: Histogram,
    bars: HistogramBars,
}

impl CurveSession {
    /// Opens a session for `image` with identity points.
    pub fn open(image: &PixelBuffer) -> Self {
        let histogram = Histogram::build(image);
        let bars = histogram.bar_heights(DEFAULT_CHART_HEIGHT);
        Self {
            points: CurvePoints::identity(),
            preview_enabled: false,
            preview: None,
            histogram,
            bars,
        }
    }

    /// Current control points.
    #[inline]
    pub fn points(&self) -> CurvePoints {
        self.points
    }

    /// Histogram of the image the dialog was opened on.
    #[inline]
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Bar heights for a chart of [`DEFAULT_CHART_HEIGHT`].
    #[inline]
    pub fn bars(&self) -> &HistogramBars {
        &self.bars
    }

    /// Whether live preview is enabled.
    #[inline]
    pub fn preview_enabled(&self) -> bool {
        self.preview_enabled
    }

    /// Preview buffer, present only while preview is enabled.
    #[inline]
    pub fn preview(&self) -> Option<&PixelBuffer> {
        self.preview.as_ref()
    }

    /// Edits one coordinate of one control point.
    ///
    /// Returns `Ok(false)` and keeps the previous points when the edit would
    /// put the enter input at or above the exit input.
    pub fn edit(
        &mut self,
        image: &PixelBuffer,
        handle: CurveHandle,
        field: CurveField,
        value: u8,
    ) -> OpsResult<bool> {
        let current = match handle {
            CurveHandle::Enter => self.points.enter(),
            CurveHandle::Exit => self.points.exit(),
        };
        let moved = match field {
            CurveField::Input => CurvePoint::new(value, current.output),
            CurveField::Output => CurvePoint::new(current.input, value),
        };
        let next = match handle {
            CurveHandle::Enter => self.points.with_enter(moved),
            CurveHandle::Exit => self.points.with_exit(moved),
        };
        match next {
            Ok(points) if points == self.points => Ok(false),
            Ok(points) => {
                self.points = points;
                self.refresh(image)?;
                Ok(true)
            }
            Err(e) => {
                debug!("curve edit rejected: {e}");
                Ok(false)
            }
        }
    }

    /// Resets the points to identity.
    pub fn reset(&mut self, image: &PixelBuffer) -> OpsResult<()> {
        self.points = CurvePoints::identity();
        self.refresh(image)
    }

    /// Turns live preview on or off.
    pub fn set_preview(&mut self, image: &PixelBuffer, enabled: bool) -> OpsResult<()> {
        self.preview_enabled = enabled;
        self.refresh(image)
    }

    fn refresh(&mut self, image: &PixelBuffer) -> OpsResult<()> {
        self.preview = if self.preview_enabled {
            Some(apply_lut(image, &CurveLut::new(&self.points))?)
        } else {
            None
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> PixelBuffer {
        PixelBuffer::from_fn(16, 16, |x, y| [(x * 16) as u8, (y * 16) as u8, 80, 255]).unwrap()
    }

    #[test]
    fn opens_at_identity() {
        let img = image();
        let cs = CurveSession::open(&img);
        assert!(cs.points().is_identity());
        assert!(!cs.preview_enabled());
        assert!(cs.preview().is_none());
        assert_eq!(cs.histogram().b[80], 256);
        // Blue is the tallest column in the chart
        assert_eq!(cs.bars().b[80], DEFAULT_CHART_HEIGHT);
    }

    #[test]
    fn valid_edit_applies() {
        let img = image();
        let mut cs = CurveSession::open(&img);
        assert!(cs.edit(&img, CurveHandle::Enter, CurveField::Input, 50).unwrap());
        assert_eq!(cs.points().enter(), CurvePoint::new(50, 0));
    }

    #[test]
    fn crossing_edit_rejected() {
        let img = image();
        let mut cs = CurveSession::open(&img);
        cs.edit(&img, CurveHandle::Exit, CurveField::Input, 100).unwrap();
        let before = cs.points();
        assert!(!cs.edit(&img, CurveHandle::Enter, CurveField::Input, 100).unwrap());
        assert!(!cs.edit(&img, CurveHandle::Enter, CurveField::Input, 200).unwrap());
        assert_eq!(cs.points(), before);
    }

    #[test]
    fn unchanged_edit_reports_false() {
        let img = image();
        let mut cs = CurveSession::open(&img);
        assert!(!cs.edit(&img, CurveHandle::Exit, CurveField::Output, 255).unwrap());
    }

    #[test]
    fn preview_tracks_points() {
        let img = image();
        let mut cs = CurveSession::open(&img);
        cs.set_preview(&img, true).unwrap();
        assert_eq!(cs.preview(), Some(&img));

        cs.edit(&img, CurveHandle::Exit, CurveField::Output, 0).unwrap();
        cs.edit(&img, CurveHandle::Enter, CurveField::Output, 0).unwrap();
        let preview = cs.preview().unwrap();
        assert_eq!(preview.pixel(5, 5), [0, 0, 0, 255]);

        cs.reset(&img).unwrap();
        assert!(cs.points().is_identity());
        assert_eq!(cs.preview(), Some(&img));

        cs.set_preview(&img, false).unwrap();
        assert!(cs.preview().is_none());
    }
}
