//! Color sampling under the viewport transform.

use std::fmt;

use raster_core::PixelBuffer;

use crate::viewport::Viewport;

/// Color and source coordinates of one sampled pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelSample {
    /// Sampled color (alpha dropped).
    pub rgb: [u8; 3],
    /// Source column.
    pub x: u32,
    /// Source row.
    pub y: u32,
}

impl PixelSample {
    /// Hex color string, `#rrggbb`.
    pub fn hex(&self) -> String {
        let [r, g, b] = self.rgb;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Display for PixelSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.rgb;
        write!(f, "({}, {}) rgb({r}, {g}, {b})", self.x, self.y)
    }
}

/// Samples `buf` at a container-relative screen position.
///
/// Coordinates outside the displayed image clamp to the nearest edge pixel.
pub fn sample(buf: &PixelBuffer, viewport: &Viewport, screen_x: f64, screen_y: f64) -> PixelSample {
    let (x, y) = viewport.screen_to_source_in(buf.width(), buf.height(), screen_x, screen_y);
    let [r, g, b, _] = buf.pixel(x, y);
    PixelSample { rgb: [r, g, b], x, y }
}

/// The two color-picker slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PickerSlots {
    /// Filled by a plain click.
    pub primary: Option<PixelSample>,
    /// Filled by a click with the secondary modifier.
    pub secondary: Option<PixelSample>,
}

impl PickerSlots {
    /// Stores `sample` in the slot selected by `secondary`.
    pub fn store(&mut self, sample: PixelSample, secondary: bool) {
        if secondary {
            self.secondary = Some(sample);
        } else {
            self.primary = Some(sample);
        }
    }

    /// Empties both slots.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> PixelBuffer {
        PixelBuffer::from_fn(8, 4, |x, y| [x as u8 * 10, y as u8 * 20, 99, 255]).unwrap()
    }

    #[test]
    fn samples_under_centered_image() {
        let buf = gradient();
        let mut vp = Viewport::new(100.0, 100.0);
        vp.load(8, 4);
        vp.set_scale(100);
        // content 8x4 centered at (46, 48)
        let s = sample(&buf, &vp, 46.0 + 3.5, 48.0 + 2.2);
        assert_eq!((s.x, s.y), (3, 2));
        assert_eq!(s.rgb, [30, 40, 99]);
    }

    #[test]
    fn out_of_range_clamps() {
        let buf = gradient();
        let vp = {
            let mut vp = Viewport::new(100.0, 100.0);
            vp.load(8, 4);
            vp
        };
        let tl = sample(&buf, &vp, -500.0, -500.0);
        assert_eq!((tl.x, tl.y), (0, 0));
        let br = sample(&buf, &vp, 5000.0, 5000.0);
        assert_eq!((br.x, br.y), (7, 3));
        assert_eq!(br.rgb, [70, 60, 99]);
    }

    #[test]
    fn formats() {
        let s = PixelSample {
            rgb: [255, 0, 16],
            x: 4,
            y: 9,
        };
        assert_eq!(s.hex(), "#ff0010");
        assert_eq!(s.to_string(), "(4, 9) rgb(255, 0, 16)");
    }

    #[test]
    fn slots() {
        let mut slots = PickerSlots::default();
        let s = PixelSample::default();
        slots.store(s, true);
        assert_eq!(slots.primary, None);
        assert_eq!(slots.secondary, Some(s));
        slots.store(s, false);
        assert_eq!(slots.primary, Some(s));
        slots.clear();
        assert_eq!(slots, PickerSlots::default());
    }
}
