//! Viewport controller: display scale, pan and pointer mapping.
//!
//! The viewport shows the source image at `scale_percent` inside a container
//! of fixed screen size. Display scale is a *view* transform; the source
//! buffer is never modified by it.
//!
//! # Pan
//!
//! Each axis is handled on its own:
//!
//! - **Scrolling axis** (content larger than the container): `pan` is the
//!   scroll position, clamped to `[0, content - container]`. Content origin
//!   on screen is `-pan`.
//! - **Offset axis** (content fits): the content is centered and `pan` is a
//!   visual offset clamped to `[-container/2, container/2]`.
//!
//! # Drag state machine
//!
//! ```text
//!          pointer down (Pan tool)
//!   Idle ---------------------------> Dragging { start, origin }
//!    ^                                   |
//!    +----------- pointer up ------------+
//! ```
//!
//! While dragging, the content follows the pointer: a scrolling axis moves
//! its scroll position against the pointer delta, an offset axis moves with
//! it.

use raster_core::PixelBuffer;
use raster_ops::resize::{resize, source_index};
use raster_ops::OpsResult;
use tracing::{debug, trace};

use crate::messages::ArrowKey;
use crate::state::{DEFAULT_CONTAINER, PAN_STEP, PAN_STEP_FAST, SCALE_MAX, SCALE_MIN, Tool};

/// Drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// Pointer held down with the Pan tool.
    Dragging {
        /// Pointer position at drag start.
        start: [f64; 2],
        /// Pan at drag start.
        origin: [f64; 2],
    },
}

/// Scale, pan and container geometry for one displayed image.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale_percent: u32,
    pan: [f64; 2],
    container: [f64; 2],
    source: [u32; 2],
    drag: DragState,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER[0], DEFAULT_CONTAINER[1])
    }
}

impl Viewport {
    /// Creates an empty viewport for a container of the given size.
    pub fn new(container_width: f64, container_height: f64) -> Self {
        Self {
            scale_percent: 100,
            pan: [0.0, 0.0],
            container: [container_width.max(0.0), container_height.max(0.0)],
            source: [0, 0],
            drag: DragState::Idle,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current display scale in percent.
    #[inline]
    pub fn scale_percent(&self) -> u32 {
        self.scale_percent
    }

    /// Current pan `[x, y]`.
    #[inline]
    pub fn pan(&self) -> [f64; 2] {
        self.pan
    }

    /// Container size `[width, height]`.
    #[inline]
    pub fn container(&self) -> [f64; 2] {
        self.container
    }

    /// Source image size, `[0, 0]` before an image is loaded.
    #[inline]
    pub fn source(&self) -> [u32; 2] {
        self.source
    }

    /// Drag state.
    #[inline]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Returns `true` while a drag is in progress.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Scaled content size `[width, height]` in whole screen pixels.
    pub fn content_size(&self) -> [u32; 2] {
        [
            content_len(self.source[0], self.scale_percent),
            content_len(self.source[1], self.scale_percent),
        ]
    }

    /// Returns `true` if `axis` (0 = x, 1 = y) scrolls rather than offsets.
    pub fn scrolls(&self, axis: usize) -> bool {
        f64::from(self.content_size()[axis]) > self.container[axis]
    }

    /// Allowed pan range for `axis`.
    pub fn pan_bounds(&self, axis: usize) -> (f64, f64) {
        let content = f64::from(self.content_size()[axis]);
        let container = self.container[axis];
        if content > container {
            (0.0, content - container)
        } else {
            (-container / 2.0, container / 2.0)
        }
    }

    // -------------------------------------------------------------------------
    // Scale
    // -------------------------------------------------------------------------

    /// Scale percent that fits a `width x height` image inside the container
    /// without cropping, clamped to the slider range.
    pub fn fit_scale(&self, width: u32, height: u32) -> u32 {
        if width == 0 || height == 0 {
            return 100;
        }
        let ratio = (self.container[0] / f64::from(width))
            .min(self.container[1] / f64::from(height));
        let percent = (ratio * 100.0).floor();
        (percent.max(0.0) as u32).clamp(SCALE_MIN, SCALE_MAX)
    }

    /// Adopts a newly loaded image: fit scale, pan reset, drag ended.
    pub fn load(&mut self, width: u32, height: u32) {
        self.source = [width, height];
        self.scale_percent = self.fit_scale(width, height);
        self.pan = [0.0, 0.0];
        self.drag = DragState::Idle;
        debug!(width, height, scale = self.scale_percent, "viewport fitted");
    }

    /// Sets the display scale, clamped to `[SCALE_MIN, SCALE_MAX]`.
    /// Returns the scale actually applied.
    pub fn set_scale(&mut self, percent: u32) -> u32 {
        self.scale_percent = percent.clamp(SCALE_MIN, SCALE_MAX);
        self.clamp_pan();
        trace!(scale = self.scale_percent, "scale changed");
        self.scale_percent
    }

    /// Fits the current image to the container.
    pub fn fit(&mut self) {
        let [w, h] = self.source;
        self.scale_percent = self.fit_scale(w, h);
        self.pan = [0.0, 0.0];
    }

    /// 100% scale with pan reset.
    pub fn actual_size(&mut self) {
        self.scale_percent = 100;
        self.pan = [0.0, 0.0];
        self.clamp_pan();
    }

    /// Updates the container size and re-clamps pan.
    pub fn set_container(&mut self, width: f64, height: f64) {
        self.container = [width.max(0.0), height.max(0.0)];
        self.clamp_pan();
    }

    // -------------------------------------------------------------------------
    // Pan
    // -------------------------------------------------------------------------

    /// Sets pan directly, then clamps.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan = [x, y];
        self.clamp_pan();
    }

    fn clamp_pan(&mut self) {
        for axis in 0..2 {
            let (lo, hi) = self.pan_bounds(axis);
            self.pan[axis] = self.pan[axis].clamp(lo, hi);
        }
    }

    /// Starts a drag if the Pan tool is active. Returns `true` if the state
    /// machine entered `Dragging`.
    pub fn pointer_down(&mut self, x: f64, y: f64, tool: Tool) -> bool {
        if tool != Tool::Pan {
            return false;
        }
        self.drag = DragState::Dragging {
            start: [x, y],
            origin: self.pan,
        };
        true
    }

    /// Updates pan from the pointer position while dragging. Returns `true`
    /// if pan changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let DragState::Dragging { start, origin } = self.drag else {
            return false;
        };
        let before = self.pan;
        let delta = [x - start[0], y - start[1]];
        for axis in 0..2 {
            self.pan[axis] = if self.scrolls(axis) {
                origin[axis] - delta[axis]
            } else {
                origin[axis] + delta[axis]
            };
        }
        self.clamp_pan();
        self.pan != before
    }

    /// Ends any drag.
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Applies an arrow-key step if the Pan tool is active. Returns `true`
    /// if pan changed.
    pub fn key(&mut self, key: ArrowKey, fast: bool, tool: Tool) -> bool {
        if tool != Tool::Pan {
            return false;
        }
        let step = if fast { PAN_STEP_FAST } else { PAN_STEP };
        let dir = key.direction();
        let before = self.pan;
        self.pan[0] += dir[0] * step;
        self.pan[1] += dir[1] * step;
        self.clamp_pan();
        self.pan != before
    }

    // -------------------------------------------------------------------------
    // Mapping
    // -------------------------------------------------------------------------

    /// Screen position of the content's top-left corner.
    pub fn content_origin(&self) -> [f64; 2] {
        let content = self.content_size();
        let mut origin = [0.0; 2];
        for axis in 0..2 {
            origin[axis] = if self.scrolls(axis) {
                -self.pan[axis]
            } else {
                (self.container[axis] - f64::from(content[axis])) / 2.0 + self.pan[axis]
            };
        }
        origin
    }

    /// Maps a container-relative screen position to a display (scaled
    /// content) pixel, unclamped.
    pub fn screen_to_display(&self, x: f64, y: f64) -> [i64; 2] {
        let origin = self.content_origin();
        [
            (x - origin[0]).floor() as i64,
            (y - origin[1]).floor() as i64,
        ]
    }

    /// Maps a container-relative screen position to a source pixel of a
    /// `width x height` image shown at the current scale and pan. The result
    /// is clamped into the image.
    ///
    /// The mapping picks the same source pixel the nearest-neighbor display
    /// buffer shows at that screen position.
    pub fn screen_to_source_in(&self, width: u32, height: u32, x: f64, y: f64) -> (u32, u32) {
        let display = self.screen_to_display(x, y);
        let dims = [width.max(1), height.max(1)];
        let mut out = [0u32; 2];
        for axis in 0..2 {
            let content = content_len(dims[axis], self.scale_percent);
            let d = display[axis].clamp(0, i64::from(content) - 1) as u32;
            out[axis] = source_index(d, dims[axis], content);
        }
        (out[0], out[1])
    }

    /// [`screen_to_source_in`](Self::screen_to_source_in) for the loaded
    /// image.
    pub fn screen_to_source(&self, x: f64, y: f64) -> (u32, u32) {
        self.screen_to_source_in(self.source[0], self.source[1], x, y)
    }

    /// Re-samples `src` at the display scale (nearest neighbor).
    pub fn render(&self, src: &PixelBuffer) -> OpsResult<PixelBuffer> {
        let w = content_len(src.width(), self.scale_percent);
        let h = content_len(src.height(), self.scale_percent);
        if (w, h) == src.dimensions() {
            return Ok(src.clone());
        }
        resize(src, w, h)
    }
}

/// `floor(len * scale / 100)`, at least one pixel for non-empty sources.
#[inline]
fn content_len(len: u32, scale_percent: u32) -> u32 {
    if len == 0 {
        return 0;
    }
    let scaled = u64::from(len) * u64::from(scale_percent) / 100;
    scaled.clamp(1, u64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn loaded(container: [f64; 2], image: [u32; 2]) -> Viewport {
        let mut vp = Viewport::new(container[0], container[1]);
        vp.load(image[0], image[1]);
        vp
    }

    #[test]
    fn fit_scale_floors_to_percent() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.fit_scale(1600, 900), 50);
        assert_eq!(vp.fit_scale(300, 700), 85);
        assert_eq!(vp.fit_scale(100, 100), 300);
        assert_eq!(vp.fit_scale(100_000, 100), SCALE_MIN);
    }

    #[test]
    fn load_fits_and_resets() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.set_pan(100.0, 100.0);
        vp.load(1600, 1200);
        assert_eq!(vp.scale_percent(), 50);
        assert_eq!(vp.pan(), [0.0, 0.0]);
        assert_eq!(vp.content_size(), [800, 600]);
        assert!(!vp.scrolls(0));
    }

    #[test]
    fn set_scale_clamps_range() {
        let mut vp = loaded([800.0, 600.0], [400, 300]);
        assert_eq!(vp.set_scale(5), SCALE_MIN);
        assert_eq!(vp.set_scale(1000), SCALE_MAX);
        assert_eq!(vp.set_scale(150), 150);
        assert_eq!(vp.content_size(), [600, 450]);
    }

    #[test]
    fn scroll_pan_clamps_to_content_edge() {
        let mut vp = loaded([100.0, 100.0], [1000, 1000]);
        vp.set_scale(100);
        assert!(vp.scrolls(0) && vp.scrolls(1));
        vp.set_pan(5000.0, -30.0);
        assert_eq!(vp.pan(), [900.0, 0.0]);
    }

    #[test]
    fn offset_pan_clamps_to_half_container() {
        let mut vp = loaded([400.0, 200.0], [100, 50]);
        vp.set_scale(100);
        vp.set_pan(-1000.0, 1000.0);
        assert_eq!(vp.pan(), [-200.0, 100.0]);
    }

    #[test]
    fn drag_requires_pan_tool() {
        let mut vp = loaded([100.0, 100.0], [1000, 1000]);
        vp.set_scale(100);
        assert!(!vp.pointer_down(50.0, 50.0, Tool::ColorPicker));
        assert!(!vp.is_dragging());
        assert!(!vp.pointer_move(0.0, 0.0));

        assert!(vp.pointer_down(50.0, 50.0, Tool::Pan));
        assert!(vp.pointer_move(20.0, 30.0));
        assert_eq!(vp.pan(), [30.0, 20.0]);

        // Dragging past the edge stops at the boundary
        vp.pointer_move(-5000.0, -5000.0);
        assert_eq!(vp.pan(), [900.0, 900.0]);

        vp.pointer_up();
        assert_eq!(vp.drag_state(), DragState::Idle);
        assert!(!vp.pointer_move(0.0, 0.0));
    }

    #[test]
    fn drag_moves_small_content_with_pointer() {
        let mut vp = loaded([400.0, 400.0], [100, 100]);
        vp.set_scale(100);
        vp.pointer_down(10.0, 10.0, Tool::Pan);
        vp.pointer_move(40.0, -500.0);
        assert_eq!(vp.pan(), [30.0, -200.0]);
    }

    #[test]
    fn keys_step_and_respect_tool() {
        let mut vp = loaded([100.0, 100.0], [1000, 1000]);
        vp.set_scale(100);
        assert!(vp.key(ArrowKey::Right, false, Tool::Pan));
        assert!(vp.key(ArrowKey::Down, true, Tool::Pan));
        assert_eq!(vp.pan(), [10.0, 50.0]);
        assert!(!vp.key(ArrowKey::Right, true, Tool::ColorPicker));
        assert_eq!(vp.pan(), [10.0, 50.0]);
        // Already at the top-left edge
        vp.set_pan(0.0, 0.0);
        assert!(!vp.key(ArrowKey::Left, false, Tool::Pan));
    }

    #[test]
    fn keys_on_offset_axis_clamp_to_half_container() {
        let mut vp = loaded([200.0, 100.0], [40, 20]);
        vp.set_scale(100);
        assert!(!vp.scrolls(0) && !vp.scrolls(1));

        assert!(vp.key(ArrowKey::Left, true, Tool::Pan));
        assert_relative_eq!(vp.pan()[0], -50.0);
        assert!(vp.key(ArrowKey::Left, true, Tool::Pan));
        assert_relative_eq!(vp.pan()[0], -100.0);
        // Already at -container/2
        assert!(!vp.key(ArrowKey::Left, false, Tool::Pan));
        assert_relative_eq!(vp.pan()[0], -100.0);

        for _ in 0..10 {
            vp.key(ArrowKey::Down, false, Tool::Pan);
        }
        assert_relative_eq!(vp.pan()[1], 50.0);
        // Content moves with the offset
        assert_relative_eq!(vp.content_origin()[1], 40.0 + 50.0);
    }

    #[test]
    fn mapping_scrolled_content() {
        let mut vp = loaded([100.0, 100.0], [400, 400]);
        vp.set_scale(200);
        vp.set_pan(50.0, 0.0);
        // screen 10 -> content 60 -> source 30
        assert_eq!(vp.screen_to_source(10.0, 0.5), (30, 0));
        let origin = vp.content_origin();
        assert_relative_eq!(origin[0], -50.0);
        assert_relative_eq!(origin[1], 0.0);
    }

    #[test]
    fn mapping_centered_content_clamps() {
        let mut vp = loaded([200.0, 200.0], [50, 50]);
        vp.set_scale(100);
        assert_eq!(vp.content_origin(), [75.0, 75.0]);
        assert_eq!(vp.screen_to_source(75.0, 124.9), (0, 49));
        assert_eq!(vp.screen_to_source(0.0, 0.0), (0, 0));
        assert_eq!(vp.screen_to_source(199.0, 199.0), (49, 49));
    }

    #[test]
    fn render_matches_content_size() {
        let mut vp = loaded([1000.0, 1000.0], [10, 4]);
        vp.set_scale(250);
        let src = PixelBuffer::from_fn(10, 4, |x, y| [x as u8, y as u8, 0, 255]).unwrap();
        let shown = vp.render(&src).unwrap();
        assert_eq!(shown.dimensions(), (25, 10));
        // Sampling the display agrees with the source mapping
        let origin = vp.content_origin();
        let (sx, sy) = vp.screen_to_source(origin[0] + 13.0, origin[1] + 7.0);
        assert_eq!(shown.pixel(13, 7), src.pixel(sx, sy));
    }

    #[test]
    fn tiny_scale_keeps_one_pixel() {
        assert_eq!(content_len(3, SCALE_MIN), 1);
        assert_eq!(content_len(0, 100), 0);
    }
}
