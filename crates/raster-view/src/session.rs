//! Editor session: the single input handler.
//!
//! [`EditorSession`] owns the current image, the undo history, the viewport,
//! the active tool, the picker slots and the open curves dialog. The UI layer
//! forwards every [`InputEvent`] to [`EditorSession::handle`] and repaints
//! when it returns `true`.
//!
//! Edits never mutate a buffer in place. Each commit builds a new
//! [`PixelBuffer`], pushes the previous one onto the history and makes the
//! new one the source of truth.

use std::path::{Path, PathBuf};

use raster_core::PixelBuffer;
use raster_ops::{Kernel, OpsResult, apply_curve, apply_filter, resize};
use tracing::{debug, info, trace};

use crate::curves::CurveSession;
use crate::messages::InputEvent;
use crate::sampler::{PickerSlots, PixelSample, sample};
use crate::state::{SessionPersistence, Tool};
use crate::viewport::Viewport;

/// Number of previous images kept for undo.
pub const MAX_HISTORY: usize = 20;

/// Editor state for one window.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    image: Option<PixelBuffer>,
    history: Vec<PixelBuffer>,
    viewport: Viewport,
    tool: Tool,
    cursor: Option<PixelSample>,
    picks: PickerSlots,
    curves: Option<CurveSession>,
    display: Option<PixelBuffer>,
    last_file: Option<PathBuf>,
}

impl EditorSession {
    /// Creates an empty session for a container of the given size.
    pub fn new(container_width: f64, container_height: f64) -> Self {
        Self {
            viewport: Viewport::new(container_width, container_height),
            ..Default::default()
        }
    }

    /// Restores tool and last file from saved settings.
    pub fn from_persistence(persistence: &SessionPersistence) -> Self {
        Self {
            tool: persistence.tool,
            last_file: persistence.last_file.clone(),
            ..Default::default()
        }
    }

    /// Settings to save on exit.
    pub fn to_persistence(&self) -> SessionPersistence {
        SessionPersistence {
            last_file: self.last_file.clone(),
            tool: self.tool,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current image.
    pub fn image(&self) -> Option<&PixelBuffer> {
        self.image.as_ref()
    }

    /// Image resampled at the display scale. Shows the curve preview while
    /// one is active.
    pub fn display(&self) -> Option<&PixelBuffer> {
        self.display.as_ref()
    }

    /// Viewport state.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Sample under the pointer.
    pub fn cursor(&self) -> Option<PixelSample> {
        self.cursor
    }

    /// Picker slots.
    pub fn picks(&self) -> &PickerSlots {
        &self.picks
    }

    /// Open curves dialog.
    pub fn curves(&self) -> Option<&CurveSession> {
        self.curves.as_ref()
    }

    /// Number of images that [`InputEvent::Undo`] can restore.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns `true` if there is an image to go back to.
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Last opened file.
    pub fn last_file(&self) -> Option<&Path> {
        self.last_file.as_deref()
    }

    /// Records the file the current image came from.
    pub fn set_last_file(&mut self, path: impl Into<PathBuf>) {
        self.last_file = Some(path.into());
    }

    /// Samples the committed image under screen position `(x, y)`, with the
    /// current scale and pan. `None` without an image.
    pub fn sample_at(&self, x: f64, y: f64) -> Option<PixelSample> {
        let image = self.image.as_ref()?;
        Some(sample(image, &self.viewport, x, y))
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Handles one input event. Returns `true` if anything visible changed.
    ///
    /// # Errors
    ///
    /// Only commands that build a new buffer can fail, e.g. a resize to a
    /// zero dimension. The session is left unchanged on error.
    pub fn handle(&mut self, event: InputEvent) -> OpsResult<bool> {
        trace!(?event, "input");
        match event {
            InputEvent::ImageDecoded(image) => {
                self.load(image)?;
                Ok(true)
            }
            InputEvent::ContainerResized { width, height } => {
                self.viewport.set_container(width, height);
                Ok(true)
            }
            InputEvent::SelectTool(tool) => {
                let changed = tool != self.tool;
                self.tool = tool;
                self.viewport.pointer_up();
                Ok(changed)
            }
            InputEvent::PointerDown { x, y } => {
                if self.image.is_none() {
                    return Ok(false);
                }
                Ok(self.viewport.pointer_down(x, y, self.tool))
            }
            InputEvent::PointerMove { x, y } => {
                let panned = self.viewport.pointer_move(x, y);
                let hovered = self.hover(x, y);
                Ok(panned || hovered)
            }
            InputEvent::PointerUp => {
                let was_dragging = self.viewport.is_dragging();
                self.viewport.pointer_up();
                Ok(was_dragging)
            }
            InputEvent::Click { x, y, modifiers } => {
                if self.tool != Tool::ColorPicker {
                    return Ok(false);
                }
                let Some(image) = &self.image else {
                    return Ok(false);
                };
                let picked = sample(image, &self.viewport, x, y);
                debug!(secondary = modifiers.secondary, "picked {picked}");
                self.picks.store(picked, modifiers.secondary);
                Ok(true)
            }
            InputEvent::Key { key, modifiers } => {
                if self.image.is_none() {
                    return Ok(false);
                }
                Ok(self.viewport.key(key, modifiers.fast_step, self.tool))
            }
            InputEvent::SetScale(percent) => {
                let before = self.viewport.scale_percent();
                let after = self.viewport.set_scale(percent);
                if before == after {
                    return Ok(false);
                }
                self.refresh_display()?;
                Ok(true)
            }
            InputEvent::FitToContainer => {
                self.viewport.fit();
                self.refresh_display()?;
                Ok(true)
            }
            InputEvent::ActualSize => {
                self.viewport.actual_size();
                self.refresh_display()?;
                Ok(true)
            }
            InputEvent::OpenCurves => {
                let Some(image) = &self.image else {
                    return Ok(false);
                };
                self.curves = Some(CurveSession::open(image));
                Ok(true)
            }
            InputEvent::SetCurvePoint {
                handle,
                field,
                value,
            } => {
                let (Some(image), Some(curves)) = (&self.image, &mut self.curves) else {
                    return Ok(false);
                };
                let changed = curves.edit(image, handle, field, value)?;
                if changed && curves.preview_enabled() {
                    self.refresh_display()?;
                }
                Ok(changed)
            }
            InputEvent::ResetCurves => {
                let (Some(image), Some(curves)) = (&self.image, &mut self.curves) else {
                    return Ok(false);
                };
                curves.reset(image)?;
                self.refresh_display()?;
                Ok(true)
            }
            InputEvent::SetPreview(enabled) => {
                let (Some(image), Some(curves)) = (&self.image, &mut self.curves) else {
                    return Ok(false);
                };
                curves.set_preview(image, enabled)?;
                self.refresh_display()?;
                Ok(true)
            }
            InputEvent::ApplyCurves => {
                let (Some(image), Some(curves)) = (&self.image, &self.curves) else {
                    return Ok(false);
                };
                let edited = apply_curve(image, &curves.points())?;
                info!("applied curve {}", curves.points());
                self.curves = None;
                self.commit(edited)?;
                Ok(true)
            }
            InputEvent::CloseCurves => {
                if self.curves.take().is_none() {
                    return Ok(false);
                }
                self.refresh_display()?;
                Ok(true)
            }
            InputEvent::ApplyFilter(kernel) => self.apply_kernel(&kernel),
            InputEvent::Resize { width, height } => {
                let Some(image) = &self.image else {
                    return Ok(false);
                };
                let resized = resize(image, width, height)?;
                info!(width, height, "resized image");
                self.commit(resized)?;
                Ok(true)
            }
            InputEvent::Undo => self.undo(),
        }
    }

    fn apply_kernel(&mut self, kernel: &Kernel) -> OpsResult<bool> {
        let Some(image) = &self.image else {
            return Ok(false);
        };
        let filtered = apply_filter(image, kernel)?;
        info!(width = kernel.width, height = kernel.height, "applied filter");
        self.commit(filtered)?;
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Image lifecycle
    // -------------------------------------------------------------------------

    fn load(&mut self, image: PixelBuffer) -> OpsResult<()> {
        let (w, h) = image.dimensions();
        info!(width = w, height = h, "image loaded");
        self.viewport.load(w, h);
        self.image = Some(image);
        self.history.clear();
        self.picks.clear();
        self.cursor = None;
        self.curves = None;
        self.refresh_display()
    }

    /// Makes `edited` the current image, keeping the previous one for undo.
    /// The view is refitted when the dimensions change.
    fn commit(&mut self, edited: PixelBuffer) -> OpsResult<()> {
        let dims = edited.dimensions();
        if let Some(previous) = self.image.replace(edited) {
            if previous.dimensions() != dims {
                self.viewport.load(dims.0, dims.1);
            }
            self.history.push(previous);
            if self.history.len() > MAX_HISTORY {
                self.history.remove(0);
            }
        }
        debug!(history = self.history.len(), "edit committed");
        self.refresh_display()
    }

    fn undo(&mut self) -> OpsResult<bool> {
        let Some(previous) = self.history.pop() else {
            return Ok(false);
        };
        let dims = previous.dimensions();
        if self.image.as_ref().map(PixelBuffer::dimensions) != Some(dims) {
            self.viewport.load(dims.0, dims.1);
        }
        self.image = Some(previous);
        self.curves = None;
        debug!(history = self.history.len(), "undo");
        self.refresh_display()?;
        Ok(true)
    }

    fn hover(&mut self, x: f64, y: f64) -> bool {
        let Some(next) = self.sample_at(x, y) else {
            return false;
        };
        let next = Some(next);
        let changed = next != self.cursor;
        self.cursor = next;
        changed
    }

    fn refresh_display(&mut self) -> OpsResult<()> {
        let preview = self.curves.as_ref().and_then(CurveSession::preview);
        let shown = preview.or(self.image.as_ref());
        self.display = match shown {
            Some(buf) => Some(self.viewport.render(buf)?),
            None => None,
        };
        Ok(())
    }
}
