//! Input events consumed by the editor session.
//!
//! The UI layer translates raw window events into [`InputEvent`]s and feeds
//! them to [`EditorSession::handle`](crate::EditorSession::handle) on one
//! thread, in arrival order.

use raster_core::PixelBuffer;
use raster_ops::Kernel;

use crate::state::Tool;

/// Modifier keys held when an event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Fast-step modifier for keyboard panning (Shift).
    pub fast_step: bool,
    /// Secondary-slot modifier for the color picker (Ctrl).
    pub secondary: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        fast_step: false,
        secondary: false,
    };

    /// Fast-step modifier only.
    pub const FAST: Self = Self {
        fast_step: true,
        secondary: false,
    };

    /// Secondary-slot modifier only.
    pub const SECONDARY: Self = Self {
        fast_step: false,
        secondary: true,
    };
}

/// Arrow keys understood by the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    /// Scroll up.
    Up,
    /// Scroll down.
    Down,
    /// Scroll left.
    Left,
    /// Scroll right.
    Right,
}

impl ArrowKey {
    /// Unit direction `[dx, dy]` in pan space.
    pub const fn direction(self) -> [f64; 2] {
        match self {
            Self::Up => [0.0, -1.0],
            Self::Down => [0.0, 1.0],
            Self::Left => [-1.0, 0.0],
            Self::Right => [1.0, 0.0],
        }
    }
}

/// Which tone-curve control point an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveHandle {
    /// Low (enter) point.
    Enter,
    /// High (exit) point.
    Exit,
}

/// Which coordinate of a control point an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveField {
    /// Input intensity.
    Input,
    /// Output intensity.
    Output,
}

/// Messages from the UI layer to the editor session.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// A decoded image arrived from the decode boundary.
    ImageDecoded(PixelBuffer),

    /// The viewport container changed size.
    ContainerResized {
        /// Container width in screen pixels.
        width: f64,
        /// Container height in screen pixels.
        height: f64,
    },

    /// Switch the active tool.
    SelectTool(Tool),

    /// Pointer pressed inside the viewport container.
    PointerDown {
        /// Container-relative x.
        x: f64,
        /// Container-relative y.
        y: f64,
    },

    /// Pointer moved inside the viewport container.
    PointerMove {
        /// Container-relative x.
        x: f64,
        /// Container-relative y.
        y: f64,
    },

    /// Pointer released.
    PointerUp,

    /// Click on the image.
    Click {
        /// Container-relative x.
        x: f64,
        /// Container-relative y.
        y: f64,
        /// Modifier state at click time.
        modifiers: Modifiers,
    },

    /// Arrow key pressed.
    Key {
        /// Which arrow.
        key: ArrowKey,
        /// Modifier state at press time.
        modifiers: Modifiers,
    },

    /// Scale slider moved (percent).
    SetScale(u32),

    /// Fit the image to the container.
    FitToContainer,

    /// 100% scale, pan reset.
    ActualSize,

    /// Open the tone-curve dialog.
    OpenCurves,

    /// Edit one coordinate of a control point.
    SetCurvePoint {
        /// Target point.
        handle: CurveHandle,
        /// Target coordinate.
        field: CurveField,
        /// New value.
        value: u8,
    },

    /// Reset the curve to identity.
    ResetCurves,

    /// Enable or disable the live preview.
    SetPreview(bool),

    /// Commit the curve and close the dialog.
    ApplyCurves,

    /// Close the dialog without committing.
    CloseCurves,

    /// Commit a convolution filter.
    ApplyFilter(Kernel),

    /// Commit a nearest-neighbor resize.
    Resize {
        /// Target width.
        width: u32,
        /// Target height.
        height: u32,
    },

    /// Restore the previous image.
    Undo,
}
