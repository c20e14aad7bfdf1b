//! # raster-view
//!
//! Interactive editing core for the raster editor: everything a window needs
//! except drawing.
//!
//! Features:
//! - Viewport scale (12% to 300%) and pan with per-axis clamping
//! - Drag state machine and keyboard panning, gated on the Pan tool
//! - Screen to source pixel mapping and color sampling
//! - Tone-curve dialog state with live preview and histogram bars
//! - Undo history over immutable buffers
//! - Persistent settings
//!
//! # Quick Start
//!
//! ```ignore
//! use raster_view::{EditorSession, InputEvent};
//!
//! let mut session = EditorSession::new(1280.0, 720.0);
//! session.handle(InputEvent::ImageDecoded(image))?;
//! session.handle(InputEvent::Resize { width: 640, height: 360 })?;
//! let shown = session.display();
//! ```
//!
//! # Input
//!
//! | Event | Effect |
//! |-------|--------|
//! | Pointer drag | Pan (Pan tool only) |
//! | Arrow keys | Pan by 10, or 50 with the fast-step modifier (Pan tool only) |
//! | Click | Fill a picker slot (ColorPicker tool only) |
//! | Pointer move | Update the hover sample (any tool) |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod curves;
pub mod messages;
pub mod sampler;
pub mod session;
pub mod state;
pub mod viewport;

pub use curves::CurveSession;
pub use messages::{ArrowKey, CurveField, CurveHandle, InputEvent, Modifiers};
pub use sampler::{PickerSlots, PixelSample, sample};
pub use session::EditorSession;
pub use state::{SessionPersistence, Tool};
pub use viewport::{DragState, Viewport};
