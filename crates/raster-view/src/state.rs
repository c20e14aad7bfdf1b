//! Editor constants, tool modes and persistence.
//!
//! Stores the small amount of UI state that survives between sessions.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Smallest display scale, in percent.
pub const SCALE_MIN: u32 = 12;

/// Largest display scale, in percent.
pub const SCALE_MAX: u32 = 300;

/// Keyboard pan step.
pub const PAN_STEP: f64 = 10.0;

/// Keyboard pan step with the fast-step modifier held.
pub const PAN_STEP_FAST: f64 = 50.0;

/// Default container size before the window reports one.
pub const DEFAULT_CONTAINER: [f64; 2] = [1280.0, 720.0];

/// Active tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    /// Hand tool: drag and arrow keys move the view.
    #[default]
    Pan,
    /// Pipette: clicks fill the picker slots.
    ColorPicker,
}

impl Tool {
    /// Display label for UI.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pan => "Hand",
            Self::ColorPicker => "Pipette",
        }
    }

    /// All available tools.
    pub const fn all() -> &'static [Self] {
        &[Self::Pan, Self::ColorPicker]
    }
}

/// Persistent editor settings (saved between sessions).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionPersistence {
    /// Last opened file path.
    pub last_file: Option<PathBuf>,
    /// Last active tool.
    pub tool: Tool,
}

/// File name of the persisted session inside the config directory.
pub const PERSISTENCE_FILE: &str = "session.ron";

/// Platform-specific persistence directory.
pub fn persistence_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("raster-rs"))
}

/// Loads persistence from `path`, returning `None` if missing or unreadable.
pub fn load_persistence_from(path: &Path) -> Option<SessionPersistence> {
    let text = std::fs::read_to_string(path).ok()?;
    match ron::from_str(&text) {
        Ok(p) => Some(p),
        Err(e) => {
            debug!("ignoring unreadable persistence {}: {e}", path.display());
            None
        }
    }
}

/// Saves persistence to `path`, creating parent directories.
pub fn save_persistence_to(path: &Path, persistence: &SessionPersistence) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let text = ron::ser::to_string_pretty(persistence, ron::ser::PrettyConfig::default())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    std::fs::write(path, text)
}

/// Loads `session.ron` from `dir`.
pub fn load_persistence_in(dir: &Path) -> Option<SessionPersistence> {
    load_persistence_from(&dir.join(PERSISTENCE_FILE))
}

/// Saves `session.ron` into `dir`.
pub fn save_persistence_in(dir: &Path, persistence: &SessionPersistence) -> std::io::Result<()> {
    save_persistence_to(&dir.join(PERSISTENCE_FILE), persistence)
}

/// Loads persistence from the platform config directory.
pub fn load_persistence() -> Option<SessionPersistence> {
    load_persistence_in(&persistence_dir()?)
}

/// Saves persistence to the platform config directory.
pub fn save_persistence(persistence: &SessionPersistence) -> std::io::Result<()> {
    let dir = persistence_dir().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "no config directory")
    })?;
    save_persistence_in(&dir, persistence)
}
