//! Sample command
//!
//! Opens an image in an editor session with the given container size,
//! exactly as the editor does on open, and reports the pixel under a screen
//! position. The session's last file and tool are restored from and saved
//! back to `session.ron` in the config directory.

use crate::SampleArgs;
use anyhow::{Context, Result};
use raster_view::state::{load_persistence_in, persistence_dir, save_persistence_in};
use raster_view::{EditorSession, InputEvent};
use tracing::{info, warn};

pub fn run(args: SampleArgs) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let (cw, ch) = args.container;

    let config_dir = args.config_dir.or_else(persistence_dir);
    let persisted = config_dir
        .as_deref()
        .and_then(load_persistence_in)
        .unwrap_or_default();
    if let Some(last) = &persisted.last_file {
        info!("previous file: {}", last.display());
    }

    let mut session = EditorSession::from_persistence(&persisted);
    session.handle(InputEvent::ContainerResized {
        width: f64::from(cw),
        height: f64::from(ch),
    })?;
    session
        .handle(InputEvent::ImageDecoded(image))
        .context("Failed to open image")?;
    if let Some(scale) = args.scale {
        session.handle(InputEvent::SetScale(scale))?;
    }
    session.set_last_file(args.input.as_path());

    let picked = session
        .sample_at(args.x, args.y)
        .context("No image to sample")?;
    println!("scale: {}%", session.viewport().scale_percent());
    println!("pixel: ({}, {})", picked.x, picked.y);
    println!("rgb:   {} {} {}", picked.rgb[0], picked.rgb[1], picked.rgb[2]);
    println!("hex:   {}", picked.hex());

    match config_dir {
        Some(dir) => {
            if let Err(e) = save_persistence_in(&dir, &session.to_persistence()) {
                warn!("failed to save session in {}: {e}", dir.display());
            }
        }
        None => warn!("no config directory, session not saved"),
    }
    Ok(())
}
