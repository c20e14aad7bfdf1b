//! CLI command implementations

pub mod batch;
pub mod curves;
pub mod filter;
pub mod histogram;
pub mod info;
pub mod resize;
pub mod sample;

use anyhow::{Context, Result, bail};
use raster_core::PixelBuffer;
use raster_ops::{CurvePoint, CurvePoints, Kernel};
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    raster_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &PixelBuffer) -> Result<()> {
    raster_io::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Parses `WxH` (also accepts `W,H`).
pub fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X', ','])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w: u32 = w.trim().parse().map_err(|_| format!("bad width '{w}'"))?;
    let h: u32 = h.trim().parse().map_err(|_| format!("bad height '{h}'"))?;
    if w == 0 || h == 0 {
        return Err(format!("size must be non-zero, got '{s}'"));
    }
    Ok((w, h))
}

/// Parses a curve control point `IN,OUT`.
pub fn parse_point(s: &str) -> Result<(u8, u8), String> {
    let (i, o) = s
        .split_once(',')
        .ok_or_else(|| format!("expected IN,OUT, got '{s}'"))?;
    let i: u8 = i.trim().parse().map_err(|_| format!("bad input '{i}' (0-255)"))?;
    let o: u8 = o.trim().parse().map_err(|_| format!("bad output '{o}' (0-255)"))?;
    Ok((i, o))
}

/// Builds validated curve points from parsed pairs.
pub fn curve_points(enter: (u8, u8), exit: (u8, u8)) -> Result<CurvePoints> {
    CurvePoints::new(
        CurvePoint::new(enter.0, enter.1),
        CurvePoint::new(exit.0, exit.1),
    )
    .context("Invalid curve")
}

/// Builds a kernel from its CLI name. Even sizes are rounded up to odd.
pub fn kernel_from_name(name: &str, size: usize, sigma: f32, amount: f32) -> Result<Kernel> {
    if size == 0 {
        bail!("Kernel size must be at least 1");
    }
    let kernel = match name.to_lowercase().as_str() {
        "box" => Kernel::box_blur(size),
        "gaussian" | "gauss" => Kernel::gaussian(size, sigma),
        "sharpen" => Kernel::sharpen(amount),
        "edge" | "edges" => Kernel::edge_detect(),
        other => bail!("Unknown filter '{}' (box, gaussian, sharpen, edge)", other),
    };
    Ok(kernel)
}
