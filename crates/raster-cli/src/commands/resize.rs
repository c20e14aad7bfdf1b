//! Resize command
//!
//! Nearest-neighbor resize to an explicit size or to fit inside a box.

use crate::ResizeArgs;
use anyhow::{Result, bail};
use raster_ops::resize::{fit_dimensions, resize};
use tracing::{debug, trace};

pub fn run(args: ResizeArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "resize::run");
    let image = super::load_image(&args.input)?;
    let (src_w, src_h) = image.dimensions();

    let (dst_w, dst_h) = target_size(src_w, src_h, args.width, args.height, args.fit)?;
    debug!(src_w, src_h, dst_w, dst_h, "resize");

    if verbose > 0 {
        println!("Resizing {}x{} -> {}x{}", src_w, src_h, dst_w, dst_h);
    }

    let resized = resize(&image, dst_w, dst_h)?;
    super::save_image(&args.output, &resized)?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}

/// Resolves the target size. A single dimension keeps the aspect ratio.
fn target_size(
    src_w: u32,
    src_h: u32,
    width: Option<u32>,
    height: Option<u32>,
    fit: Option<(u32, u32)>,
) -> Result<(u32, u32)> {
    let size = match (width, height, fit) {
        (Some(w), Some(h), _) => (w, h),
        (Some(w), None, _) => {
            let h = (f64::from(src_h) * f64::from(w) / f64::from(src_w)).round() as u32;
            (w, h.max(1))
        }
        (None, Some(h), _) => {
            let w = (f64::from(src_w) * f64::from(h) / f64::from(src_h)).round() as u32;
            (w.max(1), h)
        }
        (None, None, Some((max_w, max_h))) => fit_dimensions(src_w, src_h, max_w, max_h),
        _ => bail!("Specify --width, --height, or --fit"),
    };
    if size.0 == 0 || size.1 == 0 {
        bail!("Target size must be non-zero, got {}x{}", size.0, size.1);
    }
    Ok(size)
}
