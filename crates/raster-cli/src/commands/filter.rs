//! Filter command
//!
//! Box blur, Gaussian blur, sharpen and edge detection.

use crate::FilterArgs;
use anyhow::Result;
use raster_ops::apply_filter;
use tracing::debug;

pub fn run(args: FilterArgs, verbose: u8) -> Result<()> {
    let kernel = super::kernel_from_name(&args.kind, args.size, args.sigma, args.amount)?;
    let image = super::load_image(&args.input)?;
    debug!(kind = %args.kind, size = kernel.width, "filter");

    if verbose > 0 {
        println!("Applying {} ({}x{})", args.kind, kernel.width, kernel.height);
    }

    let filtered = apply_filter(&image, &kernel)?;
    super::save_image(&args.output, &filtered)?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
