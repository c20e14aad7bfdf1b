//! Curves command
//!
//! Applies a two-point tone curve to R, G and B.

use crate::CurvesArgs;
use anyhow::Result;
use raster_ops::apply_curve;
use tracing::info;

pub fn run(args: CurvesArgs, verbose: u8) -> Result<()> {
    let points = super::curve_points(args.enter, args.exit)?;
    let image = super::load_image(&args.input)?;

    if points.is_identity() {
        info!("identity curve, copying pixels unchanged");
    }
    if verbose > 0 {
        println!("Applying curve {}", points);
    }

    let edited = apply_curve(&image, &points)?;
    super::save_image(&args.output, &edited)?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
