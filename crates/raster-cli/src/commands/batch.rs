//! Batch processing command
//!
//! Runs the same fit/curve/filter chain over every file matching a glob
//! pattern. Files are processed in parallel.

use crate::BatchArgs;
use anyhow::{Context, Result, bail};
use raster_core::PixelBuffer;
use raster_ops::resize::{fit_dimensions, resize};
use raster_ops::{CurvePoints, Kernel, apply_curve, apply_filter};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, trace, warn};

/// Edits applied to each file, in order.
struct Chain {
    fit: Option<(u32, u32)>,
    curve: Option<CurvePoints>,
    kernel: Option<Kernel>,
}

impl Chain {
    fn apply(&self, image: PixelBuffer) -> Result<PixelBuffer> {
        let mut image = image;
        if let Some((max_w, max_h)) = self.fit {
            let (w, h) = fit_dimensions(image.width(), image.height(), max_w, max_h);
            image = resize(&image, w, h)?;
        }
        if let Some(points) = &self.curve {
            image = apply_curve(&image, points)?;
        }
        if let Some(kernel) = &self.kernel {
            image = apply_filter(&image, kernel)?;
        }
        Ok(image)
    }
}

pub fn run(args: BatchArgs, verbose: u8) -> Result<()> {
    trace!(pattern = %args.input, "batch::run");

    let chain = Chain {
        fit: args.fit,
        curve: match (args.enter, args.exit) {
            (None, None) => None,
            (enter, exit) => Some(super::curve_points(
                enter.unwrap_or((0, 0)),
                exit.unwrap_or((255, 255)),
            )?),
        },
        kernel: args
            .kind
            .as_deref()
            .map(|k| super::kernel_from_name(k, args.size, args.sigma, args.amount))
            .transpose()?,
    };
    if chain.fit.is_none() && chain.curve.is_none() && chain.kernel.is_none() {
        bail!("Nothing to do: specify --fit, --enter/--exit or --type");
    }

    // Find matching files
    let files: Vec<PathBuf> = glob::glob(&args.input)
        .with_context(|| format!("Invalid pattern: {}", args.input))?
        .filter_map(|r| r.ok())
        .collect();

    if files.is_empty() {
        bail!("No files match pattern: {}", args.input);
    }

    info!(files = files.len(), pattern = %args.input, "Starting batch processing");
    if verbose > 0 {
        println!("Found {} files matching '{}'", files.len(), args.input);
    }

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create: {}", args.output_dir.display()))?;

    let failures: Vec<(PathBuf, anyhow::Error)> = files
        .par_iter()
        .filter_map(|path| {
            process_one(path, &args.output_dir, &chain)
                .err()
                .map(|e| (path.clone(), e))
        })
        .collect();

    for (path, err) in &failures {
        warn!(path = %path.display(), "batch item failed: {err:#}");
        eprintln!("  {}: {:#}", path.display(), err);
    }

    let ok = files.len() - failures.len();
    if verbose > 0 {
        println!("Processed {}/{} files", ok, files.len());
    }
    if !failures.is_empty() {
        bail!("{} of {} files failed", failures.len(), files.len());
    }
    Ok(())
}

fn process_one(path: &Path, output_dir: &Path, chain: &Chain) -> Result<()> {
    let name = path
        .file_name()
        .with_context(|| format!("No file name: {}", path.display()))?;
    let image = super::load_image(path)?;
    let edited = chain.apply(image)?;
    super::save_image(&output_dir.join(name), &edited)
}
