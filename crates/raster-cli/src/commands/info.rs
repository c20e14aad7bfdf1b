//! Image info command.
//!
//! Prints dimensions, file size and a short per-channel histogram summary.

use crate::InfoArgs;
use anyhow::Result;
use raster_core::Channel;
use raster_ops::Histogram;
use std::fs;
use std::path::Path;

/// Runs the info command.
///
/// With `-v` the histogram peak and mean are shown per channel.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)?.len();
        let image = super::load_image(path)?;
        print_text(path, &image, file_size, verbose);

        if args.input.len() > 1 {
            println!();
        }
    }
    Ok(())
}

fn print_text(path: &Path, image: &raster_core::PixelBuffer, file_size: u64, verbose: u8) {
    println!("{}", path.display());
    println!("  Resolution: {}x{}", image.width(), image.height());
    println!("  Pixels:     {}", image.pixel_count());
    println!("  File size:  {}", format_size(file_size));

    let hist = Histogram::build(image);
    for channel in Channel::RGB {
        let Some(bins) = hist.channel(channel) else {
            continue;
        };
        let (min, max) = value_range(bins);
        print!("  {:<6}      min {:>3}  max {:>3}", channel.label(), min, max);
        if verbose > 0 {
            let peak = hist.peak(channel).unwrap_or(0);
            print!("  peak {:>3}  mean {:>6.2}", peak, mean(bins, hist.total(channel)));
        }
        println!();
    }
}

/// Lowest and highest observed value.
fn value_range(bins: &[u64; 256]) -> (usize, usize) {
    let min = bins.iter().position(|&c| c > 0).unwrap_or(0);
    let max = bins.iter().rposition(|&c| c > 0).unwrap_or(0);
    (min, max)
}

fn mean(bins: &[u64; 256], total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let sum: u64 = bins
        .iter()
        .enumerate()
        .map(|(v, &c)| v as u64 * c)
        .sum();
    sum as f64 / total as f64
}

/// Format file size for display
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
