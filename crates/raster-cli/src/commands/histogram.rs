//! Histogram command
//!
//! Prints one line per bin: `value r g b`, either raw counts or chart bar
//! heights scaled so the tallest bin across channels reaches `--bars`.

use crate::HistogramArgs;
use anyhow::Result;
use raster_ops::Histogram;

pub fn run(args: HistogramArgs) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let hist = Histogram::build(&image);

    let (r, g, b) = match args.bars {
        Some(height) => {
            let bars = hist.bar_heights(height);
            (bars.r.map(u64::from), bars.g.map(u64::from), bars.b.map(u64::from))
        }
        None => (hist.r, hist.g, hist.b),
    };

    println!("# value r g b");
    for v in 0..r.len() {
        if args.nonzero && hist.r[v] == 0 && hist.g[v] == 0 && hist.b[v] == 0 {
            continue;
        }
        println!("{} {} {} {}", v, r[v], g[v], b[v]);
    }
    Ok(())
}
