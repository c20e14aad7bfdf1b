//! Per-channel intensity histograms.
//!
//! [`Histogram::build`] scans a buffer once and counts every R, G and B
//! value. Every occurrence counts, including the first one, so each
//! channel's table sums to `width * height`.
//!
//! The editing dialog draws all three channels into one chart. Bars are
//! normalized against the largest count across all channels, so the
//! tallest bar of any channel reaches the full chart height:
//!
//! ```rust
//! use raster_core::PixelBuffer;
//! use raster_ops::histogram::Histogram;
//!
//! let buf = PixelBuffer::filled(4, 4, [10, 20, 30, 255]).unwrap();
//! let hist = Histogram::build(&buf);
//! assert_eq!(hist.r[10], 16);
//!
//! let bars = hist.bar_heights(256);
//! assert_eq!(bars.b[30], 256);
//! ```

use raster_core::{CHANNELS, Channel, PixelBuffer};
use tracing::trace;

/// Number of intensity bins per channel.
pub const BINS: usize = 256;

/// Chart height used by the curves dialog.
pub const DEFAULT_CHART_HEIGHT: u32 = 256;

/// Occurrence counts for the three color channels.
///
/// Counts are `u64`: a single-valued image wider and taller than 65535
/// pixels would overflow a `u32` bin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Red channel counts, indexed by intensity.
    pub r: [u64; BINS],
    /// Green channel counts.
    pub g: [u64; BINS],
    /// Blue channel counts.
    pub b: [u64; BINS],
}

/// Per-bin bar heights, one table per color channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramBars {
    /// Red bar heights.
    pub r: [u32; BINS],
    /// Green bar heights.
    pub g: [u32; BINS],
    /// Blue bar heights.
    pub b: [u32; BINS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            r: [0; BINS],
            g: [0; BINS],
            b: [0; BINS],
        }
    }
}

impl Histogram {
    /// Counts every channel value of `buf`.
    pub fn build(buf: &PixelBuffer) -> Self {
        let mut hist = Self::default();
        for px in buf.pixels().chunks_exact(CHANNELS) {
            hist.r[px[0] as usize] += 1;
            hist.g[px[1] as usize] += 1;
            hist.b[px[2] as usize] += 1;
        }
        trace!(
            pixels = buf.pixel_count(),
            max = hist.max_count(),
            "histogram built"
        );
        hist
    }

    /// Table for one color channel. Alpha is not tracked and yields `None`.
    pub fn channel(&self, channel: Channel) -> Option<&[u64; BINS]> {
        match channel {
            Channel::Red => Some(&self.r),
            Channel::Green => Some(&self.g),
            Channel::Blue => Some(&self.b),
            Channel::Alpha => None,
        }
    }

    /// Sum of all counts of one channel (`0` for alpha).
    pub fn total(&self, channel: Channel) -> u64 {
        self.channel(channel)
            .map(|bins| bins.iter().sum())
            .unwrap_or(0)
    }

    /// Largest count across all three channels.
    pub fn max_count(&self) -> u64 {
        self.r
            .iter()
            .chain(self.g.iter())
            .chain(self.b.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// Intensity with the highest count in `channel`, lowest value on ties.
    pub fn peak(&self, channel: Channel) -> Option<u8> {
        let bins = self.channel(channel)?;
        let (value, &count) = bins
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| a.cmp(b).then(ib.cmp(ia)))?;
        (count > 0).then_some(value as u8)
    }

    /// Bar heights scaled so the largest count maps to `full_height`.
    ///
    /// Heights are `floor(count * full_height / max_count)`, computed in
    /// `u128` so the product cannot overflow. An empty histogram produces
    /// all-zero bars.
    pub fn bar_heights(&self, full_height: u32) -> HistogramBars {
        let max = u128::from(self.max_count());
        let scale = |bins: &[u64; BINS]| -> [u32; BINS] {
            let mut out = [0u32; BINS];
            if max == 0 {
                return out;
            }
            for (h, &count) in out.iter_mut().zip(bins.iter()) {
                // count <= max, so the quotient fits in full_height
                *h = (u128::from(count) * u128::from(full_height) / max) as u32;
            }
            out
        };
        HistogramBars {
            r: scale(&self.r),
            g: scale(&self.g),
            b: scale(&self.b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_occurrence_counts_one() {
        let buf = PixelBuffer::new(2, 1, vec![1, 2, 3, 255, 4, 5, 6, 255]).unwrap();
        let hist = Histogram::build(&buf);
        assert_eq!(hist.r[1], 1);
        assert_eq!(hist.r[4], 1);
        assert_eq!(hist.g[5], 1);
        assert_eq!(hist.b[3], 1);
        assert_eq!(hist.r[0], 0);
    }

    #[test]
    fn test_sum_matches_pixel_count() {
        let buf = PixelBuffer::from_fn(17, 11, |x, y| {
            [(x * 13) as u8, (y * 29) as u8, (x ^ y) as u8, 0]
        })
        .unwrap();
        let hist = Histogram::build(&buf);
        for ch in Channel::RGB {
            assert_eq!(hist.total(ch), 17 * 11);
        }
        assert_eq!(hist.total(Channel::Alpha), 0);
    }

    #[test]
    fn test_bar_heights_normalize_across_channels() {
        // red: 3x value 0, 1x value 255; green all 7; blue all 9
        let buf = PixelBuffer::new(
            4,
            1,
            vec![0, 7, 9, 255, 0, 7, 9, 255, 0, 7, 9, 255, 255, 7, 9, 255],
        )
        .unwrap();
        let hist = Histogram::build(&buf);
        assert_eq!(hist.max_count(), 4);

        let bars = hist.bar_heights(256);
        assert_eq!(bars.g[7], 256);
        assert_eq!(bars.b[9], 256);
        assert_eq!(bars.r[0], 192);
        assert_eq!(bars.r[255], 64);
        assert_eq!(bars.r[100], 0);
    }

    #[test]
    fn test_counts_beyond_u32() {
        let big = u64::from(u32::MAX) + 10;
        let mut hist = Histogram::default();
        hist.r[0] = big;
        hist.r[255] = big / 2;
        hist.g[128] = big + big / 2;
        hist.b[1] = 1;

        assert_eq!(hist.total(Channel::Red), big + big / 2);
        assert_eq!(hist.max_count(), big + big / 2);
        assert_eq!(hist.peak(Channel::Green), Some(128));

        let bars = hist.bar_heights(u32::MAX);
        assert_eq!(bars.g[128], u32::MAX);
        assert_eq!(
            u64::from(bars.r[0]),
            (u128::from(big) * u128::from(u32::MAX) / u128::from(big + big / 2)) as u64
        );
        assert_eq!(bars.b[1], 0);
    }

    #[test]
    fn test_empty_histogram_bars() {
        let bars = Histogram::default().bar_heights(DEFAULT_CHART_HEIGHT);
        assert!(bars.r.iter().all(|&h| h == 0));
    }

    #[test]
    fn test_peak() {
        let buf = PixelBuffer::from_fn(3, 1, |x, _| [if x == 0 { 5 } else { 9 }, 1, 1, 255]).unwrap();
        let hist = Histogram::build(&buf);
        assert_eq!(hist.peak(Channel::Red), Some(9));
        assert_eq!(hist.peak(Channel::Green), Some(1));
        assert_eq!(hist.peak(Channel::Alpha), None);
        assert_eq!(Histogram::default().peak(Channel::Blue), None);
    }
}
