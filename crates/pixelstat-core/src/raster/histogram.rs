//! Histogram generation for rasters
//!
//! Derives 256-bin frequency distributions from the decoded samples,
//! either a single luminance histogram or three independent per-channel
//! histograms. Both are deterministic single passes over the pixels with
//! no side effects; the sum over all bins of any returned array equals
//! the pixel count exactly.

use super::Raster;
use crate::luma;
use std::ops::Index;

/// A 256-bin frequency distribution for one intensity channel.
///
/// Bin `i` counts the pixels whose channel value (or luminance) is `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelHistogram {
    bins: [u64; 256],
}

impl ChannelHistogram {
    /// An empty histogram with every bin at zero.
    pub(crate) fn zeroed() -> Self {
        ChannelHistogram { bins: [0; 256] }
    }

    #[inline]
    pub(crate) fn record(&mut self, value: u8) {
        self.bins[value as usize] += 1;
    }

    /// All 256 bins.
    #[inline]
    pub fn bins(&self) -> &[u64; 256] {
        &self.bins
    }

    /// Total count over all bins.
    ///
    /// For a histogram produced from a raster this equals the raster's
    /// pixel count.
    pub fn sum(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Lowest populated bin, or `None` if every bin is empty.
    pub fn min_value(&self) -> Option<u8> {
        self.bins.iter().position(|&c| c > 0).map(|i| i as u8)
    }

    /// Highest populated bin, or `None` if every bin is empty.
    pub fn max_value(&self) -> Option<u8> {
        self.bins.iter().rposition(|&c| c > 0).map(|i| i as u8)
    }

    /// Cumulative distribution: `cdf[i]` is the count of pixels with
    /// value `<= i`. Non-decreasing by construction; `cdf[255]` equals
    /// [`ChannelHistogram::sum`].
    pub fn cumulative(&self) -> [u64; 256] {
        let mut cdf = [0u64; 256];
        let mut running = 0u64;
        for (i, &count) in self.bins.iter().enumerate() {
            running += count;
            cdf[i] = running;
        }
        cdf
    }
}

impl Index<usize> for ChannelHistogram {
    type Output = u64;

    fn index(&self, index: usize) -> &u64 {
        &self.bins[index]
    }
}

/// RGB channel histograms
///
/// Contains separate 256-bin histograms for red, green, and blue channels,
/// computed from the raw channel samples with no weighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorHistogram {
    /// Red channel histogram (256 bins)
    pub red: ChannelHistogram,
    /// Green channel histogram (256 bins)
    pub green: ChannelHistogram,
    /// Blue channel histogram (256 bins)
    pub blue: ChannelHistogram,
}

/// Which distribution to compute for a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistogramMode {
    /// One weighted luminance histogram
    #[default]
    Luminance,
    /// Three independent R, G, B histograms
    PerChannel,
}

/// Either shape of computed distribution, as selected by a
/// [`HistogramMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Histogram {
    /// Single luminance distribution
    Luma(ChannelHistogram),
    /// Independent per-channel distributions
    Rgb(ColorHistogram),
}

impl Raster {
    /// Compute the luminance histogram.
    ///
    /// Each pixel contributes one count to the bin of its luminance
    /// (see [`luma::luminance`]).
    ///
    /// # Example
    ///
    /// ```
    /// use pixelstat_core::Raster;
    ///
    /// let raster = Raster::new(100, 100).unwrap();
    /// let hist = raster.luma_histogram();
    /// assert_eq!(hist.sum(), 100 * 100);
    /// ```
    pub fn luma_histogram(&self) -> ChannelHistogram {
        let mut hist = ChannelHistogram::zeroed();
        for pixel in self.samples().chunks_exact(luma::CHANNELS) {
            hist.record(luma::luminance_of(pixel));
        }
        hist
    }

    /// Compute independent red, green, and blue histograms.
    ///
    /// Raw channel samples are binned directly; alpha is ignored.
    pub fn color_histogram(&self) -> ColorHistogram {
        let mut red = ChannelHistogram::zeroed();
        let mut green = ChannelHistogram::zeroed();
        let mut blue = ChannelHistogram::zeroed();
        for pixel in self.samples().chunks_exact(luma::CHANNELS) {
            red.record(pixel[luma::RED]);
            green.record(pixel[luma::GREEN]);
            blue.record(pixel[luma::BLUE]);
        }
        ColorHistogram { red, green, blue }
    }

    /// Compute the distribution selected by `mode`.
    pub fn histogram(&self, mode: HistogramMode) -> Histogram {
        match mode {
            HistogramMode::Luminance => Histogram::Luma(self.luma_histogram()),
            HistogramMode::PerChannel => Histogram::Rgb(self.color_histogram()),
        }
    }
}
