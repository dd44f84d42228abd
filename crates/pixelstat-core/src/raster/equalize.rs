//! Histogram equalization
//!
//! Builds a lookup table from the cumulative distribution of the
//! luminance histogram and applies it to reshape the intensity
//! distribution. The output is intentionally grayscale: the mapped
//! luminance is written into all three color channels, discarding the
//! original chromaticity. Alpha is preserved.

use super::Raster;
use super::histogram::ChannelHistogram;
use crate::luma;

/// A 256-entry lookup table mapping luminance to output intensity.
pub type LumaLut = [u8; 256];

/// Build the equalization lookup table from a luminance histogram.
///
/// With `cdf` the cumulative distribution of `hist`, `n` its total count
/// and `cdf_min` its first nonzero entry, each entry is
/// `round((cdf[i] - cdf_min) / (n - cdf_min) * 255)`. Entries below the
/// first populated bin map to 0.
///
/// The table is non-decreasing, a consequence of the CDF being
/// non-decreasing.
///
/// A histogram with a single populated bin (every pixel at the same
/// luminance, `n == cdf_min`) has no spread to redistribute; the table
/// collapses to all zeros rather than dividing by zero. An all-empty
/// histogram collapses the same way.
pub fn equalize_lut(hist: &ChannelHistogram) -> LumaLut {
    let mut lut = [0u8; 256];

    let n = hist.sum();
    let cdf = hist.cumulative();
    let cdf_min = match cdf.iter().copied().find(|&c| c > 0) {
        Some(c) => c,
        None => return lut,
    };
    if n == cdf_min {
        return lut;
    }

    let denom = (n - cdf_min) as f64;
    for (i, entry) in lut.iter_mut().enumerate() {
        let numer = cdf[i].saturating_sub(cdf_min) as f64;
        *entry = (numer / denom * 255.0 + 0.5) as u8;
    }
    lut
}

impl Raster {
    /// Equalize the luminance distribution of this raster.
    ///
    /// Computes the luminance histogram, derives the CDF lookup table via
    /// [`equalize_lut`], and writes `lut[luminance]` into the red, green,
    /// and blue channels of every pixel. Alpha is copied unchanged.
    ///
    /// Returns a new grayscale-valued raster of identical dimensions;
    /// `self` is untouched.
    pub fn equalize(&self) -> Raster {
        let lut = equalize_lut(&self.luma_histogram());

        let mut out = self.to_mut();
        for pixel in out.samples_mut().chunks_exact_mut(luma::CHANNELS) {
            let mapped = lut[luma::luminance_of(pixel) as usize];
            pixel[luma::RED] = mapped;
            pixel[luma::GREEN] = mapped;
            pixel[luma::BLUE] = mapped;
        }
        out.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_pixels(values: &[u8], width: u32, height: u32) -> Raster {
        assert_eq!(values.len() as u64, width as u64 * height as u64);
        let mut samples = Vec::with_capacity(values.len() * 4);
        for &v in values {
            samples.extend_from_slice(&[v, v, v, 255]);
        }
        Raster::from_samples(width, height, samples).unwrap()
    }

    #[test]
    fn test_lut_two_level_image() {
        // 8 pixels at luminance 0, 8 at 255
        let mut values = [0u8; 16];
        values[8..].fill(255);
        let raster = gray_pixels(&values, 4, 4);

        let lut = equalize_lut(&raster.luma_histogram());
        assert_eq!(lut[0], 0);
        assert_eq!(lut[255], 255);
        // Unpopulated middle bins carry the plateau of the lower level
        assert_eq!(lut[128], 0);
    }

    #[test]
    fn test_lut_is_monotone() {
        let values: Vec<u8> = (0..256).map(|i| (i * i % 256) as u8).collect();
        let raster = gray_pixels(&values, 16, 16);

        let lut = equalize_lut(&raster.luma_histogram());
        for i in 1..256 {
            assert!(lut[i] >= lut[i - 1], "lut not monotone at {i}");
        }
    }

    #[test]
    fn test_lut_spans_full_range() {
        let values: Vec<u8> = (0..64).map(|i| (i * 4) as u8).collect();
        let raster = gray_pixels(&values, 8, 8);

        let lut = equalize_lut(&raster.luma_histogram());
        // The darkest populated bin maps to 0, the brightest to 255
        assert_eq!(lut[0], 0);
        assert_eq!(lut[252], 255);
    }

    #[test]
    fn test_lut_single_bin_collapses_to_zero() {
        let raster = gray_pixels(&[128; 16], 4, 4);
        let lut = equalize_lut(&raster.luma_histogram());
        assert_eq!(lut, [0u8; 256]);
    }

    #[test]
    fn test_lut_empty_histogram() {
        let hist = ChannelHistogram::zeroed();
        assert_eq!(equalize_lut(&hist), [0u8; 256]);
    }

    #[test]
    fn test_equalize_output_is_grayscale() {
        let mut rm = Raster::new(2, 2).unwrap().try_into_mut().unwrap();
        rm.set_rgba_unchecked(0, 0, 200, 30, 90, 255);
        rm.set_rgba_unchecked(1, 0, 10, 80, 160, 128);
        rm.set_rgba_unchecked(0, 1, 0, 0, 0, 255);
        rm.set_rgba_unchecked(1, 1, 255, 255, 255, 255);
        let raster: Raster = rm.into();

        let out = raster.equalize();
        for pixel in out.samples().chunks_exact(4) {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
        }
        // Alpha preserved per pixel
        assert_eq!(out.get_rgba(1, 0).unwrap().3, 128);
    }

    #[test]
    fn test_equalize_two_level_image() {
        let mut values = [0u8; 16];
        values[8..].fill(255);
        let raster = gray_pixels(&values, 4, 4);

        let out = raster.equalize();
        let lut = equalize_lut(&raster.luma_histogram());
        for (pixel, &v) in out.samples().chunks_exact(4).zip(values.iter()) {
            assert_eq!(pixel[0], lut[v as usize]);
            assert_eq!(pixel[1], lut[v as usize]);
            assert_eq!(pixel[2], lut[v as usize]);
            assert_eq!(pixel[3], 255);
        }
    }

    #[test]
    fn test_equalize_uniform_image() {
        let raster = gray_pixels(&[77; 9], 3, 3);
        let out = raster.equalize();
        for pixel in out.samples().chunks_exact(4) {
            assert_eq!(pixel, &[0, 0, 0, 255]);
        }
    }

    #[test]
    fn test_equalize_source_untouched() {
        let raster = gray_pixels(&[5, 100, 180, 250], 2, 2);
        let before = raster.samples().to_vec();
        let _ = raster.equalize();
        assert_eq!(raster.samples(), &before[..]);
    }
}
