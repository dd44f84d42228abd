//! Linear min-max normalization
//!
//! Rescales sample intensities from the observed luminance range of the
//! input into a caller-specified target range. The source range is always
//! measured fresh from the input raster, never supplied by the caller.

use super::Raster;
use crate::error::{Error, Result};
use crate::luma;

/// Caller-specified output range for normalization.
///
/// Both bounds are inclusive; construction rejects `min > max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRange {
    min: u8,
    max: u8,
}

impl TargetRange {
    /// The full 8-bit range `[0, 255]`.
    pub const FULL: TargetRange = TargetRange { min: 0, max: 255 };

    /// Create a target range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `min > max`.
    pub fn new(min: u8, max: u8) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidRange { min, max });
        }
        Ok(TargetRange { min, max })
    }

    /// Lower bound of the range.
    #[inline]
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Upper bound of the range.
    #[inline]
    pub fn max(&self) -> u8 {
        self.max
    }
}

impl Default for TargetRange {
    fn default() -> Self {
        TargetRange::FULL
    }
}

impl Raster {
    /// Observed luminance minimum and maximum of this raster.
    pub fn luma_extrema(&self) -> (u8, u8) {
        let mut min = 255u8;
        let mut max = 0u8;
        for pixel in self.samples().chunks_exact(luma::CHANNELS) {
            let l = luma::luminance_of(pixel);
            min = min.min(l);
            max = max.max(l);
        }
        (min, max)
    }

    /// Linearly rescale this raster's color samples into `range`.
    ///
    /// The source interval is the observed luminance min/max of `self`;
    /// every R, G, B sample is mapped through
    /// `(v - src_min) / (src_max - src_min) * (max - min) + min`, rounded
    /// and clamped to `[0, 255]`. Alpha is copied unchanged. The mapping
    /// is order-preserving: samples that compare `<=` in the input
    /// compare `<=` in the output.
    ///
    /// A uniform input (`src_min == src_max`) has no defined scale, so
    /// every color sample becomes `range.min()` instead of dividing by
    /// zero.
    ///
    /// Returns a new raster of identical dimensions; `self` is untouched.
    pub fn normalize_to(&self, range: TargetRange) -> Raster {
        let (src_min, src_max) = self.luma_extrema();
        let lut = range_lut(src_min, src_max, range);

        let mut out = self.to_mut();
        for pixel in out.samples_mut().chunks_exact_mut(luma::CHANNELS) {
            pixel[luma::RED] = lut[pixel[luma::RED] as usize];
            pixel[luma::GREEN] = lut[pixel[luma::GREEN] as usize];
            pixel[luma::BLUE] = lut[pixel[luma::BLUE] as usize];
        }
        out.into()
    }
}

/// Build the 256-entry map from source interval to target interval.
///
/// Channel values outside `[src_min, src_max]` (possible because the
/// source interval is measured on luminance, not raw channels) clamp to
/// the range bounds.
fn range_lut(src_min: u8, src_max: u8, range: TargetRange) -> [u8; 256] {
    let mut lut = [0u8; 256];

    if src_min == src_max {
        lut.fill(range.min());
        return lut;
    }

    let src_span = (src_max - src_min) as f32;
    let target_span = (range.max() - range.min()) as f32;
    for (v, entry) in lut.iter_mut().enumerate() {
        let mapped =
            (v as f32 - src_min as f32) / src_span * target_span + range.min() as f32;
        *entry = (mapped + 0.5).clamp(0.0, 255.0) as u8;
    }
    lut
}
