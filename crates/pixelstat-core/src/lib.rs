//! Pixelstat Core - local statistics engine for decoded raster images
//!
//! This crate provides the in-process part of an image preprocessing tool:
//! intensity histograms, linear min-max normalization, and histogram
//! equalization, all operating directly on decoded 8-bit RGBA samples.
//!
//! - [`Raster`] / [`RasterMut`] - the decoded image container (immutable /
//!   mutable)
//! - [`ChannelHistogram`] / [`ColorHistogram`] - 256-bin frequency
//!   distributions
//! - [`TargetRange`] - caller-supplied output range for normalization
//! - [`Session`] - per-image state: original raster, derived raster, and
//!   the current histogram
//!
//! Every transform reads from the original raster and allocates a fresh
//! output, so repeated parameter changes never compound.
//!
//! # Example
//!
//! ```
//! use pixelstat_core::{Raster, TargetRange};
//!
//! let raster = Raster::new(640, 480).unwrap();
//! let stretched = raster.normalize_to(TargetRange::FULL);
//! assert_eq!(stretched.width(), 640);
//! assert_eq!(stretched.height(), 480);
//! ```

pub mod error;
pub mod raster;
pub mod session;

pub use error::{Error, Result};
pub use raster::equalize::{LumaLut, equalize_lut};
pub use raster::histogram::{ChannelHistogram, ColorHistogram, Histogram, HistogramMode};
pub use raster::normalize::TargetRange;
pub use raster::{Raster, RasterMut};
pub use session::Session;

/// Channel byte offsets and luminance weighting for interleaved RGBA
/// samples.
///
/// # Sample layout
///
/// Samples are stored as flat `[R, G, B, A, R, G, B, A, ...]` bytes in
/// row-major order, four bytes per pixel.
pub mod luma {
    /// Red channel (byte 0 of each pixel)
    pub const RED: usize = 0;
    /// Green channel (byte 1)
    pub const GREEN: usize = 1;
    /// Blue channel (byte 2)
    pub const BLUE: usize = 2;
    /// Alpha channel (byte 3)
    pub const ALPHA: usize = 3;

    /// Bytes per pixel
    pub const CHANNELS: usize = 4;

    /// Rec. 601 red weight
    pub const WEIGHT_RED: f32 = 0.299;
    /// Rec. 601 green weight
    pub const WEIGHT_GREEN: f32 = 0.587;
    /// Rec. 601 blue weight
    pub const WEIGHT_BLUE: f32 = 0.114;

    /// Perceptual brightness of an RGB triple.
    ///
    /// Computes `0.299*R + 0.587*G + 0.114*B`, rounded to the nearest
    /// integer and clamped to `[0, 255]`.
    #[inline]
    pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
        let val =
            WEIGHT_RED * r as f32 + WEIGHT_GREEN * g as f32 + WEIGHT_BLUE * b as f32;
        (val + 0.5).clamp(0.0, 255.0) as u8
    }

    /// Luminance of one interleaved RGBA pixel.
    ///
    /// # Panics
    ///
    /// Panics if `pixel` is shorter than 3 bytes.
    #[inline]
    pub fn luminance_of(pixel: &[u8]) -> u8 {
        luminance(pixel[RED], pixel[GREEN], pixel[BLUE])
    }

}
