//! Raster - the decoded image container
//!
//! A `Raster` holds a decoded image as a flat sequence of 8-bit RGBA
//! samples with known width and height. It is the only pixel format the
//! statistics engine operates on; the decode boundary is responsible for
//! expanding whatever the source file contained into this layout.
//!
//! # Sample layout
//!
//! - Samples are interleaved `R, G, B, A`, four bytes per pixel
//! - Rows are packed with no padding: row `y` starts at `y * width * 4`
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for efficient cloning (shared ownership). To modify
//! sample data, convert to [`RasterMut`] via [`Raster::try_into_mut`] or
//! [`Raster::to_mut`], then convert back with `Into<Raster>`. A session's
//! original raster is never mutated; every transform allocates a fresh
//! output raster.

pub mod equalize;
pub mod histogram;
pub mod normalize;

use crate::error::{Error, Result};
use crate::luma;
use std::sync::Arc;

/// Internal raster data
#[derive(Debug)]
struct RasterData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Interleaved RGBA samples, length = width * height * 4
    samples: Vec<u8>,
}

impl RasterData {
    #[inline]
    fn sample_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * luma::CHANNELS
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * luma::CHANNELS
    }
}

/// Decoded image as width, height, and interleaved RGBA samples.
///
/// Uses reference counting via `Arc` for cheap cloning.
///
/// # Examples
///
/// ```
/// use pixelstat_core::Raster;
///
/// let raster = Raster::new(640, 480).unwrap();
/// assert_eq!(raster.width(), 640);
/// assert_eq!(raster.height(), 480);
/// assert_eq!(raster.samples().len(), 640 * 480 * 4);
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new raster with all samples zero (transparent black).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let samples = vec![0u8; RasterData::sample_len(width, height)];
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                samples,
            }),
        })
    }

    /// Create a raster from an existing sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension, or
    /// [`Error::BufferSizeMismatch`] if `samples.len()` is not
    /// `width * height * 4`.
    pub fn from_samples(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = RasterData::sample_len(width, height);
        if samples.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                samples,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> u64 {
        self.inner.width as u64 * self.inner.height as u64
    }

    /// Raw access to the interleaved RGBA samples.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.inner.samples
    }

    /// Get the samples of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.inner.width as usize * luma::CHANNELS;
        let start = y as usize * stride;
        &self.inner.samples[start..start + stride]
    }

    /// Get one pixel as an `(r, g, b, a)` tuple, or `None` out of bounds.
    #[inline]
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.get_rgba_unchecked(x, y))
    }

    /// Get one pixel without a bounds check.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the raster.
    #[inline]
    pub fn get_rgba_unchecked(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let i = self.inner.offset(x, y);
        let s = &self.inner.samples;
        (s[i], s[i + 1], s[i + 2], s[i + 3])
    }

    /// Check if two rasters have the same width and height.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Get the number of strong references to this raster.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Create a completely independent copy.
    ///
    /// Unlike `clone()` which shares data via `Arc`, this duplicates the
    /// sample buffer.
    pub fn deep_clone(&self) -> Self {
        Raster {
            inner: Arc::new(RasterData {
                width: self.inner.width,
                height: self.inner.height,
                samples: self.inner.samples.clone(),
            }),
        }
    }

    /// Try to get mutable access to the sample data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a mutable copy of this raster.
    ///
    /// Always allocates a new sample buffer that can be modified.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: RasterData {
                width: self.inner.width,
                height: self.inner.height,
                samples: self.inner.samples.clone(),
            },
        }
    }
}

/// Mutable raster
///
/// Allows modification of sample data. Convert back to an immutable
/// [`Raster`] using `Into<Raster>`. Exclusive access is enforced at
/// compile time.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Raw access to the sample data.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.inner.samples
    }

    /// Mutable access to the sample data.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.inner.samples
    }

    /// Set one pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinate is outside the
    /// raster.
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.inner.width,
                height: self.inner.height,
            });
        }
        self.set_rgba_unchecked(x, y, r, g, b, a);
        Ok(())
    }

    /// Set one pixel without a bounds check.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the raster.
    #[inline]
    pub fn set_rgba_unchecked(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) {
        let i = self.inner.offset(x, y);
        let s = &mut self.inner.samples;
        s[i] = r;
        s[i + 1] = g;
        s[i + 2] = b;
        s[i + 3] = a;
    }

    /// Get one pixel as an `(r, g, b, a)` tuple, or `None` out of bounds.
    #[inline]
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        let i = self.inner.offset(x, y);
        let s = &self.inner.samples;
        Some((s[i], s[i + 1], s[i + 2], s[i + 3]))
    }

    /// Set every pixel to the given color.
    pub fn fill_rgba(&mut self, r: u8, g: u8, b: u8, a: u8) {
        for pixel in self.inner.samples.chunks_exact_mut(luma::CHANNELS) {
            pixel[luma::RED] = r;
            pixel[luma::GREEN] = g;
            pixel[luma::BLUE] = b;
            pixel[luma::ALPHA] = a;
        }
    }
}

impl From<RasterMut> for Raster {
    fn from(raster_mut: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster_mut.inner),
        }
    }
}
