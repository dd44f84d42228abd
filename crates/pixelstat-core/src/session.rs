//! Session state for one loaded image
//!
//! A `Session` is the explicit context object a caller threads through
//! the engine: the immutable original raster, at most one derived raster,
//! the histogram mode, and the distribution of whichever raster is
//! current. Transforms always read from the original, so changing a
//! parameter and re-running never compounds earlier results.
//!
//! Execution is single-threaded and synchronous per call. Each transform
//! is a pure function from the immutable original to a fresh output, so
//! no locking exists or is needed; discarding a result is the only form
//! of cancellation.

use crate::error::{Error, Result};
use crate::raster::Raster;
use crate::raster::histogram::{Histogram, HistogramMode};
use crate::raster::normalize::TargetRange;

/// Per-image engine state owned by the caller.
///
/// # Example
///
/// ```
/// use pixelstat_core::{Raster, Session, TargetRange};
///
/// let mut session = Session::new();
/// session.load(Raster::new(8, 8).unwrap());
/// let stretched = session.normalize(TargetRange::FULL).unwrap();
/// assert!(session.current().unwrap().sizes_equal(&stretched));
/// ```
#[derive(Debug, Default)]
pub struct Session {
    original: Option<Raster>,
    derived: Option<Raster>,
    mode: HistogramMode,
    histogram: Option<Histogram>,
}

impl Session {
    /// Create an empty session with luminance histogram mode.
    pub fn new() -> Self {
        Session::default()
    }

    /// Create an empty session with the given histogram mode.
    pub fn with_mode(mode: HistogramMode) -> Self {
        Session {
            mode,
            ..Session::default()
        }
    }

    /// Install a freshly decoded raster as the original image.
    ///
    /// Drops any derived raster and recomputes the histogram.
    pub fn load(&mut self, raster: Raster) {
        self.original = Some(raster);
        self.derived = None;
        self.refresh_histogram();
    }

    /// The original raster, if an image is loaded.
    pub fn original(&self) -> Option<&Raster> {
        self.original.as_ref()
    }

    /// The raster a viewer should display: the derived raster if a
    /// transform has run, otherwise the original.
    pub fn current(&self) -> Option<&Raster> {
        self.derived.as_ref().or(self.original.as_ref())
    }

    /// The active histogram mode.
    pub fn mode(&self) -> HistogramMode {
        self.mode
    }

    /// Switch histogram mode and recompute for the current raster.
    pub fn set_mode(&mut self, mode: HistogramMode) {
        self.mode = mode;
        self.refresh_histogram();
    }

    /// The distribution of the current raster.
    ///
    /// Recomputed whenever the current raster changes; only the bin-count
    /// invariant is guaranteed to consumers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoImage`] if no image is loaded.
    pub fn histogram(&self) -> Result<&Histogram> {
        self.histogram.as_ref().ok_or(Error::NoImage)
    }

    /// Normalize the original raster into `range` and make the result
    /// current.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoImage`] if no image is loaded.
    pub fn normalize(&mut self, range: TargetRange) -> Result<Raster> {
        let original = self.original.as_ref().ok_or(Error::NoImage)?;
        let out = original.normalize_to(range);
        self.derived = Some(out.clone());
        self.refresh_histogram();
        Ok(out)
    }

    /// Equalize the original raster's luminance distribution and make the
    /// result current.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoImage`] if no image is loaded.
    pub fn equalize(&mut self) -> Result<Raster> {
        let original = self.original.as_ref().ok_or(Error::NoImage)?;
        let out = original.equalize();
        self.derived = Some(out.clone());
        self.refresh_histogram();
        Ok(out)
    }

    /// Discard the derived raster and return to the original image.
    pub fn reset(&mut self) {
        self.derived = None;
        self.refresh_histogram();
    }

    fn refresh_histogram(&mut self) {
        self.histogram = self.current().map(|r| r.histogram(self.mode));
    }
}
