//! Error types for pixelstat-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.
//!
//! Degenerate numeric cases inside the statistics engine (uniform images,
//! single-bin histograms) are *not* errors; they are resolved locally with
//! documented fallbacks so the engine never produces NaN or out-of-range
//! sample values.

use thiserror::Error;

/// Pixelstat error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Sample buffer length does not match the stated dimensions
    #[error("sample buffer length mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Coordinate outside the raster
    #[error("coordinate out of bounds: ({x}, {y}) in {width}x{height}")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    /// Target range with min above max
    #[error("invalid target range: [{min}, {max}]")]
    InvalidRange { min: u8, max: u8 },

    /// A transform or histogram was requested before any image was loaded
    #[error("no image loaded")]
    NoImage,
}

/// Result type alias for pixelstat operations
pub type Result<T> = std::result::Result<T, Error>;
