//! Pixelstat - local pixel statistics for image preprocessing
//!
//! The in-process statistics engine behind a browser-based image
//! preprocessing tool: intensity histograms, linear min-max
//! normalization, and CDF-based histogram equalization over decoded
//! 8-bit RGBA samples, plus the decode/encode boundary that produces
//! and consumes those samples.
//!
//! # Example
//!
//! ```
//! use pixelstat::{Raster, Session, TargetRange};
//!
//! let mut session = Session::new();
//! session.load(Raster::new(16, 16).unwrap());
//!
//! // Stretch the observed luminance range onto [0, 255]
//! let stretched = session.normalize(TargetRange::FULL).unwrap();
//! assert_eq!(stretched.width(), 16);
//!
//! // The session histogram now reflects the stretched raster
//! assert!(session.histogram().is_ok());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixelstat_core::*;

// Re-export the boundary crate as a module
pub use pixelstat_io as io;
