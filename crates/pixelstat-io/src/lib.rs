//! Pixelstat IO - the decode/encode boundary
//!
//! Turns encoded image bytes into the core [`Raster`] type and back.
//! The format is sniffed from magic numbers, never from file extensions.
//! Decode failures are surfaced to the caller and never retried; no
//! raster is produced on error.
//!
//! PNG is the lossless path: `encode_image` followed by `decode_image`
//! preserves width, height, and every RGBA sample exactly. JPEG is lossy
//! and only guarantees dimensions.
//!
//! # Example
//!
//! ```
//! use pixelstat_core::Raster;
//! use pixelstat_io::{ImageFormat, decode_image, encode_image};
//!
//! let raster = Raster::new(4, 4).unwrap();
//! let bytes = encode_image(&raster, ImageFormat::Png).unwrap();
//! let decoded = decode_image(&bytes).unwrap();
//! assert_eq!(decoded.samples(), raster.samples());
//! ```

mod error;
mod format;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use pixelstat_core::Raster;
use std::path::Path;

/// Decode encoded image bytes into an RGBA raster.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for unrecognized or disabled
/// formats, or a decode error if the data is malformed.
pub fn decode_image(data: &[u8]) -> IoResult<Raster> {
    match detect_format_from_bytes(data)? {
        ImageFormat::Png => {
            #[cfg(feature = "png-format")]
            {
                png::read_png(std::io::Cursor::new(data))
            }
            #[cfg(not(feature = "png-format"))]
            {
                Err(IoError::UnsupportedFormat(
                    "PNG support not enabled".to_string(),
                ))
            }
        }
        ImageFormat::Jpeg => {
            #[cfg(feature = "jpeg")]
            {
                jpeg::read_jpeg(std::io::Cursor::new(data))
            }
            #[cfg(not(feature = "jpeg"))]
            {
                Err(IoError::UnsupportedFormat(
                    "JPEG support not enabled".to_string(),
                ))
            }
        }
        ImageFormat::Pnm => {
            #[cfg(feature = "pnm")]
            {
                pnm::read_pnm(std::io::Cursor::new(data))
            }
            #[cfg(not(feature = "pnm"))]
            {
                Err(IoError::UnsupportedFormat(
                    "PNM support not enabled".to_string(),
                ))
            }
        }
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(
            "unknown image format".to_string(),
        )),
    }
}

/// Encode a raster into the given format.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for `Unknown` or disabled
/// formats, or an encode error from the codec.
pub fn encode_image(raster: &Raster, format: ImageFormat) -> IoResult<Vec<u8>> {
    match format {
        ImageFormat::Png => {
            #[cfg(feature = "png-format")]
            {
                let mut out = Vec::new();
                png::write_png(raster, &mut out)?;
                Ok(out)
            }
            #[cfg(not(feature = "png-format"))]
            {
                Err(IoError::UnsupportedFormat(
                    "PNG support not enabled".to_string(),
                ))
            }
        }
        ImageFormat::Jpeg => {
            #[cfg(feature = "jpeg")]
            {
                jpeg::encode_jpeg(raster, jpeg::DEFAULT_QUALITY)
            }
            #[cfg(not(feature = "jpeg"))]
            {
                Err(IoError::UnsupportedFormat(
                    "JPEG support not enabled".to_string(),
                ))
            }
        }
        ImageFormat::Pnm => {
            #[cfg(feature = "pnm")]
            {
                let mut out = Vec::new();
                pnm::write_pnm(raster, &mut out)?;
                Ok(out)
            }
            #[cfg(not(feature = "pnm"))]
            {
                Err(IoError::UnsupportedFormat(
                    "PNM support not enabled".to_string(),
                ))
            }
        }
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(
            "cannot encode to unknown format".to_string(),
        )),
    }
}

/// Read an image from a file path
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let data = std::fs::read(path).map_err(IoError::Io)?;
    decode_image(&data)
}

/// Write an image to a file path in the given format
pub fn write_image<P: AsRef<Path>>(raster: &Raster, path: P, format: ImageFormat) -> IoResult<()> {
    let bytes = encode_image(raster, format)?;
    std::fs::write(path, bytes).map_err(IoError::Io)?;
    Ok(())
}
