//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. JPEG is lossy: the boundary only guarantees that
//! dimensions survive a round trip, not exact sample values.

use crate::{IoError, IoResult};
use jpeg_decoder::PixelFormat;
use jpeg_encoder::{ColorType, Encoder};
use pixelstat_core::Raster;
use std::io::Read;

/// Default encode quality (1-100)
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image into an RGBA raster.
///
/// 8-bit grayscale and 24-bit RGB streams are supported; alpha is set
/// to 255 everywhere.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Raster> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG image info".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let mut samples = Vec::with_capacity(width as usize * height as usize * 4);

    match info.pixel_format {
        PixelFormat::L8 => {
            for &g in &data {
                samples.extend_from_slice(&[g, g, g, 255]);
            }
        }
        PixelFormat::RGB24 => {
            for rgb in data.chunks_exact(3) {
                samples.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
            }
        }
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    }

    Raster::from_samples(width, height, samples).map_err(IoError::Core)
}

/// Encode a raster as a JPEG byte stream.
///
/// # Arguments
///
/// * `raster` - The image to encode; alpha is discarded
/// * `quality` - Encode quality, 1 (worst) to 100 (best)
///
/// # Errors
///
/// Returns [`IoError::EncodeError`] if a dimension exceeds the JPEG
/// limit of 65535 or the encoder fails.
pub fn encode_jpeg(raster: &Raster, quality: u8) -> IoResult<Vec<u8>> {
    let width = u16::try_from(raster.width()).map_err(|_| {
        IoError::EncodeError(format!("width {} exceeds JPEG limit", raster.width()))
    })?;
    let height = u16::try_from(raster.height()).map_err(|_| {
        IoError::EncodeError(format!("height {} exceeds JPEG limit", raster.height()))
    })?;

    let mut out = Vec::new();
    let encoder = Encoder::new(&mut out, quality);
    encoder
        .encode(raster.samples(), width, height, ColorType::Rgba)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_jpeg_roundtrip_dimensions() {
        let mut rm = Raster::new(24, 16).unwrap().try_into_mut().unwrap();
        rm.fill_rgba(128, 128, 128, 255);
        let raster: Raster = rm.into();

        let encoded = encode_jpeg(&raster, DEFAULT_QUALITY).unwrap();
        let decoded = read_jpeg(Cursor::new(encoded)).unwrap();

        assert_eq!(decoded.width(), 24);
        assert_eq!(decoded.height(), 16);
        assert_eq!(decoded.samples().len(), raster.samples().len());
    }

    #[test]
    fn test_jpeg_uniform_image_stays_close() {
        // A flat midtone compresses to its DC component; decoded values
        // stay near the source even though JPEG is lossy.
        let mut rm = Raster::new(8, 8).unwrap().try_into_mut().unwrap();
        rm.fill_rgba(100, 100, 100, 255);
        let raster: Raster = rm.into();

        let encoded = encode_jpeg(&raster, DEFAULT_QUALITY).unwrap();
        let decoded = read_jpeg(Cursor::new(encoded)).unwrap();

        for pixel in decoded.samples().chunks_exact(4) {
            for &channel in &pixel[..3] {
                assert!((channel as i16 - 100).abs() <= 8, "channel {}", channel);
            }
            assert_eq!(pixel[3], 255);
        }
    }

    #[test]
    fn test_jpeg_rejects_garbage() {
        let garbage = b"definitely not a jpeg";
        assert!(read_jpeg(Cursor::new(&garbage[..])).is_err());
    }
}
