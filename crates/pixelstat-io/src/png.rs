//! PNG image format support
//!
//! PNG is the lossless path of the boundary: whatever raster is encoded
//! here decodes back with width, height, and every RGBA sample intact.
//! All PNG color types are expanded to 8-bit on decode; 16-bit channels
//! are narrowed to their high byte.

use crate::{IoError, IoResult};
use pixelstat_core::Raster;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image into an RGBA raster
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    // Expand palette and sub-byte grayscale to 8-bit, strip 16-bit to 8
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut samples = Vec::with_capacity(width as usize * height as usize * 4);

    match (output_info.color_type, output_info.bit_depth) {
        (ColorType::Grayscale, BitDepth::Eight) => {
            for y in 0..height as usize {
                let row = &data[y * bytes_per_row..];
                for x in 0..width as usize {
                    let g = row[x];
                    samples.extend_from_slice(&[g, g, g, 255]);
                }
            }
        }
        (ColorType::GrayscaleAlpha, BitDepth::Eight) => {
            for y in 0..height as usize {
                let row = &data[y * bytes_per_row..];
                for x in 0..width as usize {
                    let g = row[x * 2];
                    let a = row[x * 2 + 1];
                    samples.extend_from_slice(&[g, g, g, a]);
                }
            }
        }
        (ColorType::Rgb, BitDepth::Eight) => {
            for y in 0..height as usize {
                let row = &data[y * bytes_per_row..];
                for x in 0..width as usize {
                    let i = x * 3;
                    samples.extend_from_slice(&[row[i], row[i + 1], row[i + 2], 255]);
                }
            }
        }
        (ColorType::Rgba, BitDepth::Eight) => {
            for y in 0..height as usize {
                let row = &data[y * bytes_per_row..y * bytes_per_row + width as usize * 4];
                samples.extend_from_slice(row);
            }
        }
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format after expansion: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    }

    Raster::from_samples(width, height, samples).map_err(IoError::Core)
}

/// Write a raster as an 8-bit RGBA PNG
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(raster.samples())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_rgba() {
        let mut rm = Raster::new(5, 5).unwrap().try_into_mut().unwrap();
        rm.set_rgba_unchecked(0, 0, 255, 0, 0, 255);
        rm.set_rgba_unchecked(1, 1, 0, 255, 0, 128);
        rm.set_rgba_unchecked(2, 2, 0, 0, 255, 0);
        rm.set_rgba_unchecked(4, 4, 10, 20, 30, 40);
        let raster: Raster = rm.into();

        let mut buffer = Vec::new();
        write_png(&raster, &mut buffer).unwrap();
        let decoded = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(decoded.width(), 5);
        assert_eq!(decoded.height(), 5);
        assert_eq!(decoded.samples(), raster.samples());
    }

    #[test]
    fn test_png_roundtrip_every_sample() {
        // A pattern touching many distinct sample values
        let mut rm = Raster::new(16, 16).unwrap().try_into_mut().unwrap();
        for y in 0..16 {
            for x in 0..16 {
                let v = (y * 16 + x) as u8;
                rm.set_rgba_unchecked(x, y, v, v.wrapping_add(85), v.wrapping_add(170), 255);
            }
        }
        let raster: Raster = rm.into();

        let mut buffer = Vec::new();
        write_png(&raster, &mut buffer).unwrap();
        let decoded = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(decoded.samples(), raster.samples());
    }

    #[test]
    fn test_png_rejects_garbage() {
        let garbage = b"not a png at all";
        assert!(read_png(Cursor::new(&garbage[..])).is_err());
    }
}
