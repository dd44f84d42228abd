//! Regression tests for the decode/encode boundary
//!
//! Covers format sniffing on real encoded bytes, the lossless PNG round
//! trip, and error surfacing for malformed input.

use pixelstat_core::Raster;
use pixelstat_io::{ImageFormat, decode_image, detect_format_from_bytes, encode_image};

/// Build a raster with a varied, deterministic sample pattern
fn patterned_raster(w: u32, h: u32) -> Raster {
    let mut rm = Raster::new(w, h).unwrap().try_into_mut().unwrap();
    for y in 0..h {
        for x in 0..w {
            rm.set_rgba_unchecked(
                x,
                y,
                ((x * 5 + y) % 256) as u8,
                ((y * 9 + 3) % 256) as u8,
                ((x + y * 11) % 256) as u8,
                ((x * y + 17) % 256) as u8,
            );
        }
    }
    rm.into()
}

#[test]
fn test_png_roundtrip_is_lossless() {
    let raster = patterned_raster(23, 11);

    let bytes = encode_image(&raster, ImageFormat::Png).unwrap();
    assert_eq!(detect_format_from_bytes(&bytes).unwrap(), ImageFormat::Png);

    let decoded = decode_image(&bytes).unwrap();
    assert_eq!(decoded.width(), raster.width());
    assert_eq!(decoded.height(), raster.height());
    assert_eq!(decoded.samples(), raster.samples());
}

#[test]
fn test_jpeg_roundtrip_keeps_dimensions() {
    let raster = patterned_raster(32, 20);

    let bytes = encode_image(&raster, ImageFormat::Jpeg).unwrap();
    assert_eq!(detect_format_from_bytes(&bytes).unwrap(), ImageFormat::Jpeg);

    let decoded = decode_image(&bytes).unwrap();
    assert_eq!(decoded.width(), 32);
    assert_eq!(decoded.height(), 20);
    assert_eq!(decoded.samples().len(), raster.samples().len());
}

#[test]
fn test_pnm_roundtrip_preserves_color_samples() {
    let raster = patterned_raster(9, 7);

    let bytes = encode_image(&raster, ImageFormat::Pnm).unwrap();
    assert_eq!(detect_format_from_bytes(&bytes).unwrap(), ImageFormat::Pnm);

    // PPM carries no alpha; color samples round-trip exactly
    let decoded = decode_image(&bytes).unwrap();
    for (a, b) in raster
        .samples()
        .chunks_exact(4)
        .zip(decoded.samples().chunks_exact(4))
    {
        assert_eq!(&a[..3], &b[..3]);
        assert_eq!(b[3], 255);
    }
}

#[test]
fn test_decode_rejects_malformed_data() {
    // Valid PNG signature, garbage body: the decoder must error out
    // without producing a raster.
    let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(b"garbage chunk data");
    assert!(decode_image(&bytes).is_err());
}

#[test]
fn test_decode_rejects_unknown_format() {
    assert!(decode_image(b"plain text, not an image").is_err());
}

#[test]
fn test_encode_unknown_format_is_rejected() {
    let raster = Raster::new(2, 2).unwrap();
    assert!(encode_image(&raster, ImageFormat::Unknown).is_err());
}
