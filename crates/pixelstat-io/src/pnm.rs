//! PNM image format support
//!
//! Hand-rolled reader/writer for the Netpbm grayscale and color formats:
//! ASCII P2/P3 and binary P5/P6 on the read side, binary P6 on the write
//! side. Sample values are scaled from the stated maxval to 8 bits;
//! 16-bit PNM (maxval > 255) is not supported.

use crate::{IoError, IoResult};
use pixelstat_core::Raster;
use std::io::{Read, Write};

/// PNM header fields
struct PnmHeader {
    magic: u8,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Byte cursor with PNM whitespace/comment handling
struct Tokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(data: &'a [u8]) -> Self {
        Tokens { data, pos: 0 }
    }

    /// Skip whitespace and `#` comments (which run to end of line)
    fn skip_filler(&mut self) {
        while self.pos < self.data.len() {
            let b = self.data[self.pos];
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'#' {
                while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    /// Next whitespace-delimited token
    fn next_token(&mut self) -> IoResult<&'a [u8]> {
        self.skip_filler();
        let start = self.pos;
        while self.pos < self.data.len() && !self.data[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(IoError::InvalidData("truncated PNM header".to_string()));
        }
        Ok(&self.data[start..self.pos])
    }

    /// Next token parsed as a decimal integer
    fn next_int(&mut self) -> IoResult<u32> {
        let token = self.next_token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData("invalid PNM integer".to_string()))
    }

    /// Remaining bytes after the single whitespace byte that terminates
    /// the header of a binary variant
    fn binary_body(mut self) -> IoResult<&'a [u8]> {
        if self.pos >= self.data.len() {
            return Err(IoError::InvalidData("missing PNM raster data".to_string()));
        }
        self.pos += 1;
        Ok(&self.data[self.pos..])
    }
}

fn read_header(tokens: &mut Tokens) -> IoResult<PnmHeader> {
    let magic = tokens.next_token()?;
    let magic = match magic {
        b"P2" => b'2',
        b"P3" => b'3',
        b"P5" => b'5',
        b"P6" => b'6',
        b"P1" | b"P4" => {
            return Err(IoError::UnsupportedFormat(
                "PNM bitmap (P1/P4) not supported".to_string(),
            ));
        }
        _ => return Err(IoError::InvalidData("not a PNM header".to_string())),
    };

    let width = tokens.next_int()?;
    let height = tokens.next_int()?;
    let maxval = tokens.next_int()?;
    if width == 0 || height == 0 {
        return Err(IoError::InvalidData("zero PNM dimension".to_string()));
    }
    if maxval == 0 {
        return Err(IoError::InvalidData("zero PNM maxval".to_string()));
    }
    if maxval > 255 {
        return Err(IoError::UnsupportedFormat(
            "16-bit PNM not supported".to_string(),
        ));
    }

    Ok(PnmHeader {
        magic,
        width,
        height,
        maxval,
    })
}

#[inline]
fn scale(value: u32, maxval: u32) -> u8 {
    (value * 255 / maxval) as u8
}

/// Read a PNM image into an RGBA raster
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Raster> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).map_err(IoError::Io)?;

    let mut tokens = Tokens::new(&data);
    let header = read_header(&mut tokens)?;
    let pixels = header.width as usize * header.height as usize;
    let mut samples = Vec::with_capacity(pixels * 4);

    match header.magic {
        b'2' => {
            for _ in 0..pixels {
                let v = tokens.next_int()?;
                let g = scale(v.min(header.maxval), header.maxval);
                samples.extend_from_slice(&[g, g, g, 255]);
            }
        }
        b'3' => {
            for _ in 0..pixels {
                let r = scale(tokens.next_int()?.min(header.maxval), header.maxval);
                let g = scale(tokens.next_int()?.min(header.maxval), header.maxval);
                let b = scale(tokens.next_int()?.min(header.maxval), header.maxval);
                samples.extend_from_slice(&[r, g, b, 255]);
            }
        }
        b'5' => {
            let body = tokens.binary_body()?;
            if body.len() < pixels {
                return Err(IoError::InvalidData("truncated PGM data".to_string()));
            }
            for &v in &body[..pixels] {
                let g = scale(v as u32, header.maxval);
                samples.extend_from_slice(&[g, g, g, 255]);
            }
        }
        b'6' => {
            let body = tokens.binary_body()?;
            if body.len() < pixels * 3 {
                return Err(IoError::InvalidData("truncated PPM data".to_string()));
            }
            for rgb in body[..pixels * 3].chunks_exact(3) {
                samples.extend_from_slice(&[
                    scale(rgb[0] as u32, header.maxval),
                    scale(rgb[1] as u32, header.maxval),
                    scale(rgb[2] as u32, header.maxval),
                    255,
                ]);
            }
        }
        _ => unreachable!(),
    }

    Raster::from_samples(header.width, header.height, samples).map_err(IoError::Core)
}

/// Write a raster as a binary PPM (P6); alpha is discarded
pub fn write_pnm<W: Write>(raster: &Raster, mut writer: W) -> IoResult<()> {
    write!(writer, "P6\n{} {}\n255\n", raster.width(), raster.height())
        .map_err(IoError::Io)?;

    let mut row_buf = Vec::with_capacity(raster.width() as usize * 3);
    for y in 0..raster.height() {
        row_buf.clear();
        for pixel in raster.row(y).chunks_exact(4) {
            row_buf.extend_from_slice(&pixel[..3]);
        }
        writer.write_all(&row_buf).map_err(IoError::Io)?;
    }
    Ok(())
}
