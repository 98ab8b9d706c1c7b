//! PNG image format support
//!
//! Grayscale 1, 2, 4, 8 and 16 bpp images map to grayscale PNG of the
//! same bit depth; 32 bpp images are written as 8-bit RGB. On read, any
//! alpha channel is dropped.

use crate::{IoError, IoResult};
use leptonica_core::{Pix, PixelDepth, color};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let pix_depth = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) => PixelDepth::Bit1,
        (ColorType::Grayscale, BitDepth::Two) => PixelDepth::Bit2,
        (ColorType::Grayscale, BitDepth::Four) => PixelDepth::Bit4,
        (ColorType::Grayscale, BitDepth::Eight) => PixelDepth::Bit8,
        (ColorType::Grayscale, BitDepth::Sixteen) => PixelDepth::Bit16,
        (ColorType::GrayscaleAlpha | ColorType::Rgb | ColorType::Rgba, _) => PixelDepth::Bit32,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix_mut = Pix::new(width, height, pix_depth)?.to_mut();
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let wide = bit_depth == BitDepth::Sixteen;

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..];
        for x in 0..width {
            let xs = x as usize;
            let val = match (color_type, bit_depth) {
                (ColorType::Grayscale, BitDepth::One) => ((row[xs / 8] >> (7 - xs % 8)) & 1) as u32,
                (ColorType::Grayscale, BitDepth::Two) => {
                    ((row[xs / 4] >> (6 - (xs % 4) * 2)) & 3) as u32
                }
                (ColorType::Grayscale, BitDepth::Four) => {
                    ((row[xs / 2] >> (if xs % 2 == 0 { 4 } else { 0 })) & 0xF) as u32
                }
                (ColorType::Grayscale, BitDepth::Eight) => row[xs] as u32,
                (ColorType::Grayscale, _) => ((row[xs * 2] as u32) << 8) | row[xs * 2 + 1] as u32,
                (ColorType::GrayscaleAlpha, _) => {
                    let g = row[xs * if wide { 4 } else { 2 }];
                    color::compose_rgb(g, g, g)
                }
                (ColorType::Rgb, _) => {
                    let idx = xs * if wide { 6 } else { 3 };
                    let step = if wide { 2 } else { 1 };
                    color::compose_rgb(row[idx], row[idx + step], row[idx + 2 * step])
                }
                _ => {
                    let idx = xs * if wide { 8 } else { 4 };
                    let step = if wide { 2 } else { 1 };
                    color::compose_rgb(row[idx], row[idx + step], row[idx + 2 * step])
                }
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Read a PNG image from a file
pub fn read_png_file<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    read_png(BufReader::new(File::open(path)?))
}

/// Write a PNG image
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bit_depth) = match pix.depth() {
        PixelDepth::Bit1 => (ColorType::Grayscale, BitDepth::One),
        PixelDepth::Bit2 => (ColorType::Grayscale, BitDepth::Two),
        PixelDepth::Bit4 => (ColorType::Grayscale, BitDepth::Four),
        PixelDepth::Bit8 => (ColorType::Grayscale, BitDepth::Eight),
        PixelDepth::Bit16 => (ColorType::Grayscale, BitDepth::Sixteen),
        PixelDepth::Bit32 => (ColorType::Rgb, BitDepth::Eight),
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bytes_per_row = match pix.depth() {
        PixelDepth::Bit1 => width.div_ceil(8),
        PixelDepth::Bit2 => width.div_ceil(4),
        PixelDepth::Bit4 => width.div_ceil(2),
        PixelDepth::Bit8 => width,
        PixelDepth::Bit16 => width * 2,
        PixelDepth::Bit32 => width * 3,
    } as usize;

    let mut data = vec![0u8; bytes_per_row * height as usize];

    for y in 0..height {
        let row = &mut data[y as usize * bytes_per_row..(y as usize + 1) * bytes_per_row];
        for x in 0..width {
            let val = pix.get_pixel_unchecked(x, y);
            let xs = x as usize;
            match pix.depth() {
                PixelDepth::Bit1 => {
                    if val != 0 {
                        row[xs / 8] |= 1 << (7 - xs % 8);
                    }
                }
                PixelDepth::Bit2 => row[xs / 4] |= ((val & 3) as u8) << (6 - (xs % 4) * 2),
                PixelDepth::Bit4 => {
                    row[xs / 2] |= ((val & 0xF) as u8) << (if xs % 2 == 0 { 4 } else { 0 })
                }
                PixelDepth::Bit8 => row[xs] = val as u8,
                PixelDepth::Bit16 => {
                    row[xs * 2] = (val >> 8) as u8;
                    row[xs * 2 + 1] = val as u8;
                }
                PixelDepth::Bit32 => {
                    let (r, g, b) = color::extract_rgb(val);
                    row[xs * 3..xs * 3 + 3].copy_from_slice(&[r, g, b]);
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

/// Write a PNG image to a file, creating or truncating it
pub fn write_png_file<P: AsRef<Path>>(pix: &Pix, path: P) -> IoResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_png(pix, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(pix: &Pix) -> Pix {
        let mut buffer = Vec::new();
        write_png(pix, &mut buffer).unwrap();
        read_png(Cursor::new(buffer)).unwrap()
    }

    #[test]
    fn test_png_roundtrip_grayscale() {
        let mut pix_mut = Pix::new(10, 10, PixelDepth::Bit8).unwrap().to_mut();
        for y in 0..10 {
            for x in 0..10 {
                pix_mut.set_pixel(x, y, (x + y) * 10).unwrap();
            }
        }
        let pix: Pix = pix_mut.into();
        let pix2 = roundtrip(&pix);

        assert_eq!(pix2.width(), 10);
        assert_eq!(pix2.height(), 10);
        assert_eq!(pix2.depth(), PixelDepth::Bit8);
        assert_eq!(pix2.data(), pix.data());
    }

    #[test]
    fn test_png_roundtrip_binary() {
        let mut pix_mut = Pix::new(37, 5, PixelDepth::Bit1).unwrap().to_mut();
        for x in (0..37).step_by(3) {
            pix_mut.set_pixel(x, x % 5, 1).unwrap();
        }
        let pix: Pix = pix_mut.into();
        let pix2 = roundtrip(&pix);
        assert_eq!(pix2.depth(), PixelDepth::Bit1);
        assert_eq!(pix2.data(), pix.data());
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut pix_mut = Pix::new(5, 5, PixelDepth::Bit32).unwrap().to_mut();
        pix_mut.set_pixel(0, 0, color::compose_rgb(255, 0, 0)).unwrap();
        pix_mut.set_pixel(1, 1, color::compose_rgb(0, 255, 0)).unwrap();
        pix_mut.set_pixel(2, 2, color::compose_rgb(0, 0, 255)).unwrap();
        let pix2 = roundtrip(&pix_mut.into());

        let rgb = |x, y| color::extract_rgb(pix2.get_pixel(x, y).unwrap());
        assert_eq!(rgb(0, 0), (255, 0, 0));
        assert_eq!(rgb(1, 1), (0, 255, 0));
        assert_eq!(rgb(2, 2), (0, 0, 255));
        assert_eq!(rgb(4, 4), (0, 0, 0));
    }

    #[test]
    fn test_png_decode_garbage() {
        let result = read_png(Cursor::new(vec![0u8; 16]));
        assert!(matches!(result, Err(IoError::DecodeError(_))));
    }
}
