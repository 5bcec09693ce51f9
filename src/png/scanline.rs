//! Row-by-row reconstruction of inflated PNG image data
//!
//! Rows are decoded strictly in order: every filter except None and Sub
//! reads the reconstructed row above. Two row buffers owned by the decode
//! call are swapped after each row.

use std::mem;

use log::debug;

use crate::color::{LinearRgba, Srgba};
use crate::errors::{DecodeError, DecodeResult};
use crate::png::filter::{unfilter, FilterType};
use crate::png::header::{ColorType, PngHeader};
use crate::png::palette::Palette;
use crate::sink::PixelSink;

/// Decodes `data` (filter byte + row bytes, per row) into `sink`
pub fn decode_scanlines(
    data: &[u8],
    header: &PngHeader,
    palette: Option<&Palette>,
    sink: &mut dyn PixelSink,
) -> DecodeResult<()> {
    header.check_supported()?;
    let palette = match (header.color_type, palette) {
        (ColorType::Indexed, None) => return Err(DecodeError::MissingHeader("PLTE")),
        (_, palette) => palette,
    };

    let row_bytes = header.row_bytes();
    let needed = (row_bytes as u64)
        .checked_add(1)
        .and_then(|filtered| filtered.checked_mul(header.height as u64));
    match needed {
        Some(needed) if needed <= data.len() as u64 => {}
        _ => {
            return Err(DecodeError::Format(format!(
                "Image data holds {} bytes, {} rows of {} bytes declared",
                data.len(),
                header.height,
                row_bytes
            )))
        }
    }

    let bpp = header.filter_stride();
    let mut previous = vec![0u8; row_bytes];
    let mut current = vec![0u8; row_bytes];

    debug!("Decoding {} rows of {} bytes (filter stride {})", header.height, row_bytes, bpp);

    let mut offset = 0usize;
    for y in 0..header.height as i64 {
        let filter = FilterType::from_filter_byte(data[offset])?;
        current.copy_from_slice(&data[offset + 1..offset + 1 + row_bytes]);
        offset += 1 + row_bytes;

        unfilter(filter, bpp, &previous, &mut current);
        write_row(&current, header, palette, y, sink)?;
        mem::swap(&mut previous, &mut current);
    }

    Ok(())
}

/// Unpacks one reconstructed row into pixels
fn write_row(
    row: &[u8],
    header: &PngHeader,
    palette: Option<&Palette>,
    y: i64,
    sink: &mut dyn PixelSink,
) -> DecodeResult<()> {
    let width = header.width as usize;
    let depth = header.bit_depth;

    match (header.color_type, depth) {
        (ColorType::Grayscale, 1 | 2 | 4) => {
            let max = (1u16 << depth) - 1;
            for x in 0..width {
                let level = packed_sample(row, x, depth) as u16 * 255 / max;
                sink.set_srgb_pixel(x as i64, y, Srgba::gray(level as u8));
            }
        }
        (ColorType::Grayscale, 8) => {
            for (x, &level) in row.iter().take(width).enumerate() {
                sink.set_srgb_pixel(x as i64, y, Srgba::gray(level));
            }
        }
        (ColorType::Grayscale, 16) => {
            for (x, px) in row.chunks_exact(2).take(width).enumerate() {
                let v = sample16(px, 0);
                sink.set_pixel(x as i64, y, LinearRgba::from_gamma(v, v, v, 1.0));
            }
        }
        (ColorType::Rgb, 8) => {
            for (x, px) in row.chunks_exact(3).take(width).enumerate() {
                sink.set_srgb_pixel(x as i64, y, Srgba::opaque(px[0], px[1], px[2]));
            }
        }
        (ColorType::Rgb, 16) => {
            for (x, px) in row.chunks_exact(6).take(width).enumerate() {
                let color = LinearRgba::from_gamma(sample16(px, 0), sample16(px, 1), sample16(px, 2), 1.0);
                sink.set_pixel(x as i64, y, color);
            }
        }
        (ColorType::Indexed, 1 | 2 | 4 | 8) => {
            let palette = palette.ok_or(DecodeError::MissingHeader("PLTE"))?;
            for x in 0..width {
                let index = if depth == 8 { row[x] } else { packed_sample(row, x, depth) };
                sink.set_srgb_pixel(x as i64, y, palette.get(index as usize)?);
            }
        }
        (ColorType::GrayscaleAlpha, 8) => {
            for (x, px) in row.chunks_exact(2).take(width).enumerate() {
                sink.set_srgb_pixel(x as i64, y, Srgba::new(px[0], px[0], px[0], px[1]));
            }
        }
        (ColorType::GrayscaleAlpha, 16) => {
            for (x, px) in row.chunks_exact(4).take(width).enumerate() {
                let v = sample16(px, 0);
                sink.set_pixel(x as i64, y, LinearRgba::from_gamma(v, v, v, sample16(px, 1)));
            }
        }
        (ColorType::Rgba, 8) => {
            for (x, px) in row.chunks_exact(4).take(width).enumerate() {
                sink.set_srgb_pixel(x as i64, y, Srgba::new(px[0], px[1], px[2], px[3]));
            }
        }
        (ColorType::Rgba, 16) => {
            for (x, px) in row.chunks_exact(8).take(width).enumerate() {
                let color = LinearRgba::from_gamma(
                    sample16(px, 0),
                    sample16(px, 1),
                    sample16(px, 2),
                    sample16(px, 3),
                );
                sink.set_pixel(x as i64, y, color);
            }
        }
        (color_type, depth) => {
            return Err(DecodeError::UnsupportedFormat(format!(
                "{:?} at {} bits per sample",
                color_type, depth
            )))
        }
    }

    Ok(())
}

/// Sample `x` of a row packed at `depth` bits, most significant bits first
fn packed_sample(row: &[u8], x: usize, depth: u8) -> u8 {
    let bit = x * depth as usize;
    let shift = 8 - depth as usize - bit % 8;
    let mask = ((1u16 << depth) - 1) as u8;
    (row[bit / 8] >> shift) & mask
}

/// Big-endian 16-bit sample `index` of a pixel, normalized to 0..=1
fn sample16(pixel: &[u8], index: usize) -> f32 {
    u16::from_be_bytes([pixel[index * 2], pixel[index * 2 + 1]]) as f32 / 65535.0
}
