//! Per-pixel sample decoders for uncompressed TIFF pixel layouts
//!
//! Each decoder reads exactly one pixel (`pixel_stride` bytes) at the
//! reader's cursor and returns it as a linear color. Sample values are
//! handed to the sink as-is, without a transfer curve.

use std::io::{self, Read};

use byteorder::ReadBytesExt;

use crate::color::LinearRgba;
use crate::errors::{DecodeError, DecodeResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;
use crate::tiff::baseline::{BaselineHeader, PhotometricInterpretation, SampleFormat};

/// Reads one pixel at the cursor
pub type PixelDecoder = fn(&mut dyn SeekableReader, &dyn ByteOrderHandler) -> DecodeResult<LinearRgba>;

/// Offset that maps the signed 16-bit range onto 0..=0xFFFF
pub const SIGNED_GRAY16_OFFSET: i32 = 0x8000;

/// Picks the decoder for a header's pixel layout
pub fn select_decoder(header: &BaselineHeader) -> DecodeResult<PixelDecoder> {
    use PhotometricInterpretation::*;
    use SampleFormat::*;

    let bits = header.bits_per_sample.as_slice();
    let formats = header.sample_format.as_slice();
    let decoder: Option<PixelDecoder> = match (header.photometric, bits, formats) {
        (Rgb, [8, 8, 8], [Unsigned, Unsigned, Unsigned]) => Some(rgb8),
        (Rgb, [8, 8, 8, 8], [Unsigned, Unsigned, Unsigned, Unsigned]) if header.premultiplied => {
            Some(rgba8_premultiplied)
        }
        (Rgb, [8, 8, 8, 8], [Unsigned, Unsigned, Unsigned, Unsigned]) => Some(rgba8),
        (BlackIsZero, [16], [Signed]) => Some(gray16_signed),
        (BlackIsZero, [16], [Unsigned]) => Some(gray16),
        (BlackIsZero, [8], [Unsigned]) => Some(gray8),
        (WhiteIsZero, [16], [Unsigned]) => Some(white_is_zero16),
        (WhiteIsZero, [8], [Unsigned]) => Some(white_is_zero8),
        _ => None,
    };

    decoder.ok_or_else(|| {
        DecodeError::UnsupportedFormat(format!(
            "Don't know how to unpack these pixels: {}, bits {:?}, formats {:?}, premultiplied {}",
            header.photometric.name(),
            header.bits_per_sample,
            header.sample_format,
            header.premultiplied
        ))
    })
}

/// Runs `decoder`, turning any read failure into a transparent pixel
pub fn decode_pixel(
    decoder: PixelDecoder,
    reader: &mut dyn SeekableReader,
    handler: &dyn ByteOrderHandler,
) -> LinearRgba {
    decoder(reader, handler).unwrap_or(LinearRgba::TRANSPARENT)
}

/// A read past the end of the strip data
fn out_of_bounds(e: io::Error) -> DecodeError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => DecodeError::OutOfBounds("pixel lies past the end of the strip".to_string()),
        _ => DecodeError::IoError(e),
    }
}

fn read_bytes<const N: usize>(reader: &mut dyn SeekableReader) -> DecodeResult<[u8; N]> {
    let mut bytes = [0u8; N];
    reader.read_exact(&mut bytes).map_err(out_of_bounds)?;
    Ok(bytes)
}

fn unit(v: u8) -> f32 {
    v as f32 / 255.0
}

pub fn rgb8(reader: &mut dyn SeekableReader, _: &dyn ByteOrderHandler) -> DecodeResult<LinearRgba> {
    let [r, g, b] = read_bytes::<3>(reader)?;
    Ok(LinearRgba::new(unit(r), unit(g), unit(b), 1.0))
}

pub fn rgba8(reader: &mut dyn SeekableReader, _: &dyn ByteOrderHandler) -> DecodeResult<LinearRgba> {
    let [r, g, b, a] = read_bytes::<4>(reader)?;
    Ok(LinearRgba::new(unit(r), unit(g), unit(b), unit(a)))
}

/// Associated alpha: color channels are divided back out by alpha
pub fn rgba8_premultiplied(reader: &mut dyn SeekableReader, _: &dyn ByteOrderHandler) -> DecodeResult<LinearRgba> {
    let [r, g, b, a] = read_bytes::<4>(reader)?;
    if a == 0 {
        return Ok(LinearRgba::TRANSPARENT);
    }
    let alpha = unit(a);
    Ok(LinearRgba::new(unit(r) / alpha, unit(g) / alpha, unit(b) / alpha, alpha))
}

pub fn gray8(reader: &mut dyn SeekableReader, _: &dyn ByteOrderHandler) -> DecodeResult<LinearRgba> {
    Ok(LinearRgba::gray(unit(reader.read_u8().map_err(out_of_bounds)?)))
}

pub fn white_is_zero8(reader: &mut dyn SeekableReader, _: &dyn ByteOrderHandler) -> DecodeResult<LinearRgba> {
    Ok(LinearRgba::gray(1.0 - unit(reader.read_u8().map_err(out_of_bounds)?)))
}

pub fn gray16(reader: &mut dyn SeekableReader, handler: &dyn ByteOrderHandler) -> DecodeResult<LinearRgba> {
    let value = handler.read_u16(reader).map_err(out_of_bounds)?;
    Ok(LinearRgba::gray(value as f32 / 65535.0))
}

pub fn gray16_signed(reader: &mut dyn SeekableReader, handler: &dyn ByteOrderHandler) -> DecodeResult<LinearRgba> {
    let value = handler.read_i16(reader).map_err(out_of_bounds)? as i32 + SIGNED_GRAY16_OFFSET;
    Ok(LinearRgba::gray(value as f32 / 65535.0))
}

pub fn white_is_zero16(reader: &mut dyn SeekableReader, handler: &dyn ByteOrderHandler) -> DecodeResult<LinearRgba> {
    let value = handler.read_u16(reader).map_err(out_of_bounds)?;
    Ok(LinearRgba::gray(1.0 - value as f32 / 65535.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::byte_order::{BigEndianHandler, LittleEndianHandler};
    use std::io::Cursor;

    fn header(photometric: PhotometricInterpretation, bits: &[u16], format: SampleFormat, premultiplied: bool) -> BaselineHeader {
        BaselineHeader {
            width: 1,
            height: 1,
            photometric,
            bits_per_sample: bits.to_vec(),
            sample_format: vec![format; bits.len()],
            compression: 1,
            predictor: 1,
            planar_configuration: 1,
            premultiplied,
            pixel_stride: 0,
            row_stride: 0,
            rows_per_strip: 1,
            strip_offsets: vec![0],
            strip_byte_counts: vec![0],
        }
    }

    #[test]
    fn test_rgb8() {
        let mut cursor = Cursor::new(vec![10u8, 20, 30]);
        let color = rgb8(&mut cursor, &LittleEndianHandler).unwrap();
        assert_eq!(color, LinearRgba::new(10.0 / 255.0, 20.0 / 255.0, 30.0 / 255.0, 1.0));
    }

    #[test]
    fn test_premultiplied_divides_by_alpha() {
        let mut cursor = Cursor::new(vec![51u8, 0, 102, 102]);
        let color = rgba8_premultiplied(&mut cursor, &LittleEndianHandler).unwrap();
        assert!((color.r - 0.5).abs() < 1e-6);
        assert!((color.b - 1.0).abs() < 1e-6);
        assert!((color.a - 0.4).abs() < 1e-6);

        let mut cursor = Cursor::new(vec![9u8, 9, 9, 0]);
        assert_eq!(rgba8_premultiplied(&mut cursor, &LittleEndianHandler).unwrap(), LinearRgba::TRANSPARENT);
    }

    #[test]
    fn test_gray16_byte_order() {
        let mut cursor = Cursor::new(vec![0xFF, 0x00]);
        let little = gray16(&mut cursor, &LittleEndianHandler).unwrap();
        assert_eq!(little.r, 255.0 / 65535.0);

        let mut cursor = Cursor::new(vec![0xFF, 0x00]);
        let big = gray16(&mut cursor, &BigEndianHandler).unwrap();
        assert_eq!(big.r, 0xFF00 as f32 / 65535.0);
    }

    #[test]
    fn test_gray16_signed_range() {
        let mut cursor = Cursor::new(vec![0x00, 0x80, 0xFF, 0x7F, 0x00, 0x00]);
        assert_eq!(gray16_signed(&mut cursor, &LittleEndianHandler).unwrap().r, 0.0);
        assert_eq!(gray16_signed(&mut cursor, &LittleEndianHandler).unwrap().r, 1.0);
        let mid = gray16_signed(&mut cursor, &LittleEndianHandler).unwrap().r;
        assert_eq!(mid, 0x8000 as f32 / 65535.0);
    }

    #[test]
    fn test_white_is_zero_inverts() {
        let mut cursor = Cursor::new(vec![0u8, 255]);
        assert_eq!(white_is_zero8(&mut cursor, &LittleEndianHandler).unwrap(), LinearRgba::gray(1.0));
        assert_eq!(white_is_zero8(&mut cursor, &LittleEndianHandler).unwrap(), LinearRgba::gray(0.0));
    }

    #[test]
    fn test_short_read_is_transparent() {
        let mut cursor = Cursor::new(vec![1u8, 2]);
        assert!(matches!(rgb8(&mut cursor, &LittleEndianHandler), Err(DecodeError::OutOfBounds(_))));

        let mut cursor = Cursor::new(vec![1u8, 2]);
        assert_eq!(decode_pixel(rgb8, &mut cursor, &LittleEndianHandler), LinearRgba::TRANSPARENT);
    }

    #[test]
    fn test_selection_table() {
        use PhotometricInterpretation::*;
        assert!(select_decoder(&header(Rgb, &[8, 8, 8], SampleFormat::Unsigned, false)).is_ok());
        assert!(select_decoder(&header(Rgb, &[8, 8, 8, 8], SampleFormat::Unsigned, true)).is_ok());
        assert!(select_decoder(&header(BlackIsZero, &[16], SampleFormat::Signed, false)).is_ok());
        assert!(select_decoder(&header(WhiteIsZero, &[8], SampleFormat::Unsigned, false)).is_ok());

        let premultiplied = select_decoder(&header(Rgb, &[8, 8, 8, 8], SampleFormat::Unsigned, true)).unwrap();
        let straight = select_decoder(&header(Rgb, &[8, 8, 8, 8], SampleFormat::Unsigned, false)).unwrap();
        let mut cursor = Cursor::new(vec![51u8, 51, 51, 102, 51, 51, 51, 102]);
        let a = premultiplied(&mut cursor, &LittleEndianHandler).unwrap();
        let b = straight(&mut cursor, &LittleEndianHandler).unwrap();
        assert!(a.r > b.r);

        for unsupported in [
            header(Rgb, &[16, 16, 16], SampleFormat::Unsigned, false),
            header(BlackIsZero, &[32], SampleFormat::Float, false),
            header(Palette, &[8], SampleFormat::Unsigned, false),
            header(YCbCr, &[8, 8, 8], SampleFormat::Unsigned, false),
        ] {
            assert!(matches!(select_decoder(&unsupported), Err(DecodeError::UnsupportedFormat(_))));
        }
    }
}
