//! IHDR: image dimensions and pixel layout

use std::fmt;

use byteorder::{BigEndian, ByteOrder};

use crate::errors::{DecodeError, DecodeResult};

/// Size of an IHDR payload
pub const HEADER_LENGTH: usize = 13;

/// PNG color types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Grayscale = 0,
    Rgb = 2,
    Indexed = 3,
    GrayscaleAlpha = 4,
    Rgba = 6,
}

impl ColorType {
    pub fn from_u8(value: u8) -> Option<ColorType> {
        match value {
            0 => Some(ColorType::Grayscale),
            2 => Some(ColorType::Rgb),
            3 => Some(ColorType::Indexed),
            4 => Some(ColorType::GrayscaleAlpha),
            6 => Some(ColorType::Rgba),
            _ => None,
        }
    }

    /// Samples per pixel
    pub fn channels(&self) -> usize {
        match self {
            ColorType::Grayscale | ColorType::Indexed => 1,
            ColorType::GrayscaleAlpha => 2,
            ColorType::Rgb => 3,
            ColorType::Rgba => 4,
        }
    }

    /// Bit depths the decoder handles for this color type
    fn supports_depth(&self, bit_depth: u8) -> bool {
        match self {
            ColorType::Grayscale => matches!(bit_depth, 1 | 2 | 4 | 8 | 16),
            ColorType::Indexed => matches!(bit_depth, 1 | 2 | 4 | 8),
            ColorType::Rgb | ColorType::GrayscaleAlpha | ColorType::Rgba => matches!(bit_depth, 8 | 16),
        }
    }
}

/// Parsed IHDR chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: u8,
}

impl PngHeader {
    /// Parses an IHDR payload
    pub fn parse(data: &[u8]) -> DecodeResult<Self> {
        if data.len() != HEADER_LENGTH {
            return Err(DecodeError::Format(format!("IHDR length {} (expected {})", data.len(), HEADER_LENGTH)));
        }

        let width = BigEndian::read_i32(&data[0..4]);
        let height = BigEndian::read_i32(&data[4..8]);
        if width <= 0 || height <= 0 {
            return Err(DecodeError::Format(format!("Invalid image size {}x{}", width, height)));
        }

        let bit_depth = data[8];
        let color_type = ColorType::from_u8(data[9])
            .ok_or_else(|| DecodeError::Format(format!("Invalid color type {}", data[9])))?;
        let compression_method = data[10];
        let filter_method = data[11];
        let interlace_method = data[12];

        if compression_method != 0 {
            return Err(DecodeError::Format(format!("Invalid compression method {}", compression_method)));
        }
        if filter_method != 0 {
            return Err(DecodeError::Format(format!("Invalid filter method {}", filter_method)));
        }

        Ok(PngHeader {
            width: width as u32,
            height: height as u32,
            bit_depth,
            color_type,
            compression_method,
            filter_method,
            interlace_method,
        })
    }

    /// Fails with `UnsupportedFormat` for layouts the scanline decoder lacks
    pub fn check_supported(&self) -> DecodeResult<()> {
        if !self.color_type.supports_depth(self.bit_depth) {
            return Err(DecodeError::UnsupportedFormat(format!(
                "{:?} at {} bits per sample",
                self.color_type, self.bit_depth
            )));
        }
        if self.interlace_method != 0 {
            return Err(DecodeError::UnsupportedFormat(format!(
                "Interlace method {}",
                self.interlace_method
            )));
        }
        Ok(())
    }

    pub fn bits_per_pixel(&self) -> usize {
        self.color_type.channels() * self.bit_depth as usize
    }

    /// Byte distance to the corresponding byte of the left neighbor
    pub fn filter_stride(&self) -> usize {
        (self.bits_per_pixel() / 8).max(1)
    }

    /// Bytes in one unfiltered row, excluding the filter byte
    pub fn row_bytes(&self) -> usize {
        (self.width as usize * self.bits_per_pixel() + 7) / 8
    }
}

impl fmt::Display for PngHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} {:?} {}-bit interlace={}",
            self.width, self.height, self.color_type, self.bit_depth, self.interlace_method
        )
    }
}
