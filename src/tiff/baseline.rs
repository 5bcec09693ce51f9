//! Baseline header derived from the first IFD
//!
//! The baseline header is the normalized view of an image directory that the
//! strip decoder works from: dimensions, sample layout, compression and the
//! strip table. It is built once per decode and never changes afterwards.

use std::fmt;

use log::{debug, warn};

use crate::errors::{DecodeError, DecodeResult};
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{compression, extra_samples, photometric, planar_config, predictor, sample_format, tags};
use crate::tiff::ifd::IFD;
use crate::tiff::reader::TiffReader;

/// How sample values map to colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotometricInterpretation {
    WhiteIsZero,
    BlackIsZero,
    Rgb,
    Palette,
    Mask,
    Separation,
    YCbCr,
    CieLab,
    IccLab,
    ItuLab,
    LogL,
    LogLuv,
    ColorFilterArray,
    LinearRaw,
    Depth,
    Unknown(u16),
}

impl PhotometricInterpretation {
    pub fn from_code(code: u16) -> Self {
        match code {
            photometric::WHITE_IS_ZERO => PhotometricInterpretation::WhiteIsZero,
            photometric::BLACK_IS_ZERO => PhotometricInterpretation::BlackIsZero,
            photometric::RGB => PhotometricInterpretation::Rgb,
            photometric::PALETTE => PhotometricInterpretation::Palette,
            photometric::TRANSPARENCY_MASK => PhotometricInterpretation::Mask,
            photometric::SEPARATED => PhotometricInterpretation::Separation,
            photometric::YCBCR => PhotometricInterpretation::YCbCr,
            photometric::CIELAB => PhotometricInterpretation::CieLab,
            photometric::ICCLAB => PhotometricInterpretation::IccLab,
            photometric::ITULAB => PhotometricInterpretation::ItuLab,
            photometric::LOGL => PhotometricInterpretation::LogL,
            photometric::LOGLUV => PhotometricInterpretation::LogLuv,
            photometric::COLOR_FILTER_ARRAY => PhotometricInterpretation::ColorFilterArray,
            photometric::LINEAR_RAW => PhotometricInterpretation::LinearRaw,
            photometric::DEPTH => PhotometricInterpretation::Depth,
            other => PhotometricInterpretation::Unknown(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PhotometricInterpretation::WhiteIsZero => "WhiteIsZero",
            PhotometricInterpretation::BlackIsZero => "BlackIsZero",
            PhotometricInterpretation::Rgb => "RGB",
            PhotometricInterpretation::Palette => "Palette",
            PhotometricInterpretation::Mask => "TransparencyMask",
            PhotometricInterpretation::Separation => "Separated",
            PhotometricInterpretation::YCbCr => "YCbCr",
            PhotometricInterpretation::CieLab => "CIELab",
            PhotometricInterpretation::IccLab => "ICCLab",
            PhotometricInterpretation::ItuLab => "ITULab",
            PhotometricInterpretation::LogL => "LogL",
            PhotometricInterpretation::LogLuv => "LogLuv",
            PhotometricInterpretation::ColorFilterArray => "ColorFilterArray",
            PhotometricInterpretation::LinearRaw => "LinearRaw",
            PhotometricInterpretation::Depth => "Depth",
            PhotometricInterpretation::Unknown(_) => "Unknown",
        }
    }
}

/// Numeric interpretation of one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    Unsigned,
    Signed,
    Float,
    Void,
    Unknown(u16),
}

impl SampleFormat {
    pub fn from_code(code: u16) -> Self {
        match code {
            sample_format::UNSIGNED => SampleFormat::Unsigned,
            sample_format::SIGNED => SampleFormat::Signed,
            sample_format::IEEEFP => SampleFormat::Float,
            sample_format::VOID => SampleFormat::Void,
            other => SampleFormat::Unknown(other),
        }
    }
}

/// Normalized description of a strip-organized image
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineHeader {
    pub width: u32,
    pub height: u32,
    pub photometric: PhotometricInterpretation,
    /// Bit depth of each sample
    pub bits_per_sample: Vec<u16>,
    /// Numeric format of each sample
    pub sample_format: Vec<SampleFormat>,
    pub compression: u64,
    pub predictor: u64,
    pub planar_configuration: u64,
    /// Alpha is associated (ExtraSamples[0] == 1)
    pub premultiplied: bool,
    /// Bytes per pixel, `ceil(sum(bits_per_sample) / 8)`
    pub pixel_stride: u64,
    /// Bytes per row, `pixel_stride * width`
    pub row_stride: u64,
    pub rows_per_strip: u64,
    pub strip_offsets: Vec<u64>,
    pub strip_byte_counts: Vec<u64>,
}

impl BaselineHeader {
    /// Builds the header from an IFD
    pub fn from_ifd(tiff_reader: &TiffReader, reader: &mut dyn SeekableReader, ifd: &IFD) -> DecodeResult<Self> {
        if !ifd.has_tag(tags::IMAGE_WIDTH) || !ifd.has_tag(tags::IMAGE_LENGTH) {
            return Err(DecodeError::MissingDimensions);
        }
        let width = to_u32(tiff_reader.read_tag_u64(reader, ifd, tags::IMAGE_WIDTH, 0)?, "ImageWidth")?;
        let height = to_u32(tiff_reader.read_tag_u64(reader, ifd, tags::IMAGE_LENGTH, 0)?, "ImageLength")?;

        let mut bits_per_sample: Vec<u16> = if ifd.has_tag(tags::BITS_PER_SAMPLE) {
            tiff_reader
                .read_tag_u64s(reader, ifd, tags::BITS_PER_SAMPLE)?
                .into_iter()
                .map(|b| b as u16)
                .collect()
        } else {
            vec![1]
        };
        let samples_per_pixel =
            tiff_reader.read_tag_u64(reader, ifd, tags::SAMPLES_PER_PIXEL, bits_per_sample.len() as u64)? as usize;
        if bits_per_sample.len() == 1 && samples_per_pixel > 1 {
            bits_per_sample = vec![bits_per_sample[0]; samples_per_pixel];
        }

        let mut sample_formats: Vec<SampleFormat> = if ifd.has_tag(tags::SAMPLE_FORMAT) {
            tiff_reader
                .read_tag_u64s(reader, ifd, tags::SAMPLE_FORMAT)?
                .into_iter()
                .map(|f| SampleFormat::from_code(f as u16))
                .collect()
        } else {
            Vec::new()
        };
        if sample_formats.len() < bits_per_sample.len() {
            let fill = sample_formats.first().copied().unwrap_or(SampleFormat::Unsigned);
            sample_formats.resize(bits_per_sample.len(), fill);
        }

        let photometric = PhotometricInterpretation::from_code(
            tiff_reader.read_tag_u64(reader, ifd, tags::PHOTOMETRIC_INTERPRETATION, photometric::BLACK_IS_ZERO as u64)?
                as u16,
        );
        let compression = tiff_reader.read_tag_u64(reader, ifd, tags::COMPRESSION, compression::NONE as u64)?;
        let predictor = tiff_reader.read_tag_u64(reader, ifd, tags::PREDICTOR, predictor::NONE as u64)?;
        let planar_configuration =
            tiff_reader.read_tag_u64(reader, ifd, tags::PLANAR_CONFIGURATION, planar_config::CHUNKY as u64)?;

        let premultiplied = if ifd.has_tag(tags::EXTRA_SAMPLES) {
            let extra = tiff_reader.read_tag_u64s(reader, ifd, tags::EXTRA_SAMPLES)?;
            extra.first() == Some(&(extra_samples::ASSOCIATED_ALPHA as u64))
        } else {
            false
        };

        let total_bits: u64 = bits_per_sample.iter().map(|&b| b as u64).sum();
        let pixel_stride = (total_bits + 7) / 8;
        let row_stride = pixel_stride
            .checked_mul(width as u64)
            .ok_or_else(|| DecodeError::Format(format!("Row of {} pixels x {} bytes overflows", width, pixel_stride)))?;

        let rows_per_strip = match tiff_reader.read_tag_u64(reader, ifd, tags::ROWS_PER_STRIP, 0)? {
            0 => height as u64,
            rows => rows,
        };
        let strip_size = row_stride.checked_mul(rows_per_strip).ok_or_else(|| {
            DecodeError::Format(format!("Strip of {} rows x {} bytes overflows", rows_per_strip, row_stride))
        })?;

        if !ifd.has_tag(tags::STRIP_OFFSETS) {
            return Err(DecodeError::Format("StripOffsets tag is missing".to_string()));
        }
        let strip_offsets = tiff_reader.read_tag_u64s(reader, ifd, tags::STRIP_OFFSETS)?;
        let strip_byte_counts = if ifd.has_tag(tags::STRIP_BYTE_COUNTS) {
            tiff_reader.read_tag_u64s(reader, ifd, tags::STRIP_BYTE_COUNTS)?
        } else {
            warn!("StripByteCounts missing, assuming {} bytes per strip", strip_size);
            vec![strip_size; strip_offsets.len()]
        };
        if strip_byte_counts.len() != strip_offsets.len() {
            return Err(DecodeError::Format(format!(
                "{} strip offsets but {} strip byte counts",
                strip_offsets.len(),
                strip_byte_counts.len()
            )));
        }

        let header = BaselineHeader {
            width,
            height,
            photometric,
            bits_per_sample,
            sample_format: sample_formats,
            compression,
            predictor,
            planar_configuration,
            premultiplied,
            pixel_stride,
            row_stride,
            rows_per_strip,
            strip_offsets,
            strip_byte_counts,
        };
        debug!("Baseline header: {}", header);
        Ok(header)
    }

    /// Number of strips in the strip table
    pub fn strip_count(&self) -> usize {
        self.strip_offsets.len()
    }

    /// Number of samples per pixel
    pub fn samples_per_pixel(&self) -> usize {
        self.bits_per_sample.len()
    }
}

impl fmt::Display for BaselineHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} {} bits={:?} formats={:?} compression={} predictor={} premultiplied={} \
             pixel_stride={} row_stride={} rows_per_strip={} strips={}",
            self.width,
            self.height,
            self.photometric.name(),
            self.bits_per_sample,
            self.sample_format,
            self.compression,
            self.predictor,
            self.premultiplied,
            self.pixel_stride,
            self.row_stride,
            self.rows_per_strip,
            self.strip_count()
        )
    }
}

fn to_u32(value: u64, name: &str) -> DecodeResult<u32> {
    u32::try_from(value).map_err(|_| DecodeError::Format(format!("{} {} out of range", name, value)))
}
