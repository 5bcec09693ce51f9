//! Strip-based image data extraction
//!
//! Stripped TIFFs store the image as horizontal bands of `rows_per_strip`
//! rows. A decode is a sequence of row windows: each window names a source
//! row, a starting column and a run length, and lands at a destination
//! coordinate in a pixel sink.
//!
//! Uncompressed strips without a predictor are read straight from the file
//! by seeking to the first requested pixel. Compressed or predicted strips
//! are loaded, inflated and un-differenced in memory first; the most recent
//! strip is kept for the lifetime of the reader.

use std::io::{Cursor, Read, Seek, SeekFrom};

use log::{debug, info, warn};

use crate::color::LinearRgba;
use crate::compression::{CompressionFactory, CompressionHandler};
use crate::errors::{DecodeError, DecodeResult};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;
use crate::sink::PixelSink;
use crate::tiff::baseline::BaselineHeader;
use crate::tiff::constants::{compression, planar_config, predictor as pred_consts};

use super::pixel_decoders::{decode_pixel, select_decoder, PixelDecoder};
use super::region::Region;

/// Reads row windows out of a stripped TIFF image
pub struct StripReader<'a> {
    header: &'a BaselineHeader,
    reader: &'a mut dyn SeekableReader,
    handler: Box<dyn ByteOrderHandler>,
    decoder: PixelDecoder,
    compression_handler: Box<dyn CompressionHandler>,
    /// Strips must be loaded into memory before pixels can be read
    in_memory: bool,
    cached_strip: Option<(usize, Vec<u8>)>,
}

impl<'a> StripReader<'a> {
    /// Create a new strip reader
    ///
    /// Fails with `UnsupportedFormat` when the pixel layout, planar
    /// configuration, compression or predictor cannot be decoded.
    pub fn new(
        header: &'a BaselineHeader,
        reader: &'a mut dyn SeekableReader,
        byte_order: ByteOrder,
    ) -> DecodeResult<Self> {
        if header.planar_configuration == planar_config::PLANAR as u64 {
            return Err(DecodeError::UnsupportedFormat(
                "Planar configuration 2 (separate sample planes)".to_string(),
            ));
        }

        let decoder = select_decoder(header)?;
        let compression_handler = CompressionFactory::create_handler(header.compression)?;

        let predicted = match header.predictor {
            p if p == pred_consts::NONE as u64 => false,
            p if p == pred_consts::HORIZONTAL_DIFFERENCING as u64 => {
                if header.bits_per_sample.iter().any(|&b| b != 8) {
                    return Err(DecodeError::UnsupportedFormat(format!(
                        "Horizontal differencing with {:?} bits per sample",
                        header.bits_per_sample
                    )));
                }
                true
            }
            p => return Err(DecodeError::UnsupportedFormat(format!("Predictor {}", p))),
        };

        let in_memory = predicted || header.compression != compression::NONE as u64;
        info!(
            "Using compression: {}{}",
            compression_handler.name(),
            if predicted { " with horizontal differencing" } else { "" }
        );

        Ok(StripReader {
            header,
            reader,
            handler: byte_order.create_handler(),
            decoder,
            compression_handler,
            in_memory,
            cached_strip: None,
        })
    }

    /// Decodes one run of pixels from source row `src_y` into `sink`
    ///
    /// Up to `length` pixels starting at column `src_x` are written to
    /// `(dest_x + i, dest_y)`. A row outside the strip table turns the whole
    /// destination row transparent. Columns left of the image and pixels
    /// that cannot be read are written as transparent.
    pub fn read_line_window(
        &mut self,
        src_x: i64,
        src_y: i64,
        length: u64,
        sink: &mut dyn PixelSink,
        dest_x: i64,
        dest_y: i64,
    ) -> DecodeResult<()> {
        let rows_per_strip = i64::try_from(self.header.rows_per_strip.max(1)).unwrap_or(i64::MAX);
        let target_strip = if src_y < 0 { None } else { Some((src_y / rows_per_strip) as usize) };
        let strip = match target_strip {
            Some(strip) if strip < self.header.strip_count() => strip,
            _ => {
                for x in 0..sink.width() as i64 {
                    sink.set_pixel(x, dest_y, LinearRgba::TRANSPARENT);
                }
                return Ok(());
            }
        };

        let lines_to_skip = (src_y - strip as i64 * rows_per_strip) as u64;
        let available = (self.header.width as i64).saturating_sub(src_x);
        let count = (length.min(i64::MAX as u64) as i64).min(available);
        if count <= 0 {
            return Ok(());
        }

        let lead = src_x.saturating_neg().clamp(0, count);
        for i in 0..lead {
            sink.set_pixel(dest_x + i, dest_y, LinearRgba::TRANSPARENT);
        }
        if lead == count {
            return Ok(());
        }
        let first_x = (src_x + lead) as u64;
        let start = lines_to_skip
            .checked_mul(self.header.row_stride)
            .and_then(|row| first_x.checked_mul(self.header.pixel_stride)?.checked_add(row));
        let position = match start {
            Some(start) if self.in_memory => Some(start),
            Some(start) => self.header.strip_offsets[strip].checked_add(start),
            None => None,
        };
        let (start, position) = match (start, position) {
            (Some(start), Some(position)) => (start, position),
            _ => {
                warn!("Pixel offset in strip {} overflows, row {} left transparent", strip, src_y);
                for i in lead..count {
                    sink.set_pixel(dest_x + i, dest_y, LinearRgba::TRANSPARENT);
                }
                return Ok(());
            }
        };

        if self.in_memory {
            self.load_strip(strip);
            let data: &[u8] = match &self.cached_strip {
                Some((_, data)) => data.as_slice(),
                None => &[],
            };
            let mut cursor = Cursor::new(data);
            cursor.set_position(start);
            for i in lead..count {
                let color = decode_pixel(self.decoder, &mut cursor, &*self.handler);
                sink.set_pixel(dest_x + i, dest_y, color);
            }
        } else {
            self.reader.seek(SeekFrom::Start(position))?;
            for i in lead..count {
                let color = decode_pixel(self.decoder, &mut *self.reader, &*self.handler);
                sink.set_pixel(dest_x + i, dest_y, color);
            }
        }

        Ok(())
    }

    /// Decodes the whole image at the sink's origin
    pub fn decode_into(&mut self, sink: &mut dyn PixelSink) -> DecodeResult<()> {
        let region = Region::full(self.header.width, self.header.height);
        self.decode_region_with(region, sink, |_| {})
    }

    /// Decodes `region` of the image at the sink's origin
    pub fn decode_region(&mut self, region: Region, sink: &mut dyn PixelSink) -> DecodeResult<()> {
        self.decode_region_with(region, sink, |_| {})
    }

    /// Like [`StripReader::decode_region`], calling `on_row` after each row
    pub fn decode_region_with<F>(&mut self, region: Region, sink: &mut dyn PixelSink, mut on_row: F) -> DecodeResult<()>
    where
        F: FnMut(u32),
    {
        debug!("Decoding region {:?}", region);
        for row in 0..region.height {
            self.read_line_window(region.x, region.y.saturating_add(row as i64), region.width as u64, sink, 0, row as i64)?;
            on_row(row);
        }
        Ok(())
    }

    /// Makes `strip` the cached in-memory strip
    ///
    /// A strip that cannot be read or inflated is cached as whatever bytes
    /// were recovered, so its pixels decode as transparent.
    fn load_strip(&mut self, strip: usize) {
        if matches!(&self.cached_strip, Some((index, _)) if *index == strip) {
            return;
        }

        let offset = self.header.strip_offsets[strip];
        let byte_count = self.header.strip_byte_counts[strip];
        debug!("Reading strip {} at offset {} with {} bytes", strip, offset, byte_count);

        let mut raw = Vec::new();
        let read = self
            .reader
            .seek(SeekFrom::Start(offset))
            .and_then(|_| (&mut *self.reader).take(byte_count).read_to_end(&mut raw));
        if let Err(e) = read {
            warn!("Error reading strip {}: {}", strip, e);
        }
        if (raw.len() as u64) < byte_count {
            warn!("Strip {} is truncated: {} of {} bytes", strip, raw.len(), byte_count);
        }

        let mut data = match self.compression_handler.decompress(&raw) {
            Ok(data) => data,
            Err(e) => {
                warn!("Error decompressing strip {}: {}", strip, e);
                Vec::new()
            }
        };

        if self.header.predictor == pred_consts::HORIZONTAL_DIFFERENCING as u64 {
            undo_horizontal_differencing(&mut data, self.header.row_stride as usize, self.header.pixel_stride as usize);
        }

        self.cached_strip = Some((strip, data));
    }
}

/// Reverses TIFF predictor 2 on 8-bit samples, row by row
fn undo_horizontal_differencing(data: &mut [u8], row_stride: usize, pixel_stride: usize) {
    if row_stride == 0 || pixel_stride == 0 {
        return;
    }
    for row in data.chunks_mut(row_stride) {
        for i in pixel_stride..row.len() {
            row[i] = row[i].wrapping_add(row[i - pixel_stride]);
        }
    }
}
