//! PNG stream reader
//!
//! Reading happens in two passes. [`PngReader::read_chunks`] walks the chunk
//! stream and returns every chunk it could frame, typed or raw.
//! [`PngFile::decode_into`] then assembles the header, palette and image
//! data from those chunks and reconstructs the pixels.

use std::io::{Read, Seek, SeekFrom};

use log::{debug, info, warn};

use crate::compression::CompressionFactory;
use crate::config::DecoderConfig;
use crate::errors::{DecodeError, DecodeResult};
use crate::io::seekable::{stream_len, SeekableReader};
use crate::png::chunk::{Chunk, ChunkType};
use crate::png::gamma::Gamma;
use crate::png::header::{ColorType, PngHeader};
use crate::png::palette::Palette;
use crate::png::scanline::decode_scanlines;
use crate::png::text::TextEntry;
use crate::sink::{PixelSink, SrgbImage};

/// `\x89PNG\r\n\x1a\n`
pub const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Reads PNG chunk streams
pub struct PngReader {
    config: DecoderConfig,
}

impl PngReader {
    pub fn new(config: DecoderConfig) -> Self {
        PngReader { config }
    }

    /// Reads all chunks up to `IEND` or the end of the stream
    ///
    /// Chunks that cannot be framed are skipped and counted. Once more than
    /// `chunk_error_budget` of them have been seen the read is abandoned.
    pub fn read_chunks(&self, reader: &mut dyn SeekableReader) -> DecodeResult<PngFile> {
        reader.seek(SeekFrom::Start(0))?;
        let mut magic = [0u8; 8];
        if reader.read_exact(&mut magic).is_err() || magic != PNG_MAGIC {
            return Err(DecodeError::InvalidMagic);
        }

        let len = stream_len(reader)?;
        let mut chunks = Vec::new();
        let mut error_count = 0usize;

        while reader.stream_position()? < len {
            let start = reader.stream_position()?;
            match Chunk::read(reader) {
                Ok(Chunk::End) => {
                    chunks.push(Chunk::End);
                    break;
                }
                Ok(chunk) => chunks.push(chunk),
                Err(e) => {
                    error_count += 1;
                    warn!("Skipping unreadable chunk at offset {}: {}", start, e);
                    if error_count > self.config.chunk_error_budget {
                        return Err(DecodeError::ChunkBudgetExceeded(error_count));
                    }
                    // Always make progress past the failed frame
                    if reader.stream_position()? <= start {
                        reader.seek(SeekFrom::Start(start + 1))?;
                    }
                }
            }
        }

        debug!("Read {} chunks ({} unreadable)", chunks.len(), error_count);
        Ok(PngFile {
            chunks,
            config: self.config,
        })
    }

    /// Decodes a whole PNG stream into a new sRGB image
    pub fn decode(&self, reader: &mut dyn SeekableReader) -> DecodeResult<SrgbImage> {
        let file = self.read_chunks(reader)?;
        let header = file.header()?;
        self.config.check_dimensions(header.width as u64, header.height as u64)?;
        let mut image = SrgbImage::new(header.width, header.height);
        file.decode_into(&mut image)?;
        Ok(image)
    }
}

/// The chunks of one PNG stream, in file order
#[derive(Debug, Clone)]
pub struct PngFile {
    chunks: Vec<Chunk>,
    config: DecoderConfig,
}

impl PngFile {
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// The single IHDR, which must come before any IDAT
    pub fn header(&self) -> DecodeResult<PngHeader> {
        let mut header = None;
        for chunk in &self.chunks {
            match chunk {
                Chunk::Header(h) if header.is_none() => header = Some(*h),
                Chunk::Header(_) => return Err(DecodeError::Format("Duplicate IHDR chunk".to_string())),
                Chunk::ImageData(_) if header.is_none() => {
                    return Err(DecodeError::Format("IDAT before IHDR".to_string()))
                }
                _ => {}
            }
        }
        header.ok_or(DecodeError::MissingHeader("IHDR"))
    }

    /// The first valid PLTE, if any
    pub fn palette(&self) -> Option<&Palette> {
        self.chunks.iter().find_map(|chunk| match chunk {
            Chunk::Palette(p) => Some(p),
            _ => None,
        })
    }

    /// The first valid gAMA, if any
    pub fn gamma(&self) -> Option<Gamma> {
        self.chunks.iter().find_map(|chunk| match chunk {
            Chunk::Gamma(g) => Some(*g),
            _ => None,
        })
    }

    /// All tEXt and zTXt entries in file order
    pub fn text_entries(&self) -> Vec<&TextEntry> {
        self.chunks
            .iter()
            .filter_map(|chunk| match chunk {
                Chunk::Text(t) | Chunk::CompressedText(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Chunks kept raw (unknown type, bad CRC or bad payload)
    pub fn raw_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(|chunk| matches!(chunk, Chunk::Raw { .. }))
    }

    /// Concatenated payload of every valid IDAT
    pub fn image_data(&self) -> Vec<u8> {
        let mut data = Vec::new();
        for chunk in &self.chunks {
            if let Chunk::ImageData(bytes) = chunk {
                data.extend_from_slice(bytes);
            }
        }
        data
    }

    /// Reconstructs the image into `sink`
    ///
    /// The sink should be at least as large as the header's dimensions;
    /// pixels outside it are dropped.
    pub fn decode_into(&self, sink: &mut dyn PixelSink) -> DecodeResult<()> {
        let header = self.header()?;
        header.check_supported()?;
        self.config.check_dimensions(header.width as u64, header.height as u64)?;

        let palette = self.palette();
        if header.color_type == ColorType::Indexed && palette.is_none() {
            return Err(DecodeError::MissingHeader("PLTE"));
        }

        let compressed = self.image_data();
        let handler = CompressionFactory::create_png_handler(header.compression_method)?;
        let inflated = handler.decompress(&compressed)?;
        debug!(
            "Inflated {} bytes of image data to {} bytes",
            compressed.len(),
            inflated.len()
        );

        decode_scanlines(&inflated, &header, palette, sink)?;
        info!("Decoded PNG {}", header);
        Ok(())
    }

    /// Returns true when any chunk of `chunk_type` was read, typed or raw
    pub fn contains(&self, chunk_type: ChunkType) -> bool {
        self.chunks.iter().any(|chunk| chunk.chunk_type() == chunk_type)
    }
}
