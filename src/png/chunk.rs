//! PNG chunk framing
//!
//! A chunk on disk is a big-endian length, a four byte type, the payload
//! and a CRC-32 over type and payload. Chunks whose CRC does not match, or
//! whose typed payload fails to parse, are kept as [`Chunk::Raw`] so that a
//! damaged ancillary chunk never aborts a decode.

use std::fmt;
use std::io::{Read, Seek};

use byteorder::{BigEndian, ReadBytesExt};
use crc32fast::Hasher as Crc32;
use log::{trace, warn};

use crate::errors::{DecodeError, DecodeResult};
use crate::io::seekable::{stream_len, SeekableReader};
use crate::png::gamma::Gamma;
use crate::png::header::PngHeader;
use crate::png::palette::Palette;
use crate::png::text::TextEntry;

/// Largest chunk length PNG permits (2^31 - 1)
pub const MAX_CHUNK_LENGTH: u32 = i32::MAX as u32;

/// Four byte chunk type tag
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType(pub [u8; 4]);

impl ChunkType {
    pub const IHDR: ChunkType = ChunkType(*b"IHDR");
    pub const PLTE: ChunkType = ChunkType(*b"PLTE");
    pub const IDAT: ChunkType = ChunkType(*b"IDAT");
    pub const IEND: ChunkType = ChunkType(*b"IEND");
    pub const TEXT: ChunkType = ChunkType(*b"tEXt");
    pub const ZTXT: ChunkType = ChunkType(*b"zTXt");
    pub const GAMA: ChunkType = ChunkType(*b"gAMA");

    /// Critical chunks have an uppercase first letter
    pub fn is_critical(&self) -> bool {
        self.0[0] & 0x20 == 0
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkType({})", self)
    }
}

/// Why a chunk was kept in raw form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawReason {
    /// Type this decoder does not interpret
    Unrecognized,
    /// Stored CRC differs from the computed one
    ChecksumMismatch { stored: u32, computed: u32 },
    /// Recognized type whose payload failed to parse
    Malformed(String),
}

/// One chunk of a PNG stream
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    Header(PngHeader),
    Palette(Palette),
    ImageData(Vec<u8>),
    Text(TextEntry),
    CompressedText(TextEntry),
    Gamma(Gamma),
    End,
    Raw {
        chunk_type: ChunkType,
        data: Vec<u8>,
        reason: RawReason,
    },
}

impl Chunk {
    /// Reads one chunk at the cursor
    ///
    /// Framing failures (length past the end of the stream, truncated
    /// payload) are errors. CRC and payload problems produce a raw chunk.
    pub fn read(reader: &mut dyn SeekableReader) -> DecodeResult<Chunk> {
        let length = reader.read_u32::<BigEndian>()?;
        let mut type_bytes = [0u8; 4];
        reader.read_exact(&mut type_bytes)?;
        let chunk_type = ChunkType(type_bytes);

        if length > MAX_CHUNK_LENGTH {
            return Err(DecodeError::Format(format!("Chunk {} length {} exceeds 2^31-1", chunk_type, length)));
        }
        let position = reader.stream_position()?;
        let available = stream_len(reader)?.saturating_sub(position);
        if length as u64 + 4 > available {
            return Err(DecodeError::Format(format!(
                "Chunk {} claims {} bytes but only {} remain",
                chunk_type, length, available
            )));
        }

        let mut data = vec![0u8; length as usize];
        reader.read_exact(&mut data)?;
        let stored = reader.read_u32::<BigEndian>()?;

        let mut hasher = Crc32::new();
        hasher.update(&chunk_type.0);
        hasher.update(&data);
        let computed = hasher.finalize();

        trace!("Chunk {} length={} crc={:#010x}", chunk_type, length, stored);

        if stored != computed {
            warn!(
                "{}",
                DecodeError::ChecksumMismatch {
                    chunk_type: chunk_type.0,
                    stored,
                    computed
                }
            );
            return Ok(Chunk::Raw {
                chunk_type,
                data,
                reason: RawReason::ChecksumMismatch { stored, computed },
            });
        }

        Ok(Chunk::parse(chunk_type, data))
    }

    /// Turns a verified payload into its typed form, or raw on failure
    pub fn parse(chunk_type: ChunkType, data: Vec<u8>) -> Chunk {
        let parsed = match chunk_type {
            ChunkType::IHDR => PngHeader::parse(&data).map(Chunk::Header),
            ChunkType::PLTE => Palette::parse(&data).map(Chunk::Palette),
            ChunkType::TEXT => TextEntry::parse_text(&data).map(Chunk::Text),
            ChunkType::ZTXT => TextEntry::parse_compressed_text(&data).map(Chunk::CompressedText),
            ChunkType::GAMA => Gamma::parse(&data).map(Chunk::Gamma),
            ChunkType::IEND => Ok(Chunk::End),
            ChunkType::IDAT => return Chunk::ImageData(data),
            _ => {
                return Chunk::Raw {
                    chunk_type,
                    data,
                    reason: RawReason::Unrecognized,
                }
            }
        };

        parsed.unwrap_or_else(|e| {
            warn!("Keeping {} chunk raw: {}", chunk_type, e);
            Chunk::Raw {
                chunk_type,
                data,
                reason: RawReason::Malformed(e.to_string()),
            }
        })
    }

    /// The type tag this chunk was read with
    pub fn chunk_type(&self) -> ChunkType {
        match self {
            Chunk::Header(_) => ChunkType::IHDR,
            Chunk::Palette(_) => ChunkType::PLTE,
            Chunk::ImageData(_) => ChunkType::IDAT,
            Chunk::Text(_) => ChunkType::TEXT,
            Chunk::CompressedText(_) => ChunkType::ZTXT,
            Chunk::Gamma(_) => ChunkType::GAMA,
            Chunk::End => ChunkType::IEND,
            Chunk::Raw { chunk_type, .. } => *chunk_type,
        }
    }
}
