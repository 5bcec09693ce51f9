//! Error types shared by the PNG and TIFF decoders

use std::fmt;
use std::io;

/// Decoding error types
///
/// Format errors abort a whole decode. Checksum and out-of-bounds errors are
/// produced by low-level routines and normally recovered close to where they
/// happen (raw chunks, transparent pixels) instead of reaching the caller.
#[derive(Debug)]
pub enum DecodeError {
    /// I/O error
    IoError(io::Error),
    /// PNG magic number missing
    InvalidMagic,
    /// Invalid TIFF byte order marker
    InvalidByteOrder(u16),
    /// Unsupported TIFF version (neither 42 nor 43)
    UnsupportedVersion(u16),
    /// Invalid BigTIFF header (pointer size or reserved field)
    InvalidBigTIFFHeader,
    /// A mandatory header chunk or tag is missing
    MissingHeader(&'static str),
    /// Image dimensions not found
    MissingDimensions,
    /// Too many malformed PNG chunks
    ChunkBudgetExceeded(usize),
    /// Structural problem in the file
    Format(String),
    /// Stored CRC does not match the computed one
    ChecksumMismatch {
        chunk_type: [u8; 4],
        stored: u32,
        computed: u32,
    },
    /// Pixel layout this decoder cannot handle
    UnsupportedFormat(String),
    /// Unsupported TIFF field type
    UnsupportedFieldType(u16),
    /// Read past the end of the available data
    OutOfBounds(String),
    /// Palette index outside the palette
    PaletteIndexOutOfRange { index: usize, len: usize },
    /// Tag not found
    TagNotFound(u16),
    /// Bad configuration value
    Config(String),
    /// Writing a decoded image failed
    Output(String),
}

impl DecodeError {
    /// Returns true for errors that mean the file itself is malformed
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            DecodeError::InvalidMagic
                | DecodeError::InvalidByteOrder(_)
                | DecodeError::UnsupportedVersion(_)
                | DecodeError::InvalidBigTIFFHeader
                | DecodeError::MissingHeader(_)
                | DecodeError::MissingDimensions
                | DecodeError::ChunkBudgetExceeded(_)
                | DecodeError::Format(_)
        )
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::IoError(e) => write!(f, "I/O error: {}", e),
            DecodeError::InvalidMagic => write!(f, "Not a valid PNG file"),
            DecodeError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            DecodeError::UnsupportedVersion(v) => write!(f, "Unsupported TIFF version: {}", v),
            DecodeError::InvalidBigTIFFHeader => write!(f, "Invalid BigTIFF header"),
            DecodeError::MissingHeader(what) => write!(f, "Missing mandatory header: {}", what),
            DecodeError::MissingDimensions => write!(f, "Image dimensions not found"),
            DecodeError::ChunkBudgetExceeded(n) => write!(f, "Gave up after {} malformed chunks", n),
            DecodeError::Format(msg) => write!(f, "Format error: {}", msg),
            DecodeError::ChecksumMismatch { chunk_type, stored, computed } => write!(
                f,
                "CRC mismatch in chunk {}: stored {:#010x}, computed {:#010x}",
                String::from_utf8_lossy(chunk_type),
                stored,
                computed
            ),
            DecodeError::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
            DecodeError::UnsupportedFieldType(ft) => write!(f, "Unsupported field type: {}", ft),
            DecodeError::OutOfBounds(msg) => write!(f, "Out of bounds: {}", msg),
            DecodeError::PaletteIndexOutOfRange { index, len } => {
                write!(f, "Palette index {} out of range (palette has {} entries)", index, len)
            }
            DecodeError::TagNotFound(tag) => write!(f, "Tag not found: {}", tag),
            DecodeError::Config(msg) => write!(f, "Configuration error: {}", msg),
            DecodeError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DecodeError {
    fn from(error: io::Error) -> Self {
        DecodeError::IoError(error)
    }
}

impl From<String> for DecodeError {
    fn from(msg: String) -> Self {
        DecodeError::Format(msg)
    }
}

/// Result type for decoding operations
pub type DecodeResult<T> = Result<T, DecodeError>;
