//! Compression handler trait definition

use crate::errors::DecodeResult;

/// Strategy trait for handling different compression methods
pub trait CompressionHandler: Send + Sync {
    /// Inflates a whole payload; a damaged stream is a format error
    fn decompress(&self, data: &[u8]) -> DecodeResult<Vec<u8>>;

    /// Short name used in logs and analysis output
    fn name(&self) -> &'static str;
}
