//! Factory for creating compression handlers

use crate::errors::{DecodeError, DecodeResult};
use crate::tiff::constants::compression;
use super::handler::CompressionHandler;
use super::uncompressed::UncompressedHandler;
use super::deflate::ZlibHandler;

/// Factory for creating compression handlers
pub struct CompressionFactory;

impl CompressionFactory {
    /// Create a handler for a TIFF compression code
    pub fn create_handler(code: u64) -> DecodeResult<Box<dyn CompressionHandler>> {
        match code {
            c if c == compression::NONE as u64 => Ok(Box::new(UncompressedHandler)),
            c if c == compression::DEFLATE as u64 || c == compression::DEFLATE_LEGACY as u64 => {
                Ok(Box::new(ZlibHandler))
            }
            _ => Err(DecodeError::UnsupportedFormat(format!(
                "TIFF compression {} is not supported", code
            ))),
        }
    }

    /// Create a handler for a PNG compression method byte
    ///
    /// Method 0 (zlib) is the only one PNG defines.
    pub fn create_png_handler(method: u8) -> DecodeResult<Box<dyn CompressionHandler>> {
        match method {
            0 => Ok(Box::new(ZlibHandler)),
            _ => Err(DecodeError::UnsupportedFormat(format!(
                "PNG compression method {} is not supported", method
            ))),
        }
    }
}
