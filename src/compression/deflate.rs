//! Handler for zlib-wrapped deflate data
//!
//! Used for PNG image data and zTXt values (compression method 0) as well as
//! TIFF Adobe Deflate strips.

use std::io::Read;
use flate2::read::ZlibDecoder;
use crate::errors::{DecodeError, DecodeResult};
use super::handler::CompressionHandler;

/// Zlib/deflate decompression handler (TIFF compression codes 8 and 32946)
pub struct ZlibHandler;

impl CompressionHandler for ZlibHandler {
    fn decompress(&self, data: &[u8]) -> DecodeResult<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(data);
        let mut decompressed_data = Vec::new();
        match decoder.read_to_end(&mut decompressed_data) {
            Ok(_) => Ok(decompressed_data),
            Err(e) => Err(DecodeError::Format(format!("Corrupt deflate stream: {}", e))),
        }
    }

    fn name(&self) -> &'static str {
        "Deflate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_inflates_zlib_stream() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"hello hello hello").unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(ZlibHandler.decompress(&compressed).unwrap(), b"hello hello hello");
    }

    #[test]
    fn test_garbage_is_format_error() {
        let result = ZlibHandler.decompress(&[0x12, 0x34, 0x56]);
        assert!(matches!(result, Err(DecodeError::Format(_))));
    }
}
