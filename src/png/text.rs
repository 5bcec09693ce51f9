//! tEXt and zTXt: Latin-1 keyword/value metadata

use crate::compression::CompressionFactory;
use crate::errors::{DecodeError, DecodeResult};

/// A keyword/value pair from a tEXt or zTXt chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    pub keyword: String,
    pub text: String,
    /// True when the value was stored deflate-compressed (zTXt)
    pub compressed: bool,
}

impl TextEntry {
    /// Parses a tEXt payload
    pub fn parse_text(data: &[u8]) -> DecodeResult<Self> {
        let (keyword, rest) = split_keyword(data)?;
        Ok(TextEntry {
            keyword,
            text: latin1(rest),
            compressed: false,
        })
    }

    /// Parses a zTXt payload, inflating the value
    pub fn parse_compressed_text(data: &[u8]) -> DecodeResult<Self> {
        let (keyword, rest) = split_keyword(data)?;
        let (&method, compressed) = rest
            .split_first()
            .ok_or_else(|| DecodeError::Format("zTXt has no compression method".to_string()))?;
        let handler = CompressionFactory::create_png_handler(method)?;
        let inflated = handler.decompress(compressed)?;
        Ok(TextEntry {
            keyword,
            text: latin1(&inflated),
            compressed: true,
        })
    }
}

fn split_keyword(data: &[u8]) -> DecodeResult<(String, &[u8])> {
    let nul = data
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| DecodeError::Format("Text keyword is not NUL-terminated".to_string()))?;
    if nul == 0 || nul > 79 {
        return Err(DecodeError::Format(format!("Text keyword length {}", nul)));
    }
    Ok((latin1(&data[..nul]), &data[nul + 1..]))
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_text() {
        let entry = TextEntry::parse_text(b"Title\0Caf\xe9").unwrap();
        assert_eq!(entry.keyword, "Title");
        assert_eq!(entry.text, "Café");
        assert!(!entry.compressed);
    }

    #[test]
    fn test_compressed_text() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"a long comment").unwrap();
        let mut data = b"Comment\0\0".to_vec();
        data.extend(encoder.finish().unwrap());

        let entry = TextEntry::parse_compressed_text(&data).unwrap();
        assert_eq!(entry.keyword, "Comment");
        assert_eq!(entry.text, "a long comment");
        assert!(entry.compressed);
    }

    #[test]
    fn test_malformed() {
        assert!(TextEntry::parse_text(b"no terminator").is_err());
        assert!(TextEntry::parse_text(b"\0value").is_err());
        assert!(TextEntry::parse_compressed_text(b"Key\0").is_err());
        assert!(TextEntry::parse_compressed_text(b"Key\0\x01abc").is_err());
    }
}
