//! Seekable reader trait and implementations
//!
//! Both decoders read from a random-access byte source with a single
//! internal cursor. Concurrent decodes need independent readers.

use std::io::{Read, Seek, SeekFrom};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}

/// Returns the total length of the stream, restoring the cursor afterwards
pub fn stream_len(reader: &mut dyn SeekableReader) -> std::io::Result<u64> {
    let current = reader.stream_position()?;
    let len = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(current))?;
    Ok(len)
}
