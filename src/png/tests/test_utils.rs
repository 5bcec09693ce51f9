//! PNG fixture builders

extern crate std;

use std::io::{Cursor, Write};
use std::vec::Vec;

use byteorder::{BigEndian, WriteBytesExt};
use crc32fast::Hasher as Crc32;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::png::reader::PNG_MAGIC;

/// Frames one chunk; `corrupt` flips a bit of the stored CRC
pub fn chunk(chunk_type: &[u8; 4], data: &[u8], corrupt: bool) -> Vec<u8> {
    let mut hasher = Crc32::new();
    hasher.update(chunk_type);
    hasher.update(data);
    let mut crc = hasher.finalize();
    if corrupt {
        crc ^= 0x8000_0000;
    }

    let mut buffer = Vec::new();
    buffer.write_u32::<BigEndian>(data.len() as u32).unwrap();
    buffer.extend_from_slice(chunk_type);
    buffer.extend_from_slice(data);
    buffer.write_u32::<BigEndian>(crc).unwrap();
    buffer
}

/// IHDR payload
pub fn ihdr(width: u32, height: u32, depth: u8, color: u8, interlace: u8) -> Vec<u8> {
    let mut data = Vec::new();
    data.write_u32::<BigEndian>(width).unwrap();
    data.write_u32::<BigEndian>(height).unwrap();
    data.extend_from_slice(&[depth, color, 0, 0, interlace]);
    data
}

/// Zlib-compresses filtered scanlines
pub fn deflate(raw: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw).unwrap();
    encoder.finish().unwrap()
}

/// Magic followed by the given framed chunks
pub fn png_stream(chunks: &[Vec<u8>]) -> Cursor<Vec<u8>> {
    let mut buffer = PNG_MAGIC.to_vec();
    for c in chunks {
        buffer.extend_from_slice(c);
    }
    Cursor::new(buffer)
}

/// A complete image: IHDR, optional extra chunks, one IDAT, IEND
pub fn simple_png(header: Vec<u8>, extra: Vec<Vec<u8>>, scanlines: &[u8]) -> Cursor<Vec<u8>> {
    let mut chunks = vec![chunk(b"IHDR", &header, false)];
    chunks.extend(extra);
    chunks.push(chunk(b"IDAT", &deflate(scanlines), false));
    chunks.push(chunk(b"IEND", &[], false));
    png_stream(&chunks)
}
