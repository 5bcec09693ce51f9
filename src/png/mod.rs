//! PNG decoding
//!
//! Chunk framing with CRC checking, typed chunk payloads and non-interlaced
//! scanline reconstruction for every standard color type and bit depth.

pub mod chunk;
pub mod filter;
pub mod gamma;
pub mod header;
pub mod palette;
pub mod reader;
pub mod scanline;
pub mod text;
#[cfg(test)]
pub(crate) mod tests;

pub use chunk::{Chunk, ChunkType, RawReason};
pub use gamma::Gamma;
pub use header::{ColorType, PngHeader};
pub use palette::Palette;
pub use reader::{PngFile, PngReader, PNG_MAGIC};
pub use text::TextEntry;
