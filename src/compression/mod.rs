//! Compression handling for PNG and TIFF payloads
//!
//! This module implements strategies for handling different compression methods.

mod handler;
mod uncompressed;
mod deflate;
mod factory;

pub use handler::CompressionHandler;
pub use uncompressed::UncompressedHandler;
pub use deflate::ZlibHandler;
pub use factory::CompressionFactory;
