//! TIFF file format parsing module
//!
//! This module provides structures and functions for reading
//! classic TIFF and BigTIFF directories and deriving a baseline header.

pub mod baseline;
pub mod constants;
pub mod field_type;
pub mod ifd;
pub mod reader;
pub mod types;
pub(crate) mod validation;
#[cfg(test)]
pub(crate) mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use baseline::{BaselineHeader, PhotometricInterpretation, SampleFormat};
pub use field_type::FieldType;
pub use ifd::{IFD, IFDEntry};
pub use reader::TiffReader;
pub use types::TIFF;
