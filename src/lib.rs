//! PNG and TIFF/BigTIFF decoding
//!
//! Both decoders write into a [`PixelSink`]. PNG streams are read chunk by
//! chunk with tolerance for damaged ancillary data; TIFF images are read
//! strip by strip through a per-pixel decoder chosen from the baseline tags.

pub mod api;
pub mod color;
pub mod commands;
pub mod compression;
pub mod config;
pub mod errors;
pub mod extractor;
pub mod io;
pub mod png;
pub mod sink;
pub mod tiff;
pub mod utils;

pub use crate::api::{Glowkit, ImageFormat};

pub use color::{LinearRgba, Srgba};
pub use config::DecoderConfig;
pub use errors::{DecodeError, DecodeResult};
pub use extractor::{Region, StripReader};
pub use png::{PngFile, PngReader};
pub use sink::{LinearImage, PixelSink, SrgbImage};
pub use tiff::{BaselineHeader, TiffReader, TIFF};
