//! Pixel extraction from stripped TIFF images
//!
//! A [`StripReader`] turns a [`BaselineHeader`](crate::tiff::BaselineHeader)
//! and a byte source into row windows written to a pixel sink.

mod pixel_decoders;
mod region;
mod strip_reader;

pub use pixel_decoders::{decode_pixel, select_decoder, PixelDecoder, SIGNED_GRAY16_OFFSET};
pub use region::Region;
pub use strip_reader::StripReader;
