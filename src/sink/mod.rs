//! Pixel sinks
//!
//! A pixel sink is the only thing the PNG and TIFF decoders share: a
//! rectangular grid addressed by signed integer coordinates. Writes outside
//! the grid are ignored and reads outside it return transparent black, so
//! decoders never need to clip.

mod linear_image;
mod rgba_buffer;
mod srgb_image;

pub use linear_image::LinearImage;
pub use srgb_image::SrgbImage;

use crate::color::{LinearRgba, Srgba};

/// Destination grid for decoded pixels
pub trait PixelSink {
    /// Width of the grid in pixels
    fn width(&self) -> u32;

    /// Height of the grid in pixels
    fn height(&self) -> u32;

    /// Stores a linear color; out-of-bounds coordinates are a no-op
    fn set_pixel(&mut self, x: i64, y: i64, color: LinearRgba);

    /// Reads a linear color; out-of-bounds coordinates return transparent
    fn get_pixel(&self, x: i64, y: i64) -> LinearRgba;

    /// Stores an 8-bit gamma-encoded color
    ///
    /// Sinks that keep 8-bit data override this to avoid a lossy trip
    /// through linear space.
    fn set_srgb_pixel(&mut self, x: i64, y: i64, color: Srgba) {
        self.set_pixel(x, y, color.to_linear());
    }

    /// Reads an 8-bit gamma-encoded color
    fn get_srgb_pixel(&self, x: i64, y: i64) -> Srgba {
        self.get_pixel(x, y).to_srgb()
    }

    /// Returns true when (x, y) lies inside the grid
    fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }
}

/// Row-major index for an in-bounds coordinate
pub(crate) fn grid_index(width: u32, height: u32, x: i64, y: i64) -> Option<usize> {
    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
        None
    } else {
        Some(y as usize * width as usize + x as usize)
    }
}
