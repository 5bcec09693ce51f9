//! 8-bit sRGB image storage

use crate::color::{LinearRgba, Srgba};

use super::{grid_index, PixelSink};

/// Image stored as packed `0xAARRGGBB` words in gamma-encoded sRGB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrgbImage {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl SrgbImage {
    /// Creates a transparent image
    pub fn new(width: u32, height: u32) -> Self {
        SrgbImage {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Packed pixel words, row-major
    pub fn data(&self) -> &[u32] {
        &self.data
    }
}

impl PixelSink for SrgbImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: i64, y: i64, color: LinearRgba) {
        self.set_srgb_pixel(x, y, color.to_srgb());
    }

    fn get_pixel(&self, x: i64, y: i64) -> LinearRgba {
        self.get_srgb_pixel(x, y).to_linear()
    }

    fn set_srgb_pixel(&mut self, x: i64, y: i64, color: Srgba) {
        if let Some(index) = grid_index(self.width, self.height, x, y) {
            self.data[index] = color.to_argb();
        }
    }

    fn get_srgb_pixel(&self, x: i64, y: i64) -> Srgba {
        grid_index(self.width, self.height, x, y)
            .map(|index| Srgba::from_argb(self.data[index]))
            .unwrap_or(Srgba::TRANSPARENT)
    }
}
