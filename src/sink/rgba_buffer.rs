//! Pixel sink over the `image` crate's 8-bit RGBA buffer

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::color::{LinearRgba, Srgba};

use super::PixelSink;

impl PixelSink for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn set_pixel(&mut self, x: i64, y: i64, color: LinearRgba) {
        self.set_srgb_pixel(x, y, color.to_srgb());
    }

    fn get_pixel(&self, x: i64, y: i64) -> LinearRgba {
        self.get_srgb_pixel(x, y).to_linear()
    }

    fn set_srgb_pixel(&mut self, x: i64, y: i64, color: Srgba) {
        if PixelSink::contains(self, x, y) {
            self.put_pixel(x as u32, y as u32, Rgba([color.r, color.g, color.b, color.a]));
        }
    }

    fn get_srgb_pixel(&self, x: i64, y: i64) -> Srgba {
        if !PixelSink::contains(self, x, y) {
            return Srgba::TRANSPARENT;
        }
        let p = ImageBuffer::get_pixel(self, x as u32, y as u32);
        Srgba::new(p[0], p[1], p[2], p[3])
    }
}
