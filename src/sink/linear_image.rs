//! Floating point linear image storage

use crate::color::LinearRgba;

use super::{grid_index, PixelSink};

/// Image stored as linear-light floating point colors
#[derive(Debug, Clone, PartialEq)]
pub struct LinearImage {
    width: u32,
    height: u32,
    data: Vec<LinearRgba>,
}

impl LinearImage {
    /// Creates a transparent image
    pub fn new(width: u32, height: u32) -> Self {
        LinearImage {
            width,
            height,
            data: vec![LinearRgba::TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Pixels, row-major
    pub fn data(&self) -> &[LinearRgba] {
        &self.data
    }
}

impl PixelSink for LinearImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: i64, y: i64, color: LinearRgba) {
        if let Some(index) = grid_index(self.width, self.height, x, y) {
            self.data[index] = color;
        }
    }

    fn get_pixel(&self, x: i64, y: i64) -> LinearRgba {
        grid_index(self.width, self.height, x, y)
            .map(|index| self.data[index])
            .unwrap_or(LinearRgba::TRANSPARENT)
    }
}
