//! Region structure for defining a decode window
//!
//! Coordinates are in source pixels with (0,0) at the top-left corner.
//! The origin may lie outside the image; pixels that do are decoded as
//! transparent.

use std::str::FromStr;

use crate::errors::DecodeError;

/// Rectangular source window (in pixel coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// X-coordinate of the top-left corner (pixels from left)
    pub x: i64,

    /// Y-coordinate of the top-left corner (pixels from top)
    pub y: i64,

    /// Width of the region in pixels
    pub width: u32,

    /// Height of the region in pixels
    pub height: u32,
}

impl Region {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Region { x, y, width, height }
    }

    /// The whole of a `width` × `height` image
    pub fn full(width: u32, height: u32) -> Self {
        Region::new(0, 0, width, height)
    }

    /// Get the rightmost X coordinate (exclusive)
    pub fn end_x(&self) -> i64 {
        self.x.saturating_add(self.width as i64)
    }

    /// Get the bottommost Y coordinate (exclusive)
    pub fn end_y(&self) -> i64 {
        self.y.saturating_add(self.height as i64)
    }
}

impl FromStr for Region {
    type Err = DecodeError;

    /// Parses `x,y,width,height`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(DecodeError::Config(format!("Region '{}' must be x,y,width,height", s)));
        }
        let bad = |part: &str| DecodeError::Config(format!("Invalid region component '{}'", part));

        Ok(Region {
            x: parts[0].parse().map_err(|_| bad(parts[0]))?,
            y: parts[1].parse().map_err(|_| bad(parts[1]))?,
            width: parts[2].parse().map_err(|_| bad(parts[2]))?,
            height: parts[3].parse().map_err(|_| bad(parts[3]))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let region: Region = "-2, 3,10,4".parse().unwrap();
        assert_eq!(region, Region::new(-2, 3, 10, 4));
        assert_eq!(region.end_x(), 8);
        assert_eq!(region.end_y(), 7);
    }

    #[test]
    fn test_end_clamps_at_coordinate_limit() {
        let region = Region::new(i64::MAX - 1, i64::MAX, 4, 4);
        assert_eq!(region.end_x(), i64::MAX);
        assert_eq!(region.end_y(), i64::MAX);
        assert_eq!(Region::new(i64::MIN, 0, 2, 1).end_x(), i64::MIN + 2);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("1,2,3".parse::<Region>().is_err());
        assert!("1,2,-3,4".parse::<Region>().is_err());
        assert!("a,2,3,4".parse::<Region>().is_err());
    }
}
