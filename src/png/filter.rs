//! Scanline reconstruction filters
//!
//! Each row of inflated image data starts with a filter byte. The filters
//! predict every byte from the reconstructed byte one pixel to the left
//! (`a`), the byte above (`b`) and the byte above-left (`c`); the stored
//! byte is the wrapping difference from that prediction.

use crate::errors::{DecodeError, DecodeResult};

/// Per-row filter selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FilterType {
    NoFilter = 0,
    Sub = 1,
    Up = 2,
    Avg = 3,
    Paeth = 4,
}

impl FilterType {
    pub fn from_u8(n: u8) -> Option<FilterType> {
        match n {
            0 => Some(FilterType::NoFilter),
            1 => Some(FilterType::Sub),
            2 => Some(FilterType::Up),
            3 => Some(FilterType::Avg),
            4 => Some(FilterType::Paeth),
            _ => None,
        }
    }

    /// Like [`FilterType::from_u8`], failing with a format error
    pub fn from_filter_byte(n: u8) -> DecodeResult<FilterType> {
        FilterType::from_u8(n).ok_or_else(|| DecodeError::Format(format!("Unknown filter type #{}", n)))
    }
}

/// Paeth predictor
///
/// Picks whichever of `a` (left), `b` (up), `c` (up-left) is closest to
/// `a + b - c`. Ties go to left, then up.
pub fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();

    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

/// Reverses `filter` on `current` in place
///
/// `previous` is the reconstructed row above (all zero for the first row)
/// and must be as long as `current`. `bpp` is the byte distance to the left
/// neighbor.
pub fn unfilter(filter: FilterType, bpp: usize, previous: &[u8], current: &mut [u8]) {
    let len = current.len();
    match filter {
        FilterType::NoFilter => {}
        FilterType::Sub => {
            for i in bpp..len {
                current[i] = current[i].wrapping_add(current[i - bpp]);
            }
        }
        FilterType::Up => {
            for i in 0..len {
                current[i] = current[i].wrapping_add(previous[i]);
            }
        }
        FilterType::Avg => {
            for i in 0..len {
                let left = if i >= bpp { current[i - bpp] as u16 } else { 0 };
                let up = previous[i] as u16;
                current[i] = current[i].wrapping_add(((left + up) / 2) as u8);
            }
        }
        FilterType::Paeth => {
            for i in 0..len {
                let (left, up_left) = if i >= bpp { (current[i - bpp], previous[i - bpp]) } else { (0, 0) };
                current[i] = current[i].wrapping_add(paeth(left, previous[i], up_left));
            }
        }
    }
}
