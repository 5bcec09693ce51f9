//! Color values exchanged with pixel sinks
//!
//! Two representations cross the sink boundary: [`Srgba`], 8-bit
//! gamma-encoded channels exactly as stored in most files, and
//! [`LinearRgba`], floating point linear-light channels. Conversion between
//! them goes through the sRGB transfer functions below.

/// Gamma assumed by the sRGB transfer curve exponent
pub const SRGB_GAMMA: f32 = 2.4;

/// The W3C "ideal" display gamma
pub const IDEAL_GAMMA: f32 = 2.2;

/// Converts one gamma-encoded sample (0..=1) to linear space
pub fn gamma_to_linear(srgb: f32) -> f32 {
    if srgb <= 0.0 {
        0.0
    } else if srgb <= 0.04045 {
        srgb / 12.92
    } else if srgb <= 1.0 {
        ((srgb + 0.055) / 1.055).powf(SRGB_GAMMA)
    } else {
        1.0
    }
}

/// Converts one linear sample (0..=1) to gamma-encoded space
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear <= 0.0 {
        0.0
    } else if linear <= 0.003_130_8 {
        linear * 12.92
    } else if linear <= 1.0 {
        1.055 * linear.powf(1.0 / SRGB_GAMMA) - 0.055
    } else {
        1.0
    }
}

/// An 8-bit gamma-encoded color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Srgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Srgba {
    pub const TRANSPARENT: Srgba = Srgba { r: 0, g: 0, b: 0, a: 0 };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Srgba { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Srgba { r, g, b, a: 0xFF }
    }

    pub const fn gray(level: u8) -> Self {
        Srgba::opaque(level, level, level)
    }

    /// Unpacks an `0xAARRGGBB` word
    pub fn from_argb(argb: u32) -> Self {
        Srgba {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Packs into an `0xAARRGGBB` word
    pub fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub fn to_linear(self) -> LinearRgba {
        LinearRgba::from_gamma(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }
}

/// A linear-light color with straight alpha, channels nominally in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearRgba {
    pub const TRANSPARENT: LinearRgba = LinearRgba { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        LinearRgba { r, g, b, a }
    }

    pub const fn gray(level: f32) -> Self {
        LinearRgba { r: level, g: level, b: level, a: 1.0 }
    }

    /// Builds a linear color from gamma-encoded channels in 0..=1
    pub fn from_gamma(r: f32, g: f32, b: f32, a: f32) -> Self {
        LinearRgba {
            r: gamma_to_linear(r),
            g: gamma_to_linear(g),
            b: gamma_to_linear(b),
            a,
        }
    }

    /// Converts to 8-bit gamma-encoded channels, clamping out-of-gamut values
    pub fn to_srgb(self) -> Srgba {
        let encode = |v: f32| (linear_to_gamma(v) * 255.0).round().clamp(0.0, 255.0) as u8;
        Srgba {
            r: encode(self.r),
            g: encode(self.g),
            b: encode(self.b),
            a: (self.a * 255.0).round().clamp(0.0, 255.0) as u8,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_packing() {
        let color = Srgba::from_argb(0x80FF0010);
        assert_eq!(color, Srgba::new(0xFF, 0x00, 0x10, 0x80));
        assert_eq!(color.to_argb(), 0x80FF0010);
    }

    #[test]
    fn test_transfer_functions_invert() {
        for i in 0..=255u32 {
            let v = i as f32 / 255.0;
            let back = linear_to_gamma(gamma_to_linear(v));
            assert!((back - v).abs() < 1e-4, "{} -> {}", v, back);
        }
    }

    #[test]
    fn test_srgb_round_trip_is_exact_for_8_bit() {
        for i in 0..=255u8 {
            let color = Srgba::new(i, 255 - i, i / 2, i);
            assert_eq!(color.to_linear().to_srgb(), color);
        }
    }

    #[test]
    fn test_out_of_range_clamps() {
        assert_eq!(gamma_to_linear(-0.5), 0.0);
        assert_eq!(gamma_to_linear(1.5), 1.0);
        assert_eq!(LinearRgba::new(2.0, -1.0, 0.0, 1.0).to_srgb(), Srgba::new(255, 0, 0, 255));
    }
}
