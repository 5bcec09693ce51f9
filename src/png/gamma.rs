//! gAMA: file gamma stored as `round(100000 / gamma)`

use byteorder::{BigEndian, ByteOrder};

use crate::color::IDEAL_GAMMA;
use crate::errors::{DecodeError, DecodeResult};

/// Stored value that stands for exactly [`IDEAL_GAMMA`]
pub const IDEAL_GAMMA_VALUE: u32 = 45455;

/// Parsed gAMA chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gamma {
    /// Stored value, 100000 / gamma
    pub value: u32,
}

impl Gamma {
    pub fn parse(data: &[u8]) -> DecodeResult<Self> {
        if data.len() != 4 {
            return Err(DecodeError::Format(format!("gAMA length {}", data.len())));
        }
        let value = BigEndian::read_i32(data);
        if value <= 0 {
            return Err(DecodeError::Format(format!("gAMA value {}", value)));
        }
        Ok(Gamma { value: value as u32 })
    }

    /// Display gamma
    pub fn gamma(&self) -> f32 {
        if self.value == IDEAL_GAMMA_VALUE {
            IDEAL_GAMMA
        } else {
            1.0 / (self.value as f32 / 100_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideal_gamma() {
        let gamma = Gamma::parse(&[0, 0, 0xB1, 0x8F]).unwrap();
        assert_eq!(gamma.value, 45455);
        assert_eq!(gamma.gamma(), IDEAL_GAMMA);
    }

    #[test]
    fn test_other_values_invert() {
        let gamma = Gamma::parse(&100_000i32.to_be_bytes()).unwrap();
        assert_eq!(gamma.gamma(), 1.0);
        let gamma = Gamma::parse(&50_000i32.to_be_bytes()).unwrap();
        assert!((gamma.gamma() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_bad_payload() {
        assert!(Gamma::parse(&[0, 0, 1]).is_err());
        assert!(Gamma::parse(&0i32.to_be_bytes()).is_err());
    }
}
