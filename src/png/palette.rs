//! PLTE: color table for indexed images

use crate::color::Srgba;
use crate::errors::{DecodeError, DecodeResult};

/// Largest palette PNG allows
pub const MAX_PALETTE_ENTRIES: usize = 256;

/// Ordered RGB palette entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Srgba>,
}

impl Palette {
    /// Parses a PLTE payload of RGB triples
    pub fn parse(data: &[u8]) -> DecodeResult<Self> {
        if data.is_empty() || data.len() % 3 != 0 {
            return Err(DecodeError::Format(format!("PLTE length {} is not a positive multiple of 3", data.len())));
        }
        if data.len() / 3 > MAX_PALETTE_ENTRIES {
            return Err(DecodeError::Format(format!("PLTE has {} entries", data.len() / 3)));
        }

        let entries = data
            .chunks_exact(3)
            .map(|rgb| Srgba::opaque(rgb[0], rgb[1], rgb[2]))
            .collect();
        Ok(Palette { entries })
    }

    /// Looks up an index; indices past the end are an error
    pub fn get(&self, index: usize) -> DecodeResult<Srgba> {
        self.entries.get(index).copied().ok_or(DecodeError::PaletteIndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
