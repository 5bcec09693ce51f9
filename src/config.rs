//! Decoder limits and their TOML representation
//!
//! A config file looks like:
//!
//! ```toml
//! [png]
//! chunk_error_budget = 1000
//!
//! [tiff]
//! max_ifds = 100
//!
//! [limits]
//! max_pixels = 2147483647
//! ```
//!
//! Missing keys keep their defaults.

use std::fs;

use log::debug;

use crate::errors::{DecodeError, DecodeResult};

/// Malformed PNG chunks tolerated before a read is abandoned
pub const DEFAULT_CHUNK_ERROR_BUDGET: usize = 1000;

/// Upper bound on the length of a TIFF directory chain
pub const DEFAULT_MAX_IFDS: usize = 100;

/// Largest image (width × height) a decode will allocate for
pub const DEFAULT_MAX_PIXELS: u64 = i32::MAX as u64;

/// Limits applied while decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Malformed PNG chunks tolerated before failing with a format error
    pub chunk_error_budget: usize,
    /// Maximum number of TIFF directories followed
    pub max_ifds: usize,
    /// Maximum width × height of a decoded image
    pub max_pixels: u64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            chunk_error_budget: DEFAULT_CHUNK_ERROR_BUDGET,
            max_ifds: DEFAULT_MAX_IFDS,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl DecoderConfig {
    pub fn with_chunk_error_budget(mut self, budget: usize) -> Self {
        self.chunk_error_budget = budget;
        self
    }

    pub fn with_max_ifds(mut self, max_ifds: usize) -> Self {
        self.max_ifds = max_ifds;
        self
    }

    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> DecodeResult<Self> {
        let toml_value: toml::Value = content
            .parse()
            .map_err(|e| DecodeError::Config(format!("Failed to parse TOML: {}", e)))?;

        let mut config = DecoderConfig::default();

        if let Some(v) = Self::read_integer(&toml_value, "png", "chunk_error_budget")? {
            config.chunk_error_budget = v as usize;
        }
        if let Some(v) = Self::read_integer(&toml_value, "tiff", "max_ifds")? {
            config.max_ifds = v as usize;
        }
        if let Some(v) = Self::read_integer(&toml_value, "limits", "max_pixels")? {
            config.max_pixels = v;
        }

        debug!("Loaded decoder config: {:?}", config);
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn from_file(path: &str) -> DecodeResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Checks that an image of the given size may be decoded
    pub fn check_dimensions(&self, width: u64, height: u64) -> DecodeResult<()> {
        let pixels = width.checked_mul(height).ok_or_else(|| {
            DecodeError::Format(format!("Image size {}x{} overflows", width, height))
        })?;
        if pixels > self.max_pixels {
            return Err(DecodeError::Format(format!(
                "Image is too big to load into memory: {}x{} (limit {} pixels)",
                width, height, self.max_pixels
            )));
        }
        Ok(())
    }

    fn read_integer(root: &toml::Value, table: &str, key: &str) -> DecodeResult<Option<u64>> {
        let value = match root.get(table).and_then(|t| t.get(key)) {
            Some(value) => value,
            None => return Ok(None),
        };

        match value.as_integer() {
            Some(n) if n >= 0 => Ok(Some(n as u64)),
            _ => Err(DecodeError::Config(format!(
                "{}.{} must be a non-negative integer, found {}",
                table, key, value
            ))),
        }
    }
}
