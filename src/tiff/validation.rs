//! TIFF validation utilities
//!
//! Sanity checks applied to offsets and sizes read from a file before they
//! are trusted for seeking or allocation.

use log::{debug, error};

use crate::errors::{DecodeError, DecodeResult};
use crate::tiff::constants::header;

/// Smallest offset at which a directory can start (after the classic header)
pub const MIN_IFD_OFFSET: u64 = 8;

/// Validates an IFD offset against the file size
pub fn validate_ifd_offset(offset: u64, file_size: u64) -> DecodeResult<()> {
    if offset >= file_size || offset < MIN_IFD_OFFSET {
        return Err(DecodeError::Format(format!(
            "Invalid IFD offset: {} (file size: {})",
            offset, file_size
        )));
    }

    Ok(())
}

/// Validates the BigTIFF pointer size and reserved field
///
/// Pointer sizes up to 8 are accepted; the reserved field must be zero.
pub fn validate_bigtiff_header(offset_size: u16, reserved: u16) -> DecodeResult<()> {
    debug!("BigTIFF offset size: {}, reserved: {}", offset_size, reserved);

    if offset_size > header::BIGTIFF_MAX_OFFSET_SIZE || reserved != 0 {
        error!("Invalid BigTIFF header: offset_size={}, reserved={}", offset_size, reserved);
        return Err(DecodeError::InvalidBigTIFFHeader);
    }

    Ok(())
}

/// Validates that `size` bytes starting at `offset` lie inside the file
pub fn validate_value_region(offset: u64, size: u64, file_size: u64) -> DecodeResult<()> {
    match offset.checked_add(size) {
        Some(end) if end <= file_size => Ok(()),
        _ => Err(DecodeError::Format(format!(
            "Value region at {} of {} bytes exceeds file size {}",
            offset, size, file_size
        ))),
    }
}
