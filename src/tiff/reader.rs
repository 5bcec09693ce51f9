//! TIFF file reader implementation
//!
//! This module implements the TIFF/BigTIFF directory reader. It uses the
//! byte order strategy for every multi-byte read, walks the IFD chain and
//! extracts typed tag values from entries.

use std::collections::HashSet;
use std::io::{Cursor, Seek, SeekFrom};

use log::{debug, info, trace, warn};

use crate::config::DecoderConfig;
use crate::errors::{DecodeError, DecodeResult};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::{stream_len, SeekableReader};
use crate::tiff::constants::header;
use crate::tiff::field_type::FieldType;
use crate::tiff::ifd::{tag_name, IFDEntry, IFD};
use crate::tiff::types::TIFF;
use crate::tiff::validation;

/// Reader for TIFF and BigTIFF files
pub struct TiffReader {
    /// Current byte order handler
    byte_order_handler: Option<Box<dyn ByteOrderHandler>>,
    /// Whether currently reading BigTIFF format
    is_big_tiff: bool,
    /// Limits for the directory walk
    config: DecoderConfig,
}

impl TiffReader {
    /// Creates a new TIFF reader
    pub fn new(config: DecoderConfig) -> Self {
        TiffReader {
            byte_order_handler: None,
            is_big_tiff: false,
            config,
        }
    }

    /// Returns the byte order handler once the header has been read
    fn handler(&self) -> DecodeResult<&dyn ByteOrderHandler> {
        self.byte_order_handler
            .as_deref()
            .ok_or_else(|| DecodeError::Format("Byte order not yet determined".to_string()))
    }

    /// Returns whether the current file is a BigTIFF
    pub fn is_big_tiff(&self) -> bool {
        self.is_big_tiff
    }

    /// Reads a TIFF file from the given reader
    ///
    /// 1. Detect byte order (`II` / `MM`)
    /// 2. Check for classic (42) or BigTIFF (43) and validate the header
    /// 3. Read all IFDs in the chain
    pub fn read(&mut self, reader: &mut dyn SeekableReader) -> DecodeResult<TIFF> {
        reader.seek(SeekFrom::Start(0))?;

        let byte_order = ByteOrder::detect(reader)?;
        debug!("Detected byte order: {}", byte_order.name());
        self.byte_order_handler = Some(byte_order.create_handler());

        let (is_big_tiff, first_ifd_offset) = self.read_header(reader)?;
        self.is_big_tiff = is_big_tiff;
        debug!("First IFD offset: {}", first_ifd_offset);

        let file_size = stream_len(reader)?;
        validation::validate_ifd_offset(first_ifd_offset, file_size)?;

        let mut tiff = TIFF::new(self.is_big_tiff, byte_order);
        tiff.ifds = self.read_ifd_chain(reader, first_ifd_offset)?;

        info!(
            "Read {} IFDs from {} file",
            tiff.ifds.len(),
            if self.is_big_tiff { "BigTIFF" } else { "TIFF" }
        );
        Ok(tiff)
    }

    /// Reads the version and variant-specific header fields
    ///
    /// Returns whether the file is BigTIFF and the offset of the first IFD.
    fn read_header(&self, reader: &mut dyn SeekableReader) -> DecodeResult<(bool, u64)> {
        let handler = self.handler()?;
        let version = handler.read_u16(reader)?;
        debug!("TIFF version: {}", version);

        match version {
            header::TIFF_VERSION => {
                let offset = handler.read_u32(reader)? as u64;
                Ok((false, offset))
            }
            header::BIG_TIFF_VERSION => {
                let offset_size = handler.read_u16(reader)?;
                let reserved = handler.read_u16(reader)?;
                validation::validate_bigtiff_header(offset_size, reserved)?;
                let offset = handler.read_u64(reader)?;
                Ok((true, offset))
            }
            _ => Err(DecodeError::UnsupportedVersion(version)),
        }
    }

    /// Reads a chain of IFDs starting from the given offset
    ///
    /// A failure on the first IFD is fatal. Later failures end the chain
    /// with a warning and keep what was read so far.
    fn read_ifd_chain(&self, reader: &mut dyn SeekableReader, first_ifd_offset: u64) -> DecodeResult<Vec<IFD>> {
        let mut ifds = Vec::new();
        let mut visited = HashSet::new();
        let mut ifd_offset = first_ifd_offset;

        while ifd_offset != 0 {
            if ifds.len() >= self.config.max_ifds {
                warn!("Stopping IFD chain after {} directories", self.config.max_ifds);
                break;
            }
            if !visited.insert(ifd_offset) {
                warn!("IFD chain loops back to offset {}, stopping", ifd_offset);
                break;
            }

            debug!("Reading IFD at offset: {}", ifd_offset);
            match self.read_ifd(reader, ifd_offset, ifds.len()) {
                Ok(ifd) => {
                    ifd_offset = ifd.next_ifd;
                    ifds.push(ifd);
                }
                Err(e) if ifds.is_empty() => return Err(e),
                Err(e) => {
                    warn!("Error reading IFD {}: {}", ifds.len(), e);
                    break;
                }
            }
        }

        Ok(ifds)
    }

    /// Reads one IFD: entry count, entries and the next-IFD pointer
    pub fn read_ifd(&self, reader: &mut dyn SeekableReader, offset: u64, number: usize) -> DecodeResult<IFD> {
        let handler = self.handler()?;
        reader.seek(SeekFrom::Start(offset))?;

        let entry_count = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u16(reader)? as u64
        };
        debug!("IFD #{} entry count: {}", number, entry_count);

        let mut ifd = IFD::new(number, offset);
        for _ in 0..entry_count {
            let entry = self.read_ifd_entry(reader, handler)?;
            ifd.add_entry(entry);
        }

        ifd.next_ifd = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u32(reader)? as u64
        };
        debug!("IFD #{} next IFD offset: {}", number, ifd.next_ifd);

        Ok(ifd)
    }

    /// Reads a single IFD entry
    fn read_ifd_entry(&self, reader: &mut dyn SeekableReader, handler: &dyn ByteOrderHandler) -> DecodeResult<IFDEntry> {
        let tag = handler.read_u16(reader)?;
        let field_type = FieldType::from_code(handler.read_u16(reader)?);
        let (count, value_offset) = if self.is_big_tiff {
            (handler.read_u64(reader)?, handler.read_u64(reader)?)
        } else {
            (handler.read_u32(reader)? as u64, handler.read_u32(reader)? as u64)
        };

        Ok(IFDEntry::new(tag, field_type, count, value_offset))
    }

    /// Decodes every value of an entry with `read_one`
    ///
    /// Inline values are decoded from the slot bytes re-encoded in the file's
    /// byte order. Out-of-line values are read from the stored offset.
    fn read_entry_values<T>(
        &self,
        reader: &mut dyn SeekableReader,
        entry: &IFDEntry,
        read_one: fn(&FieldType, &mut dyn SeekableReader, &dyn ByteOrderHandler) -> DecodeResult<T>,
    ) -> DecodeResult<Vec<T>> {
        let handler = self.handler()?;
        if let FieldType::Unknown(code) = entry.field_type {
            return Err(DecodeError::UnsupportedFieldType(code));
        }

        if entry.is_value_inline(self.is_big_tiff) {
            trace!("Tag {} ({}) stored inline", entry.tag, tag_name(entry.tag));
            let byte_order = handler.byte_order();
            let slot_width = if self.is_big_tiff { header::BIG_SLOT_WIDTH } else { header::CLASSIC_SLOT_WIDTH };
            let mut slot = Cursor::new(byte_order.encode_slot(entry.value_offset, slot_width));

            let mut values = Vec::with_capacity(entry.count as usize);
            for _ in 0..entry.count {
                values.push(read_one(&entry.field_type, &mut slot, handler)?);
            }
            return Ok(values);
        }

        let size = entry.value_size().ok_or_else(|| {
            DecodeError::Format(format!("Tag {} value size overflows", entry.tag))
        })?;
        let file_size = stream_len(reader)?;
        validation::validate_value_region(entry.value_offset, size, file_size)?;

        trace!(
            "Tag {} ({}) stored at offset {} ({} bytes)",
            entry.tag,
            tag_name(entry.tag),
            entry.value_offset,
            size
        );
        reader.seek(SeekFrom::Start(entry.value_offset))?;

        let mut values = Vec::with_capacity(entry.count as usize);
        for _ in 0..entry.count {
            values.push(read_one(&entry.field_type, reader, handler)?);
        }
        Ok(values)
    }

    /// Reads a tag's values as unsigned integers
    pub fn read_tag_u64s(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16) -> DecodeResult<Vec<u64>> {
        let entry = ifd.get_entry(tag).ok_or(DecodeError::TagNotFound(tag))?;
        self.read_entry_values(reader, entry, FieldType::read_u64)
    }

    /// Reads a tag's values as signed integers
    pub fn read_tag_i64s(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16) -> DecodeResult<Vec<i64>> {
        let entry = ifd.get_entry(tag).ok_or(DecodeError::TagNotFound(tag))?;
        self.read_entry_values(reader, entry, FieldType::read_i64)
    }

    /// Reads a tag's values as real numbers
    pub fn read_tag_f64s(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16) -> DecodeResult<Vec<f64>> {
        let entry = ifd.get_entry(tag).ok_or(DecodeError::TagNotFound(tag))?;
        self.read_entry_values(reader, entry, FieldType::read_f64)
    }

    /// Reads the first value of a tag, or `fallback` when the tag is absent
    pub fn read_tag_u64(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16, fallback: u64) -> DecodeResult<u64> {
        if !ifd.has_tag(tag) {
            return Ok(fallback);
        }
        let values = self.read_tag_u64s(reader, ifd, tag)?;
        Ok(values.first().copied().unwrap_or(fallback))
    }

    /// Reads an ASCII tag, trimming trailing NULs
    pub fn read_tag_ascii(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16) -> DecodeResult<String> {
        let bytes = self.read_tag_u64s(reader, ifd, tag)?;
        let text: String = bytes
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as u8 as char)
            .collect();
        Ok(text)
    }
}
