//! Image File Directory (IFD) structures and methods
//!
//! An IFD is an ordered list of tag entries plus a link to the next
//! directory. Lookups scan the entries in file order and return the first
//! match, so a duplicated tag resolves to its earliest occurrence.

use std::fmt;

use log::trace;

use crate::tiff::constants::tags;
use crate::tiff::field_type::FieldType;

/// Represents an Image File Directory (IFD) in a TIFF file
#[derive(Debug, Clone)]
pub struct IFD {
    /// Entries in this IFD, in file order
    pub entries: Vec<IFDEntry>,
    /// IFD number (0-based)
    pub number: usize,
    /// Offset to this IFD in the file
    pub offset: u64,
    /// Offset of the next IFD, 0 when this is the last one
    pub next_ifd: u64,
}

/// Represents an entry in an Image File Directory (IFD)
///
/// When `count` values of `field_type` fit in the slot, `value_offset` holds
/// the values themselves; otherwise it is an absolute file offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IFDEntry {
    /// TIFF tag identifier
    pub tag: u16,
    /// Field type
    pub field_type: FieldType,
    /// Number of values
    pub count: u64,
    /// Value or offset to values
    pub value_offset: u64,
}

impl IFDEntry {
    /// Creates a new IFD entry
    pub fn new(tag: u16, field_type: FieldType, count: u64, value_offset: u64) -> Self {
        Self {
            tag,
            field_type,
            count,
            value_offset,
        }
    }

    /// Determines if the values are stored in the slot itself
    pub fn is_value_inline(&self, is_big_tiff: bool) -> bool {
        self.count <= self.field_type.foldable_count(is_big_tiff)
    }

    /// Total size in bytes of this entry's values
    pub fn value_size(&self) -> Option<u64> {
        self.count.checked_mul(self.field_type.byte_width() as u64)
    }

    /// Returns a human-readable description of this entry
    pub fn description(&self) -> String {
        format!(
            "Tag: {} ({}), Type: {} ({}), Count: {}, Value/Offset: {}",
            self.tag,
            tag_name(self.tag),
            self.field_type.code(),
            self.field_type.name(),
            self.count,
            self.value_offset
        )
    }
}

impl IFD {
    /// Creates a new, empty IFD
    pub fn new(number: usize, offset: u64) -> Self {
        Self {
            entries: Vec::new(),
            number,
            offset,
            next_ifd: 0,
        }
    }

    /// Adds an entry to this IFD
    pub fn add_entry(&mut self, entry: IFDEntry) {
        trace!("Adding entry to IFD #{}: {}", self.number, entry.description());
        self.entries.push(entry);
    }

    /// Gets the first entry carrying `tag`
    pub fn get_entry(&self, tag: u16) -> Option<&IFDEntry> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    /// Checks if this IFD has a specific tag
    pub fn has_tag(&self, tag: u16) -> bool {
        self.get_entry(tag).is_some()
    }

    /// Gets the number of entries in this IFD
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for IFD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IFD #{} (offset: {})", self.number, self.offset)?;
        writeln!(f, "  Number of entries: {}", self.entries.len())?;
        writeln!(f, "  Tags:")?;
        for entry in &self.entries {
            writeln!(
                f,
                "    {} ({}): {} x{} [{}]",
                entry.tag,
                tag_name(entry.tag),
                entry.value_offset,
                entry.count,
                entry.field_type.name()
            )?;
        }
        Ok(())
    }
}

/// Get the name of a TIFF tag
///
/// Returns "Unknown" for tags this crate does not interpret.
pub fn tag_name(tag: u16) -> &'static str {
    match tag {
        tags::NEW_SUBFILE_TYPE => "NewSubfileType",
        tags::IMAGE_WIDTH => "ImageWidth",
        tags::IMAGE_LENGTH => "ImageLength",
        tags::BITS_PER_SAMPLE => "BitsPerSample",
        tags::COMPRESSION => "Compression",
        tags::PHOTOMETRIC_INTERPRETATION => "PhotometricInterpretation",
        tags::STRIP_OFFSETS => "StripOffsets",
        tags::SAMPLES_PER_PIXEL => "SamplesPerPixel",
        tags::ROWS_PER_STRIP => "RowsPerStrip",
        tags::STRIP_BYTE_COUNTS => "StripByteCounts",
        tags::X_RESOLUTION => "XResolution",
        tags::Y_RESOLUTION => "YResolution",
        tags::PLANAR_CONFIGURATION => "PlanarConfiguration",
        tags::RESOLUTION_UNIT => "ResolutionUnit",
        tags::SOFTWARE => "Software",
        tags::PREDICTOR => "Predictor",
        tags::COLOR_MAP => "ColorMap",
        tags::EXTRA_SAMPLES => "ExtraSamples",
        tags::SAMPLE_FORMAT => "SampleFormat",
        _ => "Unknown",
    }
}
