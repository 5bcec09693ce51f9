//! Tests for header detection, the IFD chain walk and value extraction

extern crate std;

use std::io::Cursor;
use byteorder::{LittleEndian, WriteBytesExt};

use crate::config::DecoderConfig;
use crate::errors::DecodeError;
use crate::tiff::constants::{field_types, tags};
use crate::tiff::reader::TiffReader;
use super::test_utils::{build_tiff, create_test_bigtiff_buffer, create_test_tiff_buffer, rgb8_entries, TestEntry};

/// Classic little-endian file with a chain of single-entry IFDs
///
/// IFD `i` sits at `8 + 18 * i` and points to `next[i]`.
fn chained_ifds(next: &[u32]) -> Cursor<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();
    for (i, &next_offset) in next.iter().enumerate() {
        buffer.write_u16::<LittleEndian>(1).unwrap();
        buffer.write_u16::<LittleEndian>(tags::IMAGE_WIDTH).unwrap();
        buffer.write_u16::<LittleEndian>(field_types::LONG).unwrap();
        buffer.write_u32::<LittleEndian>(1).unwrap();
        buffer.write_u32::<LittleEndian>(i as u32 + 1).unwrap();
        buffer.write_u32::<LittleEndian>(next_offset).unwrap();
    }
    Cursor::new(buffer)
}

#[test]
fn test_read_classic_tiff() {
    let mut cursor = create_test_tiff_buffer();
    let mut reader = TiffReader::new(DecoderConfig::default());

    let tiff = reader.read(&mut cursor).unwrap();
    std::assert!(!tiff.is_big_tiff);
    std::assert!(!reader.is_big_tiff());
    std::assert_eq!(tiff.ifd_count(), 1);

    let ifd = tiff.main_ifd().unwrap();
    std::assert_eq!(ifd.entry_count(), 9);
    std::assert_eq!(ifd.next_ifd, 0);
    std::assert_eq!(reader.read_tag_u64(&mut cursor, ifd, tags::IMAGE_WIDTH, 0).unwrap(), 1);
    std::assert_eq!(reader.read_tag_u64s(&mut cursor, ifd, tags::BITS_PER_SAMPLE).unwrap(), vec![8, 8, 8]);
}

#[test]
fn test_bigtiff_parses_like_classic() {
    let mut classic = create_test_tiff_buffer();
    let mut big = create_test_bigtiff_buffer();
    let mut classic_reader = TiffReader::new(DecoderConfig::default());
    let mut big_reader = TiffReader::new(DecoderConfig::default());

    let classic_tiff = classic_reader.read(&mut classic).unwrap();
    let big_tiff = big_reader.read(&mut big).unwrap();
    std::assert!(big_tiff.is_big_tiff);

    let classic_ifd = classic_tiff.main_ifd().unwrap();
    let big_ifd = big_tiff.main_ifd().unwrap();
    std::assert_eq!(classic_ifd.entry_count(), big_ifd.entry_count());

    for entry in &classic_ifd.entries {
        if entry.tag == tags::STRIP_OFFSETS {
            continue;
        }
        let from_classic = classic_reader.read_tag_u64s(&mut classic, classic_ifd, entry.tag).unwrap();
        let from_big = big_reader.read_tag_u64s(&mut big, big_ifd, entry.tag).unwrap();
        std::assert_eq!(from_classic, from_big, "tag {}", entry.tag);
    }
}

#[test]
fn test_inline_and_out_of_line_values_agree() {
    // Two LONGs fold into a BigTIFF slot but not a classic one
    for &big_endian in &[false, true] {
        let entries = vec![
            TestEntry::new(tags::STRIP_OFFSETS, field_types::LONG, &[0x01020304, 77]),
            TestEntry::new(tags::BITS_PER_SAMPLE, field_types::SHORT, &[8, 16, 8]),
        ];
        let mut classic = Cursor::new(build_tiff(false, big_endian, &entries, &[]));
        let mut big = Cursor::new(build_tiff(true, big_endian, &entries, &[]));

        let mut classic_reader = TiffReader::new(DecoderConfig::default());
        let mut big_reader = TiffReader::new(DecoderConfig::default());
        let classic_tiff = classic_reader.read(&mut classic).unwrap();
        let big_tiff = big_reader.read(&mut big).unwrap();
        let classic_ifd = classic_tiff.main_ifd().unwrap();
        let big_ifd = big_tiff.main_ifd().unwrap();

        std::assert!(!classic_ifd.get_entry(tags::STRIP_OFFSETS).unwrap().is_value_inline(false));
        std::assert!(big_ifd.get_entry(tags::STRIP_OFFSETS).unwrap().is_value_inline(true));

        for &tag in &[tags::STRIP_OFFSETS, tags::BITS_PER_SAMPLE] {
            let inline = big_reader.read_tag_u64s(&mut big, big_ifd, tag).unwrap();
            let out_of_line = classic_reader.read_tag_u64s(&mut classic, classic_ifd, tag).unwrap();
            std::assert_eq!(inline, out_of_line);
        }
        std::assert_eq!(
            classic_reader.read_tag_u64s(&mut classic, classic_ifd, tags::STRIP_OFFSETS).unwrap(),
            vec![0x01020304, 77]
        );
    }
}

#[test]
fn test_inline_shorts_in_big_endian_file() {
    let entries = vec![TestEntry::new(tags::BITS_PER_SAMPLE, field_types::SHORT, &[3, 5])];
    let mut cursor = Cursor::new(build_tiff(false, true, &entries, &[]));
    let mut reader = TiffReader::new(DecoderConfig::default());
    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();

    std::assert!(ifd.get_entry(tags::BITS_PER_SAMPLE).unwrap().is_value_inline(false));
    std::assert_eq!(reader.read_tag_u64s(&mut cursor, ifd, tags::BITS_PER_SAMPLE).unwrap(), vec![3, 5]);
}

#[test]
fn test_rational_coercions() {
    let entries = vec![
        TestEntry::new(tags::X_RESOLUTION, field_types::RATIONAL, &[300, 4]),
        TestEntry::new(tags::Y_RESOLUTION, field_types::RATIONAL, &[1, 0]),
    ];
    let mut cursor = Cursor::new(build_tiff(false, false, &entries, &[]));
    let mut reader = TiffReader::new(DecoderConfig::default());
    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();

    std::assert_eq!(reader.read_tag_u64s(&mut cursor, ifd, tags::X_RESOLUTION).unwrap(), vec![75]);
    std::assert_eq!(reader.read_tag_f64s(&mut cursor, ifd, tags::X_RESOLUTION).unwrap(), vec![75.0]);
    std::assert!(reader.read_tag_f64s(&mut cursor, ifd, tags::Y_RESOLUTION).unwrap()[0].is_infinite());
    std::assert!(matches!(
        reader.read_tag_i64s(&mut cursor, ifd, tags::Y_RESOLUTION),
        Err(DecodeError::Format(_))
    ));
}

#[test]
fn test_missing_tag_and_unknown_type() {
    let entries = vec![TestEntry::new(700, 99, &[1])];
    let mut cursor = Cursor::new(build_tiff(false, false, &entries, &[]));
    let mut reader = TiffReader::new(DecoderConfig::default());
    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();

    std::assert!(matches!(
        reader.read_tag_u64s(&mut cursor, ifd, 700),
        Err(DecodeError::UnsupportedFieldType(99))
    ));
    std::assert!(matches!(
        reader.read_tag_u64s(&mut cursor, ifd, tags::IMAGE_WIDTH),
        Err(DecodeError::TagNotFound(256))
    ));
    std::assert_eq!(reader.read_tag_u64(&mut cursor, ifd, tags::IMAGE_WIDTH, 42).unwrap(), 42);
}

#[test]
fn test_value_region_past_end_of_file() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();
    buffer.write_u16::<LittleEndian>(1).unwrap();
    buffer.write_u16::<LittleEndian>(tags::STRIP_OFFSETS).unwrap();
    buffer.write_u16::<LittleEndian>(field_types::LONG).unwrap();
    buffer.write_u32::<LittleEndian>(1000).unwrap();
    buffer.write_u32::<LittleEndian>(20).unwrap();
    buffer.write_u32::<LittleEndian>(0).unwrap();
    let mut cursor = Cursor::new(buffer);

    let mut reader = TiffReader::new(DecoderConfig::default());
    let tiff = reader.read(&mut cursor).unwrap();
    let result = reader.read_tag_u64s(&mut cursor, tiff.main_ifd().unwrap(), tags::STRIP_OFFSETS);
    std::assert!(matches!(result, Err(DecodeError::Format(_))));
}

#[test]
fn test_ifd_chain_is_followed() {
    let mut cursor = chained_ifds(&[26, 44, 0]);
    let mut reader = TiffReader::new(DecoderConfig::default());
    let tiff = reader.read(&mut cursor).unwrap();

    std::assert_eq!(tiff.ifd_count(), 3);
    std::assert_eq!(tiff.ifds[2].offset, 44);
    std::assert_eq!(reader.read_tag_u64(&mut cursor, &tiff.ifds[2], tags::IMAGE_WIDTH, 0).unwrap(), 3);
}

#[test]
fn test_ifd_cycle_terminates() {
    let mut cursor = chained_ifds(&[26, 8]);
    let mut reader = TiffReader::new(DecoderConfig::default());
    let tiff = reader.read(&mut cursor).unwrap();
    std::assert_eq!(tiff.ifd_count(), 2);
}

#[test]
fn test_ifd_chain_respects_limit() {
    let mut cursor = chained_ifds(&[26, 44, 0]);
    let mut reader = TiffReader::new(DecoderConfig::default().with_max_ifds(2));
    let tiff = reader.read(&mut cursor).unwrap();
    std::assert_eq!(tiff.ifd_count(), 2);
}

#[test]
fn test_broken_later_ifd_keeps_earlier_ones() {
    let mut buffer = chained_ifds(&[26]).into_inner();
    buffer.write_u16::<LittleEndian>(5).unwrap(); // claims 5 entries, file ends
    let mut cursor = Cursor::new(buffer);

    let mut reader = TiffReader::new(DecoderConfig::default());
    let tiff = reader.read(&mut cursor).unwrap();
    std::assert_eq!(tiff.ifd_count(), 1);
}

#[test]
fn test_broken_first_ifd_is_fatal() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();
    buffer.write_u16::<LittleEndian>(3).unwrap();
    buffer.write_u16::<LittleEndian>(tags::IMAGE_WIDTH).unwrap();
    let mut cursor = Cursor::new(buffer);

    let mut reader = TiffReader::new(DecoderConfig::default());
    std::assert!(reader.read(&mut cursor).is_err());
}

#[test]
fn test_header_errors_are_format_errors() {
    let cases: Vec<Vec<u8>> = vec![
        b"XX*\0\x08\0\0\0".to_vec(),
        b"II\x2c\0\x08\0\0\0".to_vec(),
        b"II\x2b\0\x08\0\x01\0\x10\0\0\0\0\0\0\0".to_vec(),
        b"II\x2b\0\x10\0\0\0\x10\0\0\0\0\0\0\0".to_vec(),
        b"II*\0\xff\0\0\0".to_vec(),
    ];
    for bytes in cases {
        let mut cursor = Cursor::new(bytes);
        let mut reader = TiffReader::new(DecoderConfig::default());
        let error = reader.read(&mut cursor).unwrap_err();
        std::assert!(error.is_format_error(), "{}", error);
    }
}

#[test]
fn test_entries_keep_file_order() {
    let mut cursor = Cursor::new(build_tiff(false, false, &rgb8_entries(false, 2, 2), &[0; 12]));
    let mut reader = TiffReader::new(DecoderConfig::default());
    let tiff = reader.read(&mut cursor).unwrap();
    let tags_in_order: Vec<u16> = tiff.main_ifd().unwrap().entries.iter().map(|e| e.tag).collect();
    std::assert_eq!(tags_in_order[0], tags::IMAGE_WIDTH);
    std::assert_eq!(tags_in_order[8], tags::STRIP_BYTE_COUNTS);
}
