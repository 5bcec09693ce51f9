//! Byte order markers, handlers and slot re-encoding

extern crate std;

use std::io::Cursor;
use std::vec::Vec;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use crate::errors::DecodeError;
use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};

#[test]
fn test_marker_detection() {
    for (marker, expected) in [(b"II", ByteOrder::LittleEndian), (b"MM", ByteOrder::BigEndian)] {
        let mut cursor = Cursor::new(marker.to_vec());
        std::assert_eq!(ByteOrder::detect(&mut cursor).unwrap(), expected);
        std::assert_eq!(expected.create_handler().byte_order(), expected);
    }

    let mut cursor = Cursor::new(b"IM".to_vec());
    std::assert!(matches!(ByteOrder::detect(&mut cursor), Err(DecodeError::InvalidByteOrder(0x4D49))));
}

#[test]
fn test_handlers_agree_on_values() {
    let mut little = Vec::new();
    little.write_u16::<LittleEndian>(0xBEEF).unwrap();
    little.write_i16::<LittleEndian>(-2).unwrap();
    little.write_u32::<LittleEndian>(0xDEAD_BEEF).unwrap();
    little.write_i64::<LittleEndian>(-1 << 40).unwrap();
    little.write_f32::<LittleEndian>(1.5).unwrap();
    little.write_f64::<LittleEndian>(-0.25).unwrap();

    let mut big = Vec::new();
    big.write_u16::<BigEndian>(0xBEEF).unwrap();
    big.write_i16::<BigEndian>(-2).unwrap();
    big.write_u32::<BigEndian>(0xDEAD_BEEF).unwrap();
    big.write_i64::<BigEndian>(-1 << 40).unwrap();
    big.write_f32::<BigEndian>(1.5).unwrap();
    big.write_f64::<BigEndian>(-0.25).unwrap();

    let cases: [(Vec<u8>, &dyn ByteOrderHandler); 2] = [(little, &LittleEndianHandler), (big, &BigEndianHandler)];
    for (bytes, handler) in cases {
        let mut cursor = Cursor::new(bytes);
        std::assert_eq!(handler.read_u16(&mut cursor).unwrap(), 0xBEEF);
        std::assert_eq!(handler.read_i16(&mut cursor).unwrap(), -2);
        std::assert_eq!(handler.read_u32(&mut cursor).unwrap(), 0xDEAD_BEEF);
        std::assert_eq!(handler.read_i64(&mut cursor).unwrap(), -1 << 40);
        std::assert_eq!(handler.read_f32(&mut cursor).unwrap(), 1.5);
        std::assert_eq!(handler.read_f64(&mut cursor).unwrap(), -0.25);
    }
}

#[test]
fn test_rationals() {
    let mut cursor = Cursor::new(std::vec![0, 0, 0, 7, 0, 0, 0, 2, 0xFF, 0xFF, 0xFF, 0xFD, 0, 0, 0, 4]);
    std::assert_eq!(BigEndianHandler.read_rational(&mut cursor).unwrap(), (7, 2));
    std::assert_eq!(BigEndianHandler.read_srational(&mut cursor).unwrap(), (-3, 4));
}

#[test]
fn test_encode_slot_restores_file_bytes() {
    // Two SHORTs 3 and 5 as they sit in a classic entry
    let file_bytes = [0x00, 0x03, 0x00, 0x05];
    let value_offset = BigEndianHandler.read_u32(&mut Cursor::new(file_bytes.to_vec())).unwrap() as u64;
    std::assert_eq!(ByteOrder::BigEndian.encode_slot(value_offset, 4), file_bytes.to_vec());

    let file_bytes = [0x03, 0x00, 0x05, 0x00];
    let value_offset = LittleEndianHandler.read_u32(&mut Cursor::new(file_bytes.to_vec())).unwrap() as u64;
    std::assert_eq!(ByteOrder::LittleEndian.encode_slot(value_offset, 4), file_bytes.to_vec());

    std::assert_eq!(ByteOrder::BigEndian.encode_slot(1, 8), std::vec![0, 0, 0, 0, 0, 0, 0, 1]);
}
