//! Byte order strategies
//!
//! A TIFF declares its byte order in the first two bytes; every later
//! multi-byte read goes through the matching [`ByteOrderHandler`].

use byteorder::{BigEndian, ByteOrder as EndianOrder, LittleEndian, ReadBytesExt};
use std::io::Result;

use crate::errors::{DecodeError, DecodeResult};
use crate::io::seekable::SeekableReader;

/// Represents the byte order of a TIFF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

impl ByteOrder {
    /// Reads the `II`/`MM` marker at the cursor
    pub fn detect(reader: &mut dyn SeekableReader) -> DecodeResult<Self> {
        let byte_order = reader.read_u16::<LittleEndian>()?;
        match byte_order {
            0x4949 => Ok(ByteOrder::LittleEndian), // "II" (Intel)
            0x4D4D => Ok(ByteOrder::BigEndian),    // "MM" (Motorola)
            _ => Err(DecodeError::InvalidByteOrder(byte_order)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }

    /// Re-encodes a value/offset slot into the bytes it was read from
    ///
    /// `width` is the slot width: 4 for classic TIFF, 8 for BigTIFF.
    pub fn encode_slot(&self, value: u64, width: usize) -> Vec<u8> {
        if width <= 4 {
            let mut bytes = vec![0u8; 4];
            match self {
                ByteOrder::LittleEndian => LittleEndian::write_u32(&mut bytes, value as u32),
                ByteOrder::BigEndian => BigEndian::write_u32(&mut bytes, value as u32),
            }
            bytes
        } else {
            let mut bytes = vec![0u8; 8];
            match self {
                ByteOrder::LittleEndian => LittleEndian::write_u64(&mut bytes, value),
                ByteOrder::BigEndian => BigEndian::write_u64(&mut bytes, value),
            }
            bytes
        }
    }
}

/// Reads fixed-width values in one byte order
pub trait ByteOrderHandler: Send + Sync {
    /// The byte order this handler reads
    fn byte_order(&self) -> ByteOrder;

    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16>;

    fn read_i16(&self, reader: &mut dyn SeekableReader) -> Result<i16>;

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32>;

    fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32>;

    fn read_u64(&self, reader: &mut dyn SeekableReader) -> Result<u64>;

    fn read_i64(&self, reader: &mut dyn SeekableReader) -> Result<i64>;

    fn read_f32(&self, reader: &mut dyn SeekableReader) -> Result<f32>;

    fn read_f64(&self, reader: &mut dyn SeekableReader) -> Result<f64>;

    /// RATIONAL: numerator then denominator
    fn read_rational(&self, reader: &mut dyn SeekableReader) -> Result<(u32, u32)> {
        let numerator = self.read_u32(reader)?;
        let denominator = self.read_u32(reader)?;
        Ok((numerator, denominator))
    }

    /// SRATIONAL: numerator then denominator
    fn read_srational(&self, reader: &mut dyn SeekableReader) -> Result<(i32, i32)> {
        let numerator = self.read_i32(reader)?;
        let denominator = self.read_i32(reader)?;
        Ok((numerator, denominator))
    }
}

/// Implements [`ByteOrderHandler`] for a unit struct over a `byteorder` marker
macro_rules! endian_handler {
    ($(#[$doc:meta])* $name:ident, $endian:ty, $order:expr) => {
        $(#[$doc])*
        pub struct $name;

        impl ByteOrderHandler for $name {
            fn byte_order(&self) -> ByteOrder {
                $order
            }

            fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
                reader.read_u16::<$endian>()
            }

            fn read_i16(&self, reader: &mut dyn SeekableReader) -> Result<i16> {
                reader.read_i16::<$endian>()
            }

            fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
                reader.read_u32::<$endian>()
            }

            fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32> {
                reader.read_i32::<$endian>()
            }

            fn read_u64(&self, reader: &mut dyn SeekableReader) -> Result<u64> {
                reader.read_u64::<$endian>()
            }

            fn read_i64(&self, reader: &mut dyn SeekableReader) -> Result<i64> {
                reader.read_i64::<$endian>()
            }

            fn read_f32(&self, reader: &mut dyn SeekableReader) -> Result<f32> {
                reader.read_f32::<$endian>()
            }

            fn read_f64(&self, reader: &mut dyn SeekableReader) -> Result<f64> {
                reader.read_f64::<$endian>()
            }
        }
    };
}

endian_handler!(
    /// Reads `II` files
    LittleEndianHandler,
    LittleEndian,
    ByteOrder::LittleEndian
);

endian_handler!(
    /// Reads `MM` files
    BigEndianHandler,
    BigEndian,
    ByteOrder::BigEndian
);
