//! TIFF field types and value coercions
//!
//! Every entry declares a field type that fixes the byte width of one value
//! and how that value converts to integers or reals. The width also decides
//! whether `count` values fold into the entry's inline slot.

use byteorder::ReadBytesExt;

use crate::errors::{DecodeError, DecodeResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{field_types, header};

/// A TIFF field type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SByte,
    Undefined,
    SShort,
    SLong,
    SRational,
    Float,
    Double,
    Long8,
    SLong8,
    Ifd8,
    /// A type code this reader does not know
    Unknown(u16),
}

impl FieldType {
    /// Maps a type code from an entry to a field type
    pub fn from_code(code: u16) -> Self {
        match code {
            field_types::BYTE => FieldType::Byte,
            field_types::ASCII => FieldType::Ascii,
            field_types::SHORT => FieldType::Short,
            field_types::LONG => FieldType::Long,
            field_types::RATIONAL => FieldType::Rational,
            field_types::SBYTE => FieldType::SByte,
            field_types::UNDEFINED => FieldType::Undefined,
            field_types::SSHORT => FieldType::SShort,
            field_types::SLONG => FieldType::SLong,
            field_types::SRATIONAL => FieldType::SRational,
            field_types::FLOAT => FieldType::Float,
            field_types::DOUBLE => FieldType::Double,
            field_types::LONG8 => FieldType::Long8,
            field_types::SLONG8 => FieldType::SLong8,
            field_types::IFD8 => FieldType::Ifd8,
            other => FieldType::Unknown(other),
        }
    }

    /// The numeric type code
    pub fn code(&self) -> u16 {
        match self {
            FieldType::Byte => field_types::BYTE,
            FieldType::Ascii => field_types::ASCII,
            FieldType::Short => field_types::SHORT,
            FieldType::Long => field_types::LONG,
            FieldType::Rational => field_types::RATIONAL,
            FieldType::SByte => field_types::SBYTE,
            FieldType::Undefined => field_types::UNDEFINED,
            FieldType::SShort => field_types::SSHORT,
            FieldType::SLong => field_types::SLONG,
            FieldType::SRational => field_types::SRATIONAL,
            FieldType::Float => field_types::FLOAT,
            FieldType::Double => field_types::DOUBLE,
            FieldType::Long8 => field_types::LONG8,
            FieldType::SLong8 => field_types::SLONG8,
            FieldType::Ifd8 => field_types::IFD8,
            FieldType::Unknown(code) => *code,
        }
    }

    /// Size in bytes of one value
    pub fn byte_width(&self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8,
            FieldType::Long8 | FieldType::SLong8 | FieldType::Ifd8 => 8,
            FieldType::Unknown(_) => 1,
        }
    }

    /// How many values fit in the inline slot
    pub fn foldable_count(&self, is_big_tiff: bool) -> u64 {
        let slot = if is_big_tiff { header::BIG_SLOT_WIDTH } else { header::CLASSIC_SLOT_WIDTH };
        (slot / self.byte_width()) as u64
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Byte => "BYTE",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "SHORT",
            FieldType::Long => "LONG",
            FieldType::Rational => "RATIONAL",
            FieldType::SByte => "SBYTE",
            FieldType::Undefined => "UNDEFINED",
            FieldType::SShort => "SSHORT",
            FieldType::SLong => "SLONG",
            FieldType::SRational => "SRATIONAL",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
            FieldType::Long8 => "LONG8",
            FieldType::SLong8 => "SLONG8",
            FieldType::Ifd8 => "IFD8",
            FieldType::Unknown(_) => "Unknown",
        }
    }

    /// Reads one value as a signed integer
    ///
    /// Rationals use integer division. Reals truncate toward zero.
    pub fn read_i64(
        &self,
        reader: &mut dyn SeekableReader,
        handler: &dyn ByteOrderHandler,
    ) -> DecodeResult<i64> {
        let value = match self {
            FieldType::Byte | FieldType::Ascii | FieldType::Undefined => reader.read_u8()? as i64,
            FieldType::SByte => reader.read_i8()? as i64,
            FieldType::Short => handler.read_u16(reader)? as i64,
            FieldType::SShort => handler.read_i16(reader)? as i64,
            FieldType::Long => handler.read_u32(reader)? as i64,
            FieldType::SLong => handler.read_i32(reader)? as i64,
            FieldType::Rational => {
                let (num, den) = handler.read_rational(reader)?;
                if den == 0 {
                    return Err(DecodeError::Format("RATIONAL with zero denominator".to_string()));
                }
                (num / den) as i64
            }
            FieldType::SRational => {
                let (num, den) = handler.read_srational(reader)?;
                if den == 0 {
                    return Err(DecodeError::Format("SRATIONAL with zero denominator".to_string()));
                }
                (num as i64) / (den as i64)
            }
            FieldType::Float => handler.read_f32(reader)? as i64,
            FieldType::Double => handler.read_f64(reader)? as i64,
            FieldType::Long8 | FieldType::Ifd8 => handler.read_u64(reader)? as i64,
            FieldType::SLong8 => handler.read_i64(reader)?,
            FieldType::Unknown(code) => return Err(DecodeError::UnsupportedFieldType(*code)),
        };
        Ok(value)
    }

    /// Reads one value as an unsigned integer
    ///
    /// Unsigned 64-bit types keep their full range; everything else goes
    /// through [`FieldType::read_i64`] and negative values are a format error.
    pub fn read_u64(
        &self,
        reader: &mut dyn SeekableReader,
        handler: &dyn ByteOrderHandler,
    ) -> DecodeResult<u64> {
        match self {
            FieldType::Long8 | FieldType::Ifd8 => Ok(handler.read_u64(reader)?),
            _ => {
                let value = self.read_i64(reader, handler)?;
                u64::try_from(value).map_err(|_| {
                    DecodeError::Format(format!("Negative {} value {} where unsigned expected", self.name(), value))
                })
            }
        }
    }

    /// Reads one value as a real number
    ///
    /// Rationals use real division.
    pub fn read_f64(
        &self,
        reader: &mut dyn SeekableReader,
        handler: &dyn ByteOrderHandler,
    ) -> DecodeResult<f64> {
        let value = match self {
            FieldType::Rational => {
                let (num, den) = handler.read_rational(reader)?;
                num as f64 / den as f64
            }
            FieldType::SRational => {
                let (num, den) = handler.read_srational(reader)?;
                num as f64 / den as f64
            }
            FieldType::Float => handler.read_f32(reader)? as f64,
            FieldType::Double => handler.read_f64(reader)?,
            FieldType::Long8 | FieldType::Ifd8 => handler.read_u64(reader)? as f64,
            _ => self.read_i64(reader, handler)? as f64,
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::byte_order::{BigEndianHandler, LittleEndianHandler};
    use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
    use std::io::Cursor;

    #[test]
    fn test_foldable_counts() {
        assert_eq!(FieldType::Short.foldable_count(false), 2);
        assert_eq!(FieldType::Short.foldable_count(true), 4);
        assert_eq!(FieldType::Long.foldable_count(false), 1);
        assert_eq!(FieldType::Long.foldable_count(true), 2);
        assert_eq!(FieldType::Rational.foldable_count(false), 0);
        assert_eq!(FieldType::Rational.foldable_count(true), 1);
        assert_eq!(FieldType::Byte.foldable_count(false), 4);
    }

    #[test]
    fn test_code_round_trip_and_unknown() {
        assert_eq!(FieldType::from_code(3), FieldType::Short);
        assert_eq!(FieldType::from_code(16).code(), 16);
        assert_eq!(FieldType::from_code(99), FieldType::Unknown(99));
    }

    #[test]
    fn test_rational_coercions() {
        let mut buffer = Vec::new();
        buffer.write_u32::<LittleEndian>(7).unwrap();
        buffer.write_u32::<LittleEndian>(2).unwrap();

        let handler = LittleEndianHandler;
        let mut cursor = Cursor::new(buffer.clone());
        assert_eq!(FieldType::Rational.read_i64(&mut cursor, &handler).unwrap(), 3);
        let mut cursor = Cursor::new(buffer);
        assert_eq!(FieldType::Rational.read_f64(&mut cursor, &handler).unwrap(), 3.5);
    }

    #[test]
    fn test_signed_values_sign_extend() {
        let mut buffer = Vec::new();
        buffer.write_i16::<BigEndian>(-5).unwrap();
        buffer.write_i32::<BigEndian>(-9).unwrap();
        buffer.write_i32::<BigEndian>(4).unwrap();

        let handler = BigEndianHandler;
        let mut cursor = Cursor::new(buffer);
        assert_eq!(FieldType::SShort.read_i64(&mut cursor, &handler).unwrap(), -5);
        assert_eq!(FieldType::SRational.read_i64(&mut cursor, &handler).unwrap(), -2);
    }

    #[test]
    fn test_negative_value_rejected_as_unsigned() {
        let mut cursor = Cursor::new(vec![0xFFu8]);
        let result = FieldType::SByte.read_u64(&mut cursor, &LittleEndianHandler);
        assert!(matches!(result, Err(DecodeError::Format(_))));
    }

    #[test]
    fn test_zero_denominator() {
        let mut cursor = Cursor::new(vec![1, 0, 0, 0, 0, 0, 0, 0]);
        let result = FieldType::Rational.read_i64(&mut cursor, &LittleEndianHandler);
        assert!(matches!(result, Err(DecodeError::Format(_))));
    }

    #[test]
    fn test_unknown_type_is_unsupported() {
        let mut cursor = Cursor::new(vec![0u8; 8]);
        let result = FieldType::Unknown(42).read_u64(&mut cursor, &LittleEndianHandler);
        assert!(matches!(result, Err(DecodeError::UnsupportedFieldType(42))));
    }
}
