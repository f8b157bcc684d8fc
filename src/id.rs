//! Identifier value type and its byte and string codecs

use std::{fmt, str, time::SystemTime};

use fstr::FStr;

use crate::error::{Error, ParseError};
use crate::timestamp::{self, TimeBase};

pub(crate) const MAX_UINT48: u64 = (1 << 48) - 1;

/// Represents a Universally Unique IDentifier.
///
/// The 128 bits are held as three packed fields: `high48` (bits 0-47), `mid32` (bits 48-79,
/// holding the version nibble, twelve timestamp bits and the variant-prefixed sequence) and
/// `low48` (bits 80-127, the node field). Values are immutable and cheap to copy.
///
/// Equality and hashing are field-wise. Ordering ([`Ord`]) is timestamp-aware and normalizes
/// across versions; see [`crate::cmp`] for the rules and for the pure binary ordering.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Uuid {
    high48: u64,
    mid32: u32,
    low48: u64,
}

/// The variant field, decoded from a variable-length prefix of the sequence-bearing octet.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(u8)]
pub enum Variant {
    /// `0xxx`: reserved for NCS backward compatibility.
    Var0 = 0,
    /// `10xx`: the layout of RFC 9562; the only variant this crate generates.
    Var10 = 1,
    /// `110x`: reserved for Microsoft backward compatibility.
    Var110 = 2,
    /// `111x`: reserved for future definition.
    Var111 = 3,
}

impl Variant {
    /// Returns the width of the sequence field that follows the variant prefix.
    pub const fn sequence_bits(self) -> u32 {
        match self {
            Self::Var0 => 15,
            Self::Var10 => 14,
            Self::Var110 | Self::Var111 => 13,
        }
    }

    /// Decodes the variant from the low 16 bits of `mid32`.
    const fn from_low16(bits: u16) -> Self {
        if bits & 0x8000 == 0 {
            Self::Var0
        } else if bits & 0x4000 == 0 {
            Self::Var10
        } else if bits & 0x2000 == 0 {
            Self::Var110
        } else {
            Self::Var111
        }
    }

    /// Returns the prefix bits placed at the top of the low 16 bits of `mid32`.
    pub(crate) const fn prefix(self) -> u16 {
        match self {
            Self::Var0 => 0x0000,
            Self::Var10 => 0x8000,
            Self::Var110 => 0xc000,
            Self::Var111 => 0xe000,
        }
    }
}

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self::from_u128(0);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self::from_u128(u128::MAX);

    /// Creates a UUID from the three packed fields, returning an error if `high48` or `low48`
    /// does not fit in 48 bits.
    pub const fn from_fields(high48: u64, mid32: u32, low48: u64) -> Result<Self, Error> {
        if high48 > MAX_UINT48 || low48 > MAX_UINT48 {
            return Err(Error::InvalidArgument("field value out of range"));
        }
        Ok(Self::from_fields_unchecked(high48, mid32, low48))
    }

    pub(crate) const fn from_fields_unchecked(high48: u64, mid32: u32, low48: u64) -> Self {
        debug_assert!(high48 <= MAX_UINT48 && low48 <= MAX_UINT48);
        Self {
            high48,
            mid32,
            low48,
        }
    }

    const fn from_u128(src: u128) -> Self {
        Self {
            high48: (src >> 80) as u64,
            mid32: (src >> 48) as u32,
            low48: src as u64 & MAX_UINT48,
        }
    }

    const fn to_u128(self) -> u128 {
        ((self.high48 as u128) << 80) | ((self.mid32 as u128) << 48) | self.low48 as u128
    }

    /// Creates a UUID from a 16-byte big-endian array.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self::from_u128(u128::from_be_bytes(bytes))
    }

    /// Creates a UUID from the 16 bytes starting at `offset`, ignoring any trailing bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidkit::Uuid;
    ///
    /// let buf = [0xffu8, 0xf8, 0x1d, 0x4f, 0xae, 0x7d, 0xec, 0x11, 0xd0, 0xa7, 0x65, 0x00, 0xa0,
    ///            0xc9, 0x1e, 0x6b, 0xf6, 0xff];
    /// let x = Uuid::from_slice_at(&buf, 1)?;
    /// assert_eq!(x.to_string(), "f81d4fae-7dec-11d0-a765-00a0c91e6bf6");
    /// # Ok::<(), uuidkit::ParseError>(())
    /// ```
    pub fn from_slice_at(buf: &[u8], offset: usize) -> Result<Self, ParseError> {
        let available = buf.len().saturating_sub(offset);
        buf.get(offset..)
            .and_then(|rest| rest.get(..16))
            .and_then(|chunk| <[u8; 16]>::try_from(chunk).ok())
            .map(Self::from_bytes)
            .ok_or(ParseError::ShortBuffer(available))
    }

    /// Returns the 16-byte big-endian representation.
    pub const fn to_bytes(&self) -> [u8; 16] {
        self.to_u128().to_be_bytes()
    }

    /// Creates a UUID from the 8-4-4-4-12 hexadecimal string representation (case-insensitive).
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        if src.len() != 36 {
            return Err(ParseError::InvalidLength(src.len()));
        }

        let mut value = 0u128;
        for (i, &e) in src.as_bytes().iter().enumerate() {
            if i == 8 || i == 13 || i == 18 || i == 23 {
                if e != b'-' {
                    return Err(ParseError::MissingHyphen(i));
                }
            } else {
                let digit = (e as char)
                    .to_digit(16)
                    .ok_or(ParseError::InvalidCharacter(i))?;
                value = (value << 4) | digit as u128;
            }
        }
        Ok(Self::from_u128(value))
    }

    /// Non-failing variant of [`Uuid::parse()`] that returns `None` for invalid input.
    pub fn parse_or_none(src: &str) -> Option<Self> {
        Self::parse(src).ok()
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidkit::Uuid;
    ///
    /// let x = "F81D4FAE-7DEC-11D0-A765-00A0C91E6BF6".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "f81d4fae-7dec-11d0-a765-00a0c91e6bf6");
    /// assert_eq!(format!("{}", y), "f81d4fae-7dec-11d0-a765-00a0c91e6bf6");
    /// # Ok::<(), uuidkit::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for (i, e) in self.to_bytes().into_iter().enumerate() {
            let e = e as usize;
            if let Some(b) = buf_iter.next() {
                *b = DIGITS[e >> 4];
            }
            if let Some(b) = buf_iter.next() {
                *b = DIGITS[e & 15];
            }
            if i == 3 || i == 5 || i == 7 || i == 9 {
                if let Some(b) = buf_iter.next() {
                    *b = b'-';
                }
            }
        }
        debug_assert!(buffer.is_ascii());
        // SAFETY: the buffer consists of ASCII hex digits and hyphens only.
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }

    /// Returns the `high48` field.
    pub const fn high48(&self) -> u64 {
        self.high48
    }

    /// Returns the `mid32` field.
    pub const fn mid32(&self) -> u32 {
        self.mid32
    }

    /// Returns the `low48` field.
    pub const fn low48(&self) -> u64 {
        self.low48
    }

    /// Returns true if this is the Nil UUID.
    pub const fn is_nil(&self) -> bool {
        self.high48 == 0 && self.mid32 == 0 && self.low48 == 0
    }

    /// Returns the four version bits.
    pub const fn version(&self) -> u8 {
        (self.mid32 >> 28) as u8
    }

    /// Returns the variant decoded from the sequence-bearing octet.
    pub const fn variant(&self) -> Variant {
        Variant::from_low16(self.mid32 as u16)
    }

    /// Returns the sequence (clock sequence) field, whose width depends on the variant.
    pub const fn sequence(&self) -> u16 {
        let bits = self.variant().sequence_bits();
        self.mid32 as u16 & ((1 << bits) - 1)
    }

    /// Returns the node field (an alias of [`Uuid::low48()`]).
    pub const fn node(&self) -> u64 {
        self.low48
    }

    /// Returns true if the UUID carries a timestamp this crate can decode, i.e., the variant is
    /// [`Variant::Var10`] and the version is 1, 6 or 7.
    pub const fn has_timestamp(&self) -> bool {
        matches!(self.variant(), Variant::Var10) && matches!(self.version(), 1 | 6 | 7)
    }

    /// Returns the twelve timestamp bits stored in `mid32` below the version nibble.
    pub(crate) const fn mid_timestamp_bits(&self) -> u16 {
        (self.mid32 >> 16) as u16 & 0xfff
    }

    /// Returns the 60-bit raw timestamp: 100-nanosecond ticks since 1582-10-15 for versions 1
    /// and 6, or the 48-bit Unix millisecond timestamp followed by twelve sub-millisecond bits
    /// for version 7.
    pub const fn raw_timestamp(&self) -> Option<u64> {
        if self.has_timestamp() {
            Some(timestamp::unpack(
                self.version(),
                self.high48,
                self.mid_timestamp_bits(),
            ))
        } else {
            None
        }
    }

    /// Returns the high 48 bits of the raw timestamp.
    pub const fn timestamp_high(&self) -> Option<u64> {
        match self.raw_timestamp() {
            Some(raw) => Some(raw >> 12),
            None => None,
        }
    }

    /// Returns the low 12 bits of the raw timestamp.
    pub const fn timestamp_low(&self) -> Option<u16> {
        match self.raw_timestamp() {
            Some(raw) => Some(raw as u16 & 0xfff),
            None => None,
        }
    }

    /// Returns the creation time encoded in the UUID, in 100-nanosecond precision for versions 1
    /// and 6 and in millisecond precision for version 7.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::{Duration, UNIX_EPOCH};
    /// use uuidkit::Uuid;
    ///
    /// let x: Uuid = "f81d4fae-7dec-11d0-a765-00a0c91e6bf6".parse()?;
    /// assert_eq!(x.timestamp(), Some(UNIX_EPOCH + Duration::new(854_991_792, 216_875_000)));
    /// # Ok::<(), uuidkit::ParseError>(())
    /// ```
    pub fn timestamp(&self) -> Option<SystemTime> {
        let base = TimeBase::of(self.version())?;
        base.decode(self.raw_timestamp()?)
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::parse(src)
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.to_bytes()
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self::from_bytes(src)
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        src.to_u128()
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self::from_u128(src)
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = ParseError;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice_at(src, 0)
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.to_bytes())
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self::from_bytes(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(&self.to_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            if value.len() != 16 {
                return Err(de::Error::invalid_length(value.len(), &self));
            }
            Uuid::from_slice_at(value, 0).map_err(de::Error::custom)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::{Uuid, Variant};
    use crate::{Error, ParseError};

    const MAX_UINT48: u64 = (1 << 48) - 1;

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [((u64, u32, u64), &'static str)] {
        &[
            ((0, 0, 0), "00000000-0000-0000-0000-000000000000"),
            ((MAX_UINT48, 0, 0), "ffffffff-ffff-0000-0000-000000000000"),
            ((0, u32::MAX, 0), "00000000-0000-ffff-ffff-000000000000"),
            ((0, 0, MAX_UINT48), "00000000-0000-0000-0000-ffffffffffff"),
            (
                (MAX_UINT48, u32::MAX, MAX_UINT48),
                "ffffffff-ffff-ffff-ffff-ffffffffffff",
            ),
            (
                (0xf81d4fae7dec, 0x11d0a765, 0x00a0c91e6bf6),
                "f81d4fae-7dec-11d0-a765-00a0c91e6bf6",
            ),
            (
                (0x017f22e279b0, 0x7cc398c4, 0xdc0c0c07398f),
                "017f22e2-79b0-7cc3-98c4-dc0c0c07398f",
            ),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for (fs, text) in prepare_cases() {
            let from_fields = Uuid::from_fields(fs.0, fs.1, fs.2).unwrap();
            assert_eq!(Ok(from_fields), text.parse());
            assert_eq!(Ok(from_fields), text.to_uppercase().parse());
            assert_eq!(&from_fields.encode() as &str, *text);
            assert_eq!(&from_fields.to_string(), text);
            assert_eq!(from_fields.high48(), fs.0);
            assert_eq!(from_fields.mid32(), fs.1);
            assert_eq!(from_fields.low48(), fs.2);
            #[cfg(feature = "uuid")]
            assert_eq!(&uuid::Uuid::from(from_fields).to_string(), text);
        }
    }

    /// Rejects out-of-range field values
    #[test]
    fn rejects_out_of_range_field_values() {
        assert!(matches!(
            Uuid::from_fields(1 << 48, 0, 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Uuid::from_fields(0, 0, 1 << 48),
            Err(Error::InvalidArgument(_))
        ));
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            "",
            " 0180a8f0-5b82-75b4-9fef-ecad657c30bb",
            "0180a8f0-5b84-7438-ab50-f0626f78002b ",
            " 0180a8f0-5b84-7438-ab50-f063bd5331af ",
            "+0180a8f0-5b84-7438-ab50-f06405d35edb",
            "-0180a8f0-5b84-7438-ab50-f06508df4c2d",
            "+180a8f0-5b84-7438-ab50-f066aa10a367",
            "-180a8f0-5b84-7438-ab50-f067cdce1d69",
            "0180a8f05b847438ab50f068decfbfd7",
            "0180a8f0-5b847438-ab50-f06991838802",
            "{0180a8f0-5b84-7438-ab50-f06ac2e5e082}",
            "0180a8f0-5b84-74 8-ab50-f06bed27bdc7",
            "0180a8g0-5b84-7438-ab50-f06c91175b8a",
            "0180a8f0-5b84-7438-ab50_f06d3ea24429",
            "0180a8f0-5b84-7438-ab50-f06d3ea2442é",
        ];

        for e in cases {
            assert!(e.parse::<Uuid>().is_err());
            assert_eq!(Uuid::parse_or_none(e), None);
        }
    }

    /// Reports the reason of parse failures
    #[test]
    fn reports_the_reason_of_parse_failures() {
        assert_eq!(
            Uuid::parse("0180a8f05b847438ab50f068decfbfd7"),
            Err(ParseError::InvalidLength(32))
        );
        assert_eq!(
            Uuid::parse("0180a8g0-5b84-7438-ab50-f06c91175b8a"),
            Err(ParseError::InvalidCharacter(6))
        );
        assert_eq!(
            Uuid::parse("0180a8f0-5b84-7438-ab50_f06d3ea24429"),
            Err(ParseError::MissingHyphen(23))
        );
    }

    /// Decodes the well-known version 1 example
    #[test]
    fn decodes_the_well_known_version_1_example() {
        let e: Uuid = "f81d4fae-7dec-11d0-a765-00a0c91e6bf6".parse().unwrap();
        assert_eq!(
            e.to_bytes(),
            [
                0xf8, 0x1d, 0x4f, 0xae, 0x7d, 0xec, 0x11, 0xd0, 0xa7, 0x65, 0x00, 0xa0, 0xc9,
                0x1e, 0x6b, 0xf6
            ]
        );
        assert_eq!(e.version(), 1);
        assert_eq!(e.variant(), Variant::Var10);
        assert_eq!(e.sequence(), 0x2765);
        assert_eq!(e.node(), 0x00a0c91e6bf6);
        assert!(e.has_timestamp());
        assert_eq!(e.raw_timestamp(), Some(0x1d07decf81d4fae));
        assert_eq!(e.timestamp_high(), Some(0x1d07decf81d4));
        assert_eq!(e.timestamp_low(), Some(0xfae));
        assert_eq!(&e.encode() as &str, "f81d4fae-7dec-11d0-a765-00a0c91e6bf6");
    }

    /// Reads 16 bytes at an offset and ignores trailing bytes
    #[test]
    fn reads_16_bytes_at_an_offset_and_ignores_trailing_bytes() {
        let mut buf = vec![0xaau8; 3];
        buf.extend_from_slice(&[
            0x01, 0x7f, 0x22, 0xe2, 0x79, 0xb0, 0x7c, 0xc3, 0x98, 0xc4, 0xdc, 0x0c, 0x0c, 0x07,
            0x39, 0x8f,
        ]);
        buf.extend_from_slice(&[0xbb; 5]);

        let e = Uuid::from_slice_at(&buf, 3).unwrap();
        assert_eq!(e.to_string(), "017f22e2-79b0-7cc3-98c4-dc0c0c07398f");

        assert_eq!(
            Uuid::from_slice_at(&buf, 9),
            Err(ParseError::ShortBuffer(15))
        );
        assert_eq!(
            Uuid::from_slice_at(&buf, 100),
            Err(ParseError::ShortBuffer(0))
        );
        assert_eq!(Uuid::try_from(&buf[..15]), Err(ParseError::ShortBuffer(15)));
    }

    /// Normalizes all-zero encodings to Nil
    #[test]
    fn normalizes_all_zero_encodings_to_nil() {
        let from_str: Uuid = "00000000-0000-0000-0000-000000000000".parse().unwrap();
        let from_bytes = Uuid::from_slice_at(&[0u8; 20], 2).unwrap();
        let from_fields = Uuid::from_fields(0, 0, 0).unwrap();
        for e in [from_str, from_bytes, from_fields] {
            assert_eq!(e, Uuid::NIL);
            assert!(e.is_nil());
        }
        assert!(!Uuid::MAX.is_nil());
    }

    /// Returns Nil and Max UUIDs
    #[test]
    fn returns_nil_and_max_uuids() {
        assert_eq!(
            &Uuid::NIL.encode() as &str,
            "00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            &Uuid::MAX.encode() as &str,
            "ffffffff-ffff-ffff-ffff-ffffffffffff"
        );
        assert_eq!(Uuid::default(), Uuid::NIL);
    }

    /// Decodes variant prefixes and sequence widths
    #[test]
    fn decodes_variant_prefixes_and_sequence_widths() {
        let cases = [
            (0x0000_0000u32, Variant::Var0, 0),
            (0x0000_7fff, Variant::Var0, 0x7fff),
            (0x0000_8000, Variant::Var10, 0),
            (0x0000_bfff, Variant::Var10, 0x3fff),
            (0x0000_c000, Variant::Var110, 0),
            (0x0000_dfff, Variant::Var110, 0x1fff),
            (0x0000_e000, Variant::Var111, 0),
            (0xffff_ffff, Variant::Var111, 0x1fff),
        ];

        for (mid32, variant, sequence) in cases {
            let e = Uuid::from_fields(0, mid32, 0).unwrap();
            assert_eq!(e.variant(), variant);
            assert_eq!(e.sequence(), sequence);
            assert_eq!(
                u32::from(e.sequence()) | u32::from(variant.prefix()),
                mid32 & 0xffff
            );
        }
    }

    /// Reports timestamps only for versions 1, 6 and 7 of the RFC variant
    #[test]
    fn reports_timestamps_only_for_versions_1_6_and_7_of_the_rfc_variant() {
        for version in 0..16u32 {
            for variant_bits in [0x0000u32, 0x8000, 0xc000, 0xe000] {
                let e = Uuid::from_fields(0x0123_4567_89ab, version << 28 | variant_bits, 42)
                    .unwrap();
                let expected = variant_bits == 0x8000 && matches!(version, 1 | 6 | 7);
                assert_eq!(e.version() as u32, version);
                assert_eq!(e.has_timestamp(), expected);
                assert_eq!(e.raw_timestamp().is_some(), expected);
                assert_eq!(e.timestamp().is_some(), expected);
            }
        }
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        for (fs, _) in prepare_cases() {
            let e = Uuid::from_fields(fs.0, fs.1, fs.2).unwrap();
            assert_eq!(Uuid::from(<[u8; 16]>::from(e)), e);
            assert_eq!(Uuid::from(u128::from(e)), e);
            assert_eq!(e.encode().parse(), Ok(e));
            assert_eq!(e.encode().to_uppercase().parse(), Ok(e));
            assert_eq!(Uuid::try_from(e.to_string()), Ok(e));
            assert_eq!(Uuid::try_from(String::from(e).to_uppercase()), Ok(e));
            assert_eq!(Uuid::try_from(&e.to_bytes()[..]), Ok(e));
            #[cfg(feature = "uuid")]
            assert_eq!(Uuid::from(<uuid::Uuid>::from(e)), e);
            #[cfg(feature = "uuid")]
            assert_eq!(uuid::Uuid::from(e).as_u128(), u128::from(e));
        }
    }

    mod properties {
        use super::Uuid;
        use proptest::prelude::*;

        proptest! {
            /// Bytes and lowercase strings survive a decode-encode cycle
            #[test]
            fn bytes_and_strings_survive_decode_encode(bytes in any::<[u8; 16]>()) {
                let e = Uuid::from(bytes);
                prop_assert_eq!(e.to_bytes(), bytes);

                let text = e.to_string();
                prop_assert_eq!(&text, &text.to_lowercase());
                let parsed: Uuid = text.parse().unwrap();
                prop_assert_eq!(parsed, e);
                prop_assert_eq!(&parsed.encode() as &str, text.as_str());
            }

            /// Field triples survive packing
            #[test]
            fn field_triples_survive_packing(
                high48 in 0u64..1 << 48,
                mid32 in any::<u32>(),
                low48 in 0u64..1 << 48,
            ) {
                let e = Uuid::from_fields(high48, mid32, low48).unwrap();
                let back = Uuid::from(e.to_bytes());
                prop_assert_eq!((back.high48(), back.mid32(), back.low48()), (high48, mid32, low48));
            }
        }
    }
}
