use core::{fmt, str};

use fstr::FStr;

use crate::MachineProcessId;

/// Represents a 12-byte MongoDB-style ObjectID.
///
/// The derived ordering compares the raw bytes, so identifiers created by one process sort by
/// timestamp first and then by counter.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Nil ObjectID (000000000000000000000000), representing an absent value.
    pub const NIL: Self = Self([0x00; 12]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// Creates an ObjectID from its field values.
    ///
    /// Only the low 24 bits of `counter` are stored; higher bits are silently discarded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use objectid::{MachineProcessId, ObjectId};
    ///
    /// let mpid = MachineProcessId::from([0xd2, 0x43, 0x55, 0x3c, 0xda]);
    /// let id = ObjectId::from_fields(0x640c_5fe5, mpid, 0x8d_de1b);
    /// assert_eq!(&id.encode() as &str, "640c5fe5d243553cda8dde1b");
    /// ```
    pub const fn from_fields(
        unix_ts_secs: u32,
        machine_process_id: MachineProcessId,
        counter: u32,
    ) -> Self {
        let mpid = machine_process_id.as_bytes();
        Self([
            (unix_ts_secs >> 24) as u8,
            (unix_ts_secs >> 16) as u8,
            (unix_ts_secs >> 8) as u8,
            unix_ts_secs as u8,
            mpid[0],
            mpid[1],
            mpid[2],
            mpid[3],
            mpid[4],
            (counter >> 16) as u8,
            (counter >> 8) as u8,
            counter as u8,
        ])
    }

    /// Returns the `unix_ts_secs` field value.
    pub const fn timestamp_secs(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// Returns the machine and process discriminator embedded in the ObjectID.
    pub const fn machine_process_id(&self) -> MachineProcessId {
        MachineProcessId::from_bytes([self.0[4], self.0[5], self.0[6], self.0[7], self.0[8]])
    }

    /// Returns the 24-bit `counter` field value. The most significant byte is always zero.
    pub const fn counter(&self) -> u32 {
        u32::from_be_bytes([0, self.0[9], self.0[10], self.0[11]])
    }

    /// Returns `true` if `self` is the Nil ObjectID.
    pub const fn is_nil(&self) -> bool {
        let mut i = 0;
        while i < self.0.len() {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Returns the 24-digit lowercase hexadecimal string representation stored in a
    /// stack-allocated string type.
    ///
    /// This method is primarily for `no_std` environments where heap-allocated string types are
    /// not readily available. Use the [`fmt::Display`] trait usually to get the hexadecimal
    /// string representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use objectid::ObjectId;
    ///
    /// let x = "640C5FE5D243553CDA8DDE1B".parse::<ObjectId>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "640c5fe5d243553cda8dde1b");
    /// assert_eq!(format!("{}", y), "640c5fe5d243553cda8dde1b");
    /// # Ok::<(), objectid::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<24> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 24];
        for (src, dst) in self.0.iter().zip(buffer.chunks_exact_mut(2)) {
            let e = *src as usize;
            dst[0] = DIGITS[e >> 4];
            dst[1] = DIGITS[e & 15];
        }
        debug_assert!(buffer.is_ascii());
        // SAFETY: every byte is taken from `DIGITS`
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }
}

impl fmt::Display for ObjectId {
    /// Returns the 24-digit lowercase hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for ObjectId {
    type Err = ParseError;

    /// Creates an object from the 24-digit hexadecimal string representation, accepting both
    /// upper and lower case digits.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let src = src.as_bytes();
        if src.len() != 24 {
            return Err(ParseError::InvalidLength(src.len()));
        }

        let mut dst = [0u8; 12];
        for (e, pair) in dst.iter_mut().zip(src.chunks_exact(2)) {
            let hi = hex_digit(pair[0]).ok_or(ParseError::InvalidEncoding)?;
            let lo = hex_digit(pair[1]).ok_or(ParseError::InvalidEncoding)?;
            *e = (hi << 4) | lo;
        }
        Ok(Self(dst))
    }
}

/// Returns the value of an ASCII hexadecimal digit.
const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl From<ObjectId> for [u8; 12] {
    fn from(src: ObjectId) -> Self {
        src.0
    }
}

impl From<[u8; 12]> for ObjectId {
    fn from(src: [u8; 12]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for ObjectId {
    type Error = ParseError;

    /// Creates an object from a 12-byte slice holding the binary representation.
    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        <[u8; 12]>::try_from(src)
            .map(Self)
            .map_err(|_| ParseError::InvalidLength(src.len()))
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Error parsing an invalid representation of ObjectID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParseError {
    /// The input was not exactly 24 characters (or 12 bytes for the binary form) long; carries
    /// the length received.
    InvalidLength(usize),

    /// The input had the right length but contained a non-hexadecimal character.
    InvalidEncoding,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => write!(f, "invalid length: {len}"),
            Self::InvalidEncoding => write!(f, "invalid hexadecimal encoding"),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ObjectId, ParseError};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    impl ObjectId {
        /// Returns the creation time recorded in the ObjectID, in UTC with second precision.
        ///
        /// # Examples
        ///
        /// ```rust
        /// use std::time::{Duration, UNIX_EPOCH};
        ///
        /// let id: objectid::ObjectId = "640c5fe5d243553cda8dde1b".parse()?;
        /// assert_eq!(id.timestamp(), UNIX_EPOCH + Duration::from_secs(1_678_532_581));
        /// # Ok::<(), objectid::ParseError>(())
        /// ```
        pub fn timestamp(&self) -> SystemTime {
            UNIX_EPOCH + Duration::from_secs(self.timestamp_secs().into())
        }
    }

    impl From<ObjectId> for String {
        fn from(src: ObjectId) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for ObjectId {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }

    impl std::error::Error for ParseError {}
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, ObjectId};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for ObjectId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for ObjectId {
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
        type Value = ObjectId;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "an ObjectID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Self::Value::try_from(value).map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::ObjectId;
        use serde_test::{assert_de_tokens_error, assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases = [
                ("000000000000000000000000", &[0u8; 12]),
                (
                    "640c5fe5d243553cda8dde1b",
                    &[100, 12, 95, 229, 210, 67, 85, 60, 218, 141, 222, 27],
                ),
                (
                    "65f0a1c2e4b0d1f2a3000001",
                    &[101, 240, 161, 194, 228, 176, 209, 242, 163, 0, 0, 1],
                ),
                (
                    "ffffffffffffffffffffffff",
                    &[255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255],
                ),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<ObjectId>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }

        /// Rejects malformed tokens
        #[test]
        fn rejects_malformed_tokens() {
            assert_de_tokens_error::<serde_test::Readable<ObjectId>>(
                &[Token::Str("640c5fe5d243553cda8dde1")],
                "invalid length: 23",
            );
            assert_de_tokens_error::<serde_test::Readable<ObjectId>>(
                &[Token::Str("zzzzzzzzzzzzzzzzzzzzzzzz")],
                "invalid hexadecimal encoding",
            );
            assert_de_tokens_error::<serde_test::Compact<ObjectId>>(
                &[Token::Bytes(&[0u8; 11])],
                "invalid length: 11",
            );
        }
    }

}

#[cfg(test)]
mod tests {
    use super::{ObjectId, ParseError};
    use crate::MachineProcessId;

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [((u32, [u8; 5], u32), &'static str)] {
        const MAX_UINT24: u32 = (1 << 24) - 1;

        &[
            ((0, [0; 5], 0), "000000000000000000000000"),
            ((u32::MAX, [0; 5], 0), "ffffffff0000000000000000"),
            ((0, [0xff; 5], 0), "00000000ffffffffff000000"),
            ((0, [0; 5], MAX_UINT24), "000000000000000000ffffff"),
            (
                (u32::MAX, [0xff; 5], MAX_UINT24),
                "ffffffffffffffffffffffff",
            ),
            (
                (0x640c_5fe5, [0xd2, 0x43, 0x55, 0x3c, 0xda], 0x8d_de1b),
                "640c5fe5d243553cda8dde1b",
            ),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for (fs, text) in prepare_cases() {
            let from_fields = ObjectId::from_fields(fs.0, MachineProcessId::from(fs.1), fs.2);
            assert_eq!(Ok(from_fields), text.parse());
            #[cfg(feature = "std")]
            assert_eq!(Ok(from_fields), text.to_uppercase().parse());
            assert_eq!(&from_fields.encode() as &str, *text);
            #[cfg(feature = "std")]
            assert_eq!(&from_fields.to_string(), text);

            assert_eq!(from_fields.timestamp_secs(), fs.0);
            assert_eq!(from_fields.machine_process_id().as_bytes(), &fs.1);
            assert_eq!(from_fields.counter(), fs.2);
        }
    }

    /// Keeps only low 24 bits of counter
    #[test]
    fn keeps_only_low_24_bits_of_counter() {
        let mpid = MachineProcessId::from([1, 2, 3, 4, 5]);
        let e = ObjectId::from_fields(42, mpid, 0xab12_3456);
        assert_eq!(e.counter(), 0x12_3456);
        assert_eq!(e.timestamp_secs(), 42);
        assert_eq!(e.machine_process_id(), mpid);
        assert_eq!(
            ObjectId::from_fields(42, mpid, u32::MAX).counter(),
            (1 << 24) - 1
        );
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let length_cases = [
            ("", 0),
            ("aaaaaaaaaaaaaaaaaaaaaaa", 23),
            ("640c5fe5d243553cda8dde1b0", 25),
            (" 640c5fe5d243553cda8dde1b", 25),
            ("640c5fe5-d243553c-da8dde1b", 26),
            ("640c5fe5d243553cda8dde1", 23),
        ];
        for (e, len) in length_cases {
            assert_eq!(e.parse::<ObjectId>(), Err(ParseError::InvalidLength(len)));
            assert!(e.parse::<ObjectId>().unwrap_or_default().is_nil());
        }

        let encoding_cases = [
            "zzzzzzzzzzzzzzzzzzzzzzzz",
            "640c5fe5d243553cda8dde1g",
            "+40c5fe5d243553cda8dde1b",
            "640c5fe5d243 53cda8dde1b",
            "0x0c5fe5d243553cda8dde1b",
            "640c5fe5d243553cda8dde\u{e9}",
        ];
        for e in encoding_cases {
            assert_eq!(e.parse::<ObjectId>(), Err(ParseError::InvalidEncoding));
            assert!(e.parse::<ObjectId>().unwrap_or_default().is_nil());
        }
    }

    /// Returns Nil ObjectID
    #[test]
    fn returns_nil_object_id() {
        assert_eq!(&ObjectId::NIL.encode() as &str, "000000000000000000000000");
        assert!(ObjectId::NIL.is_nil());
        assert!(ObjectId::default().is_nil());
        assert!(!ObjectId::from([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]).is_nil());
        assert_eq!("000000000000000000000000".parse(), Ok(ObjectId::NIL));
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        for (fs, _) in prepare_cases() {
            let e = ObjectId::from_fields(fs.0, MachineProcessId::from(fs.1), fs.2);
            assert_eq!(ObjectId::from(<[u8; 12]>::from(e)), e);
            assert_eq!(ObjectId::try_from(&e.as_bytes()[..]), Ok(e));
            assert_eq!(AsRef::<[u8]>::as_ref(&e), &e.as_bytes()[..]);
            assert_eq!(e.encode().parse(), Ok(e));
            #[cfg(feature = "std")]
            assert_eq!(ObjectId::try_from(e.to_string()), Ok(e));
            #[cfg(feature = "std")]
            assert_eq!(ObjectId::try_from(e.to_string().to_uppercase()), Ok(e));
        }

        assert_eq!(
            ObjectId::try_from(&[0u8; 13][..]),
            Err(ParseError::InvalidLength(13))
        );
    }

    /// Recovers timestamp as system time
    #[cfg(feature = "std")]
    #[test]
    fn recovers_timestamp_as_system_time() {
        use std::time::{Duration, UNIX_EPOCH};

        let e: ObjectId = "640c5fe5d243553cda8dde1b".parse().unwrap();
        assert_eq!(e.timestamp(), UNIX_EPOCH + Duration::from_secs(0x640c_5fe5));

        // the 32-bit field lasts until 2106
        let e: ObjectId = "ffffffff0000000000000000".parse().unwrap();
        assert_eq!(
            e.timestamp().duration_since(UNIX_EPOCH).unwrap().as_secs(),
            u32::MAX as u64
        );
    }

    /// Sorts by timestamp then by counter
    #[test]
    fn sorts_by_timestamp_then_by_counter() {
        let a = MachineProcessId::from([0xff; 5]);
        let b = MachineProcessId::from([0x00; 5]);
        assert!(ObjectId::from_fields(1, a, 9) < ObjectId::from_fields(2, b, 0));
        assert!(ObjectId::from_fields(1, a, 9) < ObjectId::from_fields(1, a, 10));
    }
}
