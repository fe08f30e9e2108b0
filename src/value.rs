//! Conversion between ObjectIDs and untyped database values.
//!
//! Data access layers commonly exchange column values through a small closed set of primitive
//! types. [`Value`] models that set so that an [`ObjectId`] can be stored as its hexadecimal
//! string and read back from either a string or a byte sequence column.
//!
//! ```rust
//! use objectid::{value::Value, ObjectId};
//!
//! let id: ObjectId = "640c5fe5d243553cda8dde1b".parse()?;
//! let stored = Value::from(id);
//! assert_eq!(stored, Value::Text("640c5fe5d243553cda8dde1b".into()));
//! assert_eq!(ObjectId::try_from(&stored)?, id);
//!
//! let raw = Value::Bytes(b"640c5fe5d243553cda8dde1b".to_vec());
//! assert_eq!(ObjectId::try_from(raw)?, id);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg(feature = "std")]
#![cfg_attr(docsrs, doc(cfg(feature = "std")))]

use std::{fmt, str, time::SystemTime};

use crate::{ObjectId, ParseError};

/// An untyped value exchanged with a value store.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    /// Absent value.
    Null,

    /// Boolean value.
    Bool(bool),

    /// 64-bit signed integer.
    Int(i64),

    /// 64-bit floating-point number.
    Float(f64),

    /// UTF-8 string; the stored form of an ObjectID.
    Text(String),

    /// Byte sequence, read as the UTF-8 bytes of a string.
    Bytes(Vec<u8>),

    /// Point in time.
    Time(SystemTime),
}

impl Value {
    /// Returns the name of the variant, for diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Time(_) => "time",
        }
    }
}

impl From<ObjectId> for Value {
    /// Stores the ObjectID as its 24-digit hexadecimal string.
    fn from(src: ObjectId) -> Self {
        Self::Text(src.to_string())
    }
}

impl TryFrom<&Value> for ObjectId {
    type Error = ValueError;

    /// Reads an ObjectID back from a text value or from a byte sequence holding the same text.
    fn try_from(src: &Value) -> Result<Self, Self::Error> {
        match src {
            Value::Text(text) => Ok(text.parse::<ObjectId>()?),
            Value::Bytes(bytes) => {
                let text = str::from_utf8(bytes).map_err(|_| ParseError::InvalidEncoding)?;
                Ok(text.parse::<ObjectId>()?)
            }
            other => Err(ValueError::UnsupportedSourceType(other.type_name())),
        }
    }
}

impl TryFrom<Value> for ObjectId {
    type Error = ValueError;

    fn try_from(src: Value) -> Result<Self, Self::Error> {
        Self::try_from(&src)
    }
}

/// Error converting a [`Value`] into an [`ObjectId`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ValueError {
    /// The value was neither text nor a byte sequence; carries the type name of the value.
    UnsupportedSourceType(&'static str),

    /// The value held an invalid string representation.
    Parse(ParseError),
}

impl From<ParseError> for ValueError {
    fn from(src: ParseError) -> Self {
        Self::Parse(src)
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSourceType(name) => write!(f, "unsupported source type: {name}"),
            Self::Parse(err) => write!(f, "invalid ObjectID value: {err}"),
        }
    }
}

impl std::error::Error for ValueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedSourceType(_) => None,
            Self::Parse(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Value, ValueError};
    use crate::{ObjectId, ParseError};

    /// Stores Nil ObjectID as zero string
    #[test]
    fn stores_nil_object_id_as_zero_string() {
        let v = Value::from(ObjectId::NIL);
        assert_eq!(v, Value::Text("000000000000000000000000".to_owned()));

        assert_eq!(ObjectId::try_from(&v), Ok(ObjectId::NIL));
        assert_eq!(
            ObjectId::try_from(Value::Bytes(b"000000000000000000000000".to_vec())),
            Ok(ObjectId::NIL)
        );
    }

    /// Reads back generated identifiers from text and bytes
    #[test]
    fn reads_back_generated_identifiers_from_text_and_bytes() {
        let g = crate::ObjectIdGenerator::new(crate::MachineProcessId::from([7; 5]), 0);
        for _ in 0..100 {
            let e = g.generate_with_timestamp(0x640c_5fe5);
            let Value::Text(text) = Value::from(e) else {
                panic!("ObjectID must be stored as text");
            };
            assert_eq!(ObjectId::try_from(Value::Bytes(text.clone().into_bytes())), Ok(e));
            assert_eq!(ObjectId::try_from(Value::Text(text)), Ok(e));
        }
    }

    /// Rejects unsupported source types
    #[test]
    fn rejects_unsupported_source_types() {
        let cases = [
            (Value::Int(1), "int"),
            (Value::Null, "null"),
            (Value::Bool(true), "bool"),
            (Value::Float(0.5), "float"),
            (Value::Time(std::time::SystemTime::UNIX_EPOCH), "time"),
        ];
        for (v, name) in cases {
            assert_eq!(
                ObjectId::try_from(&v),
                Err(ValueError::UnsupportedSourceType(name))
            );
        }
    }

    /// Returns error to invalid representation
    #[test]
    fn returns_error_to_invalid_representation() {
        assert_eq!(
            ObjectId::try_from(Value::Text("xxx-xxx-xx".to_owned())),
            Err(ValueError::Parse(ParseError::InvalidLength(10)))
        );
        assert_eq!(
            ObjectId::try_from(Value::Text("z".repeat(24))),
            Err(ValueError::Parse(ParseError::InvalidEncoding))
        );
        assert_eq!(
            ObjectId::try_from(Value::Bytes(vec![0xff; 24])),
            Err(ValueError::Parse(ParseError::InvalidEncoding))
        );
        // raw binary form is not a stored representation
        assert_eq!(
            ObjectId::try_from(Value::Bytes(vec![0; 12])),
            Err(ValueError::Parse(ParseError::InvalidLength(12)))
        );
    }
}
