use std::{
    fmt::{self, Display},
    ops::Deref,
};

/// An engine native value.
///
/// This is the closed set of storage types an embedded engine understands. Host values reach it
/// through [`AsValue`](crate::AsValue) and come back from result rows decoded into it.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Blob(Box<[u8]>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the storage type, as SQLite's `typeof()` spells it.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(..) => "integer",
            Value::Float(..) => "real",
            Value::Text(..) => "text",
            Value::Blob(..) => "blob",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) if v.is_finite() => write!(f, "{:?}", v),
            Value::Float(v) if v.is_nan() => f.write_str("NULL"),
            Value::Float(v) => f.write_str(if *v > 0.0 { "9e999" } else { "-9e999" }),
            Value::Text(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Blob(v) => write!(f, "X'{}'", hex::encode_upper(v)),
        }
    }
}

impl From<Blob> for Value {
    fn from(value: Blob) -> Self {
        Value::Blob(value.0.into_boxed_slice())
    }
}

/// Binary payload tag.
///
/// Bytes wrapped in a `Blob` are always bound as blob, even when they would also read as valid
/// text or as a number.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Blob(pub Vec<u8>);

impl Blob {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for Blob {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Blob {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for Blob {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

/// Tag `bytes` as a blob.
///
/// ```rust
/// use cinder_core::{AsValue, Value, to_blob};
/// let value = to_blob("123").as_value().unwrap();
/// assert_eq!(value, Value::Blob(b"123".to_vec().into_boxed_slice()));
/// ```
pub fn to_blob(bytes: impl AsRef<[u8]>) -> Blob {
    Blob(bytes.as_ref().to_vec())
}
