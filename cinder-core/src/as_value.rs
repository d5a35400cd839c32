use crate::{Blob, Error, Result, StatementError, Value};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::{borrow::Cow, rc::Rc, sync::Arc};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// A host value that can be bound to a statement placeholder.
///
/// The trait exposes one probe per storage category. A value may answer more than one probe,
/// [`classify`] settles it by taking the first category that matches in this order:
///
/// 1. blob ([`AsValue::as_blob`])
/// 2. integral ([`AsValue::as_integral`])
/// 3. other numeric, widened to `f64` ([`AsValue::as_numeric`])
/// 4. null ([`AsValue::is_null`])
/// 5. text, the fallback ([`AsValue::as_text`])
///
/// # Implementing `AsValue` for custom types
/// Only `as_text` is required, a type answering none of the other probes is bound as text:
/// ```rust
/// use cinder_core::{AsValue, Value};
/// use std::borrow::Cow;
///
/// struct Email(&'static str);
/// impl AsValue for Email {
///     fn as_text(&self) -> Cow<'_, str> {
///         Cow::Borrowed(self.0)
///     }
/// }
/// assert_eq!(Email("a@b.c").as_value().unwrap(), Value::Text("a@b.c".into()));
/// ```
pub trait AsValue {
    /// Raw bytes, for explicitly tagged binary payloads.
    fn as_blob(&self) -> Option<&[u8]> {
        None
    }
    /// Integer representation. It is wider than the engine integer, range is checked by [`classify`].
    fn as_integral(&self) -> Option<i128> {
        None
    }
    /// Any other number.
    fn as_numeric(&self) -> Option<f64> {
        None
    }
    /// The absence of a value.
    fn is_null(&self) -> bool {
        false
    }
    /// Textual representation, used when no other category matched.
    fn as_text(&self) -> Cow<'_, str>;
    /// Classify this value into its engine [`Value`].
    fn as_value(&self) -> Result<Value> {
        classify(self)
    }
}

/// Ordered classifier: maps a host value to the engine value it is bound as.
///
/// The first matching category wins, it is never a best fit.
pub fn classify<V: AsValue + ?Sized>(value: &V) -> Result<Value> {
    if let Some(v) = value.as_blob() {
        return Ok(Value::Blob(v.into()));
    }
    if let Some(v) = value.as_integral() {
        return i64::try_from(v).map(Value::Integer).map_err(|_| {
            Error::new(StatementError::OutOfRange(format!(
                "Cannot bind integer `{}` because it does not fit into a 64 bit signed integer",
                v
            )))
        });
    }
    if let Some(v) = value.as_numeric() {
        return Ok(Value::Float(v));
    }
    if value.is_null() {
        return Ok(Value::Null);
    }
    Ok(Value::Text(value.as_text().into_owned()))
}

impl AsValue for Value {
    fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(v) => Some(v),
            _ => None,
        }
    }
    fn as_integral(&self) -> Option<i128> {
        match self {
            Value::Integer(v) => Some(*v as i128),
            _ => None,
        }
    }
    fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
    fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
    fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Text(v) => Cow::Borrowed(v),
            v => Cow::Owned(v.to_string()),
        }
    }
}

impl AsValue for Blob {
    fn as_blob(&self) -> Option<&[u8]> {
        Some(&self.0)
    }
    fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl AsValue for [u8] {
    fn as_blob(&self) -> Option<&[u8]> {
        Some(self)
    }
    fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self)
    }
}

impl AsValue for Vec<u8> {
    fn as_blob(&self) -> Option<&[u8]> {
        Some(self)
    }
    fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self)
    }
}

impl<const N: usize> AsValue for [u8; N] {
    fn as_blob(&self) -> Option<&[u8]> {
        Some(self)
    }
    fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self)
    }
}

macro_rules! impl_as_value_integral {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl AsValue for $ty {
                fn as_integral(&self) -> Option<i128> {
                    Some(*self as i128)
                }
                fn as_text(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )+
    };
}
impl_as_value_integral!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

/// Bound as the integer 0 or 1, like the engine stores booleans.
impl AsValue for bool {
    fn as_integral(&self) -> Option<i128> {
        Some(*self as i128)
    }
    fn as_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "true" } else { "false" })
    }
}

impl AsValue for f32 {
    fn as_numeric(&self) -> Option<f64> {
        Some(*self as f64)
    }
    fn as_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl AsValue for f64 {
    fn as_numeric(&self) -> Option<f64> {
        Some(*self)
    }
    fn as_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl AsValue for Decimal {
    fn as_numeric(&self) -> Option<f64> {
        self.to_f64()
    }
    fn as_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl AsValue for str {
    fn as_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl AsValue for String {
    fn as_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl AsValue for Cow<'_, str> {
    fn as_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl AsValue for char {
    fn as_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

macro_rules! impl_as_value_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl AsValue for $ty {
                fn as_text(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )+
    };
}
impl_as_value_display!(Uuid, Date, Time, PrimitiveDateTime, OffsetDateTime);

impl<T: AsValue> AsValue for Option<T> {
    fn as_blob(&self) -> Option<&[u8]> {
        self.as_ref().and_then(AsValue::as_blob)
    }
    fn as_integral(&self) -> Option<i128> {
        self.as_ref().and_then(AsValue::as_integral)
    }
    fn as_numeric(&self) -> Option<f64> {
        self.as_ref().and_then(AsValue::as_numeric)
    }
    fn is_null(&self) -> bool {
        self.as_ref().is_none_or(AsValue::is_null)
    }
    fn as_text(&self) -> Cow<'_, str> {
        self.as_ref().map(AsValue::as_text).unwrap_or_default()
    }
}

macro_rules! impl_as_value_pointer {
    ($($ptr:ident),+ $(,)?) => {
        $(
            impl<T: AsValue + ?Sized> AsValue for $ptr<T> {
                fn as_blob(&self) -> Option<&[u8]> {
                    (**self).as_blob()
                }
                fn as_integral(&self) -> Option<i128> {
                    (**self).as_integral()
                }
                fn as_numeric(&self) -> Option<f64> {
                    (**self).as_numeric()
                }
                fn is_null(&self) -> bool {
                    (**self).is_null()
                }
                fn as_text(&self) -> Cow<'_, str> {
                    (**self).as_text()
                }
            }
        )+
    };
}
impl_as_value_pointer!(Box, Rc, Arc);

impl<T: AsValue + ?Sized> AsValue for &T {
    fn as_blob(&self) -> Option<&[u8]> {
        (**self).as_blob()
    }
    fn as_integral(&self) -> Option<i128> {
        (**self).as_integral()
    }
    fn as_numeric(&self) -> Option<f64> {
        (**self).as_numeric()
    }
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
    fn as_text(&self) -> Cow<'_, str> {
        (**self).as_text()
    }
}
