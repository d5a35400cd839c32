use crate::{Blob, Error, Result, Value, truncate_long};
use atoi::FromRadix10SignedChecked;
use fast_float::parse_partial;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use std::any;
use uuid::Uuid;

/// Conversion from a decoded engine [`Value`] back into a host type.
///
/// Integers and floats coming back as text (for example from a column without affinity) are
/// parsed, the whole text must be consumed.
pub trait FromValue: Sized {
    fn try_from_value(value: Value) -> Result<Self>;
}

fn unexpected<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert the {} value {} into {}",
        value.type_name(),
        value,
        any::type_name::<T>()
    ))
}

fn parse_integer<T>(text: &str) -> Result<i64> {
    let trimmed = text.trim();
    match i64::from_radix_10_signed_checked(trimmed.as_bytes()) {
        (Some(v), len) if len > 0 && len == trimmed.len() => Ok(v),
        _ => Err(Error::msg(format!(
            "Cannot parse `{}` as {}",
            truncate_long!(text),
            any::type_name::<T>()
        ))),
    }
}

fn parse_float<T>(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match parse_partial::<f64, _>(trimmed) {
        Ok((v, len)) if len == trimmed.len() => Ok(v),
        _ => Err(Error::msg(format!(
            "Cannot parse `{}` as {}",
            truncate_long!(text),
            any::type_name::<T>()
        ))),
    }
}

impl FromValue for Value {
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for i64 {
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Integer(v) => Ok(v),
            Value::Float(v) if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 => {
                Ok(v as i64)
            }
            Value::Text(ref v) => parse_integer::<i64>(v),
            v => Err(unexpected::<i64>(&v)),
        }
    }
}

macro_rules! impl_from_value_narrow {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromValue for $ty {
                fn try_from_value(value: Value) -> Result<Self> {
                    let v = i64::try_from_value(value)?;
                    <$ty>::try_from(v).map_err(|_| {
                        Error::msg(format!(
                            "Value {} is out of range for {}",
                            v,
                            any::type_name::<$ty>()
                        ))
                    })
                }
            }
        )+
    };
}
impl_from_value_narrow!(i8, i16, i32, u8, u16, u32, u64, isize, usize);

impl FromValue for bool {
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Integer(v) => Ok(v != 0),
            Value::Text(ref v) if v.eq_ignore_ascii_case("true") => Ok(true),
            Value::Text(ref v) if v.eq_ignore_ascii_case("false") => Ok(false),
            v => Err(unexpected::<bool>(&v)),
        }
    }
}

impl FromValue for f64 {
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float(v) => Ok(v),
            Value::Integer(v) => Ok(v as f64),
            Value::Text(ref v) => parse_float::<f64>(v),
            v => Err(unexpected::<f64>(&v)),
        }
    }
}

impl FromValue for f32 {
    fn try_from_value(value: Value) -> Result<Self> {
        f64::try_from_value(value).map(|v| v as f32)
    }
}

impl FromValue for Decimal {
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Integer(v) => Ok(Decimal::from(v)),
            Value::Float(v) => Decimal::from_f64(v)
                .ok_or_else(|| Error::msg(format!("Cannot convert {} into a Decimal", v))),
            Value::Text(ref v) => v
                .trim()
                .parse::<Decimal>()
                .map_err(|e| Error::new(e).context(format!("Cannot parse `{}` as Decimal", v))),
            v => Err(unexpected::<Decimal>(&v)),
        }
    }
}

impl FromValue for String {
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(v) => Ok(v),
            Value::Integer(..) | Value::Float(..) => Ok(value.to_string()),
            v => Err(unexpected::<String>(&v)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(v) => Ok(v.into_vec()),
            Value::Text(v) => Ok(v.into_bytes()),
            v => Err(unexpected::<Vec<u8>>(&v)),
        }
    }
}

impl FromValue for Box<[u8]> {
    fn try_from_value(value: Value) -> Result<Self> {
        Vec::<u8>::try_from_value(value).map(Vec::into_boxed_slice)
    }
}

impl FromValue for Blob {
    fn try_from_value(value: Value) -> Result<Self> {
        Vec::<u8>::try_from_value(value).map(Blob)
    }
}

impl FromValue for Uuid {
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(ref v) => Uuid::parse_str(v)
                .map_err(|e| Error::new(e).context(format!("Cannot parse `{}` as Uuid", v))),
            Value::Blob(ref v) => Uuid::from_slice(v).map_err(Error::new),
            v => Err(unexpected::<Uuid>(&v)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            v => T::try_from_value(v).map(Some),
        }
    }
}
