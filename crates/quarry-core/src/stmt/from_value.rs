use super::value::DATETIME_FORMAT;
use super::Value;
use crate::{Error, Result};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Converts a [`Value`] read from a row into a Rust type.
///
/// Conversions accept the representations SQLite hands back: booleans stored
/// as integers, integral floats, and date-times stored as text.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            Value::I64(v) => Ok(v != 0),
            value => Err(Error::type_conversion(value, "bool")),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::I64(v) => Ok(v),
            Value::Bool(v) => Ok(v as i64),
            Value::F64(v) if v.fract() == 0.0 => Ok(v as i64),
            Value::String(v) => match v.parse() {
                Ok(parsed) => Ok(parsed),
                Err(_) => Err(Error::type_conversion(Value::String(v), "i64")),
            },
            value => Err(Error::type_conversion(value, "i64")),
        }
    }
}

macro_rules! impl_from_value_narrow {
    ( $( $ty:ty ),* ) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self> {
                    let wide = i64::from_value(value)?;
                    <$ty>::try_from(wide)
                        .map_err(|_| Error::type_conversion(Value::I64(wide), stringify!($ty)))
                }
            }
        )*
    };
}

impl_from_value_narrow!(i32, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::F64(v) => Ok(v),
            Value::I64(v) => Ok(v as f64),
            Value::String(v) => match v.parse() {
                Ok(parsed) => Ok(parsed),
                Err(_) => Err(Error::type_conversion(Value::String(v), "f64")),
            },
            value => Err(Error::type_conversion(value, "f64")),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            Value::DateTime(v) => Ok(v.format(DATETIME_FORMAT).to_string()),
            Value::Bytes(v) => match String::from_utf8(v) {
                Ok(v) => Ok(v),
                Err(e) => Err(Error::type_conversion(Value::Bytes(e.into_bytes()), "String")),
            },
            value => Err(Error::type_conversion(value, "String")),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(v) => Ok(v),
            Value::String(v) => Ok(v.into_bytes()),
            value => Err(Error::type_conversion(value, "Vec<u8>")),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::DateTime(v) => Ok(v),
            Value::String(v) => match parse_datetime(&v) {
                Some(parsed) => Ok(parsed),
                None => Err(Error::type_conversion(Value::String(v), "NaiveDateTime")),
            },
            value => Err(Error::type_conversion(value, "NaiveDateTime")),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: Value) -> Result<Self> {
        NaiveDateTime::from_value(value).map(|v| v.and_utc())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}

fn parse_datetime(src: &str) -> Option<NaiveDateTime> {
    const FORMATS: &[&str] = &[DATETIME_FORMAT, "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(src, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(src, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
