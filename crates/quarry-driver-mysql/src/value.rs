use chrono::{NaiveDate, NaiveDateTime};
use mysql_async::{consts::ColumnType, prelude::ToValue, Column};
use quarry_core::stmt::{Value as CoreValue, DATETIME_FORMAT};

/// Character set id MySQL reports for binary columns.
const BINARY_CHARSET: u16 = 63;

/// A bound parameter in the form mysql_async expects.
#[derive(Debug)]
pub struct Value<'a>(&'a CoreValue);

impl<'a> From<&'a CoreValue> for Value<'a> {
    fn from(value: &'a CoreValue) -> Self {
        Self(value)
    }
}

impl ToValue for Value<'_> {
    fn to_value(&self) -> mysql_async::Value {
        match self.0 {
            CoreValue::Null => mysql_async::Value::NULL,
            CoreValue::Bool(value) => (*value as i64).to_value(),
            CoreValue::I64(value) => value.to_value(),
            CoreValue::F64(value) => value.to_value(),
            CoreValue::String(value) => value.to_value(),
            CoreValue::Bytes(value) => value.to_value(),
            CoreValue::DateTime(value) => value.format(DATETIME_FORMAT).to_string().to_value(),
        }
    }
}

/// Converts a value read back from MySQL.
///
/// Text comes back as bytes over the binary protocol; columns without the
/// binary character set are decoded as strings.
pub fn from_sql(value: mysql_async::Value, column: &Column) -> CoreValue {
    match value {
        mysql_async::Value::NULL => CoreValue::Null,
        mysql_async::Value::Int(v) => CoreValue::I64(v),
        mysql_async::Value::UInt(v) => match i64::try_from(v) {
            Ok(v) => CoreValue::I64(v),
            Err(_) => CoreValue::F64(v as f64),
        },
        mysql_async::Value::Float(v) => CoreValue::F64(v.into()),
        mysql_async::Value::Double(v) => CoreValue::F64(v),
        mysql_async::Value::Bytes(v) => bytes(v, column),
        mysql_async::Value::Date(year, month, day, hour, minute, second, micros) => {
            match datetime(year, month, day, hour, minute, second, micros) {
                Some(v) => CoreValue::DateTime(v),
                // Zero dates such as `0000-00-00` have no chrono form
                None => CoreValue::Null,
            }
        }
        mysql_async::Value::Time(negative, days, hour, minute, second, micros) => {
            let sign = if negative { "-" } else { "" };
            let hours = days * 24 + u32::from(hour);
            CoreValue::String(format!(
                "{sign}{hours:02}:{minute:02}:{second:02}.{micros:06}"
            ))
        }
    }
}

fn bytes(v: Vec<u8>, column: &Column) -> CoreValue {
    let binary = column.character_set() == BINARY_CHARSET
        && !matches!(
            column.column_type(),
            ColumnType::MYSQL_TYPE_DECIMAL | ColumnType::MYSQL_TYPE_NEWDECIMAL
        );

    if binary {
        return CoreValue::Bytes(v);
    }

    match String::from_utf8(v) {
        Ok(v) => CoreValue::String(v),
        Err(err) => CoreValue::Bytes(err.into_bytes()),
    }
}

fn datetime(
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    micros: u32,
) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year.into(), month.into(), day.into())?.and_hms_micro_opt(
        hour.into(),
        minute.into(),
        second.into(),
        micros,
    )
}
