use crate::error::{PushdownError, Result};
use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use model::DataType;
use std::{fmt, str::FromStr};
use uuid::Uuid;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S%.f";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
pub const TIMESTAMPTZ_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%#z";

/// A filter literal decoded according to its source type.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f32),
    Double(f64),
    Decimal(BigDecimal),
    String(String),
    Boolean(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<FixedOffset>),
    Uuid(Uuid),
    Bytes(Vec<u8>),
}

impl Literal {
    pub fn decode(data_type: DataType, raw: &str) -> Result<Self> {
        let fail = |reason: String| PushdownError::ValueDecode {
            value: raw.to_string(),
            data_type: data_type.to_string(),
            reason,
        };

        let literal = match data_type {
            DataType::Smallint | DataType::Integer | DataType::Bigint => {
                let value: i64 = raw.parse().map_err(|e| fail(format!("{e}")))?;
                let in_range = match data_type {
                    DataType::Smallint => i16::try_from(value).is_ok(),
                    DataType::Integer => i32::try_from(value).is_ok(),
                    _ => true,
                };
                if !in_range {
                    return Err(fail("value out of range".to_string()));
                }
                Literal::Integer(value)
            }
            DataType::Real => {
                let value: f32 = raw.parse().map_err(|e| fail(format!("{e}")))?;
                if !value.is_finite() {
                    return Err(fail("value is not a finite number".to_string()));
                }
                Literal::Float(value)
            }
            DataType::Float8 => {
                let value: f64 = raw.parse().map_err(|e| fail(format!("{e}")))?;
                if !value.is_finite() {
                    return Err(fail("value is not a finite number".to_string()));
                }
                Literal::Double(value)
            }
            DataType::Numeric => {
                Literal::Decimal(BigDecimal::from_str(raw).map_err(|e| fail(format!("{e}")))?)
            }
            DataType::Text | DataType::Varchar | DataType::Bpchar => {
                Literal::String(raw.to_string())
            }
            DataType::Boolean => Literal::Boolean(parse_bool(raw).ok_or_else(|| {
                fail("expected one of true, false, t, f".to_string())
            })?),
            DataType::Date => Literal::Date(
                NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| fail(format!("{e}")))?,
            ),
            DataType::Time => Literal::Time(
                NaiveTime::parse_from_str(raw, TIME_FORMAT).map_err(|e| fail(format!("{e}")))?,
            ),
            DataType::Timestamp => Literal::Timestamp(
                NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
                    .map_err(|e| fail(format!("{e}")))?,
            ),
            DataType::TimestampWithTimeZone => Literal::TimestampTz(
                DateTime::parse_from_str(raw, TIMESTAMPTZ_FORMAT)
                    .map_err(|e| fail(format!("{e}")))?,
            ),
            DataType::Uuid => {
                Literal::Uuid(Uuid::parse_str(raw).map_err(|e| fail(format!("{e}")))?)
            }
            DataType::Bytea => match raw.strip_prefix("\\x") {
                Some(digits) => Literal::Bytes(hex::decode(digits).map_err(|e| fail(format!("{e}")))?),
                None => Literal::Bytes(raw.as_bytes().to_vec()),
            },
            array => return Err(fail(format!("{array} is a list type"))),
        };
        Ok(literal)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Literal::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Floating point value, widening `float4` through its shortest decimal
    /// form so `0.1f32` becomes `0.1` rather than `0.10000000149011612`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Float(v) => ryu::Buffer::new().format(*v).parse().ok(),
            Literal::Double(v) => Some(*v),
            Literal::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" => Some(true),
        "false" | "f" => Some(false),
        _ => None,
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{}", ryu::Buffer::new().format(*v)),
            Literal::Double(v) => write!(f, "{}", ryu::Buffer::new().format(*v)),
            Literal::Decimal(v) => write!(f, "{v}"),
            Literal::String(v) => write!(f, "{v}"),
            Literal::Boolean(v) => write!(f, "{v}"),
            Literal::Date(v) => write!(f, "{}", v.format(DATE_FORMAT)),
            Literal::Time(v) => write!(f, "{}", v.format(TIME_FORMAT)),
            Literal::Timestamp(v) => write!(f, "{}", v.format(TIMESTAMP_FORMAT)),
            Literal::TimestampTz(v) => write!(f, "{}", v.format(TIMESTAMPTZ_FORMAT)),
            Literal::Uuid(v) => write!(f, "{v}"),
            Literal::Bytes(v) => write!(f, "\\x{}", hex::encode(v)),
        }
    }
}
