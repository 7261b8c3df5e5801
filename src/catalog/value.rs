// Value Module
//
// Typed values stored in rows. Every variant corresponds to exactly one
// ColumnType; comparison between values is type-directed.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::column::ColumnType;

/// A calendar instant stored as Unix seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Date(i64);

impl Date {
    pub fn from_timestamp(seconds: i64) -> Self {
        Date(seconds)
    }

    /// Unix seconds
    pub fn timestamp(&self) -> i64 {
        self.0
    }

    /// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date (midnight UTC)
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Date(dt.timestamp()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| Date(dt.and_utc().timestamp()))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp(self.0, 0) {
            Some(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => write!(f, "@{}", self.0),
        }
    }
}

/// A single typed value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Int32(i32),
    Int64(i64),
    UInt32(u32),
    UInt64(u64),
    FixedString(String),
    Date(Date),
}

/// Comparison category a value falls into.
///
/// Integers of every width and signedness share one category and compare
/// through `i128`, which holds both `i64` and `u64` exactly.
enum Category<'a> {
    Integer(i128),
    Bytes(&'a [u8]),
    Timestamp(i64),
}

impl Value {
    /// The column type this value can be stored in
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Int32(_) => ColumnType::Int32,
            Value::Int64(_) => ColumnType::Int64,
            Value::UInt32(_) => ColumnType::UInt32,
            Value::UInt64(_) => ColumnType::UInt64,
            Value::FixedString(_) => ColumnType::FixedString,
            Value::Date(_) => ColumnType::Date,
        }
    }

    fn category(&self) -> Category<'_> {
        match self {
            Value::Int32(v) => Category::Integer(i128::from(*v)),
            Value::Int64(v) => Category::Integer(i128::from(*v)),
            Value::UInt32(v) => Category::Integer(i128::from(*v)),
            Value::UInt64(v) => Category::Integer(i128::from(*v)),
            Value::FixedString(s) => Category::Bytes(s.as_bytes()),
            Value::Date(d) => Category::Timestamp(d.timestamp()),
        }
    }

    /// Three-way comparison, `None` when the values are incomparable
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self.category(), other.category()) {
            (Category::Integer(a), Category::Integer(b)) => Some(a.cmp(&b)),
            (Category::Bytes(a), Category::Bytes(b)) => Some(a.cmp(b)),
            (Category::Timestamp(a), Category::Timestamp(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }

    /// Truthiness used when a bare value is a predicate
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int32(v) => *v != 0,
            Value::Int64(v) => *v != 0,
            Value::UInt32(v) => *v != 0,
            Value::UInt64(v) => *v != 0,
            Value::FixedString(s) => !s.is_empty(),
            Value::Date(d) => d.timestamp() != 0,
        }
    }

    /// Decimal rendering used in storage keys, integers only
    pub fn key_component(&self) -> Option<String> {
        match self {
            Value::Int32(v) => Some(v.to_string()),
            Value::Int64(v) => Some(v.to_string()),
            Value::UInt32(v) => Some(v.to_string()),
            Value::UInt64(v) => Some(v.to_string()),
            Value::FixedString(_) | Value::Date(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::UInt32(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}", v),
            Value::FixedString(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d),
        }
    }
}
