//! Default coercion catalog.
//!
//! Input coercions parse external text into internal types; output
//! coercions render internal types back to canonical text. Values a hook
//! cannot handle are left [`Unchanged`](Coercion::Unchanged), so type
//! confirmation still reports them.
//!
//! # Examples
//!
//! ```
//! use iospec_core::{Value, ValueType};
//! use iospec_manager::{default_input_coercions, default_output_coercions};
//!
//! let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
//! let parsed = default_input_coercions().apply(Value::from(id), ValueType::Uuid);
//! assert!(matches!(parsed, Value::Uuid(_)));
//!
//! let rendered = default_output_coercions().apply(parsed, ValueType::Uuid);
//! assert_eq!(rendered, Value::from(id));
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use iospec_core::{Coercion, CoercionFunctions, Decimal, Value, ValueType};
use uuid::Uuid;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Hooks for values entering the process.
pub fn default_input_coercions() -> CoercionFunctions {
    CoercionFunctions::new()
        .with(ValueType::Text, text_input)
        .with(ValueType::Decimal, decimal_input)
        .with(ValueType::Uuid, uuid_input)
        .with(ValueType::Timestamp, timestamp_input)
}

/// Hooks for values leaving the process.
pub fn default_output_coercions() -> CoercionFunctions {
    CoercionFunctions::new()
        .with(ValueType::Uuid, uuid_output)
        .with(ValueType::Timestamp, timestamp_output)
}

fn text_input(value: &Value, _: ValueType) -> Coercion {
    match value {
        Value::Bytes(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => Coercion::Converted(Value::from(text)),
            Err(_) => Coercion::Unchanged,
        },
        _ => Coercion::Unchanged,
    }
}

fn decimal_input(value: &Value, _: ValueType) -> Coercion {
    match value {
        Value::Integer(n) => Coercion::Converted(Value::Decimal(Decimal::from(*n))),
        Value::Text(text) => match text.parse::<Decimal>() {
            Ok(decimal) => Coercion::Converted(Value::Decimal(decimal)),
            Err(_) => Coercion::Unchanged,
        },
        _ => Coercion::Unchanged,
    }
}

fn uuid_input(value: &Value, _: ValueType) -> Coercion {
    match value.as_str().map(|text| Uuid::parse_str(text.trim())) {
        Some(Ok(id)) => Coercion::Converted(Value::Uuid(id)),
        _ => Coercion::Unchanged,
    }
}

fn timestamp_input(value: &Value, _: ValueType) -> Coercion {
    match value.as_str().and_then(parse_timestamp) {
        Some(ts) => Coercion::Converted(Value::Timestamp(ts)),
        None => Coercion::Unchanged,
    }
}

fn uuid_output(value: &Value, _: ValueType) -> Coercion {
    match value {
        Value::Uuid(id) => Coercion::Converted(Value::from(id.hyphenated().to_string())),
        _ => Coercion::Unchanged,
    }
}

fn timestamp_output(value: &Value, _: ValueType) -> Coercion {
    match value {
        Value::Timestamp(ts) => Coercion::Converted(Value::from(ts.to_rfc3339())),
        _ => Coercion::Unchanged,
    }
}

/// Parses RFC 3339, then a naive date-time (UTC), then a bare date
/// (midnight UTC).
pub fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts);
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}
