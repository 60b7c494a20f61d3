//! Runtime values exchanged at process boundaries.
//!
//! [`Value`] is the dynamically-shaped data that schemas are matched against:
//! scalars, nulls, ordered lists, and string-keyed maps. Maps keep insertion
//! order so coercion hands keys back in the order the caller supplied them.
//!
//! JSON is the usual wire representation, so [`Value`] converts from
//! [`serde_json::Value`] and back via [`Value::to_json`]. Scalars JSON cannot
//! carry natively (UUIDs, timestamps, decimals, bytes) are written as text.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use regex::Regex;
use thiserror::Error;
use uuid::Uuid;

use crate::types::{ContainerKind, ValueType};

// sign, integer digits, fraction after integer, fraction after a bare
// point, exponent sign, exponent digits
static DECIMAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?)(?:(\d+)(?:\.(\d*))?|\.(\d+))(?:[eE]([+-]?)(\d+))?$")
        .expect("static regex must compile")
});

/// Text could not be parsed as a [`Decimal`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid decimal literal: {0:?}")]
pub struct DecimalParseError(pub String);

/// Arbitrary-precision decimal number, kept as normalized literal text.
///
/// Parsing trims whitespace, drops a `+` sign, strips leading zeros, writes
/// a bare leading point as `0.`, drops a trailing point and lowercases the
/// exponent marker. Fraction digits, trailing zeros included, are kept as
/// given, so equality is textual after normalization: `"+07.50"` equals
/// `"7.50"` but not `"7.5"`.
///
/// # Examples
///
/// ```
/// use iospec_core::Decimal;
///
/// let price: Decimal = "19.990".parse().unwrap();
/// assert_eq!(price.as_str(), "19.990");
/// assert_eq!("+007.5E+2".parse::<Decimal>().unwrap().as_str(), "7.5e2");
/// assert_eq!(Decimal::from(42).as_str(), "42");
/// assert!("12,5".parse::<Decimal>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal(String);

impl Decimal {
    /// Returns the literal text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Decimal {
    type Err = DecimalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = DECIMAL_RE
            .captures(s.trim())
            .ok_or_else(|| DecimalParseError(s.to_string()))?;
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());

        let integer = match group(2).trim_start_matches('0') {
            "" => "0",
            digits => digits,
        };
        let fraction = match caps.get(3).or_else(|| caps.get(4)) {
            Some(m) => m.as_str(),
            None => "",
        };
        let exponent = group(6).trim_start_matches('0');

        let is_zero = integer == "0" && fraction.bytes().all(|b| b == b'0');
        let mut literal = String::with_capacity(s.len() + 1);
        if group(1) == "-" && !is_zero {
            literal.push('-');
        }
        literal.push_str(integer);
        if !fraction.is_empty() {
            literal.push('.');
            literal.push_str(fraction);
        }
        if !exponent.is_empty() {
            literal.push('e');
            if group(5) == "-" {
                literal.push('-');
            }
            literal.push_str(exponent);
        }
        Ok(Self(literal))
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A dynamically-shaped runtime value.
///
/// # Examples
///
/// ```
/// use iospec_core::{Value, ValueType};
///
/// let value = Value::map([
///     ("name", Value::from("widget")),
///     ("tags", Value::list(["a", "b"])),
/// ]);
/// assert_eq!(value.value_type(), ValueType::Map);
/// assert_eq!(value.to_string(), r#"{"name": "widget", "tags": ["a", "b"]}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent/null value.
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Decimal(Decimal),
    Uuid(Uuid),
    Timestamp(DateTime<FixedOffset>),
    /// Ordered sequence; lists and tuples are not distinguished.
    List(Vec<Value>),
    /// String-keyed mapping in insertion order.
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Builds a [`Value::Map`] from key/value pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a [`Value::List`] from items.
    pub fn list<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns the runtime type handle of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::Text(_) => ValueType::Text,
            Value::Bytes(_) => ValueType::Bytes,
            Value::Decimal(_) => ValueType::Decimal,
            Value::Uuid(_) => ValueType::Uuid,
            Value::Timestamp(_) => ValueType::Timestamp,
            Value::List(_) => ValueType::List,
            Value::Map(_) => ValueType::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the container kind if this value is a list or a map.
    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            Value::List(_) => Some(ContainerKind::List),
            Value::Map(_) => Some(ContainerKind::Map),
            _ => None,
        }
    }

    /// Looks up a map entry. Returns `None` for non-map values.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Converts to JSON. UUIDs, timestamps, decimals and bytes become text;
    /// non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Integer(n) => Json::from(*n),
            Value::Float(x) => serde_json::Number::from_f64(*x)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Text(text) => Json::String(text.clone()),
            Value::Bytes(bytes) => Json::String(String::from_utf8_lossy(bytes).into_owned()),
            Value::Decimal(d) => Json::String(d.to_string()),
            Value::Uuid(id) => Json::String(id.hyphenated().to_string()),
            Value::Timestamp(ts) => Json::String(ts.to_rfc3339()),
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(entries) => Json::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                // beyond i64 but still exact; a float would lose digits
                None if n.is_u64() => Value::Decimal(Decimal(n.to_string())),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            Json::String(s) => Value::Text(s),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::Timestamp(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(value: IndexMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Text(text) => write!(f, "{text:?}"),
            Value::Bytes(bytes) => write!(f, "b{:?}", String::from_utf8_lossy(bytes)),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Uuid(id) => write!(f, "{}", id.hyphenated()),
            Value::Timestamp(ts) => f.write_str(&ts.to_rfc3339()),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decimal_accepts_common_literals() {
        for literal in ["0", "-1", "+2.50", ".5", "3.", "1e10", "6.02E-23", " 7 "] {
            assert!(literal.parse::<Decimal>().is_ok(), "{literal}");
        }
        assert_eq!(" 7 ".parse::<Decimal>().unwrap().as_str(), "7");
    }

    #[test]
    fn test_decimal_normalizes_literal_text() {
        let cases = [
            ("+2.50", "2.50"),
            ("007.5", "7.5"),
            ("000", "0"),
            (".5", "0.5"),
            ("-.25", "-0.25"),
            ("3.", "3"),
            ("1E+3", "1e3"),
            ("6.02E-023", "6.02e-23"),
            ("4e0", "4"),
            ("-0.00", "0.00"),
            ("-0", "0"),
        ];
        for (literal, normalized) in cases {
            assert_eq!(literal.parse::<Decimal>().unwrap().as_str(), normalized, "{literal}");
        }
        assert_eq!("+07.50".parse::<Decimal>(), "7.50".parse::<Decimal>());
        assert_ne!("7.50".parse::<Decimal>(), "7.5".parse::<Decimal>());
    }

    #[test]
    fn test_from_json_keeps_large_integers_exact() {
        assert_eq!(
            Value::from(json!(u64::MAX)),
            Value::Decimal("18446744073709551615".parse().unwrap())
        );
        assert_eq!(Value::from(json!(i64::MAX)), Value::Integer(i64::MAX));
        assert_eq!(Value::from(json!(-2.5)), Value::Float(-2.5));
    }

    #[test]
    fn test_decimal_rejects_garbage() {
        for literal in ["", "abc", "1.2.3", "1,5", "--1", "."] {
            assert_eq!(
                literal.parse::<Decimal>(),
                Err(DecimalParseError(literal.to_string()))
            );
        }
    }

    #[test]
    fn test_from_json_preserves_key_order() {
        let value = Value::from(json!({"z": 1, "a": [true, null], "m": 1.5}));
        let Value::Map(entries) = &value else {
            panic!("expected map");
        };
        let keys: Vec<_> = entries.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(
            value.get("a"),
            Some(&Value::List(vec![Value::Bool(true), Value::Null]))
        );
        assert_eq!(value.get("m"), Some(&Value::Float(1.5)));
    }

    #[test]
    fn test_to_json_writes_scalars_as_text() {
        let id = Uuid::nil();
        let value = Value::map([
            ("id", Value::Uuid(id)),
            ("amount", Value::Decimal("1.10".parse().unwrap())),
        ]);
        assert_eq!(
            value.to_json(),
            json!({"id": "00000000-0000-0000-0000-000000000000", "amount": "1.10"})
        );
    }

    #[test]
    fn test_value_type_of_each_variant() {
        assert_eq!(Value::Null.value_type(), ValueType::Null);
        assert_eq!(Value::from(1).value_type(), ValueType::Integer);
        assert_eq!(Value::from("x").value_type(), ValueType::Text);
        assert_eq!(Value::list([1, 2]).value_type(), ValueType::List);
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn test_display_is_compact_literal() {
        let value = Value::map([
            ("a", Value::from(1)),
            ("b", Value::list(["x"])),
            ("c", Value::Null),
        ]);
        assert_eq!(value.to_string(), r#"{"a": 1, "b": ["x"], "c": null}"#);
    }
}
