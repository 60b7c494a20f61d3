//! Schema node model.
//!
//! A [`Schema`] describes the expected shape of a [`Value`]: a concrete
//! [`ValueType`], the [`Schema::Any`] wildcard, a mapping of keys to nested
//! schemas, a positional sequence of schemas, or a homogeneous
//! "list of" wrapper. Nodes nest arbitrarily.
//!
//! Schemas are plain owned trees and serialize with [`serde`], so they can be
//! written inline in code or loaded from YAML/JSON configuration.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Runtime type handle.
///
/// Matching is covariant: [`ValueType::Number`] accepts integers, floats and
/// decimals, every other handle accepts only values of its own type.
///
/// # Examples
///
/// ```
/// use iospec_core::{Value, ValueType};
///
/// assert!(ValueType::Integer.accepts(&Value::from(3)));
/// assert!(ValueType::Number.accepts(&Value::from(3)));
/// assert!(!ValueType::Integer.accepts(&Value::from("3")));
/// assert_eq!(ValueType::Timestamp.to_string(), "timestamp");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Null,
    Bool,
    Integer,
    Float,
    /// Any numeric value: integer, float or decimal.
    Number,
    Text,
    Bytes,
    Decimal,
    Uuid,
    Timestamp,
    List,
    Map,
}

impl ValueType {
    /// Lowercase name used in messages and serialized schemas.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Number => "number",
            ValueType::Text => "text",
            ValueType::Bytes => "bytes",
            ValueType::Decimal => "decimal",
            ValueType::Uuid => "uuid",
            ValueType::Timestamp => "timestamp",
            ValueType::List => "list",
            ValueType::Map => "map",
        }
    }

    /// Returns `true` if `self` is `other` or a supertype of it.
    pub fn includes(self, other: ValueType) -> bool {
        self == other
            || (self == ValueType::Number
                && matches!(
                    other,
                    ValueType::Integer | ValueType::Float | ValueType::Decimal
                ))
    }

    /// Instance check of `value` against this type.
    pub fn accepts(self, value: &Value) -> bool {
        self.includes(value.value_type())
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of container, used to abbreviate unexpected container values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    List,
    Map,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::List => f.write_str("[...]"),
            ContainerKind::Map => f.write_str("{...}"),
        }
    }
}

/// Position inside a container: a mapping key or a sequence index.
///
/// Sequences are normalized to positional maps keyed by [`Key::Index`] so
/// the engines handle both container kinds with one recursion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Index(usize),
    Name(String),
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Name(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value)
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Index(value)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => write!(f, "{name:?}"),
        }
    }
}

/// A schema node.
///
/// # Examples
///
/// ```
/// use iospec_core::{Schema, ValueType};
///
/// let schema = Schema::map([
///     ("id", Schema::from(ValueType::Uuid)),
///     ("tags", Schema::list_of(ValueType::Text)),
///     ("point", Schema::seq([ValueType::Float, ValueType::Float])),
///     ("extra", Schema::Any),
/// ]);
/// assert!(schema.is_container());
/// assert_eq!(
///     schema.to_string(),
///     r#"{"extra": <any>, "id": <uuid>, "point": [<float>, <float>], "tags": list_of(<text>)}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schema {
    /// Matches every value, including null, and never coerces.
    Any,
    /// Instance of a type handle (or null, where nulls are permitted).
    Type(ValueType),
    /// Structured mapping from key to nested schema.
    Map(BTreeMap<String, Schema>),
    /// Positional sequence: element `i` must match schema `i`.
    Seq(Vec<Schema>),
    /// Homogeneous sequence of any length; null elements are rejected.
    ListOf(Box<Schema>),
}

impl Schema {
    /// Builds a [`Schema::Map`] from key/schema pairs.
    pub fn map<K, S>(entries: impl IntoIterator<Item = (K, S)>) -> Self
    where
        K: Into<String>,
        S: Into<Schema>,
    {
        Schema::Map(
            entries
                .into_iter()
                .map(|(k, s)| (k.into(), s.into()))
                .collect(),
        )
    }

    /// Builds a positional [`Schema::Seq`].
    pub fn seq<S: Into<Schema>>(items: impl IntoIterator<Item = S>) -> Self {
        Schema::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Wraps an element schema in [`Schema::ListOf`].
    pub fn list_of(element: impl Into<Schema>) -> Self {
        Schema::ListOf(Box::new(element.into()))
    }

    pub fn is_container(&self) -> bool {
        self.container_kind().is_some()
    }

    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            Schema::Map(_) => Some(ContainerKind::Map),
            Schema::Seq(_) | Schema::ListOf(_) => Some(ContainerKind::List),
            Schema::Any | Schema::Type(_) => None,
        }
    }

    /// Returns `true` if the schema declares the position `key` at its top
    /// level. A homogeneous sequence declares every index.
    pub fn declares(&self, key: &Key) -> bool {
        match (self, key) {
            (Schema::Map(entries), Key::Name(name)) => entries.contains_key(name),
            (Schema::Seq(items), Key::Index(i)) => *i < items.len(),
            (Schema::ListOf(_), Key::Index(_)) => true,
            _ => false,
        }
    }

    /// Short type-like name used in wrong-type messages.
    pub fn type_name(&self) -> String {
        match self {
            Schema::Any => "any".to_string(),
            Schema::Type(value_type) => value_type.name().to_string(),
            Schema::Map(_) => ValueType::Map.name().to_string(),
            Schema::Seq(_) => ValueType::List.name().to_string(),
            Schema::ListOf(element) => format!("list_of({})", element.type_name()),
        }
    }
}

impl From<ValueType> for Schema {
    fn from(value: ValueType) -> Self {
        Schema::Type(value)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Any => f.write_str("<any>"),
            Schema::Type(value_type) => write!(f, "<{value_type}>"),
            Schema::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                f.write_str("}")
            }
            Schema::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Schema::ListOf(element) => write!(f, "list_of({element})"),
        }
    }
}
