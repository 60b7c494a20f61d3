//! Structural difference between schemas and values.
//!
//! [`difference`] answers "what is present on one side and absent on the
//! other", not "do these values differ". It is keyed off the left-hand
//! side: every position of `a` that has no counterpart in `b` is recorded,
//! positions only `b` has are ignored.
//!
//! A verification runs it twice:
//!
//! - `difference(required, value, Missing)` finds required positions the
//!   value lacks, recording the expected schema.
//! - `difference(value, combined, Unknown)` finds value positions no schema
//!   declares, recording the literal (containers abbreviated to `{...}` /
//!   `[...]`).
//!
//! # Examples
//!
//! ```
//! use iospec_core::{difference, DiffMode, Schema, Value, ValueType};
//!
//! let required = Schema::map([("a", ValueType::Integer), ("b", ValueType::Text)]);
//! let value = Value::map([("a", Value::from(1)), ("x", Value::from(9))]);
//!
//! let missing = difference(&required, Some(&value), DiffMode::Missing).unwrap();
//! assert_eq!(missing.to_string(), r#"{"b": <text>}"#);
//!
//! let unknown = difference(&value, Some(&required), DiffMode::Unknown).unwrap();
//! assert_eq!(unknown.to_string(), r#"{"x": 9}"#);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::shape::{Shape, Structured};
use crate::types::{ContainerKind, Key, Schema};
use crate::value::Value;

/// How an absent counterpart is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    /// Record the expected schema.
    Missing,
    /// Record the unexpected value, abbreviating containers.
    Unknown,
}

/// A recorded leaf of a [`Diff`].
#[derive(Debug, Clone, PartialEq)]
pub enum DiffEntry {
    /// A position the value lacks; holds what was expected there.
    Expected(Schema),
    /// An undeclared scalar value.
    Value(Value),
    /// An undeclared container value, abbreviated.
    Container(ContainerKind),
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffEntry::Expected(schema) => write!(f, "{schema}"),
            DiffEntry::Value(value) => write!(f, "{value}"),
            DiffEntry::Container(kind) => write!(f, "{kind}"),
        }
    }
}

/// Result of a structural difference. "No difference" is `None` at the
/// call sites, so a `Diff` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub enum Diff {
    Entry(DiffEntry),
    Nested(BTreeMap<Key, Diff>),
}

impl Diff {
    /// Looks up a nested entry by path.
    pub fn get(&self, path: &[Key]) -> Option<&Diff> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };
        match self {
            Diff::Nested(entries) => entries.get(first)?.get(rest),
            Diff::Entry(_) => None,
        }
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diff::Entry(entry) => write!(f, "{entry}"),
            Diff::Nested(entries) => crate::report::write_entries(f, entries),
        }
    }
}

/// Computes the difference of `a` against `b`.
///
/// `b = None` means the counterpart is absent, in which case `a` itself is
/// recorded according to `mode`. Two mappings are compared key by key; two
/// sequences are compared index by index after a homogeneous side has been
/// expanded to the other side's length. Any other pairing of present nodes
/// is not a difference.
pub fn difference<A, B>(a: &A, b: Option<&B>, mode: DiffMode) -> Option<Diff>
where
    A: Structured,
    B: Structured,
{
    let Some(b) = b else {
        return Some(Diff::Entry(a.record(mode)));
    };

    match (a.shape(), b.shape()) {
        (Shape::Mapping(a_entries), Shape::Mapping(b_entries)) => {
            difference_entries(&a_entries, &b_entries, mode)
        }
        (Shape::Sequence(a_positions), Shape::Sequence(b_positions)) => {
            let target_len = a_positions
                .fixed_len()
                .or(b_positions.fixed_len())
                .unwrap_or(0);
            difference_entries(
                &a_positions.expand(target_len),
                &b_positions.expand(target_len),
                mode,
            )
        }
        _ => None,
    }
}

fn difference_entries<A, B>(
    a: &BTreeMap<Key, &A>,
    b: &BTreeMap<Key, &B>,
    mode: DiffMode,
) -> Option<Diff>
where
    A: Structured,
    B: Structured,
{
    let entries: BTreeMap<Key, Diff> = a
        .iter()
        .filter_map(|(key, item_a)| {
            let item_b = b.get(key).copied();
            difference(*item_a, item_b, mode).map(|diff| (key.clone(), diff))
        })
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(Diff::Nested(entries))
    }
}

/// Drops top-level entries the schema does not declare.
///
/// This is the "unlimited" exemption: undeclared top-level positions are
/// allowed, while nested differences under declared positions are kept.
pub fn restrict_to_declared(diff: Option<Diff>, schema: &Schema) -> Option<Diff> {
    match diff? {
        Diff::Nested(mut entries) => {
            entries.retain(|key, _| schema.declares(key));
            if entries.is_empty() {
                None
            } else {
                Some(Diff::Nested(entries))
            }
        }
        entry @ Diff::Entry(_) => Some(entry),
    }
}
