//! Failure report assembled from the three verification channels.

use std::collections::BTreeMap;
use std::fmt;

use crate::confirm::WrongType;
use crate::difference::Diff;
use crate::types::Key;

/// Outcome of checking one value: missing positions, undeclared positions,
/// and wrong types. Each channel is `None` when it found nothing.
///
/// `Display` renders the caller-facing message: the prefix line, then one
/// `Missing:`, `Not allowed:` or `Wrong type:` line per non-empty channel.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureReport {
    pub prefix: String,
    pub missing: Option<Diff>,
    pub unknown: Option<Diff>,
    pub wrong_types: Option<WrongType>,
}

impl FailureReport {
    /// Returns `true` if every channel is empty.
    pub fn is_clean(&self) -> bool {
        self.missing.is_none() && self.unknown.is_none() && self.wrong_types.is_none()
    }

    /// Number of channels that found something.
    pub fn channel_count(&self) -> usize {
        [
            self.missing.is_some(),
            self.unknown.is_some(),
            self.wrong_types.is_some(),
        ]
        .into_iter()
        .filter(|populated| *populated)
        .count()
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)?;
        if let Some(missing) = &self.missing {
            write!(f, "\nMissing: {missing}")?;
        }
        if let Some(unknown) = &self.unknown {
            write!(f, "\nNot allowed: {unknown}")?;
        }
        if let Some(wrong_types) = &self.wrong_types {
            write!(f, "\nWrong type: {wrong_types}")?;
        }
        Ok(())
    }
}

/// Writes `{key: value, ...}`.
pub(crate) fn write_entries<V: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    entries: &BTreeMap<Key, V>,
) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key}: {value}")?;
    }
    f.write_str("}")
}

#[cfg(test)]
mod tests {
    use crate::difference::DiffEntry;
    use crate::types::{Schema, ValueType};
    use crate::value::Value;

    use super::*;

    #[test]
    fn test_only_populated_sections_are_rendered() {
        let report = FailureReport {
            prefix: "Invalid input.".to_string(),
            missing: None,
            unknown: Some(Diff::Nested(BTreeMap::from([(
                Key::from("x"),
                Diff::Entry(DiffEntry::Value(Value::from(9))),
            )]))),
            wrong_types: None,
        };
        assert_eq!(report.to_string(), "Invalid input.\nNot allowed: {\"x\": 9}");
        assert_eq!(report.channel_count(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_all_sections_in_fixed_order() {
        let report = FailureReport {
            prefix: "Invalid output.".to_string(),
            missing: Some(Diff::Nested(BTreeMap::from([(
                Key::from("a"),
                Diff::Entry(DiffEntry::Expected(Schema::from(ValueType::Integer))),
            )]))),
            unknown: Some(Diff::Nested(BTreeMap::from([(
                Key::Index(2),
                Diff::Entry(DiffEntry::Container(crate::types::ContainerKind::List)),
            )]))),
            wrong_types: Some(WrongType::Pair {
                expected: Schema::from(ValueType::Map),
                actual: ValueType::Text,
            }),
        };
        assert_eq!(
            report.to_string(),
            "Invalid output.\n\
             Missing: {\"a\": <integer>}\n\
             Not allowed: {2: [...]}\n\
             Wrong type: (expected 'map'; got 'text')"
        );
    }
}
