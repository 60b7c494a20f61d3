//! Merging `required` and `optional` schemas into one combined schema.
//!
//! The combined schema is what a value is checked against for unknown keys,
//! wrong types and coercion. Mappings merge key by key and sequences merge
//! position by position, recursively. Where both sides are present but not
//! mergeable, `required` wins silently, at every nesting level.
//!
//! # Examples
//!
//! ```
//! use iospec_core::{combine, Schema, ValueType};
//!
//! let required = Schema::map([("c", Schema::map([("q", ValueType::Integer)]))]);
//! let optional = Schema::map([("c", Schema::map([("r", ValueType::Text)]))]);
//!
//! let combined = combine(Some(&required), Some(&optional));
//! assert_eq!(combined.to_string(), r#"{"c": {"q": <integer>, "r": <text>}}"#);
//!
//! assert_eq!(combine(None, None), Schema::Any);
//! ```

use std::collections::BTreeMap;

use crate::shape::Positions;
use crate::types::Schema;

/// Combines two optional schema nodes.
///
/// An absent side yields the other; both absent yields [`Schema::Any`].
pub fn combine(required: Option<&Schema>, optional: Option<&Schema>) -> Schema {
    match (required, optional) {
        (Some(required), Some(optional)) => combine_present(required, optional),
        (Some(only), None) | (None, Some(only)) => only.clone(),
        (None, None) => Schema::Any,
    }
}

fn combine_present(required: &Schema, optional: &Schema) -> Schema {
    match (required, optional) {
        (Schema::Map(a), Schema::Map(b)) => Schema::Map(combine_maps(a, b)),
        (Schema::ListOf(a), Schema::ListOf(b)) => {
            Schema::ListOf(Box::new(combine_present(a, b)))
        }
        (Schema::Seq(a), Schema::Seq(b)) => combine_sequences(
            Positions::Fixed(a.as_slice()),
            Positions::Fixed(b.as_slice()),
        ),
        (Schema::Seq(a), Schema::ListOf(b)) => {
            combine_sequences(Positions::Fixed(a.as_slice()), Positions::Repeated(&**b))
        }
        (Schema::ListOf(a), Schema::Seq(b)) => {
            combine_sequences(Positions::Repeated(&**a), Positions::Fixed(b.as_slice()))
        }
        _ => required.clone(),
    }
}

fn combine_maps(
    a: &BTreeMap<String, Schema>,
    b: &BTreeMap<String, Schema>,
) -> BTreeMap<String, Schema> {
    a.keys()
        .chain(b.keys())
        .map(|key| (key.clone(), combine(a.get(key), b.get(key))))
        .collect()
}

/// Merges positionally up to the longer fixed length. A homogeneous side is
/// repeated to that length; the result is a positional sequence.
fn combine_sequences(a: Positions<'_, Schema>, b: Positions<'_, Schema>) -> Schema {
    let target_len = a
        .fixed_len()
        .unwrap_or(0)
        .max(b.fixed_len().unwrap_or(0));

    Schema::Seq(
        (0..target_len)
            .map(|index| combine(a.get(index), b.get(index)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use crate::types::ValueType;

    use super::*;

    fn int() -> Schema {
        Schema::from(ValueType::Integer)
    }

    fn text() -> Schema {
        Schema::from(ValueType::Text)
    }

    #[test]
    fn test_required_overrides_optional_leaf() {
        let required = Schema::map([("a", int())]);
        let optional = Schema::map([("a", text())]);
        assert_eq!(combine(Some(&required), Some(&optional)), required);
    }

    #[test]
    fn test_union_of_keys() {
        let required = Schema::map([("a", int())]);
        let optional = Schema::map([("b", text())]);
        assert_eq!(
            combine(Some(&required), Some(&optional)),
            Schema::map([("a", int()), ("b", text())])
        );
    }

    #[test]
    fn test_nested_maps_merge_siblings() {
        let required = Schema::map([(
            "c",
            Schema::map([("q", Schema::map([("m", int())]))]),
        )]);
        let optional = Schema::map([(
            "c",
            Schema::map([("r", Schema::map([("n", int())]))]),
        )]);

        let combined = combine(Some(&required), Some(&optional));
        let Schema::Map(top) = &combined else {
            panic!("expected map");
        };
        let Some(Schema::Map(c)) = top.get("c") else {
            panic!("expected nested map");
        };
        assert!(c.contains_key("q"));
        assert!(c.contains_key("r"));
    }

    #[test]
    fn test_kind_mismatch_keeps_required_wholesale() {
        let required = Schema::map([("a", Schema::map([("x", int())]))]);
        let optional = Schema::map([("a", Schema::seq([int()]))]);
        assert_eq!(combine(Some(&required), Some(&optional)), required);
    }

    #[test]
    fn test_sequences_merge_to_longer_length() {
        let required = Schema::seq([int()]);
        let optional = Schema::seq([text(), text()]);
        assert_eq!(
            combine(Some(&required), Some(&optional)),
            Schema::seq([int(), text()])
        );
    }

    #[test]
    fn test_list_of_against_seq_expands() {
        let required = Schema::list_of(int());
        let optional = Schema::seq([text(), text(), text()]);
        assert_eq!(
            combine(Some(&required), Some(&optional)),
            Schema::seq([int(), int(), int()])
        );
    }

    #[test]
    fn test_two_list_ofs_merge_elements() {
        let required = Schema::list_of(Schema::map([("a", int())]));
        let optional = Schema::list_of(Schema::map([("b", text())]));
        assert_eq!(
            combine(Some(&required), Some(&optional)),
            Schema::list_of(Schema::map([("a", int()), ("b", text())]))
        );
    }

    #[test]
    fn test_absent_sides() {
        let schema = Schema::map([("a", int())]);
        assert_eq!(combine(Some(&schema), None), schema);
        assert_eq!(combine(None, Some(&schema)), schema);
        assert_eq!(combine(None, None), Schema::Any);
    }
}
