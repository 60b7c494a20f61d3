//! Recursive type confirmation.
//!
//! [`confirm_type`] checks that a value's runtime types match a schema.
//! Failures are accumulated across every key of a container before the
//! container reports, so one call surfaces every violation.
//!
//! Null policy: nulls pass at scalar positions of mappings and positional
//! sequences, but not as elements of a [`Schema::ListOf`] and never where a
//! container is expected.

use std::collections::BTreeMap;
use std::fmt;

use crate::hooks::{TypeCheck, TypeCheckFunctions};
use crate::shape::Positions;
use crate::types::{Key, Schema, ValueType};
use crate::value::Value;

/// A type mismatch: a single pair, or per-position failures of a container.
#[derive(Debug, Clone, PartialEq)]
pub enum WrongType {
    Pair { expected: Schema, actual: ValueType },
    Nested(BTreeMap<Key, WrongType>),
}

impl WrongType {
    /// Pairs the expected schema node with the runtime type of `value`.
    pub fn pair(expected: Schema, value: &Value) -> Self {
        WrongType::Pair {
            expected,
            actual: value.value_type(),
        }
    }

    /// Looks up a nested failure by path.
    pub fn get(&self, path: &[Key]) -> Option<&WrongType> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };
        match self {
            WrongType::Nested(entries) => entries.get(first)?.get(rest),
            WrongType::Pair { .. } => None,
        }
    }
}

impl fmt::Display for WrongType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WrongType::Pair { expected, actual } => {
                write!(f, "(expected '{}'; got '{actual}')", expected.type_name())
            }
            WrongType::Nested(entries) => crate::report::write_entries(f, entries),
        }
    }
}

/// Confirms that `value` matches `schema`.
///
/// `null_ok` controls whether a null is acceptable at this exact position;
/// nested positions apply their own policy.
///
/// # Examples
///
/// ```
/// use iospec_core::{confirm_type, Schema, TypeCheckFunctions, Value, ValueType};
///
/// let schema = Schema::map([("a", ValueType::Integer), ("b", ValueType::Integer)]);
/// let value = Value::map([("a", "wrong"), ("b", "wrong")]);
///
/// let failure = confirm_type(&value, &schema, true, &TypeCheckFunctions::new()).unwrap_err();
/// assert_eq!(
///     failure.to_string(),
///     r#"{"a": (expected 'integer'; got 'text'), "b": (expected 'integer'; got 'text')}"#
/// );
/// ```
pub fn confirm_type(
    value: &Value,
    schema: &Schema,
    null_ok: bool,
    checks: &TypeCheckFunctions,
) -> Result<(), WrongType> {
    match schema {
        Schema::Map(entries) => confirm_map(value, entries, checks),
        Schema::Seq(items) => {
            confirm_sequence(value, Positions::Fixed(items.as_slice()), true, checks)
        }
        Schema::ListOf(element) => {
            confirm_sequence(value, Positions::Repeated(&**element), false, checks)
        }
        Schema::Any => confirm_leaf(value, schema, None, null_ok, checks),
        Schema::Type(value_type) => confirm_leaf(value, schema, Some(*value_type), null_ok, checks),
    }
}

fn confirm_map(
    value: &Value,
    entries: &BTreeMap<String, Schema>,
    checks: &TypeCheckFunctions,
) -> Result<(), WrongType> {
    let Value::Map(values) = value else {
        return Err(WrongType::pair(Schema::Type(ValueType::Map), value));
    };

    let failures: BTreeMap<Key, WrongType> = values
        .iter()
        .filter_map(|(key, item)| {
            let expected = entries.get(key)?;
            confirm_type(item, expected, true, checks)
                .err()
                .map(|failure| (Key::Name(key.clone()), failure))
        })
        .collect();

    into_result(failures)
}

fn confirm_sequence(
    value: &Value,
    positions: Positions<'_, Schema>,
    null_ok: bool,
    checks: &TypeCheckFunctions,
) -> Result<(), WrongType> {
    let Value::List(items) = value else {
        return Err(WrongType::pair(Schema::Type(ValueType::List), value));
    };

    let failures: BTreeMap<Key, WrongType> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let expected = positions.get(index)?;
            confirm_type(item, expected, null_ok, checks)
                .err()
                .map(|failure| (Key::Index(index), failure))
        })
        .collect();

    into_result(failures)
}

fn confirm_leaf(
    value: &Value,
    schema: &Schema,
    value_type: Option<ValueType>,
    null_ok: bool,
    checks: &TypeCheckFunctions,
) -> Result<(), WrongType> {
    if let Some(value_type) = value_type {
        match checks.check(value, value_type) {
            TypeCheck::Pass => return Ok(()),
            TypeCheck::Fail => return Err(WrongType::pair(schema.clone(), value)),
            TypeCheck::Defer => {}
        }
    }

    if value.is_null() {
        return if null_ok {
            Ok(())
        } else {
            Err(WrongType::pair(schema.clone(), value))
        };
    }

    match value_type {
        None => Ok(()),
        Some(value_type) if value_type.accepts(value) => Ok(()),
        Some(_) => Err(WrongType::pair(schema.clone(), value)),
    }
}

fn into_result(failures: BTreeMap<Key, WrongType>) -> Result<(), WrongType> {
    if failures.is_empty() {
        Ok(())
    } else {
        Err(WrongType::Nested(failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirm(value: &Value, schema: &Schema) -> Result<(), WrongType> {
        confirm_type(value, schema, true, &TypeCheckFunctions::new())
    }

    #[test]
    fn test_scalar_and_null_pass() {
        let schema = Schema::map([("a", ValueType::Integer)]);
        assert!(confirm(&Value::map([("a", 1)]), &schema).is_ok());
        assert!(confirm(&Value::map([("a", Value::Null)]), &schema).is_ok());
        assert!(confirm(&Value::Null, &Schema::from(ValueType::Integer)).is_ok());
    }

    #[test]
    fn test_covariant_number_accepts_integer() {
        let schema = Schema::map([("n", ValueType::Number)]);
        assert!(confirm(&Value::map([("n", 1)]), &schema).is_ok());
        assert!(confirm(&Value::map([("n", 1.5)]), &schema).is_ok());
    }

    #[test]
    fn test_list_of_rejects_null_elements() {
        let list_of = Schema::list_of(ValueType::Integer);
        let failure = confirm(&Value::list([Value::Null]), &list_of).unwrap_err();
        assert_eq!(
            failure.get(&[Key::Index(0)]),
            Some(&WrongType::Pair {
                expected: Schema::from(ValueType::Integer),
                actual: ValueType::Null,
            })
        );

        let seq = Schema::seq([ValueType::Integer]);
        assert!(confirm(&Value::list([Value::Null]), &seq).is_ok());
    }

    #[test]
    fn test_list_of_any_still_rejects_null_elements() {
        let schema = Schema::list_of(Schema::Any);
        assert!(confirm(&Value::list([Value::from("x"), Value::Null]), &schema).is_err());
    }

    #[test]
    fn test_empty_list_satisfies_list_of() {
        let schema = Schema::list_of(ValueType::Integer);
        assert!(confirm(&Value::List(Vec::new()), &schema).is_ok());
    }

    #[test]
    fn test_container_expected_uses_markers() {
        let schema = Schema::map([
            ("m", Schema::map([("x", ValueType::Integer)])),
            ("l", Schema::list_of(ValueType::Integer)),
        ]);
        let value = Value::map([("m", Value::Null), ("l", Value::from("abc"))]);

        let failure = confirm(&value, &schema).unwrap_err();
        assert_eq!(
            failure.to_string(),
            r#"{"l": (expected 'list'; got 'text'), "m": (expected 'map'; got 'null')}"#
        );
    }

    #[test]
    fn test_nested_failures_aggregate() {
        let schema = Schema::map([(
            "outer",
            Schema::list_of(Schema::map([("id", ValueType::Integer)])),
        )]);
        let value = Value::map([(
            "outer",
            Value::list([
                Value::map([("id", "one")]),
                Value::map([("id", 2)]),
                Value::map([("id", "three")]),
            ]),
        )]);

        let failure = confirm(&value, &schema).unwrap_err();
        let outer = failure.get(&[Key::from("outer")]).unwrap();
        let WrongType::Nested(items) = outer else {
            panic!("expected nested failure");
        };
        assert_eq!(items.keys().cloned().collect::<Vec<_>>(), vec![Key::Index(0), Key::Index(2)]);
    }

    #[test]
    fn test_undeclared_keys_are_not_type_checked() {
        let schema = Schema::map([("a", ValueType::Integer)]);
        assert!(confirm(&Value::map([("zzz", "anything")]), &schema).is_ok());
    }

    #[test]
    fn test_hook_fail_uses_original_pair() {
        let checks = TypeCheckFunctions::new().with(ValueType::Integer, |value, _| {
            if value == &Value::Integer(13) {
                TypeCheck::Fail
            } else {
                TypeCheck::Defer
            }
        });
        let schema = Schema::from(ValueType::Integer);

        let failure = confirm_type(&Value::from(13), &schema, true, &checks).unwrap_err();
        assert_eq!(failure, WrongType::pair(schema.clone(), &Value::from(13)));
        assert!(confirm_type(&Value::from(12), &schema, true, &checks).is_ok());
        assert!(confirm_type(&Value::from("12"), &schema, true, &checks).is_err());
    }

    #[test]
    fn test_hook_pass_skips_default_check() {
        let checks = TypeCheckFunctions::new().with(ValueType::Integer, |value, _| {
            match value.as_str() {
                Some(text) if text.parse::<i64>().is_ok() => TypeCheck::Pass,
                _ => TypeCheck::Defer,
            }
        });
        let schema = Schema::from(ValueType::Integer);
        assert!(confirm_type(&Value::from("42"), &schema, true, &checks).is_ok());
        assert!(confirm_type(&Value::from("forty"), &schema, true, &checks).is_err());
    }
}
