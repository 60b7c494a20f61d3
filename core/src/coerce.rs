//! Best-effort recursive coercion.
//!
//! [`coerce`] walks a value alongside its schema and hands every leaf whose
//! schema is a type handle to the registered [`CoercionFunctions`]. Container
//! shape, key order and sequence order are preserved. Nothing here fails:
//! values that do not fit the schema pass through untouched and are left for
//! type confirmation to report.

use crate::hooks::CoercionFunctions;
use crate::shape::Positions;
use crate::types::Schema;
use crate::value::Value;

/// Coerces `value` toward `schema`.
///
/// - Map schema: declared keys are coerced, other keys are copied, keys the
///   value lacks stay absent.
/// - Sequence schemas: each element is coerced against its position; elements
///   past the end of a positional schema are copied.
/// - Type handle: the hook stack for that type runs.
/// - [`Schema::Any`]: unchanged.
///
/// # Examples
///
/// ```
/// use iospec_core::{coerce, Coercion, CoercionFunctions, Schema, Value, ValueType};
///
/// let upper = CoercionFunctions::new().with(ValueType::Text, |value, _| match value.as_str() {
///     Some(text) => Coercion::Converted(Value::from(text.to_uppercase())),
///     None => Coercion::Unchanged,
/// });
/// let schema = Schema::map([("tags", Schema::list_of(ValueType::Text))]);
/// let value = Value::map([("tags", Value::list(["b", "a"])), ("other", Value::list(["c"]))]);
///
/// let coerced = coerce(value, &schema, &upper);
/// assert_eq!(coerced.to_string(), r#"{"tags": ["B", "A"], "other": ["c"]}"#);
/// ```
pub fn coerce(value: Value, schema: &Schema, coercions: &CoercionFunctions) -> Value {
    match schema {
        Schema::Any => value,
        Schema::Type(value_type) => coercions.apply(value, *value_type),
        Schema::Map(entries) => match value {
            Value::Map(values) => Value::Map(
                values
                    .into_iter()
                    .map(|(key, item)| {
                        let item = match entries.get(&key) {
                            Some(expected) => coerce(item, expected, coercions),
                            None => item,
                        };
                        (key, item)
                    })
                    .collect(),
            ),
            other => other,
        },
        Schema::Seq(items) => {
            coerce_sequence(value, Positions::Fixed(items.as_slice()), coercions)
        }
        Schema::ListOf(element) => {
            coerce_sequence(value, Positions::Repeated(&**element), coercions)
        }
    }
}

fn coerce_sequence(
    value: Value,
    positions: Positions<'_, Schema>,
    coercions: &CoercionFunctions,
) -> Value {
    match value {
        Value::List(items) => Value::List(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match positions.get(index) {
                    Some(expected) => coerce(item, expected, coercions),
                    None => item,
                })
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use crate::hooks::Coercion;
    use crate::types::ValueType;

    use super::*;

    fn parse_integers() -> CoercionFunctions {
        CoercionFunctions::new().with(ValueType::Integer, |value, _| {
            match value.as_str().and_then(|s| s.parse::<i64>().ok()) {
                Some(n) => Coercion::Converted(Value::Integer(n)),
                None => Coercion::Unchanged,
            }
        })
    }

    #[test]
    fn test_map_coerces_declared_keys_only() {
        let schema = Schema::map([("a", ValueType::Integer)]);
        let value = Value::map([("b", "2"), ("a", "1")]);

        let coerced = coerce(value, &schema, &parse_integers());
        assert_eq!(coerced, Value::map([("b", Value::from("2")), ("a", Value::from(1))]));
    }

    #[test]
    fn test_missing_keys_are_not_invented() {
        let schema = Schema::map([("a", ValueType::Integer), ("b", ValueType::Integer)]);
        let value = Value::map([("a", "1")]);

        let coerced = coerce(value, &schema, &parse_integers());
        assert_eq!(coerced, Value::map([("a", 1)]));
    }

    #[test]
    fn test_list_order_and_length_preserved() {
        let letters: Vec<&str> = "aWMp8CAjRjMd039Hy1o4fLCv0RsVZxTB"
            .split("")
            .filter(|s| !s.is_empty())
            .collect();
        let value = Value::list(letters.clone());
        let schema = Schema::list_of(ValueType::Text);

        let coerced = coerce(value, &schema, &CoercionFunctions::new());
        assert_eq!(coerced, Value::list(letters));
    }

    #[test]
    fn test_positional_schema_copies_extra_elements() {
        let schema = Schema::seq([ValueType::Integer]);
        let value = Value::list(["1", "2"]);

        let coerced = coerce(value, &schema, &parse_integers());
        assert_eq!(coerced, Value::list([Value::from(1), Value::from("2")]));
    }

    #[test]
    fn test_non_conforming_container_passes_through() {
        let schema = Schema::map([("a", ValueType::Integer)]);
        let value = Value::list(["1"]);
        assert_eq!(coerce(value.clone(), &schema, &parse_integers()), value);

        let schema = Schema::list_of(ValueType::Integer);
        let value = Value::from("1");
        assert_eq!(coerce(value.clone(), &schema, &parse_integers()), value);
    }

    #[test]
    fn test_any_is_never_coerced() {
        let value = Value::from("1");
        assert_eq!(coerce(value.clone(), &Schema::Any, &parse_integers()), value);
    }
}
