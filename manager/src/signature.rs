//! Schemas derived from a declared parameter list.
//!
//! Every parameter maps to [`Schema::Any`]: parameters without a default are
//! required, parameters with one are optional. A leading receiver (`self`)
//! is skipped.

use iospec_core::{IoSpec, Schema};
use serde::{Deserialize, Serialize};

const RECEIVER: &str = "self";

/// A named parameter of a callable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub has_default: bool,
}

impl Parameter {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_default: false,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_default: true,
        }
    }
}

/// Declared parameters of a callable, in order.
///
/// # Examples
///
/// ```
/// use iospec_core::Schema;
/// use iospec_manager::Signature;
///
/// let spec = Signature::new()
///     .required("a")
///     .required("b")
///     .optional("c")
///     .iospec();
///
/// assert_eq!(spec.required, Some(Schema::map([("a", Schema::Any), ("b", Schema::Any)])));
/// assert_eq!(spec.optional, Some(Schema::map([("c", Schema::Any)])));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    parameters: Vec<Parameter>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a signature from parameters; a leading `self` is dropped.
    pub fn from_parameters(parameters: impl IntoIterator<Item = Parameter>) -> Self {
        let mut parameters: Vec<Parameter> = parameters.into_iter().collect();
        if parameters.first().is_some_and(|p| p.name == RECEIVER) {
            parameters.remove(0);
        }
        Self { parameters }
    }

    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::required(name));
        self
    }

    pub fn optional(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::optional(name));
        self
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Required and optional schemas for the parameter list. Both are maps,
    /// possibly empty.
    pub fn iospec(&self) -> IoSpec {
        let names = |has_default: bool| {
            Schema::map(
                self.parameters
                    .iter()
                    .filter(|p| p.has_default == has_default)
                    .map(|p| (p.name.clone(), Schema::Any)),
            )
        };
        IoSpec::new()
            .with_required(names(false))
            .with_optional(names(true))
    }
}

#[cfg(test)]
mod tests {
    use iospec_core::{Processor, Value};

    use super::*;

    #[test]
    fn test_no_parameters_gives_empty_maps() {
        let spec = Signature::new().iospec();
        assert_eq!(spec.required, Some(Schema::Map(Default::default())));
        assert_eq!(spec.optional, Some(Schema::Map(Default::default())));
    }

    #[test]
    fn test_from_parameters_skips_receiver() {
        let signature = Signature::from_parameters([
            Parameter::required("self"),
            Parameter::required("a"),
            Parameter::optional("b"),
        ]);
        assert_eq!(signature.parameters().len(), 2);
        assert_eq!(
            signature.iospec().required,
            Some(Schema::map([("a", Schema::Any)]))
        );
    }

    #[test]
    fn test_only_leading_self_is_a_receiver() {
        let signature =
            Signature::from_parameters([Parameter::required("a"), Parameter::required("self")]);
        assert_eq!(signature.parameters().len(), 2);
    }

    #[test]
    fn test_derived_spec_verifies_arguments() {
        let processor = Processor::new(Signature::new().required("a").optional("b").iospec());
        assert!(processor.verify(&Value::map([("a", 1)])).is_ok());
        let with_null = Value::map([("a", Value::Null), ("b", Value::from("x"))]);
        assert!(processor.verify(&with_null).is_ok());
        assert!(processor.verify(&Value::map([("b", 1)])).is_err());
        assert!(processor.verify(&Value::map([("a", 1), ("z", 1)])).is_err());
    }
}
