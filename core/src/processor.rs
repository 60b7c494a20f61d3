//! Processor facade: `verify`, `coerce` and `process`.
//!
//! A [`Processor`] holds an [`IoSpec`] (required/optional schemas and the
//! unlimited flag), hook tables and an error prefix. Each call combines the
//! schemas afresh, so a processor is immutable and safe to share between
//! threads.
//!
//! # Examples
//!
//! ```
//! use iospec_core::{IoSpec, Processor, Schema, Value, ValueType};
//!
//! let processor = Processor::new(
//!     IoSpec::new()
//!         .with_required(Schema::map([("a", ValueType::Integer)]))
//!         .with_optional(Schema::map([("b", ValueType::Integer)])),
//! );
//!
//! assert!(processor.verify(&Value::map([("a", 1)])).is_ok());
//! assert!(processor.verify(&Value::map([("a", 1), ("b", 2)])).is_ok());
//!
//! let err = processor.verify(&Value::map([("a", 1), ("x", 9)])).unwrap_err();
//! assert_eq!(err.to_string(), "Invalid input/output.\nNot allowed: {\"x\": 9}");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coerce::coerce;
use crate::combine::combine;
use crate::confirm::confirm_type;
use crate::difference::{DiffMode, difference, restrict_to_declared};
use crate::error::{Result, VerificationError};
use crate::hooks::{CoercionFunctions, TypeCheckFunctions};
use crate::report::FailureReport;
use crate::types::Schema;
use crate::value::Value;

/// Error prefix used when none is configured.
pub const DEFAULT_ERROR_MESSAGE: &str = "Invalid input/output.";

/// Which process boundary a value is crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// External data coming in: coerce, then verify.
    Input,
    /// Internal data going out: verify, then coerce.
    Output,
}

/// Schema inputs for one boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IoSpec {
    /// Positions that must be present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Schema>,
    /// Positions that may be present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<Schema>,
    /// Allow undeclared top-level keys.
    #[serde(default)]
    pub unlimited: bool,
}

impl IoSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_required(mut self, schema: impl Into<Schema>) -> Self {
        self.required = Some(schema.into());
        self
    }

    pub fn with_optional(mut self, schema: impl Into<Schema>) -> Self {
        self.optional = Some(schema.into());
        self
    }

    pub fn with_unlimited(mut self, unlimited: bool) -> Self {
        self.unlimited = unlimited;
        self
    }

    /// The merged `required` + `optional` schema.
    pub fn combined(&self) -> Schema {
        combine(self.required.as_ref(), self.optional.as_ref())
    }
}

/// Verifies and coerces values against an [`IoSpec`].
#[derive(Debug, Clone)]
pub struct Processor {
    spec: IoSpec,
    type_checks: TypeCheckFunctions,
    coercions: CoercionFunctions,
    error_message: String,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new(IoSpec::default())
    }
}

impl Processor {
    pub fn new(spec: IoSpec) -> Self {
        Self {
            spec,
            type_checks: TypeCheckFunctions::new(),
            coercions: CoercionFunctions::new(),
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn with_type_checks(mut self, type_checks: TypeCheckFunctions) -> Self {
        self.type_checks = type_checks;
        self
    }

    pub fn with_coercions(mut self, coercions: CoercionFunctions) -> Self {
        self.coercions = coercions;
        self
    }

    pub fn with_error_message(mut self, error_message: impl Into<String>) -> Self {
        self.error_message = error_message.into();
        self
    }

    pub fn spec(&self) -> &IoSpec {
        &self.spec
    }

    pub fn type_checks(&self) -> &TypeCheckFunctions {
        &self.type_checks
    }

    pub fn coercions(&self) -> &CoercionFunctions {
        &self.coercions
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Runs all three channels against the processor's own spec.
    pub fn report(&self, value: &Value) -> FailureReport {
        self.report_with(value, &self.spec)
    }

    /// Runs all three channels against `spec` without raising.
    pub fn report_with(&self, value: &Value, spec: &IoSpec) -> FailureReport {
        let combined = spec.combined();

        let missing = spec
            .required
            .as_ref()
            .and_then(|required| difference(required, Some(value), DiffMode::Missing));

        let mut unknown = difference(value, Some(&combined), DiffMode::Unknown);
        if spec.unlimited {
            unknown = restrict_to_declared(unknown, &combined);
        }

        let wrong_types = confirm_type(value, &combined, true, &self.type_checks).err();

        FailureReport {
            prefix: self.error_message.clone(),
            missing,
            unknown,
            wrong_types,
        }
    }

    /// Verifies `value` against the processor's spec.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::Failed`] carrying every missing,
    /// undeclared and wrong-typed position found.
    pub fn verify(&self, value: &Value) -> Result<()> {
        self.verify_with(value, &self.spec)
    }

    /// Verifies `value` against `spec`.
    ///
    /// # Errors
    ///
    /// See [`verify`](Self::verify).
    pub fn verify_with(&self, value: &Value, spec: &IoSpec) -> Result<()> {
        let report = self.report_with(value, spec);
        if report.is_clean() {
            return Ok(());
        }
        debug!(
            channels = report.channel_count(),
            missing = report.missing.is_some(),
            unknown = report.unknown.is_some(),
            wrong_type = report.wrong_types.is_some(),
            "verification failed"
        );
        Err(VerificationError::Failed(report))
    }

    /// Coerces `value` against the processor's spec. Never fails.
    pub fn coerce(&self, value: Value) -> Value {
        self.coerce_with(value, &self.spec)
    }

    /// Coerces `value` against `spec`.
    pub fn coerce_with(&self, value: Value, spec: &IoSpec) -> Value {
        coerce(value, &spec.combined(), &self.coercions)
    }

    /// Coerces and verifies in the order `direction` calls for.
    ///
    /// Input is coerced first and the coerced form verified; output is
    /// verified first and only then coerced for the outside world.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::Input`] or [`VerificationError::Output`]
    /// matching `direction`.
    pub fn process(&self, value: Value, direction: Direction) -> Result<Value> {
        match direction {
            Direction::Input => {
                let coerced = self.coerce(value);
                self.verify(&coerced)
                    .map_err(|err| err.into_direction(direction))?;
                Ok(coerced)
            }
            Direction::Output => {
                self.verify(&value)
                    .map_err(|err| err.into_direction(direction))?;
                Ok(self.coerce(value))
            }
        }
    }
}
