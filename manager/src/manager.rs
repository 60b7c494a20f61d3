//! The input/output manager.
//!
//! [`IoManager`] holds one [`Processor`] per boundary. Input is coerced and
//! then verified; output is verified and then coerced. Verification failures
//! are tagged with the boundary they occurred at.
//!
//! # Examples
//!
//! ```
//! use iospec_core::{Schema, Value, ValueType, VerificationError};
//! use iospec_manager::{IoManager, ProcessorSettings, StandardDefaults};
//!
//! let manager = IoManager::builder()
//!     .defaults(StandardDefaults)
//!     .input(ProcessorSettings::new().with_required(Schema::map([("id", ValueType::Uuid)])))
//!     .output(ProcessorSettings::new().with_required(Schema::map([("id", ValueType::Uuid)])))
//!     .build();
//!
//! let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
//! let internal = manager.process_input(Value::map([("id", id)])).unwrap();
//! assert!(matches!(internal.get("id"), Some(Value::Uuid(_))));
//!
//! let external = manager.process_output(internal).unwrap();
//! assert_eq!(external, Value::map([("id", id)]));
//!
//! let err = manager.process_input(Value::map([("id", "nope")])).unwrap_err();
//! assert!(matches!(err, VerificationError::Input(_)));
//! assert!(err.to_string().starts_with("Invalid input.\n"));
//! ```

use iospec_core::{Direction, Processor, Result, Value};
use tracing::debug;

use crate::config::ManagerSpec;
use crate::settings::{ManagerDefaults, NoDefaults, ProcessorSettings, resolve_settings};

/// Error prefix for input verification failures.
pub const INPUT_ERROR_MESSAGE: &str = "Invalid input.";
/// Error prefix for output verification failures.
pub const OUTPUT_ERROR_MESSAGE: &str = "Invalid output.";

/// A pair of processors for one process boundary.
#[derive(Debug, Clone)]
pub struct IoManager {
    input: Processor,
    output: Processor,
}

impl Default for IoManager {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl IoManager {
    /// Returns a new [`IoManagerBuilder`] with no defaults.
    pub fn builder() -> IoManagerBuilder<NoDefaults> {
        IoManagerBuilder::new()
    }

    /// Builds a manager from loaded schemas and a defaults implementation.
    pub fn from_spec<D: ManagerDefaults>(spec: &ManagerSpec, defaults: D) -> Self {
        Self::builder()
            .defaults(defaults)
            .input(spec.input_settings())
            .output(spec.output_settings())
            .build()
    }

    pub fn input_processor(&self) -> &Processor {
        &self.input
    }

    pub fn output_processor(&self) -> &Processor {
        &self.output
    }

    pub fn processor(&self, direction: Direction) -> &Processor {
        match direction {
            Direction::Input => &self.input,
            Direction::Output => &self.output,
        }
    }

    pub fn coerce_input(&self, value: Value) -> Value {
        self.input.coerce(value)
    }

    pub fn coerce_output(&self, value: Value) -> Value {
        self.output.coerce(value)
    }

    /// # Errors
    ///
    /// Returns [`VerificationError::Input`](iospec_core::VerificationError::Input).
    pub fn verify_input(&self, value: &Value) -> Result<()> {
        self.input
            .verify(value)
            .map_err(|err| err.into_direction(Direction::Input))
    }

    /// # Errors
    ///
    /// Returns [`VerificationError::Output`](iospec_core::VerificationError::Output).
    pub fn verify_output(&self, value: &Value) -> Result<()> {
        self.output
            .verify(value)
            .map_err(|err| err.into_direction(Direction::Output))
    }

    /// Coerces, then verifies the coerced value.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::Input`](iospec_core::VerificationError::Input).
    pub fn process_input(&self, value: Value) -> Result<Value> {
        self.input.process(value, Direction::Input)
    }

    /// Verifies, then coerces.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::Output`](iospec_core::VerificationError::Output).
    pub fn process_output(&self, value: Value) -> Result<Value> {
        self.output.process(value, Direction::Output)
    }

    pub fn process(&self, value: Value, direction: Direction) -> Result<Value> {
        self.processor(direction).process(value, direction)
    }
}

/// Builder collecting the configuration layers of an [`IoManager`].
///
/// See [`resolve_settings`] for precedence.
#[derive(Debug, Clone)]
pub struct IoManagerBuilder<D = NoDefaults> {
    defaults: D,
    general: ProcessorSettings,
    input: ProcessorSettings,
    output: ProcessorSettings,
}

impl IoManagerBuilder<NoDefaults> {
    pub fn new() -> Self {
        Self {
            defaults: NoDefaults,
            general: ProcessorSettings::default(),
            input: ProcessorSettings::default(),
            output: ProcessorSettings::default(),
        }
    }
}

impl Default for IoManagerBuilder<NoDefaults> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: ManagerDefaults> IoManagerBuilder<D> {
    /// Replaces the defaults implementation.
    pub fn defaults<E: ManagerDefaults>(self, defaults: E) -> IoManagerBuilder<E> {
        IoManagerBuilder {
            defaults,
            general: self.general,
            input: self.input,
            output: self.output,
        }
    }

    /// Settings applied to both directions.
    pub fn general(mut self, settings: ProcessorSettings) -> Self {
        self.general = settings;
        self
    }

    pub fn input(mut self, settings: ProcessorSettings) -> Self {
        self.input = settings;
        self
    }

    pub fn output(mut self, settings: ProcessorSettings) -> Self {
        self.output = settings;
        self
    }

    /// Resolves both directions and builds the manager.
    pub fn build(self) -> IoManager {
        let input = self.resolve(Direction::Input, self.input.clone());
        let output = self.resolve(Direction::Output, self.output.clone());
        IoManager {
            input: input.into_processor(INPUT_ERROR_MESSAGE),
            output: output.into_processor(OUTPUT_ERROR_MESSAGE),
        }
    }

    fn resolve(&self, direction: Direction, constructor: ProcessorSettings) -> ProcessorSettings {
        let resolved = resolve_settings(
            self.defaults.general(),
            self.defaults.for_direction(direction),
            self.general.clone(),
            constructor,
        );
        debug!(
            ?direction,
            required = resolved.required.is_some(),
            optional = resolved.optional.is_some(),
            unlimited = resolved.unlimited.unwrap_or(false),
            type_checks = ?resolved.type_checks.as_ref().map(|t| t.types()),
            coercions = ?resolved.coercions.as_ref().map(|c| c.types()),
            "resolved processor settings"
        );
        resolved
    }
}
