//! Layered processor configuration.
//!
//! A processor's settings come from four layers, lowest precedence first:
//!
//! 1. general defaults ([`ManagerDefaults::general`])
//! 2. direction defaults ([`ManagerDefaults::input`] / [`ManagerDefaults::output`])
//! 3. general constructor settings
//! 4. direction constructor settings
//!
//! [`resolve_settings`] overlays them field by field. A set field replaces
//! the lower layer's value wholesale, hook tables included.

use iospec_core::{
    CoercionFunctions, Direction, IoSpec, Processor, Schema, TypeCheckFunctions,
};

use crate::coercions::{default_input_coercions, default_output_coercions};

/// One configuration layer. Unset fields defer to lower layers.
#[derive(Debug, Clone, Default)]
pub struct ProcessorSettings {
    pub required: Option<Schema>,
    pub optional: Option<Schema>,
    pub unlimited: Option<bool>,
    pub type_checks: Option<TypeCheckFunctions>,
    pub coercions: Option<CoercionFunctions>,
    pub error_message: Option<String>,
}

impl ProcessorSettings {
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
        self.unlimited = Some(unlimited);
        self
    }

    pub fn with_type_checks(mut self, type_checks: TypeCheckFunctions) -> Self {
        self.type_checks = Some(type_checks);
        self
    }

    pub fn with_coercions(mut self, coercions: CoercionFunctions) -> Self {
        self.coercions = Some(coercions);
        self
    }

    pub fn with_error_message(mut self, error_message: impl Into<String>) -> Self {
        self.error_message = Some(error_message.into());
        self
    }

    /// Schema fields of an [`IoSpec`] as a layer.
    ///
    /// `IoSpec::unlimited` is a plain `bool`, so `false` cannot be told apart
    /// from "not given" and leaves the field unset. Use
    /// [`BoundarySpec`](crate::BoundarySpec) or
    /// [`with_unlimited(false)`](Self::with_unlimited) to override a lower
    /// layer that enables it.
    pub fn from_iospec(spec: IoSpec) -> Self {
        Self {
            required: spec.required,
            optional: spec.optional,
            unlimited: spec.unlimited.then_some(true),
            ..Self::default()
        }
    }

    /// Returns `self` with every field `higher` sets replaced.
    pub fn overlay(self, higher: ProcessorSettings) -> Self {
        Self {
            required: higher.required.or(self.required),
            optional: higher.optional.or(self.optional),
            unlimited: higher.unlimited.or(self.unlimited),
            type_checks: higher.type_checks.or(self.type_checks),
            coercions: higher.coercions.or(self.coercions),
            error_message: higher.error_message.or(self.error_message),
        }
    }

    /// Builds a processor, using `default_error_message` when no layer set
    /// one.
    pub fn into_processor(self, default_error_message: &str) -> Processor {
        let spec = IoSpec {
            required: self.required,
            optional: self.optional,
            unlimited: self.unlimited.unwrap_or(false),
        };
        Processor::new(spec)
            .with_type_checks(self.type_checks.unwrap_or_default())
            .with_coercions(self.coercions.unwrap_or_default())
            .with_error_message(
                self.error_message
                    .unwrap_or_else(|| default_error_message.to_string()),
            )
    }
}

/// Overlays the four configuration layers, lowest precedence first.
///
/// # Examples
///
/// ```
/// use iospec_manager::{ProcessorSettings, resolve_settings};
///
/// let resolved = resolve_settings(
///     ProcessorSettings::new().with_error_message("general default"),
///     ProcessorSettings::new().with_unlimited(true),
///     ProcessorSettings::new().with_error_message("constructor"),
///     ProcessorSettings::new(),
/// );
/// assert_eq!(resolved.error_message.as_deref(), Some("constructor"));
/// assert_eq!(resolved.unlimited, Some(true));
/// ```
pub fn resolve_settings(
    general_defaults: ProcessorSettings,
    direction_defaults: ProcessorSettings,
    general: ProcessorSettings,
    direction: ProcessorSettings,
) -> ProcessorSettings {
    general_defaults
        .overlay(direction_defaults)
        .overlay(general)
        .overlay(direction)
}

/// Default layers supplied by a manager type.
///
/// Override only the layers you need; the rest are empty.
pub trait ManagerDefaults {
    /// Settings shared by both directions.
    fn general(&self) -> ProcessorSettings {
        ProcessorSettings::default()
    }

    fn input(&self) -> ProcessorSettings {
        ProcessorSettings::default()
    }

    fn output(&self) -> ProcessorSettings {
        ProcessorSettings::default()
    }

    /// The direction-specific layer for `direction`.
    fn for_direction(&self, direction: Direction) -> ProcessorSettings {
        match direction {
            Direction::Input => self.input(),
            Direction::Output => self.output(),
        }
    }
}

/// Supplies no defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl ManagerDefaults for NoDefaults {}

/// Supplies the default coercion catalog for each direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDefaults;

impl ManagerDefaults for StandardDefaults {
    fn input(&self) -> ProcessorSettings {
        ProcessorSettings::new().with_coercions(default_input_coercions())
    }

    fn output(&self) -> ProcessorSettings {
        ProcessorSettings::new().with_coercions(default_output_coercions())
    }
}

#[cfg(test)]
mod tests {
    use iospec_core::ValueType;

    use super::*;

    #[test]
    fn test_higher_layer_wins_per_field() {
        let resolved = resolve_settings(
            ProcessorSettings::new()
                .with_required(ValueType::Integer)
                .with_error_message("one"),
            ProcessorSettings::new().with_error_message("two"),
            ProcessorSettings::new().with_optional(ValueType::Text),
            ProcessorSettings::new().with_error_message("four"),
        );
        assert_eq!(resolved.required, Some(Schema::from(ValueType::Integer)));
        assert_eq!(resolved.optional, Some(Schema::from(ValueType::Text)));
        assert_eq!(resolved.error_message.as_deref(), Some("four"));
        assert_eq!(resolved.unlimited, None);
    }

    #[test]
    fn test_general_constructor_beats_direction_default() {
        let resolved = resolve_settings(
            ProcessorSettings::new(),
            StandardDefaults.input(),
            ProcessorSettings::new().with_coercions(CoercionFunctions::new()),
            ProcessorSettings::new(),
        );
        assert!(resolved.coercions.unwrap().is_empty());
    }

    #[test]
    fn test_hook_tables_replace_rather_than_merge() {
        let resolved = resolve_settings(
            ProcessorSettings::new(),
            StandardDefaults.output(),
            ProcessorSettings::new(),
            ProcessorSettings::new().with_coercions(
                CoercionFunctions::new().with(ValueType::Text, |_, _| {
                    iospec_core::Coercion::Unchanged
                }),
            ),
        );
        assert_eq!(resolved.coercions.unwrap().types(), vec![ValueType::Text]);
    }

    #[test]
    fn test_into_processor_applies_default_prefix() {
        let processor = ProcessorSettings::new().into_processor("Invalid input.");
        assert_eq!(processor.error_message(), "Invalid input.");
        assert!(!processor.spec().unlimited);

        let processor = ProcessorSettings::new()
            .with_error_message("Custom.")
            .into_processor("Invalid input.");
        assert_eq!(processor.error_message(), "Custom.");
    }

    #[test]
    fn test_from_iospec_leaves_unlimited_unset_when_false() {
        let layer =
            ProcessorSettings::from_iospec(IoSpec::new().with_required(ValueType::Integer));
        assert_eq!(layer.unlimited, None);
        assert!(layer.required.is_some());
    }

    #[test]
    fn test_explicit_false_overrides_lower_unlimited() {
        let resolved = resolve_settings(
            ProcessorSettings::new().with_unlimited(true),
            ProcessorSettings::new(),
            ProcessorSettings::new(),
            ProcessorSettings::new().with_unlimited(false),
        );
        assert_eq!(resolved.unlimited, Some(false));
        assert!(!resolved.into_processor("Invalid input.").spec().unlimited);
    }

    #[test]
    fn test_no_defaults_is_empty() {
        assert!(NoDefaults.general().coercions.is_none());
        assert!(NoDefaults.for_direction(Direction::Output).coercions.is_none());
        assert!(StandardDefaults.for_direction(Direction::Input).coercions.is_some());
    }
}
