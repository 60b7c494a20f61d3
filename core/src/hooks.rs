//! Extension hooks for type confirmation and coercion.
//!
//! Hooks are keyed by [`ValueType`] and only fire at leaf positions whose
//! schema is exactly that type handle.
//!
//! A type-check hook returns [`TypeCheck`]: force a pass, force a failure, or
//! defer to the default instance check. A coercion hook returns
//! [`Coercion`]. Several coercion hooks may be registered for one type; they
//! run in registration order, each seeing the previous result, until one
//! returns [`Coercion::Delegate`].
//!
//! # Examples
//!
//! ```
//! use iospec_core::{Coercion, CoercionFunctions, Value, ValueType};
//!
//! let coercions = CoercionFunctions::new().with(ValueType::Integer, |value, _| {
//!     match value.as_str().and_then(|s| s.parse::<i64>().ok()) {
//!         Some(n) => Coercion::Converted(Value::Integer(n)),
//!         None => Coercion::Unchanged,
//!     }
//! });
//!
//! assert_eq!(coercions.apply(Value::from("12"), ValueType::Integer), Value::Integer(12));
//! assert_eq!(coercions.apply(Value::from("x"), ValueType::Integer), Value::from("x"));
//! assert_eq!(coercions.apply(Value::from("12"), ValueType::Text), Value::from("12"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::types::ValueType;
use crate::value::Value;

/// Outcome of a custom type-check hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCheck {
    /// Accept the value and skip the default check.
    Pass,
    /// Reject the value, even if the default check would accept it.
    Fail,
    /// No opinion; run the default check.
    Defer,
}

/// Outcome of a coercion hook.
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion {
    /// Converted value; later hooks for the same type still run on it.
    Converted(Value),
    /// Final value; stop and use it verbatim.
    Delegate(Value),
    /// Nothing to convert.
    Unchanged,
}

pub type TypeCheckFn = Arc<dyn Fn(&Value, ValueType) -> TypeCheck + Send + Sync>;
pub type CoercionFn = Arc<dyn Fn(&Value, ValueType) -> Coercion + Send + Sync>;

/// Type-check hooks by type handle. One hook per type; registering again
/// replaces it.
#[derive(Clone, Default)]
pub struct TypeCheckFunctions {
    checks: HashMap<ValueType, TypeCheckFn>,
}

impl TypeCheckFunctions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `check` for `value_type`, replacing any earlier hook.
    pub fn register<F>(&mut self, value_type: ValueType, check: F) -> &mut Self
    where
        F: Fn(&Value, ValueType) -> TypeCheck + Send + Sync + 'static,
    {
        self.checks.insert(value_type, Arc::new(check));
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<F>(mut self, value_type: ValueType, check: F) -> Self
    where
        F: Fn(&Value, ValueType) -> TypeCheck + Send + Sync + 'static,
    {
        self.register(value_type, check);
        self
    }

    pub fn get(&self, value_type: ValueType) -> Option<&TypeCheckFn> {
        self.checks.get(&value_type)
    }

    /// Runs the hook for `value_type`, or defers when none is registered.
    pub fn check(&self, value: &Value, value_type: ValueType) -> TypeCheck {
        match self.checks.get(&value_type) {
            Some(check) => check(value, value_type),
            None => TypeCheck::Defer,
        }
    }

    /// Copies every hook from `other`; hooks in `other` win.
    pub fn extend(&mut self, other: &TypeCheckFunctions) {
        for (value_type, check) in &other.checks {
            self.checks.insert(*value_type, Arc::clone(check));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Registered type handles, sorted.
    pub fn types(&self) -> Vec<ValueType> {
        let mut types: Vec<_> = self.checks.keys().copied().collect();
        types.sort();
        types
    }
}

impl fmt::Debug for TypeCheckFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeCheckFunctions")
            .field("types", &self.types())
            .finish()
    }
}

/// Coercion hook stacks by type handle.
#[derive(Clone, Default)]
pub struct CoercionFunctions {
    stacks: HashMap<ValueType, Vec<CoercionFn>>,
}

impl CoercionFunctions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `coerce` to the stack for `value_type`.
    pub fn register<F>(&mut self, value_type: ValueType, coerce: F) -> &mut Self
    where
        F: Fn(&Value, ValueType) -> Coercion + Send + Sync + 'static,
    {
        self.stacks
            .entry(value_type)
            .or_default()
            .push(Arc::new(coerce));
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<F>(mut self, value_type: ValueType, coerce: F) -> Self
    where
        F: Fn(&Value, ValueType) -> Coercion + Send + Sync + 'static,
    {
        self.register(value_type, coerce);
        self
    }

    /// Runs the stack for `value_type` over `value`.
    ///
    /// Without registered hooks the value is returned untouched.
    pub fn apply(&self, value: Value, value_type: ValueType) -> Value {
        let Some(stack) = self.stacks.get(&value_type) else {
            return value;
        };
        trace!(%value_type, hooks = stack.len(), "applying coercion hooks");

        let mut current = value;
        for coerce in stack {
            match coerce(&current, value_type) {
                Coercion::Converted(next) => current = next,
                Coercion::Delegate(done) => return done,
                Coercion::Unchanged => {}
            }
        }
        current
    }

    /// Appends every stack from `other` after the existing hooks.
    pub fn extend(&mut self, other: &CoercionFunctions) {
        for (value_type, stack) in &other.stacks {
            self.stacks
                .entry(*value_type)
                .or_default()
                .extend(stack.iter().cloned());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Registered type handles, sorted.
    pub fn types(&self) -> Vec<ValueType> {
        let mut types: Vec<_> = self.stacks.keys().copied().collect();
        types.sort();
        types
    }
}

impl fmt::Debug for CoercionFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoercionFunctions")
            .field("types", &self.types())
            .finish()
    }
}
