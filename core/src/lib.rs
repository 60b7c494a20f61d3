//! Schema verification and coercion for nested dynamic values.
//!
//! This crate checks a [`Value`] (maps, lists, scalars) against a pair of
//! [`Schema`]s and reports what is wrong with it:
//!
//! - [`difference`] finds positions the value lacks ([`DiffMode::Missing`])
//!   or positions the schema does not declare ([`DiffMode::Unknown`]).
//! - [`confirm_type`] finds leaves whose type does not match, consulting
//!   user [`TypeCheckFunctions`] first.
//! - [`coerce`] converts leaves toward their declared types through user
//!   [`CoercionFunctions`]. It never fails.
//! - [`combine`] merges a `required` and an `optional` schema into the
//!   single schema used for unknown-key and type checks.
//!
//! [`Processor`] ties these together behind `verify`, `coerce` and
//! `process`, producing a [`VerificationError`] whose message lists every
//! problem at once.
//!
//! # Example
//!
//! ```
//! use iospec_core::*;
//!
//! let processor = Processor::new(
//!     IoSpec::new()
//!         .with_required(Schema::map([("id", ValueType::Integer)]))
//!         .with_optional(Schema::map([("tags", Schema::list_of(ValueType::Text))])),
//! )
//! .with_error_message("Invalid input.");
//!
//! let ok = Value::map([("id", Value::from(1)), ("tags", Value::list(["a", "b"]))]);
//! assert!(processor.verify(&ok).is_ok());
//!
//! let bad = Value::map([("tags", Value::list([Value::from("a"), Value::from(2)]))]);
//! let err = processor.verify(&bad).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Invalid input.\n\
//!      Missing: {\"id\": <integer>}\n\
//!      Wrong type: {\"tags\": {1: (expected 'text'; got 'integer')}}"
//! );
//! ```

mod coerce;
mod combine;
mod confirm;
mod difference;
mod error;
mod hooks;
mod processor;
mod report;
mod shape;
mod types;
mod value;

pub use coerce::coerce;
pub use combine::combine;
pub use confirm::{WrongType, confirm_type};
pub use difference::{Diff, DiffEntry, DiffMode, difference, restrict_to_declared};
pub use error::{Result, VerificationError};
pub use hooks::{
    Coercion, CoercionFn, CoercionFunctions, TypeCheck, TypeCheckFn, TypeCheckFunctions,
};
pub use processor::{DEFAULT_ERROR_MESSAGE, Direction, IoSpec, Processor};
pub use report::FailureReport;
pub use shape::{Positions, Shape, Structured};
pub use types::{ContainerKind, Key, Schema, ValueType};
pub use value::{Decimal, DecimalParseError, Value};
