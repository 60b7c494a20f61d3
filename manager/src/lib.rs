//! Input/output managers built on `iospec-core`.
//!
//! This crate wires two [`Processor`](iospec_core::Processor)s together at a
//! process boundary:
//!
//! - [`IoManager`] coerces-then-verifies input and verifies-then-coerces
//!   output, raising [`VerificationError::Input`](iospec_core::VerificationError::Input)
//!   or [`VerificationError::Output`](iospec_core::VerificationError::Output).
//! - [`resolve_settings`] overlays the configuration layers: defaults from a
//!   [`ManagerDefaults`] implementation, then constructor settings.
//! - [`default_input_coercions`] / [`default_output_coercions`] convert
//!   uuids, timestamps, decimals and byte strings at the boundary.
//! - [`ManagerSpec`] loads schemas from YAML or JSON files.
//! - [`Signature`] derives required/optional schemas from a parameter list.
//!
//! # Quick start
//!
//! ```no_run
//! use iospec_manager::{IoManager, ManagerSpec, StandardDefaults};
//!
//! let spec = ManagerSpec::load("schemas/orders.yml").unwrap();
//! let manager = IoManager::from_spec(&spec, StandardDefaults);
//! # let request = iospec_core::Value::Null;
//! let order = manager.process_input(request).unwrap();
//! ```

mod coercions;
mod config;
mod error;
mod manager;
mod settings;
mod signature;

pub use coercions::{default_input_coercions, default_output_coercions, parse_timestamp};
pub use config::{BoundarySpec, ManagerSpec};
pub use error::{ConfigError, Result};
pub use manager::{INPUT_ERROR_MESSAGE, IoManager, IoManagerBuilder, OUTPUT_ERROR_MESSAGE};
pub use settings::{
    ManagerDefaults, NoDefaults, ProcessorSettings, StandardDefaults, resolve_settings,
};
pub use signature::{Parameter, Signature};
