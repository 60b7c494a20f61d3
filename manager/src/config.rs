//! Schema definitions loaded from YAML or JSON.
//!
//! A [`ManagerSpec`] describes the input and output schemas of one boundary.
//! Hook tables are code, so they are not part of the file format.
//!
//! Schemas are externally tagged enums. YAML files write them as singleton
//! maps (`type: uuid`, `map: {...}`), never as `!map` tags.
//!
//! # Example YAML
//!
//! ```yaml
//! input:
//!   required:
//!     map:
//!       id:
//!         type: uuid
//!   optional:
//!     map:
//!       tags:
//!         list_of:
//!           type: text
//! output:
//!   required:
//!     map:
//!       created:
//!         type: timestamp
//!   unlimited: true
//! ```

use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use iospec_core::Schema;
use serde::{Deserialize, Serialize};
use serde_yaml::with::singleton_map_recursive;

use crate::error::Result;
use crate::settings::ProcessorSettings;

/// Input and output schemas for an [`IoManager`](crate::IoManager).
///
/// # Examples
///
/// ```
/// use iospec_core::{Schema, ValueType};
/// use iospec_manager::ManagerSpec;
///
/// let spec = ManagerSpec::from_yaml_str(
///     "input:\n  required:\n    map:\n      n:\n        type: integer\n",
/// )
/// .unwrap();
/// assert_eq!(
///     spec.input.required,
///     Some(Schema::map([("n", ValueType::Integer)]))
/// );
/// assert!(spec.output.required.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagerSpec {
    #[serde(default)]
    pub input: BoundarySpec,
    #[serde(default)]
    pub output: BoundarySpec,
}

/// The schemas of one direction as written in a spec file.
///
/// Every field is optional so that an explicit `unlimited: false` can
/// override a lower configuration layer, while an absent key defers to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundarySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlimited: Option<bool>,
}

impl BoundarySpec {
    /// This direction as a constructor layer.
    pub fn settings(&self) -> ProcessorSettings {
        ProcessorSettings {
            required: self.required.clone(),
            optional: self.optional.clone(),
            unlimited: self.unlimited,
            ..ProcessorSettings::default()
        }
    }
}

impl ManagerSpec {
    /// Loads a spec from a file. `.json` files are read as JSON, anything
    /// else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ConfigError::Io) if the file cannot be read, or
    /// [`Json`](crate::ConfigError::Json) / [`Yaml`](crate::ConfigError::Yaml)
    /// if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let spec = if path.extension().and_then(|e| e.to_str()) == Some("json") {
            serde_json::from_reader(reader)?
        } else {
            singleton_map_recursive::deserialize(serde_yaml::Deserializer::from_reader(reader))?
        };
        Ok(spec)
    }

    /// Saves the spec as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ConfigError::Io) if the file cannot be written,
    /// or [`Yaml`](crate::ConfigError::Yaml) if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let mut serializer = serde_yaml::Serializer::new(BufWriter::new(file));
        singleton_map_recursive::serialize(self, &mut serializer)?;
        serializer.into_inner()?.flush()?;
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(singleton_map_recursive::deserialize(
            serde_yaml::Deserializer::from_str(yaml),
        )?)
    }

    /// Renders the spec in the same YAML form [`save`](Self::save) writes.
    ///
    /// # Errors
    ///
    /// Returns [`Yaml`](crate::ConfigError::Yaml) if serialization fails.
    pub fn to_yaml_string(&self) -> Result<String> {
        let mut serializer = serde_yaml::Serializer::new(Vec::new());
        singleton_map_recursive::serialize(self, &mut serializer)?;
        let buffer = serializer.into_inner()?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The input schemas as a constructor layer.
    pub fn input_settings(&self) -> ProcessorSettings {
        self.input.settings()
    }

    /// The output schemas as a constructor layer.
    pub fn output_settings(&self) -> ProcessorSettings {
        self.output.settings()
    }
}
