//! Scaffolding accessories: the user-supplied override document.
//!
//! ```json
//! {
//!   "showConsole": false,
//!   "externalCommonFile": "globals.xml",
//!   "apiId": "16356937",
//!   "properties": { "format": "yaml", "files": ["dev.yaml", "prod.yaml"] },
//!   "configurationGroup": {
//!     "path": "src/main/resources/config",
//!     "configurations": [
//!       { "environment": "dev", "properties": { "http.port": "8081" } }
//!     ]
//!   }
//! }
//! ```
//!
//! Absent fields take their defaults (`showConsole = true`, everything else
//! empty). Overrides are applied over a defaults value with JSON merge-patch
//! semantics: objects merge key by key, `null` resets a key to its default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::DomainError;

/// Required extension of `externalCommonFile`.
const COMMON_FILE_EXTENSION: &str = "xml";

/// Validated, immutable scaffolding accessories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaffoldingAccessories {
    show_console: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_common_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<Properties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    configuration_group: Option<ConfigurationGroup>,
}

impl Default for ScaffoldingAccessories {
    fn default() -> Self {
        Self {
            show_console: true,
            external_common_file: None,
            api_id: None,
            properties: None,
            configuration_group: None,
        }
    }
}

impl ScaffoldingAccessories {
    /// Apply an override document over `defaults`.
    ///
    /// The result is not validated; call [`Self::validate`] before use.
    pub fn merged(defaults: &Self, overrides: Value) -> Result<Self, serde_json::Error> {
        let mut base = serde_json::to_value(defaults)?;
        merge_patch(&mut base, overrides);
        serde_json::from_value(base)
    }

    /// Check the structural constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(file) = self.external_common_file.as_deref().filter(|f| !f.is_empty()) {
            if extension_of(file) != Some(COMMON_FILE_EXTENSION) {
                return Err(DomainError::InvalidExternalCommonFile {
                    file: file.to_string(),
                });
            }
        }

        if let Some(properties) = &self.properties {
            if properties.format().is_some() != properties.files().is_some() {
                return Err(DomainError::IncompleteProperties);
            }
        }

        Ok(())
    }

    pub fn show_console(&self) -> bool {
        self.show_console
    }
    pub fn external_common_file(&self) -> Option<&str> {
        self.external_common_file.as_deref()
    }
    pub fn api_id(&self) -> Option<&str> {
        self.api_id.as_deref()
    }
    pub fn properties(&self) -> Option<&Properties> {
        self.properties.as_ref()
    }
    pub fn configuration_group(&self) -> Option<&ConfigurationGroup> {
        self.configuration_group.as_ref()
    }
}

/// Property-file generation settings. `format` and `files` travel together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Properties {
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<Vec<String>>,
}

impl Properties {
    pub fn new(format: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            format: Some(format.into()),
            files: Some(files),
        }
    }

    /// Property format; an empty string counts as unset.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref().filter(|f| !f.is_empty())
    }

    pub fn files(&self) -> Option<&[String]> {
        self.files.as_deref()
    }
}

/// Per-environment configuration files to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationGroup {
    path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    configurations: Vec<EnvironmentConfiguration>,
}

impl ConfigurationGroup {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn configurations(&self) -> &[EnvironmentConfiguration] {
        &self.configurations
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfiguration {
    environment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    common_properties: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, Value>,
}

impl EnvironmentConfiguration {
    pub fn environment(&self) -> &str {
        &self.environment
    }
    pub fn common_properties(&self) -> Option<&BTreeMap<String, Value>> {
        self.common_properties.as_ref()
    }
    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }
}

/// RFC 7386 merge patch.
fn merge_patch(target: &mut Value, patch: Value) {
    match patch {
        Value::Object(patch) => {
            if !target.is_object() {
                *target = Value::Object(serde_json::Map::new());
            }
            if let Value::Object(target) = target {
                for (key, value) in patch {
                    if value.is_null() {
                        target.remove(&key);
                    } else {
                        merge_patch(target.entry(key).or_insert(Value::Null), value);
                    }
                }
            }
        }
        other => *target = other,
    }
}

/// Extension after the last dot of the final path segment.
fn extension_of(file: &str) -> Option<&str> {
    let name = file.rsplit(['/', '\\']).next().unwrap_or(file);
    name.rsplit_once('.').map(|(_, ext)| ext)
}
