use std::path::{Component, Path};

use serde::Serialize;

use crate::domain::value_objects::RuntimeEdition;

/// File name used when the engine returns an artifact without a name.
pub const DEFAULT_ARTIFACT_NAME: &str = "api.xml";

/// A named unit of generated output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    name: String,
    content: Vec<u8>,
}

impl GeneratedArtifact {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// The artifact's name, or [`DEFAULT_ARTIFACT_NAME`] when blank.
    pub fn file_name(&self) -> &str {
        if self.name.trim().is_empty() {
            DEFAULT_ARTIFACT_NAME
        } else {
            &self.name
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// `true` when [`file_name`](Self::file_name) is a relative path that
    /// stays inside the directory it is joined to.
    pub fn stays_inside(&self) -> bool {
        Path::new(self.file_name())
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    }
}

/// What the generation engine returned for one configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldingResult {
    success: bool,
    configs: Vec<GeneratedArtifact>,
    resources: Vec<GeneratedArtifact>,
    errors: Vec<String>,
}

impl ScaffoldingResult {
    pub fn success(configs: Vec<GeneratedArtifact>, resources: Vec<GeneratedArtifact>) -> Self {
        Self {
            success: true,
            configs,
            resources,
            errors: Vec::new(),
        }
    }

    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            success: false,
            errors,
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
    /// Generated configuration documents.
    pub fn configs(&self) -> &[GeneratedArtifact] {
        &self.configs
    }
    /// Generated resource documents.
    pub fn resources(&self) -> &[GeneratedArtifact] {
        &self.resources
    }
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

/// Run-wide settings the engine needs besides the configuration itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffolderContext {
    runtime_edition: RuntimeEdition,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_runtime_version: Option<String>,
}

impl ScaffolderContext {
    pub fn new(runtime_edition: RuntimeEdition, min_runtime_version: Option<String>) -> Self {
        Self {
            runtime_edition,
            min_runtime_version,
        }
    }

    pub fn runtime_edition(&self) -> RuntimeEdition {
        self.runtime_edition
    }

    pub fn min_runtime_version(&self) -> Option<&str> {
        self.min_runtime_version.as_deref()
    }
}
