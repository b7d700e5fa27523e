//! The scaffolding configuration handed to the generation engine.
//!
//! A [`ScaffoldingConfiguration`] binds exactly one parsed API
//! specification to the shared run inputs (existing documents, domain,
//! accessories, packaged-resource override). The shared part is collected
//! once in a [`ScaffoldingConfigurationBuilder`]; the orchestrator clones
//! the builder per specification and finishes it with `with_api`.

use serde::Serialize;

use crate::domain::{
    accessories::ScaffoldingAccessories, api_reference::ApiReference, error::DomainError,
};

/// A parsed API specification. The content is opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiSpecification {
    reference: ApiReference,
    content: String,
}

impl ApiSpecification {
    pub fn new(reference: ApiReference, content: impl Into<String>) -> Self {
        Self {
            reference,
            content: content.into(),
        }
    }

    pub fn reference(&self) -> &ApiReference {
        &self.reference
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Short name used in logs and as the default name of generated flows.
    pub fn name(&self) -> &str {
        self.reference.stem().unwrap_or("api")
    }
}

/// A previously generated configuration document found in the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExistingDocument {
    name: String,
    content: String,
}

impl ExistingDocument {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// The shared-resources descriptor of a domain the application deploys into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainDescriptor {
    name: String,
    content: String,
}

impl DomainDescriptor {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Finished input for one engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldingConfiguration {
    api: ApiSpecification,
    existing_documents: Vec<ExistingDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<DomainDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_sync_resource: Option<String>,
    accessories: ScaffoldingAccessories,
}

impl ScaffoldingConfiguration {
    pub fn builder() -> ScaffoldingConfigurationBuilder {
        ScaffoldingConfigurationBuilder::default()
    }

    pub fn api(&self) -> &ApiSpecification {
        &self.api
    }
    pub fn existing_documents(&self) -> &[ExistingDocument] {
        &self.existing_documents
    }
    pub fn domain(&self) -> Option<&DomainDescriptor> {
        self.domain.as_ref()
    }
    pub fn api_sync_resource(&self) -> Option<&str> {
        self.api_sync_resource.as_deref()
    }
    pub fn accessories(&self) -> &ScaffoldingAccessories {
        &self.accessories
    }
}

/// Accumulating builder for [`ScaffoldingConfiguration`].
///
/// `api` is the only required field; accessories default to
/// [`ScaffoldingAccessories::default`]. `build` re-validates the accessories.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldingConfigurationBuilder {
    api: Option<ApiSpecification>,
    existing_documents: Vec<ExistingDocument>,
    domain: Option<DomainDescriptor>,
    api_sync_resource: Option<String>,
    accessories: Option<ScaffoldingAccessories>,
}

impl ScaffoldingConfigurationBuilder {
    pub fn with_existing_documents(mut self, documents: Vec<ExistingDocument>) -> Self {
        self.existing_documents = documents;
        self
    }

    pub fn with_domain(mut self, domain: Option<DomainDescriptor>) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_api_sync_resource(mut self, resource: Option<String>) -> Self {
        self.api_sync_resource = resource;
        self
    }

    pub fn with_accessories(mut self, accessories: ScaffoldingAccessories) -> Self {
        self.accessories = Some(accessories);
        self
    }

    pub fn with_api(mut self, api: ApiSpecification) -> Self {
        self.api = Some(api);
        self
    }

    pub fn build(self) -> Result<ScaffoldingConfiguration, DomainError> {
        let api = self
            .api
            .ok_or(DomainError::MissingRequiredField { field: "api" })?;
        let accessories = self.accessories.unwrap_or_default();
        accessories.validate()?;

        Ok(ScaffoldingConfiguration {
            api,
            existing_documents: self.existing_documents,
            domain: self.domain,
            api_sync_resource: self.api_sync_resource,
            accessories,
        })
    }
}
