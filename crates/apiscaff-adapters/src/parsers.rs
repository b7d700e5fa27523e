//! Input parsers: API specifications and existing XML documents.
//!
//! Both are shallow. The specification parser checks that the document is
//! syntactically valid for its format; the document parser checks that the
//! XML is well-formed and has the expected root element. Deeper
//! interpretation belongs to the generation engine.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use apiscaff_core::{
    application::{
        ParseFailure,
        ports::{DocumentParser, SpecificationParser},
    },
    domain::{ApiReference, ApiSpecification, DomainDescriptor, ExistingDocument},
};
use tracing::{debug, instrument};
use zip::ZipArchive;

/// Root element of a configuration document.
const CONFIG_ROOT: &str = "mule";

/// Root element of a domain descriptor.
const DOMAIN_ROOT: &str = "mule-domain";

// ── Specifications ───────────────────────────────────────────────────────────

/// [`SpecificationParser`] for files on disk and entries inside zip archives.
///
/// `.json` documents must be JSON; everything else (RAML, YAML) must be YAML.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecFileParser;

impl SpecFileParser {
    pub fn new() -> Self {
        Self
    }

    fn read(reference: &ApiReference) -> Result<String, String> {
        let bytes = match reference {
            ApiReference::File { path } => std::fs::read(path).map_err(|e| e.to_string())?,
            ApiReference::Archive { archive, entry } => read_entry(archive, entry)?,
        };
        String::from_utf8(bytes).map_err(|_| "document is not valid UTF-8".to_string())
    }
}

impl SpecificationParser for SpecFileParser {
    #[instrument(skip_all, fields(reference = %reference))]
    fn parse(&self, reference: &ApiReference) -> Result<ApiSpecification, ParseFailure> {
        let failure = |reason: String| ParseFailure::new(reference.uri(), reason);

        let content = Self::read(reference).map_err(failure)?;
        if content.trim().is_empty() {
            return Err(failure("document is empty".into()));
        }

        let is_json = reference
            .document_name()
            .and_then(|name| Path::new(name).extension())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str::<serde_json::Value>(&content)
                .map_err(|e| failure(e.to_string()))?;
        } else {
            serde_yaml::from_str::<serde_yaml::Value>(&content)
                .map_err(|e| failure(e.to_string()))?;
        }

        debug!(bytes = content.len(), "Specification parsed");
        Ok(ApiSpecification::new(reference.clone(), content))
    }
}

fn read_entry(archive: &Path, entry: &str) -> Result<Vec<u8>, String> {
    let file = File::open(archive).map_err(|e| e.to_string())?;
    let mut zip = ZipArchive::new(file).map_err(|e| e.to_string())?;
    let mut entry = zip
        .by_name(entry.trim_start_matches('/'))
        .map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes).map_err(|e| e.to_string())?;
    Ok(bytes)
}

// ── XML documents ────────────────────────────────────────────────────────────

/// [`DocumentParser`] for XML documents on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDocumentParser;

impl XmlDocumentParser {
    pub fn new() -> Self {
        Self
    }

    fn read(path: &Path, expected_root: &str) -> Result<(String, String), ParseFailure> {
        let failure = |reason: String| ParseFailure::new(path.display().to_string(), reason);

        let content = std::fs::read_to_string(path).map_err(|e| failure(e.to_string()))?;
        {
            let document = roxmltree::Document::parse(&content)
                .map_err(|e| failure(format!("malformed XML: {e}")))?;
            let root = document.root_element().tag_name().name();
            if root != expected_root {
                return Err(failure(format!(
                    "expected <{expected_root}> root element, found <{root}>"
                )));
            }
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok((name, content))
    }
}

impl DocumentParser for XmlDocumentParser {
    fn parse_config(&self, path: &Path) -> Result<ExistingDocument, ParseFailure> {
        let (name, content) = Self::read(path, CONFIG_ROOT)?;
        Ok(ExistingDocument::new(name, content))
    }

    fn parse_domain(&self, path: &Path) -> Result<DomainDescriptor, ParseFailure> {
        let (name, content) = Self::read(path, DOMAIN_ROOT)?;
        Ok(DomainDescriptor::new(name, content))
    }
}
