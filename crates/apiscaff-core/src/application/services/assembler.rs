//! Scaffolding configuration assembly.
//!
//! Loads the JSON override document, merges it over the configured defaults
//! and validates the result.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{DomainValidator as validator, ScaffoldingAccessories},
    error::ScaffResult,
};

#[derive(Debug, Clone, Default)]
pub struct AccessoriesAssembler {
    defaults: ScaffoldingAccessories,
}

impl AccessoriesAssembler {
    pub fn new(defaults: ScaffoldingAccessories) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &ScaffoldingAccessories {
        &self.defaults
    }

    /// Assemble from an optional override file.
    ///
    /// No file means defaults only. A file that is named but missing is a
    /// parse error, like any other unreadable document.
    #[instrument(skip_all, fields(document = ?document.map(Path::display)))]
    pub fn assemble(
        &self,
        filesystem: &dyn Filesystem,
        document: Option<&Path>,
    ) -> ScaffResult<ScaffoldingAccessories> {
        let Some(path) = document else {
            debug!("No scaffolding configuration given, using defaults");
            validator::validate_accessories(&self.defaults)?;
            return Ok(self.defaults.clone());
        };

        if !filesystem.exists(path) {
            return Err(ApplicationError::ConfigParse {
                path: path.to_path_buf(),
                reason: "file does not exist".into(),
            }
            .into());
        }

        let text = filesystem.read_to_string(path)?;
        self.assemble_str(path, &text)
    }

    /// Assemble from override text; `source` only labels errors.
    pub fn assemble_str(&self, source: &Path, text: &str) -> ScaffResult<ScaffoldingAccessories> {
        let parse_error = |e: serde_json::Error| ApplicationError::ConfigParse {
            path: source.to_path_buf(),
            reason: e.to_string(),
        };

        let overrides: Value = serde_json::from_str(text).map_err(parse_error)?;
        let accessories =
            ScaffoldingAccessories::merged(&self.defaults, overrides).map_err(parse_error)?;

        validator::validate_accessories(&accessories)?;
        debug!(?accessories, "Scaffolding configuration assembled");
        Ok(accessories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::DomainError;
    use crate::error::ScaffError;

    fn source() -> &'static Path {
        Path::new("scaffolding.json")
    }

    #[test]
    fn no_document_yields_defaults() {
        let fs = MockFilesystem::new();
        let accessories = AccessoriesAssembler::default().assemble(&fs, None).unwrap();
        assert!(accessories.show_console());
        assert!(accessories.external_common_file().is_none());
    }

    #[test]
    fn overrides_win_over_defaults() {
        let accessories = AccessoriesAssembler::default()
            .assemble_str(source(), r#"{"showConsole": false, "apiId": "1234"}"#)
            .unwrap();
        assert!(!accessories.show_console());
        assert_eq!(accessories.api_id(), Some("1234"));
    }

    #[test]
    fn assembling_twice_is_identical() {
        let doc = r#"{"externalCommonFile": "globals.xml", "properties": {"format": "yaml", "files": ["dev.yaml"]}}"#;
        let assembler = AccessoriesAssembler::default();
        assert_eq!(
            assembler.assemble_str(source(), doc).unwrap(),
            assembler.assemble_str(source(), doc).unwrap()
        );
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = AccessoriesAssembler::default()
            .assemble_str(source(), "{ not json")
            .unwrap_err();
        assert!(matches!(
            err,
            ScaffError::Application(ApplicationError::ConfigParse { .. })
        ));
    }

    #[test]
    fn wrong_field_type_is_a_parse_error() {
        let err = AccessoriesAssembler::default()
            .assemble_str(source(), r#"{"showConsole": "yes"}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ScaffError::Application(ApplicationError::ConfigParse { .. })
        ));
    }

    #[test]
    fn txt_common_file_is_rejected() {
        let err = AccessoriesAssembler::default()
            .assemble_str(source(), r#"{"externalCommonFile": "globals.txt"}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ScaffError::Domain(DomainError::InvalidExternalCommonFile { .. })
        ));
    }

    #[test]
    fn format_without_files_is_rejected() {
        let err = AccessoriesAssembler::default()
            .assemble_str(source(), r#"{"properties": {"format": "yaml"}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ScaffError::Domain(DomainError::IncompleteProperties)
        ));
    }

    #[test]
    fn missing_document_is_reported() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_read_to_string().never();

        let err = AccessoriesAssembler::default()
            .assemble(&fs, Some(Path::new("/nope/scaffolding.json")))
            .unwrap_err();
        assert!(matches!(
            err,
            ScaffError::Application(ApplicationError::ConfigParse { .. })
        ));
    }

    #[test]
    fn document_is_read_through_the_filesystem() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_read_to_string()
            .returning(|_| Ok(r#"{"apiId": "42"}"#.to_string()));

        let accessories = AccessoriesAssembler::default()
            .assemble(&fs, Some(Path::new("/work/scaffolding.json")))
            .unwrap();
        assert_eq!(accessories.api_id(), Some("42"));
        assert!(accessories.show_console());
    }
}
