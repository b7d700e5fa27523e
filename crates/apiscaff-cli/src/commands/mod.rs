//! Command handlers. Each translates its arguments into core calls and
//! displays the result; no business logic lives here.

use std::path::PathBuf;

use apiscaff_adapters::{EnvironmentRepository, ZipArchiveLocator};
use apiscaff_core::{
    application::CoordinateResolver,
    domain::{ArchiveMode, ResourceCoordinate},
    error::ScaffError,
};

use crate::{cli::GavArgs, error::CliResult};

pub mod create;
pub mod extract;
pub mod resolve;

/// Manifest lookup unless an extraction directory is given.
fn archive_mode(extract_to: Option<PathBuf>) -> ArchiveMode {
    match extract_to {
        Some(destination) => ArchiveMode::Extract { destination },
        None => ArchiveMode::Manifest,
    }
}

/// Resolver over the environment-configured repository.
fn resolver(mode: ArchiveMode) -> CoordinateResolver {
    CoordinateResolver::new(
        Box::new(EnvironmentRepository::from_env()),
        Box::new(ZipArchiveLocator::new()),
    )
    .with_mode(mode)
}

/// All-or-nothing coordinate from discrete flags.
fn coordinate(gav: &GavArgs) -> CliResult<Option<ResourceCoordinate>> {
    ResourceCoordinate::from_gav(
        gav.group_id.as_deref(),
        gav.artifact_id.as_deref(),
        gav.version.as_deref(),
    )
    .map_err(|e| ScaffError::from(e).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_dir_selects_extract_mode() {
        assert_eq!(archive_mode(None), ArchiveMode::Manifest);
        assert_eq!(
            archive_mode(Some(PathBuf::from("target/api"))),
            ArchiveMode::Extract {
                destination: PathBuf::from("target/api")
            }
        );
    }

    #[test]
    fn partial_gav_is_rejected() {
        let gav = GavArgs {
            group_id: Some("com.acme".into()),
            artifact_id: None,
            version: Some("1.0.0".into()),
        };
        let err = coordinate(&gav).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("artifact"));
    }

    #[test]
    fn empty_gav_means_no_coordinate() {
        assert!(coordinate(&GavArgs::default()).unwrap().is_none());
    }
}
