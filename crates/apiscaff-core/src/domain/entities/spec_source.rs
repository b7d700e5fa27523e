use std::fmt;

use crate::domain::{coordinate::ResourceCoordinate, entities::file_set::GlobQuery};

/// Where the API specifications of a run come from.
///
/// A coordinate always wins: when one is present, spec-file globs are not
/// evaluated at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    /// A packaged API resolved through the repository.
    Coordinate(ResourceCoordinate),
    /// Specification files matched on disk.
    Glob(GlobQuery),
}

impl SpecSource {
    /// Pick the source: the coordinate if one was given, the globs otherwise.
    pub fn select(coordinate: Option<ResourceCoordinate>, globs: GlobQuery) -> Self {
        match coordinate {
            Some(coordinate) => Self::Coordinate(coordinate),
            None => Self::Glob(globs),
        }
    }

    /// Descriptor to pass along as the packaged-resource override.
    pub fn api_sync_resource(&self) -> Option<String> {
        match self {
            Self::Coordinate(coordinate) => Some(coordinate.descriptor()),
            Self::Glob(_) => None,
        }
    }
}

impl fmt::Display for SpecSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinate(coordinate) => write!(f, "coordinate {coordinate}"),
            Self::Glob(query) => write!(f, "files under {}", query.root().display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_takes_precedence() {
        let c = ResourceCoordinate::from_gav(Some("g"), Some("a"), Some("1"))
            .unwrap()
            .unwrap();
        let source = SpecSource::select(Some(c), GlobQuery::spec_files("/p"));
        assert!(matches!(source, SpecSource::Coordinate(_)));
        assert_eq!(
            source.api_sync_resource().as_deref(),
            Some("resource::g:a:1:fat-raml:zip:a.raml")
        );
    }

    #[test]
    fn globs_without_coordinate() {
        let source = SpecSource::select(None, GlobQuery::spec_files("/p"));
        assert!(matches!(source, SpecSource::Glob(_)));
        assert_eq!(source.api_sync_resource(), None);
    }
}
