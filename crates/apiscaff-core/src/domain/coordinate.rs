//! Resource coordinates: the address of a packaged API in a repository.
//!
//! A coordinate is either assembled from discrete group/artifact/version
//! fields (the common case on the command line) or parsed from a descriptor:
//!
//! ```text
//! resource::com.acme:orders-api:1.0.2:fat-raml:zip:orders-api.raml
//! └scheme┘  └group┘  └artifact┘ └ver┘ └classif┘└typ┘└─filename──┘
//! ```
//!
//! A doubled colon after the scheme is accepted, and is what [`ResourceCoordinate::descriptor`]
//! produces.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Scheme written at the front of every descriptor this crate produces.
pub const RESOURCE_SCHEME: &str = "resource";

/// Classifier used for packaged API archives.
pub const FAT_RAML: &str = "fat-raml";

/// Packaging type used for packaged API archives.
pub const ZIP: &str = "zip";

/// Address of a versioned, packaged resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCoordinate {
    group_id: String,
    artifact_id: String,
    version: String,
    classifier: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filename: Option<String>,
}

impl ResourceCoordinate {
    /// Build a coordinate from its five mandatory segments.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        classifier: impl Into<String>,
        kind: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let coordinate = Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: classifier.into(),
            kind: kind.into(),
            filename: None,
        };

        let missing = coordinate.missing_segments();
        if !missing.is_empty() {
            return Err(DomainError::IncompleteCoordinate {
                missing: missing.join(", "),
            });
        }
        Ok(coordinate)
    }

    /// Apply the all-or-nothing rule to discrete group/artifact/version input.
    ///
    /// Returns `Ok(None)` when none of the three is given, a packaged-API
    /// coordinate (`fat-raml` / `zip`, filename `<artifact>.raml`) when all
    /// three are given, and an error otherwise. Blank strings count as absent.
    pub fn from_gav(
        group_id: Option<&str>,
        artifact_id: Option<&str>,
        version: Option<&str>,
    ) -> Result<Option<Self>, DomainError> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|s| !s.is_empty())
        }

        let fields = [
            ("groupId", present(group_id)),
            ("artifact", present(artifact_id)),
            ("version", present(version)),
        ];

        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| *name)
            .collect();

        match (missing.len(), fields) {
            (3, _) => Ok(None),
            (0, [(_, Some(g)), (_, Some(a)), (_, Some(v))]) => {
                let coordinate = Self::new(g, a, v, FAT_RAML, ZIP)?;
                Ok(Some(coordinate.with_filename(format!("{a}.raml"))))
            }
            _ => Err(DomainError::IncompleteCoordinate {
                missing: missing.join(", "),
            }),
        }
    }

    /// Attach the in-archive filename segment.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        self.filename = (!filename.is_empty()).then_some(filename);
        self
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }
    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }
    pub fn version(&self) -> &str {
        &self.version
    }
    pub fn classifier(&self) -> &str {
        &self.classifier
    }
    pub fn kind(&self) -> &str {
        &self.kind
    }
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Canonical descriptor string, e.g. `resource::g:a:1.0.0:fat-raml:zip:a.raml`.
    pub fn descriptor(&self) -> String {
        let mut out = format!(
            "{RESOURCE_SCHEME}::{}:{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.version, self.classifier, self.kind
        );
        if let Some(filename) = &self.filename {
            out.push(':');
            out.push_str(filename);
        }
        out
    }

    /// Archive file name in repository layout: `<artifact>-<version>-<classifier>.<type>`.
    pub fn archive_file_name(&self) -> String {
        format!(
            "{}-{}-{}.{}",
            self.artifact_id, self.version, self.classifier, self.kind
        )
    }

    /// Path of the archive relative to a repository root.
    ///
    /// Dots in the group become directory separators.
    pub fn repository_path(&self) -> PathBuf {
        let mut path: PathBuf = self.group_id.split('.').collect();
        path.push(&self.artifact_id);
        path.push(&self.version);
        path.push(self.archive_file_name());
        path
    }

    fn missing_segments(&self) -> Vec<&'static str> {
        [
            ("groupId", &self.group_id),
            ("artifactId", &self.artifact_id),
            ("version", &self.version),
            ("classifier", &self.classifier),
            ("type", &self.kind),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl fmt::Display for ResourceCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptor())
    }
}

impl FromStr for ResourceCoordinate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DomainError::InvalidDescriptor {
            descriptor: s.to_string(),
            reason: reason.to_string(),
        };

        let mut segments: Vec<&str> = s.split(':').collect();
        if segments.first().is_none_or(|scheme| scheme.trim().is_empty()) {
            return Err(invalid("missing scheme"));
        }
        segments.remove(0);
        // `scheme::group` leaves one empty segment behind the scheme.
        if segments.first() == Some(&"") {
            segments.remove(0);
        }

        match segments.as_slice() {
            [group, artifact, version, classifier, kind] => {
                ensure_non_empty(&segments).map_err(|_| invalid("empty segment"))?;
                Self::new(*group, *artifact, *version, *classifier, *kind)
            }
            [group, artifact, version, classifier, kind, filename] => {
                ensure_non_empty(&segments).map_err(|_| invalid("empty segment"))?;
                Ok(Self::new(*group, *artifact, *version, *classifier, *kind)?
                    .with_filename(*filename))
            }
            other => Err(invalid(&format!(
                "expected 5 or 6 segments after the scheme, found {}",
                other.len()
            ))),
        }
    }
}

fn ensure_non_empty(segments: &[&str]) -> Result<(), ()> {
    if segments.iter().any(|s| s.trim().is_empty()) {
        Err(())
    } else {
        Ok(())
    }
}
