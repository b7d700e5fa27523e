//! Domain value objects: RuntimeEdition, ArchiveMode.
//!
//! Pure value types: `Copy` (or cheap `Clone`), equality-by-value, parsed
//! from strings with `FromStr`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── RuntimeEdition ───────────────────────────────────────────────────────────

/// Edition of the integration runtime the generated flows target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuntimeEdition {
    #[default]
    Ee,
    Ce,
}

impl RuntimeEdition {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ee => "EE",
            Self::Ce => "CE",
        }
    }
}

impl fmt::Display for RuntimeEdition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeEdition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EE" => Ok(Self::Ee),
            "CE" => Ok(Self::Ce),
            other => Err(DomainError::InvalidRuntimeEdition(other.to_string())),
        }
    }
}

// ── ArchiveMode ──────────────────────────────────────────────────────────────

/// How a resolved archive is turned into an [`ApiReference`](crate::domain::ApiReference).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ArchiveMode {
    /// Read the manifest entry and reference the main document in place.
    #[default]
    Manifest,
    /// Unpack the whole archive into `destination` and reference the
    /// canonical API file there.
    Extract { destination: PathBuf },
}

impl fmt::Display for ArchiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manifest => f.write_str("manifest"),
            Self::Extract { destination } => write!(f, "extract ({})", destination.display()),
        }
    }
}
