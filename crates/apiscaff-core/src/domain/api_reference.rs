//! Addressable references to an API description.
//!
//! Every specification handed to the parser port is addressed by an
//! [`ApiReference`]: either a plain file found on disk, or a document that
//! lives inside a packaged archive.

use std::fmt;
use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// URI scheme prefix for documents inside an archive.
pub const ARCHIVE_SCHEME: &str = "jar:file:";

/// Separator between the archive path and the in-archive entry.
pub const ENTRY_SEPARATOR: &str = "!/";

/// Name of the manifest entry inside a packaged API archive.
pub const MANIFEST_ENTRY: &str = "exchange.json";

/// Manifest key naming the main document.
pub const MAIN_KEY: &str = "main";

/// Extension of API description files.
pub const API_EXTENSION: &str = "raml";

/// Name every API description file gets when an archive is unpacked.
pub const CANONICAL_API_FILE: &str = "api.raml";

/// Bytes escaped in the path part of a URI. Non-ASCII is always escaped.
const PATH_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

fn encode_path(path: &str) -> String {
    utf8_percent_encode(&path.replace('\\', "/"), PATH_ESCAPES).to_string()
}

/// Location of one API description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ApiReference {
    /// A specification file on the local filesystem.
    File { path: PathBuf },
    /// An entry inside a zip archive.
    Archive { archive: PathBuf, entry: String },
}

impl ApiReference {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    pub fn in_archive(archive: impl Into<PathBuf>, entry: impl Into<String>) -> Self {
        Self::Archive {
            archive: archive.into(),
            entry: entry.into(),
        }
    }

    /// URI form handed to downstream tooling, percent-encoded.
    ///
    /// - `file:///abs/path/api.raml`
    /// - `jar:file:/abs/path/bundle.zip!/api.raml`
    pub fn uri(&self) -> String {
        match self {
            Self::File { path } => {
                let path = encode_path(&path.to_string_lossy());
                if path.starts_with('/') {
                    format!("file://{path}")
                } else {
                    format!("file:///{path}")
                }
            }
            Self::Archive { archive, entry } => format!(
                "{ARCHIVE_SCHEME}{}{ENTRY_SEPARATOR}{}",
                encode_path(&archive.to_string_lossy()),
                encode_path(entry.trim_start_matches('/'))
            ),
        }
    }

    /// The document's own file name, e.g. `orders.raml`.
    pub fn document_name(&self) -> Option<&str> {
        match self {
            Self::File { path } => path.file_name().and_then(|n| n.to_str()),
            Self::Archive { entry, .. } => entry.rsplit('/').find(|s| !s.is_empty()),
        }
    }

    /// Document name without its extension, used to name generated output.
    pub fn stem(&self) -> Option<&str> {
        let name = self.document_name()?;
        Some(Path::new(name).file_stem()?.to_str().unwrap_or(name))
    }
}

impl fmt::Display for ApiReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}

// ── Manifest lookup ───────────────────────────────────────────────────────────

/// Result of looking up an archive's main document through its manifest.
///
/// Lookup never fails the run: an absent reference keeps the reason so the
/// caller can tell a missing manifest from a corrupt archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLookup {
    Found(ApiReference),
    Absent(LookupFailure),
}

impl ManifestLookup {
    pub fn reference(&self) -> Option<&ApiReference> {
        match self {
            Self::Found(reference) => Some(reference),
            Self::Absent(_) => None,
        }
    }

    pub fn into_reference(self) -> Option<ApiReference> {
        match self {
            Self::Found(reference) => Some(reference),
            Self::Absent(_) => None,
        }
    }
}

/// Why a manifest lookup produced no reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// The archive could not be opened or read.
    UnreadableArchive(String),
    /// The archive has no manifest entry.
    MissingManifest,
    /// The manifest is not a string-to-string mapping.
    MalformedManifest(String),
    /// The manifest has no `main` key.
    MissingMainKey,
    /// An unpacked archive held no API description file.
    NoApiDocument,
}

impl LookupFailure {
    /// `true` when the archive itself is damaged, as opposed to merely lacking a manifest.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::UnreadableArchive(_) | Self::MalformedManifest(_))
    }
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreadableArchive(reason) => write!(f, "archive could not be read: {reason}"),
            Self::MissingManifest => f.write_str("archive has no manifest entry"),
            Self::MalformedManifest(reason) => write!(f, "manifest is malformed: {reason}"),
            Self::MissingMainKey => f.write_str("manifest has no 'main' entry"),
            Self::NoApiDocument => write!(f, "archive holds no .{API_EXTENSION} document"),
        }
    }
}
