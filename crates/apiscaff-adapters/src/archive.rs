//! Zip archive introspection for packaged API descriptions.
//!
//! Two modes:
//! - manifest lookup: read `exchange.json` and reference its `main` entry in place
//! - full extraction: unpack every entry, renaming API description files to
//!   the canonical name

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Component, Path, PathBuf};

use apiscaff_core::{
    application::{ApplicationError, ports::ArchiveLocator},
    domain::{
        ApiReference, LookupFailure, ManifestLookup,
        api_reference::{API_EXTENSION, CANONICAL_API_FILE, MAIN_KEY, MANIFEST_ENTRY},
    },
    error::ScaffResult,
};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};
use zip::ZipArchive;

/// Chunk size used when copying entries to disk.
const COPY_BUFFER_SIZE: usize = 4096;

/// Errors arising from archive extraction.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("archive I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// An entry name escapes the destination directory.
    #[error("path traversal detected: {path}")]
    PathTraversal { path: String },
}

/// [`ArchiveLocator`] for zip archives.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveLocator;

impl ZipArchiveLocator {
    pub fn new() -> Self {
        Self
    }

    fn read_main_entry(archive: &Path) -> Result<String, LookupFailure> {
        let file = File::open(archive).map_err(|e| LookupFailure::UnreadableArchive(e.to_string()))?;
        let mut zip =
            ZipArchive::new(file).map_err(|e| LookupFailure::UnreadableArchive(e.to_string()))?;

        let manifest = match zip.by_name(MANIFEST_ENTRY) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => return Err(LookupFailure::MissingManifest),
            Err(e) => return Err(LookupFailure::UnreadableArchive(e.to_string())),
        };

        let mapping: Map<String, Value> = serde_json::from_reader(manifest)
            .map_err(|e| LookupFailure::MalformedManifest(e.to_string()))?;

        match mapping.get(MAIN_KEY) {
            Some(Value::String(main)) if !main.trim().is_empty() => Ok(main.clone()),
            Some(Value::String(_)) | None => Err(LookupFailure::MissingMainKey),
            Some(other) => Err(LookupFailure::MalformedManifest(format!(
                "'{MAIN_KEY}' must be a string, found {other}"
            ))),
        }
    }

    fn unpack(archive: &Path, destination: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
        let mut zip = ZipArchive::new(File::open(archive)?)?;
        let mut written = Vec::with_capacity(zip.len());

        for index in 0..zip.len() {
            let mut entry = zip.by_index(index)?;
            let name = PathBuf::from(entry.name());
            validate_entry_path(&name)?;

            let target = destination.join(&name);
            if entry.is_dir() {
                std::fs::create_dir_all(&target)?;
                continue;
            }
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let target = canonical_target(target);
            copy_entry(&mut entry, &target)?;
            debug!(entry = %name.display(), target = %target.display(), "Entry extracted");
            written.push(target);
        }

        Ok(written)
    }
}

impl ArchiveLocator for ZipArchiveLocator {
    #[instrument(skip_all, fields(archive = %archive.display()))]
    fn locate_main(&self, archive: &Path) -> ManifestLookup {
        match Self::read_main_entry(archive) {
            Ok(main) => {
                debug!(main = %main, "Manifest main entry found");
                ManifestLookup::Found(ApiReference::in_archive(archive, main))
            }
            Err(failure) => {
                warn!(reason = %failure, "Manifest lookup failed");
                ManifestLookup::Absent(failure)
            }
        }
    }

    #[instrument(skip_all, fields(archive = %archive.display(), destination = %destination.display()))]
    fn extract_all(&self, archive: &Path, destination: &Path) -> ScaffResult<Vec<PathBuf>> {
        Self::unpack(archive, destination).map_err(|e| {
            ApplicationError::ArchiveError {
                path: archive.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// API description files land under the canonical name, in the same directory.
fn canonical_target(target: PathBuf) -> PathBuf {
    let is_api = target
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == API_EXTENSION);
    if is_api {
        target.with_file_name(CANONICAL_API_FILE)
    } else {
        target
    }
}

fn copy_entry(entry: &mut impl Read, target: &Path) -> Result<(), ArchiveError> {
    let mut out = File::create(target)?;
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    loop {
        let read = entry.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        out.write_all(&buffer[..read])?;
    }
    out.flush()?;
    Ok(())
}

/// Reject entry names that are absolute or climb out with `..`.
fn validate_entry_path(path: &Path) -> Result<(), ArchiveError> {
    let escapes = path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes {
        return Err(ArchiveError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    Ok(())
}
