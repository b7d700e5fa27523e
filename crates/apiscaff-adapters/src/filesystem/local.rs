//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use apiscaff_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ScaffError, ScaffResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> ScaffResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> ScaffResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> ScaffResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ScaffError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let out = dir.path().join("src/main/mule");

        fs.create_dir_all(&out).unwrap();
        fs.write_file(&out.join("api.xml"), b"<mule/>").unwrap();

        assert!(fs.exists(&out.join("api.xml")));
        assert_eq!(fs.read_to_string(&out.join("api.xml")).unwrap(), "<mule/>");
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let file = dir.path().join("api.xml");

        fs.write_file(&file, b"old").unwrap();
        fs.write_file(&file, b"new").unwrap();

        assert_eq!(fs.read_to_string(&file).unwrap(), "new");
    }

    #[test]
    fn reading_missing_file_is_a_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFilesystem::new()
            .read_to_string(&dir.path().join("missing.json"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
