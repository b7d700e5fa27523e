//! Glob-based file discovery with ant-style patterns.
//!
//! `*` stays inside one path segment and `**` spans any number of them.
//! Patterns are matched against the path relative to the query root.

use std::path::Path;

use apiscaff_core::{
    application::{ApplicationError, ports::FileMatcher},
    domain::{FileSet, GlobQuery},
    error::ScaffResult,
};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, instrument};
use walkdir::WalkDir;

/// Pattern used when a query has no includes.
const MATCH_ALL: &str = "**";

/// [`FileMatcher`] backed by `walkdir` and `globset`.
///
/// Directories are visited in file-name order; the matches keep that order.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobFileMatcher;

impl GlobFileMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl FileMatcher for GlobFileMatcher {
    #[instrument(skip_all, fields(root = %query.root().display()))]
    fn matches(&self, query: &GlobQuery) -> ScaffResult<FileSet> {
        let includes = if query.includes().is_empty() {
            compile_globset(&[MATCH_ALL.to_string()])?
        } else {
            compile_globset(query.includes())?
        };
        let excludes = compile_globset(query.excludes())?;

        let root = std::path::absolute(query.root()).map_err(|e| {
            ApplicationError::FilesystemError {
                path: query.root().to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        if !root.is_dir() {
            debug!("Root is not a directory, nothing to match");
            return Ok(FileSet::default());
        }

        let mut matched = Vec::new();
        for entry in WalkDir::new(&root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: e.path().unwrap_or(&root).to_path_buf(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
            if is_selected(relative, &includes, &excludes) {
                matched.push(entry.into_path());
            }
        }

        debug!(count = matched.len(), "Files matched");
        Ok(FileSet::new(matched))
    }
}

/// Excludes always win over includes.
fn is_selected(relative: &Path, includes: &GlobSet, excludes: &GlobSet) -> bool {
    includes.is_match(relative) && !excludes.is_match(relative)
}

fn compile_globset(patterns: &[String]) -> ScaffResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| ApplicationError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.kind().to_string(),
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| {
        ApplicationError::InvalidPattern {
            pattern: patterns.join(", "),
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "x").unwrap();
        path
    }

    #[test]
    fn matches_api_files_but_not_outside_the_api_folder() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let hello = touch(root, "src/main/resources/api/hello.raml");
        let bye = touch(root, "src/main/resources/api/bye.yml");
        let wow = touch(root, "src/main/resources/api/lala/wow.raml");
        touch(root, "src/main/dont-read.raml");

        let query = GlobQuery::new(
            root,
            ["src/main/resources/api/**/*.raml", "src/main/resources/api/**/*.yml"],
            Vec::<String>::new(),
        );
        let found = GlobFileMatcher::new().matches(&query).unwrap();

        assert_eq!(found.len(), 3);
        for path in [&hello, &bye, &wow] {
            assert!(found.contains(path), "missing {}", path.display());
        }
    }

    #[test]
    fn excludes_win_over_includes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "api/hello.raml");
        let skipped = touch(root, "api/draft/hello.raml");

        let query = GlobQuery::new(root, ["api/**/*.raml"], ["api/draft/**"]);
        let found = GlobFileMatcher::new().matches(&query).unwrap();

        assert_eq!(found.len(), 1);
        assert!(!found.contains(&skipped));
    }

    #[test]
    fn single_star_does_not_cross_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let top = touch(root, "domain.xml");
        touch(root, "nested/other.xml");

        let found = GlobFileMatcher::new()
            .matches(&GlobQuery::domain_descriptors(root))
            .unwrap();

        assert_eq!(found.into_vec(), vec![top]);
    }

    #[test]
    fn results_are_absolute() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.xml");

        let found = GlobFileMatcher::new()
            .matches(&GlobQuery::domain_descriptors(dir.path()))
            .unwrap();

        assert!(found.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn missing_root_matches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let found = GlobFileMatcher::new()
            .matches(&GlobQuery::domain_descriptors(dir.path().join("absent")))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let query = GlobQuery::new(dir.path(), ["api/[*.raml"], Vec::<String>::new());
        let err = GlobFileMatcher::new().matches(&query).unwrap_err();
        assert!(err.to_string().contains("api/[*.raml"));
    }

    #[test]
    fn sibling_order_follows_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let b = touch(dir.path(), "b.xml");
        let a = touch(dir.path(), "a.xml");

        let found = GlobFileMatcher::new()
            .matches(&GlobQuery::domain_descriptors(dir.path()))
            .unwrap();

        assert_eq!(found.into_vec(), vec![a, b]);
    }
}
