//! File sets: the result of matching include/exclude globs under a root.

use std::path::{Path, PathBuf};

/// Folder holding API specifications inside a project.
pub const SPEC_FOLDER: &str = "src/main/resources/api";

/// Extensions recognised as API specification files.
pub const SPEC_EXTENSIONS: [&str; 4] = ["yaml", "yml", "raml", "json"];

/// Default include patterns for existing configuration documents.
pub const CONFIG_DOCUMENT_INCLUDES: [&str; 2] = ["src/main/mule/**/*.xml", "src/main/resources/**/*.xml"];

/// Domain descriptors sit directly under the domain root.
pub const DOMAIN_INCLUDE: &str = "*.xml";

/// A root directory plus the globs to evaluate under it.
///
/// Patterns use ant-style wildcards relative to `root`: `*` stays inside one
/// path segment, `**` spans any number of segments. Excludes win over includes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobQuery {
    root: PathBuf,
    includes: Vec<String>,
    excludes: Vec<String>,
}

impl GlobQuery {
    pub fn new(
        root: impl Into<PathBuf>,
        includes: impl IntoIterator<Item = impl Into<String>>,
        excludes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            root: root.into(),
            includes: includes.into_iter().map(Into::into).collect(),
            excludes: excludes.into_iter().map(Into::into).collect(),
        }
    }

    /// Specification files under `src/main/resources/api`.
    pub fn spec_files(root: impl Into<PathBuf>) -> Self {
        let includes = SPEC_EXTENSIONS.map(|ext| format!("{SPEC_FOLDER}/**/*.{ext}"));
        Self::new(root, includes, Vec::<String>::new())
    }

    /// Existing configuration documents under the conventional roots.
    pub fn config_documents(root: impl Into<PathBuf>) -> Self {
        Self::new(root, CONFIG_DOCUMENT_INCLUDES, Vec::<String>::new())
    }

    /// Domain descriptor candidates; never recurses.
    pub fn domain_descriptors(root: impl Into<PathBuf>) -> Self {
        Self::new(root, [DOMAIN_INCLUDE], Vec::<String>::new())
    }

    /// Replace the include patterns, keeping the root.
    pub fn with_includes(mut self, includes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.includes = includes.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the exclude patterns, keeping the root.
    pub fn with_excludes(mut self, excludes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excludes = excludes.into_iter().map(Into::into).collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
    pub fn includes(&self) -> &[String] {
        &self.includes
    }
    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }
}

/// Absolute paths in traversal order. Not sorted, not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet(Vec<PathBuf>);

impl FileSet {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self(paths)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<&PathBuf> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.0.iter().any(|p| p == path)
    }

    pub fn into_vec(self) -> Vec<PathBuf> {
        self.0
    }
}

impl IntoIterator for FileSet {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<PathBuf> for FileSet {
    fn from_iter<T: IntoIterator<Item = PathBuf>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Outcome of choosing a domain descriptor from the candidates found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainSelection {
    /// No candidate; the run proceeds without a domain.
    None,
    /// Exactly one candidate.
    Single(PathBuf),
    /// Several candidates; the first one returned by the matcher wins.
    Multiple { chosen: PathBuf, candidates: usize },
}

impl DomainSelection {
    pub fn from_candidates(candidates: FileSet) -> Self {
        let count = candidates.len();
        match candidates.into_iter().next() {
            None => Self::None,
            Some(chosen) if count == 1 => Self::Single(chosen),
            Some(chosen) => Self::Multiple {
                chosen,
                candidates: count,
            },
        }
    }

    pub fn chosen(&self) -> Option<&Path> {
        match self {
            Self::None => None,
            Self::Single(path) | Self::Multiple { chosen: path, .. } => Some(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_query_covers_all_extensions() {
        let q = GlobQuery::spec_files("/work");
        assert_eq!(q.includes().len(), 4);
        assert!(q.includes().contains(&"src/main/resources/api/**/*.raml".to_string()));
        assert!(q.excludes().is_empty());
    }

    #[test]
    fn domain_selection_none() {
        assert_eq!(
            DomainSelection::from_candidates(FileSet::default()),
            DomainSelection::None
        );
    }

    #[test]
    fn domain_selection_single() {
        let set = FileSet::new(vec![PathBuf::from("/d/mule-domain-config.xml")]);
        let sel = DomainSelection::from_candidates(set);
        assert_eq!(sel, DomainSelection::Single("/d/mule-domain-config.xml".into()));
    }

    #[test]
    fn domain_selection_multiple_picks_first() {
        let set = FileSet::new(vec![PathBuf::from("/d/b.xml"), PathBuf::from("/d/a.xml")]);
        let sel = DomainSelection::from_candidates(set);
        assert_eq!(sel.chosen(), Some(Path::new("/d/b.xml")));
        assert!(matches!(sel, DomainSelection::Multiple { candidates: 2, .. }));
    }
}
