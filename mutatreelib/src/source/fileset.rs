//! The working set of source files.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Deduplicated collection of source file paths.
///
/// Iteration is sorted by path, so it is deterministic but carries no
/// meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileSet {
    paths: BTreeSet<PathBuf>,
}

impl FileSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files in the set.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Whether `path` is part of the set.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.paths.contains(path.as_ref())
    }

    /// Iterate over the paths in sorted order.
    pub fn iter(&self) -> btree_set::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    /// Consume the set and return its paths, sorted.
    pub fn into_vec(self) -> Vec<PathBuf> {
        self.paths.into_iter().collect()
    }
}

impl FromIterator<PathBuf> for FileSet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FileSet {
    type Item = PathBuf;
    type IntoIter = btree_set::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a PathBuf;
    type IntoIter = btree_set::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
