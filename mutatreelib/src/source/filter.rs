//! Whitelist/blacklist filtering by package name or path fragment.
//!
//! A filter token is either a *path token* (it contains `/` or `\`), which
//! matches any file whose path contains it verbatim, or a *package token*
//! such as `com.example.foo`, which matches files whose directory structure
//! contains the segments `com/example/foo` as whole components. The latter
//! keeps `com.example.foo` from matching `com/example/foobar`.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::options::FilterMode;
use crate::source::FileSet;

/// A filter mode plus the tokens it applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub mode: FilterMode,
    #[serde(default)]
    pub tokens: Vec<String>,
}

impl FilterSpec {
    /// Create a filter with the given mode and tokens.
    pub fn new<I, S>(mode: FilterMode, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode,
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Keep only files matched by one of `tokens`.
    pub fn whitelist<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(FilterMode::Whitelist, tokens)
    }

    /// Drop files matched by any of `tokens`.
    pub fn blacklist<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(FilterMode::Blacklist, tokens)
    }

    /// Apply the filter to a file set.
    pub fn apply(&self, files: FileSet) -> FileSet {
        filter_files(files, self.mode, &self.tokens)
    }
}

/// A classified filter token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterToken<'a> {
    /// Raw path fragment, matched as a substring
    Path(&'a str),
    /// Dotted package name, matched against whole path components
    Package(Vec<&'a str>),
}

impl<'a> FilterToken<'a> {
    /// Classify a raw token. Blank package tokens yield `None`.
    pub fn classify(token: &'a str) -> Option<Self> {
        if token.contains(['/', '\\']) {
            return Some(FilterToken::Path(token));
        }

        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(FilterToken::Package(trimmed.split('.').collect()))
    }

    /// Check whether `path` is matched by this token.
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            FilterToken::Path(fragment) => path.to_string_lossy().contains(fragment),
            FilterToken::Package(segments) => contains_segments(path, segments),
        }
    }
}

/// Whether `segments` occur as a contiguous run of `path`'s components.
fn contains_segments(path: &Path, segments: &[&str]) -> bool {
    let components: Vec<_> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name),
            _ => None,
        })
        .collect();

    if segments.len() > components.len() {
        return false;
    }

    components
        .windows(segments.len())
        .any(|window| window.iter().zip(segments).all(|(c, s)| **c == **s))
}

/// Filter a file set by package and path tokens.
///
/// With no tokens the input is returned as is. Otherwise every file matched
/// by at least one token forms the matched set; `Whitelist` keeps exactly
/// those files and `Blacklist` keeps the rest.
pub fn filter_files<S: AsRef<str>>(files: FileSet, mode: FilterMode, tokens: &[S]) -> FileSet {
    if tokens.is_empty() {
        return files;
    }

    let tokens: Vec<FilterToken<'_>> = tokens
        .iter()
        .filter_map(|t| FilterToken::classify(t.as_ref()))
        .collect();

    let matched: BTreeSet<&PathBuf> = files
        .iter()
        .filter(|path| tokens.iter().any(|t| t.matches(path)))
        .collect();

    let result: FileSet = match mode {
        FilterMode::Whitelist => matched.into_iter().cloned().collect(),
        FilterMode::Blacklist => files
            .iter()
            .filter(|path| !matched.contains(path))
            .cloned()
            .collect(),
    };

    debug!(
        %mode,
        before = files.len(),
        after = result.len(),
        "filtered source files"
    );

    result
}
