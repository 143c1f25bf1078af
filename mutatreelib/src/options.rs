//! Input options for discovery and filtering.
//!
//! This module contains the configuration types that control which files
//! end up in the working set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MutatreeError;
use crate::source::FilterSpec;

/// Glob used when no pattern is configured.
pub const DEFAULT_PATTERN: &str = "*.java";

/// How the tokens of a [`FilterSpec`] are applied to the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Keep only files matched by at least one token
    Whitelist,
    /// Drop every file matched by at least one token
    #[default]
    Blacklist,
}

impl FromStr for FilterMode {
    type Err = MutatreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whitelist" => Ok(FilterMode::Whitelist),
            "blacklist" => Ok(FilterMode::Blacklist),
            _ => Err(MutatreeError::InvalidFilterMode(s.to_string())),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::Whitelist => f.write_str("whitelist"),
            FilterMode::Blacklist => f.write_str("blacklist"),
        }
    }
}

/// Options for [`SourceTree::discover`](crate::SourceTree::discover).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverOptions {
    /// Glob matched against file names
    pub pattern: String,
    /// Filter applied right after discovery
    pub filter: Option<FilterSpec>,
    /// Emit a trace line for each generated file
    pub verbose: bool,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            filter: None,
            verbose: false,
        }
    }
}

impl DiscoverOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file name glob.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Narrow the discovered files with a filter.
    pub fn filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Enable the per-variant trace line.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_mode_from_str() {
        assert_eq!(
            "whitelist".parse::<FilterMode>().unwrap(),
            FilterMode::Whitelist
        );
        assert_eq!(
            "BlackList".parse::<FilterMode>().unwrap(),
            FilterMode::Blacklist
        );
    }

    #[test]
    fn test_filter_mode_rejects_unknown() {
        let err = "greylist".parse::<FilterMode>().unwrap_err();
        assert!(matches!(err, MutatreeError::InvalidFilterMode(ref m) if m == "greylist"));
    }

    #[test]
    fn test_filter_mode_display_roundtrips() {
        for mode in [FilterMode::Whitelist, FilterMode::Blacklist] {
            assert_eq!(mode.to_string().parse::<FilterMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_discover_options_defaults() {
        let options = DiscoverOptions::new();
        assert_eq!(options.pattern, "*.java");
        assert!(options.filter.is_none());
        assert!(!options.verbose);
    }

    #[test]
    fn test_discover_options_builder() {
        let options = DiscoverOptions::new()
            .pattern("*.kt")
            .filter(FilterSpec::whitelist(["com.example"]))
            .verbose(true);

        assert_eq!(options.pattern, "*.kt");
        assert_eq!(options.filter.unwrap().mode, FilterMode::Whitelist);
        assert!(options.verbose);
    }

    #[test]
    fn test_discover_options_deserialize_partial() {
        let options: DiscoverOptions =
            serde_json::from_str(r#"{"filter": {"mode": "whitelist", "tokens": ["pkg"]}}"#)
                .unwrap();

        assert_eq!(options.pattern, DEFAULT_PATTERN);
        let filter = options.filter.unwrap();
        assert_eq!(filter.mode, FilterMode::Whitelist);
        assert_eq!(filter.tokens, vec!["pkg".to_string()]);
    }
}
