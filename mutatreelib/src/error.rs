//! Error types for mutatreelib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering sources or writing mutants
#[derive(Error, Debug)]
pub enum MutatreeError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create or write a file or directory
    #[error("failed to write '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Source root does not exist or is not a directory
    #[error("source root does not exist or is not a directory: {0}")]
    SourceRootNotFound(PathBuf),

    /// A file handed to the output writer does not live under the source root
    #[error("'{path}' is not under source root '{root}'")]
    OutsideSourceRoot { path: PathBuf, root: PathBuf },

    /// Directory traversal failed part-way
    #[error("failed to traverse '{path}': {message}")]
    Walk { path: PathBuf, message: String },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Filter mode other than whitelist/blacklist
    #[error("invalid filter mode '{0}': expected 'whitelist' or 'blacklist'")]
    InvalidFilterMode(String),

    /// Malformed line in a density report
    #[error("invalid density entry on line {line}: '{content}'")]
    InvalidDensity { line: usize, content: String },

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
