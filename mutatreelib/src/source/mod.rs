//! Source discovery: find the files to mutate.
//!
//! This module handles the first stage of the pipeline - building the working
//! set of source files. It provides:
//!
//! - **Discovery**: Walk a source root collecting files that match a glob
//! - **Filtering**: Whitelist or blacklist files by package or path fragment
//!
//! ## Example
//!
//! ```rust,ignore
//! use mutatreelib::source::{discover_files, FilterSpec};
//!
//! let files = discover_files("src/main/java", "*.java")?;
//! let files = FilterSpec::blacklist(["com.example.generated"]).apply(files);
//! ```

pub mod discovery;
pub mod fileset;
pub mod filter;

pub use discovery::{discover_files, read_source};
pub use fileset::FileSet;
pub use filter::{filter_files, FilterSpec, FilterToken};
