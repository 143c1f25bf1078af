//! # mutatreelib
//!
//! Source tree management for mutation testing pipelines.
//!
//! ## Overview
//!
//! A mutation tool needs three things from the file system before and after
//! it generates mutants: the list of source files to mutate, a way to narrow
//! that list to the packages the user cares about, and a place to put every
//! generated mutant without clobbering earlier ones. This library provides
//! those three stages and leaves the mutation logic itself to the caller:
//!
//! - **Discovery**: Walk a source root collecting files that match a glob
//! - **Filtering**: Whitelist or blacklist by package name (`com.example.foo`)
//!   or by path fragment (`foo/Bar.java`)
//! - **Output**: Mirror each original under an output root, keep a pristine
//!   copy of it, and number its mutants `1.java`, `2.java`, ...
//!
//! Package filters match whole directory names, so `com.example.foo` never
//! picks up `com/example/foobar`. Mutant numbers always take the lowest free
//! index and are claimed atomically, so concurrent writers cannot overwrite
//! one another.
//!
//! ## Example
//!
//! ```rust
//! use mutatreelib::{DiscoverOptions, FilterSpec, SourceTree};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! // Set up a small project
//! let dir = tempdir().unwrap();
//! let src = dir.path().join("src");
//! fs::create_dir_all(src.join("pkg")).unwrap();
//! fs::create_dir_all(src.join("other")).unwrap();
//! fs::write(src.join("pkg/A.java"), "class A {}").unwrap();
//! fs::write(src.join("other/C.java"), "class C {}").unwrap();
//!
//! // Discover everything except the `pkg` package
//! let options = DiscoverOptions::new().filter(FilterSpec::blacklist(["pkg"]));
//! let tree = SourceTree::discover(&src, dir.path(), &options).unwrap();
//! assert_eq!(tree.files().len(), 1);
//!
//! // Write a mutant of C.java
//! let original = src.join("other/C.java");
//! let rel = tree.write_variant(&original, "class C { }", None).unwrap();
//! assert_eq!(rel, std::path::Path::new("other/C.java/1.java"));
//! ```

pub mod error;
pub mod options;
pub mod output;
pub mod source;
pub mod tree;

pub use error::MutatreeError;
pub use options::{DiscoverOptions, FilterMode, DEFAULT_PATTERN};
pub use output::{DensityMap, MirroredEntry, OutputWriter};
pub use source::{discover_files, filter_files, read_source, FileSet, FilterSpec, FilterToken};
pub use tree::{SourceTree, OUTPUT_DIR_NAME};

/// Result type for mutatreelib operations
pub type Result<T> = std::result::Result<T, MutatreeError>;
