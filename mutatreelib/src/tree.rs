//! High-level source tree API.
//!
//! [`SourceTree`] ties the pipeline together: discover the files under a
//! source root, narrow them with a filter, and write mutants of them into an
//! output tree under the build directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::MutatreeError;
use crate::options::DiscoverOptions;
use crate::output::{DensityMap, MirroredEntry, OutputWriter};
use crate::source::{discover_files, read_source, FileSet, FilterSpec};
use crate::Result;

/// Name of the output directory created under the build path.
pub const OUTPUT_DIR_NAME: &str = "mutatree-results";

/// The discovered source files of a project and the output tree their
/// mutants are written to.
///
/// Writes for different originals touch disjoint directories and may run in
/// parallel. Writes for the same original may too: variant numbers are
/// claimed atomically.
#[derive(Debug, Clone)]
pub struct SourceTree {
    files: FileSet,
    writer: OutputWriter,
}

impl SourceTree {
    /// Discover source files and prepare the output tree.
    ///
    /// This:
    /// 1. Collects every file under `source_root` matching `options.pattern`
    /// 2. Applies `options.filter`, if any
    /// 3. Creates `<build_path>/mutatree-results` if it does not exist
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use mutatreelib::{DiscoverOptions, FilterSpec, SourceTree};
    ///
    /// let options = DiscoverOptions::new()
    ///     .filter(FilterSpec::blacklist(["com.example.generated"]));
    /// let tree = SourceTree::discover("src/main/java", "target", &options)?;
    /// for file in tree.files() {
    ///     let text = tree.read_source(file)?;
    ///     // ... generate mutants of `text` ...
    /// }
    /// ```
    pub fn discover(
        source_root: impl AsRef<Path>,
        build_path: impl AsRef<Path>,
        options: &DiscoverOptions,
    ) -> Result<Self> {
        let source_root = source_root.as_ref();
        let mut files = discover_files(source_root, &options.pattern)?;

        if let Some(filter) = &options.filter {
            files = filter.apply(files);
        }

        let output_root = build_path.as_ref().join(OUTPUT_DIR_NAME);
        fs::create_dir_all(&output_root).map_err(|source| MutatreeError::FileWrite {
            path: output_root.clone(),
            source,
        })?;

        let writer = OutputWriter::new(source_root, output_root).verbose(options.verbose);

        Ok(Self { files, writer })
    }

    pub fn source_root(&self) -> &Path {
        self.writer.source_root()
    }

    pub fn output_root(&self) -> &Path {
        self.writer.output_root()
    }

    /// The current working set.
    pub fn files(&self) -> &FileSet {
        &self.files
    }

    /// Narrow the working set further.
    pub fn apply_filter(&mut self, filter: &FilterSpec) {
        self.files = filter.apply(std::mem::take(&mut self.files));
    }

    /// The writer used by [`write_variant`](Self::write_variant).
    pub fn writer(&self) -> &OutputWriter {
        &self.writer
    }

    /// Read a source file as text, replacing undecodable bytes.
    pub fn read_source(&self, path: impl AsRef<Path>) -> Result<String> {
        read_source(path)
    }

    /// The output directory belonging to `original`.
    pub fn entry_for(&self, original: impl AsRef<Path>) -> Result<MirroredEntry> {
        self.writer.entry_for(original)
    }

    /// Write one mutant of `original`; see [`OutputWriter::write`].
    pub fn write_variant(
        &self,
        original: impl AsRef<Path>,
        content: &str,
        density: Option<&DensityMap>,
    ) -> Result<PathBuf> {
        self.writer.write(original, content, density)
    }
}
