//! Writing originals, variants, and density reports into the output tree.
//!
//! Every file is first written in full to a temporary file inside the entry
//! directory and then moved into place with a no-clobber rename, so a failed
//! write never leaves a truncated `original.<ext>` or `<n>.<ext>` behind.
//! If `<n>.<ext>` is already taken the writer moves on to `n + 1`. A new
//! variant thus always gets the smallest free index, and two writers racing
//! on the same entry can never overwrite each other's files.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::MutatreeError;
use crate::output::density::{write_density, DensityMap};
use crate::output::entry::MirroredEntry;
use crate::Result;

/// Extension used when an original file has none.
pub const DEFAULT_EXTENSION: &str = "java";

/// Writes generated variants into a tree mirroring the source root.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    source_root: PathBuf,
    output_root: PathBuf,
    extension: Option<String>,
    verbose: bool,
}

impl OutputWriter {
    /// Create a writer mirroring `source_root` under `output_root`.
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
            extension: None,
            verbose: false,
        }
    }

    /// Use a fixed extension instead of the original's own.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Log every generated file at info level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// The mirrored entry that `original` writes into.
    pub fn entry_for(&self, original: impl AsRef<Path>) -> Result<MirroredEntry> {
        let original = original.as_ref();
        let extension = match &self.extension {
            Some(ext) => ext.clone(),
            None => original
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
        };

        MirroredEntry::locate(&self.source_root, &self.output_root, original, extension)
    }

    /// Write one generated variant of `original`.
    ///
    /// On first use for an original this creates its entry directory and
    /// copies the original verbatim into `original.<ext>`; later calls leave
    /// that copy alone. A non-empty `density` replaces the entry's density
    /// report. `content` goes into the lowest-numbered free `<n>.<ext>`.
    ///
    /// Returns the variant's path relative to the output root.
    pub fn write(
        &self,
        original: impl AsRef<Path>,
        content: &str,
        density: Option<&DensityMap>,
    ) -> Result<PathBuf> {
        let original = original.as_ref();
        let entry = self.entry_for(original)?;

        fs::create_dir_all(entry.dir()).map_err(|source| MutatreeError::FileWrite {
            path: entry.dir().to_path_buf(),
            source,
        })?;

        if preserve_original(original, &entry)? {
            debug!(original = %original.display(), "preserved original");
        }

        if let Some(density) = density.filter(|d| !d.is_empty()) {
            write_density(&entry.density_path(), density)?;
        }

        let staged = stage(entry.dir(), |file| file.write_all(content.as_bytes()))?;
        let index = claim_variant(&entry, staged)?;
        let target = entry.variant_path(index);

        if self.verbose {
            info!(file = %target.display(), "generated file");
        }

        Ok(entry.relative_dir().join(entry.variant_name(index)))
    }
}

/// Copy `original` into the entry unless a preserved copy already exists.
///
/// Returns whether a copy was made.
fn preserve_original(original: &Path, entry: &MirroredEntry) -> Result<bool> {
    let target = entry.original_path();
    if target.exists() {
        return Ok(false);
    }

    let bytes = fs::read(original).map_err(|source| MutatreeError::FileRead {
        path: original.to_path_buf(),
        source,
    })?;
    let staged = stage(entry.dir(), |file| file.write_all(&bytes))?;

    // Another writer may have published its copy since the check above
    Ok(publish(staged, &target)?.is_ok())
}

/// Claim the lowest free variant index of `entry` for `staged`.
fn claim_variant(entry: &MirroredEntry, mut staged: NamedTempFile) -> Result<u32> {
    let mut index = 1;
    loop {
        match publish(staged, &entry.variant_path(index))? {
            Ok(()) => return Ok(index),
            Err(back) => {
                staged = back;
                index += 1;
            }
        }
    }
}

/// Write a file in full inside `dir` without making it visible yet.
///
/// If `fill` fails the temporary file is removed.
fn stage<F>(dir: &Path, fill: F) -> Result<NamedTempFile>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let write_error = |source| MutatreeError::FileWrite {
        path: dir.to_path_buf(),
        source,
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(write_error)?;
    fill(staged.as_file_mut()).map_err(write_error)?;
    Ok(staged)
}

/// Move a staged file to `target` unless something already exists there.
///
/// An occupied target hands the staged file back.
fn publish(
    staged: NamedTempFile,
    target: &Path,
) -> Result<std::result::Result<(), NamedTempFile>> {
    match staged.persist_noclobber(target) {
        Ok(_) => Ok(Ok(())),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(Err(e.file)),
        Err(e) => Err(MutatreeError::FileWrite {
            path: target.to_path_buf(),
            source: e.error,
        }),
    }
}
