//! Layout of a single original file's output directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::MutatreeError;
use crate::Result;

/// File stem of the preserved original.
pub const ORIGINAL_STEM: &str = "original";

/// File name of the density report.
pub const DENSITY_FILE: &str = "density.csv";

/// The directory in the output tree that belongs to one original file.
///
/// For `<source root>/com/example/Foo.java` this is
/// `<output root>/com/example/Foo.java/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirroredEntry {
    dir: PathBuf,
    relative: PathBuf,
    extension: String,
}

impl MirroredEntry {
    /// Locate the entry for `original`, which must live under `source_root`.
    ///
    /// Nothing is created on disk.
    pub fn locate(
        source_root: &Path,
        output_root: &Path,
        original: &Path,
        extension: impl Into<String>,
    ) -> Result<Self> {
        let outside = || MutatreeError::OutsideSourceRoot {
            path: original.to_path_buf(),
            root: source_root.to_path_buf(),
        };

        let relative = original.strip_prefix(source_root).map_err(|_| outside())?;
        if relative.file_name().is_none() {
            return Err(outside());
        }

        Ok(Self {
            dir: output_root.join(relative),
            relative: relative.to_path_buf(),
            extension: extension.into(),
        })
    }

    /// Absolute location of the entry directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the entry directory relative to the output root.
    pub fn relative_dir(&self) -> &Path {
        &self.relative
    }

    /// Extension used for the original copy and the variants.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn original_path(&self) -> PathBuf {
        self.dir.join(self.file_name(ORIGINAL_STEM))
    }

    pub fn density_path(&self) -> PathBuf {
        self.dir.join(DENSITY_FILE)
    }

    /// Path of variant number `index`.
    pub fn variant_path(&self, index: u32) -> PathBuf {
        self.dir.join(self.variant_name(index))
    }

    /// File name of variant number `index`, e.g. `3.java`.
    pub fn variant_name(&self, index: u32) -> String {
        self.file_name(&index.to_string())
    }

    /// Indices of the variants currently on disk, ascending.
    ///
    /// A missing entry directory yields an empty list.
    pub fn variants(&self) -> Result<Vec<u32>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(MutatreeError::FileRead {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut indices = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            if let Some(index) = self.parse_variant_name(&name.to_string_lossy()) {
                indices.push(index);
            }
        }

        indices.sort_unstable();
        Ok(indices)
    }

    fn parse_variant_name(&self, name: &str) -> Option<u32> {
        let stem = if self.extension.is_empty() {
            name
        } else {
            name.strip_suffix(self.extension.as_str())?
                .strip_suffix('.')?
        };
        let index: u32 = stem.parse().ok()?;
        // Reject "01.java" and friends, which would alias "1.java"
        (index > 0 && index.to_string() == stem).then_some(index)
    }

    fn file_name(&self, stem: &str) -> String {
        if self.extension.is_empty() {
            stem.to_string()
        } else {
            format!("{stem}.{}", self.extension)
        }
    }
}
