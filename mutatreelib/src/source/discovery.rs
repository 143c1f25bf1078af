//! Source file discovery with glob pattern support.
//!
//! Walks a source root and collects every file whose name matches a glob,
//! the way a shell would expand `*.java` in each directory of the tree.

use std::fs;
use std::path::Path;

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::MutatreeError;
use crate::source::FileSet;
use crate::Result;

/// Compile a glob, mapping failures to [`MutatreeError::InvalidGlob`].
pub fn compile_pattern(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| MutatreeError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Discover source files under `root` whose file name matches `pattern`.
///
/// The root itself must be an existing, readable directory. Unreadable
/// entries deeper in the tree are skipped with a warning. Finding nothing is
/// not an error.
pub fn discover_files(root: impl AsRef<Path>, pattern: &str) -> Result<FileSet> {
    let root = root.as_ref();

    if !root.is_dir() {
        return Err(MutatreeError::SourceRootNotFound(root.to_path_buf()));
    }

    let pattern = compile_pattern(pattern)?;
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                return Err(MutatreeError::Walk {
                    path: root.to_path_buf(),
                    message: e.to_string(),
                });
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if pattern.matches(&name) {
            files.push(entry.into_path());
        }
    }

    let files: FileSet = files.into_iter().collect();
    debug!(root = %root.display(), count = files.len(), "discovered source files");

    Ok(files)
}

/// Read a source file as text.
///
/// Byte sequences that are not valid UTF-8 are replaced with U+FFFD rather
/// than failing, so one oddly encoded file does not abort a batch run.
pub fn read_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| MutatreeError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
