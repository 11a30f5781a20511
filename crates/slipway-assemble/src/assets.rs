//! Static asset population.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::assembler::AssembleError;

/// How static assets are populated into the destination.
#[derive(Debug, Clone)]
pub enum AssetSource {
    /// Copy an enumerated list of files into the destination root.
    Files(Vec<PathBuf>),

    /// Recursively copy an entire directory tree, preserving relative
    /// paths. Existing files with the same relative path are overwritten
    /// (merge semantics, not an atomic replace of the destination).
    Tree(PathBuf),
}

/// Copy assets into `dest` and return the number of files copied.
pub fn populate(source: &AssetSource, dest: &Path) -> Result<usize, AssembleError> {
    match source {
        AssetSource::Files(files) => {
            for file in files {
                let name = file.file_name().ok_or_else(|| AssembleError::Read {
                    path: file.display().to_string(),
                    message: "not a file path".to_string(),
                })?;
                copy_file(file, &dest.join(name))?;
            }
            Ok(files.len())
        }
        AssetSource::Tree(root) => copy_tree(root, dest),
    }
}

/// Copy a single file, overwriting the destination if it exists.
pub fn copy_file(from: &Path, to: &Path) -> Result<(), AssembleError> {
    fs::copy(from, to).map_err(|e| AssembleError::Copy {
        from: from.display().to_string(),
        to: to.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

/// Recursively copy `root` into `dest`, merging with existing contents.
fn copy_tree(root: &Path, dest: &Path) -> Result<usize, AssembleError> {
    let mut copied = 0;

    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.map_err(|e| AssembleError::Read {
            path: root.display().to_string(),
            message: e.to_string(),
        })?;

        // Walk order guarantees parents are seen before their children,
        // but directories are created on demand anyway in case the walker
        // follows links.
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| AssembleError::Write {
                path: target.display().to_string(),
                message: e.to_string(),
            })?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| AssembleError::Write {
                    path: parent.display().to_string(),
                    message: e.to_string(),
                })?;
            }
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    tracing::debug!("Copied {} assets from {}", copied, root.display());

    Ok(copied)
}
