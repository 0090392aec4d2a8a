//! Tree demolition: the mirror walk of materialization.
//!
//! In [`RemovalMode::Safe`] a directory is only deleted once nothing but
//! (possibly nested) empty directories remain in it, so files added by hand
//! after scaffolding survive together with every directory that holds them.

use crate::error::Result;
use crate::structure::{Node, Structure};
use log::debug;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How aggressively descriptor directories are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalMode {
    /// Remove directories only when they hold no files at any depth
    Safe,
    /// Remove directories together with everything inside them
    All,
}

/// A single step taken by [`demolish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    RemovedFile(PathBuf),
    RemovedTree(PathBuf),
    RemovedEmptyDir(PathBuf),
    SkippedNonEmpty(PathBuf),
}

impl Action {
    pub fn path(&self) -> &Path {
        match self {
            Action::RemovedFile(path)
            | Action::RemovedTree(path)
            | Action::RemovedEmptyDir(path)
            | Action::SkippedNonEmpty(path) => path,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::RemovedFile(path) => write!(f, "Removed file: {}", path.display()),
            Action::RemovedTree(path) => {
                write!(f, "Removed directory and all contents: {}", path.display())
            }
            Action::RemovedEmptyDir(path) => {
                write!(f, "Removed empty directory: {}", path.display())
            }
            Action::SkippedNonEmpty(path) => {
                write!(f, "Skipped non-empty directory: {}", path.display())
            }
        }
    }
}

/// Removes the entries of `structure` found under `base_path`.
///
/// Entries that do not exist are skipped. Files named by the descriptor are
/// always removed. Directories are handled according to `mode`; in safe mode
/// the children of a directory are processed before its own emptiness check.
///
/// # Returns
/// * `Result<Vec<Action>>` - Steps taken, in walk order
pub fn demolish<P: AsRef<Path>>(
    structure: &Structure,
    base_path: P,
    mode: RemovalMode,
) -> Result<Vec<Action>> {
    let mut actions = Vec::new();
    walk(structure, base_path.as_ref(), mode, &mut actions)?;
    Ok(actions)
}

fn walk(
    structure: &Structure,
    base_path: &Path,
    mode: RemovalMode,
    actions: &mut Vec<Action>,
) -> Result<()> {
    for (name, node) in structure {
        let path = base_path.join(name);
        let metadata = match fs::symlink_metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Nothing to remove at {}", path.display());
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if !metadata.is_dir() {
            fs::remove_file(&path)?;
            actions.push(Action::RemovedFile(path));
            continue;
        }

        match mode {
            RemovalMode::All => {
                fs::remove_dir_all(&path)?;
                actions.push(Action::RemovedTree(path));
            }
            RemovalMode::Safe => {
                if let Node::Directory(children) = node {
                    walk(children, &path, mode, actions)?;
                }
                if is_empty_tree(&path)? {
                    fs::remove_dir_all(&path)?;
                    actions.push(Action::RemovedEmptyDir(path));
                } else {
                    actions.push(Action::SkippedNonEmpty(path));
                }
            }
        }
    }
    Ok(())
}

/// Checks whether `path` is a directory with no files anywhere beneath it.
///
/// Returns `false` if `path` is not a directory. Symbolic links are not
/// followed and count as content.
pub fn is_empty_tree<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    if !fs::symlink_metadata(path).map(|m| m.is_dir()).unwrap_or(false) {
        return Ok(false);
    }
    for entry in WalkDir::new(path).min_depth(1) {
        if !entry?.file_type().is_dir() {
            return Ok(false);
        }
    }
    Ok(true)
}
