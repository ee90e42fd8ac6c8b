//! Renaming valid model folders to their canonical names.
//!
//! Planning is pure: [`plan_renames`] sorts every valid folder into
//! *unchanged* (already canonical), *changed* (old → new) or *unparseable*.
//! [`apply_renames`] then performs the changed ones, deepest path first so a
//! renamed parent never invalidates a pending child path. An existing target
//! is never overwritten, unless it is the folder itself under another case.

use crate::classify::Classification;
use crate::naming::{TagKeyword, rename_target};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Target already exists: {}", .0.display())]
    TargetExists(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub old: PathBuf,
    pub new: PathBuf,
}

#[derive(Debug, Default)]
pub struct RenamePlan {
    /// Invalid folders, carried along for reporting.
    pub invalid: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    /// Sorted by old path.
    pub changed: Vec<Rename>,
    pub unparseable: Vec<(PathBuf, String)>,
}

/// Compute the canonical name of every valid folder.
pub fn plan_renames(classification: &Classification, keywords: &[TagKeyword]) -> RenamePlan {
    let mut plan = RenamePlan {
        invalid: classification.invalid.iter().cloned().collect(),
        ..RenamePlan::default()
    };
    for folder in &classification.valid {
        match rename_target(folder, keywords) {
            Ok(target) if target == *folder => plan.unchanged.push(target),
            Ok(target) => plan.changed.push(Rename {
                old: folder.clone(),
                new: target,
            }),
            Err(err) => {
                warn!(folder = %folder.display(), %err, "cannot derive canonical name");
                plan.unparseable.push((folder.clone(), err.to_string()));
            }
        }
    }
    plan.unchanged.sort();
    plan.changed.sort_by(|a, b| a.old.cmp(&b.old));
    plan
}

/// Perform `renames`, deepest first. Each rename succeeds or fails on its own.
pub fn apply_renames(renames: &[Rename]) -> Vec<(Rename, Result<(), RenameError>)> {
    let mut ordered = renames.to_vec();
    ordered.sort_by(|a, b| b.old.cmp(&a.old));
    ordered
        .into_iter()
        .map(|rename| {
            let result = apply_one(&rename);
            (rename, result)
        })
        .collect()
}

/// Whether two paths name the same folder. On case-insensitive filesystems
/// `hero - nsfw` and `hero - NSFW` do.
fn is_same_folder(a: &Path, b: &Path) -> bool {
    if let (Ok(a), Ok(b)) = (fs::canonicalize(a), fs::canonicalize(b)) {
        if a == b {
            return true;
        }
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if let (Ok(a), Ok(b)) = (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
            return a.dev() == b.dev() && a.ino() == b.ino();
        }
    }
    false
}

fn apply_one(rename: &Rename) -> Result<(), RenameError> {
    if rename.new.exists() && !is_same_folder(&rename.old, &rename.new) {
        return Err(RenameError::TargetExists(rename.new.clone()));
    }
    fs::rename(&rename.old, &rename.new)?;
    Ok(())
}
