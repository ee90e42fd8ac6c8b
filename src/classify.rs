//! Two-pass classification of a model tree into valid and invalid folders.
//!
//! ## Rules
//!
//! ```text
//! Models/
//! ├── SeriesA/                       # neither: nothing of its own
//! │   ├── Hero - Chibi/              # VALID: image + STL/ subfolder
//! │   │   ├── cover.png
//! │   │   ├── STL/                   # neither: under a valid folder
//! │   │   │   └── body.stl
//! │   │   └── Variant/               # neither: under a valid folder
//! │   │       └── alt.png
//! │   └── Loose/                     # INVALID: stray image, no valid parent
//! │       └── cover.jpg
//! └── Zips/                          # neither: `zips` folders are exempt
//!     └── pack.zip
//! ```
//!
//! Each folder is listed once and both passes read that listing. Validity
//! depends only on a folder's own entries, so pass 1 settles it for every
//! folder. Pass 2 can then ask whether any ancestor (stopping before the
//! root) is valid before flagging stray content.
//!
//! Both passes follow symbolic links. `walkdir` reports link cycles as errors;
//! those entries, like unreadable directories, are logged and skipped along
//! with their subtree.

use crate::predicates::FolderContents;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum RootError {
    #[error("The directory {} does not exist.", .0.display())]
    NotADirectory(PathBuf),
}

/// Reject a root that is missing or not a directory.
///
/// The classifier itself never fails on a bad root (it just finds nothing),
/// so drivers call this first.
pub fn ensure_root(path: &Path) -> Result<&Path, RootError> {
    if path.is_dir() {
        Ok(path)
    } else {
        Err(RootError::NotADirectory(path.to_path_buf()))
    }
}

/// Result of [`classify`]. Sets are ordered, so iteration is already sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub valid: BTreeSet<PathBuf>,
    pub invalid: BTreeSet<PathBuf>,
}

/// JSON shape printed by the `scan` command.
#[derive(Debug, Serialize)]
pub struct ScanManifest {
    pub root: String,
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

impl Classification {
    pub fn to_manifest(&self, root: &Path) -> ScanManifest {
        let strings = |set: &BTreeSet<PathBuf>| {
            set.iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect()
        };
        ScanManifest {
            root: root.to_string_lossy().into_owned(),
            valid: strings(&self.valid),
            invalid: strings(&self.invalid),
        }
    }
}

/// Every directory under `root`, `root` included, following symlinks.
///
/// Entries the walk cannot read are skipped; a missing root yields nothing.
pub fn walk_directories(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(
                    path = %err.path().map(|p| p.display().to_string()).unwrap_or_default(),
                    %err,
                    "skipping unreadable entry"
                );
                None
            }
        })
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.into_path())
        .collect()
}

fn is_zips_folder(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().eq_ignore_ascii_case("zips"))
}

/// Whether any strict ancestor of `folder` below `root` is in `valid`.
///
/// `root` itself is never consulted.
fn has_valid_ancestor(folder: &Path, root: &Path, valid: &BTreeSet<PathBuf>) -> bool {
    folder
        .ancestors()
        .skip(1)
        .take_while(|a| *a != root && a.starts_with(root))
        .any(|a| valid.contains(a))
}

/// Classify every directory under `root`.
pub fn classify(root: &Path) -> Classification {
    let folders: Vec<(PathBuf, FolderContents)> = walk_directories(root)
        .into_iter()
        .map(|dir| {
            let contents = FolderContents::read(&dir);
            (dir, contents)
        })
        .collect();

    let valid: BTreeSet<PathBuf> = folders
        .iter()
        .filter(|(_, contents)| contents.is_valid_model_folder())
        .map(|(dir, _)| dir.clone())
        .collect();
    debug!(count = valid.len(), "pass 1: valid model folders");

    let mut invalid = BTreeSet::new();
    for (dir, contents) in folders {
        if valid.contains(&dir) || is_zips_folder(&dir) {
            continue;
        }
        if has_valid_ancestor(&dir, root, &valid) {
            continue;
        }
        if contents.has_loose_content() {
            invalid.insert(dir);
        }
    }
    debug!(count = invalid.len(), "pass 2: invalid folders");

    Classification { valid, invalid }
}
