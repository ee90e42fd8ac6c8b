//! High-level preview operations.
//!
//! These combine the name-based image check from [`crate::predicates`] with a
//! real decode through the backend, so a file merely *named* like an image is
//! never embedded.

use super::backend::{BackendError, ImageBackend};
use super::params::{PreviewParams, Quality};
use crate::predicates::is_image_name;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::path::{Path, PathBuf};

/// Whether `path` has an image extension and the backend can read it.
pub fn is_decodable_image(backend: &impl ImageBackend, path: &Path) -> bool {
    path.is_file() && is_image_name(path) && backend.identify(path).is_ok()
}

/// The first decodable image directly inside `folder`, by file name.
pub fn first_decodable_image(backend: &impl ImageBackend, folder: &Path) -> Option<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(folder)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_image_name(p))
        .collect();
    files.sort();
    files.into_iter().find(|p| is_decodable_image(backend, p))
}

/// A `data:image/jpeg;base64,...` URI holding a preview of `source`.
pub fn preview_data_uri(
    backend: &impl ImageBackend,
    source: &Path,
    max_height: u32,
    quality: Quality,
) -> Result<String, BackendError> {
    let bytes = backend.encode_preview(&PreviewParams {
        source: source.to_path_buf(),
        max_height,
        quality,
    })?;
    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes)))
}
