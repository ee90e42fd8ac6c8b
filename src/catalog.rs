//! Catalog assembly.
//!
//! A catalog is the list of models shown in the gallery, each with an
//! embedded preview, plus every tag seen across them. It can be built two
//! ways:
//!
//! - **Directory structure**: any folder holding a decodable image and an
//!   `STL`/`Zips`/`Renders` folder somewhere below it. Fields are read from
//!   the path: the first folder below the root is the category, the parent
//!   folder is the series, and the folder name carries character, model name
//!   and tags (see [`describe_model_name`]).
//! - **Sidecars**: every `model-info.txt` found under the root, with the
//!   first decodable image next to it.
//!
//! Folders that cannot be described or previewed are logged and left out;
//! they never stop the run.

use crate::classify::walk_directories;
use crate::config::GalleryConfig;
use crate::imaging::{ImageBackend, Quality, first_decodable_image, preview_data_uri};
use crate::naming::{NameError, describe_model_name};
use crate::predicates::has_asset_subfolder_in_subtree;
use crate::sidecar::{SIDECAR_FILE, read_model_info, write_model_info};
use crate::types::{ModelEntry, ModelInfo};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A model ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub folder: PathBuf,
    pub entry: ModelEntry,
    /// `data:image/jpeg;base64,...`
    pub preview: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
    /// Distinct tags in first-seen order.
    pub tags: Vec<String>,
}

impl Catalog {
    fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut tags: Vec<String> = Vec::new();
        for tag in entries.iter().flat_map(|e| &e.entry.tags) {
            if !tag.is_empty() && !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        Self { entries, tags }
    }

    /// How many entries carry `tag`.
    pub fn tag_count(&self, tag: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.entry.tags.iter().any(|t| t == tag))
            .count()
    }
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Catalog fields for a model folder, read from its position under `root`.
pub fn describe_model_folder(root: &Path, folder: &Path) -> Result<ModelEntry, NameError> {
    let display = describe_model_name(&name_of(folder))?;
    let category = folder
        .strip_prefix(root)
        .ok()
        .and_then(|rel| rel.components().next())
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .unwrap_or_default();
    let series = folder.parent().map(name_of).unwrap_or_default();

    Ok(ModelEntry {
        character_name: display.character_name,
        model_name: display.model_name,
        series,
        category,
        tags: display.tags,
    })
}

fn preview(
    backend: &impl ImageBackend,
    image: &Path,
    gallery: &GalleryConfig,
) -> Option<String> {
    match preview_data_uri(
        backend,
        image,
        gallery.preview_height,
        Quality::new(gallery.jpeg_quality),
    ) {
        Ok(uri) => Some(uri),
        Err(err) => {
            warn!(image = %image.display(), %err, "skipping model, preview failed");
            None
        }
    }
}

/// Build a catalog from the directory layout under `root`.
pub fn catalog_from_structure(
    root: &Path,
    backend: &impl ImageBackend,
    gallery: &GalleryConfig,
) -> Catalog {
    let mut entries = Vec::new();
    for folder in walk_directories(root) {
        let Some(image) = first_decodable_image(backend, &folder) else {
            continue;
        };
        if !has_asset_subfolder_in_subtree(&folder) {
            continue;
        }
        let entry = match describe_model_folder(root, &folder) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(folder = %folder.display(), %err, "skipping model folder");
                continue;
            }
        };
        let Some(preview) = preview(backend, &image, gallery) else {
            continue;
        };
        debug!(folder = %folder.display(), "catalogued");
        entries.push(CatalogEntry {
            folder,
            entry,
            preview,
        });
    }
    Catalog::from_entries(entries)
}

/// Build a catalog from `model-info.txt` files under `root`.
pub fn catalog_from_sidecars(
    root: &Path,
    backend: &impl ImageBackend,
    gallery: &GalleryConfig,
) -> Catalog {
    let mut entries = Vec::new();
    let sidecars = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == SIDECAR_FILE);

    for sidecar in sidecars {
        let Some(folder) = sidecar.path().parent() else {
            continue;
        };
        let Some(image) = first_decodable_image(backend, folder) else {
            debug!(folder = %folder.display(), "sidecar without image, skipping");
            continue;
        };
        let info = read_model_info(sidecar.path());
        let Some(preview) = preview(backend, &image, gallery) else {
            continue;
        };
        entries.push(CatalogEntry {
            folder: folder.to_path_buf(),
            entry: info.to_entry(),
            preview,
        });
    }
    Catalog::from_entries(entries)
}

/// Outcome of writing sidecars for every valid folder.
#[derive(Debug, Default)]
pub struct InfoReport {
    pub written: Vec<(PathBuf, ModelEntry)>,
    pub failures: Vec<(PathBuf, String)>,
    /// Folders whose character name equals the series name, which usually
    /// means the model sits one level too shallow.
    pub to_check: Vec<PathBuf>,
}

/// Describe every folder in `valid` and write its `model-info.txt`.
pub fn write_model_infos(root: &Path, valid: &BTreeSet<PathBuf>) -> InfoReport {
    let mut report = InfoReport::default();
    for folder in valid {
        let entry = match describe_model_folder(root, folder) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(folder = %folder.display(), %err, "skipping model folder");
                report.failures.push((folder.clone(), err.to_string()));
                continue;
            }
        };
        if let Err(err) = write_model_info(folder, &ModelInfo::from(&entry)) {
            warn!(folder = %folder.display(), %err, "could not write sidecar");
            report.failures.push((folder.clone(), err.to_string()));
            continue;
        }
        if entry.character_name == entry.series {
            report.to_check.push(folder.clone());
        }
        report.written.push((folder.clone(), entry));
    }
    report.to_check.sort();
    report
}
