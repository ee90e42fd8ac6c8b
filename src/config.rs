//! Configuration loading.
//!
//! An optional `modelshelf.toml` in the models root (or any file passed with
//! `--config`) is layered over stock defaults:
//!
//! ```toml
//! [tags]
//! keywords = [
//!     { keyword = "chibi", label = "Chibi" },
//!     { keyword = "nsfw", label = "NSFW" },
//! ]
//!
//! [gallery]
//! title = "Model Catalog"
//! output = "output.html"
//! preview_height = 200
//! jpeg_quality = 85
//! blur_tag = "NSFW"
//! ```
//!
//! Files are sparse: tables merge key by key, while arrays (like `keywords`)
//! replace the default wholesale. Unknown keys are rejected to catch typos.

use crate::naming::{TagKeyword, default_tag_keywords};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "modelshelf.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShelfConfig {
    /// Keyword → tag mapping used by the naming normalizer.
    pub tags: TagsConfig,
    /// Gallery rendering settings.
    pub gallery: GalleryConfig,
}

impl ShelfConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for k in &self.tags.keywords {
            if k.keyword.trim().is_empty() || k.label.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "tags.keywords entries need a non-empty keyword and label".into(),
                ));
            }
        }
        if self.gallery.preview_height == 0 {
            return Err(ConfigError::Validation(
                "gallery.preview_height must be non-zero".into(),
            ));
        }
        if !(1..=100).contains(&self.gallery.jpeg_quality) {
            return Err(ConfigError::Validation(
                "gallery.jpeg_quality must be 1-100".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagsConfig {
    /// Display order of tags follows this list.
    pub keywords: Vec<TagKeyword>,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            keywords: default_tag_keywords(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    pub title: String,
    /// Output file, relative to the working directory.
    pub output: String,
    /// Maximum preview height in pixels.
    pub preview_height: u32,
    pub jpeg_quality: u32,
    /// Rows carrying this tag get blurred previews. Empty disables blurring.
    pub blur_tag: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            title: "Model Catalog".to_string(),
            output: "output.html".to_string(),
            preview_height: 200,
            jpeg_quality: 85,
            blur_tag: "NSFW".to_string(),
        }
    }
}

// =============================================================================
// Loading and merging
// =============================================================================

/// Stock defaults as a TOML table, the base layer for user overrides.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(ShelfConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as raw TOML. `Ok(None)` if it does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto stock defaults, deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<ShelfConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ShelfConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `modelshelf.toml` from the models root, or defaults if absent.
pub fn load_config(root: &Path) -> Result<ShelfConfig, ConfigError> {
    resolve_config(load_raw_config(&root.join(CONFIG_FILE))?)
}

/// Load an explicitly named config file, which must exist.
pub fn load_config_file(path: &Path) -> Result<ShelfConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    resolve_config(Some(toml::from_str(&content)?))
}

/// A fully commented `modelshelf.toml` listing every key with its default.
pub fn stock_config_toml() -> &'static str {
    r##"# modelshelf configuration
# ========================
# All settings are optional. Values shown below are the defaults.
# Place this file in the models root as modelshelf.toml, or pass --config.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Tags
# ---------------------------------------------------------------------------
[tags]
# Keywords found anywhere in a model folder name (case-insensitive) become
# tags and are removed from the character and version parts of the name.
# lower, Capitalized and UPPER spellings are always removed; list any other
# spelling you use under `variants`. Tags are displayed in this order.
keywords = [
    { keyword = "chibi", label = "Chibi" },
    { keyword = "nsfw", label = "NSFW" },
]

# ---------------------------------------------------------------------------
# Gallery
# ---------------------------------------------------------------------------
[gallery]
# Page title and heading.
title = "Model Catalog"

# Where `modelshelf gallery` writes the HTML file.
output = "output.html"

# Previews are scaled down to this height in pixels (never up).
preview_height = 200

# JPEG quality of embedded previews (1-100).
jpeg_quality = 85

# Previews of rows carrying this tag are blurred. Set to "" to disable.
blur_tag = "NSFW"
"##
}
