//! Gallery HTML generation.
//!
//! Produces one self-contained HTML file: styles, script and every preview
//! image are embedded, so the file can be opened or moved anywhere.
//!
//! ## Layout
//!
//! - A free-text filter matching any text column
//! - One filter group per tag, each with a count and three choices:
//!   **include** (default, no filtering), **only** (show only rows carrying
//!   the tag) and **exclude** (hide rows carrying the tag)
//! - A table with one row per model: character, model, series, category,
//!   tags and the preview
//!
//! Filtering runs client-side (`static/filter.js`). Rows carrying the
//! configured blur tag get blurred previews.
//!
//! HTML is built with [maud](https://maud.lambda.xyz/), so every value is
//! escaped on interpolation.

use crate::catalog::{Catalog, CatalogEntry};
use crate::config::GalleryConfig;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/filter.js");

/// Filter choices offered per tag, in display order.
pub const FILTER_MODES: &[(&str, &str)] =
    &[("include", "Include"), ("only", "Only"), ("exclude", "Exclude")];

/// Render and write the gallery to `output`, creating parent directories.
pub fn write_gallery(
    output: &Path,
    catalog: &Catalog,
    gallery: &GalleryConfig,
) -> Result<(), GenerateError> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, render_gallery(catalog, gallery).into_string())?;
    Ok(())
}

/// Render the full gallery document.
pub fn render_gallery(catalog: &Catalog, gallery: &GalleryConfig) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (gallery.title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                h1 { (gallery.title) }
                p.summary { (catalog.entries.len()) " models" }
                input type="search" id="global-filter" placeholder="Filter by name, series, category…";
                (render_tag_filters(catalog))
                (render_table(catalog, gallery))
                script { (PreEscaped(JS)) }
            }
        }
    }
}

fn render_tag_filters(catalog: &Catalog) -> Markup {
    html! {
        div.tag-filters {
            @for tag in &catalog.tags {
                fieldset.tag-filter {
                    legend {
                        (tag) " "
                        span.tag-count { "(" (catalog.tag_count(tag)) ")" }
                    }
                    @for (value, label) in FILTER_MODES {
                        label {
                            @if *value == "include" {
                                input type="radio" name=(tag) value=(value) checked;
                            } @else {
                                input type="radio" name=(tag) value=(value);
                            }
                            " " (label)
                        }
                    }
                }
            }
        }
    }
}

fn render_table(catalog: &Catalog, gallery: &GalleryConfig) -> Markup {
    html! {
        table id="models" data-blur-tag=(gallery.blur_tag) {
            thead {
                tr {
                    th { "Character" }
                    th { "Model" }
                    th { "Series" }
                    th { "Category" }
                    th { "Tags" }
                    th { "Preview" }
                }
            }
            tbody {
                @for item in &catalog.entries {
                    (render_row(item, gallery))
                }
            }
        }
    }
}

fn render_row(item: &CatalogEntry, gallery: &GalleryConfig) -> Markup {
    let entry = &item.entry;
    let tags = entry.tags_display();
    let blurred = !gallery.blur_tag.is_empty() && entry.tags.contains(&gallery.blur_tag);
    html! {
        tr data-tags=(tags) {
            td { (entry.character_name) }
            td { (entry.model_name) }
            td { (entry.series) }
            td { (entry.category) }
            td { (tags) }
            td {
                img src=(item.preview) alt=(entry.model_name) loading="lazy"
                    class=[blurred.then_some("blurred")];
            }
        }
    }
}
