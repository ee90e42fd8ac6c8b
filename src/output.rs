//! CLI output formatting for every command.
//!
//! Each command has a `format_*` function returning the report as lines, and
//! a `print_*` wrapper that writes them to stdout. Format functions are pure,
//! so tests exercise them without touching the filesystem or capturing
//! stdout. Diagnostics (skipped folders, decode failures) go through
//! `tracing` instead and never mix into these reports.
//!
//! # Output Format
//!
//! ## Invalid
//!
//! ```text
//! Invalid folders with images, STL, or ZIP files:
//! /models/SeriesA/Loose
//! ```
//!
//! ## Rename
//!
//! ```text
//! Invalid Directories:
//! /models/SeriesA/Loose
//!
//! Unchanged directories: 1
//! /models/SeriesA/Hero - Chibi
//!
//! Changed directories: 1
//! /models/SeriesA/nsfw Villain ->
//!     /models/SeriesA/Villain - NSFW
//! ```
//!
//! ## Info
//!
//! ```text
//! Directory: /models/Anime/SeriesA/Hero - Chibi
//! Model Info:
//!     Model Name: Hero
//!     Character Name: Hero
//!     Series: SeriesA
//!     Tags: Chibi
//!     Model Category: Anime
//!
//! Total Directories: 1
//!
//! Models to Check:
//! ```

use crate::catalog::{Catalog, InfoReport};
use crate::rename::{Rename, RenameError, RenamePlan};
use crate::types::ModelEntry;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

fn path_line(path: &Path) -> String {
    path.display().to_string()
}

// ============================================================================
// Invalid
// ============================================================================

pub fn format_invalid_report(invalid: &BTreeSet<PathBuf>) -> Vec<String> {
    if invalid.is_empty() {
        return vec!["No invalid folders with images, STL, or ZIP files found.".to_string()];
    }
    let mut lines = vec!["Invalid folders with images, STL, or ZIP files:".to_string()];
    lines.extend(invalid.iter().map(|p| path_line(p)));
    lines
}

pub fn print_invalid_report(invalid: &BTreeSet<PathBuf>) {
    print_lines(format_invalid_report(invalid));
}

// ============================================================================
// Rename
// ============================================================================

/// The plan as it stands before anything is renamed.
pub fn format_rename_plan(plan: &RenamePlan) -> Vec<String> {
    let mut lines = vec!["Invalid Directories:".to_string()];
    lines.extend(plan.invalid.iter().map(|p| path_line(p)));

    lines.push(String::new());
    lines.push(format!("Unchanged directories: {}", plan.unchanged.len()));
    lines.extend(plan.unchanged.iter().map(|p| path_line(p)));

    lines.push(String::new());
    lines.push(format!("Changed directories: {}", plan.changed.len()));
    for rename in &plan.changed {
        lines.push(format!("{} ->", rename.old.display()));
        lines.push(format!("\t{}", rename.new.display()));
    }

    if !plan.unparseable.is_empty() {
        lines.push(String::new());
        lines.push(format!("Unparseable directories: {}", plan.unparseable.len()));
        for (folder, reason) in &plan.unparseable {
            lines.push(format!("{} ({})", folder.display(), reason));
        }
    }
    lines
}

pub fn print_rename_plan(plan: &RenamePlan) {
    print_lines(format_rename_plan(plan));
}

pub fn format_rename_results(results: &[(Rename, Result<(), RenameError>)]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut failed = 0;
    for (rename, result) in results {
        match result {
            Ok(()) => lines.push(format!(
                "Renamed: {} -> {}",
                rename.old.display(),
                rename.new.display()
            )),
            Err(err) => {
                failed += 1;
                lines.push(format!("Error renaming {}: {}", rename.old.display(), err));
            }
        }
    }
    lines.push(format!(
        "Renamed {} directories, {} failed",
        results.len() - failed,
        failed
    ));
    lines
}

pub fn print_rename_results(results: &[(Rename, Result<(), RenameError>)]) {
    print_lines(format_rename_results(results));
}

// ============================================================================
// Info
// ============================================================================

fn model_info_block(folder: &Path, entry: &ModelEntry) -> Vec<String> {
    vec![
        String::new(),
        format!("Directory: {}", folder.display()),
        "Model Info:".to_string(),
        format!("\tModel Name: {}", entry.model_name),
        format!("\tCharacter Name: {}", entry.character_name),
        format!("\tSeries: {}", entry.series),
        format!("\tTags: {}", entry.tags_display()),
        format!("\tModel Category: {}", entry.category),
    ]
}

pub fn format_info_report(report: &InfoReport) -> Vec<String> {
    let mut lines = Vec::new();
    for (folder, entry) in &report.written {
        lines.extend(model_info_block(folder, entry));
    }
    for (folder, reason) in &report.failures {
        lines.push(String::new());
        lines.push(format!("Skipped: {} ({})", folder.display(), reason));
    }

    lines.push(String::new());
    lines.push(format!("Total Directories: {}", report.written.len()));
    lines.push(String::new());
    lines.push("Models to Check:".to_string());
    lines.extend(report.to_check.iter().map(|p| path_line(p)));
    lines
}

pub fn print_info_report(report: &InfoReport) {
    print_lines(format_info_report(report));
}

// ============================================================================
// Gallery
// ============================================================================

pub fn format_gallery_summary(catalog: &Catalog, output: &Path) -> Vec<String> {
    vec![
        format!("Total Models: {}", catalog.entries.len()),
        format!("All Tags Found: {}", catalog.tags.join(", ")),
        format!("Wrote {}", output.display()),
    ]
}

pub fn print_gallery_summary(catalog: &Catalog, output: &Path) {
    print_lines(format_gallery_summary(catalog, output));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;

    fn entry(character: &str, series: &str, tags: &[&str]) -> ModelEntry {
        ModelEntry {
            character_name: character.to_string(),
            model_name: character.to_string(),
            series: series.to_string(),
            category: "Anime".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    // =========================================================================
    // Invalid
    // =========================================================================

    #[test]
    fn invalid_report_empty() {
        let lines = format_invalid_report(&BTreeSet::new());
        assert_eq!(
            lines,
            vec!["No invalid folders with images, STL, or ZIP files found."]
        );
    }

    #[test]
    fn invalid_report_lists_sorted_paths() {
        let invalid: BTreeSet<PathBuf> =
            [PathBuf::from("/m/b"), PathBuf::from("/m/a")].into_iter().collect();
        let lines = format_invalid_report(&invalid);
        assert_eq!(
            lines,
            vec!["Invalid folders with images, STL, or ZIP files:", "/m/a", "/m/b"]
        );
    }

    // =========================================================================
    // Rename
    // =========================================================================

    #[test]
    fn rename_plan_sections() {
        let plan = RenamePlan {
            invalid: vec![PathBuf::from("/m/Loose")],
            unchanged: vec![PathBuf::from("/m/Hero - Chibi")],
            changed: vec![Rename {
                old: PathBuf::from("/m/nsfw Villain"),
                new: PathBuf::from("/m/Villain - NSFW"),
            }],
            unparseable: vec![],
        };
        let lines = format_rename_plan(&plan);
        assert_eq!(
            lines,
            vec![
                "Invalid Directories:",
                "/m/Loose",
                "",
                "Unchanged directories: 1",
                "/m/Hero - Chibi",
                "",
                "Changed directories: 1",
                "/m/nsfw Villain ->",
                "\t/m/Villain - NSFW",
            ]
        );
    }

    #[test]
    fn rename_plan_lists_unparseable() {
        let plan = RenamePlan {
            unparseable: vec![(PathBuf::from("/m/Chibi"), "no name".to_string())],
            ..RenamePlan::default()
        };
        let lines = format_rename_plan(&plan);
        assert!(lines.contains(&"Unparseable directories: 1".to_string()));
        assert!(lines.contains(&"/m/Chibi (no name)".to_string()));
    }

    #[test]
    fn rename_results_count_failures() {
        let ok = Rename {
            old: PathBuf::from("/m/a"),
            new: PathBuf::from("/m/A"),
        };
        let taken = Rename {
            old: PathBuf::from("/m/b"),
            new: PathBuf::from("/m/B"),
        };
        let results = vec![
            (ok, Ok(())),
            (
                taken,
                Err(RenameError::TargetExists(PathBuf::from("/m/B"))),
            ),
        ];
        let lines = format_rename_results(&results);
        assert_eq!(lines[0], "Renamed: /m/a -> /m/A");
        assert_eq!(lines[1], "Error renaming /m/b: Target already exists: /m/B");
        assert_eq!(lines[2], "Renamed 1 directories, 1 failed");
    }

    // =========================================================================
    // Info
    // =========================================================================

    #[test]
    fn info_report_blocks_and_totals() {
        let report = InfoReport {
            written: vec![(PathBuf::from("/m/Anime/S/Hero"), entry("Hero", "S", &["Chibi", "NSFW"]))],
            failures: vec![],
            to_check: vec![PathBuf::from("/m/Anime/Solo/Solo")],
        };
        let lines = format_info_report(&report);
        assert_eq!(
            lines,
            vec![
                "",
                "Directory: /m/Anime/S/Hero",
                "Model Info:",
                "\tModel Name: Hero",
                "\tCharacter Name: Hero",
                "\tSeries: S",
                "\tTags: Chibi, NSFW",
                "\tModel Category: Anime",
                "",
                "Total Directories: 1",
                "",
                "Models to Check:",
                "/m/Anime/Solo/Solo",
            ]
        );
    }

    #[test]
    fn info_report_mentions_failures() {
        let report = InfoReport {
            failures: vec![(PathBuf::from("/m/_x"), "empty name".to_string())],
            ..InfoReport::default()
        };
        let lines = format_info_report(&report);
        assert!(lines.contains(&"Skipped: /m/_x (empty name)".to_string()));
        assert!(lines.contains(&"Total Directories: 0".to_string()));
    }

    // =========================================================================
    // Gallery
    // =========================================================================

    #[test]
    fn gallery_summary_lists_tags() {
        let catalog = Catalog {
            entries: vec![CatalogEntry {
                folder: PathBuf::from("/m/Hero"),
                entry: entry("Hero", "S", &["Chibi"]),
                preview: String::new(),
            }],
            tags: vec!["Chibi".to_string(), "NSFW".to_string()],
        };
        let lines = format_gallery_summary(&catalog, Path::new("out.html"));
        assert_eq!(
            lines,
            vec!["Total Models: 1", "All Tags Found: Chibi, NSFW", "Wrote out.html"]
        );
    }
}
