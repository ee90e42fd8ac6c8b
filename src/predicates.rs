//! Per-folder content checks.
//!
//! Every predicate looks only at a single folder's *immediate* entries, except
//! [`has_asset_subfolder_in_subtree`] which searches the whole subtree. None of
//! them open or decode files: an image is anything whose name ends with a known
//! image extension, an asset is anything ending in `.stl` or `.zip`.
//!
//! A folder that cannot be listed (permissions, or it vanished mid-walk) is
//! treated as empty. Predicates never fail.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Image extensions recognised by name alone (lowercase, no dot).
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "svg", "webp", "avif",
];

/// Loose model files that mark a folder as carrying printable content.
pub const ASSET_EXTENSIONS: &[&str] = &["stl", "zip"];

/// Subfolder names that make a folder a valid model folder.
pub const ASSET_SUBFOLDERS: &[&str] = &["stl", "zips"];

/// Subfolder names accepted by the looser subtree scan.
pub const SUBTREE_MARKER_FOLDERS: &[&str] = &["stl", "zips", "renders"];

/// Immediate entries of `folder`, or nothing if it cannot be listed.
fn list_entries(folder: &Path) -> Vec<PathBuf> {
    match fs::read_dir(folder) {
        Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
        Err(err) => {
            debug!(path = %folder.display(), %err, "treating unreadable folder as empty");
            Vec::new()
        }
    }
}

fn lowercase_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().to_lowercase())
}

fn name_has_extension(name: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| {
        name.len() > ext.len()
            && name.ends_with(ext)
            && name.as_bytes()[name.len() - ext.len() - 1] == b'.'
    })
}

/// Whether a file name ends with one of the [`IMAGE_EXTENSIONS`] (any case).
pub fn is_image_name(path: &Path) -> bool {
    lowercase_name(path).is_some_and(|n| name_has_extension(&n, IMAGE_EXTENSIONS))
}

/// What a folder directly holds, read from a single listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderContents {
    /// An entry with an image extension.
    pub image: bool,
    /// An `.stl` or `.zip` entry.
    pub asset_file: bool,
    /// A subdirectory named `STL` or `Zips` (any case). Symlinked
    /// directories count.
    pub asset_subfolder: bool,
}

impl FolderContents {
    pub fn read(folder: &Path) -> Self {
        let mut contents = Self::default();
        for path in list_entries(folder) {
            let Some(name) = lowercase_name(&path) else {
                continue;
            };
            contents.image |= name_has_extension(&name, IMAGE_EXTENSIONS);
            contents.asset_file |= name_has_extension(&name, ASSET_EXTENSIONS);
            if !contents.asset_subfolder && ASSET_SUBFOLDERS.contains(&name.as_str()) {
                contents.asset_subfolder = path.is_dir();
            }
        }
        contents
    }

    /// An image next to an asset subfolder.
    pub fn is_valid_model_folder(&self) -> bool {
        self.image && self.asset_subfolder
    }

    /// Images or model files that would be stray outside a model folder.
    pub fn has_loose_content(&self) -> bool {
        self.image || self.asset_file
    }
}

/// Whether the folder directly contains an entry with an image extension.
pub fn has_direct_image(folder: &Path) -> bool {
    FolderContents::read(folder).image
}

/// Whether the folder directly contains an `.stl` or `.zip` entry.
pub fn has_direct_asset_file(folder: &Path) -> bool {
    FolderContents::read(folder).asset_file
}

/// Whether the folder directly contains a subdirectory named `STL` or `Zips`
/// (any case).
pub fn has_direct_asset_subfolder(folder: &Path) -> bool {
    FolderContents::read(folder).asset_subfolder
}

/// Whether any directory below `folder`, at any depth, is named `STL`, `Zips`
/// or `Renders` (any case). `folder` itself is not considered.
pub fn has_asset_subfolder_in_subtree(folder: &Path) -> bool {
    WalkDir::new(folder)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .any(|e| {
            let name = e.file_name().to_string_lossy().to_lowercase();
            SUBTREE_MARKER_FOLDERS.contains(&name.as_str())
        })
}

/// A folder is a valid model folder when it directly holds an image and an
/// asset subfolder.
pub fn is_valid_model_folder(folder: &Path) -> bool {
    FolderContents::read(folder).is_valid_model_folder()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn image_extension_any_case() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Cover.JPG"), "fake image").unwrap();
        assert!(has_direct_image(tmp.path()));
    }

    #[test]
    fn every_image_extension_is_recognised() {
        for ext in IMAGE_EXTENSIONS {
            assert!(is_image_name(Path::new(&format!("a.{ext}"))), "{ext}");
        }
    }

    #[test]
    fn extension_must_follow_a_dot() {
        assert!(!is_image_name(Path::new("notapng")));
        assert!(!is_image_name(Path::new("png")));
        assert!(is_image_name(Path::new(".png")));
    }

    #[test]
    fn no_image_in_empty_folder() {
        let tmp = TempDir::new().unwrap();
        assert!(!has_direct_image(tmp.path()));
        assert!(!has_direct_asset_file(tmp.path()));
        assert!(!has_direct_asset_subfolder(tmp.path()));
    }

    #[test]
    fn image_in_subfolder_is_not_direct() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("Renders")).unwrap();
        fs::write(tmp.path().join("Renders/a.png"), "fake image").unwrap();
        assert!(!has_direct_image(tmp.path()));
    }

    #[test]
    fn asset_files_detected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("body.STL"), "solid").unwrap();
        assert!(has_direct_asset_file(tmp.path()));

        let other = TempDir::new().unwrap();
        fs::write(other.path().join("parts.zip"), "PK").unwrap();
        assert!(has_direct_asset_file(other.path()));

        let none = TempDir::new().unwrap();
        fs::write(none.path().join("readme.txt"), "hi").unwrap();
        assert!(!has_direct_asset_file(none.path()));
    }

    #[test]
    fn asset_subfolder_any_case() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sTl")).unwrap();
        assert!(has_direct_asset_subfolder(tmp.path()));

        let zips = TempDir::new().unwrap();
        fs::create_dir(zips.path().join("ZIPS")).unwrap();
        assert!(has_direct_asset_subfolder(zips.path()));
    }

    #[test]
    fn file_named_stl_is_not_a_subfolder() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("stl"), "not a dir").unwrap();
        assert!(!has_direct_asset_subfolder(tmp.path()));
    }

    #[test]
    fn renders_does_not_count_for_validity() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("Renders")).unwrap();
        fs::write(tmp.path().join("cover.png"), "fake image").unwrap();
        assert!(!is_valid_model_folder(tmp.path()));
        assert!(has_asset_subfolder_in_subtree(tmp.path()));
    }

    #[test]
    fn subtree_scan_finds_deep_markers() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/b/c/Zips")).unwrap();
        assert!(has_asset_subfolder_in_subtree(tmp.path()));
    }

    #[test]
    fn subtree_scan_false_for_empty_tree() {
        let tmp = TempDir::new().unwrap();
        assert!(!has_asset_subfolder_in_subtree(tmp.path()));
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        assert!(!has_asset_subfolder_in_subtree(tmp.path()));
    }

    #[test]
    fn subtree_scan_ignores_the_folder_itself() {
        let tmp = TempDir::new().unwrap();
        let stl = tmp.path().join("STL");
        fs::create_dir(&stl).unwrap();
        assert!(!has_asset_subfolder_in_subtree(&stl));
    }

    #[test]
    fn missing_folder_is_empty() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("gone");
        assert!(!has_direct_image(&gone));
        assert!(!has_direct_asset_file(&gone));
        assert!(!has_direct_asset_subfolder(&gone));
        assert!(!has_asset_subfolder_in_subtree(&gone));
    }

    #[test]
    fn valid_needs_image_and_subfolder() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("STL")).unwrap();
        assert!(!is_valid_model_folder(tmp.path()));
        fs::write(tmp.path().join("cover.webp"), "fake image").unwrap();
        assert!(is_valid_model_folder(tmp.path()));
    }

    #[test]
    fn folder_contents_from_one_listing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("cover.PNG"), "fake image").unwrap();
        fs::write(tmp.path().join("body.stl"), "solid").unwrap();
        fs::create_dir(tmp.path().join("Zips")).unwrap();

        let contents = FolderContents::read(tmp.path());
        assert_eq!(
            contents,
            FolderContents {
                image: true,
                asset_file: true,
                asset_subfolder: true,
            }
        );
        assert!(contents.is_valid_model_folder());
        assert!(contents.has_loose_content());
        assert_eq!(FolderContents::read(&tmp.path().join("gone")), FolderContents::default());
    }
}
