//! Shared test utilities.
//!
//! Builds small model trees on disk. Image files written by [`touch`] are
//! placeholders: they pass the extension checks and the mock backend, but
//! the real decoder rejects them. Use [`write_png`] when a test needs a
//! decodable image.
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let hero = model_folder(tmp.path(), "SeriesA/Hero - Chibi");
//! touch(&tmp.path().join("SeriesA/Loose/cover.png"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

/// Create `path` (and its parents) as a small placeholder file.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "fake image").unwrap();
}

/// Create a valid model folder at `base/rel`: a cover image next to an
/// `STL/` folder holding one part.
pub fn model_folder(base: &Path, rel: &str) -> PathBuf {
    let folder = base.join(rel);
    touch(&folder.join("cover.png"));
    touch(&folder.join("STL/part.stl"));
    folder
}

/// Write a real `width`×`height` PNG to `path`.
pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 128])
    });
    img.save(path).unwrap();
}
