//! # modelshelf
//!
//! Housekeeping for a folder tree of 3D-printable models. The filesystem is
//! the data source: a *model folder* is any folder holding at least one image
//! next to an `STL/` or `Zips/` folder. Everything else is derived from the
//! tree and the folder names.
//!
//! # Pipeline
//!
//! ```text
//! classify   root/      →  valid + invalid folder sets
//! rename     valid set  →  canonical folder names ("Hero_Armored 2 - Chibi NSFW")
//! info       valid set  →  model-info.txt per folder
//! gallery    root/      →  one self-contained HTML catalog
//! ```
//!
//! Classification is the only stage that looks at the whole tree; the others
//! work folder by folder, so one bad folder is logged and skipped without
//! stopping the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`predicates`] | Per-folder checks: direct image, direct model file, `STL`/`Zips` subfolders |
//! | [`classify`] | Two-pass valid/invalid classification and root validation |
//! | [`naming`] | Folder name parser, canonical name composer and display-name splitter |
//! | [`rename`] | Rename planning and application |
//! | [`types`] | Shared records: catalog rows and sidecar contents |
//! | [`sidecar`] | `model-info.txt` reading and writing |
//! | [`catalog`] | Catalog assembly from the folder layout or from sidecars |
//! | [`imaging`] | Image identification and embedded JPEG previews |
//! | [`generate`] | Gallery HTML rendering with Maud |
//! | [`config`] | `modelshelf.toml` loading, merging and validation |
//! | [`output`] | CLI report formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Sorted Sets Everywhere
//!
//! Valid and invalid folders are kept in `BTreeSet<PathBuf>`, and every
//! directory walk sorts by file name. Reports, rename plans and catalogs come
//! out in the same order on every run.
//!
//! ## Self-Contained Gallery
//!
//! The gallery embeds its CSS, its filter script and every preview as a
//! base64 JPEG data URI. There is no asset folder to keep next to it, and the
//! HTML is built with [Maud](https://maud.lambda.xyz/), so every folder name
//! is escaped on interpolation.
//!
//! ## Pure-Rust Imaging
//!
//! Previews are decoded, resized (Lanczos3) and re-encoded with the `image`
//! crate. No system libraries are needed. Formats the crate cannot decode
//! still count as images for classification but never become previews.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod generate;
pub mod imaging;
pub mod logging;
pub mod naming;
pub mod output;
pub mod predicates;
pub mod rename;
pub mod sidecar;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
