//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the two things the catalog needs from an
//! image: can it be read at all, and a small JPEG preview of it. The
//! production implementation is [`RustBackend`](super::rust_backend::RustBackend).

use super::params::PreviewParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("Failed to encode preview: {0}")]
    Encode(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

pub trait ImageBackend {
    /// Read image dimensions. Fails for files that are not decodable images.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Produce JPEG bytes for a preview.
    fn encode_preview(&self, params: &PreviewParams) -> Result<Vec<u8>, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Backend that never decodes anything.
    ///
    /// Any existing file is an image unless its name contains `corrupt`.
    /// Previews are the bytes `preview:<file name>`.
    #[derive(Default)]
    pub struct MockBackend {
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Preview { source: String, max_height: u32 },
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        pub fn previews(&self) -> Vec<String> {
            self.get_operations()
                .into_iter()
                .filter_map(|op| match op {
                    RecordedOp::Preview { source, .. } => Some(source),
                    _ => None,
                })
                .collect()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(file_name(path)));
            if path.is_file() && !file_name(path).contains("corrupt") {
                Ok(Dimensions {
                    width: 400,
                    height: 300,
                })
            } else {
                Err(BackendError::Decode {
                    path: path.display().to_string(),
                    reason: "mock".to_string(),
                })
            }
        }

        fn encode_preview(&self, params: &PreviewParams) -> Result<Vec<u8>, BackendError> {
            let name = file_name(&params.source);
            self.operations.lock().unwrap().push(RecordedOp::Preview {
                source: name.clone(),
                max_height: params.max_height,
            });
            Ok(format!("preview:{name}").into_bytes())
        }
    }

    #[test]
    fn mock_rejects_corrupt_and_missing_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let good = tmp.path().join("a.png");
        let bad = tmp.path().join("corrupt.png");
        std::fs::write(&good, "x").unwrap();
        std::fs::write(&bad, "x").unwrap();

        let backend = MockBackend::new();
        assert!(backend.identify(&good).is_ok());
        assert!(backend.identify(&bad).is_err());
        assert!(backend.identify(&tmp.path().join("missing.png")).is_err());
        assert_eq!(backend.get_operations().len(), 3);
    }
}
