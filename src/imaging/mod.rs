//! Preview images for the gallery.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` (header only) |
//! | **Decode** | `image::ImageReader` with format sniffing |
//! | **Resize** | Lanczos3 to a maximum height, never upscaling |
//! | **Encode** | `image::codecs::jpeg::JpegEncoder`, then base64 |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing a preview
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Picking a folder's preview image and building data URIs

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::fit_to_height;
pub use operations::{first_decodable_image, is_decodable_image, preview_data_uri};
pub use params::{PreviewParams, Quality};
pub use rust_backend::RustBackend;
