//! Application Layer
//!
//! Use cases that go beyond single repository calls.

pub mod gallery;

pub use gallery::{
    SeedReport, UploadedFile, UploadedImage, resolve_content_type, seed_images, upload_images,
};
