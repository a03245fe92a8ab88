//! Domain Layer
//!
//! Contains entities, image folders, and repository traits.

pub mod entity;
pub mod folder;
pub mod repository;

// Re-exports
pub use folder::ImageFolder;
pub use repository::{
    AboutRepository, CarBuildRepository, ContactRepository, ContentStore, ImageRepository,
    ResumeRepository,
};
