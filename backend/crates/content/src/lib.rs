//! Content Backend Module
//!
//! Portfolio records served by the public site and edited by administrators:
//! about blurbs, resume sections, car build log entries, contact form
//! submissions and gallery images (stored in the database as bytes).
//!
//! Same layering as the auth crate:
//! - `domain/` - Entities, image folders, repository traits
//! - `application/` - Image upload and directory seeding
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Write routes are wrapped with [`auth::AuthGate::protect_admin`].

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use application::gallery::{SeedReport, seed_images};
pub use domain::folder::ImageFolder;
pub use domain::repository::ContentStore;
pub use error::{ContentError, ContentResult};
pub use infra::{memory::InMemoryContentRepository, postgres::PgContentRepository};
pub use presentation::router::content_router;
