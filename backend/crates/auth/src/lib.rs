//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Email + password login returning a signed bearer token
//! - Two-tier request gates: authentication, then administrator check
//! - Administrator-only user creation
//! - Idempotent administrator bootstrap at startup
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (salt and parameters in the PHC string)
//! - Stateless HS256 session tokens; expiry is the only termination
//! - Unknown email and wrong password are indistinguishable to clients
//! - Gate rejections carry no body

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::bootstrap::{
    AdminBootstrapConfig, AdminBootstrapper, BootstrapOutcome, BootstrapWarning,
};
pub use application::authorize::{AdminUser, AuthenticatedUser};
pub use application::config::AuthConfig;
pub use application::session_token::{SessionSecret, SessionTokenCodec, TokenError};
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryUserRepository, postgres::PgUserRepository};
pub use presentation::middleware::AuthGate;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
