//! Application Layer
//!
//! Use cases and application services.

pub mod authorize;
pub mod bootstrap;
pub mod config;
pub mod create_user;
pub mod credentials;
pub mod login;
pub mod session_token;

// Re-exports
pub use authorize::{AdminUser, AuthenticatedUser, authenticate, authorize_admin, bearer_token};
pub use bootstrap::{AdminBootstrapConfig, AdminBootstrapper, BootstrapOutcome, BootstrapWarning};
pub use config::AuthConfig;
pub use create_user::{CreateUserInput, CreateUserUseCase};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use session_token::{SessionSecret, SessionTokenCodec, TokenError};
