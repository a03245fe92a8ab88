//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if an account with this email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Insert a new user, returning it with its assigned id
    ///
    /// A duplicate email surfaces as an error for which
    /// [`AuthError::is_unique_violation`](crate::error::AuthError::is_unique_violation)
    /// returns `true`.
    async fn insert(&self, user: NewUser) -> AuthResult<User>;
}
