//! User Entity
//!
//! An account that can log in. The password hash is carried as an opaque
//! PHC string and never leaves the crate in a response.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::email::Email;

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Database serial identifier
    pub id: UserId,
    /// Login email (unique, lowercased)
    pub email: Email,
    /// Argon2id PHC string
    pub password_hash: HashedPassword,
    /// Display name
    pub username: String,
    /// Administrator flag
    pub is_admin: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// A user that has not been persisted yet
///
/// The store assigns the id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: HashedPassword,
    pub username: String,
    pub is_admin: bool,
}

impl NewUser {
    /// A regular (non-admin) account
    pub fn regular(email: Email, password_hash: HashedPassword, username: String) -> Self {
        Self {
            email,
            password_hash,
            username,
            is_admin: false,
        }
    }

    /// An administrator account
    pub fn admin(email: Email, password_hash: HashedPassword, username: String) -> Self {
        Self {
            email,
            password_hash,
            username,
            is_admin: true,
        }
    }

    /// Materialize into a [`User`] with store-assigned fields
    pub fn into_user(self, id: UserId, now: DateTime<Utc>) -> User {
        User {
            id,
            email: self.email,
            password_hash: self.password_hash,
            username: self.username,
            is_admin: self.is_admin,
            created_at: now,
            updated_at: now,
        }
    }
}
