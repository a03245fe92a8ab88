//! Session Claims
//!
//! The identity assertions carried inside a session token.

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

/// Identity carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: UserId,
    pub email: String,
    pub is_admin: bool,
}

impl Claims {
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.as_str().to_string(),
            is_admin: user.is_admin,
        }
    }
}
