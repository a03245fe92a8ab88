//! Login Use Case
//!
//! Verifies email + password and issues a session token.

use std::sync::Arc;

use chrono::Utc;
use platform::password::ClearTextPassword;

use crate::application::credentials::verify_password;
use crate::application::session_token::SessionTokenCodec;
use crate::domain::entity::{claims::Claims, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    codec: Arc<SessionTokenCodec>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, codec: Arc<SessionTokenCodec>) -> Self {
        Self { repo, codec }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let password = ClearTextPassword::normalized(input.password);

        // Malformed email, unknown email and wrong password look the same
        let user = match Email::new(&input.email) {
            Ok(email) => self.repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        let stored = user.as_ref().map(|u| u.password_hash.clone());
        if !verify_password(stored, password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let user = user.ok_or(AuthError::InvalidCredentials)?;
        let token = self.codec.issue(&Claims::for_user(&user), Utc::now())?;

        tracing::info!(user_id = %user.id, is_admin = user.is_admin, "User logged in");

        Ok(LoginOutput { token, user })
    }
}
