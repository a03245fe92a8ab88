//! Create User Use Case
//!
//! Administrators create regular accounts. There is no self-service signup.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::ClearTextPassword;

use crate::application::credentials::hash_password;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Maximum display name length (code points)
const USERNAME_MAX_LENGTH: usize = 100;

/// Create user input
pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub username: String,
}

/// Create user use case
pub struct CreateUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> CreateUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreateUserInput, created_by: UserId) -> AuthResult<User> {
        let email = Email::new(&input.email)?;
        let username = validate_username(&input.username)?;
        let password = ClearTextPassword::new(input.password)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(password).await?;

        let user = self
            .repo
            .insert(NewUser::regular(email, password_hash, username))
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    AuthError::EmailTaken
                } else {
                    e
                }
            })?;

        tracing::info!(
            user_id = %user.id,
            created_by = %created_by,
            "User created"
        );

        Ok(user)
    }
}

fn validate_username(raw: &str) -> AuthResult<String> {
    let username = raw.trim();

    if username.is_empty() {
        return Err(AuthError::Validation("Username cannot be empty".into()));
    }

    if username.chars().count() > USERNAME_MAX_LENGTH {
        return Err(AuthError::Validation(format!(
            "Username must be at most {USERNAME_MAX_LENGTH} characters"
        )));
    }

    if username.chars().any(char::is_control) {
        return Err(AuthError::Validation(
            "Username contains invalid characters".into(),
        ));
    }

    Ok(username.to_string())
}
