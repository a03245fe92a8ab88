//! Admin Bootstrap
//!
//! Ensures the configured administrator account exists before the server
//! starts accepting requests. Idempotent: an existing account is left
//! untouched (its password is never reset).

use std::fmt;
use std::sync::Arc;

use kernel::id::UserId;
use platform::password::ClearTextPassword;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::application::credentials::hash_password;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::AuthError;

/// Display name given to the bootstrapped administrator
pub const DEFAULT_ADMIN_DISPLAY_NAME: &str = "Admin";

/// Administrator account settings
#[derive(Clone)]
pub struct AdminBootstrapConfig {
    pub email: String,
    pub password: Zeroizing<String>,
    pub display_name: String,
}

impl AdminBootstrapConfig {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
            display_name: DEFAULT_ADMIN_DISPLAY_NAME.to_string(),
        }
    }
}

impl fmt::Debug for AdminBootstrapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminBootstrapConfig")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// What the bootstrap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// A new administrator was inserted
    Created(UserId),
    /// An account with the configured email already exists
    AlreadyPresent,
}

/// Bootstrap could not ensure the administrator
///
/// Non-fatal by default: startup logs it and continues.
#[derive(Debug, Error)]
#[error("admin bootstrap failed: {0}")]
pub struct BootstrapWarning(#[source] pub AuthError);

/// Idempotent administrator provisioning
pub struct AdminBootstrapper<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: AdminBootstrapConfig,
}

impl<R> AdminBootstrapper<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: AdminBootstrapConfig) -> Self {
        Self { repo, config }
    }

    pub async fn run(&self) -> Result<BootstrapOutcome, BootstrapWarning> {
        self.ensure_admin().await.map_err(BootstrapWarning)
    }

    async fn ensure_admin(&self) -> Result<BootstrapOutcome, AuthError> {
        let email = Email::new(&self.config.email)?;

        if self.repo.exists_by_email(&email).await? {
            tracing::info!(email = %email, "Admin user already exists");
            return Ok(BootstrapOutcome::AlreadyPresent);
        }

        let password = ClearTextPassword::normalized(self.config.password.as_str().to_owned());
        let password_hash = hash_password(password).await?;

        let admin = NewUser::admin(email, password_hash, self.config.display_name.clone());

        match self.repo.insert(admin).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, email = %user.email, "Admin user created");
                Ok(BootstrapOutcome::Created(user.id))
            }
            // Another instance won the race
            Err(e) if e.is_unique_violation() => Ok(BootstrapOutcome::AlreadyPresent),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryUserRepository;

    fn config() -> AdminBootstrapConfig {
        AdminBootstrapConfig::new("Admin@Example.com", "changeme")
    }

    #[tokio::test]
    async fn test_creates_admin_once() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let bootstrapper = AdminBootstrapper::new(repo.clone(), config());

        let first = bootstrapper.run().await.unwrap();
        assert!(matches!(first, BootstrapOutcome::Created(_)));

        let second = bootstrapper.run().await.unwrap();
        assert_eq!(second, BootstrapOutcome::AlreadyPresent);

        assert_eq!(repo.len(), 1);
        let email = Email::new("admin@example.com").unwrap();
        let admin = repo.find_by_email(&email).await.unwrap().unwrap();
        assert!(admin.is_admin);
        assert_eq!(admin.username, "Admin");
        assert!(admin
            .password_hash
            .verify(&ClearTextPassword::normalized("changeme".to_string())));
    }

    #[tokio::test]
    async fn test_existing_password_is_not_reset() {
        let repo = Arc::new(InMemoryUserRepository::new());
        AdminBootstrapper::new(repo.clone(), config()).run().await.unwrap();

        let mut changed = config();
        changed.password = Zeroizing::new("a-different-password".to_string());
        let outcome = AdminBootstrapper::new(repo.clone(), changed).run().await.unwrap();
        assert_eq!(outcome, BootstrapOutcome::AlreadyPresent);

        let email = Email::new("admin@example.com").unwrap();
        let admin = repo.find_by_email(&email).await.unwrap().unwrap();
        assert!(admin
            .password_hash
            .verify(&ClearTextPassword::normalized("changeme".to_string())));
    }

    #[tokio::test]
    async fn test_store_failure_is_warning() {
        let repo = Arc::new(InMemoryUserRepository::new());
        repo.fail_writes(true);

        let warning = AdminBootstrapper::new(repo.clone(), config())
            .run()
            .await
            .unwrap_err();
        assert!(matches!(warning.0, AuthError::Database(_)));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_email_is_warning() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let warning = AdminBootstrapper::new(repo, AdminBootstrapConfig::new("not-an-email", "x"))
            .run()
            .await
            .unwrap_err();
        assert!(matches!(warning.0, AuthError::Validation(_)));
    }
}
