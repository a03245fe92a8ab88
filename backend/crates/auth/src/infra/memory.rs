//! In-Memory Repository Implementation
//!
//! Used by tests and for running without a database. Mirrors the
//! PostgreSQL unique constraint on `email`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use kernel::id::UserId;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Inner {
    users: HashMap<Email, User>,
    next_id: i64,
}

/// In-memory user repository
#[derive(Default)]
pub struct InMemoryUserRepository {
    inner: Mutex<Inner>,
    fail_writes: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent inserts fail with a database error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.lock().map(|inner| inner.users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> AuthResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| AuthError::Internal("user store lock poisoned".into()))
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.lock()?.users.get(email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.lock()?.users.contains_key(email))
    }

    async fn insert(&self, user: NewUser) -> AuthResult<User> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AuthError::Database(sqlx::Error::PoolTimedOut));
        }

        let mut inner = self.lock()?;
        if inner.users.contains_key(&user.email) {
            return Err(AuthError::EmailTaken);
        }

        inner.next_id += 1;
        let user = user.into_user(UserId::new(inner.next_id), Utc::now());
        inner.users.insert(user.email.clone(), user.clone());

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::HashedPassword;

    fn new_user(email: &str) -> NewUser {
        NewUser::regular(
            Email::new(email).unwrap(),
            HashedPassword::from_stored("$argon2id$placeholder"),
            "Someone".to_string(),
        )
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();
        let first = repo.insert(new_user("one@example.com")).await.unwrap();
        let second = repo.insert(new_user("two@example.com")).await.unwrap();
        assert_eq!(first.id, UserId::new(1));
        assert_eq!(second.id, UserId::new(2));
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let repo = InMemoryUserRepository::new();
        repo.insert(new_user("one@example.com")).await.unwrap();
        let err = repo.insert(new_user("ONE@example.com")).await.unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_lookup() {
        let repo = InMemoryUserRepository::new();
        repo.insert(new_user("one@example.com")).await.unwrap();
        let email = Email::new("one@example.com").unwrap();
        assert!(repo.exists_by_email(&email).await.unwrap());
        assert!(repo.find_by_email(&email).await.unwrap().is_some());

        let missing = Email::new("none@example.com").unwrap();
        assert!(!repo.exists_by_email(&missing).await.unwrap());
        assert!(repo.find_by_email(&missing).await.unwrap().is_none());
    }
}
