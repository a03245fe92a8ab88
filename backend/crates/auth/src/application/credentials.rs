//! Credential Hashing on the Blocking Pool
//!
//! Argon2id is deliberately slow and memory-hard. Running it inline would
//! stall a runtime worker, so every hash and verify goes through
//! `spawn_blocking`.

use std::sync::OnceLock;

use platform::password::{ClearTextPassword, HashedPassword};

use crate::error::{AuthError, AuthResult};

/// Hash a password for storage
pub async fn hash_password(password: ClearTextPassword) -> AuthResult<HashedPassword> {
    tokio::task::spawn_blocking(move || password.hash())
        .await
        .map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))?
        .map_err(AuthError::from)
}

/// Verify a password against a stored hash
///
/// With `stored = None` (unknown account) the password is checked against a
/// throwaway hash and `false` is returned, so both failure paths cost one
/// Argon2 evaluation.
pub async fn verify_password(
    stored: Option<HashedPassword>,
    password: ClearTextPassword,
) -> AuthResult<bool> {
    tokio::task::spawn_blocking(move || match stored {
        Some(hash) => hash.verify(&password),
        None => {
            let _ = dummy_hash().verify(&password);
            false
        }
    })
    .await
    .map_err(|e| AuthError::Internal(format!("verification task failed: {e}")))
}

fn dummy_hash() -> &'static HashedPassword {
    static DUMMY: OnceLock<HashedPassword> = OnceLock::new();
    DUMMY.get_or_init(|| {
        let filler = platform::crypto::to_base64url(&platform::crypto::random_bytes(24));
        ClearTextPassword::normalized(filler)
            .hash()
            .unwrap_or_else(|_| HashedPassword::from_stored(""))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pw(s: &str) -> ClearTextPassword {
        ClearTextPassword::normalized(s.to_string())
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password(pw("Velvet-Harbor-42")).await.unwrap();
        assert!(verify_password(Some(hash.clone()), pw("Velvet-Harbor-42")).await.unwrap());
        assert!(!verify_password(Some(hash), pw("velvet-harbor-42")).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_account_never_verifies() {
        assert!(!verify_password(None, pw("anything")).await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_is_false() {
        let stored = HashedPassword::from_stored("$argon2id$garbage");
        assert!(!verify_password(Some(stored), pw("anything")).await.unwrap());
    }
}
