//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup by
//! the binary; nothing here reads the environment.

use std::time::Duration;

use crate::application::bootstrap::AdminBootstrapConfig;
use crate::application::session_token::{SessionSecret, SessionTokenCodec};

/// Auth application configuration
#[derive(Debug)]
pub struct AuthConfig {
    /// HMAC key for session tokens
    pub session_secret: SessionSecret,
    /// Session token lifetime
    pub token_ttl: Duration,
    /// Administrator account ensured at startup
    pub admin: AdminBootstrapConfig,
    /// Abort startup when the administrator cannot be ensured
    pub admin_bootstrap_required: bool,
}

impl AuthConfig {
    /// Default session lifetime (24 hours)
    pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

    pub fn new(session_secret: SessionSecret, admin: AdminBootstrapConfig) -> Self {
        Self {
            session_secret,
            token_ttl: Self::DEFAULT_TOKEN_TTL,
            admin,
            admin_bootstrap_required: false,
        }
    }

    /// Create config with a random session secret (for development and tests)
    pub fn with_random_secret(admin: AdminBootstrapConfig) -> Self {
        Self::new(SessionSecret::random(), admin)
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_bootstrap_required(mut self, required: bool) -> Self {
        self.admin_bootstrap_required = required;
        self
    }

    /// Split into the token codec and the bootstrap settings
    pub fn into_parts(self) -> (SessionTokenCodec, AdminBootstrapConfig, bool) {
        let codec = SessionTokenCodec::new(self.session_secret, self.token_ttl);
        (codec, self.admin, self.admin_bootstrap_required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::with_random_secret(AdminBootstrapConfig::new(
            "admin@example.com",
            "changeme",
        ));
        assert_eq!(config.token_ttl, Duration::from_secs(86_400));
        assert!(!config.admin_bootstrap_required);

        let (codec, admin, required) = config
            .with_token_ttl(Duration::from_secs(60))
            .with_bootstrap_required(true)
            .into_parts();
        assert_eq!(codec.ttl(), Duration::from_secs(60));
        assert_eq!(admin.display_name, "Admin");
        assert!(required);
    }
}
