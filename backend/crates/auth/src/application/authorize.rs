//! Request Authorization
//!
//! Two gates, always in this order:
//!
//! 1. **AuthGate** ([`authenticate`]): the request carries a valid bearer token.
//! 2. **AdminGate** ([`authorize_admin`]): the authenticated caller is an admin.
//!
//! [`AuthenticatedUser`] can only be built by [`authenticate`] and
//! [`AdminUser`] only from an `AuthenticatedUser`, so the admin check cannot
//! run on unvalidated claims.

use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::application::session_token::SessionTokenCodec;
use crate::domain::entity::claims::Claims;
use crate::error::{AuthError, AuthResult};

const BEARER_SCHEME: &str = "bearer";

/// A caller whose session token has been validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    claims: Claims,
}

impl AuthenticatedUser {
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn user_id(&self) -> UserId {
        self.claims.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.claims.is_admin
    }
}

/// An authenticated caller that holds administrator rights
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    claims: Claims,
}

impl AdminUser {
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn user_id(&self) -> UserId {
        self.claims.user_id
    }
}

/// Extract the token from `Authorization: Bearer <token>`
///
/// The scheme is matched case-insensitively; an empty token counts as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// AuthGate decision
pub fn authenticate(
    headers: &HeaderMap,
    codec: &SessionTokenCodec,
    now: DateTime<Utc>,
) -> AuthResult<AuthenticatedUser> {
    let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
    let claims = codec.validate(token, now)?;
    Ok(AuthenticatedUser { claims })
}

/// AdminGate decision
pub fn authorize_admin(user: AuthenticatedUser) -> AuthResult<AdminUser> {
    if !user.claims.is_admin {
        tracing::debug!(user_id = %user.claims.user_id, "Non-admin denied access to admin route");
        return Err(AuthError::Forbidden);
    }

    Ok(AdminUser {
        claims: user.claims,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session_token::{SessionSecret, TokenError};
    use axum::http::HeaderValue;
    use chrono::TimeZone;
    use std::time::Duration;

    fn codec() -> SessionTokenCodec {
        SessionTokenCodec::new(SessionSecret::new(b"gate-secret".to_vec()), Duration::from_secs(3600))
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn claims(is_admin: bool) -> Claims {
        Claims {
            user_id: UserId::new(7),
            email: "someone@example.com".to_string(),
            is_admin,
        }
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers_with("bearer xyz")), Some("xyz"));
        assert_eq!(bearer_token(&headers_with("BEARER  xyz ")), Some("xyz"));
        assert_eq!(bearer_token(&headers_with("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers_with("Bearer")), None);
        assert_eq!(bearer_token(&headers_with("Bearer   ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_missing_header_is_missing_token() {
        let err = authenticate(&HeaderMap::new(), &codec(), now()).unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let err = authenticate(&headers_with("Bearer garbage"), &codec(), now()).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(TokenError::Malformed)));
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let codec = codec();
        let token = codec.issue(&claims(false), now()).unwrap();
        let later = now() + chrono::Duration::hours(2);
        let err = authenticate(&headers_with(&format!("Bearer {token}")), &codec, later)
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(TokenError::Expired)));
    }

    #[test]
    fn test_admin_gate() {
        let codec = codec();

        let user_token = codec.issue(&claims(false), now()).unwrap();
        let user = authenticate(&headers_with(&format!("Bearer {user_token}")), &codec, now())
            .unwrap();
        assert_eq!(user.user_id(), UserId::new(7));
        assert!(!user.is_admin());
        assert!(matches!(authorize_admin(user), Err(AuthError::Forbidden)));

        let admin_token = codec.issue(&claims(true), now()).unwrap();
        let admin = authenticate(&headers_with(&format!("Bearer {admin_token}")), &codec, now())
            .unwrap();
        let admin = authorize_admin(admin).unwrap();
        assert_eq!(admin.claims(), &claims(true));
    }
}
