//! Session Token Codec
//!
//! Stateless bearer tokens in compact JWS form:
//!
//! ```text
//! base64url(header) "." base64url(payload) "." base64url(HMAC-SHA256(secret, header "." payload))
//! ```
//!
//! The header is always `{"alg":"HS256","typ":"JWT"}`. The payload carries
//! `user_id`, `email`, `is_admin`, `iat` and `exp` (seconds since the epoch).
//! There is no server-side session table; expiry is the only termination.
//!
//! Validation order matters: the signature is checked before the payload is
//! decoded, so nothing attacker-controlled beyond the header is parsed
//! unless the token is authentic.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::entity::claims::Claims;
use crate::error::{AuthError, AuthResult};

/// The only accepted signing algorithm
pub const ALGORITHM: &str = "HS256";

const TOKEN_TYPE: &str = "JWT";

/// Why a token was rejected
///
/// Only used for logging. Every variant maps to the same bodiless 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("unsupported signing algorithm")]
    UnsupportedAlgorithm,

    #[error("signature mismatch")]
    BadSignature,

    #[error("token expired")]
    Expired,
}

/// HMAC key for session tokens (zeroized on drop)
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SessionSecret(Vec<u8>);

impl SessionSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// 32 random bytes, for development and tests
    pub fn random() -> Self {
        Self(platform::crypto::random_bytes(32))
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionSecret")
            .field(&"[REDACTED]")
            .finish()
    }
}

#[derive(Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct Payload {
    user_id: UserId,
    email: String,
    is_admin: bool,
    iat: i64,
    exp: i64,
}

/// Issues and validates session tokens
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug)]
pub struct SessionTokenCodec {
    secret: SessionSecret,
    ttl: Duration,
}

impl SessionTokenCodec {
    pub fn new(secret: SessionSecret, ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `claims`, valid from `now` for the configured TTL
    pub fn issue(&self, claims: &Claims, now: DateTime<Utc>) -> AuthResult<String> {
        let iat = now.timestamp();
        let ttl_secs = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);

        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: Some(TOKEN_TYPE.to_string()),
        };
        let payload = Payload {
            user_id: claims.user_id,
            email: claims.email.clone(),
            is_admin: claims.is_admin,
            iat,
            exp: iat.saturating_add(ttl_secs),
        };

        let header_json = serde_json::to_vec(&header)
            .map_err(|e| AuthError::Internal(format!("token header encoding failed: {e}")))?;
        let payload_json = serde_json::to_vec(&payload)
            .map_err(|e| AuthError::Internal(format!("token payload encoding failed: {e}")))?;

        let signing_input = format!(
            "{}.{}",
            to_base64url(&header_json),
            to_base64url(&payload_json)
        );
        let signature = hmac_sha256(self.secret.as_bytes(), signing_input.as_bytes());

        Ok(format!("{signing_input}.{}", to_base64url(&signature)))
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut segments = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed);
        };

        let header: Header = decode_segment(header_b64)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm);
        }

        let signing_input_len = header_b64.len() + 1 + payload_b64.len();
        let signing_input = &token[..signing_input_len];
        let signature = from_base64url(signature_b64).map_err(|_| TokenError::BadSignature)?;
        if !verify_hmac_sha256(self.secret.as_bytes(), signing_input.as_bytes(), &signature) {
            return Err(TokenError::BadSignature);
        }

        let payload: Payload = decode_segment(payload_b64)?;
        if now.timestamp() >= payload.exp {
            return Err(TokenError::Expired);
        }

        Ok(Claims {
            user_id: payload.user_id,
            email: payload.email,
            is_admin: payload.is_admin,
        })
    }
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, TokenError> {
    let bytes = from_base64url(segment).map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const DAY: Duration = Duration::from_secs(86_400);

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn codec(secret: &str) -> SessionTokenCodec {
        SessionTokenCodec::new(SessionSecret::new(secret.as_bytes()), DAY)
    }

    fn admin_claims() -> Claims {
        Claims {
            user_id: UserId::new(1),
            email: "a@b.com".to_string(),
            is_admin: true,
        }
    }

    fn payload_of(token: &str) -> serde_json::Value {
        let segment = token.split('.').nth(1).unwrap();
        serde_json::from_slice(&from_base64url(segment).unwrap()).unwrap()
    }

    #[test]
    fn test_concrete_scenario() {
        let codec = codec("s");
        let token = codec.issue(&admin_claims(), at(1000)).unwrap();

        let payload = payload_of(&token);
        assert_eq!(payload["user_id"], 1);
        assert_eq!(payload["email"], "a@b.com");
        assert_eq!(payload["is_admin"], true);
        assert_eq!(payload["iat"], 1000);
        assert_eq!(payload["exp"], 87_400);

        assert_eq!(codec.validate(&token, at(1000)).unwrap(), admin_claims());
        assert_eq!(codec.validate(&token, at(87_401)), Err(TokenError::Expired));

        let other = self::codec("t");
        assert_eq!(other.validate(&token, at(1000)), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_header_is_hs256_jwt() {
        let token = codec("s").issue(&admin_claims(), at(0)).unwrap();
        let header = token.split('.').next().unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&from_base64url(header).unwrap()).unwrap();
        assert_eq!(json["alg"], "HS256");
        assert_eq!(json["typ"], "JWT");
    }

    #[test]
    fn test_expiry_boundary() {
        let codec = codec("s");
        let token = codec.issue(&admin_claims(), at(1000)).unwrap();
        assert!(codec.validate(&token, at(87_399)).is_ok());
        assert_eq!(codec.validate(&token, at(87_400)), Err(TokenError::Expired));
        assert_eq!(codec.validate(&token, at(87_401)), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_rejected_within_ttl() {
        let token = codec("secret-one").issue(&admin_claims(), at(1000)).unwrap();
        assert_eq!(
            codec("secret-two").validate(&token, at(1001)),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let codec = codec("s");
        let user = Claims {
            is_admin: false,
            ..admin_claims()
        };
        let token = codec.issue(&user, at(1000)).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let mut payload = payload_of(&token);
        payload["is_admin"] = serde_json::Value::Bool(true);
        let forged_payload = to_base64url(&serde_json::to_vec(&payload).unwrap());
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert_eq!(codec.validate(&forged, at(1000)), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_alg_none_rejected() {
        let codec = codec("s");
        let token = codec.issue(&admin_claims(), at(1000)).unwrap();
        let payload = token.split('.').nth(1).unwrap();
        let header = to_base64url(br#"{"alg":"none","typ":"JWT"}"#);

        assert_eq!(
            codec.validate(&format!("{header}.{payload}."), at(1000)),
            Err(TokenError::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn test_malformed_tokens() {
        let codec = codec("s");
        for bad in ["", "abc", "a.b", "a.b.c.d", "!!!.e30.sig", "e30.e30.sig"] {
            assert!(codec.validate(bad, at(0)).is_err(), "{bad:?} should be rejected");
        }
        assert_eq!(codec.validate("a.b", at(0)), Err(TokenError::Malformed));
        assert_eq!(codec.validate("a.b.c.d", at(0)), Err(TokenError::Malformed));
        // `e30` is `{}`: no alg field
        assert_eq!(codec.validate("e30.e30.sig", at(0)), Err(TokenError::Malformed));
    }

    #[test]
    fn test_authentic_but_undecodable_payload_is_malformed() {
        let secret = "s";
        let header = to_base64url(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = to_base64url(b"not json");
        let input = format!("{header}.{payload}");
        let signature = to_base64url(&hmac_sha256(secret.as_bytes(), input.as_bytes()));

        assert_eq!(
            codec(secret).validate(&format!("{input}.{signature}"), at(0)),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = SessionSecret::new(b"super-secret".to_vec());
        assert!(!format!("{secret:?}").contains("super-secret"));
        assert_eq!(SessionSecret::random().as_bytes().len(), 32);
    }
}
