//! Error Kind
//!
//! [`ErrorKind`] is the closed set of outcomes an API error can have. Crate
//! errors (`AuthError`, `ContentError`) pick a kind; the kind alone decides
//! the HTTP status and whether a body is sent.

use serde::Serialize;

/// HTTP-facing error classification
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Conflict.status_code(), 409);
/// assert!(ErrorKind::Forbidden.is_access_denial());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed body, failed validation, unknown image folder
    BadRequest,
    /// Missing or unusable session token, wrong credentials
    Unauthorized,
    /// Valid session without administrator rights
    Forbidden,
    /// Record id does not exist
    NotFound,
    /// Unique constraint (duplicate email)
    Conflict,
    /// Upload body over the limit
    PayloadTooLarge,
    InternalServerError,
    /// Database unreachable or pool exhausted
    ServiceUnavailable,
}

impl ErrorKind {
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::PayloadTooLarge => 413,
            ErrorKind::InternalServerError => 500,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// Reason phrase, used as the problem `title`
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::PayloadTooLarge => "Payload Too Large",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// 5xx: logged with the source error, never shown to the client
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// 401/403 are answered with the status line only, so a client cannot
    /// tell which gate rejected it or why.
    pub const fn is_access_denial(&self) -> bool {
        matches!(self, ErrorKind::Unauthorized | ErrorKind::Forbidden)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorKind; 8] = [
        ErrorKind::BadRequest,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::PayloadTooLarge,
        ErrorKind::InternalServerError,
        ErrorKind::ServiceUnavailable,
    ];

    #[test]
    fn test_only_gate_kinds_are_access_denials() {
        let denials: Vec<_> = ALL.into_iter().filter(ErrorKind::is_access_denial).collect();
        assert_eq!(denials, vec![ErrorKind::Unauthorized, ErrorKind::Forbidden]);
    }

    #[test]
    fn test_server_errors() {
        let server: Vec<_> = ALL.into_iter().filter(ErrorKind::is_server_error).collect();
        assert_eq!(
            server,
            vec![ErrorKind::InternalServerError, ErrorKind::ServiceUnavailable]
        );
    }

    #[test]
    fn test_display_is_reason_phrase() {
        assert_eq!(ErrorKind::PayloadTooLarge.to_string(), "Payload Too Large");
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
    }
}
