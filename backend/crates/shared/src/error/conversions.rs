//! Error Conversions
//!
//! `From` impls that let `?` lift library errors into [`AppError`], plus
//! the axum response mapping.

use super::app_error::AppError;
use super::kind::ErrorKind;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal("I/O operation failed").with_source(err)
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::bad_request("Invalid ID").with_source(err)
    }
}

impl From<crate::id::ParseIdError> for AppError {
    fn from(err: crate::id::ParseIdError) -> Self {
        AppError::bad_request("Invalid ID").with_source(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_request("Invalid request body").with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

/// Postgres SQLSTATE codes
/// <https://www.postgresql.org/docs/current/errcodes-appendix.html>
#[cfg(feature = "sqlx")]
fn kind_for_sqlstate(code: &str) -> (ErrorKind, &'static str) {
    match code {
        "23505" => (ErrorKind::Conflict, "Record already exists"),
        "23502" | "23514" => (ErrorKind::BadRequest, "Required field is missing or invalid"),
        "22001" => (ErrorKind::BadRequest, "Value too long"),
        c if c.starts_with("08") || c.starts_with("53") || c.starts_with("57") => {
            (ErrorKind::ServiceUnavailable, "Database unavailable")
        }
        _ => (ErrorKind::InternalServerError, "Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, message) = match &err {
            sqlx::Error::RowNotFound => (ErrorKind::NotFound, "Record not found"),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                (ErrorKind::ServiceUnavailable, "Database unavailable")
            }
            sqlx::Error::Database(db_err) => match db_err.code() {
                Some(code) => kind_for_sqlstate(&code),
                None => (ErrorKind::InternalServerError, "Database error"),
            },
            _ => (ErrorKind::InternalServerError, "Database error"),
        };
        AppError::new(kind, message).with_source(err)
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;
        use std::error::Error;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_server_error() {
            tracing::error!(
                error = %self,
                source = ?self.source().map(|s| s.to_string()),
                "Request failed with server error"
            );
        }

        match self.problem_details() {
            Some(body) => (status, Json(body)).into_response(),
            None => status.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_is_internal() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let app_err: AppError = io_err.into();
        assert_eq!(app_err.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_id_parse_errors_are_bad_request() {
        let app_err: AppError = "abc".parse::<i64>().unwrap_err().into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
        assert_eq!(app_err.message(), "Invalid ID");

        let app_err: AppError = "0".parse::<crate::id::UserId>().unwrap_err().into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlstate_mapping() {
        assert_eq!(kind_for_sqlstate("23505").0, ErrorKind::Conflict);
        assert_eq!(kind_for_sqlstate("22001").0, ErrorKind::BadRequest);
        assert_eq!(kind_for_sqlstate("57P01").0, ErrorKind::ServiceUnavailable);
        assert_eq!(kind_for_sqlstate("42P01").0, ErrorKind::InternalServerError);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_pool_timeout_is_unavailable() {
        let app_err: AppError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(app_err.kind(), ErrorKind::ServiceUnavailable);
    }
}
