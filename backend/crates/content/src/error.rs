//! Content Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Content-specific result type alias
pub type ContentResult<T> = Result<T, ContentError>;

/// Content-specific error variants
#[derive(Debug, Error)]
pub enum ContentError {
    /// Record does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Image folder outside the allowed set
    #[error("Invalid folder")]
    InvalidFolder,

    /// Multipart body could not be used
    #[error("{0}")]
    BadUpload(String),

    /// Upload body over the size limit
    #[error("Upload too large")]
    TooLarge,

    /// Request body failed validation
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error (image seeding)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::NotFound(_) => ErrorKind::NotFound,
            ContentError::InvalidFolder
            | ContentError::BadUpload(_)
            | ContentError::Validation(_) => ErrorKind::BadRequest,
            ContentError::TooLarge => ErrorKind::PayloadTooLarge,
            ContentError::Database(_) | ContentError::Io(_) => ErrorKind::InternalServerError,
        }
    }
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::InvalidFolder => AppError::bad_request("Invalid folder")
                .with_action("Use one of: gallery, about, carbuild, hero"),
            ContentError::Database(e) => AppError::from(e),
            ContentError::Io(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        if let ContentError::BadUpload(reason) = &self {
            tracing::warn!(reason = %reason, "Rejected upload");
        }
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(ContentError::NotFound("Image").kind(), ErrorKind::NotFound);
        assert_eq!(ContentError::InvalidFolder.kind(), ErrorKind::BadRequest);
        assert_eq!(
            ContentError::BadUpload("No files provided".into()).kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(ContentError::TooLarge.kind(), ErrorKind::PayloadTooLarge);
        assert_eq!(
            ContentError::Database(sqlx::Error::RowNotFound).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_not_found_message() {
        let app: AppError = ContentError::NotFound("Resume section").into();
        assert_eq!(app.status_code(), 404);
        assert_eq!(app.message(), "Resume section not found");
    }

    #[test]
    fn test_invalid_folder_has_action() {
        let app: AppError = ContentError::InvalidFolder.into();
        assert_eq!(app.status_code(), 400);
        assert!(app.action().unwrap().contains("carbuild"));
    }
}
