//! Data Transfer Objects

use kernel::id::ContactSubmissionId;
use serde::{Deserialize, Serialize};

use crate::application::gallery::UploadedImage;

/// Plain acknowledgement for updates and deletes
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response to a public contact form post
#[derive(Debug, Serialize)]
pub struct ContactCreated {
    pub id: ContactSubmissionId,
    pub message: &'static str,
}

/// Response to an image upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub uploaded: usize,
    pub images: Vec<UploadedImage>,
}

/// Response to an image delete
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// `GET /images?folder=`
#[derive(Debug, Deserialize)]
pub struct ImagesQuery {
    pub folder: Option<String>,
}
