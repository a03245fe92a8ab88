//! Gallery Image Use Cases
//!
//! Upload from multipart requests and one-time seeding from a directory
//! tree laid out as `<base>/<folder>/<file>`.

use std::path::Path;

use kernel::id::GalleryImageId;
use serde::Serialize;

use crate::domain::entity::{NewImage, image_url};
use crate::domain::folder::{DEFAULT_IMAGE_CONTENT_TYPE, ImageFolder, image_content_type};
use crate::domain::repository::ImageRepository;
use crate::error::{ContentError, ContentResult};

/// A file pulled out of a multipart body
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// An image stored by an upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadedImage {
    pub id: GalleryImageId,
    pub filename: String,
    pub folder: ImageFolder,
    pub url: String,
}

/// Result of seeding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Decide the stored content type of an uploaded file
///
/// The part's declared type wins when it is an image type; otherwise the
/// file extension decides. Anything else is not an image.
pub fn resolve_content_type(filename: &str, declared: Option<&str>) -> Option<String> {
    let declared = declared
        .map(str::trim)
        .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream");

    match declared {
        Some(ct) if ct.starts_with("image/") => Some(ct.to_string()),
        Some(_) => None,
        None => Some(
            image_content_type(filename)
                .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
                .to_string(),
        ),
    }
}

/// Store uploaded files; files that cannot be stored are skipped and logged
pub async fn upload_images<R>(
    repo: &R,
    folder: ImageFolder,
    files: Vec<UploadedFile>,
) -> ContentResult<Vec<UploadedImage>>
where
    R: ImageRepository,
{
    if files.is_empty() {
        return Err(ContentError::BadUpload("No files provided".into()));
    }

    let mut uploaded = Vec::with_capacity(files.len());

    for file in files {
        if file.data.is_empty() {
            tracing::warn!(filename = %file.filename, "Skipping empty upload");
            continue;
        }

        let Some(content_type) = resolve_content_type(&file.filename, file.content_type.as_deref())
        else {
            tracing::warn!(filename = %file.filename, "Skipping non-image upload");
            continue;
        };

        let image = NewImage {
            folder,
            filename: file.filename.clone(),
            data: file.data,
            content_type,
        };

        match repo.insert_image(image).await {
            Ok(id) => {
                tracing::info!(image_id = %id, folder = %folder, filename = %file.filename, "Image uploaded");
                uploaded.push(UploadedImage {
                    id,
                    filename: file.filename,
                    folder,
                    url: image_url(id),
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, filename = %file.filename, "Failed to store image");
            }
        }
    }

    Ok(uploaded)
}

/// Populate an empty image table from `base_dir/<folder>/*`
///
/// Does nothing when any image already exists. Missing folders, non-image
/// files and unreadable files are skipped.
pub async fn seed_images<R>(repo: &R, base_dir: &Path) -> ContentResult<SeedReport>
where
    R: ImageRepository,
{
    let existing = repo.count_images().await?;
    if existing > 0 {
        tracing::info!(existing, "Gallery already populated, skipping seed");
        return Ok(SeedReport::default());
    }

    let mut report = SeedReport::default();

    for folder in ImageFolder::ALL {
        let dir = base_dir.join(folder.as_str());

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %dir.display(), "Seed folder missing, skipping");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort();

        for path in paths {
            let Some(filename) = path.file_name().and_then(|n| n.to_str()).map(str::to_string)
            else {
                report.skipped += 1;
                continue;
            };
            let Some(content_type) = image_content_type(&filename) else {
                report.skipped += 1;
                continue;
            };

            let data = match tokio::fs::read(&path).await {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(error = %e, path = %path.display(), "Failed to read seed image");
                    report.skipped += 1;
                    continue;
                }
            };

            let image = NewImage {
                folder,
                filename,
                data,
                content_type: content_type.to_string(),
            };

            match repo.insert_image(image).await {
                Ok(_) => report.inserted += 1,
                Err(e) => {
                    tracing::warn!(error = %e, path = %path.display(), "Failed to seed image");
                    report.skipped += 1;
                }
            }
        }
    }

    tracing::info!(
        inserted = report.inserted,
        skipped = report.skipped,
        "Image seeding complete"
    );

    Ok(report)
}
