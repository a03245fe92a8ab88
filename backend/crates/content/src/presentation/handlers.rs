//! HTTP Handlers

use auth::AdminUser;
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use kernel::id::{
    AboutContentId, CarBuildEntryId, ContactSubmissionId, GalleryImageId, ResumeSectionId,
};
use std::sync::Arc;

use crate::application::gallery::{self, UploadedFile};
use crate::domain::entity::{
    AboutContent, AboutDraft, CarBuildDraft, CarBuildEntry, ContactDraft, ContactSubmission,
    ResumeDraft, ResumeSection, image_url,
};
use crate::domain::folder::ImageFolder;
use crate::domain::repository::ContentStore;
use crate::error::{ContentError, ContentResult};
use crate::presentation::dto::{
    ContactCreated, ImagesQuery, MessageResponse, StatusResponse, UploadResponse,
};

/// Served images never change under the same id
const IMAGE_CACHE_CONTROL: &str = "public, max-age=31536000";

/// Shared state for content handlers
pub struct ContentState<R>
where
    R: ContentStore,
{
    pub repo: Arc<R>,
}

impl<R> Clone for ContentState<R>
where
    R: ContentStore,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

// ============================================================================
// About
// ============================================================================

/// GET /api/about
pub async fn list_about<R: ContentStore>(
    State(state): State<ContentState<R>>,
) -> ContentResult<Json<Vec<AboutContent>>> {
    Ok(Json(state.repo.list_about().await?))
}

/// POST /api/about (admin)
pub async fn create_about<R: ContentStore>(
    State(state): State<ContentState<R>>,
    Json(draft): Json<AboutDraft>,
) -> ContentResult<(StatusCode, Json<AboutContent>)> {
    let about = state.repo.create_about(draft.validated()?).await?;
    Ok((StatusCode::CREATED, Json(about)))
}

/// PUT /api/about/{id} (admin)
pub async fn update_about<R: ContentStore>(
    State(state): State<ContentState<R>>,
    Path(id): Path<AboutContentId>,
    Json(draft): Json<AboutDraft>,
) -> ContentResult<Json<MessageResponse>> {
    state.repo.update_about(id, draft.validated()?).await?;
    Ok(Json(MessageResponse::new("About content updated successfully")))
}

/// DELETE /api/about/{id} (admin)
pub async fn delete_about<R: ContentStore>(
    State(state): State<ContentState<R>>,
    admin: AdminUser,
    Path(id): Path<AboutContentId>,
) -> ContentResult<Json<MessageResponse>> {
    state.repo.delete_about(id).await?;
    tracing::info!(about_id = %id, admin_id = %admin.user_id(), "About content deleted");
    Ok(Json(MessageResponse::new("About content deleted successfully")))
}

// ============================================================================
// Resume
// ============================================================================

/// GET /api/resume
pub async fn list_resume<R: ContentStore>(
    State(state): State<ContentState<R>>,
) -> ContentResult<Json<Vec<ResumeSection>>> {
    Ok(Json(state.repo.list_resume().await?))
}

/// POST /api/resume (admin)
pub async fn create_resume<R: ContentStore>(
    State(state): State<ContentState<R>>,
    Json(draft): Json<ResumeDraft>,
) -> ContentResult<(StatusCode, Json<ResumeSection>)> {
    let section = state.repo.create_resume(draft.validated()?).await?;
    Ok((StatusCode::CREATED, Json(section)))
}

/// PUT /api/resume/{id} (admin)
pub async fn update_resume<R: ContentStore>(
    State(state): State<ContentState<R>>,
    Path(id): Path<ResumeSectionId>,
    Json(draft): Json<ResumeDraft>,
) -> ContentResult<Json<MessageResponse>> {
    state.repo.update_resume(id, draft.validated()?).await?;
    Ok(Json(MessageResponse::new("Resume section updated successfully")))
}

/// DELETE /api/resume/{id} (admin)
pub async fn delete_resume<R: ContentStore>(
    State(state): State<ContentState<R>>,
    admin: AdminUser,
    Path(id): Path<ResumeSectionId>,
) -> ContentResult<Json<MessageResponse>> {
    state.repo.delete_resume(id).await?;
    tracing::info!(resume_id = %id, admin_id = %admin.user_id(), "Resume section deleted");
    Ok(Json(MessageResponse::new("Resume section deleted successfully")))
}

// ============================================================================
// Car Build
// ============================================================================

/// GET /api/carbuild
pub async fn list_car_builds<R: ContentStore>(
    State(state): State<ContentState<R>>,
) -> ContentResult<Json<Vec<CarBuildEntry>>> {
    Ok(Json(state.repo.list_car_builds().await?))
}

/// POST /api/carbuild (admin)
pub async fn create_car_build<R: ContentStore>(
    State(state): State<ContentState<R>>,
    Json(draft): Json<CarBuildDraft>,
) -> ContentResult<(StatusCode, Json<CarBuildEntry>)> {
    let entry = state.repo.create_car_build(draft.validated()?).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/carbuild/{id} (admin)
pub async fn update_car_build<R: ContentStore>(
    State(state): State<ContentState<R>>,
    Path(id): Path<CarBuildEntryId>,
    Json(draft): Json<CarBuildDraft>,
) -> ContentResult<Json<MessageResponse>> {
    state.repo.update_car_build(id, draft.validated()?).await?;
    Ok(Json(MessageResponse::new("Car build entry updated successfully")))
}

/// DELETE /api/carbuild/{id} (admin)
pub async fn delete_car_build<R: ContentStore>(
    State(state): State<ContentState<R>>,
    admin: AdminUser,
    Path(id): Path<CarBuildEntryId>,
) -> ContentResult<Json<MessageResponse>> {
    state.repo.delete_car_build(id).await?;
    tracing::info!(car_build_id = %id, admin_id = %admin.user_id(), "Car build entry deleted");
    Ok(Json(MessageResponse::new("Car build entry deleted successfully")))
}

// ============================================================================
// Contact
// ============================================================================

/// POST /api/contact
pub async fn create_contact<R: ContentStore>(
    State(state): State<ContentState<R>>,
    Json(draft): Json<ContactDraft>,
) -> ContentResult<(StatusCode, Json<ContactCreated>)> {
    let submission = state.repo.create_contact(draft.validated()?).await?;
    tracing::info!(contact_id = %submission.id, "Contact form submitted");

    Ok((
        StatusCode::CREATED,
        Json(ContactCreated {
            id: submission.id,
            message: "Thank you for your message! I'll get back to you soon.",
        }),
    ))
}

/// GET /api/contact (admin)
pub async fn list_contacts<R: ContentStore>(
    State(state): State<ContentState<R>>,
) -> ContentResult<Json<Vec<ContactSubmission>>> {
    Ok(Json(state.repo.list_contacts().await?))
}

/// DELETE /api/contact/{id} (admin)
pub async fn delete_contact<R: ContentStore>(
    State(state): State<ContentState<R>>,
    Path(id): Path<ContactSubmissionId>,
) -> ContentResult<Json<MessageResponse>> {
    state.repo.delete_contact(id).await?;
    Ok(Json(MessageResponse::new("Contact submission deleted successfully")))
}

// ============================================================================
// Gallery Images
// ============================================================================

/// GET /api/images?folder=
///
/// An unknown folder lists nothing rather than failing.
pub async fn list_images<R: ContentStore>(
    State(state): State<ContentState<R>>,
    Query(query): Query<ImagesQuery>,
) -> ContentResult<Json<Vec<String>>> {
    let Ok(folder) = ImageFolder::from_param(query.folder.as_deref()) else {
        return Ok(Json(Vec::new()));
    };

    let ids = state.repo.list_image_ids(folder).await?;
    Ok(Json(ids.into_iter().map(image_url).collect()))
}

/// GET /api/image/{id}
pub async fn get_image<R: ContentStore>(
    State(state): State<ContentState<R>>,
    Path(id): Path<GalleryImageId>,
) -> ContentResult<impl IntoResponse> {
    let image = state
        .repo
        .find_image(id)
        .await?
        .ok_or(ContentError::NotFound("Image"))?;

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL.to_string()),
        ],
        image.data,
    ))
}

fn multipart_error(err: MultipartError) -> ContentError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ContentError::TooLarge
    } else {
        ContentError::BadUpload(err.body_text())
    }
}

/// POST /api/gallery/upload (admin)
///
/// Files come from `images` or `image` parts; `folder` defaults to gallery.
pub async fn upload_images<R: ContentStore>(
    State(state): State<ContentState<R>>,
    admin: AdminUser,
    mut multipart: Multipart,
) -> ContentResult<(StatusCode, Json<UploadResponse>)> {
    let mut folder_param: Option<String> = None;
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "folder" => {
                let value = field
                    .text()
                    .await
                    .map_err(multipart_error)?;
                folder_param = Some(value);
            }
            "images" | "image" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(multipart_error)?;
                files.push(UploadedFile {
                    filename,
                    content_type,
                    data: data.to_vec(),
                });
            }
            _ => {}
        }
    }

    let folder = ImageFolder::from_param(folder_param.as_deref())?;
    let images = gallery::upload_images(state.repo.as_ref(), folder, files).await?;

    tracing::info!(
        admin_id = %admin.user_id(),
        folder = %folder,
        count = images.len(),
        "Gallery upload finished"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            uploaded: images.len(),
            images,
        }),
    ))
}

/// DELETE /api/image/{id} (admin)
pub async fn delete_image<R: ContentStore>(
    State(state): State<ContentState<R>>,
    admin: AdminUser,
    Path(id): Path<GalleryImageId>,
) -> ContentResult<Json<StatusResponse>> {
    state.repo.delete_image(id).await?;
    tracing::info!(image_id = %id, admin_id = %admin.user_id(), "Image deleted");
    Ok(Json(StatusResponse { status: "deleted" }))
}
