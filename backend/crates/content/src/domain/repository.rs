//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Update and delete return [`ContentError::NotFound`](crate::error::ContentError::NotFound)
//! when no row matched.

use kernel::id::{
    AboutContentId, CarBuildEntryId, ContactSubmissionId, GalleryImageId, ResumeSectionId,
};

use crate::domain::entity::{
    AboutContent, AboutDraft, CarBuildDraft, CarBuildEntry, ContactDraft, ContactSubmission,
    NewImage, ResumeDraft, ResumeSection, StoredImage,
};
use crate::domain::folder::ImageFolder;
use crate::error::ContentResult;

/// About content repository trait
#[trait_variant::make(AboutRepository: Send)]
pub trait LocalAboutRepository {
    /// Newest first
    async fn list_about(&self) -> ContentResult<Vec<AboutContent>>;

    async fn create_about(&self, draft: AboutDraft) -> ContentResult<AboutContent>;

    async fn update_about(&self, id: AboutContentId, draft: AboutDraft) -> ContentResult<()>;

    async fn delete_about(&self, id: AboutContentId) -> ContentResult<()>;
}

/// Resume repository trait
#[trait_variant::make(ResumeRepository: Send)]
pub trait LocalResumeRepository {
    /// By display order, then most recent start date
    async fn list_resume(&self) -> ContentResult<Vec<ResumeSection>>;

    async fn create_resume(&self, draft: ResumeDraft) -> ContentResult<ResumeSection>;

    async fn update_resume(&self, id: ResumeSectionId, draft: ResumeDraft) -> ContentResult<()>;

    async fn delete_resume(&self, id: ResumeSectionId) -> ContentResult<()>;
}

/// Car build log repository trait
#[trait_variant::make(CarBuildRepository: Send)]
pub trait LocalCarBuildRepository {
    /// By display order, then most recent date
    async fn list_car_builds(&self) -> ContentResult<Vec<CarBuildEntry>>;

    async fn create_car_build(&self, draft: CarBuildDraft) -> ContentResult<CarBuildEntry>;

    async fn update_car_build(&self, id: CarBuildEntryId, draft: CarBuildDraft)
    -> ContentResult<()>;

    async fn delete_car_build(&self, id: CarBuildEntryId) -> ContentResult<()>;
}

/// Contact submission repository trait
#[trait_variant::make(ContactRepository: Send)]
pub trait LocalContactRepository {
    /// Newest first
    async fn list_contacts(&self) -> ContentResult<Vec<ContactSubmission>>;

    async fn create_contact(&self, draft: ContactDraft) -> ContentResult<ContactSubmission>;

    async fn delete_contact(&self, id: ContactSubmissionId) -> ContentResult<()>;
}

/// Gallery image repository trait
#[trait_variant::make(ImageRepository: Send)]
pub trait LocalImageRepository {
    /// Total number of stored images
    async fn count_images(&self) -> ContentResult<i64>;

    async fn insert_image(&self, image: NewImage) -> ContentResult<GalleryImageId>;

    /// Ids in a folder, by display order then newest first
    async fn list_image_ids(&self, folder: ImageFolder) -> ContentResult<Vec<GalleryImageId>>;

    async fn find_image(&self, id: GalleryImageId) -> ContentResult<Option<StoredImage>>;

    async fn delete_image(&self, id: GalleryImageId) -> ContentResult<()>;
}

/// Everything the content router needs from storage
pub trait ContentStore:
    AboutRepository
    + ResumeRepository
    + CarBuildRepository
    + ContactRepository
    + ImageRepository
    + Send
    + Sync
    + 'static
{
}

impl<T> ContentStore for T where
    T: AboutRepository
        + ResumeRepository
        + CarBuildRepository
        + ContactRepository
        + ImageRepository
        + Send
        + Sync
        + 'static
{
}
