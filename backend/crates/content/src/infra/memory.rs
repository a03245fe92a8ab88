//! In-Memory Repository Implementation

use chrono::Utc;
use kernel::id::{
    AboutContentId, CarBuildEntryId, ContactSubmissionId, GalleryImageId, ResumeSectionId,
};
use std::sync::Mutex;

use crate::domain::entity::{
    AboutContent, AboutDraft, CarBuildDraft, CarBuildEntry, ContactDraft, ContactSubmission,
    NewImage, ResumeDraft, ResumeSection, StoredImage,
};
use crate::domain::folder::ImageFolder;
use crate::domain::repository::{
    AboutRepository, CarBuildRepository, ContactRepository, ImageRepository, ResumeRepository,
};
use crate::error::{ContentError, ContentResult};

struct ImageRecord {
    id: GalleryImageId,
    folder: ImageFolder,
    data: Vec<u8>,
    content_type: String,
    display_order: i32,
    seq: i64,
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    about: Vec<AboutContent>,
    resume: Vec<ResumeSection>,
    car_builds: Vec<CarBuildEntry>,
    contacts: Vec<ContactSubmission>,
    images: Vec<ImageRecord>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Content store backed by vectors
///
/// Used by tests and for running the router without a database.
#[derive(Default)]
pub struct InMemoryContentRepository {
    tables: Mutex<Tables>,
}

impl InMemoryContentRepository {
    fn with<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut tables)
    }
}

fn remove_where<T>(
    rows: &mut Vec<T>,
    what: &'static str,
    pred: impl Fn(&T) -> bool,
) -> ContentResult<()> {
    let before = rows.len();
    rows.retain(|row| !pred(row));
    if rows.len() == before {
        return Err(ContentError::NotFound(what));
    }
    Ok(())
}

impl AboutRepository for InMemoryContentRepository {
    async fn list_about(&self) -> ContentResult<Vec<AboutContent>> {
        self.with(|t| Ok(t.about.iter().rev().cloned().collect()))
    }

    async fn create_about(&self, draft: AboutDraft) -> ContentResult<AboutContent> {
        self.with(|t| {
            let now = Utc::now();
            let about = AboutContent {
                id: AboutContentId::new(t.next_id()),
                title: draft.title,
                content: draft.content,
                image_url: draft.image_url,
                created_at: now,
                updated_at: now,
            };
            t.about.push(about.clone());
            Ok(about)
        })
    }

    async fn update_about(&self, id: AboutContentId, draft: AboutDraft) -> ContentResult<()> {
        self.with(|t| {
            let row = t
                .about
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or(ContentError::NotFound("About content"))?;
            row.title = draft.title;
            row.content = draft.content;
            row.image_url = draft.image_url;
            row.updated_at = Utc::now();
            Ok(())
        })
    }

    async fn delete_about(&self, id: AboutContentId) -> ContentResult<()> {
        self.with(|t| remove_where(&mut t.about, "About content", |a| a.id == id))
    }
}

impl ResumeRepository for InMemoryContentRepository {
    async fn list_resume(&self) -> ContentResult<Vec<ResumeSection>> {
        self.with(|t| {
            let mut rows = t.resume.clone();
            rows.sort_by(|a, b| {
                a.display_order
                    .cmp(&b.display_order)
                    .then(b.start_date.cmp(&a.start_date))
            });
            Ok(rows)
        })
    }

    async fn create_resume(&self, draft: ResumeDraft) -> ContentResult<ResumeSection> {
        self.with(|t| {
            let now = Utc::now();
            let section = ResumeSection {
                id: ResumeSectionId::new(t.next_id()),
                section_type: draft.section_type,
                title: draft.title,
                subtitle: draft.subtitle,
                description: draft.description,
                start_date: draft.start_date,
                end_date: draft.end_date,
                display_order: draft.display_order,
                created_at: now,
                updated_at: now,
            };
            t.resume.push(section.clone());
            Ok(section)
        })
    }

    async fn update_resume(&self, id: ResumeSectionId, draft: ResumeDraft) -> ContentResult<()> {
        self.with(|t| {
            let row = t
                .resume
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(ContentError::NotFound("Resume section"))?;
            row.section_type = draft.section_type;
            row.title = draft.title;
            row.subtitle = draft.subtitle;
            row.description = draft.description;
            row.start_date = draft.start_date;
            row.end_date = draft.end_date;
            row.display_order = draft.display_order;
            row.updated_at = Utc::now();
            Ok(())
        })
    }

    async fn delete_resume(&self, id: ResumeSectionId) -> ContentResult<()> {
        self.with(|t| remove_where(&mut t.resume, "Resume section", |r| r.id == id))
    }
}

impl CarBuildRepository for InMemoryContentRepository {
    async fn list_car_builds(&self) -> ContentResult<Vec<CarBuildEntry>> {
        self.with(|t| {
            let mut rows = t.car_builds.clone();
            rows.sort_by(|a, b| a.display_order.cmp(&b.display_order).then(b.date.cmp(&a.date)));
            Ok(rows)
        })
    }

    async fn create_car_build(&self, draft: CarBuildDraft) -> ContentResult<CarBuildEntry> {
        self.with(|t| {
            let now = Utc::now();
            let entry = CarBuildEntry {
                id: CarBuildEntryId::new(t.next_id()),
                title: draft.title,
                description: draft.description,
                date: draft.date,
                category: draft.category,
                cost: draft.cost,
                image_urls: draft.image_urls,
                display_order: draft.display_order,
                created_at: now,
                updated_at: now,
            };
            t.car_builds.push(entry.clone());
            Ok(entry)
        })
    }

    async fn update_car_build(
        &self,
        id: CarBuildEntryId,
        draft: CarBuildDraft,
    ) -> ContentResult<()> {
        self.with(|t| {
            let row = t
                .car_builds
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or(ContentError::NotFound("Car build entry"))?;
            row.title = draft.title;
            row.description = draft.description;
            row.date = draft.date;
            row.category = draft.category;
            row.cost = draft.cost;
            row.image_urls = draft.image_urls;
            row.display_order = draft.display_order;
            row.updated_at = Utc::now();
            Ok(())
        })
    }

    async fn delete_car_build(&self, id: CarBuildEntryId) -> ContentResult<()> {
        self.with(|t| remove_where(&mut t.car_builds, "Car build entry", |c| c.id == id))
    }
}

impl ContactRepository for InMemoryContentRepository {
    async fn list_contacts(&self) -> ContentResult<Vec<ContactSubmission>> {
        self.with(|t| Ok(t.contacts.iter().rev().cloned().collect()))
    }

    async fn create_contact(&self, draft: ContactDraft) -> ContentResult<ContactSubmission> {
        self.with(|t| {
            let submission = ContactSubmission {
                id: ContactSubmissionId::new(t.next_id()),
                name: draft.name,
                email: draft.email,
                subject: draft.subject,
                message: draft.message,
                is_read: false,
                created_at: Utc::now(),
            };
            t.contacts.push(submission.clone());
            Ok(submission)
        })
    }

    async fn delete_contact(&self, id: ContactSubmissionId) -> ContentResult<()> {
        self.with(|t| remove_where(&mut t.contacts, "Contact submission", |c| c.id == id))
    }
}

impl ImageRepository for InMemoryContentRepository {
    async fn count_images(&self) -> ContentResult<i64> {
        self.with(|t| Ok(t.images.len() as i64))
    }

    async fn insert_image(&self, image: NewImage) -> ContentResult<GalleryImageId> {
        self.with(|t| {
            let seq = t.next_id();
            let id = GalleryImageId::new(seq);
            t.images.push(ImageRecord {
                id,
                folder: image.folder,
                data: image.data,
                content_type: image.content_type,
                display_order: 0,
                seq,
            });
            Ok(id)
        })
    }

    async fn list_image_ids(&self, folder: ImageFolder) -> ContentResult<Vec<GalleryImageId>> {
        self.with(|t| {
            let mut rows: Vec<&ImageRecord> =
                t.images.iter().filter(|i| i.folder == folder).collect();
            rows.sort_by(|a, b| a.display_order.cmp(&b.display_order).then(b.seq.cmp(&a.seq)));
            Ok(rows.into_iter().map(|i| i.id).collect())
        })
    }

    async fn find_image(&self, id: GalleryImageId) -> ContentResult<Option<StoredImage>> {
        self.with(|t| {
            Ok(t.images.iter().find(|i| i.id == id).map(|i| StoredImage {
                id: i.id,
                data: i.data.clone(),
                content_type: i.content_type.clone(),
            }))
        })
    }

    async fn delete_image(&self, id: GalleryImageId) -> ContentResult<()> {
        self.with(|t| remove_where(&mut t.images, "Image", |i| i.id == id))
    }
}
