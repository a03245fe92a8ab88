//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{
    AboutContentId, CarBuildEntryId, ContactSubmissionId, GalleryImageId, ResumeSectionId,
};
use sqlx::PgPool;

use crate::domain::entity::{
    AboutContent, AboutDraft, CarBuildDraft, CarBuildEntry, ContactDraft, ContactSubmission,
    NewImage, ResumeDraft, ResumeSection, StoredImage,
};
use crate::domain::folder::ImageFolder;
use crate::domain::repository::{
    AboutRepository, CarBuildRepository, ContactRepository, ImageRepository, ResumeRepository,
};
use crate::error::{ContentError, ContentResult};

/// PostgreSQL-backed content repository
#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn expect_one(rows_affected: u64, what: &'static str) -> ContentResult<()> {
    if rows_affected == 0 {
        return Err(ContentError::NotFound(what));
    }
    Ok(())
}

// ============================================================================
// About
// ============================================================================

impl AboutRepository for PgContentRepository {
    async fn list_about(&self) -> ContentResult<Vec<AboutContent>> {
        let rows = sqlx::query_as::<_, AboutRow>(
            r#"
            SELECT id, title, content, image_url, created_at, updated_at
            FROM about_content
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AboutRow::into_entity).collect())
    }

    async fn create_about(&self, draft: AboutDraft) -> ContentResult<AboutContent> {
        let row = sqlx::query_as::<_, AboutRow>(
            r#"
            INSERT INTO about_content (title, content, image_url)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, image_url, created_at, updated_at
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_entity())
    }

    async fn update_about(&self, id: AboutContentId, draft: AboutDraft) -> ContentResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE about_content SET
                title = $2,
                content = $3,
                image_url = $4,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.image_url)
        .execute(&self.pool)
        .await?;

        expect_one(result.rows_affected(), "About content")
    }

    async fn delete_about(&self, id: AboutContentId) -> ContentResult<()> {
        let result = sqlx::query("DELETE FROM about_content WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        expect_one(result.rows_affected(), "About content")
    }
}

// ============================================================================
// Resume
// ============================================================================

impl ResumeRepository for PgContentRepository {
    async fn list_resume(&self) -> ContentResult<Vec<ResumeSection>> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            r#"
            SELECT
                id, section_type, title, subtitle, description,
                start_date, end_date, display_order, created_at, updated_at
            FROM resume_sections
            ORDER BY display_order, start_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ResumeRow::into_entity).collect())
    }

    async fn create_resume(&self, draft: ResumeDraft) -> ContentResult<ResumeSection> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resume_sections (
                section_type, title, subtitle, description,
                start_date, end_date, display_order
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, section_type, title, subtitle, description,
                start_date, end_date, display_order, created_at, updated_at
            "#,
        )
        .bind(&draft.section_type)
        .bind(&draft.title)
        .bind(&draft.subtitle)
        .bind(&draft.description)
        .bind(draft.start_date)
        .bind(draft.end_date)
        .bind(draft.display_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_entity())
    }

    async fn update_resume(&self, id: ResumeSectionId, draft: ResumeDraft) -> ContentResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE resume_sections SET
                section_type = $2,
                title = $3,
                subtitle = $4,
                description = $5,
                start_date = $6,
                end_date = $7,
                display_order = $8,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(&draft.section_type)
        .bind(&draft.title)
        .bind(&draft.subtitle)
        .bind(&draft.description)
        .bind(draft.start_date)
        .bind(draft.end_date)
        .bind(draft.display_order)
        .execute(&self.pool)
        .await?;

        expect_one(result.rows_affected(), "Resume section")
    }

    async fn delete_resume(&self, id: ResumeSectionId) -> ContentResult<()> {
        let result = sqlx::query("DELETE FROM resume_sections WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        expect_one(result.rows_affected(), "Resume section")
    }
}

// ============================================================================
// Car Build
// ============================================================================

impl CarBuildRepository for PgContentRepository {
    async fn list_car_builds(&self) -> ContentResult<Vec<CarBuildEntry>> {
        let rows = sqlx::query_as::<_, CarBuildRow>(
            r#"
            SELECT
                id, title, description, date, category, cost, image_urls,
                display_order, created_at, updated_at
            FROM car_build_entries
            ORDER BY display_order, date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CarBuildRow::into_entity).collect())
    }

    async fn create_car_build(&self, draft: CarBuildDraft) -> ContentResult<CarBuildEntry> {
        let row = sqlx::query_as::<_, CarBuildRow>(
            r#"
            INSERT INTO car_build_entries (
                title, description, date, category, cost, image_urls, display_order
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, title, description, date, category, cost, image_urls,
                display_order, created_at, updated_at
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.date)
        .bind(&draft.category)
        .bind(draft.cost)
        .bind(&draft.image_urls)
        .bind(draft.display_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_entity())
    }

    async fn update_car_build(
        &self,
        id: CarBuildEntryId,
        draft: CarBuildDraft,
    ) -> ContentResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE car_build_entries SET
                title = $2,
                description = $3,
                date = $4,
                category = $5,
                cost = $6,
                image_urls = $7,
                display_order = $8,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.date)
        .bind(&draft.category)
        .bind(draft.cost)
        .bind(&draft.image_urls)
        .bind(draft.display_order)
        .execute(&self.pool)
        .await?;

        expect_one(result.rows_affected(), "Car build entry")
    }

    async fn delete_car_build(&self, id: CarBuildEntryId) -> ContentResult<()> {
        let result = sqlx::query("DELETE FROM car_build_entries WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        expect_one(result.rows_affected(), "Car build entry")
    }
}

// ============================================================================
// Contact
// ============================================================================

impl ContactRepository for PgContentRepository {
    async fn list_contacts(&self) -> ContentResult<Vec<ContactSubmission>> {
        let rows = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, name, email, subject, message, is_read, created_at
            FROM contact_submissions
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ContactRow::into_entity).collect())
    }

    async fn create_contact(&self, draft: ContactDraft) -> ContentResult<ContactSubmission> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            INSERT INTO contact_submissions (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, subject, message, is_read, created_at
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.subject)
        .bind(&draft.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_entity())
    }

    async fn delete_contact(&self, id: ContactSubmissionId) -> ContentResult<()> {
        let result = sqlx::query("DELETE FROM contact_submissions WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        expect_one(result.rows_affected(), "Contact submission")
    }
}

// ============================================================================
// Gallery Images
// ============================================================================

impl ImageRepository for PgContentRepository {
    async fn count_images(&self) -> ContentResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM gallery_images")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn insert_image(&self, image: NewImage) -> ContentResult<GalleryImageId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO gallery_images (folder, filename, image_data, content_type)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(image.folder.as_str())
        .bind(&image.filename)
        .bind(&image.data)
        .bind(&image.content_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(GalleryImageId::new(id))
    }

    async fn list_image_ids(&self, folder: ImageFolder) -> ContentResult<Vec<GalleryImageId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM gallery_images
            WHERE folder = $1
            ORDER BY display_order, created_at DESC
            "#,
        )
        .bind(folder.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().map(GalleryImageId::new).collect())
    }

    async fn find_image(&self, id: GalleryImageId) -> ContentResult<Option<StoredImage>> {
        let row = sqlx::query_as::<_, ImageRow>(
            "SELECT id, image_data, content_type FROM gallery_images WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ImageRow::into_entity))
    }

    async fn delete_image(&self, id: GalleryImageId) -> ContentResult<()> {
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        expect_one(result.rows_affected(), "Image")
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AboutRow {
    id: i64,
    title: String,
    content: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AboutRow {
    fn into_entity(self) -> AboutContent {
        AboutContent {
            id: AboutContentId::new(self.id),
            title: self.title,
            content: self.content,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ResumeRow {
    id: i64,
    section_type: String,
    title: String,
    subtitle: Option<String>,
    description: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ResumeRow {
    fn into_entity(self) -> ResumeSection {
        ResumeSection {
            id: ResumeSectionId::new(self.id),
            section_type: self.section_type,
            title: self.title,
            subtitle: self.subtitle,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            display_order: self.display_order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CarBuildRow {
    id: i64,
    title: String,
    description: String,
    date: DateTime<Utc>,
    category: Option<String>,
    cost: Option<f64>,
    image_urls: Option<Vec<String>>,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CarBuildRow {
    fn into_entity(self) -> CarBuildEntry {
        CarBuildEntry {
            id: CarBuildEntryId::new(self.id),
            title: self.title,
            description: self.description,
            date: self.date,
            category: self.category,
            cost: self.cost,
            image_urls: self.image_urls.unwrap_or_default(),
            display_order: self.display_order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i64,
    name: String,
    email: String,
    subject: Option<String>,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl ContactRow {
    fn into_entity(self) -> ContactSubmission {
        ContactSubmission {
            id: ContactSubmissionId::new(self.id),
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
            is_read: self.is_read,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ImageRow {
    id: i64,
    image_data: Vec<u8>,
    content_type: String,
}

impl ImageRow {
    fn into_entity(self) -> StoredImage {
        StoredImage {
            id: GalleryImageId::new(self.id),
            data: self.image_data,
            content_type: self.content_type,
        }
    }
}
