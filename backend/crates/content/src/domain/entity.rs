//! Content Entities
//!
//! Each record type comes with a draft type holding the client-editable
//! fields. Drafts are validated before they reach a repository.

use chrono::{DateTime, Utc};
use kernel::id::{
    AboutContentId, CarBuildEntryId, ContactSubmissionId, GalleryImageId, ResumeSectionId,
};
use serde::{Deserialize, Serialize};

use crate::domain::folder::ImageFolder;
use crate::error::{ContentError, ContentResult};

const TITLE_MAX_LENGTH: usize = 255;

fn require(field: &str, value: &str) -> ContentResult<()> {
    if value.trim().is_empty() {
        return Err(ContentError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn require_title(value: &str) -> ContentResult<()> {
    require("title", value)?;
    if value.chars().count() > TITLE_MAX_LENGTH {
        return Err(ContentError::Validation(format!(
            "title must be at most {TITLE_MAX_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Empty strings from form fields are stored as NULL
fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============================================================================
// About
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AboutContent {
    pub id: AboutContentId,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AboutDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl AboutDraft {
    pub fn validated(mut self) -> ContentResult<Self> {
        require_title(&self.title)?;
        self.image_url = blank_to_none(self.image_url);
        Ok(self)
    }
}

// ============================================================================
// Resume
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ResumeSection {
    pub id: ResumeSectionId,
    pub section_type: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResumeDraft {
    pub section_type: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub display_order: i32,
}

impl ResumeDraft {
    pub fn validated(mut self) -> ContentResult<Self> {
        require("section_type", &self.section_type)?;
        require_title(&self.title)?;
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ContentError::Validation(
                    "end_date must not be before start_date".into(),
                ));
            }
        }
        self.subtitle = blank_to_none(self.subtitle);
        self.description = blank_to_none(self.description);
        Ok(self)
    }
}

// ============================================================================
// Car Build
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CarBuildEntry {
    pub id: CarBuildEntryId,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CarBuildDraft {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub display_order: i32,
}

impl CarBuildDraft {
    pub fn validated(mut self) -> ContentResult<Self> {
        require_title(&self.title)?;
        if let Some(cost) = self.cost {
            if !cost.is_finite() || cost < 0.0 {
                return Err(ContentError::Validation(
                    "cost must be a non-negative number".into(),
                ));
            }
        }
        self.category = blank_to_none(self.category);
        self.image_urls.retain(|url| !url.trim().is_empty());
        Ok(self)
    }
}

// ============================================================================
// Contact
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ContactSubmission {
    pub id: ContactSubmissionId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

impl ContactDraft {
    pub fn validated(mut self) -> ContentResult<Self> {
        require("name", &self.name)?;
        require("message", &self.message)?;
        let email = self.email.trim();
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(ContentError::Validation("a valid email is required".into()));
        }
        self.email = email.to_string();
        self.subject = blank_to_none(self.subject);
        Ok(self)
    }
}

// ============================================================================
// Gallery Images
// ============================================================================

/// Image ready to be stored
#[derive(Clone)]
pub struct NewImage {
    pub folder: ImageFolder,
    pub filename: String,
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Image bytes as served to clients
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub id: GalleryImageId,
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Public URL for an image
pub fn image_url(id: GalleryImageId) -> String {
    format!("/api/image/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_requires_title() {
        let draft = AboutDraft {
            title: "  ".into(),
            content: "body".into(),
            image_url: None,
        };
        assert!(matches!(draft.validated(), Err(ContentError::Validation(_))));
    }

    #[test]
    fn test_blank_optionals_become_none() {
        let draft = AboutDraft {
            title: "Hello".into(),
            content: "body".into(),
            image_url: Some("".into()),
        }
        .validated()
        .unwrap();
        assert_eq!(draft.image_url, None);
    }

    #[test]
    fn test_resume_date_order() {
        let start: DateTime<Utc> = "2020-01-01T00:00:00Z".parse().unwrap();
        let end: DateTime<Utc> = "2019-01-01T00:00:00Z".parse().unwrap();
        let draft = ResumeDraft {
            section_type: "experience".into(),
            title: "Engineer".into(),
            subtitle: None,
            description: None,
            start_date: Some(start),
            end_date: Some(end),
            display_order: 0,
        };
        assert!(draft.validated().is_err());
    }

    #[test]
    fn test_car_build_rejects_negative_cost() {
        let draft: CarBuildDraft = serde_json::from_value(serde_json::json!({
            "title": "Coilovers",
            "description": "Installed",
            "date": "2024-05-01T00:00:00Z",
            "cost": -5.0
        }))
        .unwrap();
        assert!(draft.validated().is_err());
    }

    #[test]
    fn test_contact_validation() {
        let ok = ContactDraft {
            name: "Pat".into(),
            email: " pat@example.com ".into(),
            subject: Some(" ".into()),
            message: "Hi".into(),
        }
        .validated()
        .unwrap();
        assert_eq!(ok.email, "pat@example.com");
        assert_eq!(ok.subject, None);

        let bad = ContactDraft {
            name: "Pat".into(),
            email: "nope".into(),
            subject: None,
            message: "Hi".into(),
        };
        assert!(bad.validated().is_err());
    }

    #[test]
    fn test_serialization_omits_empty_optionals() {
        let entry = CarBuildEntry {
            id: CarBuildEntryId::new(3),
            title: "Wheels".into(),
            description: "New set".into(),
            date: "2024-05-01T00:00:00Z".parse().unwrap(),
            category: None,
            cost: None,
            image_urls: Vec::new(),
            display_order: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], 3);
        assert!(json.get("category").is_none());
        assert!(json.get("cost").is_none());
        assert!(json.get("image_urls").is_none());
    }

    #[test]
    fn test_image_url() {
        assert_eq!(image_url(GalleryImageId::new(42)), "/api/image/42");
    }
}
