use crate::errors::{DomainError, DomainResult};
use crate::validation::{Validate, ValidationBuilder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Announcement entity - a piece of mosque content, optionally carrying
/// an uploaded image, visible on the public site once published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row for an announcement
#[derive(Debug, Clone, FromRow)]
pub struct AnnouncementRow {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
    pub published: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl AnnouncementRow {
    pub fn into_entity(self) -> DomainResult<Announcement> {
        let parse = |field: &str, value: &str| {
            DateTime::parse_from_rfc3339(value)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    DomainError::Internal(format!(
                        "Announcement {} has malformed {}: {}",
                        self.id, field, e
                    ))
                })
        };
        let created_at = parse("created_at", &self.created_at)?;
        let updated_at = parse("updated_at", &self.updated_at)?;
        Ok(Announcement {
            id: self.id,
            title: self.title,
            body: self.body,
            image_url: self.image_url,
            published: self.published != 0,
            created_at,
            updated_at,
        })
    }
}

/// DTO for creating an announcement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub published: bool,
}

impl Validate for NewAnnouncement {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("title", Some(self.title.clone()))
            .required()
            .max_length(255)
            .validate()
    }
}

/// DTO for updating an announcement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAnnouncement {
    pub title: Option<String>,
    pub body: Option<String>,
    pub published: Option<bool>,
}

impl Validate for UpdateAnnouncement {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("title", self.title.clone())
            .min_length(1)
            .max_length(255)
            .validate()
    }
}
