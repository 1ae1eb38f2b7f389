use crate::domains::content::types::{
    Announcement, AnnouncementRow, NewAnnouncement, UpdateAnnouncement,
};
use crate::errors::{DbError, DomainError, DomainResult};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{query, query_as, query_scalar, SqlitePool};

const ANNOUNCEMENT_COLUMNS: &str =
    "id, title, body, image_url, published, created_at, updated_at";

/// Trait defining announcement repository operations
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn create(
        &self,
        new_announcement: &NewAnnouncement,
        image_url: Option<&str>,
    ) -> DomainResult<Announcement>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Announcement>;

    /// All announcements, newest first.
    async fn list(&self) -> DomainResult<Vec<Announcement>>;

    async fn update(
        &self,
        id: i64,
        update_data: &UpdateAnnouncement,
        image_url: Option<Option<&str>>,
    ) -> DomainResult<Announcement>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// Count of announcements currently published.
    async fn published_count(&self) -> DomainResult<i64>;
}

/// SQLite implementation for AnnouncementRepository
#[derive(Clone)]
pub struct SqliteAnnouncementRepository {
    pool: SqlitePool,
}

impl SqliteAnnouncementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn entity_name() -> &'static str {
        "Announcement"
    }
}

#[async_trait]
impl AnnouncementRepository for SqliteAnnouncementRepository {
    async fn create(
        &self,
        new_announcement: &NewAnnouncement,
        image_url: Option<&str>,
    ) -> DomainResult<Announcement> {
        let now = Utc::now().to_rfc3339();
        let result = query(
            "INSERT INTO announcements (title, body, image_url, published, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_announcement.title)
        .bind(&new_announcement.body)
        .bind(image_url)
        .bind(new_announcement.published as i64)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        self.find_by_id(result.last_insert_rowid()).await
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Announcement> {
        let row = query_as::<_, AnnouncementRow>(&format!(
            "SELECT {} FROM announcements WHERE id = ?",
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?
        .ok_or_else(|| DomainError::EntityNotFound(Self::entity_name().to_string(), id))?;

        row.into_entity()
    }

    async fn list(&self) -> DomainResult<Vec<Announcement>> {
        let rows = query_as::<_, AnnouncementRow>(&format!(
            "SELECT {} FROM announcements ORDER BY created_at DESC, id DESC",
            ANNOUNCEMENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        rows.into_iter().map(|r| r.into_entity()).collect()
    }

    async fn update(
        &self,
        id: i64,
        update_data: &UpdateAnnouncement,
        image_url: Option<Option<&str>>,
    ) -> DomainResult<Announcement> {
        let _ = self.find_by_id(id).await?;

        let mut builder = sqlx::QueryBuilder::new("UPDATE announcements SET ");
        let mut separated = builder.separated(", ");
        let mut fields_updated = false;

        if let Some(title) = &update_data.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title);
            fields_updated = true;
        }
        if let Some(body) = &update_data.body {
            separated.push("body = ");
            separated.push_bind_unseparated(body);
            fields_updated = true;
        }
        if let Some(published) = update_data.published {
            separated.push("published = ");
            separated.push_bind_unseparated(published as i64);
            fields_updated = true;
        }
        if let Some(image_url) = image_url {
            separated.push("image_url = ");
            separated.push_bind_unseparated(image_url.map(|s| s.to_string()));
            fields_updated = true;
        }

        if !fields_updated {
            return self.find_by_id(id).await;
        }

        separated.push("updated_at = ");
        separated.push_bind_unseparated(Utc::now().to_rfc3339());

        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = query("DELETE FROM announcements WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            Err(DomainError::EntityNotFound(Self::entity_name().to_string(), id))
        } else {
            Ok(())
        }
    }

    async fn published_count(&self) -> DomainResult<i64> {
        let count: i64 = query_scalar("SELECT COUNT(*) FROM announcements WHERE published = 1")
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::from)?;
        Ok(count)
    }
}
