use crate::domains::content::repository::AnnouncementRepository;
use crate::domains::content::types::{Announcement, NewAnnouncement, UpdateAnnouncement};
use crate::domains::core::file_storage_service::FileStorageService;
use crate::errors::ServiceResult;
use crate::validation::Validate;
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

/// Trait defining announcement (content) service operations
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Create an announcement, storing the image first when one is
    /// attached.
    async fn create_announcement(
        &self,
        new_announcement: NewAnnouncement,
        image: Option<(Vec<u8>, String)>,
    ) -> ServiceResult<Announcement>;

    async fn get_announcement(&self, id: i64) -> ServiceResult<Announcement>;

    async fn list_announcements(&self) -> ServiceResult<Vec<Announcement>>;

    /// Update an announcement; a new image replaces (and removes) the
    /// stored one.
    async fn update_announcement(
        &self,
        id: i64,
        update_data: UpdateAnnouncement,
        new_image: Option<(Vec<u8>, String)>,
    ) -> ServiceResult<Announcement>;

    async fn delete_announcement(&self, id: i64) -> ServiceResult<()>;

    async fn published_count(&self) -> ServiceResult<i64>;
}

/// Implementation of the content service
#[derive(Clone)]
pub struct ContentServiceImpl {
    repo: Arc<dyn AnnouncementRepository>,
    storage: Arc<dyn FileStorageService>,
}

impl ContentServiceImpl {
    pub fn new(repo: Arc<dyn AnnouncementRepository>, storage: Arc<dyn FileStorageService>) -> Self {
        Self { repo, storage }
    }

    /// Image removal is best-effort: a storage miss is logged and the
    /// record operation continues.
    async fn remove_stored_image(&self, url: &str) {
        if let Err(e) = self.storage.delete(url).await {
            warn!("Could not remove stored image '{}': {}", url, e);
        }
    }
}

#[async_trait]
impl ContentService for ContentServiceImpl {
    async fn create_announcement(
        &self,
        new_announcement: NewAnnouncement,
        image: Option<(Vec<u8>, String)>,
    ) -> ServiceResult<Announcement> {
        new_announcement.validate()?;

        let image_url = match image {
            Some((data, filename)) => Some(
                self.storage
                    .upload(data, &filename)
                    .await
                    .map_err(crate::errors::DomainError::from)?,
            ),
            None => None,
        };

        let created = self
            .repo
            .create(&new_announcement, image_url.as_deref())
            .await?;
        info!("Created announcement {} ({})", created.id, created.title);
        Ok(created)
    }

    async fn get_announcement(&self, id: i64) -> ServiceResult<Announcement> {
        Ok(self.repo.find_by_id(id).await?)
    }

    async fn list_announcements(&self) -> ServiceResult<Vec<Announcement>> {
        Ok(self.repo.list().await?)
    }

    async fn update_announcement(
        &self,
        id: i64,
        update_data: UpdateAnnouncement,
        new_image: Option<(Vec<u8>, String)>,
    ) -> ServiceResult<Announcement> {
        update_data.validate()?;
        let existing = self.repo.find_by_id(id).await?;

        let image_change = match new_image {
            Some((data, filename)) => {
                let url = self
                    .storage
                    .upload(data, &filename)
                    .await
                    .map_err(crate::errors::DomainError::from)?;
                if let Some(old_url) = &existing.image_url {
                    self.remove_stored_image(old_url).await;
                }
                Some(Some(url))
            }
            None => None,
        };

        let updated = self
            .repo
            .update(
                id,
                &update_data,
                image_change.as_ref().map(|o| o.as_deref()),
            )
            .await?;
        info!("Updated announcement {}", id);
        Ok(updated)
    }

    async fn delete_announcement(&self, id: i64) -> ServiceResult<()> {
        let existing = self.repo.find_by_id(id).await?;
        self.repo.delete(id).await?;
        if let Some(url) = &existing.image_url {
            self.remove_stored_image(url).await;
        }
        info!("Deleted announcement {}", id);
        Ok(())
    }

    async fn published_count(&self) -> ServiceResult<i64> {
        Ok(self.repo.published_count().await?)
    }
}
