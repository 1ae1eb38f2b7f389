use crate::domains::inventory::repository::InventoryRepository;
use crate::domains::inventory::types::{InventoryItem, NewInventoryItem, UpdateInventoryItem};
use crate::errors::ServiceResult;
use crate::validation::Validate;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

/// Trait defining inventory service operations
#[async_trait]
pub trait InventoryService: Send + Sync {
    async fn create_item(&self, new_item: NewInventoryItem) -> ServiceResult<InventoryItem>;

    async fn get_item(&self, id: i64) -> ServiceResult<InventoryItem>;

    async fn list_items(&self) -> ServiceResult<Vec<InventoryItem>>;

    async fn update_item(
        &self,
        id: i64,
        update_data: UpdateInventoryItem,
    ) -> ServiceResult<InventoryItem>;

    async fn delete_item(&self, id: i64) -> ServiceResult<()>;
}

/// Implementation of the inventory service
#[derive(Clone)]
pub struct InventoryServiceImpl {
    repo: Arc<dyn InventoryRepository>,
}

impl InventoryServiceImpl {
    pub fn new(repo: Arc<dyn InventoryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl InventoryService for InventoryServiceImpl {
    async fn create_item(&self, new_item: NewInventoryItem) -> ServiceResult<InventoryItem> {
        new_item.validate()?;
        let created = self.repo.create(&new_item).await?;
        info!("Created inventory item {} ({})", created.id, created.name);
        Ok(created)
    }

    async fn get_item(&self, id: i64) -> ServiceResult<InventoryItem> {
        Ok(self.repo.find_by_id(id).await?)
    }

    async fn list_items(&self) -> ServiceResult<Vec<InventoryItem>> {
        Ok(self.repo.list().await?)
    }

    async fn update_item(
        &self,
        id: i64,
        update_data: UpdateInventoryItem,
    ) -> ServiceResult<InventoryItem> {
        update_data.validate()?;
        let updated = self.repo.update(id, &update_data).await?;
        info!("Updated inventory item {}", id);
        Ok(updated)
    }

    async fn delete_item(&self, id: i64) -> ServiceResult<()> {
        self.repo.delete(id).await?;
        info!("Deleted inventory item {}", id);
        Ok(())
    }
}
