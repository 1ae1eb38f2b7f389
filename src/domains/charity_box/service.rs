use crate::domains::charity_box::repository::{
    ExternalCharityBoxRepository, MosqueCharityBoxRepository,
};
use crate::domains::charity_box::types::{
    ExternalCharityBox, MosqueCharityBox, NewExternalCharityBox, NewMosqueCharityBox,
    UpdateExternalCharityBox, UpdateMosqueCharityBox,
};
use crate::errors::ServiceResult;
use crate::types::years_or_current;
use crate::validation::Validate;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

/// Trait defining charity box service operations, covering both the
/// external boxes (monthly grid) and the in-mosque box (dated
/// collections).
#[async_trait]
pub trait CharityBoxService: Send + Sync {
    async fn create_external_box(
        &self,
        new_box: NewExternalCharityBox,
    ) -> ServiceResult<ExternalCharityBox>;

    async fn get_external_box(&self, id: i64) -> ServiceResult<ExternalCharityBox>;

    async fn list_external_boxes(&self, year: i32) -> ServiceResult<Vec<ExternalCharityBox>>;

    async fn update_external_box(
        &self,
        id: i64,
        update_data: UpdateExternalCharityBox,
    ) -> ServiceResult<ExternalCharityBox>;

    async fn delete_external_box(&self, id: i64) -> ServiceResult<()>;

    async fn create_mosque_box(
        &self,
        new_box: NewMosqueCharityBox,
    ) -> ServiceResult<MosqueCharityBox>;

    async fn get_mosque_box(&self, id: i64) -> ServiceResult<MosqueCharityBox>;

    async fn list_mosque_boxes(&self, year: i32) -> ServiceResult<Vec<MosqueCharityBox>>;

    async fn update_mosque_box(
        &self,
        id: i64,
        update_data: UpdateMosqueCharityBox,
    ) -> ServiceResult<MosqueCharityBox>;

    async fn delete_mosque_box(&self, id: i64) -> ServiceResult<()>;

    async fn list_available_years(&self) -> ServiceResult<Vec<i32>>;
}

/// Implementation of the charity box service
#[derive(Clone)]
pub struct CharityBoxServiceImpl {
    external_repo: Arc<dyn ExternalCharityBoxRepository>,
    mosque_repo: Arc<dyn MosqueCharityBoxRepository>,
}

impl CharityBoxServiceImpl {
    pub fn new(
        external_repo: Arc<dyn ExternalCharityBoxRepository>,
        mosque_repo: Arc<dyn MosqueCharityBoxRepository>,
    ) -> Self {
        Self {
            external_repo,
            mosque_repo,
        }
    }
}

#[async_trait]
impl CharityBoxService for CharityBoxServiceImpl {
    async fn create_external_box(
        &self,
        new_box: NewExternalCharityBox,
    ) -> ServiceResult<ExternalCharityBox> {
        new_box.validate()?;
        let created = self.external_repo.create(&new_box).await?;
        info!(
            "Created external charity box {} ({}) for year {}",
            created.id, created.label, created.year
        );
        Ok(created)
    }

    async fn get_external_box(&self, id: i64) -> ServiceResult<ExternalCharityBox> {
        Ok(self.external_repo.find_by_id(id).await?)
    }

    async fn list_external_boxes(&self, year: i32) -> ServiceResult<Vec<ExternalCharityBox>> {
        Ok(self.external_repo.list_by_year(year).await?)
    }

    async fn update_external_box(
        &self,
        id: i64,
        update_data: UpdateExternalCharityBox,
    ) -> ServiceResult<ExternalCharityBox> {
        update_data.validate()?;
        let updated = self.external_repo.update(id, &update_data).await?;
        info!("Updated external charity box {}", id);
        Ok(updated)
    }

    async fn delete_external_box(&self, id: i64) -> ServiceResult<()> {
        self.external_repo.delete(id).await?;
        info!("Deleted external charity box {}", id);
        Ok(())
    }

    async fn create_mosque_box(
        &self,
        new_box: NewMosqueCharityBox,
    ) -> ServiceResult<MosqueCharityBox> {
        new_box.validate()?;
        let created = self.mosque_repo.create(&new_box).await?;
        info!(
            "Recorded mosque charity box collection {} on {}",
            created.id, created.date
        );
        Ok(created)
    }

    async fn get_mosque_box(&self, id: i64) -> ServiceResult<MosqueCharityBox> {
        Ok(self.mosque_repo.find_by_id(id).await?)
    }

    async fn list_mosque_boxes(&self, year: i32) -> ServiceResult<Vec<MosqueCharityBox>> {
        Ok(self.mosque_repo.list_by_year(year).await?)
    }

    async fn update_mosque_box(
        &self,
        id: i64,
        update_data: UpdateMosqueCharityBox,
    ) -> ServiceResult<MosqueCharityBox> {
        update_data.validate()?;
        let updated = self.mosque_repo.update(id, &update_data).await?;
        info!("Updated mosque charity box collection {}", id);
        Ok(updated)
    }

    async fn delete_mosque_box(&self, id: i64) -> ServiceResult<()> {
        self.mosque_repo.delete(id).await?;
        info!("Deleted mosque charity box collection {}", id);
        Ok(())
    }

    async fn list_available_years(&self) -> ServiceResult<Vec<i32>> {
        // Union of both box collections, newest first
        let mut years = self.external_repo.list_available_years().await?;
        for year in self.mosque_repo.list_available_years().await? {
            if !years.contains(&year) {
                years.push(year);
            }
        }
        years.sort_unstable_by(|a, b| b.cmp(a));
        Ok(years_or_current(years))
    }
}
