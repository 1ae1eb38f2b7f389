use crate::domains::donor::repository::DonorRepository;
use crate::domains::donor::types::{NewRoutineDonor, RoutineDonor, UpdateRoutineDonor};
use crate::errors::ServiceResult;
use crate::types::years_or_current;
use crate::validation::Validate;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

/// Trait defining routine donor service operations
#[async_trait]
pub trait DonorService: Send + Sync {
    async fn create_donor(&self, new_donor: NewRoutineDonor) -> ServiceResult<RoutineDonor>;

    async fn get_donor(&self, id: i64) -> ServiceResult<RoutineDonor>;

    async fn list_donors(&self, year: i32) -> ServiceResult<Vec<RoutineDonor>>;

    async fn update_donor(
        &self,
        id: i64,
        update_data: UpdateRoutineDonor,
    ) -> ServiceResult<RoutineDonor>;

    async fn delete_donor(&self, id: i64) -> ServiceResult<()>;

    async fn list_available_years(&self) -> ServiceResult<Vec<i32>>;
}

/// Implementation of the routine donor service
#[derive(Clone)]
pub struct DonorServiceImpl {
    repo: Arc<dyn DonorRepository>,
}

impl DonorServiceImpl {
    pub fn new(repo: Arc<dyn DonorRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl DonorService for DonorServiceImpl {
    async fn create_donor(&self, new_donor: NewRoutineDonor) -> ServiceResult<RoutineDonor> {
        new_donor.validate()?;
        let created = self.repo.create(&new_donor).await?;
        info!(
            "Created routine donor {} ({}) for year {}",
            created.id, created.name, created.year
        );
        Ok(created)
    }

    async fn get_donor(&self, id: i64) -> ServiceResult<RoutineDonor> {
        Ok(self.repo.find_by_id(id).await?)
    }

    async fn list_donors(&self, year: i32) -> ServiceResult<Vec<RoutineDonor>> {
        Ok(self.repo.list_by_year(year).await?)
    }

    async fn update_donor(
        &self,
        id: i64,
        update_data: UpdateRoutineDonor,
    ) -> ServiceResult<RoutineDonor> {
        update_data.validate()?;
        let updated = self.repo.update(id, &update_data).await?;
        info!("Updated routine donor {}", id);
        Ok(updated)
    }

    async fn delete_donor(&self, id: i64) -> ServiceResult<()> {
        self.repo.delete(id).await?;
        info!("Deleted routine donor {}", id);
        Ok(())
    }

    async fn list_available_years(&self) -> ServiceResult<Vec<i32>> {
        Ok(years_or_current(self.repo.list_available_years().await?))
    }
}
