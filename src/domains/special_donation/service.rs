use crate::domains::special_donation::repository::SpecialDonationRepository;
use crate::domains::special_donation::types::{
    NewSpecialDonation, SpecialDonation, UpdateSpecialDonation,
};
use crate::errors::ServiceResult;
use crate::types::years_or_current;
use crate::validation::Validate;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

/// Trait defining special donation service operations
#[async_trait]
pub trait SpecialDonationService: Send + Sync {
    async fn create_donation(
        &self,
        new_donation: NewSpecialDonation,
    ) -> ServiceResult<SpecialDonation>;

    async fn get_donation(&self, id: i64) -> ServiceResult<SpecialDonation>;

    async fn list_donations(&self, year: i32) -> ServiceResult<Vec<SpecialDonation>>;

    async fn update_donation(
        &self,
        id: i64,
        update_data: UpdateSpecialDonation,
    ) -> ServiceResult<SpecialDonation>;

    async fn delete_donation(&self, id: i64) -> ServiceResult<()>;

    async fn list_available_years(&self) -> ServiceResult<Vec<i32>>;
}

/// Implementation of the special donation service
#[derive(Clone)]
pub struct SpecialDonationServiceImpl {
    repo: Arc<dyn SpecialDonationRepository>,
}

impl SpecialDonationServiceImpl {
    pub fn new(repo: Arc<dyn SpecialDonationRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl SpecialDonationService for SpecialDonationServiceImpl {
    async fn create_donation(
        &self,
        new_donation: NewSpecialDonation,
    ) -> ServiceResult<SpecialDonation> {
        new_donation.validate()?;
        let created = self.repo.create(&new_donation).await?;
        info!(
            "Recorded special donation {} from {} on {}",
            created.id, created.donor_name, created.date
        );
        Ok(created)
    }

    async fn get_donation(&self, id: i64) -> ServiceResult<SpecialDonation> {
        Ok(self.repo.find_by_id(id).await?)
    }

    async fn list_donations(&self, year: i32) -> ServiceResult<Vec<SpecialDonation>> {
        Ok(self.repo.list_by_year(year).await?)
    }

    async fn update_donation(
        &self,
        id: i64,
        update_data: UpdateSpecialDonation,
    ) -> ServiceResult<SpecialDonation> {
        update_data.validate()?;
        let updated = self.repo.update(id, &update_data).await?;
        info!("Updated special donation {}", id);
        Ok(updated)
    }

    async fn delete_donation(&self, id: i64) -> ServiceResult<()> {
        self.repo.delete(id).await?;
        info!("Deleted special donation {}", id);
        Ok(())
    }

    async fn list_available_years(&self) -> ServiceResult<Vec<i32>> {
        Ok(years_or_current(self.repo.list_available_years().await?))
    }
}
