use crate::domains::charity_box::repository::{
    ExternalCharityBoxRepository, MosqueCharityBoxRepository,
};
use crate::domains::donor::repository::DonorRepository;
use crate::domains::integration::merge::integrate;
use crate::domains::integration::types::{EditTarget, IntegratedRecord};
use crate::domains::special_donation::repository::SpecialDonationRepository;
use crate::errors::{ServiceError, ServiceResult};
use crate::types::years_or_current;
use async_trait::async_trait;
use log::{error, info};
use std::sync::Arc;

/// Trait defining the integration (unified yearly ledger) service
#[async_trait]
pub trait IntegrationService: Send + Sync {
    /// Fetch all four income sources for the year and merge them into
    /// the unified view.
    async fn yearly_ledger(&self, year: i32) -> ServiceResult<Vec<IntegratedRecord>>;

    /// Resolve where an edit or delete on a merged row must land.
    fn resolve_edit_target(&self, record: &IntegratedRecord) -> EditTarget;

    /// Delete the source record(s) behind a merged row. Group members
    /// are re-resolved against the live collection first; any miss
    /// abandons the whole operation before anything is deleted.
    async fn delete_record(&self, record: &IntegratedRecord) -> ServiceResult<()>;

    /// Union of the years present across the four source collections,
    /// newest first.
    async fn list_available_years(&self) -> ServiceResult<Vec<i32>>;
}

/// Implementation of the integration service
#[derive(Clone)]
pub struct IntegrationServiceImpl {
    donor_repo: Arc<dyn DonorRepository>,
    external_box_repo: Arc<dyn ExternalCharityBoxRepository>,
    special_donation_repo: Arc<dyn SpecialDonationRepository>,
    mosque_box_repo: Arc<dyn MosqueCharityBoxRepository>,
}

impl IntegrationServiceImpl {
    pub fn new(
        donor_repo: Arc<dyn DonorRepository>,
        external_box_repo: Arc<dyn ExternalCharityBoxRepository>,
        special_donation_repo: Arc<dyn SpecialDonationRepository>,
        mosque_box_repo: Arc<dyn MosqueCharityBoxRepository>,
    ) -> Self {
        Self {
            donor_repo,
            external_box_repo,
            special_donation_repo,
            mosque_box_repo,
        }
    }
}

#[async_trait]
impl IntegrationService for IntegrationServiceImpl {
    async fn yearly_ledger(&self, year: i32) -> ServiceResult<Vec<IntegratedRecord>> {
        // Independent reads, issued concurrently
        let (donors, external_boxes, special_donations, mosque_boxes) = tokio::try_join!(
            self.donor_repo.list_by_year(year),
            self.external_box_repo.list_by_year(year),
            self.special_donation_repo.list_by_year(year),
            self.mosque_box_repo.list_by_year(year),
        )?;

        Ok(integrate(
            &donors,
            &external_boxes,
            &special_donations,
            &mosque_boxes,
            year,
        ))
    }

    fn resolve_edit_target(&self, record: &IntegratedRecord) -> EditTarget {
        record.source.edit_target()
    }

    async fn delete_record(&self, record: &IntegratedRecord) -> ServiceResult<()> {
        match self.resolve_edit_target(record) {
            EditTarget::Donor(id) => {
                self.donor_repo.delete(id).await?;
                info!("Deleted routine donor {} via merged view", id);
                Ok(())
            }
            EditTarget::ExternalBox(id) => {
                self.external_box_repo.delete(id).await?;
                info!("Deleted external charity box {} via merged view", id);
                Ok(())
            }
            EditTarget::SpecialDonations(member_ids) => {
                // Re-resolve every member before touching any of them
                for id in &member_ids {
                    if let Err(e) = self.special_donation_repo.find_by_id(*id).await {
                        error!(
                            "Special donation {} behind merged row '{}' no longer exists: {}",
                            id, record.display_name, e
                        );
                        return Err(e.into());
                    }
                }
                for id in &member_ids {
                    self.special_donation_repo.delete(*id).await?;
                }
                info!(
                    "Deleted {} special donation(s) via merged view",
                    member_ids.len()
                );
                Ok(())
            }
            EditTarget::NotEditable => Err(ServiceError::Ui(
                "The mosque charity box row is a yearly aggregate and cannot be edited directly"
                    .to_string(),
            )),
        }
    }

    async fn list_available_years(&self) -> ServiceResult<Vec<i32>> {
        let (a, b, c, d) = tokio::try_join!(
            self.donor_repo.list_available_years(),
            self.external_box_repo.list_available_years(),
            self.special_donation_repo.list_available_years(),
            self.mosque_box_repo.list_available_years(),
        )?;

        let mut years = a;
        for year in b.into_iter().chain(c).chain(d) {
            if !years.contains(&year) {
                years.push(year);
            }
        }
        years.sort_unstable_by(|x, y| y.cmp(x));
        Ok(years_or_current(years))
    }
}
