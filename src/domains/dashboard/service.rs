use crate::domains::charity_box::repository::{
    ExternalCharityBoxRepository, MosqueCharityBoxRepository,
};
use crate::domains::content::repository::AnnouncementRepository;
use crate::domains::dashboard::types::{growth_pct, DashboardSummary};
use crate::domains::donor::repository::DonorRepository;
use crate::domains::donor::types::RoutineDonor;
use crate::domains::integration::aggregate::sum_monthly;
use crate::domains::special_donation::repository::SpecialDonationRepository;
use crate::errors::ServiceResult;
use crate::types::Month;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait defining dashboard summary operations
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Compute the dashboard headline figures for one (year, month)
    /// selection, including the month-over-month and year-over-year
    /// growth comparisons.
    async fn summary(&self, year: i32, month: Month) -> ServiceResult<DashboardSummary>;
}

/// Implementation of the dashboard service
#[derive(Clone)]
pub struct DashboardServiceImpl {
    donor_repo: Arc<dyn DonorRepository>,
    external_box_repo: Arc<dyn ExternalCharityBoxRepository>,
    special_donation_repo: Arc<dyn SpecialDonationRepository>,
    mosque_box_repo: Arc<dyn MosqueCharityBoxRepository>,
    announcement_repo: Arc<dyn AnnouncementRepository>,
}

impl DashboardServiceImpl {
    pub fn new(
        donor_repo: Arc<dyn DonorRepository>,
        external_box_repo: Arc<dyn ExternalCharityBoxRepository>,
        special_donation_repo: Arc<dyn SpecialDonationRepository>,
        mosque_box_repo: Arc<dyn MosqueCharityBoxRepository>,
        announcement_repo: Arc<dyn AnnouncementRepository>,
    ) -> Self {
        Self {
            donor_repo,
            external_box_repo,
            special_donation_repo,
            mosque_box_repo,
            announcement_repo,
        }
    }

    fn active_count(donors: &[RoutineDonor], month: Month) -> i64 {
        donors.iter().filter(|d| d.months.get(month) > 0).count() as i64
    }

    fn month_total(donors: &[RoutineDonor], month: Month) -> i64 {
        donors.iter().map(|d| d.months.get(month)).sum()
    }

    /// Income across all four sources for one year.
    async fn annual_income(&self, year: i32) -> ServiceResult<i64> {
        let (donors, external_boxes, special_donations, mosque_boxes) = tokio::try_join!(
            self.donor_repo.list_by_year(year),
            self.external_box_repo.list_by_year(year),
            self.special_donation_repo.list_by_year(year),
            self.mosque_box_repo.list_by_year(year),
        )?;

        let donor_total: i64 = donors.iter().map(|d| d.total()).sum();
        let external_total: i64 = external_boxes.iter().map(|b| b.total()).sum();
        let special_total: i64 = special_donations.iter().map(|d| d.amount).sum();
        let mosque_total: i64 = mosque_boxes.iter().map(|b| b.amount).sum();

        Ok(donor_total + external_total + special_total + mosque_total)
    }
}

#[async_trait]
impl DashboardService for DashboardServiceImpl {
    async fn summary(&self, year: i32, month: Month) -> ServiceResult<DashboardSummary> {
        // January compares against December of the prior year
        let (prior_year, prior_month) = match month {
            Month::January => (year - 1, Month::December),
            other => (year, other.prev()),
        };

        // Independent reads, issued concurrently; the growth ratios are
        // computed only once both comparison periods have resolved.
        let (
            donors,
            prior_donors,
            external_boxes,
            mosque_boxes,
            published_content_count,
            annual_income_total,
            prior_annual_income,
        ) = tokio::try_join!(
            async { Ok(self.donor_repo.list_by_year(year).await?) },
            async {
                if prior_year == year {
                    Ok(None)
                } else {
                    Ok(Some(self.donor_repo.list_by_year(prior_year).await?))
                }
            },
            async { Ok(self.external_box_repo.list_by_year(year).await?) },
            async { Ok(self.mosque_box_repo.list_by_year(year).await?) },
            async { Ok(self.announcement_repo.published_count().await?) },
            self.annual_income(year),
            self.annual_income(year - 1),
        )?;

        let prior_period_donors = prior_donors.as_deref().unwrap_or(&donors);

        let active_donor_count = Self::active_count(&donors, month);
        let prior_active_count = Self::active_count(prior_period_donors, prior_month);
        let monthly_donation_total = Self::month_total(&donors, month);
        let prior_month_total = Self::month_total(prior_period_donors, prior_month);

        let external_box_total = sum_monthly(external_boxes.iter().map(|b| &b.months)).total;
        let mosque_box_total: i64 = mosque_boxes.iter().map(|b| b.amount).sum();

        Ok(DashboardSummary {
            year,
            month,
            active_donor_count,
            active_donor_growth_pct: growth_pct(prior_active_count, active_donor_count),
            monthly_donation_total,
            monthly_donation_growth_pct: growth_pct(prior_month_total, monthly_donation_total),
            charity_box_total: external_box_total + mosque_box_total,
            published_content_count,
            annual_income_total,
            annual_income_growth_pct: growth_pct(prior_annual_income, annual_income_total),
        })
    }
}
