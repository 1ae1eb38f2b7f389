use std::sync::Arc;

// Public modules
pub mod database;
pub mod domains;
pub mod errors;
pub mod types;
pub mod validation;

use domains::charity_box::{
    CharityBoxService, CharityBoxServiceImpl, SqliteExternalCharityBoxRepository,
    SqliteMosqueCharityBoxRepository,
};
use domains::content::{ContentService, ContentServiceImpl, SqliteAnnouncementRepository};
use domains::core::file_storage_service::{FileStorageService, LocalFileStorageService};
use domains::dashboard::{DashboardService, DashboardServiceImpl};
use domains::donor::{DonorService, DonorServiceImpl, SqliteDonorRepository};
use domains::integration::{IntegrationService, IntegrationServiceImpl};
use domains::inventory::{InventoryService, InventoryServiceImpl, SqliteInventoryRepository};
use domains::ledger::{LedgerService, LedgerServiceImpl, SqliteLedgerRepository};
use domains::report::{ReportService, ReportServiceImpl};
use domains::special_donation::{
    SpecialDonationService, SpecialDonationServiceImpl, SqliteSpecialDonationRepository,
};
use errors::ServiceResult;
use sqlx::SqlitePool;

/// Initialize env_logger once. Safe to call from multiple tests.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}

/// The fully wired service graph. All handles are cheap to clone and
/// share one connection pool.
#[derive(Clone)]
pub struct AppServices {
    pub donors: Arc<dyn DonorService>,
    pub charity_boxes: Arc<dyn CharityBoxService>,
    pub special_donations: Arc<dyn SpecialDonationService>,
    pub ledger: Arc<dyn LedgerService>,
    pub inventory: Arc<dyn InventoryService>,
    pub content: Arc<dyn ContentService>,
    pub integration: Arc<dyn IntegrationService>,
    pub reports: Arc<dyn ReportService>,
    pub dashboard: Arc<dyn DashboardService>,
}

impl AppServices {
    /// Wire every repository and service on top of an open pool.
    /// `storage_path` is the directory uploaded announcement images
    /// are written to.
    pub fn build(pool: SqlitePool, storage_path: &str) -> ServiceResult<Self> {
        let donor_repo = Arc::new(SqliteDonorRepository::new(pool.clone()));
        let external_box_repo = Arc::new(SqliteExternalCharityBoxRepository::new(pool.clone()));
        let mosque_box_repo = Arc::new(SqliteMosqueCharityBoxRepository::new(pool.clone()));
        let special_donation_repo = Arc::new(SqliteSpecialDonationRepository::new(pool.clone()));
        let ledger_repo = Arc::new(SqliteLedgerRepository::new(pool.clone()));
        let inventory_repo = Arc::new(SqliteInventoryRepository::new(pool.clone()));
        let announcement_repo = Arc::new(SqliteAnnouncementRepository::new(pool));

        let storage: Arc<dyn FileStorageService> = Arc::new(
            LocalFileStorageService::new(storage_path)
                .map_err(|e| errors::DomainError::File(format!("storage init failed: {}", e)))?,
        );

        Ok(Self {
            donors: Arc::new(DonorServiceImpl::new(donor_repo.clone())),
            charity_boxes: Arc::new(CharityBoxServiceImpl::new(
                external_box_repo.clone(),
                mosque_box_repo.clone(),
            )),
            special_donations: Arc::new(SpecialDonationServiceImpl::new(
                special_donation_repo.clone(),
            )),
            ledger: Arc::new(LedgerServiceImpl::new(ledger_repo.clone())),
            inventory: Arc::new(InventoryServiceImpl::new(inventory_repo)),
            content: Arc::new(ContentServiceImpl::new(announcement_repo.clone(), storage)),
            integration: Arc::new(IntegrationServiceImpl::new(
                donor_repo.clone(),
                external_box_repo.clone(),
                special_donation_repo.clone(),
                mosque_box_repo.clone(),
            )),
            reports: Arc::new(ReportServiceImpl::new(ledger_repo)),
            dashboard: Arc::new(DashboardServiceImpl::new(
                donor_repo,
                external_box_repo,
                special_donation_repo,
                mosque_box_repo,
                announcement_repo,
            )),
        })
    }
}

/// Open the database, run migrations, and wire the service graph.
/// This is the normal entry point for an embedding application.
pub async fn initialize(
    database_url: Option<&str>,
    storage_path: &str,
) -> ServiceResult<AppServices> {
    let pool = database::connect(database_url)
        .await
        .map_err(errors::DomainError::Database)?;
    database::run_migrations(&pool)
        .await
        .map_err(errors::DomainError::Database)?;
    AppServices::build(pool, storage_path)
}
