pub mod aggregate;
pub mod merge;
pub mod service;
pub mod types;

pub use aggregate::{bucket_by_month, sum_monthly};
pub use merge::integrate;
pub use service::{IntegrationService, IntegrationServiceImpl};
pub use types::{
    EditTarget, IntegratedRecord, MonthlyTotals, SourceRef, CHARITY_BOX_PREFIX, MOSQUE_BOX_LABEL,
    SPECIAL_DONATION_PREFIX,
};
