pub mod service;
pub mod types;

pub use service::{DashboardService, DashboardServiceImpl};
pub use types::{growth_pct, DashboardSummary};
