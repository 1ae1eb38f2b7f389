pub mod service;
pub mod types;

pub use service::{ReportService, ReportServiceImpl};
pub use types::{AnnualReport, ReportRow};
