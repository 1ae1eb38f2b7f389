pub mod repository;
pub mod service;
pub mod types;

pub use repository::{SpecialDonationRepository, SqliteSpecialDonationRepository};
pub use service::{SpecialDonationService, SpecialDonationServiceImpl};
pub use types::{NewSpecialDonation, SpecialDonation, SpecialDonationRow, UpdateSpecialDonation};
