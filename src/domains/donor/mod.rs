pub mod repository;
pub mod service;
pub mod types;

pub use repository::{DonorRepository, SqliteDonorRepository};
pub use service::{DonorService, DonorServiceImpl};
pub use types::{NewRoutineDonor, RoutineDonor, RoutineDonorRow, UpdateRoutineDonor};
