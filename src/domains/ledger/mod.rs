pub mod repository;
pub mod service;
pub mod types;

pub use repository::{LedgerRepository, SqliteLedgerRepository};
pub use service::{LedgerService, LedgerServiceImpl};
pub use types::{LedgerEntry, LedgerEntryRow, LedgerKind, NewLedgerEntry, UpdateLedgerEntry};
