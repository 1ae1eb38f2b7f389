pub mod repository;
pub mod service;
pub mod types;

pub use repository::{InventoryRepository, SqliteInventoryRepository};
pub use service::{InventoryService, InventoryServiceImpl};
pub use types::{
    InventoryItem, InventoryItemRow, ItemCondition, NewInventoryItem, UpdateInventoryItem,
};
