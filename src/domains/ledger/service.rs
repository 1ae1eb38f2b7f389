use crate::domains::ledger::repository::LedgerRepository;
use crate::domains::ledger::types::{LedgerEntry, LedgerKind, NewLedgerEntry, UpdateLedgerEntry};
use crate::errors::ServiceResult;
use crate::types::years_or_current;
use crate::validation::Validate;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

/// Trait defining ledger service operations
#[async_trait]
pub trait LedgerService: Send + Sync {
    async fn create_entry(&self, new_entry: NewLedgerEntry) -> ServiceResult<LedgerEntry>;

    async fn get_entry(&self, id: i64) -> ServiceResult<LedgerEntry>;

    async fn list_entries(&self, kind: LedgerKind, year: i32) -> ServiceResult<Vec<LedgerEntry>>;

    async fn update_entry(
        &self,
        id: i64,
        update_data: UpdateLedgerEntry,
    ) -> ServiceResult<LedgerEntry>;

    async fn delete_entry(&self, id: i64) -> ServiceResult<()>;

    async fn list_available_years(&self) -> ServiceResult<Vec<i32>>;
}

/// Implementation of the ledger service
#[derive(Clone)]
pub struct LedgerServiceImpl {
    repo: Arc<dyn LedgerRepository>,
}

impl LedgerServiceImpl {
    pub fn new(repo: Arc<dyn LedgerRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl LedgerService for LedgerServiceImpl {
    async fn create_entry(&self, new_entry: NewLedgerEntry) -> ServiceResult<LedgerEntry> {
        new_entry.validate()?;
        let created = self.repo.create(&new_entry).await?;
        info!(
            "Recorded {} entry {} ({}) for {}",
            created.kind, created.id, created.category, created.date
        );
        Ok(created)
    }

    async fn get_entry(&self, id: i64) -> ServiceResult<LedgerEntry> {
        Ok(self.repo.find_by_id(id).await?)
    }

    async fn list_entries(&self, kind: LedgerKind, year: i32) -> ServiceResult<Vec<LedgerEntry>> {
        Ok(self.repo.list_by_year(kind, year).await?)
    }

    async fn update_entry(
        &self,
        id: i64,
        update_data: UpdateLedgerEntry,
    ) -> ServiceResult<LedgerEntry> {
        update_data.validate()?;
        let updated = self.repo.update(id, &update_data).await?;
        info!("Updated ledger entry {}", id);
        Ok(updated)
    }

    async fn delete_entry(&self, id: i64) -> ServiceResult<()> {
        self.repo.delete(id).await?;
        info!("Deleted ledger entry {}", id);
        Ok(())
    }

    async fn list_available_years(&self) -> ServiceResult<Vec<i32>> {
        Ok(years_or_current(self.repo.list_available_years().await?))
    }
}
