use crate::domains::ledger::types::{
    LedgerEntry, LedgerEntryRow, LedgerKind, NewLedgerEntry, UpdateLedgerEntry,
};
use crate::errors::{DbError, DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use sqlx::{query, query_as, query_scalar, SqlitePool};

const LEDGER_COLUMNS: &str = "id, kind, category, date, amount, note, year";

/// Trait defining ledger repository operations
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn create(&self, new_entry: &NewLedgerEntry) -> DomainResult<LedgerEntry>;

    async fn find_by_id(&self, id: i64) -> DomainResult<LedgerEntry>;

    /// Entries of a kind whose transaction date falls in the year.
    async fn list_by_year(&self, kind: LedgerKind, year: i32) -> DomainResult<Vec<LedgerEntry>>;

    async fn update(&self, id: i64, update_data: &UpdateLedgerEntry) -> DomainResult<LedgerEntry>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// Distinct categories of a kind present in the year, in first-use
    /// order of the category text.
    async fn distinct_categories(&self, kind: LedgerKind, year: i32) -> DomainResult<Vec<String>>;

    /// Sum of `amount` for one kind and category over an inclusive date
    /// window. The report issues one such query per category-month cell.
    async fn sum_in_range(
        &self,
        kind: LedgerKind,
        category: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<i64>;

    async fn list_available_years(&self) -> DomainResult<Vec<i32>>;
}

/// SQLite implementation for LedgerRepository
#[derive(Clone)]
pub struct SqliteLedgerRepository {
    pool: SqlitePool,
}

impl SqliteLedgerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn entity_name() -> &'static str {
        "Ledger Entry"
    }

    fn row_to_entity(row: LedgerEntryRow) -> DomainResult<LedgerEntry> {
        let id = row.id;
        row.into_entity().ok_or_else(|| {
            DomainError::Internal(format!("Ledger entry {} has malformed stored fields", id))
        })
    }
}

#[async_trait]
impl LedgerRepository for SqliteLedgerRepository {
    async fn create(&self, new_entry: &NewLedgerEntry) -> DomainResult<LedgerEntry> {
        let result = query(
            "INSERT INTO ledger_entries (kind, category, date, amount, note, year) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(new_entry.kind.as_str())
        .bind(&new_entry.category)
        .bind(new_entry.date.format("%Y-%m-%d").to_string())
        .bind(new_entry.amount)
        .bind(&new_entry.note)
        .bind(new_entry.year())
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        self.find_by_id(result.last_insert_rowid()).await
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<LedgerEntry> {
        let row = query_as::<_, LedgerEntryRow>(&format!(
            "SELECT {} FROM ledger_entries WHERE id = ?",
            LEDGER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?
        .ok_or_else(|| DomainError::EntityNotFound(Self::entity_name().to_string(), id))?;

        Self::row_to_entity(row)
    }

    async fn list_by_year(&self, kind: LedgerKind, year: i32) -> DomainResult<Vec<LedgerEntry>> {
        let rows = query_as::<_, LedgerEntryRow>(&format!(
            "SELECT {} FROM ledger_entries WHERE kind = ? AND date >= ? AND date <= ? \
             ORDER BY date, id",
            LEDGER_COLUMNS
        ))
        .bind(kind.as_str())
        .bind(format!("{:04}-01-01", year))
        .bind(format!("{:04}-12-31", year))
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(rows.into_iter().filter_map(|r| r.into_entity()).collect())
    }

    async fn update(&self, id: i64, update_data: &UpdateLedgerEntry) -> DomainResult<LedgerEntry> {
        let _ = self.find_by_id(id).await?;

        let mut builder = sqlx::QueryBuilder::new("UPDATE ledger_entries SET ");
        let mut separated = builder.separated(", ");
        let mut fields_updated = false;

        if let Some(category) = &update_data.category {
            separated.push("category = ");
            separated.push_bind_unseparated(category);
            fields_updated = true;
        }
        if let Some(date) = update_data.date {
            separated.push("date = ");
            separated.push_bind_unseparated(date.format("%Y-%m-%d").to_string());
            // Keep the denormalised year in lockstep with the date
            separated.push("year = ");
            separated.push_bind_unseparated(date.year());
            fields_updated = true;
        }
        if let Some(amount) = update_data.amount {
            separated.push("amount = ");
            separated.push_bind_unseparated(amount);
            fields_updated = true;
        }
        if let Some(note) = &update_data.note {
            separated.push("note = ");
            separated.push_bind_unseparated(note);
            fields_updated = true;
        }

        if !fields_updated {
            return self.find_by_id(id).await;
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = query("DELETE FROM ledger_entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            Err(DomainError::EntityNotFound(Self::entity_name().to_string(), id))
        } else {
            Ok(())
        }
    }

    async fn distinct_categories(&self, kind: LedgerKind, year: i32) -> DomainResult<Vec<String>> {
        let categories: Vec<String> = query_scalar(
            "SELECT category FROM ledger_entries WHERE kind = ? AND date >= ? AND date <= ? \
             GROUP BY category ORDER BY MIN(id)",
        )
        .bind(kind.as_str())
        .bind(format!("{:04}-01-01", year))
        .bind(format!("{:04}-12-31", year))
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(categories)
    }

    async fn sum_in_range(
        &self,
        kind: LedgerKind,
        category: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<i64> {
        let total: i64 = query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM ledger_entries \
             WHERE kind = ? AND category = ? AND date >= ? AND date <= ?",
        )
        .bind(kind.as_str())
        .bind(category)
        .bind(start.format("%Y-%m-%d").to_string())
        .bind(end.format("%Y-%m-%d").to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(total)
    }

    async fn list_available_years(&self) -> DomainResult<Vec<i32>> {
        let years: Vec<i32> = query_scalar(
            "SELECT DISTINCT CAST(substr(date, 1, 4) AS INTEGER) AS y \
             FROM ledger_entries ORDER BY y DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;
        Ok(years)
    }
}
