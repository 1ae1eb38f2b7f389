use crate::domains::special_donation::types::{
    NewSpecialDonation, SpecialDonation, SpecialDonationRow, UpdateSpecialDonation,
};
use crate::errors::{DbError, DomainError, DomainResult};
use async_trait::async_trait;
use chrono::Datelike;
use sqlx::{query, query_as, query_scalar, Sqlite, SqlitePool, Transaction};

const DONATION_COLUMNS: &str = "id, sequence_number, donor_name, date, amount, note, year";

/// Trait defining special donation repository operations
#[async_trait]
pub trait SpecialDonationRepository: Send + Sync {
    async fn create(&self, new_donation: &NewSpecialDonation) -> DomainResult<SpecialDonation>;

    async fn find_by_id(&self, id: i64) -> DomainResult<SpecialDonation>;

    /// Donations whose transaction date falls in the year. The date
    /// decides membership; the denormalised year column does not.
    async fn list_by_year(&self, year: i32) -> DomainResult<Vec<SpecialDonation>>;

    async fn update(
        &self,
        id: i64,
        update_data: &UpdateSpecialDonation,
    ) -> DomainResult<SpecialDonation>;

    /// Delete by id, then renumber the remaining records of that year.
    async fn delete(&self, id: i64) -> DomainResult<()>;

    async fn list_available_years(&self) -> DomainResult<Vec<i32>>;
}

/// SQLite implementation for SpecialDonationRepository
#[derive(Clone)]
pub struct SqliteSpecialDonationRepository {
    pool: SqlitePool,
}

impl SqliteSpecialDonationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn entity_name() -> &'static str {
        "Special Donation"
    }

    async fn fetch_by_id_with_tx<'t>(
        &self,
        id: i64,
        tx: &mut Transaction<'t, Sqlite>,
    ) -> DomainResult<SpecialDonationRow> {
        query_as::<_, SpecialDonationRow>(&format!(
            "SELECT {} FROM special_donations WHERE id = ?",
            DONATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(DbError::from)?
        .ok_or_else(|| DomainError::EntityNotFound(Self::entity_name().to_string(), id))
    }

    async fn resequence_year<'t>(
        &self,
        year: i32,
        tx: &mut Transaction<'t, Sqlite>,
    ) -> DomainResult<()> {
        query(
            r#"
            UPDATE special_donations SET sequence_number = (
                SELECT COUNT(*) FROM special_donations AS s
                WHERE s.year = special_donations.year
                  AND (s.sequence_number < special_donations.sequence_number
                       OR (s.sequence_number = special_donations.sequence_number
                           AND s.id <= special_donations.id))
            ) WHERE year = ?
            "#,
        )
        .bind(year)
        .execute(&mut **tx)
        .await
        .map_err(DbError::from)?;
        Ok(())
    }

    fn row_to_entity(row: SpecialDonationRow) -> DomainResult<SpecialDonation> {
        let id = row.id;
        row.into_entity().ok_or_else(|| {
            DomainError::Internal(format!("Special donation {} has a malformed date", id))
        })
    }
}

#[async_trait]
impl SpecialDonationRepository for SqliteSpecialDonationRepository {
    async fn create(&self, new_donation: &NewSpecialDonation) -> DomainResult<SpecialDonation> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let year = new_donation.year();

        let next_sequence: i64 = query_scalar(
            "SELECT COALESCE(MAX(sequence_number), 0) + 1 FROM special_donations WHERE year = ?",
        )
        .bind(year)
        .fetch_one(&mut *tx)
        .await
        .map_err(DbError::from)?;

        let result = query(
            "INSERT INTO special_donations (sequence_number, donor_name, date, amount, note, year) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(next_sequence)
        .bind(&new_donation.donor_name)
        .bind(new_donation.date.format("%Y-%m-%d").to_string())
        .bind(new_donation.amount)
        .bind(&new_donation.note)
        .bind(year)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        let row = self
            .fetch_by_id_with_tx(result.last_insert_rowid(), &mut tx)
            .await?;
        tx.commit().await.map_err(DbError::from)?;
        Self::row_to_entity(row)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<SpecialDonation> {
        let row = query_as::<_, SpecialDonationRow>(&format!(
            "SELECT {} FROM special_donations WHERE id = ?",
            DONATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?
        .ok_or_else(|| DomainError::EntityNotFound(Self::entity_name().to_string(), id))?;

        Self::row_to_entity(row)
    }

    async fn list_by_year(&self, year: i32) -> DomainResult<Vec<SpecialDonation>> {
        // ISO dates compare correctly as text, which keeps the year
        // boundary exact: Dec 31 in, Jan 1 of the next year out.
        let rows = query_as::<_, SpecialDonationRow>(&format!(
            "SELECT {} FROM special_donations WHERE date >= ? AND date <= ? \
             ORDER BY sequence_number, id",
            DONATION_COLUMNS
        ))
        .bind(format!("{:04}-01-01", year))
        .bind(format!("{:04}-12-31", year))
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(rows.into_iter().filter_map(|r| r.into_entity()).collect())
    }

    async fn update(
        &self,
        id: i64,
        update_data: &UpdateSpecialDonation,
    ) -> DomainResult<SpecialDonation> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let existing = self.fetch_by_id_with_tx(id, &mut tx).await?;
        let old_year = existing.year;

        let mut builder = sqlx::QueryBuilder::new("UPDATE special_donations SET ");
        let mut separated = builder.separated(", ");
        let mut fields_updated = false;
        let mut new_year = None;

        if let Some(donor_name) = &update_data.donor_name {
            separated.push("donor_name = ");
            separated.push_bind_unseparated(donor_name);
            fields_updated = true;
        }
        if let Some(date) = update_data.date {
            separated.push("date = ");
            separated.push_bind_unseparated(date.format("%Y-%m-%d").to_string());
            // Keep the denormalised year in lockstep with the date
            separated.push("year = ");
            separated.push_bind_unseparated(date.year());
            new_year = Some(date.year());
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
            tx.commit().await.map_err(DbError::from)?;
            return Self::row_to_entity(existing);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder
            .build()
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        // A year change moves the record between display sequences
        if let Some(new_year) = new_year {
            if new_year != old_year {
                let next_sequence: i64 = query_scalar(
                    "SELECT COALESCE(MAX(sequence_number), 0) + 1 FROM special_donations \
                     WHERE year = ? AND id != ?",
                )
                .bind(new_year)
                .bind(id)
                .fetch_one(&mut *tx)
                .await
                .map_err(DbError::from)?;

                query("UPDATE special_donations SET sequence_number = ? WHERE id = ?")
                    .bind(next_sequence)
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(DbError::from)?;

                self.resequence_year(old_year, &mut tx).await?;
            }
        }

        let row = self.fetch_by_id_with_tx(id, &mut tx).await?;
        tx.commit().await.map_err(DbError::from)?;
        Self::row_to_entity(row)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let existing = self.fetch_by_id_with_tx(id, &mut tx).await?;

        query("DELETE FROM special_donations WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        self.resequence_year(existing.year, &mut tx).await?;
        tx.commit().await.map_err(DbError::from)?;
        Ok(())
    }

    async fn list_available_years(&self) -> DomainResult<Vec<i32>> {
        let years: Vec<i32> = query_scalar(
            "SELECT DISTINCT CAST(substr(date, 1, 4) AS INTEGER) AS y \
             FROM special_donations ORDER BY y DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;
        Ok(years)
    }
}
