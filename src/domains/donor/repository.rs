use crate::domains::donor::types::{
    NewRoutineDonor, RoutineDonor, RoutineDonorRow, UpdateRoutineDonor,
};
use crate::errors::{DbError, DomainError, DomainResult};
use crate::types::Month;
use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar, Sqlite, SqlitePool, Transaction};

const DONOR_COLUMNS: &str = "id, sequence_number, name, address, year, january, february, march, \
     april, may, june, july, august, september, october, november, december, other_amount";

/// Trait defining routine donor repository operations
#[async_trait]
pub trait DonorRepository: Send + Sync {
    async fn create(&self, new_donor: &NewRoutineDonor) -> DomainResult<RoutineDonor>;

    async fn find_by_id(&self, id: i64) -> DomainResult<RoutineDonor>;

    /// All donors recorded for a year, in display order.
    async fn list_by_year(&self, year: i32) -> DomainResult<Vec<RoutineDonor>>;

    async fn update(&self, id: i64, update_data: &UpdateRoutineDonor) -> DomainResult<RoutineDonor>;

    /// Delete by id, then renumber the remaining records of that year to
    /// a gapless 1..N in their original relative order.
    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// Distinct years present, newest first.
    async fn list_available_years(&self) -> DomainResult<Vec<i32>>;
}

/// SQLite implementation for DonorRepository
#[derive(Clone)]
pub struct SqliteDonorRepository {
    pool: SqlitePool,
}

impl SqliteDonorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn entity_name() -> &'static str {
        "Routine Donor"
    }

    async fn find_by_id_with_tx<'t>(
        &self,
        id: i64,
        tx: &mut Transaction<'t, Sqlite>,
    ) -> DomainResult<RoutineDonor> {
        let row = query_as::<_, RoutineDonorRow>(&format!(
            "SELECT {} FROM routine_donors WHERE id = ?",
            DONOR_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(DbError::from)?;

        row.map(RoutineDonor::from)
            .ok_or_else(|| DomainError::EntityNotFound(Self::entity_name().to_string(), id))
    }

    /// Rewrite sequence numbers for a year to 1..N preserving order.
    async fn resequence_year<'t>(
        &self,
        year: i32,
        tx: &mut Transaction<'t, Sqlite>,
    ) -> DomainResult<()> {
        query(
            r#"
            UPDATE routine_donors SET sequence_number = (
                SELECT COUNT(*) FROM routine_donors AS s
                WHERE s.year = routine_donors.year
                  AND (s.sequence_number < routine_donors.sequence_number
                       OR (s.sequence_number = routine_donors.sequence_number
                           AND s.id <= routine_donors.id))
            ) WHERE year = ?
            "#,
        )
        .bind(year)
        .execute(&mut **tx)
        .await
        .map_err(DbError::from)?;
        Ok(())
    }
}

#[async_trait]
impl DonorRepository for SqliteDonorRepository {
    async fn create(&self, new_donor: &NewRoutineDonor) -> DomainResult<RoutineDonor> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let next_sequence: i64 = query_scalar(
            "SELECT COALESCE(MAX(sequence_number), 0) + 1 FROM routine_donors WHERE year = ?",
        )
        .bind(new_donor.year)
        .fetch_one(&mut *tx)
        .await
        .map_err(DbError::from)?;

        let result = query(
            r#"
            INSERT INTO routine_donors (
                sequence_number, name, address, year,
                january, february, march, april, may, june,
                july, august, september, october, november, december,
                other_amount
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(next_sequence)
        .bind(&new_donor.name)
        .bind(&new_donor.address)
        .bind(new_donor.year)
        .bind(new_donor.months.january)
        .bind(new_donor.months.february)
        .bind(new_donor.months.march)
        .bind(new_donor.months.april)
        .bind(new_donor.months.may)
        .bind(new_donor.months.june)
        .bind(new_donor.months.july)
        .bind(new_donor.months.august)
        .bind(new_donor.months.september)
        .bind(new_donor.months.october)
        .bind(new_donor.months.november)
        .bind(new_donor.months.december)
        .bind(new_donor.other_amount)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        let created = self
            .find_by_id_with_tx(result.last_insert_rowid(), &mut tx)
            .await?;
        tx.commit().await.map_err(DbError::from)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<RoutineDonor> {
        let row = query_as::<_, RoutineDonorRow>(&format!(
            "SELECT {} FROM routine_donors WHERE id = ?",
            DONOR_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?;

        row.map(RoutineDonor::from)
            .ok_or_else(|| DomainError::EntityNotFound(Self::entity_name().to_string(), id))
    }

    async fn list_by_year(&self, year: i32) -> DomainResult<Vec<RoutineDonor>> {
        let rows = query_as::<_, RoutineDonorRow>(&format!(
            "SELECT {} FROM routine_donors WHERE year = ? ORDER BY sequence_number, id",
            DONOR_COLUMNS
        ))
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(rows.into_iter().map(RoutineDonor::from).collect())
    }

    async fn update(&self, id: i64, update_data: &UpdateRoutineDonor) -> DomainResult<RoutineDonor> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        // Ensure the record exists before building the statement
        let _ = self.find_by_id_with_tx(id, &mut tx).await?;

        let mut builder = sqlx::QueryBuilder::new("UPDATE routine_donors SET ");
        let mut separated = builder.separated(", ");
        let mut fields_updated = false;

        if let Some(name) = &update_data.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name);
            fields_updated = true;
        }
        if let Some(address) = &update_data.address {
            separated.push("address = ");
            separated.push_bind_unseparated(address);
            fields_updated = true;
        }
        if let Some(months) = &update_data.months {
            for month in Month::ALL {
                separated.push(format!("{} = ", month.as_str()));
                separated.push_bind_unseparated(months.get(month));
            }
            fields_updated = true;
        }
        if let Some(other_amount) = update_data.other_amount {
            separated.push("other_amount = ");
            separated.push_bind_unseparated(other_amount);
            fields_updated = true;
        }

        if !fields_updated {
            let unchanged = self.find_by_id_with_tx(id, &mut tx).await?;
            tx.commit().await.map_err(DbError::from)?;
            return Ok(unchanged);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder
            .build()
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        let updated = self.find_by_id_with_tx(id, &mut tx).await?;
        tx.commit().await.map_err(DbError::from)?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let existing = self.find_by_id_with_tx(id, &mut tx).await?;

        query("DELETE FROM routine_donors WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        self.resequence_year(existing.year, &mut tx).await?;
        tx.commit().await.map_err(DbError::from)?;
        Ok(())
    }

    async fn list_available_years(&self) -> DomainResult<Vec<i32>> {
        let years: Vec<i32> =
            query_scalar("SELECT DISTINCT year FROM routine_donors ORDER BY year DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(DbError::from)?;
        Ok(years)
    }
}
