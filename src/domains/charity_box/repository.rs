use crate::domains::charity_box::types::{
    ExternalCharityBox, ExternalCharityBoxRow, MosqueCharityBox, MosqueCharityBoxRow,
    NewExternalCharityBox, NewMosqueCharityBox, UpdateExternalCharityBox, UpdateMosqueCharityBox,
};
use crate::errors::{DbError, DomainError, DomainResult};
use crate::types::Month;
use async_trait::async_trait;
use chrono::Datelike;
use sqlx::{query, query_as, query_scalar, Sqlite, SqlitePool, Transaction};

const EXTERNAL_BOX_COLUMNS: &str = "id, sequence_number, label, location, year, january, \
     february, march, april, may, june, july, august, september, october, november, december";

/// Trait defining external charity box repository operations
#[async_trait]
pub trait ExternalCharityBoxRepository: Send + Sync {
    async fn create(&self, new_box: &NewExternalCharityBox) -> DomainResult<ExternalCharityBox>;

    async fn find_by_id(&self, id: i64) -> DomainResult<ExternalCharityBox>;

    async fn list_by_year(&self, year: i32) -> DomainResult<Vec<ExternalCharityBox>>;

    async fn update(
        &self,
        id: i64,
        update_data: &UpdateExternalCharityBox,
    ) -> DomainResult<ExternalCharityBox>;

    /// Delete by id, then renumber the remaining records of that year.
    async fn delete(&self, id: i64) -> DomainResult<()>;

    async fn list_available_years(&self) -> DomainResult<Vec<i32>>;
}

/// SQLite implementation for ExternalCharityBoxRepository
#[derive(Clone)]
pub struct SqliteExternalCharityBoxRepository {
    pool: SqlitePool,
}

impl SqliteExternalCharityBoxRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn entity_name() -> &'static str {
        "External Charity Box"
    }

    async fn find_by_id_with_tx<'t>(
        &self,
        id: i64,
        tx: &mut Transaction<'t, Sqlite>,
    ) -> DomainResult<ExternalCharityBox> {
        let row = query_as::<_, ExternalCharityBoxRow>(&format!(
            "SELECT {} FROM external_charity_boxes WHERE id = ?",
            EXTERNAL_BOX_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(DbError::from)?;

        row.map(ExternalCharityBox::from)
            .ok_or_else(|| DomainError::EntityNotFound(Self::entity_name().to_string(), id))
    }

    async fn resequence_year<'t>(
        &self,
        year: i32,
        tx: &mut Transaction<'t, Sqlite>,
    ) -> DomainResult<()> {
        query(
            r#"
            UPDATE external_charity_boxes SET sequence_number = (
                SELECT COUNT(*) FROM external_charity_boxes AS s
                WHERE s.year = external_charity_boxes.year
                  AND (s.sequence_number < external_charity_boxes.sequence_number
                       OR (s.sequence_number = external_charity_boxes.sequence_number
                           AND s.id <= external_charity_boxes.id))
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
impl ExternalCharityBoxRepository for SqliteExternalCharityBoxRepository {
    async fn create(&self, new_box: &NewExternalCharityBox) -> DomainResult<ExternalCharityBox> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let next_sequence: i64 = query_scalar(
            "SELECT COALESCE(MAX(sequence_number), 0) + 1 FROM external_charity_boxes WHERE year = ?",
        )
        .bind(new_box.year)
        .fetch_one(&mut *tx)
        .await
        .map_err(DbError::from)?;

        let result = query(
            r#"
            INSERT INTO external_charity_boxes (
                sequence_number, label, location, year,
                january, february, march, april, may, june,
                july, august, september, october, november, december
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(next_sequence)
        .bind(&new_box.label)
        .bind(&new_box.location)
        .bind(new_box.year)
        .bind(new_box.months.january)
        .bind(new_box.months.february)
        .bind(new_box.months.march)
        .bind(new_box.months.april)
        .bind(new_box.months.may)
        .bind(new_box.months.june)
        .bind(new_box.months.july)
        .bind(new_box.months.august)
        .bind(new_box.months.september)
        .bind(new_box.months.october)
        .bind(new_box.months.november)
        .bind(new_box.months.december)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        let created = self
            .find_by_id_with_tx(result.last_insert_rowid(), &mut tx)
            .await?;
        tx.commit().await.map_err(DbError::from)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<ExternalCharityBox> {
        let row = query_as::<_, ExternalCharityBoxRow>(&format!(
            "SELECT {} FROM external_charity_boxes WHERE id = ?",
            EXTERNAL_BOX_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?;

        row.map(ExternalCharityBox::from)
            .ok_or_else(|| DomainError::EntityNotFound(Self::entity_name().to_string(), id))
    }

    async fn list_by_year(&self, year: i32) -> DomainResult<Vec<ExternalCharityBox>> {
        let rows = query_as::<_, ExternalCharityBoxRow>(&format!(
            "SELECT {} FROM external_charity_boxes WHERE year = ? ORDER BY sequence_number, id",
            EXTERNAL_BOX_COLUMNS
        ))
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(rows.into_iter().map(ExternalCharityBox::from).collect())
    }

    async fn update(
        &self,
        id: i64,
        update_data: &UpdateExternalCharityBox,
    ) -> DomainResult<ExternalCharityBox> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let _ = self.find_by_id_with_tx(id, &mut tx).await?;

        let mut builder = sqlx::QueryBuilder::new("UPDATE external_charity_boxes SET ");
        let mut separated = builder.separated(", ");
        let mut fields_updated = false;

        if let Some(label) = &update_data.label {
            separated.push("label = ");
            separated.push_bind_unseparated(label);
            fields_updated = true;
        }
        if let Some(location) = &update_data.location {
            separated.push("location = ");
            separated.push_bind_unseparated(location);
            fields_updated = true;
        }
        if let Some(months) = &update_data.months {
            for month in Month::ALL {
                separated.push(format!("{} = ", month.as_str()));
                separated.push_bind_unseparated(months.get(month));
            }
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

        query("DELETE FROM external_charity_boxes WHERE id = ?")
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
            query_scalar("SELECT DISTINCT year FROM external_charity_boxes ORDER BY year DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(DbError::from)?;
        Ok(years)
    }
}

/// Trait defining mosque charity box repository operations
#[async_trait]
pub trait MosqueCharityBoxRepository: Send + Sync {
    async fn create(&self, new_box: &NewMosqueCharityBox) -> DomainResult<MosqueCharityBox>;

    async fn find_by_id(&self, id: i64) -> DomainResult<MosqueCharityBox>;

    /// Collections whose transaction date falls in the year. The date
    /// decides membership; the denormalised year column does not.
    async fn list_by_year(&self, year: i32) -> DomainResult<Vec<MosqueCharityBox>>;

    async fn update(
        &self,
        id: i64,
        update_data: &UpdateMosqueCharityBox,
    ) -> DomainResult<MosqueCharityBox>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    async fn list_available_years(&self) -> DomainResult<Vec<i32>>;
}

/// SQLite implementation for MosqueCharityBoxRepository
#[derive(Clone)]
pub struct SqliteMosqueCharityBoxRepository {
    pool: SqlitePool,
}

impl SqliteMosqueCharityBoxRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn entity_name() -> &'static str {
        "Mosque Charity Box"
    }

    async fn fetch_by_id(&self, id: i64) -> DomainResult<MosqueCharityBoxRow> {
        query_as::<_, MosqueCharityBoxRow>(
            "SELECT id, date, amount, year FROM mosque_charity_boxes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?
        .ok_or_else(|| DomainError::EntityNotFound(Self::entity_name().to_string(), id))
    }
}

#[async_trait]
impl MosqueCharityBoxRepository for SqliteMosqueCharityBoxRepository {
    async fn create(&self, new_box: &NewMosqueCharityBox) -> DomainResult<MosqueCharityBox> {
        let result = query("INSERT INTO mosque_charity_boxes (date, amount, year) VALUES (?, ?, ?)")
            .bind(new_box.date.format("%Y-%m-%d").to_string())
            .bind(new_box.amount)
            .bind(new_box.year())
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        self.find_by_id(result.last_insert_rowid()).await
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<MosqueCharityBox> {
        let row = self.fetch_by_id(id).await?;
        row.into_entity().ok_or_else(|| {
            DomainError::Internal(format!("Mosque charity box {} has a malformed date", id))
        })
    }

    async fn list_by_year(&self, year: i32) -> DomainResult<Vec<MosqueCharityBox>> {
        // ISO dates compare correctly as text, which keeps the year
        // boundary exact: Dec 31 in, Jan 1 of the next year out.
        let rows = query_as::<_, MosqueCharityBoxRow>(
            "SELECT id, date, amount, year FROM mosque_charity_boxes \
             WHERE date >= ? AND date <= ? ORDER BY date, id",
        )
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
        update_data: &UpdateMosqueCharityBox,
    ) -> DomainResult<MosqueCharityBox> {
        let existing = self.fetch_by_id(id).await?;

        let mut builder = sqlx::QueryBuilder::new("UPDATE mosque_charity_boxes SET ");
        let mut separated = builder.separated(", ");
        let mut fields_updated = false;

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

        if !fields_updated {
            return existing.into_entity().ok_or_else(|| {
                DomainError::Internal(format!("Mosque charity box {} has a malformed date", id))
            });
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
        let result = query("DELETE FROM mosque_charity_boxes WHERE id = ?")
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

    async fn list_available_years(&self) -> DomainResult<Vec<i32>> {
        let years: Vec<i32> = query_scalar(
            "SELECT DISTINCT CAST(substr(date, 1, 4) AS INTEGER) AS y \
             FROM mosque_charity_boxes ORDER BY y DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;
        Ok(years)
    }
}
