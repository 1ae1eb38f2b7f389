use crate::domains::inventory::types::{
    InventoryItem, InventoryItemRow, NewInventoryItem, UpdateInventoryItem,
};
use crate::errors::{DbError, DomainError, DomainResult};
use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar, Sqlite, SqlitePool, Transaction};

const ITEM_COLUMNS: &str = "id, sequence_number, name, quantity, condition, location";

/// Trait defining inventory repository operations
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn create(&self, new_item: &NewInventoryItem) -> DomainResult<InventoryItem>;

    async fn find_by_id(&self, id: i64) -> DomainResult<InventoryItem>;

    async fn list(&self) -> DomainResult<Vec<InventoryItem>>;

    async fn update(&self, id: i64, update_data: &UpdateInventoryItem)
        -> DomainResult<InventoryItem>;

    /// Delete by id, then renumber the remaining items to 1..N.
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

/// SQLite implementation for InventoryRepository
#[derive(Clone)]
pub struct SqliteInventoryRepository {
    pool: SqlitePool,
}

impl SqliteInventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn entity_name() -> &'static str {
        "Inventory Item"
    }

    async fn find_by_id_with_tx<'t>(
        &self,
        id: i64,
        tx: &mut Transaction<'t, Sqlite>,
    ) -> DomainResult<InventoryItem> {
        let row = query_as::<_, InventoryItemRow>(&format!(
            "SELECT {} FROM inventory_items WHERE id = ?",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(DbError::from)?;

        row.map(InventoryItem::from)
            .ok_or_else(|| DomainError::EntityNotFound(Self::entity_name().to_string(), id))
    }

    async fn resequence<'t>(&self, tx: &mut Transaction<'t, Sqlite>) -> DomainResult<()> {
        query(
            r#"
            UPDATE inventory_items SET sequence_number = (
                SELECT COUNT(*) FROM inventory_items AS s
                WHERE s.sequence_number < inventory_items.sequence_number
                   OR (s.sequence_number = inventory_items.sequence_number
                       AND s.id <= inventory_items.id)
            )
            "#,
        )
        .execute(&mut **tx)
        .await
        .map_err(DbError::from)?;
        Ok(())
    }
}

#[async_trait]
impl InventoryRepository for SqliteInventoryRepository {
    async fn create(&self, new_item: &NewInventoryItem) -> DomainResult<InventoryItem> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let next_sequence: i64 =
            query_scalar("SELECT COALESCE(MAX(sequence_number), 0) + 1 FROM inventory_items")
                .fetch_one(&mut *tx)
                .await
                .map_err(DbError::from)?;

        let result = query(
            "INSERT INTO inventory_items (sequence_number, name, quantity, condition, location) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(next_sequence)
        .bind(&new_item.name)
        .bind(new_item.quantity)
        .bind(&new_item.condition)
        .bind(&new_item.location)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        let created = self
            .find_by_id_with_tx(result.last_insert_rowid(), &mut tx)
            .await?;
        tx.commit().await.map_err(DbError::from)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<InventoryItem> {
        let row = query_as::<_, InventoryItemRow>(&format!(
            "SELECT {} FROM inventory_items WHERE id = ?",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?;

        row.map(InventoryItem::from)
            .ok_or_else(|| DomainError::EntityNotFound(Self::entity_name().to_string(), id))
    }

    async fn list(&self) -> DomainResult<Vec<InventoryItem>> {
        let rows = query_as::<_, InventoryItemRow>(&format!(
            "SELECT {} FROM inventory_items ORDER BY sequence_number, id",
            ITEM_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(rows.into_iter().map(InventoryItem::from).collect())
    }

    async fn update(
        &self,
        id: i64,
        update_data: &UpdateInventoryItem,
    ) -> DomainResult<InventoryItem> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let _ = self.find_by_id_with_tx(id, &mut tx).await?;

        let mut builder = sqlx::QueryBuilder::new("UPDATE inventory_items SET ");
        let mut separated = builder.separated(", ");
        let mut fields_updated = false;

        if let Some(name) = &update_data.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name);
            fields_updated = true;
        }
        if let Some(quantity) = update_data.quantity {
            separated.push("quantity = ");
            separated.push_bind_unseparated(quantity);
            fields_updated = true;
        }
        if let Some(condition) = &update_data.condition {
            separated.push("condition = ");
            separated.push_bind_unseparated(condition);
            fields_updated = true;
        }
        if let Some(location) = &update_data.location {
            separated.push("location = ");
            separated.push_bind_unseparated(location);
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
        let _ = self.find_by_id_with_tx(id, &mut tx).await?;

        query("DELETE FROM inventory_items WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        self.resequence(&mut tx).await?;
        tx.commit().await.map_err(DbError::from)?;
        Ok(())
    }
}
