use crate::errors::{DbError, DbResult};
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

const DEFAULT_DATABASE_URL: &str = "sqlite://masjid_admin.db";

/// Resolve the database URL from the environment (`DATABASE_URL`, with
/// `.env` support) and open a connection pool. Creates the database file
/// when it does not exist yet.
pub async fn connect(database_url: Option<&str>) -> DbResult<SqlitePool> {
    dotenv::dotenv().ok();

    let url = match database_url {
        Some(url) => url.to_string(),
        None => std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
    };

    let options = SqliteConnectOptions::from_str(&url)
        .map_err(DbError::Sqlx)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(DbError::Sqlx)?;

    info!("Connected to database at {}", url);
    Ok(pool)
}

/// Create the schema if it is not present.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS routine_donors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sequence_number INTEGER NOT NULL,
            name TEXT NOT NULL,
            address TEXT NOT NULL DEFAULT '',
            year INTEGER NOT NULL,
            january INTEGER NOT NULL DEFAULT 0,
            february INTEGER NOT NULL DEFAULT 0,
            march INTEGER NOT NULL DEFAULT 0,
            april INTEGER NOT NULL DEFAULT 0,
            may INTEGER NOT NULL DEFAULT 0,
            june INTEGER NOT NULL DEFAULT 0,
            july INTEGER NOT NULL DEFAULT 0,
            august INTEGER NOT NULL DEFAULT 0,
            september INTEGER NOT NULL DEFAULT 0,
            october INTEGER NOT NULL DEFAULT 0,
            november INTEGER NOT NULL DEFAULT 0,
            december INTEGER NOT NULL DEFAULT 0,
            other_amount INTEGER NOT NULL DEFAULT 0
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS external_charity_boxes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sequence_number INTEGER NOT NULL,
            label TEXT NOT NULL,
            location TEXT NOT NULL DEFAULT '',
            year INTEGER NOT NULL,
            january INTEGER NOT NULL DEFAULT 0,
            february INTEGER NOT NULL DEFAULT 0,
            march INTEGER NOT NULL DEFAULT 0,
            april INTEGER NOT NULL DEFAULT 0,
            may INTEGER NOT NULL DEFAULT 0,
            june INTEGER NOT NULL DEFAULT 0,
            july INTEGER NOT NULL DEFAULT 0,
            august INTEGER NOT NULL DEFAULT 0,
            september INTEGER NOT NULL DEFAULT 0,
            october INTEGER NOT NULL DEFAULT 0,
            november INTEGER NOT NULL DEFAULT 0,
            december INTEGER NOT NULL DEFAULT 0
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS special_donations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sequence_number INTEGER NOT NULL,
            donor_name TEXT NOT NULL,
            date TEXT NOT NULL,
            amount INTEGER NOT NULL DEFAULT 0,
            note TEXT NOT NULL DEFAULT '',
            year INTEGER NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS mosque_charity_boxes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            amount INTEGER NOT NULL DEFAULT 0,
            year INTEGER NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS ledger_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            kind TEXT NOT NULL,
            category TEXT NOT NULL,
            date TEXT NOT NULL,
            amount INTEGER NOT NULL DEFAULT 0,
            note TEXT NOT NULL DEFAULT '',
            year INTEGER NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS announcements (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            body TEXT NOT NULL DEFAULT '',
            image_url TEXT,
            published INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS inventory_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sequence_number INTEGER NOT NULL,
            name TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0,
            condition TEXT NOT NULL DEFAULT '',
            location TEXT NOT NULL DEFAULT ''
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_routine_donors_year ON routine_donors(year)",
        "CREATE INDEX IF NOT EXISTS idx_external_charity_boxes_year ON external_charity_boxes(year)",
        "CREATE INDEX IF NOT EXISTS idx_special_donations_year ON special_donations(year)",
        "CREATE INDEX IF NOT EXISTS idx_mosque_charity_boxes_year ON mosque_charity_boxes(year)",
        "CREATE INDEX IF NOT EXISTS idx_ledger_entries_kind_year ON ledger_entries(kind, year)",
        "CREATE INDEX IF NOT EXISTS idx_ledger_entries_date ON ledger_entries(date)",
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| DbError::Migration(e.to_string()))?;
    }

    info!("Database schema is up to date");
    Ok(())
}
