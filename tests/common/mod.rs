#![allow(dead_code)]

use masjid_admin_core::{database, AppServices};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestApp {
    pub services: AppServices,
    pub pool: SqlitePool,
    _storage: TempDir,
}

impl TestApp {
    /// Absolute path of a stored file, from the name `upload` returned.
    pub fn stored_file(&self, name: &str) -> PathBuf {
        self._storage.path().join(name)
    }
}

/// Wire the full service graph on top of a fresh in-memory database.
/// One connection, so every query sees the same database.
pub async fn setup() -> TestApp {
    masjid_admin_core::init_logging();

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database");
    database::run_migrations(&pool)
        .await
        .expect("run migrations");

    let storage = TempDir::new().expect("create storage dir");
    let services = AppServices::build(
        pool.clone(),
        storage.path().to_str().expect("utf-8 temp path"),
    )
    .expect("wire services");

    TestApp {
        services,
        pool,
        _storage: storage,
    }
}
