//! Database context for managing connections and repository access.
//!
//! Provides a unified entry point for database operations. Create one
//! context per command or service, then use it to access repositories.

use std::path::Path;

use diesel_async::SimpleAsyncConnection;

use super::asset::AssetRepository;
use super::pool::{AsyncSqlitePool, DieselError};
use super::user::UserRepository;

/// Database context that manages connections and provides repository access.
#[derive(Clone)]
pub struct DbContext {
    pool: AsyncSqlitePool,
}

impl DbContext {
    /// Create a new database context from a SQLite file path.
    pub fn from_path(db_path: &Path) -> Self {
        Self {
            pool: AsyncSqlitePool::from_path(db_path),
        }
    }

    /// Create a new database context from a database URL.
    pub fn from_url(database_url: &str) -> Self {
        Self {
            pool: AsyncSqlitePool::new(database_url),
        }
    }

    /// Get the underlying connection pool.
    #[allow(dead_code)]
    pub fn pool(&self) -> &AsyncSqlitePool {
        &self.pool
    }

    /// Get a user repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Get an asset repository.
    pub fn assets(&self) -> AssetRepository {
        AssetRepository::new(self.pool.clone())
    }

    /// Initialize the database schema.
    ///
    /// Creates the necessary tables if they don't exist. Kept in sync with
    /// the `diesel::table!` declarations in `schema.rs`.
    pub async fn init_schema(&self) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        conn.batch_execute(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS assets (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                asset_type TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                serial_no TEXT NOT NULL,
                code TEXT NOT NULL UNIQUE,
                purchased TEXT,
                added_by TEXT,
                assigned_to TEXT,
                return_date TEXT,
                lost INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_assets_assigned_to ON assets(assigned_to);
            CREATE INDEX IF NOT EXISTS idx_assets_code ON assets(code);
            "#,
        )
        .await?;

        Ok(())
    }
}
