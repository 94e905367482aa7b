// Rust guideline compliant 2026-02-23

//! SQLite adapter for the `KeyValueStore` port.
//!
//! Persists rate-limit timestamps and recorded submissions in a single
//! `kv` table via `sqlx`, so history and limits survive restarts.
//!
//! # Dependency note
//!
//! `sqlx` is a hard dependency (no feature flag). Both binaries build it;
//! only `quote_desk_sqlite` loads this module.

use domain::{KeyValueStore, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// `KeyValueStore` adapter backed by a SQLite database via `sqlx`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: sqlx::SqlitePool,
}

impl SqliteStore {
    /// Open or create a SQLite database and initialize the schema.
    ///
    /// The pool holds a single connection: the desk serves one request at a
    /// time, and `sqlite::memory:` databases are private to their connection.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` when the connection or schema creation fails.
    pub async fn new(db_url: &str) -> Result<Self, sqlx::Error> {
        let opts = db_url.parse::<SqliteConnectOptions>()?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().max_connections(1).connect_with(opts).await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

fn unavailable(op: &'static str, e: &sqlx::Error) -> StoreError {
    tracing::error!(op, error = %e, "sqlite_store.query_failed");
    StoreError::Unavailable { reason: e.to_string() }
}

impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        sqlx::query_scalar("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unavailable("get", &e))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        sqlx::query("INSERT OR REPLACE INTO kv (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(|e| unavailable("set", &e))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| unavailable("remove", &e))?;
        Ok(())
    }

    /// Keys starting with `prefix`, ascending by byte order.
    ///
    /// Compares with `substr` rather than `LIKE`, so `_` and `%` in keys are literal.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        sqlx::query_scalar("SELECT key FROM kv WHERE substr(key, 1, length(?)) = ? ORDER BY key")
            .bind(prefix)
            .bind(prefix)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| unavailable("list", &e))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
