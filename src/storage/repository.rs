use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use super::{Store, MIGRATION_001_INITIAL};

/// A stored entry together with its bookkeeping columns.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// SQLite-backed key-value store.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new store with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Open the database file at `path`, creating and migrating it if needed.
    pub async fn open(path: &str) -> Result<Self> {
        let database_url = format!("sqlite:{}?mode=rwc", path);
        let store = Self::connect(&database_url).await?;
        store.migrate().await?;
        tracing::debug!(path, "opened sqlite store");
        Ok(store)
    }

    /// Open a private in-memory database. Mostly useful in tests.
    pub async fn open_in_memory() -> Result<Self> {
        // A single connection, otherwise every pooled connection gets its own database
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Get an entry with its last update time.
    pub async fn get_entry(&self, key: &str) -> Result<Option<StoredEntry>> {
        let row = sqlx::query(
            r#"
            SELECT key, value, updated_at
            FROM entries
            WHERE key = ?
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch entry")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_entry(&row)?)),
            None => Ok(None),
        }
    }

    fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> Result<StoredEntry> {
        let updated_at_str: String = row.get("updated_at");

        Ok(StoredEntry {
            key: row.get("key"),
            value: row.get("value"),
            updated_at: DateTime::parse_from_rfc3339(&updated_at_str)
                .context("Invalid updated_at timestamp")?
                .with_timezone(&Utc),
        })
    }
}

impl Store for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM entries WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch entry")?;

        Ok(row.map(|row| row.get("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT INTO entries (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await
        .context("Failed to save entry")?;
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM entries WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .context("Failed to clear entry")?;
        Ok(())
    }
}
