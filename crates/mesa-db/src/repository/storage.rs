//! # Storage Repository
//!
//! String keys to JSON text, one row per key.
//!
//! ```text
//! local_storage
//! ┌──────────────┬──────────────────────────────┬───────────────────────────┐
//! │ key          │ value                        │ updated_at                │
//! ├──────────────┼──────────────────────────────┼───────────────────────────┤
//! │ activeTables │ {"Mesa 5": {"order": [...]}} │ 2026-03-01T14:05:11Z      │
//! │ orderHistory │ [{"tableName": "Mesa 2",..}] │ 2026-03-01T13:40:02Z      │
//! └──────────────┴──────────────────────────────┴───────────────────────────┘
//! ```
//!
//! The repository does not look inside values; shape checks happen when the
//! order documents are decoded.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// A stored row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StorageEntry {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Repository for raw key-value access.
#[derive(Debug, Clone)]
pub struct StorageRepository {
    pool: SqlitePool,
}

impl StorageRepository {
    /// Creates a new StorageRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StorageRepository { pool }
    }

    /// Reads the value stored under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM local_storage WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Reads the full row stored under `key`.
    pub async fn get_entry(&self, key: &str) -> DbResult<Option<StorageEntry>> {
        let entry = sqlx::query_as::<_, StorageEntry>(
            "SELECT key, value, updated_at FROM local_storage WHERE key = ?1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing storage key");

        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes `key`. Returns whether it existed.
    pub async fn remove(&self, key: &str) -> DbResult<bool> {
        debug!(key = %key, "Removing storage key");

        let result = sqlx::query("DELETE FROM local_storage WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists stored keys in ascending order.
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM local_storage ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    async fn storage() -> super::StorageRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().storage()
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let repo = storage().await;
        assert_eq!(repo.get("activeTables").await.unwrap(), None);
        assert!(repo.get_entry("activeTables").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_overwrite() {
        let repo = storage().await;
        repo.set("draftOrder", "{}").await.unwrap();
        repo.set("draftOrder", r#"{"tableName":"5"}"#).await.unwrap();

        assert_eq!(
            repo.get("draftOrder").await.unwrap().as_deref(),
            Some(r#"{"tableName":"5"}"#)
        );
        assert_eq!(repo.keys().await.unwrap(), vec!["draftOrder".to_string()]);

        let entry = repo.get_entry("draftOrder").await.unwrap().unwrap();
        assert_eq!(entry.key, "draftOrder");
        assert!(entry.updated_at <= chrono::Utc::now());
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = storage().await;
        repo.set("orderHistory", "[]").await.unwrap();

        assert!(repo.remove("orderHistory").await.unwrap());
        assert!(!repo.remove("orderHistory").await.unwrap());
        assert!(repo.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_keys_sorted() {
        let repo = storage().await;
        repo.set("orderHistory", "[]").await.unwrap();
        repo.set("activeTables", "{}").await.unwrap();

        assert_eq!(
            repo.keys().await.unwrap(),
            vec!["activeTables".to_string(), "orderHistory".to_string()]
        );
    }
}
