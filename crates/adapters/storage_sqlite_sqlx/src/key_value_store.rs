//! `SQLite` implementation of [`KeyValueStore`].

use std::future::Future;

use sqlx::SqlitePool;

use tidydo_app::ports::KeyValueStore;
use tidydo_domain::error::TidyError;

use crate::error::StorageError;

const SELECT_BY_KEY: &str = "SELECT value FROM preferences WHERE key = ?";
const UPSERT: &str = r"
    INSERT INTO preferences (key, value) VALUES (?, ?)
    ON CONFLICT (key) DO UPDATE SET value = excluded.value
";

/// `SQLite`-backed key-value store (one row per key in `preferences`).
#[derive(Clone)]
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, TidyError>> + Send {
        let pool = self.pool.clone();
        let key = key.to_string();
        async move {
            let value: Option<String> = sqlx::query_scalar(SELECT_BY_KEY)
                .bind(key)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(value)
        }
    }

    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), TidyError>> + Send {
        let pool = self.pool.clone();
        let key = key.to_string();
        async move {
            sqlx::query(UPSERT)
                .bind(key)
                .bind(value)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteKeyValueStore {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteKeyValueStore::new(db.pool().clone())
    }

    #[tokio::test]
    async fn should_return_none_when_key_missing() {
        let store = setup().await;
        assert_eq!(store.get("darkMode").await.unwrap(), None);
    }

    #[tokio::test]
    async fn should_overwrite_value_on_second_set() {
        let store = setup().await;

        store.set("darkMode", "true".to_string()).await.unwrap();
        assert_eq!(store.get("darkMode").await.unwrap().as_deref(), Some("true"));

        store.set("darkMode", "false".to_string()).await.unwrap();
        assert_eq!(store.get("darkMode").await.unwrap().as_deref(), Some("false"));
    }

    #[tokio::test]
    async fn should_keep_keys_independent() {
        let store = setup().await;
        store.set("a", "1".to_string()).await.unwrap();
        store.set("b", "2".to_string()).await.unwrap();

        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
    }
}
