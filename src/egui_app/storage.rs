//! # Persisted Session Store
//!
//! Durable key-value storage that survives restarts. The session context is
//! the only writer; the API client reads the token and role from here on
//! every request.
//!
//! ## Key Components
//!
//! - `KeyValueStore`: async storage trait
//! - `SqliteStore`: SQLite-backed implementation (WAL mode, one table)
//! - `MemoryStore`: in-process implementation for tests and previews
//! - `SessionRecord`: the persisted mirror of the session

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tokio::sync::RwLock;
use tracing::debug;

use crate::shared::error::ClientError;

/// Key holding the bearer token
pub const TOKEN_KEY: &str = "authToken";
/// Key holding the role string
pub const ROLE_KEY: &str = "userRole";
/// Key holding the JSON-encoded user profile
pub const USER_KEY: &str = "userData";

const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, ROLE_KEY, USER_KEY];

/// Durable string key-value storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ClientError>;

    /// Write all entries or none of them
    async fn set_many(&self, entries: &[(&str, String)]) -> Result<(), ClientError>;

    /// Remove keys; missing keys are not an error
    async fn remove_many(&self, keys: &[&str]) -> Result<(), ClientError>;
}

/// SQLite-backed store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open or create the store at `path`
    ///
    /// Creates the parent directory and the file if they do not exist.
    pub async fn open(path: &Path) -> Result<Self, ClientError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ClientError::storage(e.to_string()))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        debug!(path = %path.display(), "opened session store");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(value,)| value))
    }

    async fn set_many(&self, entries: &[(&str, String)]) -> Result<(), ClientError> {
        let mut tx = self.pool.begin().await?;
        for (key, value) in entries {
            sqlx::query(
                "INSERT INTO kv_store (key, value) VALUES (?, ?)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            )
            .bind(*key)
            .bind(value.as_str())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<(), ClientError> {
        let mut tx = self.pool.begin().await?;
        for key in keys {
            sqlx::query("DELETE FROM kv_store WHERE key = ?")
                .bind(*key)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

/// In-process store; contents are lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_many(&self, entries: &[(&str, String)]) -> Result<(), ClientError> {
        let mut guard = self.entries.write().await;
        for (key, value) in entries {
            guard.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<(), ClientError> {
        let mut guard = self.entries.write().await;
        for key in keys {
            guard.remove(*key);
        }
        Ok(())
    }
}

/// Durable mirror of an authenticated session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub token: String,
    pub role: String,
    /// Serialized `UserProfile`
    pub user_json: String,
}

impl SessionRecord {
    /// Read the record; `None` unless all three keys hold non-empty values
    pub async fn load(store: &dyn KeyValueStore) -> Result<Option<Self>, ClientError> {
        let token = store.get(TOKEN_KEY).await?;
        let role = store.get(ROLE_KEY).await?;
        let user_json = store.get(USER_KEY).await?;

        Ok(match (token, role, user_json) {
            (Some(token), Some(role), Some(user_json))
                if !token.is_empty() && !role.is_empty() && !user_json.is_empty() =>
            {
                Some(Self {
                    token,
                    role,
                    user_json,
                })
            }
            _ => None,
        })
    }

    /// Token and role only, as attached to API requests
    pub async fn credentials(
        store: &dyn KeyValueStore,
    ) -> Result<Option<(String, String)>, ClientError> {
        let token = store.get(TOKEN_KEY).await?;
        let role = store.get(ROLE_KEY).await?;
        Ok(match (token, role) {
            (Some(token), Some(role)) if !token.is_empty() && !role.is_empty() => {
                Some((token, role))
            }
            _ => None,
        })
    }

    pub async fn save(&self, store: &dyn KeyValueStore) -> Result<(), ClientError> {
        store
            .set_many(&[
                (TOKEN_KEY, self.token.clone()),
                (ROLE_KEY, self.role.clone()),
                (USER_KEY, self.user_json.clone()),
            ])
            .await
    }

    pub async fn clear(store: &dyn KeyValueStore) -> Result<(), ClientError> {
        store.remove_many(&SESSION_KEYS).await
    }
}
