//! Session store helpers
//!
//! `FailingStore` reads as empty and refuses every write, which is how a
//! full disk or a locked database looks to the session context.
//! `StickyStore` accepts writes but refuses to delete anything.

use std::sync::Arc;

use async_trait::async_trait;
use marketsquare::egui_app::storage::{KeyValueStore, MemoryStore, SessionRecord};
use marketsquare::shared::ClientError;

pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, ClientError> {
        Ok(None)
    }

    async fn set_many(&self, _entries: &[(&str, String)]) -> Result<(), ClientError> {
        Err(ClientError::storage("disk full"))
    }

    async fn remove_many(&self, _keys: &[&str]) -> Result<(), ClientError> {
        Err(ClientError::storage("disk full"))
    }
}

#[derive(Default)]
pub struct StickyStore {
    inner: MemoryStore,
}

#[async_trait]
impl KeyValueStore for StickyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        self.inner.get(key).await
    }

    async fn set_many(&self, entries: &[(&str, String)]) -> Result<(), ClientError> {
        self.inner.set_many(entries).await
    }

    async fn remove_many(&self, _keys: &[&str]) -> Result<(), ClientError> {
        Err(ClientError::storage("read-only database"))
    }
}

/// A memory store already holding a session for `username`
pub async fn seeded_store(username: &str, role: &str, token: &str) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let record = SessionRecord {
        token: token.to_string(),
        role: role.to_string(),
        user_json: serde_json::json!({ "username": username, "role": role }).to_string(),
    };
    record
        .save(store.as_ref())
        .await
        .expect("memory store never fails");
    store
}
