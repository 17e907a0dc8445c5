//! # Document Store Seam
//!
//! The [`DocumentStore`] trait is the boundary between Paddy and the hosted
//! backend. Everything above it (repositories, the order service) works in
//! terms of JSON documents in named collections and never knows whether the
//! store is the real hosted API or the in-memory test double.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Repositories / OrderService                                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   DocumentStore (trait)                                                 │
//! │        │                                                                │
//! │        ├──► BaasClient   - reqwest against the hosted REST API          │
//! │        └──► MemoryStore  - HashMap-backed, for tests                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{BaasError, BaasResult};

/// JSON document storage in named collections.
///
/// Semantics follow the hosted backend:
/// - `create` fails with [`BaasError::Conflict`] on a duplicate id
/// - `get` returns `Ok(None)` for a missing document (absence is not an
///   error at this layer; repositories decide)
/// - `update` patches top-level fields of an existing document and fails
///   with [`BaasError::NotFound`] when it doesn't exist
/// - `list` returns every document in the collection
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a document with the given id.
    async fn create(&self, collection: &str, id: &str, data: Value) -> BaasResult<Value>;

    /// Fetches a document by id.
    async fn get(&self, collection: &str, id: &str) -> BaasResult<Option<Value>>;

    /// Patches top-level fields of an existing document and returns the
    /// updated document.
    async fn update(&self, collection: &str, id: &str, data: Value) -> BaasResult<Value>;

    /// Deletes a document by id.
    async fn delete(&self, collection: &str, id: &str) -> BaasResult<()>;

    /// Lists all documents in a collection.
    async fn list(&self, collection: &str) -> BaasResult<Vec<Value>>;
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// In-memory [`DocumentStore`] used by tests across the workspace.
///
/// BTreeMap per collection keeps `list` order deterministic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Number of documents currently in a collection (test assertions).
    pub fn count(&self, collection: &str) -> usize {
        let collections = self.collections.lock().expect("store mutex poisoned");
        collections.get(collection).map_or(0, |c| c.len())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, id: &str, data: Value) -> BaasResult<Value> {
        let mut collections = self.collections.lock().expect("store mutex poisoned");
        let documents = collections.entry(collection.to_string()).or_default();

        if documents.contains_key(id) {
            return Err(BaasError::conflict(collection, id));
        }

        documents.insert(id.to_string(), data.clone());
        Ok(data)
    }

    async fn get(&self, collection: &str, id: &str) -> BaasResult<Option<Value>> {
        let collections = self.collections.lock().expect("store mutex poisoned");
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn update(&self, collection: &str, id: &str, data: Value) -> BaasResult<Value> {
        let mut collections = self.collections.lock().expect("store mutex poisoned");
        let documents = collections.entry(collection.to_string()).or_default();

        let Some(existing) = documents.get_mut(id) else {
            return Err(BaasError::not_found(collection, id));
        };

        match data {
            Value::Object(patch) => match &mut *existing {
                Value::Object(existing_map) => {
                    for (key, value) in patch {
                        existing_map.insert(key, value);
                    }
                }
                other => *other = Value::Object(patch),
            },
            data => *existing = data,
        }

        Ok(existing.clone())
    }

    async fn delete(&self, collection: &str, id: &str) -> BaasResult<()> {
        let mut collections = self.collections.lock().expect("store mutex poisoned");
        let removed = collections
            .get_mut(collection)
            .and_then(|documents| documents.remove(id));

        if removed.is_none() {
            return Err(BaasError::not_found(collection, id));
        }

        Ok(())
    }

    async fn list(&self, collection: &str) -> BaasResult<Vec<Value>> {
        let collections = self.collections.lock().expect("store mutex poisoned");
        Ok(collections
            .get(collection)
            .map(|documents| documents.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_get_roundtrip() {
        let store = MemoryStore::new();
        store
            .create("products", "p1", json!({"id": "p1", "name": "Basmati"}))
            .await
            .unwrap();

        let doc = store.get("products", "p1").await.unwrap().unwrap();
        assert_eq!(doc["name"], "Basmati");

        assert!(store.get("products", "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let store = MemoryStore::new();
        store.create("products", "p1", json!({})).await.unwrap();

        let result = store.create("products", "p1", json!({})).await;
        assert!(matches!(result, Err(BaasError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_patches_fields() {
        let store = MemoryStore::new();
        store
            .create("orders", "o1", json!({"id": "o1", "status": "pending", "total_cents": 100}))
            .await
            .unwrap();

        let updated = store
            .update("orders", "o1", json!({"status": "confirmed"}))
            .await
            .unwrap();
        assert_eq!(updated["status"], "confirmed");
        assert_eq!(updated["total_cents"], 100);

        let missing = store.update("orders", "nope", json!({})).await;
        assert!(matches!(missing, Err(BaasError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let store = MemoryStore::new();
        store.create("items", "a", json!({"n": 1})).await.unwrap();
        store.create("items", "b", json!({"n": 2})).await.unwrap();
        assert_eq!(store.list("items").await.unwrap().len(), 2);

        store.delete("items", "a").await.unwrap();
        assert_eq!(store.count("items"), 1);

        let missing = store.delete("items", "a").await;
        assert!(matches!(missing, Err(BaasError::NotFound { .. })));
    }
}
