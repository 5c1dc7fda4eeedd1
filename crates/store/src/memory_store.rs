//! In-memory document store — the reference [`DocumentStore`] backend.
//!
//! Suitable for tests and single-process sessions. Revisions start at 1 and
//! bump on every `put`, so concurrent writers can detect lost updates.

use async_trait::async_trait;
use concierge_core::error::StoreError;
use concierge_core::store::{Document, DocumentStore};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

pub struct MemoryStore {
    documents: Arc<RwLock<HashMap<String, Document>>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, id: &str) -> Result<Document, StoreError> {
        self.documents
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn put(
        &self,
        id: &str,
        body: serde_json::Value,
        expected_revision: u64,
    ) -> Result<Document, StoreError> {
        let mut documents = self.documents.write().await;
        let current = documents.get(id).map(|d| d.revision).unwrap_or(0);
        if current != expected_revision {
            return Err(StoreError::RevisionConflict {
                id: id.to_string(),
                expected: expected_revision,
                found: current,
            });
        }
        let doc = Document {
            body,
            revision: current + 1,
        };
        documents.insert(id.to_string(), doc.clone());
        Ok(doc)
    }

    async fn post(&self, body: serde_json::Value) -> Result<String, StoreError> {
        let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut documents = self.documents.write().await;
        documents.insert(id.clone(), Document { body, revision: 1 });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn post_then_get() {
        let store = MemoryStore::new();
        let id = store.post(json!({"kind": "note", "text": "hi"})).await.unwrap();
        let doc = store.get(&id).await.unwrap();
        assert_eq!(doc.body["text"], "hi");
        assert_eq!(doc.revision, 1);
    }

    #[tokio::test]
    async fn put_bumps_revision() {
        let store = MemoryStore::new();
        let first = store.put("settings", json!({"a": 1}), 0).await.unwrap();
        assert_eq!(first.revision, 1);
        let second = store.put("settings", json!({"a": 2}), 1).await.unwrap();
        assert_eq!(second.revision, 2);
    }

    #[tokio::test]
    async fn stale_put_conflicts() {
        let store = MemoryStore::new();
        store.put("settings", json!({"a": 1}), 0).await.unwrap();
        let err = store.put("settings", json!({"a": 2}), 0).await.unwrap_err();
        assert!(matches!(err, StoreError::RevisionConflict { found: 1, .. }));
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get("nope").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn posted_ids_are_distinct() {
        let store = MemoryStore::new();
        let a = store.post(json!({})).await.unwrap();
        let b = store.post(json!({})).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }
}
