//! DocumentStore trait — the abstraction over local document storage.
//!
//! The agent loop never touches the store itself; tools do, and each tool
//! applies its own conflict handling. The contract is a small key-document
//! surface: `get`/`put` by id, `post` to create with a generated id.

use crate::error::StoreError;
use async_trait::async_trait;

/// A stored document together with its revision.
///
/// Revisions increase by one on every `put`, so a tool doing
/// read-modify-write can re-fetch and retry when it observes a
/// [`StoreError::RevisionConflict`](crate::error::StoreError).
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub body: serde_json::Value,
    pub revision: u64,
}

/// The key-document store consumed by tools.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by id.
    async fn get(&self, id: &str) -> std::result::Result<Document, StoreError>;

    /// Replace a document. `expected_revision` must match the stored
    /// revision (0 for a new id at a caller-chosen key).
    async fn put(
        &self,
        id: &str,
        body: serde_json::Value,
        expected_revision: u64,
    ) -> std::result::Result<Document, StoreError>;

    /// Create a document under a generated id and return the id.
    async fn post(&self, body: serde_json::Value) -> std::result::Result<String, StoreError>;
}
