//! crates/mentorai_core/src/store.rs
//!
//! Defines the document-store contract for the application's core logic.
//! This trait forms the boundary of the hexagonal architecture, allowing the
//! core to be independent of the concrete storage backend. Handlers receive
//! an injected implementation at startup; tests substitute an in-memory one.

use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::schema::RecordKind;

//=========================================================================================
// Generic Store Error and Result Types
//=========================================================================================

/// A generic error type for all store operations.
/// This abstracts away the specific errors of the backing database library.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No usable store connection existed at call time. Not retried or
    /// buffered; the failure propagates to the caller immediately.
    #[error("Document store unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected store error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

//=========================================================================================
// Identifiers and Stored Documents
//=========================================================================================

/// A store-assigned document identifier: unique, immutable, never reused.
///
/// Opaque to clients beyond equality; handlers render it as text at the API
/// boundary and the native type never crosses that boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Assigns a fresh identifier for a document being created.
    pub fn assign() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A document as retrieved from the store: its identifier plus the JSON
/// fields it was created with.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub fields: Map<String, Value>,
}

//=========================================================================================
// Store Port (Trait)
//=========================================================================================

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persists one validated document in the collection of `kind` and
    /// returns the newly assigned identifier. A single atomic insert.
    async fn insert(&self, kind: RecordKind, document: Map<String, Value>)
        -> StoreResult<DocumentId>;

    /// Retrieves up to `limit` documents of `kind` whose fields contain every
    /// entry of `filter` (an empty filter matches all). Ordering is
    /// store-defined; insertion order is acceptable but not guaranteed.
    /// Callers clamp `limit` to 1..=200 before calling.
    async fn find(
        &self,
        kind: RecordKind,
        filter: &Map<String, Value>,
        limit: usize,
    ) -> StoreResult<Vec<StoredDocument>>;

    /// Names of the non-empty collections, for the diagnostic endpoint.
    async fn list_collections(&self) -> StoreResult<Vec<String>>;
}
