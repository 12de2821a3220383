//! services/api/src/adapters/memory.rs
//!
//! An in-memory implementation of the `DocumentStore` port. Handlers take the
//! store as an injected trait object, so integration tests (and store-less
//! local runs) substitute this fake for the Postgres adapter.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mentorai_core::schema::RecordKind;
use mentorai_core::store::{DocumentId, DocumentStore, StoreError, StoreResult, StoredDocument};
use serde_json::{Map, Value};

/// A mutex-guarded map of collection name to inserted documents, in
/// insertion order.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<&'static str, Vec<StoredDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_err() -> StoreError {
    StoreError::Unexpected("memory store lock poisoned".to_string())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(
        &self,
        kind: RecordKind,
        document: Map<String, Value>,
    ) -> StoreResult<DocumentId> {
        let id = DocumentId::assign();
        let mut collections = self.collections.lock().map_err(|_| lock_err())?;
        collections
            .entry(kind.collection())
            .or_default()
            .push(StoredDocument {
                id,
                fields: document,
            });
        Ok(id)
    }

    async fn find(
        &self,
        kind: RecordKind,
        filter: &Map<String, Value>,
        limit: usize,
    ) -> StoreResult<Vec<StoredDocument>> {
        let collections = self.collections.lock().map_err(|_| lock_err())?;
        let documents = collections
            .get(kind.collection())
            .map(|docs| {
                docs.iter()
                    .filter(|doc| {
                        filter
                            .iter()
                            .all(|(key, value)| doc.fields.get(key) == Some(value))
                    })
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        let collections = self.collections.lock().map_err(|_| lock_err())?;
        Ok(collections
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.to_string())
            .collect())
    }
}
