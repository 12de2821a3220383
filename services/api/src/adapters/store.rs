//! services/api/src/adapters/store.rs
//!
//! This module contains the Postgres document-store adapter, the concrete
//! implementation of the `DocumentStore` port from the `core` crate. Every
//! record kind lives in one JSONB-backed `documents` table, partitioned by
//! collection name.

use async_trait::async_trait;
use mentorai_core::schema::RecordKind;
use mentorai_core::store::{DocumentId, DocumentStore, StoreError, StoreResult, StoredDocument};
use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A Postgres adapter that implements the `DocumentStore` port.
///
/// The pool is expected to be created with `connect_lazy`, so construction
/// never touches the network; connection failures surface per call as
/// `StoreError::Unavailable`.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Creates a new `PgDocumentStore`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotently creates the backing table and index.
    ///
    /// Called best-effort at startup; if the store is unreachable the caller
    /// logs and continues, and the statements simply never ran.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                id UUID PRIMARY KEY,
                collection TEXT NOT NULL,
                doc JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents (collection)")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Maps an `sqlx` error onto the port taxonomy: connection-class failures are
/// `Unavailable`, everything else is `Unexpected`.
fn map_store_err(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(e.to_string()),
        _ => StoreError::Unexpected(e.to_string()),
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct DocumentRecord {
    id: Uuid,
    doc: Value,
}

impl DocumentRecord {
    fn to_domain(self) -> StoredDocument {
        let fields = match self.doc {
            Value::Object(map) => map,
            // The adapter only ever writes objects; anything else would mean
            // outside interference with the table.
            _ => Map::new(),
        };
        StoredDocument {
            id: DocumentId::from_uuid(self.id),
            fields,
        }
    }
}

//=========================================================================================
// `DocumentStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(
        &self,
        kind: RecordKind,
        document: Map<String, Value>,
    ) -> StoreResult<DocumentId> {
        let id = DocumentId::assign();
        sqlx::query("INSERT INTO documents (id, collection, doc) VALUES ($1, $2, $3)")
            .bind(id.as_uuid())
            .bind(kind.collection())
            .bind(Value::Object(document))
            .execute(&self.pool)
            .await
            .map_err(map_store_err)?;
        Ok(id)
    }

    async fn find(
        &self,
        kind: RecordKind,
        filter: &Map<String, Value>,
        limit: usize,
    ) -> StoreResult<Vec<StoredDocument>> {
        let records: Vec<DocumentRecord> = if filter.is_empty() {
            sqlx::query_as(
                "SELECT id, doc FROM documents
                 WHERE collection = $1
                 ORDER BY created_at LIMIT $2",
            )
            .bind(kind.collection())
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as(
                "SELECT id, doc FROM documents
                 WHERE collection = $1 AND doc @> $2
                 ORDER BY created_at LIMIT $3",
            )
            .bind(kind.collection())
            .bind(Value::Object(filter.clone()))
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
        }
        .map_err(map_store_err)?;

        Ok(records.into_iter().map(DocumentRecord::to_domain).collect())
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT collection FROM documents ORDER BY collection")
                .fetch_all(&self.pool)
                .await
                .map_err(map_store_err)?;
        Ok(names)
    }
}
