pub mod motivation;
pub mod schema;
pub mod store;

pub use schema::{validate, FieldIssue, FieldSpec, FieldType, RecordKind, ValidationError};
pub use store::{DocumentId, DocumentStore, StoreError, StoreResult, StoredDocument};
