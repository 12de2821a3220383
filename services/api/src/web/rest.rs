//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the persistence REST endpoints and the
//! master definition for the OpenAPI specification.
//!
//! Every handler follows the same pipeline: validate the body against the
//! schema registry, hand the normalized document to the injected store, and
//! render the store-assigned identifier as client-facing text. Validation
//! failures never reach the store.

use crate::web::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use mentorai_core::schema::{validate, FieldIssue, RecordKind, ValidationError};
use mentorai_core::store::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::error;
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Default number of documents returned by the list endpoints.
const DEFAULT_LIMIT: usize = 20;
/// Hard ceiling for the `limit` query parameter.
const MAX_LIMIT: i64 = 200;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        create_task_handler,
        list_tasks_handler,
        create_note_handler,
        list_notes_handler,
        crate::web::meta::root_handler,
        crate::web::meta::hello_handler,
        crate::web::meta::test_handler,
        crate::web::meta::motivation_handler,
    ),
    components(
        schemas(
            CreateRecordResponse,
            ListResponse,
            crate::web::meta::MessageResponse,
            crate::web::meta::MotivationOut,
            crate::web::meta::DiagnosticReport,
        )
    ),
    tags(
        (name = "MentorAI API", description = "CRUD endpoints over the MentorAI document store.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The response payload sent after successfully creating a record.
#[derive(Serialize, ToSchema)]
pub struct CreateRecordResponse {
    pub ok: bool,
    /// The store-assigned identifier, rendered as opaque text.
    pub id: String,
}

/// The response payload of the list endpoints.
#[derive(Serialize, ToSchema)]
pub struct ListResponse {
    /// Each item is the stored document plus a client-facing `id` text field.
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<Value>,
}

/// Query parameters accepted by the list endpoints.
#[derive(Deserialize, IntoParams)]
pub struct ListQuery {
    /// Maximum number of documents to return (1-200, default 20).
    pub limit: Option<i64>,
}

//=========================================================================================
// Request Errors
//=========================================================================================

/// A failed request. Every variant renders as a JSON body of the shape
/// `{"error": {"kind", "message", ...}}`.
#[derive(Debug)]
pub enum RequestError {
    Validation(ValidationError),
    Store(StoreError),
}

impl From<ValidationError> for RequestError {
    fn from(e: ValidationError) -> Self {
        RequestError::Validation(e)
    }
}

impl From<StoreError> for RequestError {
    fn from(e: StoreError) -> Self {
        RequestError::Store(e)
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        match self {
            RequestError::Validation(e) => {
                let body = json!({
                    "error": {
                        "kind": "validation",
                        "message": e.to_string(),
                        "fields": e.issues,
                    }
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            RequestError::Store(e) => {
                let (status, kind) = match &e {
                    StoreError::Unavailable(_) => {
                        (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable")
                    }
                    StoreError::Unexpected(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
                };
                let body = json!({
                    "error": {
                        "kind": kind,
                        "message": e.to_string(),
                    }
                });
                (status, Json(body)).into_response()
            }
        }
    }
}

//=========================================================================================
// Shared Handler Logic
//=========================================================================================

/// Interprets the `limit` query parameter: absent means the default, values
/// above the ceiling clamp to it, values below 1 are rejected.
fn clamp_limit(limit: Option<i64>) -> Result<usize, RequestError> {
    match limit {
        None => Ok(DEFAULT_LIMIT),
        Some(n) if n < 1 => Err(RequestError::Validation(ValidationError {
            issues: vec![FieldIssue {
                field: "limit".to_string(),
                message: "must be at least 1".to_string(),
            }],
        })),
        Some(n) => Ok(n.min(MAX_LIMIT) as usize),
    }
}

async fn create_record(
    state: &AppState,
    kind: RecordKind,
    body: &Value,
) -> Result<Json<CreateRecordResponse>, RequestError> {
    // 1. Validate before any store interaction.
    let document = validate(kind, body)?;

    // 2. Persist; a single atomic insert.
    let store = state.store.as_ref().ok_or_else(|| {
        StoreError::Unavailable("no document store is configured".to_string())
    })?;
    let id = store.insert(kind, document).await.map_err(|e| {
        error!("Failed to insert {} document: {}", kind, e);
        e
    })?;

    // 3. The identifier leaves the store boundary as text only.
    Ok(Json(CreateRecordResponse {
        ok: true,
        id: id.to_string(),
    }))
}

async fn list_records(
    state: &AppState,
    kind: RecordKind,
    query: ListQuery,
) -> Result<Json<ListResponse>, RequestError> {
    let limit = clamp_limit(query.limit)?;
    let store = state.store.as_ref().ok_or_else(|| {
        StoreError::Unavailable("no document store is configured".to_string())
    })?;

    let documents = store.find(kind, &Map::new(), limit).await.map_err(|e| {
        error!("Failed to list {} documents: {}", kind, e);
        e
    })?;

    let items = documents
        .into_iter()
        .map(|doc| {
            let mut fields = doc.fields;
            fields.insert("id".to_string(), Value::String(doc.id.to_string()));
            Value::Object(fields)
        })
        .collect();

    Ok(Json(ListResponse { items }))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Create a new task.
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body(content = Object, description = "Task payload."),
    responses(
        (status = 200, description = "Task created", body = CreateRecordResponse),
        (status = 400, description = "Payload failed validation"),
        (status = 503, description = "Document store unavailable")
    )
)]
pub async fn create_task_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<CreateRecordResponse>, RequestError> {
    create_record(&state, RecordKind::Task, &body).await
}

/// List stored tasks.
#[utoipa::path(
    get,
    path = "/api/tasks",
    params(ListQuery),
    responses(
        (status = 200, description = "Stored tasks", body = ListResponse),
        (status = 400, description = "Invalid limit"),
        (status = 503, description = "Document store unavailable")
    )
)]
pub async fn list_tasks_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, RequestError> {
    list_records(&state, RecordKind::Task, query).await
}

/// Create a new note.
#[utoipa::path(
    post,
    path = "/api/notes",
    request_body(content = Object, description = "Note payload."),
    responses(
        (status = 200, description = "Note created", body = CreateRecordResponse),
        (status = 400, description = "Payload failed validation"),
        (status = 503, description = "Document store unavailable")
    )
)]
pub async fn create_note_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<CreateRecordResponse>, RequestError> {
    create_record(&state, RecordKind::Note, &body).await
}

/// List stored notes.
#[utoipa::path(
    get,
    path = "/api/notes",
    params(ListQuery),
    responses(
        (status = 200, description = "Stored notes", body = ListResponse),
        (status = 400, description = "Invalid limit"),
        (status = 503, description = "Document store unavailable")
    )
)]
pub async fn list_notes_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, RequestError> {
    list_records(&state, RecordKind::Note, query).await
}
