//! services/api/src/web/meta.rs
//!
//! Liveness, diagnostic, and motivation endpoints. None of these touch the
//! store except `/test`, which probes it without ever failing the request.

use crate::web::state::AppState;
use axum::{extract::State, response::Json};
use mentorai_core::motivation;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

//=========================================================================================
// Response Structs
//=========================================================================================

/// A fixed liveness message.
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// One motivational quote, picked uniformly at random from the static pool.
#[derive(Serialize, ToSchema)]
pub struct MotivationOut {
    pub text: String,
    pub author: Option<String>,
}

/// The structured report returned by `/test`.
///
/// Status fields are human-readable text; env fields report presence only,
/// never the configured values themselves.
#[derive(Serialize, ToSchema)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// Root liveness message.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = MessageResponse))
)]
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "MentorAI API is running".to_string(),
    })
}

/// API liveness message.
#[utoipa::path(
    get,
    path = "/api/hello",
    responses((status = 200, description = "Service is up", body = MessageResponse))
)]
pub async fn hello_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from MentorAI backend".to_string(),
    })
}

/// Diagnostic endpoint: reports store reachability and configuration
/// presence. Always answers 200, regardless of store health.
#[utoipa::path(
    get,
    path = "/test",
    responses((status = 200, description = "Diagnostic report", body = DiagnosticReport))
)]
pub async fn test_handler(State(state): State<Arc<AppState>>) -> Json<DiagnosticReport> {
    let mut report = DiagnosticReport {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: String::new(),
        database_name: String::new(),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    if let Some(store) = &state.store {
        match store.list_collections().await {
            Ok(mut collections) => {
                collections.truncate(10);
                report.collections = collections;
                report.database = "✅ Connected & Working".to_string();
                report.connection_status = "Connected".to_string();
            }
            Err(e) => {
                let detail: String = e.to_string().chars().take(50).collect();
                report.database = format!("⚠️  Configured but Error: {}", detail);
                report.connection_status = "Not Connected".to_string();
            }
        }
    }

    report.database_url = presence(state.config.database_url.is_some());
    report.database_name = presence(state.config.database_name.is_some());

    Json(report)
}

fn presence(set: bool) -> String {
    if set { "✅ Set" } else { "❌ Not Set" }.to_string()
}

/// One quote from the fixed motivation pool.
#[utoipa::path(
    get,
    path = "/api/motivation",
    responses((status = 200, description = "A motivational quote", body = MotivationOut))
)]
pub async fn motivation_handler() -> Json<MotivationOut> {
    let quote = motivation::random_quote();
    Json(MotivationOut {
        text: quote.text.to_string(),
        author: Some(quote.author.to_string()),
    })
}
