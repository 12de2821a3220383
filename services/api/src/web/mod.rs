pub mod meta;
pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

// Re-export the handlers so the binary and tests share one route table.
pub use meta::{hello_handler, motivation_handler, root_handler, test_handler};
pub use rest::{
    create_note_handler, create_task_handler, list_notes_handler, list_tasks_handler, ApiDoc,
};

/// Builds the application router. Used by both the `api` binary and the
/// integration tests, so the routes under test are the routes in production.
pub fn router(state: Arc<AppState>) -> Router {
    // The API is open by design: any origin, method, and header.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/api/hello", get(hello_handler))
        .route("/test", get(test_handler))
        .route("/api/motivation", get(motivation_handler))
        .route("/api/tasks", post(create_task_handler).get(list_tasks_handler))
        .route("/api/notes", post(create_note_handler).get(list_notes_handler))
        .layer(cors)
        .with_state(state)
}
