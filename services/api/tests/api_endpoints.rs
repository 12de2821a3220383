//! Full-router HTTP integration tests.
//!
//! Each test builds the production router over an in-memory document store
//! and sends actual HTTP requests via `tower::ServiceExt`. This validates
//! routing, schema validation, handler logic, and identifier rendering in
//! one pass.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt; // for `.oneshot()`

use api_lib::adapters::MemoryStore;
use api_lib::config::Config;
use api_lib::web::router;
use api_lib::web::state::AppState;
use mentorai_core::motivation::POOL;
use mentorai_core::store::DocumentStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn test_config(database_url: Option<&str>) -> Config {
    Config {
        bind_address: SocketAddr::from(([127, 0, 0, 1], 0)),
        database_url: database_url.map(String::from),
        database_name: None,
        log_level: tracing::Level::INFO,
    }
}

fn app(store: Option<Arc<dyn DocumentStore>>, config: Config) -> axum::Router {
    let state = Arc::new(AppState {
        store,
        config: Arc::new(config),
    });
    router(state)
}

fn app_with_memory_store() -> axum::Router {
    app(
        Some(Arc::new(MemoryStore::new())),
        test_config(Some("postgres://test")),
    )
}

fn app_without_store() -> axum::Router {
    app(None, test_config(None))
}

fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    match body {
        Some(val) => builder.body(Body::from(val.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
}

// ---------------------------------------------------------------------------
// Liveness
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_and_hello_report_liveness() {
    let router = app_with_memory_store();

    let resp = router
        .clone()
        .oneshot(json_request(Method::GET, "/", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await["message"],
        json!("MentorAI API is running")
    );

    let resp = router
        .oneshot(json_request(Method::GET, "/api/hello", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await["message"],
        json!("Hello from MentorAI backend")
    );
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_task_round_trips_with_defaults_and_same_id() {
    let router = app_with_memory_store();

    let resp = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/tasks",
            Some(json!({"title": "Write report"})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json(resp).await;
    assert_eq!(created["ok"], json!(true));
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let resp = router
        .oneshot(json_request(Method::GET, "/api/tasks?limit=1", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let listed = body_json(resp).await;
    let items = listed["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0],
        json!({
            "title": "Write report",
            "description": null,
            "due_date": null,
            "priority": "medium",
            "status": "todo",
            "tags": [],
            "id": id,
        })
    );
}

#[tokio::test]
async fn invalid_task_is_rejected_and_nothing_is_stored() {
    let router = app_with_memory_store();

    let resp = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/tasks",
            Some(json!({"description": "no title here"})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["kind"], json!("validation"));
    assert_eq!(body["error"]["fields"][0]["field"], json!("title"));
    assert!(body["error"]["message"].as_str().unwrap().contains("title"));

    let resp = router
        .oneshot(json_request(Method::GET, "/api/tasks", None))
        .await
        .unwrap();
    let listed = body_json(resp).await;
    assert_eq!(listed["items"], json!([]));
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn note_requires_content() {
    let router = app_with_memory_store();

    let resp = router
        .oneshot(json_request(
            Method::POST,
            "/api/notes",
            Some(json!({"title": "only a title"})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["fields"][0]["field"], json!("content"));
}

#[tokio::test]
async fn unicode_note_content_round_trips_exactly() {
    let router = app_with_memory_store();
    let content = "Lezione: l’abitudine — 数学 ☕ \u{1F680} עברית";

    let resp = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/notes",
            Some(json!({"title": "intl", "content": content})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = router
        .oneshot(json_request(Method::GET, "/api/notes", None))
        .await
        .unwrap();
    let listed = body_json(resp).await;
    assert_eq!(
        listed["items"][0]["content"].as_str().unwrap(),
        content
    );
}

// ---------------------------------------------------------------------------
// Limit handling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn limit_above_ceiling_behaves_as_the_ceiling() {
    let router = app_with_memory_store();
    for i in 0..3 {
        let resp = router
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/tasks",
                Some(json!({"title": format!("task {i}")})),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = router
        .oneshot(json_request(Method::GET, "/api/tasks?limit=500", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let listed = body_json(resp).await;
    assert_eq!(listed["items"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn limit_below_one_is_rejected() {
    let router = app_with_memory_store();

    let resp = router
        .oneshot(json_request(Method::GET, "/api/tasks?limit=0", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["kind"], json!("validation"));
    assert_eq!(body["error"]["fields"][0]["field"], json!("limit"));
}

#[tokio::test]
async fn absent_limit_defaults_to_twenty() {
    let router = app_with_memory_store();
    for i in 0..25 {
        router
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/notes",
                Some(json!({"title": format!("n{i}"), "content": "c"})),
            ))
            .await
            .unwrap();
    }

    let resp = router
        .oneshot(json_request(Method::GET, "/api/notes", None))
        .await
        .unwrap();
    let listed = body_json(resp).await;
    assert_eq!(listed["items"].as_array().unwrap().len(), 20);
}

// ---------------------------------------------------------------------------
// Motivation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn motivation_always_comes_from_the_pool_and_covers_it() {
    let router = app_with_memory_store();
    let known: HashSet<&str> = POOL.iter().map(|q| q.text).collect();
    let mut seen = HashSet::new();

    for _ in 0..300 {
        let resp = router
            .clone()
            .oneshot(json_request(Method::GET, "/api/motivation", None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let text = body["text"].as_str().unwrap().to_string();
        assert!(known.contains(text.as_str()));
        assert!(body["author"].is_string());
        seen.insert(text);
    }

    assert_eq!(seen.len(), POOL.len());
}

// ---------------------------------------------------------------------------
// Diagnostics and store absence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_endpoint_without_store_reports_unavailability() {
    let router = app_without_store();

    let resp = router
        .oneshot(json_request(Method::GET, "/test", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["backend"], json!("✅ Running"));
    assert!(body["database"].as_str().unwrap().contains("Not Available"));
    assert_eq!(body["connection_status"], json!("Not Connected"));
    assert_eq!(body["collections"], json!([]));
    assert_eq!(body["database_url"], json!("❌ Not Set"));
    assert_eq!(body["database_name"], json!("❌ Not Set"));
}

#[tokio::test]
async fn test_endpoint_with_working_store_samples_collections() {
    let router = app_with_memory_store();
    router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/tasks",
            Some(json!({"title": "probe"})),
        ))
        .await
        .unwrap();

    let resp = router
        .oneshot(json_request(Method::GET, "/test", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["database"], json!("✅ Connected & Working"));
    assert_eq!(body["connection_status"], json!("Connected"));
    assert_eq!(body["collections"], json!(["task"]));
    assert_eq!(body["database_url"], json!("✅ Set"));
}

#[tokio::test]
async fn persistence_endpoints_fail_closed_without_a_store() {
    let router = app_without_store();

    let resp = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/tasks",
            Some(json!({"title": "doomed"})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["kind"], json!("store_unavailable"));
    assert!(body["error"]["message"].is_string());

    let resp = router
        .oneshot(json_request(Method::GET, "/api/notes", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}
