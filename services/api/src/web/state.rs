//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use mentorai_core::store::DocumentStore;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers.
///
/// The store is an explicitly injected dependency rather than module-level
/// global state, so tests can substitute an in-memory fake. It is `None` when
/// no store was configured or the connection string could not be parsed; the
/// persistence handlers treat that as a hard failure, the diagnostic endpoint
/// reports it as a status.
#[derive(Clone)]
pub struct AppState {
    pub store: Option<Arc<dyn DocumentStore>>,
    pub config: Arc<Config>,
}
