use std::sync::Arc;

use axum::Router;
use travel_tasks_server::task::{TaskState, TaskStore, api};

/// Builds the task API router over a fresh, empty store.
pub fn setup_router() -> Router {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let state = TaskState {
        store: Arc::new(TaskStore::new()),
    };
    api::create_api_router(state)
}

/// Builds the task API router over a store holding the two startup tasks.
pub fn setup_seeded_router() -> Router {
    let _ = tracing_subscriber::fmt().try_init();
    let state = TaskState {
        store: Arc::new(TaskStore::seeded()),
    };
    api::create_api_router(state)
}
