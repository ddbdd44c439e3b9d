use crate::runtime::ActiveEngine;
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::sync::Arc;
use tracing::error;

/// `GET /stats` returns the active engine's snapshot document.
pub fn stats_router(state: Arc<ActiveEngine>) -> Router {
    Router::new()
        .route("/stats", get(current_stats))
        .with_state(state)
}

async fn current_stats(State(state): State<Arc<ActiveEngine>>) -> Response {
    let engine = state.load_full();
    let mut body = Vec::new();

    match engine.write(&mut body) {
        Ok(()) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            error!(error = %e, "failed to write statistics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
