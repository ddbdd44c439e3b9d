use crate::word_log::WordLog;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use std::sync::Arc;
use tracing::{debug, error};

/// `POST /` appends the raw request body to the word log.
pub fn ingest_router(log: Arc<WordLog>) -> Router {
    Router::new()
        .route("/", post(append_words))
        .with_state(log)
}

async fn append_words(State(log): State<Arc<WordLog>>, body: Bytes) -> StatusCode {
    match log.append(&body).await {
        Ok(()) => {
            debug!(bytes = body.len(), "words appended");
            StatusCode::OK
        }
        Err(e) => {
            error!(error = %e, "failed to append words");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
