//! Route definitions for list lifecycle, mounted at `/task-lists`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::task_lists;
use crate::state::AppState;

/// ```text
/// POST /submit   -> submit
/// POST /close    -> close
/// POST /reopen   -> reopen
/// GET  /status   -> status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(task_lists::submit))
        .route("/close", post(task_lists::close))
        .route("/reopen", post(task_lists::reopen))
        .route("/status", get(task_lists::status))
}
