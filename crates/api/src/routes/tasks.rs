//! Route definitions for tasks, mounted at `/tasks`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// ```text
/// GET    /today              -> get_today
/// POST   /                   -> create_task
/// PUT    /reorder            -> reorder_tasks
/// POST   /copy-from-latest   -> copy_from_latest
/// GET    /history/{date}     -> get_history
/// PUT    /{id}               -> update_task
/// DELETE /{id}               -> delete_task
/// PUT    /{id}/complete      -> toggle_complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(tasks::create_task))
        .route("/today", get(tasks::get_today))
        .route("/reorder", put(tasks::reorder_tasks))
        .route("/copy-from-latest", post(tasks::copy_from_latest))
        .route("/history/{date}", get(tasks::get_history))
        .route("/{id}", put(tasks::update_task).delete(tasks::delete_task))
        .route("/{id}/complete", put(tasks::toggle_complete))
}
