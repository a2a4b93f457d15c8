pub mod health;
pub mod task_lists;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tasks/today                      today's list (get-or-create)
/// /tasks                            create task (POST)
/// /tasks/reorder                    reorder today's tasks (PUT)
/// /tasks/copy-from-latest           copy latest closed list forward (POST)
/// /tasks/history/{date}             list view for a past date
/// /tasks/{id}                       update (PUT), delete (DELETE)
/// /tasks/{id}/complete              toggle completion (PUT)
///
/// /task-lists/submit                Open -> Submitted (POST)
/// /task-lists/close                 Open|Submitted -> Closed (POST)
/// /task-lists/reopen                Submitted|Closed -> Open (POST)
/// /task-lists/status                lifecycle status, no creation
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tasks", tasks::router())
        .nest("/task-lists", task_lists::router())
}
