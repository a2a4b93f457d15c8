//! Handlers for the caller's tasks.
//!
//! All endpoints require authentication via [`AuthUser`] and operate on the
//! caller's own lists only. "Today" is resolved with the server's
//! [`DayClock`](perfectme_core::calendar::DayClock).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use perfectme_core::types::DbId;
use perfectme_db::models::task::{CreateTask, ReorderTasks, UpdateTask};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::tasks::{copy_forward, manager};

// ---------------------------------------------------------------------------
// Today's list
// ---------------------------------------------------------------------------

/// GET /api/v1/tasks/today
///
/// Today's list with its tasks ordered by position. Creates an empty open
/// list on first access.
pub async fn get_today(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let view = manager::today_view(&state.pool, auth.user_id, state.clock().today()).await?;

    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/tasks
pub async fn create_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<impl IntoResponse> {
    let task =
        manager::create_task(&state.pool, auth.user_id, state.clock().today(), &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// PUT /api/v1/tasks/reorder
///
/// Body: `{ "task_ids": [..] }`, every task of the list in the new order.
pub async fn reorder_tasks(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ReorderTasks>,
) -> AppResult<impl IntoResponse> {
    let view = manager::reorder_tasks(&state.pool, auth.user_id, &input.task_ids).await?;

    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/tasks/copy-from-latest
pub async fn copy_from_latest(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let report =
        copy_forward::copy_from_latest(&state.pool, auth.user_id, state.clock().today()).await?;

    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// Single task
// ---------------------------------------------------------------------------

/// PUT /api/v1/tasks/{id}
pub async fn update_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<impl IntoResponse> {
    let task = manager::update_task(&state.pool, auth.user_id, task_id, &input).await?;

    Ok(Json(DataResponse { data: task }))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    manager::delete_task(&state.pool, auth.user_id, task_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/tasks/{id}/complete
///
/// Toggle completion. Allowed until the list is closed.
pub async fn toggle_complete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let task = manager::toggle_completion(&state.pool, auth.user_id, task_id).await?;

    Ok(Json(DataResponse { data: task }))
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// GET /api/v1/tasks/history/{date}
///
/// Read-only list view for `YYYY-MM-DD`; empty when no list exists.
pub async fn get_history(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<impl IntoResponse> {
    let date = parse_list_date(&date)?;
    let view = manager::history_view(&state.pool, auth.user_id, date).await?;

    Ok(Json(DataResponse { data: view }))
}

fn parse_list_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date '{raw}', expected YYYY-MM-DD")))
}
