//! Handlers for the lifecycle of the caller's list for today.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use perfectme_core::lifecycle::Transition;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::tasks::lifecycle;

/// POST /api/v1/task-lists/submit
pub async fn submit(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    transition(auth, state, Transition::Submit).await
}

/// POST /api/v1/task-lists/close
pub async fn close(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    transition(auth, state, Transition::Close).await
}

/// POST /api/v1/task-lists/reopen
pub async fn reopen(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    transition(auth, state, Transition::Reopen).await
}

/// GET /api/v1/task-lists/status
///
/// Reports `exists: false` instead of creating the list.
pub async fn status(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let status = lifecycle::status_today(&state.pool, auth.user_id, state.clock().today()).await?;

    Ok(Json(DataResponse { data: status }))
}

async fn transition(
    auth: AuthUser,
    state: AppState,
    transition: Transition,
) -> AppResult<impl IntoResponse> {
    let status = lifecycle::transition_today(
        &state.pool,
        auth.user_id,
        state.clock().today(),
        transition,
    )
    .await?;

    Ok(Json(DataResponse { data: status }))
}
