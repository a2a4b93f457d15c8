//! Bearer-token identity extractor for Axum handlers.
//!
//! The extracted [`AuthUser::user_id`] is the only owner id handlers pass to
//! the task services. Every list and task query is filtered by it, so a task
//! belonging to another owner is indistinguishable from a missing one and
//! surfaces as `404 NOT_FOUND`.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use perfectme_core::error::CoreError;
use perfectme_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The owner on whose behalf a request runs.
///
/// Rejections are `401 UNAUTHORIZED`: a missing header, a scheme other than
/// `Bearer`, or a token that fails signature or expiry checks.
///
/// ```ignore
/// async fn today(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<TaskListView>> {
///     let view = manager::today_view(&state.pool, user.user_id, state.clock().today()).await?;
///     Ok(Json(view))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// Owner id from `claims.sub`; scopes every task list lookup.
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}
