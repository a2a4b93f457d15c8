//! Lifecycle transitions on the caller's list for today.

use perfectme_core::error::CoreError;
use perfectme_core::lifecycle::Transition;
use perfectme_core::types::{DbId, ListDate};
use perfectme_db::models::task_list::TaskListStatus;
use perfectme_db::repositories::TaskListRepo;
use sqlx::PgPool;

use crate::error::AppResult;

/// Apply `transition` to the caller's list for `today`.
///
/// The list must already exist; transitions never create it.
pub async fn transition_today(
    pool: &PgPool,
    owner_id: DbId,
    today: ListDate,
    transition: Transition,
) -> AppResult<TaskListStatus> {
    let mut tx = pool.begin().await?;

    let list = TaskListRepo::lock_by_owner_and_date(&mut *tx, owner_id, today)
        .await?
        .ok_or_else(|| CoreError::not_found("TaskList", today))?;

    let from = list.state();
    let to = from.apply(transition)?;

    let updated = TaskListRepo::apply_transition(&mut *tx, list.id, transition).await?;
    tx.commit().await?;

    tracing::info!(
        user_id = owner_id,
        task_list_id = updated.id,
        transition = transition.as_str(),
        %from,
        %to,
        "Task list transitioned"
    );
    Ok(TaskListStatus::from(&updated))
}

/// Lifecycle status of the caller's list for `today`, without creating it.
pub async fn status_today(
    pool: &PgPool,
    owner_id: DbId,
    today: ListDate,
) -> AppResult<TaskListStatus> {
    let mut conn = pool.acquire().await?;
    let status = TaskListRepo::find_by_owner_and_date(&mut *conn, owner_id, today)
        .await?
        .map(|list| TaskListStatus::from(&list))
        .unwrap_or_else(TaskListStatus::absent);
    Ok(status)
}
