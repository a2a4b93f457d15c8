//! Copy the caller's most recent closed list into today's list.

use perfectme_core::error::CoreError;
use perfectme_core::task_rules;
use perfectme_core::types::{DbId, ListDate};
use perfectme_db::models::task::{CopyForwardReport, NewTask};
use perfectme_db::repositories::{TaskListRepo, TaskRepo};
use sqlx::PgPool;

use crate::error::AppResult;

/// Clone the tasks of the latest closed list into today's list.
///
/// Today's list is created when absent and must be open. Copies get fresh
/// ids, keep the source order, start uncompleted and are appended after
/// today's highest position. The whole list is rebalanced afterwards.
pub async fn copy_from_latest(
    pool: &PgPool,
    owner_id: DbId,
    today: ListDate,
) -> AppResult<CopyForwardReport> {
    let mut tx = pool.begin().await?;

    let target = TaskListRepo::get_or_create_locked(&mut *tx, owner_id, today).await?;
    target.state().ensure_editable()?;

    let source = TaskListRepo::find_latest_closed(&mut *tx, owner_id)
        .await?
        .ok_or(CoreError::NoClosedListFound)?;
    let source_tasks = TaskRepo::list_for_list(&mut *tx, source.id).await?;
    if source_tasks.is_empty() {
        return Err(CoreError::EmptySourceList {
            source_date: source.list_date,
        }
        .into());
    }

    let today_count = TaskRepo::count_for_list(&mut *tx, target.id).await? as usize;
    let max_position = TaskRepo::max_position(&mut *tx, target.id).await?;
    let positions = task_rules::plan_copy_positions(today_count, source_tasks.len(), max_position)
        .inspect_err(|_| {
            tracing::warn!(
                user_id = owner_id,
                today_count,
                source_count = source_tasks.len(),
                "Copy-forward rejected: capacity exceeded"
            );
        })?;

    let mut copied_ids = Vec::with_capacity(source_tasks.len());
    for (source_task, position) in source_tasks.iter().zip(positions) {
        let copy = TaskRepo::insert(
            &mut *tx,
            &NewTask {
                task_list_id: target.id,
                title: source_task.title.clone(),
                description: source_task.description.clone(),
                position,
            },
        )
        .await?;
        copied_ids.push(copy.id);
    }

    TaskRepo::recompute_percentages(&mut *tx, target.id).await?;
    let tasks = TaskRepo::list_for_list(&mut *tx, target.id).await?;

    tx.commit().await?;

    let copied_tasks: Vec<_> = tasks
        .iter()
        .filter(|t| copied_ids.contains(&t.id))
        .cloned()
        .collect();

    tracing::info!(
        user_id = owner_id,
        task_list_id = target.id,
        source_task_list_id = source.id,
        source_date = %source.list_date,
        copied = copied_tasks.len(),
        "Tasks copied forward"
    );

    Ok(CopyForwardReport {
        source_task_list_id: source.id,
        source_date: source.list_date,
        copied_tasks,
        tasks,
    })
}
