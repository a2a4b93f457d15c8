//! Task collection manager.
//!
//! Every structural change (create, delete, reorder) locks the owning
//! `task_lists` row, mutates, recomputes the whole list's percentages and
//! commits, so two operations on the same list never interleave.

use perfectme_core::error::CoreError;
use perfectme_core::task_rules;
use perfectme_core::types::{DbId, ListDate};
use perfectme_db::models::task::{CreateTask, NewTask, Task, UpdateTask};
use perfectme_db::models::task_list::{TaskList, TaskListView};
use perfectme_db::repositories::{TaskListRepo, TaskRepo};
use sqlx::{PgConnection, PgPool};

use crate::error::AppResult;

/// Today's list with its tasks, creating an empty open list on first access.
pub async fn today_view(pool: &PgPool, owner_id: DbId, today: ListDate) -> AppResult<TaskListView> {
    let mut tx = pool.begin().await?;

    if TaskListRepo::ensure_exists(&mut *tx, owner_id, today).await? {
        tracing::info!(user_id = owner_id, %today, "Task list created");
    }
    let list = TaskListRepo::find_by_owner_and_date(&mut *tx, owner_id, today)
        .await?
        .ok_or_else(|| CoreError::not_found("TaskList", today))?;
    let tasks = TaskRepo::list_for_list(&mut *tx, list.id).await?;

    tx.commit().await?;
    Ok(TaskListView::new(&list, tasks))
}

/// Append a task to today's list and rebalance percentages.
pub async fn create_task(
    pool: &PgPool,
    owner_id: DbId,
    today: ListDate,
    input: &CreateTask,
) -> AppResult<Task> {
    let title = task_rules::normalize_title(&input.title)?;
    let description = task_rules::normalize_description(input.description.as_deref())?;

    let mut tx = pool.begin().await?;

    let list = TaskListRepo::get_or_create_locked(&mut *tx, owner_id, today).await?;
    list.state().ensure_editable()?;

    let count = TaskRepo::count_for_list(&mut *tx, list.id).await? as usize;
    task_rules::ensure_capacity(count, 1)?;

    let position = task_rules::next_position(TaskRepo::max_position(&mut *tx, list.id).await?);
    let inserted = TaskRepo::insert(
        &mut *tx,
        &NewTask {
            task_list_id: list.id,
            title,
            description,
            position,
        },
    )
    .await?;

    TaskRepo::recompute_percentages(&mut *tx, list.id).await?;
    let task = TaskRepo::find_owned(&mut *tx, inserted.id, owner_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", inserted.id))?;

    tx.commit().await?;

    tracing::info!(
        user_id = owner_id,
        task_id = task.id,
        task_list_id = list.id,
        position,
        percentage = task.percentage,
        "Task created"
    );
    Ok(task)
}

/// Change the title and/or description of one of the caller's tasks.
pub async fn update_task(
    pool: &PgPool,
    owner_id: DbId,
    task_id: DbId,
    input: &UpdateTask,
) -> AppResult<Task> {
    let changes =
        task_rules::normalize_changes(input.title.as_deref(), input.description.as_deref())?;

    let mut tx = pool.begin().await?;

    let (task, list) = lock_owned_task(&mut *tx, owner_id, task_id).await?;
    list.state().ensure_editable()?;

    let updated = TaskRepo::update_fields(&mut *tx, task.id, &changes).await?;
    tx.commit().await?;

    tracing::info!(user_id = owner_id, task_id, "Task updated");
    Ok(updated)
}

/// Remove one of the caller's tasks and rebalance the remaining ones.
pub async fn delete_task(pool: &PgPool, owner_id: DbId, task_id: DbId) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    let (task, list) = lock_owned_task(&mut *tx, owner_id, task_id).await?;
    list.state().ensure_editable()?;

    if !TaskRepo::delete(&mut *tx, task.id).await? {
        return Err(CoreError::not_found("Task", task_id).into());
    }
    TaskRepo::recompute_percentages(&mut *tx, list.id).await?;

    tx.commit().await?;

    tracing::info!(user_id = owner_id, task_id, task_list_id = list.id, "Task deleted");
    Ok(())
}

/// Reassign positions `1..=n` in the given order and rebalance.
///
/// `task_ids` must name every task of one list owned by the caller exactly
/// once.
pub async fn reorder_tasks(
    pool: &PgPool,
    owner_id: DbId,
    task_ids: &[DbId],
) -> AppResult<TaskListView> {
    let mut tx = pool.begin().await?;

    let memberships = TaskRepo::find_owned_memberships(&mut *tx, task_ids, owner_id).await?;
    let list_id = task_rules::resolve_reorder_list(task_ids, &memberships)?;

    let list = TaskListRepo::lock_by_id(&mut *tx, list_id)
        .await?
        .ok_or_else(|| CoreError::not_found("TaskList", list_id))?;
    list.state().ensure_editable()?;

    let current: Vec<DbId> = TaskRepo::list_for_list(&mut *tx, list.id)
        .await?
        .into_iter()
        .map(|t| t.id)
        .collect();
    task_rules::ensure_reorder_covers_list(task_ids, &current)?;

    TaskRepo::set_positions(&mut *tx, list.id, task_ids).await?;
    TaskRepo::recompute_percentages(&mut *tx, list.id).await?;
    let tasks = TaskRepo::list_for_list(&mut *tx, list.id).await?;

    tx.commit().await?;

    tracing::info!(
        user_id = owner_id,
        task_list_id = list.id,
        task_count = tasks.len(),
        "Tasks reordered"
    );
    Ok(TaskListView::new(&list, tasks))
}

/// Flip the completion flag of one of the caller's tasks.
///
/// Allowed while the list is open or submitted; percentages are unaffected.
pub async fn toggle_completion(pool: &PgPool, owner_id: DbId, task_id: DbId) -> AppResult<Task> {
    let mut tx = pool.begin().await?;

    let (task, list) = lock_owned_task(&mut *tx, owner_id, task_id).await?;
    list.state().ensure_completable()?;

    let updated = TaskRepo::set_completion(&mut *tx, task.id, !task.is_completed).await?;
    tx.commit().await?;

    tracing::info!(
        user_id = owner_id,
        task_id,
        is_completed = updated.is_completed,
        "Task completion toggled"
    );
    Ok(updated)
}

/// Read-only view of the caller's list for `date`, empty when none exists.
pub async fn history_view(pool: &PgPool, owner_id: DbId, date: ListDate) -> AppResult<TaskListView> {
    let mut conn = pool.acquire().await?;

    let Some(list) = TaskListRepo::find_by_owner_and_date(&mut *conn, owner_id, date).await? else {
        return Ok(TaskListView::empty(date));
    };
    let tasks = TaskRepo::list_for_list(&mut *conn, list.id).await?;

    Ok(TaskListView::new(&list, tasks))
}

/// Resolve a task owned by the caller, lock its list, and return the task as
/// it reads under that lock.
///
/// Tasks of other owners are reported as not found, as are tasks deleted
/// while this call waited for the lock.
async fn lock_owned_task(
    conn: &mut PgConnection,
    owner_id: DbId,
    task_id: DbId,
) -> AppResult<(Task, TaskList)> {
    let unlocked = TaskRepo::find_owned(&mut *conn, task_id, owner_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", task_id))?;
    let list = TaskListRepo::lock_by_id(&mut *conn, unlocked.task_list_id)
        .await?
        .ok_or_else(|| CoreError::not_found("TaskList", unlocked.task_list_id))?;

    // Concurrent writers to this list committed before the lock was granted.
    let task = TaskRepo::find_owned(&mut *conn, task_id, owner_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", task_id))?;
    Ok((task, list))
}
