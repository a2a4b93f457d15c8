//! Repository for the `tasks` table.

use perfectme_core::percentage;
use perfectme_core::task_rules::TaskChanges;
use perfectme_core::types::DbId;
use sqlx::PgConnection;

use crate::models::task::{NewTask, Task};

/// Column list for tasks queries.
const COLUMNS: &str = "id, task_list_id, title, description, percentage, position, \
    is_completed, completed_at, created_at, updated_at";

/// Same columns qualified with the `t` alias, for joins against `task_lists`.
const QUALIFIED_COLUMNS: &str = "t.id, t.task_list_id, t.title, t.description, t.percentage, \
    t.position, t.is_completed, t.completed_at, t.created_at, t.updated_at";

/// Provides CRUD, ordering and percentage maintenance for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// All tasks of a list ordered by position.
    pub async fn list_for_list(
        conn: &mut PgConnection,
        task_list_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks \
             WHERE task_list_id = $1 \
             ORDER BY position ASC, id ASC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(task_list_id)
            .fetch_all(conn)
            .await
    }

    /// Number of tasks in a list.
    pub async fn count_for_list(
        conn: &mut PgConnection,
        task_list_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE task_list_id = $1")
            .bind(task_list_id)
            .fetch_one(conn)
            .await?;
        Ok(row.0)
    }

    /// Highest position in a list, `None` when the list is empty.
    pub async fn max_position(
        conn: &mut PgConnection,
        task_list_id: DbId,
    ) -> Result<Option<i32>, sqlx::Error> {
        let row: (Option<i32>,) =
            sqlx::query_as("SELECT MAX(position) FROM tasks WHERE task_list_id = $1")
                .bind(task_list_id)
                .fetch_one(conn)
                .await?;
        Ok(row.0)
    }

    /// Insert a task with a placeholder percentage of 0.
    pub async fn insert(conn: &mut PgConnection, input: &NewTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (task_list_id, title, description, percentage, position) \
             VALUES ($1, $2, $3, 0, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.task_list_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.position)
            .fetch_one(conn)
            .await
    }

    /// Find a task by id, scoped to lists owned by `owner_id`.
    pub async fn find_owned(
        conn: &mut PgConnection,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} FROM tasks t \
             JOIN task_lists tl ON tl.id = t.task_list_id \
             WHERE t.id = $1 AND tl.owner_id = $2"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(conn)
            .await
    }

    /// `(task_id, task_list_id)` for each of `ids` that belongs to `owner_id`.
    ///
    /// Ids that do not exist or belong to someone else are simply absent
    /// from the result.
    pub async fn find_owned_memberships(
        conn: &mut PgConnection,
        ids: &[DbId],
        owner_id: DbId,
    ) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, DbId)>(
            "SELECT t.id, t.task_list_id FROM tasks t \
             JOIN task_lists tl ON tl.id = t.task_list_id \
             WHERE t.id = ANY($1) AND tl.owner_id = $2",
        )
        .bind(ids)
        .bind(owner_id)
        .fetch_all(conn)
        .await
    }

    /// Apply title and/or description changes. `None` fields are left as is.
    pub async fn update_fields(
        conn: &mut PgConnection,
        id: DbId,
        changes: &TaskChanges,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.description)
            .fetch_one(conn)
            .await
    }

    /// Delete a task. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Rewrite positions so `ordered_ids[i]` gets position `i + 1`.
    ///
    /// The position uniqueness constraint is deferred, so intermediate
    /// collisions inside the transaction are fine.
    pub async fn set_positions(
        conn: &mut PgConnection,
        task_list_id: DbId,
        ordered_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tasks t SET position = v.ord::INTEGER, updated_at = NOW() \
             FROM UNNEST($2::BIGINT[]) WITH ORDINALITY AS v(id, ord) \
             WHERE t.id = v.id AND t.task_list_id = $1",
        )
        .bind(task_list_id)
        .bind(ordered_ids)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Set or clear completion, stamping or clearing `completed_at`.
    pub async fn set_completion(
        conn: &mut PgConnection,
        id: DbId,
        is_completed: bool,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET \
                is_completed = $2, \
                completed_at = CASE WHEN $2 THEN NOW() ELSE NULL END, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(is_completed)
            .fetch_one(conn)
            .await
    }

    /// Recompute every percentage of a list from its current order.
    ///
    /// Always rewrites the whole list; an empty list is a no-op.
    pub async fn recompute_percentages(
        conn: &mut PgConnection,
        task_list_id: DbId,
    ) -> Result<(), sqlx::Error> {
        let ids: Vec<DbId> = sqlx::query_scalar(
            "SELECT id FROM tasks WHERE task_list_id = $1 ORDER BY position ASC, id ASC",
        )
        .bind(task_list_id)
        .fetch_all(&mut *conn)
        .await?;

        if ids.is_empty() {
            return Ok(());
        }

        let (ids, shares): (Vec<DbId>, Vec<f64>) = percentage::assign(ids).into_iter().unzip();

        sqlx::query(
            "UPDATE tasks t SET percentage = v.percentage \
             FROM UNNEST($1::BIGINT[], $2::DOUBLE PRECISION[]) AS v(id, percentage) \
             WHERE t.id = v.id",
        )
        .bind(&ids)
        .bind(&shares)
        .execute(conn)
        .await?;

        tracing::debug!(task_list_id, task_count = ids.len(), "Recomputed task percentages");
        Ok(())
    }
}
