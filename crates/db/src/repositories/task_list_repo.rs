//! Repository for the `task_lists` table.

use perfectme_core::lifecycle::Transition;
use perfectme_core::types::{DbId, ListDate, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::task_list::TaskList;

/// Column list for task_lists queries.
const COLUMNS: &str = "id, owner_id, list_date, is_submitted, submitted_at, \
    is_closed, closed_at, created_at, updated_at";

/// Provides lookups and lifecycle updates for task lists.
pub struct TaskListRepo;

impl TaskListRepo {
    /// Find the owner's list for a date.
    pub async fn find_by_owner_and_date(
        conn: &mut PgConnection,
        owner_id: DbId,
        list_date: ListDate,
    ) -> Result<Option<TaskList>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_lists WHERE owner_id = $1 AND list_date = $2"
        );
        sqlx::query_as::<_, TaskList>(&query)
            .bind(owner_id)
            .bind(list_date)
            .fetch_optional(conn)
            .await
    }

    /// Find the owner's list for a date and lock its row until the enclosing
    /// transaction ends.
    ///
    /// Every structural mutation of a list takes this lock first, so two
    /// concurrent operations on the same list never recompute from a stale
    /// task count.
    pub async fn lock_by_owner_and_date(
        conn: &mut PgConnection,
        owner_id: DbId,
        list_date: ListDate,
    ) -> Result<Option<TaskList>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_lists \
             WHERE owner_id = $1 AND list_date = $2 \
             FOR UPDATE"
        );
        sqlx::query_as::<_, TaskList>(&query)
            .bind(owner_id)
            .bind(list_date)
            .fetch_optional(conn)
            .await
    }

    /// Lock a list by id until the enclosing transaction ends.
    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<TaskList>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_lists WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, TaskList>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Create an open list for `(owner_id, list_date)` unless one exists.
    ///
    /// Returns `true` when a row was inserted. Concurrent first accesses
    /// resolve through the `uq_task_lists_owner_date` constraint.
    pub async fn ensure_exists(
        conn: &mut PgConnection,
        owner_id: DbId,
        list_date: ListDate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO task_lists (owner_id, list_date) VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_task_lists_owner_date DO NOTHING",
        )
        .bind(owner_id)
        .bind(list_date)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Get the owner's list for a date, creating it when absent, and lock it.
    pub async fn get_or_create_locked(
        conn: &mut PgConnection,
        owner_id: DbId,
        list_date: ListDate,
    ) -> Result<TaskList, sqlx::Error> {
        if Self::ensure_exists(&mut *conn, owner_id, list_date).await? {
            tracing::debug!(owner_id, %list_date, "Created task list");
        }
        Self::lock_by_owner_and_date(conn, owner_id, list_date)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// The owner's most recent closed list by date.
    pub async fn find_latest_closed(
        conn: &mut PgConnection,
        owner_id: DbId,
    ) -> Result<Option<TaskList>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_lists \
             WHERE owner_id = $1 AND is_closed = true \
             ORDER BY list_date DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, TaskList>(&query)
            .bind(owner_id)
            .fetch_optional(conn)
            .await
    }

    /// Persist a lifecycle transition that has already been validated
    /// against the list's current state.
    ///
    /// - `Submit` sets the submitted flag and timestamp.
    /// - `Close` sets the closed flag and timestamp; the submitted flag is kept.
    /// - `Reopen` clears both flags and both timestamps.
    pub async fn apply_transition(
        conn: &mut PgConnection,
        id: DbId,
        transition: Transition,
    ) -> Result<TaskList, sqlx::Error> {
        let assignments = match transition {
            Transition::Submit => "is_submitted = true, submitted_at = NOW()",
            Transition::Close => "is_closed = true, closed_at = NOW()",
            Transition::Reopen => {
                "is_submitted = false, submitted_at = NULL, is_closed = false, closed_at = NULL"
            }
        };
        let query = format!(
            "UPDATE task_lists SET {assignments}, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskList>(&query)
            .bind(id)
            .fetch_one(conn)
            .await
    }

    /// Close every still-open list dated on or before `cutoff` in one
    /// statement, stamping all of them with the same `closed_at`.
    ///
    /// Lists that are already closed are not touched, so the update is
    /// idempotent and commutes with manual closes. Returns the number of
    /// lists closed.
    pub async fn close_stale(
        pool: &PgPool,
        cutoff: ListDate,
        closed_at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE task_lists \
             SET is_closed = true, closed_at = $2, updated_at = NOW() \
             WHERE list_date <= $1 AND is_closed = false",
        )
        .bind(cutoff)
        .bind(closed_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Find a list by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TaskList>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_lists WHERE id = $1");
        sqlx::query_as::<_, TaskList>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
