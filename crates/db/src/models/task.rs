//! Task rows, request DTOs and the copy-forward report.

use perfectme_core::types::{DbId, ListDate, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub task_list_id: DbId,
    pub title: String,
    pub description: String,
    pub percentage: f64,
    pub position: i32,
    pub is_completed: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert DTO. Titles and descriptions arrive already normalized and the
/// percentage starts at 0 until the list is recomputed.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub task_list_id: DbId,
    pub title: String,
    pub description: String,
    pub position: i32,
}

/// Request body for creating a task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
}

/// Request body for updating a task. Only supplied fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Request body for reordering the tasks of a list.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderTasks {
    pub task_ids: Vec<DbId>,
}

/// Result of copying the latest closed list into today's list.
#[derive(Debug, Clone, Serialize)]
pub struct CopyForwardReport {
    pub source_task_list_id: DbId,
    pub source_date: ListDate,
    /// The newly created tasks, in source order.
    pub copied_tasks: Vec<Task>,
    /// Every task of today's list after the copy.
    pub tasks: Vec<Task>,
}
