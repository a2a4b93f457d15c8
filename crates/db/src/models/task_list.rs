//! Task list rows and the views built from them.

use perfectme_core::lifecycle::ListState;
use perfectme_core::types::{DbId, ListDate, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::task::Task;

/// A row from the `task_lists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskList {
    pub id: DbId,
    pub owner_id: DbId,
    pub list_date: ListDate,
    pub is_submitted: bool,
    pub submitted_at: Option<Timestamp>,
    pub is_closed: bool,
    pub closed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TaskList {
    /// Lifecycle state derived from the persisted flags.
    pub fn state(&self) -> ListState {
        ListState::from_flags(self.is_submitted, self.is_closed)
    }
}

/// Lifecycle status of the caller's list for a date.
#[derive(Debug, Clone, Serialize)]
pub struct TaskListStatus {
    pub exists: bool,
    pub state: ListState,
    pub is_submitted: bool,
    pub is_closed: bool,
    pub submitted_at: Option<Timestamp>,
    pub closed_at: Option<Timestamp>,
}

impl TaskListStatus {
    /// Status reported for a date that has no list yet.
    pub fn absent() -> Self {
        Self {
            exists: false,
            state: ListState::Open,
            is_submitted: false,
            is_closed: false,
            submitted_at: None,
            closed_at: None,
        }
    }
}

impl From<&TaskList> for TaskListStatus {
    fn from(list: &TaskList) -> Self {
        Self {
            exists: true,
            state: list.state(),
            is_submitted: list.is_submitted,
            is_closed: list.is_closed,
            submitted_at: list.submitted_at,
            closed_at: list.closed_at,
        }
    }
}

/// A list together with its tasks ordered by position.
#[derive(Debug, Clone, Serialize)]
pub struct TaskListView {
    /// `None` when no list exists for `date`.
    pub task_list_id: Option<DbId>,
    pub date: ListDate,
    pub state: ListState,
    pub is_submitted: bool,
    pub is_closed: bool,
    pub submitted_at: Option<Timestamp>,
    pub closed_at: Option<Timestamp>,
    pub tasks: Vec<Task>,
}

impl TaskListView {
    pub fn new(list: &TaskList, tasks: Vec<Task>) -> Self {
        Self {
            task_list_id: Some(list.id),
            date: list.list_date,
            state: list.state(),
            is_submitted: list.is_submitted,
            is_closed: list.is_closed,
            submitted_at: list.submitted_at,
            closed_at: list.closed_at,
            tasks,
        }
    }

    /// Empty view for a date with no list.
    pub fn empty(date: ListDate) -> Self {
        Self {
            task_list_id: None,
            date,
            state: ListState::Open,
            is_submitted: false,
            is_closed: false,
            submitted_at: None,
            closed_at: None,
            tasks: Vec::new(),
        }
    }

    /// Sum of all task percentages.
    pub fn total_percentage(&self) -> f64 {
        self.tasks.iter().map(|t| t.percentage).sum()
    }
}
