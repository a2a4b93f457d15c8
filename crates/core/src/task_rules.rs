//! Validation rules for the task set of a single list.
//!
//! These run inside the same transaction that mutates the list, after the
//! list row has been locked, so counts and id sets are current.

use std::collections::{BTreeSet, HashSet};

use crate::error::CoreError;
use crate::types::DbId;

/// Hard cap on tasks per list.
pub const MAX_TASKS_PER_LIST: usize = 10;

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;

/// Trim a title and reject it when empty or too long.
pub fn normalize_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    let len = trimmed.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters (got {len})"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim a description; a missing description becomes the empty string.
pub fn normalize_description(description: Option<&str>) -> Result<String, CoreError> {
    let trimmed = description.map(str::trim).unwrap_or_default();
    let len = trimmed.chars().count();
    if len > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters (got {len})"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validated field changes for a task update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Normalize an update request; at least one field must be present.
pub fn normalize_changes(
    title: Option<&str>,
    description: Option<&str>,
) -> Result<TaskChanges, CoreError> {
    if title.is_none() && description.is_none() {
        return Err(CoreError::NoFields);
    }
    Ok(TaskChanges {
        title: title.map(normalize_title).transpose()?,
        description: description
            .map(|d| normalize_description(Some(d)))
            .transpose()?,
    })
}

/// Reject an insert of `adding` tasks into a list that holds `current`.
pub fn ensure_capacity(current: usize, adding: usize) -> Result<(), CoreError> {
    if current + adding > MAX_TASKS_PER_LIST {
        return Err(CoreError::CapacityExceeded {
            current,
            adding,
            max: MAX_TASKS_PER_LIST,
        });
    }
    Ok(())
}

/// Position for a task appended after the current maximum.
///
/// Deleting the highest position frees it for the next append, while a
/// delete lower in the list leaves a gap. A reorder compacts positions back
/// to `1..=n`.
pub fn next_position(max_position: Option<i32>) -> i32 {
    max_position.unwrap_or(0) + 1
}

/// Positions for `source_count` tasks copied into a list holding
/// `current_count` tasks whose highest position is `max_position`.
///
/// Fails with [`CoreError::CapacityExceeded`] reporting both counts when the
/// copy would overflow the list.
pub fn plan_copy_positions(
    current_count: usize,
    source_count: usize,
    max_position: Option<i32>,
) -> Result<Vec<i32>, CoreError> {
    ensure_capacity(current_count, source_count)?;
    let first = next_position(max_position);
    Ok((0..source_count as i32).map(|offset| first + offset).collect())
}

/// Check the identifiers of a reorder request against the rows that were
/// found for the caller, returning the single owning list.
///
/// `found` holds `(task_id, task_list_id)` for every requested id that exists
/// and belongs to the caller.
pub fn resolve_reorder_list(requested: &[DbId], found: &[(DbId, DbId)]) -> Result<DbId, CoreError> {
    if requested.is_empty() {
        return Err(CoreError::Validation(
            "task_ids must contain at least one task id".into(),
        ));
    }

    let unique: HashSet<DbId> = requested.iter().copied().collect();
    if unique.len() != requested.len() {
        return Err(CoreError::Validation(
            "task_ids must not contain duplicates".into(),
        ));
    }

    let found_ids: HashSet<DbId> = found.iter().map(|(task_id, _)| *task_id).collect();
    if let Some(missing) = requested.iter().find(|id| !found_ids.contains(id)) {
        return Err(CoreError::CrossListMismatch(format!(
            "Task {missing} not found or not owned by user"
        )));
    }

    let lists: BTreeSet<DbId> = found.iter().map(|(_, list_id)| *list_id).collect();
    let mut lists = lists.into_iter();
    match (lists.next(), lists.next()) {
        (Some(list_id), None) => Ok(list_id),
        _ => Err(CoreError::CrossListMismatch(
            "All tasks must belong to the same task list".into(),
        )),
    }
}

/// A reorder must name every task of the list exactly once.
pub fn ensure_reorder_covers_list(requested: &[DbId], current: &[DbId]) -> Result<(), CoreError> {
    let requested_set: HashSet<DbId> = requested.iter().copied().collect();
    let current_set: HashSet<DbId> = current.iter().copied().collect();
    if requested_set != current_set || requested.len() != current.len() {
        return Err(CoreError::Validation(format!(
            "task_ids must list every task of the task list exactly once \
             (expected {}, got {})",
            current.len(),
            requested.len()
        )));
    }
    Ok(())
}
