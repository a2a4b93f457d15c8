use crate::lifecycle::LifecycleError;

/// Domain error taxonomy shared by the persistence and HTTP layers.
///
/// Infrastructure failures (database connectivity, aborted transactions) are
/// not part of it: they travel as `sqlx::Error` and are classified by the HTTP
/// layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error(transparent)]
    InvalidState(#[from] LifecycleError),

    #[error(
        "Cannot add {adding} task(s): a task list holds at most {max} tasks \
         (current count: {current})"
    )]
    CapacityExceeded {
        current: usize,
        adding: usize,
        max: usize,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cross-list mismatch: {0}")]
    CrossListMismatch(String),

    #[error("No fields to update")]
    NoFields,

    #[error("No closed task list found to copy from")]
    NoClosedListFound,

    #[error("The latest closed task list ({source_date}) has no tasks")]
    EmptySourceList { source_date: chrono::NaiveDate },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by a numeric id.
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        CoreError::NotFound {
            entity,
            key: id.to_string(),
        }
    }
}
