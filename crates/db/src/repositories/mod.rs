//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Methods
//! that take part in a multi-step operation accept `&mut PgConnection` so the
//! caller can run them inside one transaction (`&mut *tx`); the rest accept
//! `&PgPool`.

pub mod task_list_repo;
pub mod task_repo;

pub use task_list_repo::TaskListRepo;
pub use task_repo::TaskRepo;
