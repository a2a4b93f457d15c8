pub mod task_lists;
pub mod tasks;
