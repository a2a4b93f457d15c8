//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request DTOs accepted by the API
//! - `Serialize` views assembled from several rows

pub mod task;
pub mod task_list;
