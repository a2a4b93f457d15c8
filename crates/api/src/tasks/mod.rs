//! Task services.
//!
//! Each public function runs one operation in a single database transaction
//! and takes the resolved calendar date as a parameter, so the HTTP handlers
//! and the integration tests drive exactly the same code path.
//!
//! - [`manager`] -- today's list, task CRUD, reorder, completion, history.
//! - [`lifecycle`] -- submit / close / reopen and status of today's list.
//! - [`copy_forward`] -- clone the latest closed list into today's list.

pub mod copy_forward;
pub mod lifecycle;
pub mod manager;
