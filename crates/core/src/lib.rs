//! Domain rules for the daily prioritized task list.
//!
//! This crate has no internal dependencies and performs no I/O, so the
//! persistence and HTTP layers can share the same rules:
//!
//! - [`percentage`] -- rank-weighted split of the 100-point daily budget.
//! - [`lifecycle`] -- Open / Submitted / Closed state machine and mutation gates.
//! - [`task_rules`] -- capacity, title, reorder-set and copy-forward checks.
//! - [`calendar`] -- resolution of "today" in a pinned reference offset.

pub mod calendar;
pub mod error;
pub mod lifecycle;
pub mod percentage;
pub mod task_rules;
pub mod types;
