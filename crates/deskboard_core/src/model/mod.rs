//! Canonical domain records for the personal workspace.
//!
//! # Responsibility
//! - Define the data structures owned by core business logic.
//! - Keep one canonical shape per entity; projections never copy data.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Records are never hard-deleted by core operations.

pub mod task;
pub mod widget;
