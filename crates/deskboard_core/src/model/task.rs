//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record held by the ordered task collection.
//! - Provide construction and validation helpers for write paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is non-empty on every record that passes `validate()`.
//! - The collection owning these records defines the canonical order; the
//!   record itself carries no position field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every task record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Urgency bucket assigned by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// Task lifecycle state.
///
/// The status toggle treats everything that is not `Completed` as one
/// "open" bucket; `InProgress` exists for display and filtering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Created but not started.
    Pending,
    /// Work has started.
    InProgress,
    /// Done.
    Completed,
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID used for reorder gestures and toggle targeting.
    pub id: TaskId,
    /// Short user-facing label. Must not be blank.
    pub title: String,
    /// Free-form body. May be empty.
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// Calendar day the task is due.
    pub due_date: NaiveDate,
    /// Optional grouping label.
    pub project: Option<String>,
    /// Ordered labels. Duplicates are preserved as entered.
    pub tags: Vec<String>,
}

/// Validation failures for task write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Creates a new pending task with a generated stable ID.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: TaskPriority,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            priority,
            status: TaskStatus::Pending,
            due_date,
            project: None,
            tags: Vec::new(),
        }
    }

    /// Checks record-level preconditions for persistence.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Returns whether the task counts as open for the two-state toggle.
    pub fn is_open(&self) -> bool {
        self.status != TaskStatus::Completed
    }
}
