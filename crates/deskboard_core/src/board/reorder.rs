//! Filtered reorder splice.
//!
//! # Responsibility
//! - Rebuild the canonical task sequence from a reordered filtered view.
//!
//! # Invariants
//! - Non-matching tasks keep their exact canonical slots.
//! - The slots previously occupied by matching tasks are refilled, in
//!   canonical walk order, with the tasks named by the gesture.
//! - Any permutation violation rejects the gesture before anything moves.

use crate::model::task::{Task, TaskId};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use super::task_board::TaskFilter;

/// Rejection reasons for a reorder gesture.
///
/// All variants mean the gesture no longer describes the current filtered
/// view; the caller reloads its view and retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    /// Gesture names a different number of tasks than the view holds.
    LengthMismatch { expected: usize, actual: usize },
    /// Gesture names a task outside the current filtered view.
    UnknownTask(TaskId),
    /// Gesture names the same task twice.
    DuplicateTask(TaskId),
}

impl Display for ReorderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "reorder names {actual} tasks but the filtered view holds {expected}"
            ),
            Self::UnknownTask(id) => write!(f, "reorder names a task outside the view: {id}"),
            Self::DuplicateTask(id) => write!(f, "reorder names a task twice: {id}"),
        }
    }
}

impl Error for ReorderError {}

/// Rebuilds the canonical sequence so the filtered view reads as `new_order`.
///
/// Walks `canonical` in place: tasks outside `filter` pass through
/// unchanged, and each slot that held a matching task is refilled with the
/// next task from `new_order`. With `TaskFilter::All` this degenerates to
/// returning the gesture order verbatim.
///
/// # Errors
/// - `ReorderError` when `new_order` is not a permutation of the current
///   filtered view. `canonical` is never modified.
pub fn splice_filtered_order(
    canonical: &[Task],
    filter: TaskFilter,
    new_order: &[TaskId],
) -> Result<Vec<Task>, ReorderError> {
    let mut matching: HashMap<TaskId, &Task> = HashMap::new();
    let mut expected = 0usize;
    for task in canonical {
        if filter.matches(task) {
            expected += 1;
            matching.insert(task.id, task);
        }
    }

    if new_order.len() != expected {
        return Err(ReorderError::LengthMismatch {
            expected,
            actual: new_order.len(),
        });
    }

    // Guard first: the splice below consumes `matching`, so every check
    // must pass before any slot is refilled.
    let mut seen: Vec<TaskId> = Vec::with_capacity(new_order.len());
    for id in new_order {
        if seen.contains(id) {
            return Err(ReorderError::DuplicateTask(*id));
        }
        if !matching.contains_key(id) {
            return Err(ReorderError::UnknownTask(*id));
        }
        seen.push(*id);
    }

    let mut replacements = new_order.iter();
    let spliced = canonical
        .iter()
        .map(|task| {
            if filter.matches(task) {
                // The guards above make the refill total.
                match replacements.next().and_then(|id| matching.get(id)) {
                    Some(replacement) => (*replacement).clone(),
                    None => task.clone(),
                }
            } else {
                task.clone()
            }
        })
        .collect();

    Ok(spliced)
}
