//! Canonical task collection and its use-case entry points.
//!
//! # Responsibility
//! - Own the one authoritative task ordering.
//! - Serve stable filtered views and apply reorder gestures to them.
//! - Persist the full sequence after every successful mutation.
//!
//! # Invariants
//! - `load` never fails: missing or unreadable payloads fall back to the
//!   empty sequence.
//! - A rejected operation performs no store write and no in-memory change.
//! - New tasks are prepended and always start as `Pending`.

use crate::model::task::{Task, TaskId, TaskPriority, TaskStatus, TaskValidationError};
use crate::store::snapshot::{self, SnapshotError};
use crate::store::{KvStore, StoreError};
use chrono::NaiveDate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

use super::reorder::{splice_filtered_order, ReorderError};

/// Store key holding the canonical task sequence.
pub const TASKS_KEY: &str = "workspace.tasks";

pub type BoardResult<T> = Result<T, BoardError>;

/// Errors surfaced by task board mutations.
#[derive(Debug)]
pub enum BoardError {
    /// User input failed a precondition; nothing was mutated.
    Validation(TaskValidationError),
    /// Reorder gesture does not match the current filtered view.
    Reorder(ReorderError),
    /// Sequence could not be serialized for persistence.
    Snapshot(SnapshotError),
    /// Persistence write failed; the in-memory change was rolled back.
    Store(StoreError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Reorder(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Reorder(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for BoardError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ReorderError> for BoardError {
    fn from(value: ReorderError) -> Self {
        Self::Reorder(value)
    }
}

impl From<SnapshotError> for BoardError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

impl From<StoreError> for BoardError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Predicate selecting a stable sub-sequence of the canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    /// Every task; the view is the canonical sequence itself.
    All,
    /// Tasks whose status equals the given one.
    Status(TaskStatus),
}

impl TaskFilter {
    /// Returns whether `task` belongs to this filter's view.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => task.status == status,
        }
    }
}

/// Request model for adding a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub due_date: NaiveDate,
    pub project: Option<String>,
    pub tags: Vec<String>,
}

impl TaskDraft {
    /// Creates a draft with the fields every task must carry.
    pub fn new(title: impl Into<String>, priority: TaskPriority, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority,
            due_date,
            project: None,
            tags: Vec::new(),
        }
    }
}

/// The canonical task sequence bound to an injected store.
pub struct TaskBoard<'s, S: KvStore> {
    store: &'s S,
    tasks: Vec<Task>,
}

impl<'s, S: KvStore> TaskBoard<'s, S> {
    /// Loads the board from the store.
    ///
    /// A missing payload yields an empty board. An unreadable payload is
    /// logged and also yields an empty board; the bad payload stays in the
    /// store untouched until the next successful mutation overwrites it.
    pub fn load(store: &'s S) -> Self {
        let tasks = match store.get(TASKS_KEY) {
            Ok(Some(payload)) => match snapshot::decode::<Task>(&payload) {
                Ok(tasks) => tasks,
                Err(err) => {
                    warn!(
                        "event=tasks_load module=board status=recovered error_code=bad_payload error={err}"
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(
                    "event=tasks_load module=board status=recovered error_code=store_read_failed error={err}"
                );
                Vec::new()
            }
        };

        info!(
            "event=tasks_load module=board status=ok count={}",
            tasks.len()
        );
        Self { store, tasks }
    }

    /// Adds a new pending task at the front of the canonical sequence.
    ///
    /// # Errors
    /// - `BoardError::Validation` when the draft title is blank.
    /// - `BoardError::Store` when the persistence write fails.
    pub fn add(&mut self, draft: TaskDraft) -> BoardResult<TaskId> {
        let mut task = Task::new(draft.title, draft.description, draft.priority, draft.due_date);
        task.project = draft.project;
        task.tags = draft.tags;
        task.validate()?;

        let id = task.id;
        self.tasks.insert(0, task);
        if let Err(err) = self.save() {
            self.tasks.remove(0);
            return Err(err);
        }

        info!("event=task_add module=board status=ok task_id={id}");
        Ok(id)
    }

    /// Toggles a task between completed and pending.
    ///
    /// Any non-completed status becomes `Completed`; `Completed` becomes
    /// `Pending`. The in-progress state is deliberately folded into the
    /// open bucket, matching the source product's two-state toggle.
    /// Unknown ids are a silent no-op and perform no store write.
    pub fn toggle_status(&mut self, id: TaskId) -> BoardResult<()> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            return Ok(());
        };

        let previous = self.tasks[index].status;
        self.tasks[index].status = if self.tasks[index].is_open() {
            TaskStatus::Completed
        } else {
            TaskStatus::Pending
        };

        if let Err(err) = self.save() {
            self.tasks[index].status = previous;
            return Err(err);
        }

        info!("event=task_toggle module=board status=ok task_id={id}");
        Ok(())
    }

    /// Returns the stable sub-sequence of tasks matching `filter`.
    pub fn view(&self, filter: TaskFilter) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| filter.matches(task))
            .collect()
    }

    /// Applies a reorder gesture expressed against the filtered view.
    ///
    /// `new_order` must name exactly the tasks of `view(filter)`, in the
    /// desired order. On success the canonical sequence is respliced and
    /// persisted; on any failure it is left untouched.
    pub fn reorder(&mut self, filter: TaskFilter, new_order: &[TaskId]) -> BoardResult<()> {
        let spliced = splice_filtered_order(&self.tasks, filter, new_order)?;

        let previous = std::mem::replace(&mut self.tasks, spliced);
        if let Err(err) = self.save() {
            self.tasks = previous;
            return Err(err);
        }

        info!(
            "event=task_reorder module=board status=ok count={}",
            new_order.len()
        );
        Ok(())
    }

    /// Returns the canonical sequence.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn save(&self) -> BoardResult<()> {
        let payload = snapshot::encode(&self.tasks)?;
        self.store.set(TASKS_KEY, &payload)?;
        Ok(())
    }
}
