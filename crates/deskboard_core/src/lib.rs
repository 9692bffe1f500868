//! Core ordering and layout logic for the personal workspace dashboard.
//! This crate is the single source of truth for business invariants.

pub mod board;
pub mod dashboard;
pub mod logging;
pub mod model;
pub mod store;

pub use board::reorder::{splice_filtered_order, ReorderError};
pub use board::task_board::{
    BoardError, BoardResult, TaskBoard, TaskDraft, TaskFilter, TASKS_KEY,
};
pub use dashboard::binding::{BindingRegistry, BindingRegistryError, WidgetBinding};
pub use dashboard::layout::{
    default_layout, LayoutError, LayoutResult, WidgetLayoutRegistry, WIDGETS_KEY,
};
pub use dashboard::GRID_COLUMNS;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskPriority, TaskStatus, TaskValidationError};
pub use model::widget::{
    GridPosition, GridSize, Widget, WidgetId, WidgetKind, WidgetValidationError,
};
pub use store::{
    open_db, open_db_in_memory, KvStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
