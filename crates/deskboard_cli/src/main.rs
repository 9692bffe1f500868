//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `deskboard_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use chrono::NaiveDate;
use deskboard_core::{
    MemoryKvStore, TaskBoard, TaskDraft, TaskFilter, TaskPriority, TaskStatus,
    WidgetLayoutRegistry,
};

fn main() {
    println!("deskboard_core ping={}", deskboard_core::ping());
    println!("deskboard_core version={}", deskboard_core::core_version());

    let store = MemoryKvStore::new();

    let mut board = TaskBoard::load(&store);
    let due = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default();
    if let Err(err) = board.add(TaskDraft::new("Smoke task", TaskPriority::Medium, due)) {
        eprintln!("task add failed: {err}");
        std::process::exit(1);
    }
    println!("tasks total={}", board.len());
    println!(
        "tasks pending={}",
        board.view(TaskFilter::Status(TaskStatus::Pending)).len()
    );

    let layout = WidgetLayoutRegistry::load(&store);
    println!("widgets seeded={}", layout.len());
    println!("widgets visible={}", layout.visible_widgets().len());
}
