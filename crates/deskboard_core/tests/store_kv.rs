use chrono::NaiveDate;
use deskboard_core::store::migrations::latest_version;
use deskboard_core::{
    open_db, open_db_in_memory, KvStore, SqliteKvStore, StoreError, TaskBoard, TaskDraft,
    TaskPriority, TASKS_KEY,
};
use rusqlite::Connection;

fn due() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid fixture date")
}

#[test]
fn migration_creates_kv_entries_table() {
    let conn = open_db_in_memory().expect("in-memory db should open");

    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries'
            );",
            [],
            |row| row.get(0),
        )
        .expect("schema query should succeed");
    assert_eq!(exists, 1);

    let mut stmt = conn
        .prepare("PRAGMA table_info(kv_entries);")
        .expect("pragma should prepare");
    let mut rows = stmt.query([]).expect("pragma should run");
    let mut columns = Vec::new();
    while let Some(row) = rows.next().expect("row should read") {
        let column_name: String = row.get(1).expect("column name should read");
        columns.push(column_name);
    }
    assert!(columns.contains(&"key".to_string()));
    assert!(columns.contains(&"value".to_string()));
    assert!(columns.contains(&"updated_at".to_string()));

    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .expect("user_version should read");
    assert_eq!(version, latest_version());
}

#[test]
fn store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().expect("raw connection should open");
    let err = SqliteKvStore::try_new(&conn).expect_err("unmigrated connection must be rejected");
    assert!(matches!(
        err,
        StoreError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn get_set_round_trips_and_overwrites() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let store = SqliteKvStore::try_new(&conn).expect("store should construct");

    assert!(store.get("missing").expect("get should run").is_none());

    store.set("k", "first").expect("set should run");
    store.set("k", "second").expect("overwrite should run");
    assert_eq!(
        store.get("k").expect("get should run").as_deref(),
        Some("second")
    );
}

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir should create");
    let db_path = dir.path().join("deskboard.sqlite3");

    {
        let conn = open_db(&db_path).expect("file db should open");
        let store = SqliteKvStore::try_new(&conn).expect("store should construct");
        store.set("k", "durable").expect("set should run");
    }

    let conn = open_db(&db_path).expect("file db should reopen");
    let store = SqliteKvStore::try_new(&conn).expect("store should construct");
    assert_eq!(
        store.get("k").expect("get should run").as_deref(),
        Some("durable")
    );
}

#[test]
fn task_board_runs_end_to_end_over_sqlite() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let store = SqliteKvStore::try_new(&conn).expect("store should construct");

    let mut board = TaskBoard::load(&store);
    board
        .add(TaskDraft::new("sqlite-backed", TaskPriority::High, due()))
        .expect("add should succeed");

    let reloaded = TaskBoard::load(&store);
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.tasks()[0].title, "sqlite-backed");
}

#[test]
fn legacy_bare_array_payload_is_upgraded_on_next_save() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let store = SqliteKvStore::try_new(&conn).expect("store should construct");

    // Write the task list the way the unversioned builds persisted it.
    let mut seed_board = TaskBoard::load(&store);
    seed_board
        .add(TaskDraft::new("legacy", TaskPriority::Low, due()))
        .expect("add should succeed");
    let legacy_payload =
        serde_json::to_string(&seed_board.tasks().to_vec()).expect("fixture serializes");
    store
        .set(TASKS_KEY, &legacy_payload)
        .expect("seed write should run");

    let mut board = TaskBoard::load(&store);
    assert_eq!(board.len(), 1, "legacy shape should decode");

    board
        .add(TaskDraft::new("upgraded", TaskPriority::Medium, due()))
        .expect("add should succeed");
    let payload = store
        .get(TASKS_KEY)
        .expect("get should run")
        .expect("payload should exist");
    assert!(
        payload.starts_with("{\"version\":"),
        "next save must rewrite the envelope shape"
    );
}

#[test]
fn future_version_payload_falls_back_to_empty_board() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let store = SqliteKvStore::try_new(&conn).expect("store should construct");
    store
        .set(TASKS_KEY, "{\"version\": 9, \"records\": []}")
        .expect("seed write should run");

    let board = TaskBoard::load(&store);
    assert!(board.is_empty());
}
