//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Implement `KvStore` over the migrated `kv_entries` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `set` is a full-payload upsert; `updated_at` tracks the last write.
//! - Construction fails on an unmigrated connection instead of failing
//!   lazily on first use.

use super::migrations::{current_user_version, latest_version};
use super::{KvStore, StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Production `KvStore` over a migrated SQLite connection.
#[derive(Debug)]
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Creates a store from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
