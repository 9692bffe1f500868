//! Durable key-value storage boundary.
//!
//! # Responsibility
//! - Define the `KvStore` contract consumed by the domain collections.
//! - Open and configure SQLite connections backing the production store.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Domain code never touches SQL; it reads and writes opaque string
//!   payloads through `KvStore`.
//! - Writes are synchronous; last writer wins across processes.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
pub mod migrations;
mod open;
pub mod snapshot;
mod sqlite;

pub use memory::MemoryKvStore;
pub use open::{open_db, open_db_in_memory};
pub use sqlite::SqliteKvStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from the storage boundary.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// Database schema is newer than this binary supports.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Connection handed to the store has not been migrated.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store requires schema version {expected_version}, got {actual_version}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Durable, synchronous, string-keyed storage contract.
///
/// One key holds one serialized collection snapshot. `set` replaces the
/// whole payload; there is no partial update and no cross-key transaction.
pub trait KvStore {
    /// Reads the payload stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous payload.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}
