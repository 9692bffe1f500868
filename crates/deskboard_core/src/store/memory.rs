//! In-memory key-value store for tests and the CLI smoke probe.

use super::{KvStore, StoreResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Non-durable `KvStore` backed by a plain map.
///
/// Interior mutability is a `RefCell`: every core mutation runs to
/// completion on one thread, so borrows never overlap.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw payload under `key`, bypassing the snapshot codec.
    ///
    /// Lets tests stage legacy or corrupt payloads exactly as an older
    /// build would have written them.
    pub fn seed_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
