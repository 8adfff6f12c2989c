//! Request-scoped value cache.
//!
//! Generated fields are cached under `(key, namespace)`. The cache is a
//! best-effort memory layer: a host may back it with anything, and a miss
//! only means the value is generated again.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

pub trait Cache {
    fn get(&self, key: &str, namespace: &str) -> Option<String>;

    /// Store `value`. Returns `false` when the key exists and `overwrite` is
    /// off.
    fn set(&self, key: &str, value: String, namespace: &str, overwrite: bool) -> bool;
}

/// Single-request in-memory cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RefCell<FxHashMap<(String, String), String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str, namespace: &str) -> Option<String> {
        self.entries
            .borrow()
            .get(&(namespace.to_owned(), key.to_owned()))
            .cloned()
    }

    fn set(&self, key: &str, value: String, namespace: &str, overwrite: bool) -> bool {
        let mut entries = self.entries.borrow_mut();
        let slot = (namespace.to_owned(), key.to_owned());
        if !overwrite && entries.contains_key(&slot) {
            return false;
        }
        entries.insert(slot, value);
        true
    }
}

/// A cache that never stores anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl Cache for NoCache {
    fn get(&self, _key: &str, _namespace: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: String, _namespace: &str, _overwrite: bool) -> bool {
        false
    }
}
