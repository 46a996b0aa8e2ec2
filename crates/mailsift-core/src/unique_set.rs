//! Concurrent insert-deduplicating set over string keys.
//!
//! `add` runs the membership test and the insert inside one critical
//! section, so exactly one of any number of racing adders wins for a
//! given key.

use std::sync::Mutex;

use rustc_hash::FxHashSet;

/// Membership-only set with interior mutability, shared by reference
/// across the tasks of one stage.
#[derive(Default)]
pub struct UniqueSet {
    keys: Mutex<FxHashSet<String>>,
}

impl UniqueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` if absent. Returns true only for the insert that won.
    pub fn add(&self, key: &str) -> bool {
        let mut keys = self.keys.lock().expect("unique set lock poisoned");
        if keys.contains(key) {
            return false;
        }
        keys.insert(key.to_string())
    }

    /// Pure membership query.
    pub fn contains(&self, key: &str) -> bool {
        self.keys
            .lock()
            .expect("unique set lock poisoned")
            .contains(key)
    }

    /// Number of distinct keys recorded so far.
    pub fn len(&self) -> usize {
        self.keys.lock().expect("unique set lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
