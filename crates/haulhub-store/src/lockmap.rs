//! Per-key mutexes.
//!
//! Slot-conflict checking must be serialized against concurrent booking
//! creation for the same driver; a lazily allocated mutex per driver id
//! scopes that critical section without any cross-entity locking.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

/// Lazily allocated `Mutex` per key. Locks are never reclaimed; the key
/// space (driver ids) is small and bounded.
pub struct LockMap<K> {
    locks: DashMap<K, Arc<Mutex<()>>>,
}

impl<K> LockMap<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Returns the mutex for `key`, creating it on first use.
    pub fn get(&self, key: &K) -> Arc<Mutex<()>> {
        self.locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl<K> Default for LockMap<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
