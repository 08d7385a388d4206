//! Versioned document collections.

use std::hash::Hash;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use haulhub_commons::{CommonError, Result};

/// How many times an optimistic update is retried before giving up.
/// Contention here is per-document and short-lived, so a handful of
/// attempts is plenty.
const MAX_CAS_ATTEMPTS: usize = 8;

#[derive(Debug, Clone)]
struct Versioned<V> {
    version: u64,
    value: V,
}

enum CasFailure {
    Missing,
    Stale,
}

/// An in-memory document collection with optimistic concurrency.
///
/// Every stored document carries a version counter. `compare_and_swap` only
/// applies a write when the caller observed the current version, and
/// [`Collection::update_with`] wraps that in a bounded re-read/re-validate
/// loop. Two racing transitions on one document therefore resolve to exactly
/// one winner; the loser re-validates against the winner's state.
pub struct Collection<K, V> {
    name: &'static str,
    docs: DashMap<K, Versioned<V>>,
}

impl<K, V> Collection<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// `name` is the singular entity name, used in error messages
    /// ("booking not found").
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            docs: DashMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Inserts a new document at version 1. Ids are minted fresh, so a
    /// duplicate key is a conflict, not an upsert.
    pub fn insert(&self, key: K, value: V) -> Result<()> {
        match self.docs.entry(key) {
            Entry::Occupied(_) => Err(CommonError::conflict(format!(
                "{} already exists",
                self.name
            ))),
            Entry::Vacant(slot) => {
                slot.insert(Versioned { version: 1, value });
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.docs.get(key).map(|doc| doc.value.clone())
    }

    fn get_versioned(&self, key: &K) -> Option<(V, u64)> {
        self.docs.get(key).map(|doc| (doc.value.clone(), doc.version))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.docs.contains_key(key)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.docs.remove(key).map(|(_, doc)| doc.value)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Clones all documents out. Collections are small enough that scans
    /// materialize rather than stream.
    pub fn values(&self) -> Vec<V> {
        self.docs.iter().map(|doc| doc.value.clone()).collect()
    }

    /// Clones out the documents matching `pred`.
    pub fn filter(&self, mut pred: impl FnMut(&V) -> bool) -> Vec<V> {
        self.docs
            .iter()
            .filter(|doc| pred(&doc.value))
            .map(|doc| doc.value.clone())
            .collect()
    }

    fn compare_and_swap(&self, key: &K, expected: u64, value: V) -> std::result::Result<u64, CasFailure> {
        match self.docs.get_mut(key) {
            None => Err(CasFailure::Missing),
            Some(mut doc) => {
                if doc.version != expected {
                    return Err(CasFailure::Stale);
                }
                doc.version += 1;
                doc.value = value;
                Ok(doc.version)
            }
        }
    }

    /// Read-validate-write with bounded retries.
    ///
    /// `f` sees the current document and either returns the replacement or
    /// rejects the transition. On a lost race the closure runs again against
    /// the winner's state, so domain rules (duplicate bid, illegal status)
    /// are re-checked rather than blindly re-applied.
    pub fn update_with(&self, key: &K, mut f: impl FnMut(&V) -> Result<V>) -> Result<V> {
        for _ in 0..MAX_CAS_ATTEMPTS {
            let Some((current, version)) = self.get_versioned(key) else {
                return Err(CommonError::not_found(format!("{} not found", self.name)));
            };
            let next = f(&current)?;
            match self.compare_and_swap(key, version, next.clone()) {
                Ok(_) => return Ok(next),
                Err(CasFailure::Stale) => continue,
                Err(CasFailure::Missing) => {
                    return Err(CommonError::not_found(format!("{} not found", self.name)))
                }
            }
        }
        Err(CommonError::conflict(format!(
            "{} is being modified concurrently, please retry",
            self.name
        )))
    }

    /// Snapshot of all documents, for persistence.
    pub fn dump(&self) -> Vec<V> {
        self.values()
    }

    /// Replaces the collection contents from a snapshot.
    pub fn restore(&self, items: Vec<V>, key_of: impl Fn(&V) -> K) {
        self.docs.clear();
        for item in items {
            let key = key_of(&item);
            self.docs.insert(key, Versioned { version: 1, value: item });
        }
    }
}
