//! Expiration Index Module
//!
//! Secondary index ordered by `(expires_at, key)` so the reaper can find
//! the next entries to expire without scanning the whole table. The index
//! holds keys, deadlines, and scheduled versions only, never values.

use std::collections::{BTreeSet, HashMap};

// == Scheduled ==
/// Bookkeeping for one scheduled key.
#[derive(Debug, Clone, Copy)]
struct Scheduled {
    /// Deadline in Unix milliseconds
    deadline: u64,
    /// Table version of the entry at scheduling time
    version: u64,
}

// == Expiration Index ==
/// Ordered view of every TTL-bearing key.
///
/// Ties on equal deadlines break deterministically by key, via the
/// `(deadline, key)` ordering of the set.
#[derive(Debug, Default)]
pub struct ExpirationIndex {
    /// Keys ordered by deadline, then key
    by_deadline: BTreeSet<(u64, String)>,
    /// Current schedule per key; at most one slot per key
    by_key: HashMap<String, Scheduled>,
}

impl ExpirationIndex {
    // == Constructor ==
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    // == Schedule ==
    /// Inserts or moves `key` to the position for `deadline`.
    ///
    /// A key is scheduled at most once; re-scheduling removes the old slot
    /// first so the index always reflects the entry's current deadline.
    pub fn schedule(&mut self, key: String, deadline: u64, version: u64) {
        if let Some(old) = self.by_key.remove(&key) {
            self.by_deadline.remove(&(old.deadline, key.clone()));
        }
        self.by_deadline.insert((deadline, key.clone()));
        self.by_key.insert(key, Scheduled { deadline, version });
    }

    // == Unschedule ==
    /// Removes the key's slot, if any. Returns whether one existed.
    ///
    /// Used on delete and when an overwrite clears the TTL.
    pub fn unschedule(&mut self, key: &str) -> bool {
        match self.by_key.remove(key) {
            Some(old) => {
                self.by_deadline.remove(&(old.deadline, key.to_string()));
                true
            }
            None => false,
        }
    }

    // == Pop Expired ==
    /// Lazy sequence of every key whose deadline is at or before `now`,
    /// removed from the index as it is yielded.
    ///
    /// The sequence is finite and restartable: yielded keys are gone, so a
    /// later call picks up exactly where this one stopped. Reaper-only;
    /// the read and write paths rely on the lazy liveness check instead.
    pub fn pop_expired(&mut self, now: u64) -> PopExpired<'_> {
        PopExpired { index: self, now }
    }

    // == Length ==
    /// Number of scheduled keys.
    pub fn len(&self) -> usize {
        self.by_deadline.len()
    }

    /// Returns true if no key is scheduled.
    pub fn is_empty(&self) -> bool {
        self.by_deadline.is_empty()
    }

    /// Deadline currently recorded for `key`, if scheduled.
    #[cfg(test)]
    pub fn deadline_of(&self, key: &str) -> Option<u64> {
        self.by_key.get(key).map(|s| s.deadline)
    }
}

// == Pop Expired Iterator ==
/// Iterator returned by [`ExpirationIndex::pop_expired`].
///
/// Yields `(key, scheduled_version)` pairs in deadline order.
pub struct PopExpired<'a> {
    index: &'a mut ExpirationIndex,
    now: u64,
}

impl Iterator for PopExpired<'_> {
    type Item = (String, u64);

    fn next(&mut self) -> Option<Self::Item> {
        match self.index.by_deadline.first() {
            Some((deadline, _)) if *deadline <= self.now => {}
            _ => return None,
        }
        let (_, key) = self.index.by_deadline.pop_first()?;
        let scheduled = self.index.by_key.remove(&key)?;
        Some((key, scheduled.version))
    }
}
