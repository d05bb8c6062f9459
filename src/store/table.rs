//! Entry Table Module
//!
//! Owning map from key to [`Entry`]. Every write stamps the entry with a
//! monotonically increasing version so that a removal scheduled under an
//! old version can never delete a value written after it.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;

use crate::store::entry::Entry;

// == Lookup ==
/// Outcome of a read against the table.
///
/// Expired entries are reported, not removed: the read path stays free of
/// table mutation, and the caller queues the stale record for the reaper.
#[derive(Debug)]
pub enum Lookup<'a> {
    /// A live entry
    Hit(&'a Entry),
    /// The key is physically present but its deadline has passed
    Expired {
        /// Version of the stale entry, for the version-guarded removal
        version: u64,
    },
    /// The key is not present
    Miss,
}

// == Entry Table ==
/// Key-value storage with per-write versioning.
#[derive(Debug, Default)]
pub struct EntryTable {
    /// Key-value storage
    entries: HashMap<String, Entry>,
    /// Last version handed out; incremented on every put
    version: u64,
}

impl EntryTable {
    // == Constructor ==
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    // == Put ==
    /// Inserts or replaces the entry for `key`, returning the version
    /// assigned to the write and the deadline computed from `ttl`.
    ///
    /// Replacing an entry resets both value and deadline; the new version
    /// invalidates any removal still pending under the old one.
    pub fn put(&mut self, key: String, value: Bytes, ttl: Option<Duration>) -> (u64, Option<u64>) {
        self.version += 1;
        let entry = Entry::new(value, ttl, self.version);
        let expires_at = entry.expires_at;
        self.entries.insert(key, entry);
        (self.version, expires_at)
    }

    // == Get ==
    /// Looks up `key`, applying the liveness check.
    ///
    /// # Arguments
    /// * `key` - The key to look up
    /// * `now` - Current time in Unix milliseconds
    pub fn get(&self, key: &str, now: u64) -> Lookup<'_> {
        match self.entries.get(key) {
            Some(entry) if entry.is_live(now) => Lookup::Hit(entry),
            Some(entry) => Lookup::Expired {
                version: entry.version,
            },
            None => Lookup::Miss,
        }
    }

    // == Exists ==
    /// Same liveness check as [`EntryTable::get`], without borrowing the entry.
    pub fn exists(&self, key: &str, now: u64) -> bool {
        matches!(self.get(key, now), Lookup::Hit(_))
    }

    // == Remove ==
    /// Removes the entry unconditionally, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        self.entries.remove(key)
    }

    // == Remove If Version ==
    /// Removes the entry only if its current version matches `version`.
    ///
    /// Used by the reaper: a concurrent overwrite bumps the version, so a
    /// stale removal reference becomes a no-op instead of deleting the
    /// newer value.
    pub fn remove_if_version(&mut self, key: &str, version: u64) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.version == version => {
                self.entries.remove(key);
                true
            }
            _ => false,
        }
    }

    // == Length ==
    /// Number of physically present entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are physically present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all physically present entries.
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Entry)> {
        self.entries.iter()
    }
}
