//! Store Facade Module
//!
//! Public operation surface of the expiring store. Coordinates the entry
//! table and the expiration index under a single lock so that a
//! concurrent reader can never observe the two disagreeing about a key,
//! and hands stale records discovered on the read path to the reaper
//! through an unbounded queue.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::{mpsc, RwLock};
use tracing::trace;

use crate::error::{Result, StoreError};
use crate::store::entry::now_ms;
use crate::store::index::ExpirationIndex;
use crate::store::metrics::{Metrics, MetricsSnapshot};
use crate::store::table::{EntryTable, Lookup};
use crate::store::{MAX_KEY_LENGTH, MAX_VALUE_SIZE};

// == Demo Entry ==
/// Key written by [`ExpiringStore::set_default`].
pub const DEMO_KEY: &str = "SampleKey";

/// Value written by [`ExpiringStore::set_default`].
pub const DEMO_VALUE: &str = "Hello from Hoard!";

// == Stale Ref ==
/// Reference to an entry found expired on the read path.
///
/// Carries the version observed at discovery time; the reaper removes the
/// entry only while that version is still current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleRef {
    pub key: String,
    pub version: u64,
}

// == Store Inner ==
/// Table and index, guarded together.
///
/// Both structures mutate only under the write half of the same lock, so
/// a TTL-changing write moves the index slot atomically with the table
/// entry.
#[derive(Debug, Default)]
struct StoreInner {
    table: EntryTable,
    index: ExpirationIndex,
}

// == Expiring Store ==
/// Shared handle to the expiring key-value store.
///
/// Cheap to clone; all clones operate on the same underlying state.
#[derive(Clone)]
pub struct ExpiringStore {
    inner: Arc<RwLock<StoreInner>>,
    metrics: Arc<Metrics>,
    stale_tx: mpsc::UnboundedSender<StaleRef>,
    default_ttl: Duration,
}

impl ExpiringStore {
    // == Constructor ==
    /// Creates a store and the receiving end of its stale-entry queue.
    ///
    /// The receiver belongs to the reaper task; dropping it is safe and
    /// only delays physical reclamation of lazily-discovered entries.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL applied by [`ExpiringStore::set_default`]
    pub fn new(default_ttl: Duration) -> (Self, mpsc::UnboundedReceiver<StaleRef>) {
        let (stale_tx, stale_rx) = mpsc::unbounded_channel();
        let store = Self {
            inner: Arc::new(RwLock::new(StoreInner::default())),
            metrics: Arc::new(Metrics::new()),
            stale_tx,
            default_ttl,
        };
        (store, stale_rx)
    }

    /// TTL used for writes without an explicit expiration.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// Takes only the shared lock. An entry whose deadline has passed is
    /// treated as absent and queued for the reaper rather than removed
    /// here, keeping reads free of table mutation.
    pub async fn get(&self, key: &str) -> Result<Bytes> {
        let now = now_ms();
        let inner = self.inner.read().await;
        match inner.table.get(key, now) {
            Lookup::Hit(entry) => {
                self.metrics.record_hit();
                Ok(entry.value.clone())
            }
            Lookup::Expired { version } => {
                self.metrics.record_miss();
                self.metrics.record_lazy_expired();
                self.queue_stale(key.to_string(), version);
                Err(StoreError::NotFound(key.to_string()))
            }
            Lookup::Miss => {
                self.metrics.record_miss();
                Err(StoreError::NotFound(key.to_string()))
            }
        }
    }

    // == Exists ==
    /// Same liveness semantics as [`ExpiringStore::get`], without the value.
    pub async fn exists(&self, key: &str) -> bool {
        let now = now_ms();
        let inner = self.inner.read().await;
        match inner.table.get(key, now) {
            Lookup::Hit(_) => true,
            Lookup::Expired { version } => {
                self.metrics.record_lazy_expired();
                self.queue_stale(key.to_string(), version);
                false
            }
            Lookup::Miss => false,
        }
    }

    // == Set ==
    /// Inserts or replaces the entry for `key`.
    ///
    /// A TTL of `None` means the entry never expires. The table write and
    /// the index move happen under one write-lock acquisition.
    ///
    /// # Errors
    /// [`StoreError::InvalidArgument`] on empty or oversized key/value.
    pub async fn set(&self, key: impl Into<String>, value: Bytes, ttl: Option<Duration>) -> Result<()> {
        let key = key.into();
        if key.is_empty() {
            return Err(StoreError::InvalidArgument("Key cannot be empty".to_string()));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(StoreError::InvalidArgument(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        if value.is_empty() {
            return Err(StoreError::InvalidArgument("Value cannot be empty".to_string()));
        }
        if value.len() > MAX_VALUE_SIZE {
            return Err(StoreError::InvalidArgument(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        let mut inner = self.inner.write().await;
        let StoreInner { table, index } = &mut *inner;
        let (version, expires_at) = table.put(key.clone(), value, ttl);
        match expires_at {
            Some(deadline) => index.schedule(key, deadline, version),
            None => {
                // Overwrite may have cleared a previous TTL.
                index.unschedule(&key);
            }
        }
        Ok(())
    }

    // == Set Default ==
    /// Writes the fixed demonstration entry with the default TTL.
    pub async fn set_default(&self) -> Result<()> {
        self.set(
            DEMO_KEY,
            Bytes::from_static(DEMO_VALUE.as_bytes()),
            Some(self.default_ttl),
        )
        .await
    }

    // == Delete ==
    /// Removes the entry for `key`.
    ///
    /// An entry whose deadline has passed counts as absent; it is
    /// reclaimed on the spot (the write lock is already held) but the
    /// caller still sees `NotFound`.
    pub async fn delete(&self, key: &str) -> Result<()> {
        let now = now_ms();
        let mut inner = self.inner.write().await;
        match inner.table.remove(key) {
            Some(entry) if entry.is_live(now) => {
                inner.index.unschedule(key);
                Ok(())
            }
            Some(_) => {
                inner.index.unschedule(key);
                self.metrics.record_lazy_expired();
                Err(StoreError::NotFound(key.to_string()))
            }
            None => Err(StoreError::NotFound(key.to_string())),
        }
    }

    // == Length ==
    /// Number of physically present entries, expired-but-unreaped included.
    pub async fn len(&self) -> usize {
        self.inner.read().await.table.len()
    }

    /// Returns true if no entries are physically present.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.table.is_empty()
    }

    // == Metrics ==
    /// Point-in-time copy of the activity counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    // == Reap Expired ==
    /// Drains every due key from the expiration index and removes the
    /// matching table entries, in batches of at most `max_batch` per
    /// write-lock acquisition.
    ///
    /// Returns the number of entries removed. Called by the reaper task;
    /// exposed on the store so tests can drive reaping deterministically.
    pub async fn reap_expired(&self, max_batch: usize) -> usize {
        let max_batch = max_batch.max(1);
        let mut total: usize = 0;
        loop {
            let now = now_ms();
            let drained = {
                let mut inner = self.inner.write().await;
                let StoreInner { table, index } = &mut *inner;
                let batch: Vec<(String, u64)> = index.pop_expired(now).take(max_batch).collect();
                let drained = batch.len();
                for (key, version) in batch {
                    if table.remove_if_version(&key, version) {
                        total += 1;
                    } else {
                        trace!(key = %key, "entry rewritten since scheduling, skipping");
                    }
                }
                drained
            };
            if drained < max_batch {
                break;
            }
            // Let writers in between batches.
            tokio::task::yield_now().await;
        }
        if total > 0 {
            self.metrics.record_reaped(total as u64);
        }
        total
    }

    // == Remove Stale ==
    /// Removes entries previously discovered expired on the read path.
    ///
    /// Each removal is guarded by the version captured at discovery: if
    /// the key was rewritten in the meantime, the newer value stays.
    pub async fn remove_stale(&self, refs: &[StaleRef]) -> usize {
        if refs.is_empty() {
            return 0;
        }
        let mut removed: usize = 0;
        {
            let mut inner = self.inner.write().await;
            let StoreInner { table, index } = &mut *inner;
            for stale in refs {
                if table.remove_if_version(&stale.key, stale.version) {
                    index.unschedule(&stale.key);
                    removed += 1;
                }
            }
        }
        if removed > 0 {
            self.metrics.record_reaped(removed as u64);
        }
        removed
    }

    fn queue_stale(&self, key: String, version: u64) {
        // The reaper may already be gone during shutdown; reclamation is
        // best-effort, correctness comes from the liveness check.
        let _ = self.stale_tx.send(StaleRef { key, version });
    }

    /// Asserts the table/index bijection: every TTL-bearing table entry
    /// has exactly one index slot at its current deadline, and nothing
    /// else is scheduled.
    #[cfg(test)]
    pub(crate) async fn assert_index_consistent(&self) {
        let inner = self.inner.read().await;
        let mut scheduled = 0;
        for (key, entry) in inner.table.iter() {
            match entry.expires_at {
                Some(deadline) => {
                    scheduled += 1;
                    assert_eq!(
                        inner.index.deadline_of(key),
                        Some(deadline),
                        "index slot mismatch for {}",
                        key
                    );
                }
                None => assert_eq!(inner.index.deadline_of(key), None),
            }
        }
        assert_eq!(inner.index.len(), scheduled);
    }
}
