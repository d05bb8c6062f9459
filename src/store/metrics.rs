//! Store Metrics Module
//!
//! Lock-free counters for store activity. Counters live outside the store
//! lock so the read path can record hits and misses while holding only
//! the shared lock.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Metrics ==
/// Activity counters, updated with relaxed atomics.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Successful retrievals
    hits: AtomicU64,
    /// Failed retrievals (absent or expired)
    misses: AtomicU64,
    /// Expired entries discovered lazily on the read path
    lazy_expired: AtomicU64,
    /// Entries physically removed by the reaper
    reaped: AtomicU64,
}

impl Metrics {
    /// Creates a new set of counters, all zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lazy_expired(&self) {
        self.lazy_expired.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reaped(&self, count: u64) {
        self.reaped.fetch_add(count, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Consistent-enough point-in-time copy of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            lazy_expired: self.lazy_expired.load(Ordering::Relaxed),
            reaped: self.reaped.load(Ordering::Relaxed),
        }
    }
}

// == Metrics Snapshot ==
/// Plain counter values, as read at one instant.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MetricsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub lazy_expired: u64,
    pub reaped: u64,
}

impl MetricsSnapshot {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any retrieval.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
