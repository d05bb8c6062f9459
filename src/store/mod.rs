//! Store Module
//!
//! In-process expiring key-value store: entry table, expiration index,
//! and the facade that keeps both consistent under one lock.

mod entry;
mod facade;
mod index;
mod metrics;
mod table;


// Re-export public types
pub use entry::Entry;
pub use facade::{ExpiringStore, StaleRef, DEMO_KEY, DEMO_VALUE};
pub use index::ExpirationIndex;
pub use metrics::{Metrics, MetricsSnapshot};
pub use table::{EntryTable, Lookup};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
