//! Hoard - An in-memory expiring key-value cache served over HTTP
//!
//! The core is an expiring store: a versioned entry table paired with a
//! deadline-ordered expiration index, kept consistent under one lock,
//! with a background reaper reclaiming expired entries.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use store::ExpiringStore;
pub use tasks::spawn_reaper;
