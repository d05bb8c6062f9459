//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Reaper: removes expired entries from the table and index at
//!   configured intervals and drains the lazy-expiration queue

mod reaper;

pub use reaper::spawn_reaper;
