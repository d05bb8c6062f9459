//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query parameters and serializing HTTP response bodies.

pub mod params;
pub mod responses;

// Re-export commonly used types
pub use params::{SetParams, SetWithExpirationParams};
pub use responses::{
    DeleteResponse, ErrorResponse, GetResponse, HealthResponse, SetResponse, StatsResponse,
};
