//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. Each handler
//! translates path/query parameters into a store facade call and the
//! result into a JSON body, leaving all cache semantics to the store.

use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use bytes::Bytes;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, SetParams, SetResponse, SetWithExpirationParams,
    StatsResponse,
};
use crate::store::{ExpiringStore, StaleRef, DEMO_KEY};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared store handle
    pub store: ExpiringStore,
}

impl AppState {
    /// Creates a new AppState around an existing store handle.
    pub fn new(store: ExpiringStore) -> Self {
        Self { store }
    }

    /// Creates the state and the stale-entry receiver from configuration.
    ///
    /// The receiver must be handed to the reaper task.
    pub fn from_config(config: &Config) -> (Self, tokio::sync::mpsc::UnboundedReceiver<StaleRef>) {
        let (store, stale_rx) = ExpiringStore::new(config.default_ttl());
        (Self::new(store), stale_rx)
    }
}

/// Handler for GET /cache/:key
///
/// Retrieves a value from the cache by key. Expired keys are
/// indistinguishable from absent ones.
pub async fn get_entry(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state.store.get(&key).await?;
    let value = String::from_utf8_lossy(&value).into_owned();

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for POST /cache
///
/// Stores a key-value pair with the default TTL.
pub async fn set_entry(
    State(state): State<AppState>,
    Query(params): Query<SetParams>,
) -> Result<Json<SetResponse>> {
    let (key, value) = params.into_parts().map_err(StoreError::InvalidArgument)?;
    let ttl = state.store.default_ttl();

    state
        .store
        .set(key.clone(), Bytes::from(value.into_bytes()), Some(ttl))
        .await?;

    Ok(Json(SetResponse::new(key, Some(ttl.as_secs()))))
}

/// Handler for POST /cache/setWithExpiration
///
/// Stores a key-value pair with an explicit TTL in seconds.
pub async fn set_entry_with_expiration(
    State(state): State<AppState>,
    Query(params): Query<SetWithExpirationParams>,
) -> Result<Json<SetResponse>> {
    let (key, value, ttl_secs) = params.into_parts().map_err(StoreError::InvalidArgument)?;
    let ttl = Duration::from_secs(ttl_secs);

    state
        .store
        .set(key.clone(), Bytes::from(value.into_bytes()), Some(ttl))
        .await?;

    Ok(Json(SetResponse::new(key, Some(ttl_secs))))
}

/// Handler for DELETE /cache/:key
///
/// Deletes a key from the cache.
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.store.delete(&key).await?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /cache/set-default
///
/// Writes the fixed demonstration entry with the default TTL.
pub async fn set_default(State(state): State<AppState>) -> Result<Json<SetResponse>> {
    state.store.set_default().await?;

    Ok(Json(SetResponse::new(
        DEMO_KEY,
        Some(state.store.default_ttl().as_secs()),
    )))
}

/// Handler for GET /stats
///
/// Returns current store activity counters.
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let snapshot = state.store.metrics();
    let entries = state.store.len().await;

    Json(StatsResponse::new(snapshot, entries))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
