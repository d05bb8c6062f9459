//! Reaper Task
//!
//! Background task that physically removes expired entries. Reaping is
//! best-effort: a delayed pass only postpones memory reclamation, the
//! read-time liveness check keeps expired values unobservable either way.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info};

use crate::store::{ExpiringStore, StaleRef};

/// Spawns the background reaper for `store`.
///
/// Two sources feed it: a periodic tick that drains the expiration index,
/// and the queue of entries the read paths found already expired. Both
/// are processed in batches of at most `batch_size` keys per write-lock
/// acquisition, and every removal is version-guarded so a concurrent
/// overwrite is never deleted.
///
/// # Arguments
/// * `store` - Shared store handle
/// * `stale_rx` - Receiving end of the store's stale-entry queue
/// * `interval_secs` - Seconds between periodic reap passes
/// * `batch_size` - Maximum keys removed per lock acquisition
///
/// # Returns
/// A JoinHandle used to abort the task during graceful shutdown. State
/// mutation happens synchronously under the store lock, so aborting
/// between batches cannot leave the table and index inconsistent.
pub fn spawn_reaper(
    store: ExpiringStore,
    mut stale_rx: mpsc::UnboundedReceiver<StaleRef>,
    interval_secs: u64,
    batch_size: usize,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting reaper task with interval of {} seconds, batch size {}",
            interval_secs, batch_size
        );

        let mut ticker = interval(Duration::from_secs(interval_secs.max(1)));
        // The first tick completes immediately; skip it so the store
        // starts empty-handed instead of reaping at boot.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    reap_pass(&store, batch_size).await;
                }
                received = stale_rx.recv() => {
                    let Some(first) = received else {
                        // Every sender is gone; periodic passes still
                        // cover whatever the index knows about.
                        break;
                    };
                    let mut batch = vec![first];
                    while batch.len() < batch_size {
                        match stale_rx.try_recv() {
                            Ok(stale) => batch.push(stale),
                            Err(_) => break,
                        }
                    }
                    let removed = store.remove_stale(&batch).await;
                    debug!(
                        "Removed {} of {} lazily discovered entries",
                        removed,
                        batch.len()
                    );
                }
            }
        }

        loop {
            ticker.tick().await;
            reap_pass(&store, batch_size).await;
        }
    })
}

/// One periodic pass over the expiration index.
async fn reap_pass(store: &ExpiringStore, batch_size: usize) {
    let removed = store.reap_expired(batch_size).await;
    if removed > 0 {
        info!("Reaped {} expired entries", removed);
    } else {
        debug!("Reap pass found nothing due");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn b(s: &str) -> Bytes {
        Bytes::copy_from_slice(s.as_bytes())
    }

    #[tokio::test]
    async fn test_reaper_removes_expired_entries() {
        let (store, stale_rx) = ExpiringStore::new(Duration::from_secs(300));

        store
            .set("expire_soon", b("value"), Some(Duration::from_secs(1)))
            .await
            .unwrap();

        let handle = spawn_reaper(store.clone(), stale_rx, 1, 64);

        // Wait for the entry to expire and a pass to run.
        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert!(store.get("expire_soon").await.is_err());
        // Physically reclaimed, not just logically absent.
        assert_eq!(store.len().await, 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_reaper_preserves_valid_entries() {
        let (store, stale_rx) = ExpiringStore::new(Duration::from_secs(300));

        store
            .set("long_lived", b("value"), Some(Duration::from_secs(3600)))
            .await
            .unwrap();
        store.set("forever", b("value"), None).await.unwrap();

        let handle = spawn_reaper(store.clone(), stale_rx, 1, 64);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(store.get("long_lived").await.unwrap(), b("value"));
        assert_eq!(store.get("forever").await.unwrap(), b("value"));
        assert_eq!(store.len().await, 2);

        handle.abort();
    }

    #[tokio::test]
    async fn test_reaper_drains_stale_queue() {
        let (store, stale_rx) = ExpiringStore::new(Duration::from_secs(300));

        // Long reap interval: only the stale queue can reclaim this.
        let handle = spawn_reaper(store.clone(), stale_rx, 3600, 64);

        store
            .set("soon", b("value"), Some(Duration::ZERO))
            .await
            .unwrap();
        let _ = store.get("soon").await;

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(store.len().await, 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_reaper_can_be_aborted() {
        let (store, stale_rx) = ExpiringStore::new(Duration::from_secs(300));

        let handle = spawn_reaper(store, stale_rx, 1, 64);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
