//! Periodic full reset of the rate-limit counter store.
//!
//! Grounded on the daemon's cooperative shutdown via
//! `tokio_util::sync::CancellationToken`, borrowed here since the
//! teacher's own services only ever run to completion rather than on a
//! cancellable interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::counter_store::CounterStore;

/// Drives `CounterStore::flush` on a fixed interval until stopped.
///
/// Only one schedule may run at a time; calling `start` while already
/// running is a no-op that returns the existing handle's cancellation
/// token unchanged.
pub struct FlushScheduler {
    store: Arc<dyn CounterStore>,
    interval: Duration,
    handle: Option<(JoinHandle<()>, CancellationToken)>,
}

impl FlushScheduler {
    pub fn new(store: Arc<dyn CounterStore>, interval: Duration) -> Self {
        Self { store, interval, handle: None }
    }

    /// Begin the periodic flush loop. Idempotent while already running.
    pub fn start(&mut self) {
        if self.handle.is_some() {
            return;
        }
        let token = CancellationToken::new();
        let child_token = token.clone();
        let store = self.store.clone();
        let interval = self.interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = child_token.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(err) = store.flush().await {
                            tracing::error!(error = %err, "scheduled counter flush failed");
                        } else {
                            tracing::info!("flushed rate-limit counters");
                        }
                    }
                }
            }
        });

        self.handle = Some((task, token));
    }

    /// Signal the loop to stop and wait for it to finish. A no-op if not
    /// running.
    pub async fn stop(&mut self) {
        if let Some((task, token)) = self.handle.take() {
            token.cancel();
            let _ = task.await;
        }
    }

    /// Whether the periodic loop is currently running.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingStore {
        flushes: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CounterStore for CountingStore {
        async fn incr(&self, _key: &str) -> crate::error::Result<i64> {
            Ok(0)
        }
        async fn set(&self, _key: &str, _value: i64) -> crate::error::Result<()> {
            Ok(())
        }
        async fn flush(&self) -> crate::error::Result<()> {
            self.flushes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn start_is_idempotent_and_stop_joins_the_task() {
        let flushes = Arc::new(AtomicUsize::new(0));
        let store = Arc::new(CountingStore { flushes: flushes.clone() });
        let mut scheduler = FlushScheduler::new(store, Duration::from_millis(10));

        scheduler.start();
        assert!(scheduler.is_running());
        scheduler.start();

        tokio::time::sleep(Duration::from_millis(35)).await;
        scheduler.stop().await;
        assert!(!scheduler.is_running());
        assert!(flushes.load(Ordering::SeqCst) >= 2);
    }
}
