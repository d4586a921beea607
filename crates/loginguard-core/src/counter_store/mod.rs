//! Durable storage of the three rate-limit counters.

mod redis_store;

pub use redis_store::RedisCounterStore;

use async_trait::async_trait;

use crate::error::Result;

/// Storage seam for the fixed-window rate-limit counters.
///
/// Keys are opaque strings (see `model::counter_key`) — this trait knows
/// nothing about logins, passwords, or IPs, only namespaced counters.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increment `key` and return its new value. A key that
    /// does not yet exist starts at zero before the increment.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Force `key` to `value`, creating it if absent.
    async fn set(&self, key: &str, value: i64) -> Result<()>;

    /// Reset every counter in the store to empty. This is a full-store
    /// operation, not a per-key one — the fixed-window reset clears all
    /// three dimensions at once.
    async fn flush(&self) -> Result<()>;
}
