//! Fixed-window rate limiting over the three counter dimensions.

use std::sync::Arc;

use crate::counter_store::CounterStore;
use crate::error::Result;
use crate::model::{counter_key, CounterDimension};

/// Per-dimension thresholds. A counter dimension trips once its value
/// strictly exceeds the configured limit for that dimension.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub login_limit: i64,
    pub password_limit: i64,
    pub ip_limit: i64,
}

impl RateLimitConfig {
    fn limit_for(self, dim: CounterDimension) -> i64 {
        match dim {
            CounterDimension::Login => self.login_limit,
            CounterDimension::Password => self.password_limit,
            CounterDimension::Ip => self.ip_limit,
        }
    }
}

/// Wraps a `CounterStore` with the thresholds that decide whether an
/// incremented counter trips the limit.
pub struct RateLimiter {
    store: Arc<dyn CounterStore>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn CounterStore>, config: RateLimitConfig) -> Self {
        Self { store, config }
    }

    /// Increment the counter for `(dim, tag)` and report whether it is
    /// still within `dim`'s configured limit.
    pub async fn check(&self, dim: CounterDimension, tag: &str) -> Result<bool> {
        let key = counter_key(dim, tag);
        let value = self.store.incr(&key).await?;
        Ok(value <= self.config.limit_for(dim))
    }

    /// Reset the login counter for `tag` to zero.
    ///
    /// Only login and IP counters are individually resettable — the
    /// wire contract never exposes a per-password reset, matching the
    /// original's `clearbucketbylogin`/`clearbucketbyip` pair with no
    /// password equivalent.
    pub async fn reset_login(&self, tag: &str) -> Result<()> {
        self.store.set(&counter_key(CounterDimension::Login, tag), 0).await
    }

    /// Reset the IP counter for `tag` to zero.
    pub async fn reset_ip(&self, tag: &str) -> Result<()> {
        self.store.set(&counter_key(CounterDimension::Ip, tag), 0).await
    }
}
