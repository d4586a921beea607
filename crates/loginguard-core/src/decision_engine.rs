//! The six-step decision pipeline: blacklist, whitelist, then the three
//! rate-limit dimensions in order, falling through to `CLEAR`.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{EngineError, Result};
use crate::list_service::ListService;
use crate::model::{AuthRequest, CounterDimension, Decision, ListName, ReasonTag};
use crate::rate_limiter::RateLimiter;
use crate::subnet::SubnetMatcher;
use crate::validators::validate_auth_request;

/// How long a single storage round trip inside the pipeline may take
/// before the request fails with `EngineError::Timeout`.
const DEFAULT_REQUEST_DEADLINE: Duration = Duration::from_secs(5);

/// Orchestrates `ListService` and `RateLimiter` into the one decision
/// every inbound authentication attempt goes through.
pub struct DecisionEngine {
    lists: Arc<ListService>,
    limiter: Arc<RateLimiter>,
    request_deadline: Duration,
}

impl DecisionEngine {
    pub fn new(lists: Arc<ListService>, limiter: Arc<RateLimiter>) -> Self {
        Self { lists, limiter, request_deadline: DEFAULT_REQUEST_DEADLINE }
    }

    /// Override the per-call storage deadline (primarily for tests).
    pub fn with_request_deadline(mut self, deadline: Duration) -> Self {
        self.request_deadline = deadline;
        self
    }

    /// Validate `login`/`password`/`ip`, then run the six-step pipeline.
    pub async fn check_request(&self, login: &str, password: &str, ip: &str) -> Result<Decision> {
        let request = validate_auth_request(login, password, ip)?;
        self.decide(&request).await
    }

    async fn decide(&self, request: &AuthRequest) -> Result<Decision> {
        if self.deadline(self.in_list(ListName::Blacklist, request.ip)).await? {
            return Ok(Decision::new(ReasonTag::InBlacklist));
        }
        if self.deadline(self.in_list(ListName::Whitelist, request.ip)).await? {
            return Ok(Decision::new(ReasonTag::InWhitelist));
        }
        if !self.deadline(self.limiter.check(CounterDimension::Login, &request.login)).await? {
            return Ok(Decision::new(ReasonTag::RateLimitLogin));
        }
        if !self.deadline(self.limiter.check(CounterDimension::Password, &request.password)).await?
        {
            return Ok(Decision::new(ReasonTag::RateLimitPassword));
        }
        if !self
            .deadline(self.limiter.check(CounterDimension::Ip, &request.ip.to_string()))
            .await?
        {
            return Ok(Decision::new(ReasonTag::RateLimitIp));
        }
        Ok(Decision::new(ReasonTag::Clear))
    }

    async fn in_list(&self, list: ListName, ip: std::net::Ipv4Addr) -> Result<bool> {
        let entries = self.lists.get_all(list).await?;
        SubnetMatcher::contains(&entries, ip)
    }

    async fn deadline<T>(&self, fut: impl std::future::Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.request_deadline, fut).await.map_err(|_| EngineError::Timeout)?
    }

    /// Reset the login rate-limit counter for `tag`.
    pub async fn reset_login_counter(&self, tag: &str) -> Result<()> {
        self.limiter.reset_login(tag).await
    }

    /// Reset the IP rate-limit counter for `tag`.
    pub async fn reset_ip_counter(&self, tag: &str) -> Result<()> {
        self.limiter.reset_ip(tag).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter_store::CounterStore;
    use crate::list_repository::ListRepository;
    use crate::model::CidrEntry;
    use crate::rate_limiter::RateLimitConfig;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeRepository {
        whitelist: Mutex<Vec<(String, i32)>>,
        blacklist: Mutex<Vec<(String, i32)>>,
    }

    impl FakeRepository {
        fn side(&self, list: ListName) -> &Mutex<Vec<(String, i32)>> {
            match list {
                ListName::Whitelist => &self.whitelist,
                ListName::Blacklist => &self.blacklist,
            }
        }
    }

    #[async_trait]
    impl ListRepository for FakeRepository {
        async fn add(&self, list: ListName, network: &str, mask: i32) -> Result<i64> {
            let mut side = self.side(list).lock().unwrap();
            side.push((network.to_string(), mask));
            Ok(side.len() as i64)
        }

        async fn remove(&self, _list: ListName, _network: &str, _mask: i32) -> Result<()> {
            Ok(())
        }

        async fn contains(&self, list: ListName, network: &str, mask: i32) -> Result<bool> {
            let side = self.side(list).lock().unwrap();
            Ok(side.iter().any(|(n, m)| n == network && *m == mask))
        }

        async fn list(&self, list: ListName) -> Result<Vec<CidrEntry>> {
            let side = self.side(list).lock().unwrap();
            Ok(side
                .iter()
                .enumerate()
                .map(|(i, (n, m))| CidrEntry { id: i as i64 + 1, network: n.clone(), mask: *m })
                .collect())
        }
    }

    struct FakeStore {
        values: Mutex<HashMap<String, i64>>,
    }

    impl FakeStore {
        fn new() -> Self {
            Self { values: Mutex::new(HashMap::new()) }
        }
    }

    #[async_trait]
    impl CounterStore for FakeStore {
        async fn incr(&self, key: &str) -> Result<i64> {
            let mut values = self.values.lock().unwrap();
            let entry = values.entry(key.to_string()).or_insert(0);
            *entry += 1;
            Ok(*entry)
        }

        async fn set(&self, key: &str, value: i64) -> Result<()> {
            self.values.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }

        async fn flush(&self) -> Result<()> {
            self.values.lock().unwrap().clear();
            Ok(())
        }
    }

    fn engine_with(repo: FakeRepository, limits: RateLimitConfig) -> DecisionEngine {
        let lists = Arc::new(ListService::new(Arc::new(repo)));
        let limiter = Arc::new(RateLimiter::new(Arc::new(FakeStore::new()), limits));
        DecisionEngine::new(lists, limiter)
    }

    fn generous_limits() -> RateLimitConfig {
        RateLimitConfig { login_limit: 1000, password_limit: 1000, ip_limit: 1000 }
    }

    #[tokio::test]
    async fn blacklist_wins_over_everything_else() {
        let mut repo = FakeRepository::default();
        repo.blacklist.get_mut().unwrap().push(("203.0.113.0".to_string(), 24));
        let engine = engine_with(repo, generous_limits());

        let decision = engine.check_request("alice", "pw", "203.0.113.7").await.unwrap();
        assert!(!decision.allowed);
        assert_eq!(decision.reason, ReasonTag::InBlacklist);
    }

    #[tokio::test]
    async fn whitelist_overrides_rate_limits_but_not_blacklist() {
        let mut repo = FakeRepository::default();
        repo.whitelist.get_mut().unwrap().push(("203.0.113.0".to_string(), 24));
        let tight_limits = RateLimitConfig { login_limit: 0, password_limit: 0, ip_limit: 0 };
        let engine = engine_with(repo, tight_limits);

        let decision = engine.check_request("alice", "pw", "203.0.113.7").await.unwrap();
        assert!(decision.allowed);
        assert_eq!(decision.reason, ReasonTag::InWhitelist);
    }

    #[tokio::test]
    async fn clear_when_no_list_matches_and_counters_are_within_limits() {
        let engine = engine_with(FakeRepository::default(), generous_limits());
        let decision = engine.check_request("alice", "pw", "203.0.113.7").await.unwrap();
        assert!(decision.allowed);
        assert_eq!(decision.reason, ReasonTag::Clear);
    }

    #[tokio::test]
    async fn login_counter_trips_before_password_and_ip_are_even_checked() {
        let limits = RateLimitConfig { login_limit: 0, password_limit: 1000, ip_limit: 1000 };
        let engine = engine_with(FakeRepository::default(), limits);
        let decision = engine.check_request("alice", "pw", "203.0.113.7").await.unwrap();
        assert_eq!(decision.reason, ReasonTag::RateLimitLogin);
    }

    #[tokio::test]
    async fn validation_errors_surface_before_any_storage_call() {
        let engine = engine_with(FakeRepository::default(), generous_limits());
        let err = engine.check_request("", "pw", "203.0.113.7").await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }
}
