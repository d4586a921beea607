//! loginguard-core: the storage-agnostic decision engine behind the
//! login gate — CIDR lists, rate-limit counters, and the pipeline that
//! combines them into one allow/deny verdict per request.

pub mod counter_store;
pub mod decision_engine;
pub mod error;
pub mod flush_scheduler;
pub mod list_repository;
pub mod list_service;
pub mod model;
pub mod rate_limiter;
pub mod subnet;
pub mod validators;

pub use counter_store::CounterStore;
pub use decision_engine::DecisionEngine;
pub use error::{EngineError, ValidationError};
pub use flush_scheduler::FlushScheduler;
pub use list_repository::ListRepository;
pub use list_service::ListService;
pub use model::{AuthRequest, CidrEntry, Decision, ListName, ReasonTag};
pub use rate_limiter::{RateLimitConfig, RateLimiter};
pub use subnet::SubnetMatcher;
