//! Error taxonomy for the decision engine and its stateful substrate.
//!
//! Mirrors the four-way split from the design: validation errors never
//! touch storage, business errors are ordinary control flow, infrastructure
//! errors are storage/timeout failures the caller must see (the engine
//! never fails closed by guessing), and fatal errors only happen at
//! process startup and are not represented here.

use crate::model::ListName;

/// Everything that can go wrong below the decision pipeline.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The caller supplied a syntactically invalid request or entry.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// `(network, mask)` already exists in the *other* list.
    #[error("already present in {0}")]
    CrossListConflict(ListName),

    /// `(network, mask)` already exists in the target list.
    #[error("duplicate entry")]
    DuplicateEntry,

    /// No row matched the requested `(list, network, mask)`.
    #[error("not found")]
    NotFound,

    /// The list name is not one of `whitelist`/`blacklist`.
    #[error("unknown list name: {0}")]
    BadListName(String),

    /// A stored CIDR failed to parse during a scan. This indicates
    /// corrupted storage, not a bad request.
    #[error("malformed stored CIDR {network}/{mask}")]
    MalformedStoredCidr {
        /// The offending network literal.
        network: String,
        /// The offending mask.
        mask: i32,
    },

    /// The Postgres-backed list repository failed.
    #[error("list storage error: {0}")]
    ListStorage(#[from] sqlx::Error),

    /// The Redis-backed counter store failed.
    #[error("counter storage error: {0}")]
    CounterStorage(#[from] redis::RedisError),

    /// A storage call did not complete before its deadline.
    #[error("storage call timed out")]
    Timeout,
}

/// Purely syntactic validation failures (§4.4 of the design).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// `ip` is not four dot-separated decimal octets in `[0,255]`.
    #[error("bad IP literal: {0}")]
    BadIp(String),
    /// `login` was empty.
    #[error("login must not be empty")]
    EmptyLogin,
    /// `password` was empty.
    #[error("password must not be empty")]
    EmptyPassword,
    /// `mask` was `0` or `>= 32` where neither is permitted.
    #[error("mask must be in [1, 31], got {0}")]
    BadMask(i32),
}

pub type Result<T> = std::result::Result<T, EngineError>;
