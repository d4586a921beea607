//! Durable storage of the whitelist/blacklist CIDR entries.

mod postgres;

pub use postgres::PostgresListRepository;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{CidrEntry, ListName};

/// Storage seam for the two CIDR lists.
///
/// Implementations own cross-request durability only; cross-list
/// exclusion (I1) and validation are the caller's (`ListService`)
/// responsibility, not this trait's.
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Insert `(network, mask)` into `list`, returning the new row id.
    ///
    /// Errors with `EngineError::DuplicateEntry` if the pair already
    /// exists in `list`.
    async fn add(&self, list: ListName, network: &str, mask: i32) -> Result<i64>;

    /// Remove the row matching `(network, mask)` in `list`.
    ///
    /// Errors with `EngineError::NotFound` if no such row exists.
    async fn remove(&self, list: ListName, network: &str, mask: i32) -> Result<()>;

    /// `true` if `(network, mask)` is present verbatim in `list` (an
    /// exact-match lookup, not a containment check — see `SubnetMatcher`
    /// for containment).
    async fn contains(&self, list: ListName, network: &str, mask: i32) -> Result<bool>;

    /// All entries in `list`, ascending by id.
    async fn list(&self, list: ListName) -> Result<Vec<CidrEntry>>;
}
