//! Enforces I1 (a `(network, mask)` may never sit in both lists at once)
//! on top of a bare `ListRepository`.

use std::sync::Arc;

use crate::error::{EngineError, Result};
use crate::list_repository::ListRepository;
use crate::model::{CidrEntry, ListName};
use crate::validators::validate_cidr_entry;

/// The CIDR-list half of the gate: add/remove/lookup/dump, each checked
/// against the sibling list before touching storage.
///
/// The read-then-insert exclusion check is not transactional against a
/// concurrent writer targeting the other list — two racing requests for
/// the same `(network, mask)` in opposite lists can both pass the check
/// and both insert. This mirrors the original storage's behavior and is
/// accepted rather than solved with cross-table locking.
pub struct ListService {
    repository: Arc<dyn ListRepository>,
}

impl ListService {
    pub fn new(repository: Arc<dyn ListRepository>) -> Self {
        Self { repository }
    }

    /// Validate, check the sibling list, then insert into `list`.
    pub async fn add(&self, list: ListName, network: &str, mask: i32) -> Result<i64> {
        let (parsed_ip, mask) = validate_cidr_entry(network, mask, false)?;
        let network = parsed_ip.to_string();

        if self.repository.contains(list.other(), &network, mask).await? {
            return Err(EngineError::CrossListConflict(list.other()));
        }
        self.repository.add(list, &network, mask).await
    }

    /// Validate then remove from `list`.
    pub async fn remove(&self, list: ListName, network: &str, mask: i32) -> Result<()> {
        let (parsed_ip, mask) = validate_cidr_entry(network, mask, false)?;
        let network = parsed_ip.to_string();
        self.repository.remove(list, &network, mask).await
    }

    /// Exact-match membership lookup for a single `(network, mask)`.
    pub async fn is_in_list(&self, list: ListName, network: &str, mask: i32) -> Result<bool> {
        let (parsed_ip, mask) = validate_cidr_entry(network, mask, false)?;
        let network = parsed_ip.to_string();
        self.repository.contains(list, &network, mask).await
    }

    /// Full ascending-by-id dump of `list`.
    pub async fn get_all(&self, list: ListName) -> Result<Vec<CidrEntry>> {
        self.repository.list(list).await
    }
}
