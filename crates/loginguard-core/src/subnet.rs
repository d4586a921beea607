//! CIDR containment matching against the two durable lists.
//!
//! Grounded on the teacher's CIDR math in `db::vpn` (`cidr_subtract`,
//! `network_contains`), which already leans on the `ipnetwork` crate for
//! all prefix arithmetic rather than hand-rolling bitmasks.

use ipnetwork::Ipv4Network;

use crate::error::{EngineError, Result};
use crate::model::CidrEntry;

/// Stateless CIDR-containment check over a snapshot of list entries.
///
/// Callers fetch the relevant list's entries from a `ListRepository` and
/// hand them here; the matcher itself never talks to storage.
pub struct SubnetMatcher;

impl SubnetMatcher {
    /// `true` if `ip` falls inside any `(network, mask)` entry.
    ///
    /// A malformed stored entry is a storage-integrity problem, not a
    /// reason to silently skip it — I2 failing open is worse than a loud
    /// error at request time.
    pub fn contains(entries: &[CidrEntry], ip: std::net::Ipv4Addr) -> Result<bool> {
        for entry in entries {
            if Self::entry_contains(entry, ip)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn entry_contains(entry: &CidrEntry, ip: std::net::Ipv4Addr) -> Result<bool> {
        let network: std::net::Ipv4Addr =
            entry.network.parse().map_err(|_| EngineError::MalformedStoredCidr {
                network: entry.network.clone(),
                mask: entry.mask,
            })?;
        let net = Ipv4Network::new(network, entry.mask as u8).map_err(|_| {
            EngineError::MalformedStoredCidr { network: entry.network.clone(), mask: entry.mask }
        })?;
        Ok(net.contains(ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn entry(network: &str, mask: i32) -> CidrEntry {
        CidrEntry { id: 1, network: network.to_string(), mask }
    }

    #[test_case("10.0.0.0", 8, "10.1.2.3", true ; "inside a /8")]
    #[test_case("10.0.0.0", 8, "11.0.0.1", false ; "outside a /8")]
    #[test_case("203.0.113.0", 24, "203.0.113.255", true ; "broadcast address of a /24 still matches")]
    #[test_case("203.0.113.0", 24, "203.0.114.1", false ; "next subnet over")]
    fn single_entry_containment(network: &str, mask: i32, ip: &str, expected: bool) {
        let entries = vec![entry(network, mask)];
        let ip: std::net::Ipv4Addr = ip.parse().unwrap();
        assert_eq!(SubnetMatcher::contains(&entries, ip).unwrap(), expected);
    }

    #[test]
    fn matches_if_any_entry_in_a_list_contains_the_address() {
        let entries = vec![entry("192.168.0.0", 16), entry("10.0.0.0", 8)];
        let ip: std::net::Ipv4Addr = "10.5.5.5".parse().unwrap();
        assert!(SubnetMatcher::contains(&entries, ip).unwrap());
    }

    #[test]
    fn empty_list_never_contains_anything() {
        let ip: std::net::Ipv4Addr = "1.2.3.4".parse().unwrap();
        assert!(!SubnetMatcher::contains(&[], ip).unwrap());
    }

    #[test]
    fn malformed_stored_entry_errors_instead_of_being_skipped() {
        let entries = vec![entry("not-an-ip", 8)];
        let ip: std::net::Ipv4Addr = "1.2.3.4".parse().unwrap();
        assert!(matches!(
            SubnetMatcher::contains(&entries, ip).unwrap_err(),
            EngineError::MalformedStoredCidr { .. }
        ));
    }
}
