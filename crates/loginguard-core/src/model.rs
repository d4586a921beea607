//! Core data model: the types every component in this crate passes
//! around. None of these carry `serde` impls — wire (de)serialization is
//! the HTTP layer's job, not the engine's.

use std::fmt;

/// Which of the two mutually exclusive CIDR lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListName {
    Whitelist,
    Blacklist,
}

impl ListName {
    /// The list that, per I1, may never simultaneously hold the same
    /// `(network, mask)` as this one.
    pub fn other(self) -> Self {
        match self {
            ListName::Whitelist => ListName::Blacklist,
            ListName::Blacklist => ListName::Whitelist,
        }
    }

    /// Lowercase name as used in the wire contract's URL paths.
    pub fn as_str(self) -> &'static str {
        match self {
            ListName::Whitelist => "whitelist",
            ListName::Blacklist => "blacklist",
        }
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A durable CIDR record in one of the two lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidrEntry {
    /// Monotonically assigned within the list, stable across queries.
    pub id: i64,
    /// Dotted-quad network literal, stored verbatim (host bits not
    /// normalized — see the design's non-canonical-CIDR open question).
    pub network: String,
    /// Subnet mask in `[1, 31]`.
    pub mask: i32,
}

/// A `(dim, tag)` pair identifying one rate-limit counter. `dim`
/// disambiguates the shared key space so a login that happens to look
/// like an IP literal can never collide with an actual IP counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterDimension {
    Login,
    Password,
    Ip,
}

impl CounterDimension {
    fn prefix(self) -> &'static str {
        match self {
            CounterDimension::Login => "L",
            CounterDimension::Password => "P",
            CounterDimension::Ip => "I",
        }
    }
}

/// Builds the namespaced key a `CounterStore` is keyed on: `"<dim>:<tag>"`.
pub fn counter_key(dim: CounterDimension, tag: &str) -> String {
    format!("{}:{}", dim.prefix(), tag)
}

/// A transient authentication attempt under evaluation. Validated before
/// construction — see `crate::validators::validate_auth_request`.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub login: String,
    pub password: String,
    pub ip: std::net::Ipv4Addr,
}

/// The machine-readable outcome of one decision, plus the human string the
/// wire contract renders it as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonTag {
    Clear,
    InWhitelist,
    InBlacklist,
    RateLimitLogin,
    RateLimitPassword,
    RateLimitIp,
}

impl ReasonTag {
    /// Whether this reason permits the attempt to proceed to
    /// authentication.
    pub fn allows(self) -> bool {
        matches!(self, ReasonTag::Clear | ReasonTag::InWhitelist)
    }

    /// The exact human string the wire contract renders for this reason.
    pub fn message(self) -> &'static str {
        match self {
            ReasonTag::Clear => "clear check",
            ReasonTag::InWhitelist => "IP in whitelist",
            ReasonTag::InBlacklist => "IP in blacklist",
            ReasonTag::RateLimitLogin => "rate limit by login",
            ReasonTag::RateLimitPassword => "rate limit by password",
            ReasonTag::RateLimitIp => "rate limit by IP",
        }
    }
}

/// The engine's verdict on a single `AuthRequest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub reason: ReasonTag,
}

impl Decision {
    pub fn new(reason: ReasonTag) -> Self {
        Self { allowed: reason.allows(), reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_name_other_is_an_involution() {
        assert_eq!(ListName::Whitelist.other(), ListName::Blacklist);
        assert_eq!(ListName::Blacklist.other(), ListName::Whitelist);
    }

    #[test]
    fn counter_key_namespaces_by_dimension() {
        assert_eq!(counter_key(CounterDimension::Login, "1.2.3.4"), "L:1.2.3.4");
        assert_eq!(counter_key(CounterDimension::Ip, "1.2.3.4"), "I:1.2.3.4");
        assert_ne!(
            counter_key(CounterDimension::Login, "1.2.3.4"),
            counter_key(CounterDimension::Ip, "1.2.3.4"),
        );
    }

    #[test]
    fn decision_allows_matches_reason() {
        assert!(Decision::new(ReasonTag::Clear).allowed);
        assert!(Decision::new(ReasonTag::InWhitelist).allowed);
        assert!(!Decision::new(ReasonTag::InBlacklist).allowed);
        assert!(!Decision::new(ReasonTag::RateLimitLogin).allowed);
    }
}
