//! Syntactic checks on requests and CIDR entries (§4.4 of the design).
//!
//! Validation never touches storage and never mutates state — a failure
//! here means the request is neither a `CLEAR` nor a rate-limit
//! violation, it simply never reached the pipeline.

use std::net::Ipv4Addr;

use crate::error::ValidationError;
use crate::model::AuthRequest;

/// Validate and parse a raw `(login, password, ip)` triple into an
/// `AuthRequest`.
pub fn validate_auth_request(
    login: &str,
    password: &str,
    ip: &str,
) -> Result<AuthRequest, ValidationError> {
    if login.is_empty() {
        return Err(ValidationError::EmptyLogin);
    }
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    let ip = parse_ipv4_strict(ip)?;

    Ok(AuthRequest { login: login.to_string(), password: password.to_string(), ip })
}

/// Validate a raw `(network, mask)` pair destined for a CIDR list.
///
/// When `allow_all_sentinel` is set and the pair is exactly `("ALL", 0)`,
/// it is accepted as-is (the list-dump sentinel never reaches storage as
/// an entry, but callers that also validate dump requests share this
/// function). Otherwise `network` must parse as an IPv4 literal and
/// `mask` must be in `[1, 31]`.
pub fn validate_cidr_entry(
    network: &str,
    mask: i32,
    allow_all_sentinel: bool,
) -> Result<(Ipv4Addr, i32), ValidationError> {
    if allow_all_sentinel && network == "ALL" && mask == 0 {
        return Ok((Ipv4Addr::UNSPECIFIED, 0));
    }

    let parsed = parse_ipv4_strict(network)?;
    if !(1..=31).contains(&mask) {
        return Err(ValidationError::BadMask(mask));
    }
    Ok((parsed, mask))
}

/// Four decimal octets in `[0, 255]` separated by `.`. Rejects anything
/// `std::net::Ipv4Addr::from_str` would accept more loosely (e.g. it
/// never has loose leading-zero/octal ambiguity to worry about — we
/// parse octets as plain decimal `u8` and bounds-check the dot count
/// ourselves rather than trusting a generic parser's leniency).
fn parse_ipv4_strict(raw: &str) -> Result<Ipv4Addr, ValidationError> {
    let bad = || ValidationError::BadIp(raw.to_string());

    let parts: Vec<&str> = raw.split('.').collect();
    if parts.len() != 4 {
        return Err(bad());
    }
    let mut octets = [0u8; 4];
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() || (part.len() > 1 && part.starts_with('0')) {
            return Err(bad());
        }
        octets[i] = part.parse::<u16>().ok().filter(|v| *v <= 255).ok_or_else(bad)? as u8;
    }
    Ok(Ipv4Addr::from(octets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("203.0.113.7" ; "ordinary address")]
    #[test_case("0.0.0.0" ; "all zero")]
    #[test_case("255.255.255.255" ; "all max")]
    fn accepts_well_formed_ipv4(ip: &str) {
        assert!(parse_ipv4_strict(ip).is_ok());
    }

    #[test_case("256.0.0.1" ; "octet too large")]
    #[test_case("1.2.3" ; "too few octets")]
    #[test_case("1.2.3.4.5" ; "too many octets")]
    #[test_case("1.2.3.04" ; "leading zero")]
    #[test_case("abc.def.ghi.jkl" ; "not numeric")]
    #[test_case("" ; "empty")]
    fn rejects_malformed_ipv4(ip: &str) {
        assert!(parse_ipv4_strict(ip).is_err());
    }

    #[test]
    fn auth_request_rejects_empty_fields_in_order() {
        assert_eq!(validate_auth_request("", "p", "1.2.3.4").unwrap_err(), ValidationError::EmptyLogin);
        assert_eq!(validate_auth_request("l", "", "1.2.3.4").unwrap_err(), ValidationError::EmptyPassword);
        assert!(matches!(
            validate_auth_request("l", "p", "not-an-ip").unwrap_err(),
            ValidationError::BadIp(_)
        ));
    }

    #[test]
    fn cidr_entry_rejects_reserved_and_oversized_masks() {
        assert_eq!(validate_cidr_entry("10.0.0.0", 0, false).unwrap_err(), ValidationError::BadMask(0));
        assert_eq!(validate_cidr_entry("10.0.0.0", 32, false).unwrap_err(), ValidationError::BadMask(32));
        assert!(validate_cidr_entry("10.0.0.0", 31, false).is_ok());
        assert!(validate_cidr_entry("10.0.0.0", 1, false).is_ok());
    }

    #[test]
    fn cidr_entry_all_sentinel_requires_the_flag() {
        assert!(validate_cidr_entry("ALL", 0, true).is_ok());
        assert!(validate_cidr_entry("ALL", 0, false).is_err());
    }
}
