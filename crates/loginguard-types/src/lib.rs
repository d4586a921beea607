//! loginguard-types: wire types shared between the gate's HTTP server and
//! its CLI client.
//!
//! Field names and casing here are part of the client contract and must
//! not change without a matching client update — they mirror the JSON
//! shape the gate has always spoken on the wire.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

/// Body of `GET /request/`: the triple under evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthCheckRequest {
    /// Login/username claimed by the attempt.
    #[serde(rename = "Login")]
    pub login: String,
    /// Password presented by the attempt.
    #[serde(rename = "Password")]
    pub password: String,
    /// Source IPv4 literal of the attempt.
    #[serde(rename = "IP")]
    pub ip: String,
}

/// Response body of `GET /request/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthCheckResponse {
    /// Human-readable reason for the decision.
    #[serde(rename = "Message")]
    pub message: String,
    /// `true` if the attempt may proceed to authentication.
    #[serde(rename = "Ok")]
    pub ok: bool,
}

/// Body of `POST`/`DELETE`/`GET` on `/whitelist/` and `/blacklist/` for a
/// specific subnet. `ip == "ALL"` with `mask == 0` is the list-dump
/// sentinel accepted only by `GET`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CidrRequest {
    /// Dotted-quad network literal, or the literal `"ALL"`.
    #[serde(rename = "IP")]
    pub ip: String,
    /// Subnet mask in `[1, 31]`, or `0` for the `"ALL"` sentinel.
    #[serde(rename = "Mask")]
    pub mask: i32,
}

/// The generic `{Text, Code}` envelope used by every write/administrative
/// endpoint. `Code == 0` is success; `Code == 1` is an error, with `Text`
/// carrying the message. `POST /whitelist/`-style endpoints additionally
/// overload `Code` with the newly assigned row id on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputJson {
    /// `"OK!"`, `"YES"`/`"NO"`, the new row id as text is never used here
    /// (id lives in `Code`), or an error message.
    #[serde(rename = "Text")]
    pub text: String,
    /// `0` on success, `1` on error; overloaded as a row id by the
    /// whitelist/blacklist `POST` handler.
    #[serde(rename = "Code")]
    pub code: i64,
}

impl OutputJson {
    /// Build the canonical success envelope (`"OK!"`, code 0).
    pub fn ok() -> Self {
        Self { text: "OK!".to_string(), code: 0 }
    }

    /// Build the canonical success envelope carrying a newly assigned id.
    pub fn ok_with_id(id: i64) -> Self {
        Self { text: "OK!".to_string(), code: id }
    }

    /// Build the canonical error envelope.
    pub fn error(message: impl Into<String>) -> Self {
        Self { text: message.into(), code: 1 }
    }
}

/// One row of a list dump, as returned by `GET /whitelist/` (`/blacklist/`)
/// with `{"IP":"ALL","Mask":0}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CidrListEntry {
    /// Dotted-quad network literal, stored verbatim.
    #[serde(rename = "IP")]
    pub ip: String,
    /// Subnet mask in `[1, 31]`.
    #[serde(rename = "Mask")]
    pub mask: i32,
    /// Row id, monotonic within the list.
    #[serde(rename = "ID")]
    pub id: i64,
}

/// Response body of `GET /whitelist/` (`/blacklist/`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CidrListResponse {
    /// Full ascending-by-id dump when the request used the `"ALL"`
    /// sentinel; empty otherwise.
    #[serde(rename = "IPList")]
    pub ip_list: Vec<CidrListEntry>,
    /// For a specific `(IP, Mask)` lookup, `message.text` is `"YES"` or
    /// `"NO"`. For an `"ALL"` dump it is the usual success/error envelope.
    #[serde(rename = "Message")]
    pub message: OutputJson,
}

/// Body of `DELETE /clearbucketbylogin/` and `DELETE /clearbucketbyip/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRequest {
    /// The login or IP whose rate-limit counter should be reset to zero.
    #[serde(rename = "Tag")]
    pub tag: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_check_request_uses_pascal_case_field_names() {
        let req = AuthCheckRequest {
            login: "alice".to_string(),
            password: "swordfish".to_string(),
            ip: "203.0.113.7".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"Login\":\"alice\""));
        assert!(json.contains("\"IP\":\"203.0.113.7\""));
    }

    #[test]
    fn output_json_helpers_match_the_wire_contract() {
        assert_eq!(serde_json::to_string(&OutputJson::ok()).unwrap(), r#"{"Text":"OK!","Code":0}"#);
        let with_id = OutputJson::ok_with_id(42);
        assert_eq!(with_id.code, 42);
        let err = OutputJson::error("boom");
        assert_eq!(err.code, 1);
        assert_eq!(err.text, "boom");
    }

    #[test]
    fn cidr_list_response_round_trips() {
        let raw = r#"{"IPList":[{"IP":"10.0.0.0","Mask":8,"ID":1}],"Message":{"Text":"OK!","Code":0}}"#;
        let parsed: CidrListResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.ip_list.len(), 1);
        assert_eq!(parsed.ip_list[0].mask, 8);
    }
}
