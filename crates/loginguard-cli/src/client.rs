//! Thin blocking HTTP client over the gate's wire contract.

use loginguard_types::{CidrListResponse, CidrRequest, OutputJson, TagRequest};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub struct Client {
    http: reqwest::blocking::Client,
    base: String,
}

impl Client {
    pub fn new(base: impl Into<String>) -> Self {
        Self { http: reqwest::blocking::Client::new(), base: base.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base.trim_end_matches('/'), path)
    }

    pub fn add_to_list(&self, list: &str, ip: &str, mask: i32) -> Result<OutputJson, ClientError> {
        let body = CidrRequest { ip: ip.to_string(), mask };
        Ok(self.http.post(self.url(&format!("/{}/", list))).json(&body).send()?.json()?)
    }

    pub fn remove_from_list(&self, list: &str, ip: &str, mask: i32) -> Result<OutputJson, ClientError> {
        let body = CidrRequest { ip: ip.to_string(), mask };
        Ok(self.http.delete(self.url(&format!("/{}/", list))).json(&body).send()?.json()?)
    }

    pub fn is_in_list(&self, list: &str, ip: &str, mask: i32) -> Result<CidrListResponse, ClientError> {
        let body = CidrRequest { ip: ip.to_string(), mask };
        Ok(self.http.get(self.url(&format!("/{}/", list))).json(&body).send()?.json()?)
    }

    pub fn all_in_list(&self, list: &str) -> Result<CidrListResponse, ClientError> {
        let body = CidrRequest { ip: "ALL".to_string(), mask: 0 };
        Ok(self.http.get(self.url(&format!("/{}/", list))).json(&body).send()?.json()?)
    }

    pub fn check_request(
        &self,
        login: &str,
        password: &str,
        ip: &str,
    ) -> Result<loginguard_types::AuthCheckResponse, ClientError> {
        let body = loginguard_types::AuthCheckRequest {
            login: login.to_string(),
            password: password.to_string(),
            ip: ip.to_string(),
        };
        Ok(self.http.get(self.url("/request/")).json(&body).send()?.json()?)
    }

    pub fn clear_bucket(&self, route: &str, tag: &str) -> Result<OutputJson, ClientError> {
        let body = TagRequest { tag: tag.to_string() };
        Ok(self.http.delete(self.url(route)).json(&body).send()?.json()?)
    }
}
