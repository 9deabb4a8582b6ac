//! HTTP transport configuration.

use crate::error::ClientResult;
use reqwest::Client;
use std::time::Duration;

/// Transport settings shared by every request a process makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Per-request timeout. Expiry surfaces as an HTTP (network) error.
    pub timeout: Duration,
    /// Page size requested by list endpoints.
    pub list_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            list_limit: 128,
        }
    }
}

impl ClientConfig {
    /// Builds the pooled HTTP client for this configuration.
    pub fn build_http(&self) -> ClientResult<Client> {
        Ok(Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("bazaar-client/", env!("CARGO_PKG_VERSION")))
            .build()?)
    }
}
