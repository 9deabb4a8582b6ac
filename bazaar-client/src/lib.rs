//! HTTP client for the Bazaar shop service.
//!
//! Wraps the service's `v1` REST API:
//! - Owners, shops and their keyword filters
//! - Merchandise catalogs and interior layouts, one of each per shop
//! - Buy/sell transactions
//!
//! Requests authenticate with an `Api-Key` header and exchange JSON bodies.
//! Failures the service reports come back as [`ServerError`] (RFC 7807
//! problem documents); everything else is a transport-level [`ClientError`].

mod client;
mod config;
mod error;

pub use client::{BazaarClient, ShopUpdate, API_KEY_HEADER, API_VERSION};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ServerError};

/// Generates a fresh API key for a new owner.
pub fn generate_api_key() -> String {
    uuid::Uuid::new_v4().to_string()
}
