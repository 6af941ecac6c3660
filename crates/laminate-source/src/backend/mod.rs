//! Byte-fetching backends, one per locator scheme
//!
//! A backend is a blocking capability: given the [`Address`] of a parsed
//! locator it returns the raw payload or fails. Backends validate their own
//! required components and never interpret the payload.

use std::time::Duration;

use laminate_core::error::LaminateError;
use reqwest::blocking::{Client, ClientBuilder};
use url::Url;

use crate::locator::Scheme;
use crate::SourceResult;

pub mod appconfig;
pub mod consul;
pub mod file;
pub mod http;
pub mod s3;
pub mod sigv4;
pub mod vault;


pub use appconfig::AppConfigBackend;
pub use consul::ConsulBackend;
pub use file::FileBackend;
pub use http::HttpBackend;
pub use s3::S3Backend;
pub use sigv4::AwsCredentials;
pub use vault::VaultBackend;

/// Capability to fetch the raw bytes behind a locator
pub trait Backend: Send + Sync {
    /// Fetch the payload at `address`
    fn fetch(&self, address: &Address) -> SourceResult<Vec<u8>>;
}

/// The parts of a parsed locator a backend works from
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    /// The locator as given by the caller, for error messages
    pub locator: String,
    pub scheme: Scheme,
    /// URI with any `+format` suffix removed from the scheme
    pub url: Url,
}

impl Address {
    pub fn new(locator: String, scheme: Scheme, url: Url) -> Self {
        Self { locator, scheme, url }
    }

    /// Host component, empty when absent
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Host with the explicit port, if one was given
    pub fn host_port(&self) -> String {
        match self.url.port() {
            Some(port) => format!("{}:{}", self.host(), port),
            None => self.host().to_string(),
        }
    }

    /// Path component including its leading slash
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Path component without leading or trailing slashes
    pub fn trimmed_path(&self) -> &str {
        self.url.path().trim_matches('/')
    }

    /// First value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// Build the blocking HTTP client shared by the network backends.
///
/// No request timeout is configured: a fetch runs until it completes or the
/// transport fails.
pub fn http_client() -> SourceResult<Client> {
    ClientBuilder::new()
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .timeout(None::<Duration>)
        .gzip(true)
        .user_agent(concat!("laminate/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| LaminateError::fetch("http", "Failed to create HTTP client", e))
}

/// Send a request and return the body of a successful response
pub(crate) fn read_body(
    address: &Address,
    request: reqwest::blocking::RequestBuilder,
) -> SourceResult<Vec<u8>> {
    let response = request
        .send()
        .map_err(|e| LaminateError::fetch(address.locator.as_str(), "request failed", e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LaminateError::fetch_message(
            address.locator.as_str(),
            format!("server responded with {}", status),
        ));
    }

    let body = response
        .bytes()
        .map_err(|e| LaminateError::fetch(address.locator.as_str(), "failed to read response body", e))?;
    Ok(body.to_vec())
}
