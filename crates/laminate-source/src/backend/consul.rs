//! Consul KV backend (`consul://server/path/to/key`)

use reqwest::blocking::Client;
use tracing::debug;

use laminate_core::error::LaminateError;

use super::{read_body, Address, Backend};
use crate::SourceResult;

const USAGE: &str = "consul://server/path/to/key";

/// Reads a single raw value from the Consul KV store
#[derive(Debug, Clone)]
pub struct ConsulBackend {
    client: Client,
    token: Option<String>,
}

impl ConsulBackend {
    /// Backend authenticating with `CONSUL_HTTP_TOKEN` when set
    pub fn new(client: Client) -> Self {
        Self {
            client,
            token: std::env::var("CONSUL_HTTP_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }

    /// Replace the ACL token
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}

impl Backend for ConsulBackend {
    fn fetch(&self, address: &Address) -> SourceResult<Vec<u8>> {
        if address.host().is_empty() {
            return Err(LaminateError::missing("consul", "server", USAGE));
        }
        let key = address.trimmed_path();
        if key.is_empty() {
            return Err(LaminateError::missing("consul", "key path", USAGE));
        }

        let url = format!("http://{}/v1/kv/{}?raw", address.host_port(), key);
        debug!("Reading Consul key {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.header("X-Consul-Token", token);
        }
        read_body(address, request)
    }
}
