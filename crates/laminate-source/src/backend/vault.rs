//! HashiCorp Vault backend (`vault://server/path/to/secret`)
//!
//! Reads `https://<server>/v1/<path>` with the token from `VAULT_TOKEN` and
//! returns the secret's `data` object as JSON. KV version 2 responses nest
//! the secret under `data.data`; that inner object is unwrapped.

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use laminate_core::error::LaminateError;

use super::{read_body, Address, Backend};
use crate::SourceResult;

const USAGE: &str = "vault://server/path/to/secret";

/// Reads secrets over the Vault HTTP API
#[derive(Debug, Clone)]
pub struct VaultBackend {
    client: Client,
    token: Option<String>,
    transport: &'static str,
}

impl VaultBackend {
    /// Backend authenticating with `VAULT_TOKEN`
    pub fn new(client: Client) -> Self {
        Self {
            client,
            token: std::env::var("VAULT_TOKEN").ok().filter(|t| !t.is_empty()),
            transport: "https",
        }
    }

    /// Replace the token
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Talk plain HTTP to the server (dev-mode servers and tests)
    pub fn insecure(mut self) -> Self {
        self.transport = "http";
        self
    }

    /// Pull the secret payload out of a Vault read response
    pub fn secret_data(response: &[u8]) -> Result<Value, String> {
        let body: Value = serde_json::from_slice(response).map_err(|e| e.to_string())?;
        let data = body
            .get("data")
            .ok_or_else(|| "response has no data field".to_string())?;

        match (data.get("data"), data.get("metadata")) {
            (Some(inner @ Value::Object(_)), Some(_)) => Ok(inner.clone()),
            _ => Ok(data.clone()),
        }
    }
}

impl Backend for VaultBackend {
    fn fetch(&self, address: &Address) -> SourceResult<Vec<u8>> {
        if address.host().is_empty() {
            return Err(LaminateError::missing("vault", "server", USAGE));
        }
        let secret_path = address.trimmed_path();
        if secret_path.is_empty() {
            return Err(LaminateError::missing("vault", "secret path", USAGE));
        }

        let url = format!("{}://{}/v1/{}", self.transport, address.host_port(), secret_path);
        debug!("Reading Vault secret {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.header("X-Vault-Token", token);
        }
        let body = read_body(address, request)?;

        let data = Self::secret_data(&body).map_err(|message| {
            LaminateError::fetch_message(address.locator.as_str(), format!("unexpected Vault response: {}", message))
        })?;
        serde_json::to_vec(&data)
            .map_err(|e| LaminateError::fetch(address.locator.as_str(), "failed to re-encode Vault secret", e))
    }
}
