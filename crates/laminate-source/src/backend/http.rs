//! HTTP(S) backend

use reqwest::blocking::Client;
use tracing::debug;

use laminate_core::error::LaminateError;

use super::{read_body, Address, Backend};
use crate::SourceResult;

/// Fetches configuration with a plain GET request
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
}

impl HttpBackend {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Backend for HttpBackend {
    fn fetch(&self, address: &Address) -> SourceResult<Vec<u8>> {
        if address.host().is_empty() {
            return Err(LaminateError::missing(
                address.scheme.as_str(),
                "host",
                "http://host/path/to/config",
            ));
        }

        debug!("GET {}", address.url);
        read_body(address, self.client.get(address.url.clone()))
    }
}
