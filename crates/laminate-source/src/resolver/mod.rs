//! Locator resolution: locator string in, raw bytes and format hint out

use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use laminate_core::error::LaminateError;
use laminate_core::types::Format;
use tracing::debug;

use crate::backend::{
    http_client, AppConfigBackend, Backend, ConsulBackend, FileBackend, HttpBackend, S3Backend,
    VaultBackend,
};
use crate::locator::{Locator, Scheme};
use crate::SourceResult;


/// Reader used for the `-` / `stdin` locators
type StdinReader = Box<dyn Fn() -> std::io::Result<Vec<u8>> + Send + Sync>;

/// Bytes fetched for a locator
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The parsed locator
    pub locator: Locator,
    /// Raw payload
    pub bytes: Vec<u8>,
    /// Format forced by a `scheme+format` prefix
    pub format_hint: Option<Format>,
    /// URI path available for extension-based detection
    pub path: Option<String>,
}

/// Dispatches locators to the backend registered for their scheme
pub struct SourceResolver {
    backends: HashMap<Scheme, Arc<dyn Backend>>,
    stdin: StdinReader,
}

impl SourceResolver {
    /// Resolver with every built-in backend, sharing one HTTP client
    pub fn new() -> SourceResult<Self> {
        let client = http_client()?;
        let http: Arc<dyn Backend> = Arc::new(HttpBackend::new(client.clone()));

        let resolver = Self::empty()
            .with_backend(Scheme::File, FileBackend::new())
            .with_shared_backend(Scheme::Http, Arc::clone(&http))
            .with_shared_backend(Scheme::Https, http)
            .with_backend(Scheme::S3, S3Backend::new(client.clone()))
            .with_backend(Scheme::AppConfig, AppConfigBackend::new(client.clone()))
            .with_backend(Scheme::Vault, VaultBackend::new(client.clone()))
            .with_backend(Scheme::Consul, ConsulBackend::new(client));
        Ok(resolver)
    }

    /// Resolver with no backends; standard input is still available
    pub fn empty() -> Self {
        Self {
            backends: HashMap::new(),
            stdin: Box::new(|| {
                let mut data = Vec::new();
                std::io::stdin().lock().read_to_end(&mut data)?;
                Ok(data)
            }),
        }
    }

    /// Register (or replace) the backend for a scheme
    pub fn with_backend(self, scheme: Scheme, backend: impl Backend + 'static) -> Self {
        self.with_shared_backend(scheme, Arc::new(backend))
    }

    /// Register a backend that serves several schemes
    pub fn with_shared_backend(mut self, scheme: Scheme, backend: Arc<dyn Backend>) -> Self {
        self.backends.insert(scheme, backend);
        self
    }

    /// Replace the standard input reader
    pub fn with_stdin<F>(mut self, reader: F) -> Self
    where
        F: Fn() -> std::io::Result<Vec<u8>> + Send + Sync + 'static,
    {
        self.stdin = Box::new(reader);
        self
    }

    /// Schemes with a registered backend
    pub fn schemes(&self) -> Vec<Scheme> {
        let mut schemes: Vec<Scheme> = self.backends.keys().copied().collect();
        schemes.sort_by_key(|s| s.as_str());
        schemes
    }

    /// Fetch the bytes behind a locator string
    pub fn resolve(&self, raw: &str) -> SourceResult<Resolved> {
        let locator = Locator::parse(raw)?;
        self.fetch(locator)
    }

    /// Fetch the bytes behind an already parsed locator
    pub fn fetch(&self, locator: Locator) -> SourceResult<Resolved> {
        let bytes = match &locator {
            Locator::Stdin => {
                debug!("Reading standard input");
                (self.stdin)().map_err(|e| LaminateError::io("Failed to read from stdin".to_string(), e))?
            }
            Locator::Uri { scheme, .. } => {
                let backend = self.backends.get(scheme).ok_or_else(|| LaminateError::UnsupportedScheme {
                    scheme: scheme.to_string(),
                })?;
                let address = locator.address().ok_or_else(|| LaminateError::LocatorParse {
                    locator: locator.to_string(),
                    message: "locator has no address".to_string(),
                })?;
                debug!("Fetching {} via {} backend", address.locator, scheme);
                backend.fetch(&address)?
            }
        };

        debug!("Fetched {} bytes from {}", bytes.len(), locator);
        Ok(Resolved {
            format_hint: locator.format_hint(),
            path: locator.path().map(str::to_string),
            bytes,
            locator,
        })
    }
}

impl std::fmt::Debug for SourceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceResolver")
            .field("schemes", &self.schemes())
            .finish_non_exhaustive()
    }
}
