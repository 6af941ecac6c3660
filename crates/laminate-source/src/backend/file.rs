//! Local filesystem backend (`file://`)

use std::path::PathBuf;

use laminate_core::error::LaminateError;
use tracing::debug;
use url::Url;

use super::{Address, Backend};
use crate::SourceResult;

/// Reads configuration from local files
#[derive(Debug, Clone, Default)]
pub struct FileBackend;

impl FileBackend {
    pub fn new() -> Self {
        Self
    }

    /// Filesystem path named by a `file://` address.
    ///
    /// A host other than `localhost` is treated as the first path segment, so
    /// `file://conf/base.yaml` names the relative path `conf/base.yaml`.
    pub fn path_of(address: &Address) -> SourceResult<PathBuf> {
        let host = address.host();
        if !host.is_empty() && host != "localhost" {
            let decoded = Self::decoded_path(address)?;
            let relative = decoded.strip_prefix("/").unwrap_or(&decoded);
            return Ok(PathBuf::from(host).join(relative));
        }

        if address.path().is_empty() || address.path() == "/" {
            return Err(LaminateError::missing("file", "file path", "file:///path/to/config"));
        }

        address.url.to_file_path().map_err(|()| LaminateError::LocatorParse {
            locator: address.locator.clone(),
            message: "not a valid file path".to_string(),
        })
    }

    /// Percent-decoded path component of the address
    fn decoded_path(address: &Address) -> SourceResult<PathBuf> {
        let invalid = || LaminateError::LocatorParse {
            locator: address.locator.clone(),
            message: "not a valid file path".to_string(),
        };
        let local = Url::parse(&format!("file://{}", address.path())).map_err(|_| invalid())?;
        local.to_file_path().map_err(|()| invalid())
    }
}

impl Backend for FileBackend {
    fn fetch(&self, address: &Address) -> SourceResult<Vec<u8>> {
        let path = Self::path_of(address)?;
        debug!("Reading {}", path.display());

        std::fs::read(&path).map_err(|e| {
            LaminateError::fetch(
                address.locator.as_str(),
                format!("failed to read file {}", path.display()),
                e,
            )
        })
    }
}
