//! S3 object storage backend (`s3://bucket/key`)
//!
//! Query parameters:
//! - `region`: bucket region (defaults to the AWS environment, then `us-east-1`)
//! - `endpoint`: S3-compatible endpoint; objects are then addressed path-style
//!   as `<endpoint>/<bucket>/<key>`

use chrono::Utc;
use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use laminate_core::error::LaminateError;

use super::sigv4::{default_region, AwsCredentials, Signer};
use super::{read_body, Address, Backend};
use crate::SourceResult;

const USAGE: &str = "s3://bucket/path/to/key";

/// Fetches objects with a (optionally signed) GET request
#[derive(Debug, Clone)]
pub struct S3Backend {
    client: Client,
    credentials: Option<AwsCredentials>,
    region: String,
}

impl S3Backend {
    /// Backend using credentials and region from the AWS environment
    pub fn new(client: Client) -> Self {
        Self {
            client,
            credentials: AwsCredentials::from_env(),
            region: default_region(),
        }
    }

    /// Replace the credentials; `None` sends anonymous requests
    pub fn with_credentials(mut self, credentials: Option<AwsCredentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Object URL for an address
    pub fn object_url(&self, address: &Address) -> SourceResult<Url> {
        let bucket = address.host();
        if bucket.is_empty() {
            return Err(LaminateError::missing("s3", "bucket name", USAGE));
        }
        let key = address.trimmed_path();
        if key.is_empty() {
            return Err(LaminateError::missing("s3", "object key", USAGE));
        }

        let raw = match address.query_param("endpoint") {
            Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key),
            None => {
                let region = address.query_param("region").unwrap_or_else(|| self.region.clone());
                format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key)
            }
        };

        Url::parse(&raw).map_err(|e| LaminateError::LocatorParse {
            locator: address.locator.clone(),
            message: format!("invalid object URL {}: {}", raw, e),
        })
    }
}

impl Backend for S3Backend {
    fn fetch(&self, address: &Address) -> SourceResult<Vec<u8>> {
        let url = self.object_url(address)?;
        let mut request = self.client.get(url.clone());

        match &self.credentials {
            Some(credentials) => {
                let region = address.query_param("region").unwrap_or_else(|| self.region.clone());
                let signer = Signer {
                    credentials,
                    region: &region,
                    service: "s3",
                    content_sha256_header: true,
                };
                for (name, value) in signer.sign("GET", &url, b"", Utc::now()) {
                    request = request.header(name, value);
                }
                debug!("GET {} (signed, region {})", url, region);
            }
            None => debug!("GET {} (anonymous)", url),
        }

        read_body(address, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Locator;

    fn backend() -> S3Backend {
        S3Backend {
            client: Client::new(),
            credentials: None,
            region: "us-east-1".to_string(),
        }
    }

    fn address(locator: &str) -> Address {
        Locator::parse(locator).unwrap().address().unwrap()
    }

    #[test]
    fn test_virtual_hosted_url() {
        let url = backend().object_url(&address("s3://configs/app/base.yaml")).unwrap();
        assert_eq!(url.as_str(), "https://configs.s3.us-east-1.amazonaws.com/app/base.yaml");
    }

    #[test]
    fn test_region_query() {
        let url = backend()
            .object_url(&address("s3://configs/base.json?region=eu-central-1"))
            .unwrap();
        assert_eq!(url.as_str(), "https://configs.s3.eu-central-1.amazonaws.com/base.json");
    }

    #[test]
    fn test_endpoint_query_is_path_style() {
        let url = backend()
            .object_url(&address("s3://configs/base.json?endpoint=http://localhost:9000/"))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/configs/base.json");
    }

    #[test]
    fn test_missing_bucket_and_key() {
        let err = backend().object_url(&address("s3://")).unwrap_err();
        assert!(matches!(err, LaminateError::MissingComponent { ref component, .. } if component == "bucket name"));

        let err = backend().object_url(&address("s3://configs")).unwrap_err();
        assert!(matches!(err, LaminateError::MissingComponent { ref component, .. } if component == "object key"));
    }
}
