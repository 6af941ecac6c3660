//! AWS AppConfig backend (`appconfig://application/environment/profile`)
//!
//! Uses the AppConfig Data API: a configuration session is started for the
//! application/environment/profile triple and the latest configuration is
//! read with the session's initial token.

use chrono::Utc;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use laminate_core::error::LaminateError;

use super::sigv4::{default_region, AwsCredentials, Signer};
use super::{read_body, Address, Backend};
use crate::SourceResult;

const USAGE: &str = "appconfig://application/environment/configuration";

/// StartConfigurationSession request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct StartSessionRequest<'a> {
    application_identifier: &'a str,
    environment_identifier: &'a str,
    configuration_profile_identifier: &'a str,
}

/// StartConfigurationSession response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StartSessionResponse {
    initial_configuration_token: String,
}

/// Application, environment and configuration profile of an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileId {
    pub application: String,
    pub environment: String,
    pub profile: String,
}

impl ProfileId {
    /// The host names the application; exactly two path segments must follow
    pub fn from_address(address: &Address) -> SourceResult<Self> {
        let application = address.host();
        if application.is_empty() {
            return Err(LaminateError::missing("appconfig", "application name", USAGE));
        }

        let segments: Vec<&str> = address.trimmed_path().split('/').collect();
        match segments.as_slice() {
            [environment, profile] if !environment.is_empty() && !profile.is_empty() => Ok(Self {
                application: application.to_string(),
                environment: environment.to_string(),
                profile: profile.to_string(),
            }),
            _ => Err(LaminateError::missing(
                "appconfig",
                "environment and configuration profile",
                USAGE,
            )),
        }
    }
}

/// Fetches the latest deployed configuration of an AppConfig profile
#[derive(Debug, Clone)]
pub struct AppConfigBackend {
    client: Client,
    credentials: Option<AwsCredentials>,
    region: String,
    endpoint: Option<String>,
}

impl AppConfigBackend {
    /// Backend using credentials and region from the AWS environment
    pub fn new(client: Client) -> Self {
        Self {
            client,
            credentials: AwsCredentials::from_env(),
            region: default_region(),
            endpoint: None,
        }
    }

    /// Replace the credentials
    pub fn with_credentials(mut self, credentials: Option<AwsCredentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Talk to a custom AppConfig Data endpoint instead of the regional one
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    fn endpoint(&self, region: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://appconfigdata.{}.amazonaws.com", region),
        }
    }

    fn parse_url(address: &Address, raw: &str) -> SourceResult<Url> {
        Url::parse(raw).map_err(|e| LaminateError::LocatorParse {
            locator: address.locator.clone(),
            message: format!("invalid AppConfig URL {}: {}", raw, e),
        })
    }
}

impl Backend for AppConfigBackend {
    fn fetch(&self, address: &Address) -> SourceResult<Vec<u8>> {
        let id = ProfileId::from_address(address)?;
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            LaminateError::fetch_message(
                address.locator.as_str(),
                "AWS credentials not found (set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY)",
            )
        })?;

        let region = address.query_param("region").unwrap_or_else(|| self.region.clone());
        let endpoint = self.endpoint(&region);
        let signer = Signer {
            credentials,
            region: &region,
            service: "appconfig",
            content_sha256_header: false,
        };

        // Start a configuration session
        let session_url = Self::parse_url(address, &format!("{}/configurationsessions", endpoint))?;
        let body = serde_json::to_vec(&StartSessionRequest {
            application_identifier: &id.application,
            environment_identifier: &id.environment,
            configuration_profile_identifier: &id.profile,
        })
        .map_err(|e| LaminateError::fetch(address.locator.as_str(), "failed to encode session request", e))?;

        let mut request = self
            .client
            .post(session_url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        for (name, value) in signer.sign("POST", &session_url, &body, Utc::now()) {
            request = request.header(name, value);
        }
        debug!(
            "Starting AppConfig session for {}/{}/{}",
            id.application, id.environment, id.profile
        );
        let session_body = read_body(address, request.body(body))?;
        let session: StartSessionResponse = serde_json::from_slice(&session_body).map_err(|e| {
            LaminateError::fetch(address.locator.as_str(), "unexpected StartConfigurationSession response", e)
        })?;

        // Read the latest configuration
        let mut config_url = Self::parse_url(address, &format!("{}/configuration", endpoint))?;
        config_url
            .query_pairs_mut()
            .append_pair("configuration_token", &session.initial_configuration_token);

        let mut request = self.client.get(config_url.clone());
        for (name, value) in signer.sign("GET", &config_url, b"", Utc::now()) {
            request = request.header(name, value);
        }
        let data = read_body(address, request)?;

        if data.is_empty() {
            return Err(LaminateError::fetch_message(
                address.locator.as_str(),
                "empty configuration received from AppConfig",
            ));
        }
        Ok(data)
    }
}
