//! Solana Tracker API Client
//!
//! Thin HTTP client for the Solana Tracker data API. One attempt per call:
//! non-success statuses and transport failures are classified and returned,
//! never retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;

use crate::ports::data_provider::{TrackerDataPort, TrackerError};

/// Default API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://data.solanatracker.io";

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Solana Tracker client configuration
#[derive(Debug, Clone)]
pub struct TrackerApiConfig {
    /// Base URL for the data API
    pub base_url: String,
    /// API key sent with every request
    pub api_key: Option<String>,
    /// Request timeout; `None` leaves it to the transport
    pub timeout: Option<Duration>,
}

impl Default for TrackerApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            timeout: None,
        }
    }
}

impl TrackerApiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Solana Tracker data API client
#[derive(Debug, Clone)]
pub struct TrackerApiClient {
    config: TrackerApiConfig,
    http: Client,
}

impl TrackerApiClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self, TrackerError> {
        Self::with_config(TrackerApiConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: TrackerApiConfig) -> Result<Self, TrackerError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        match config.api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => {
                let mut value = HeaderValue::from_str(key)
                    .map_err(|e| TrackerError::Client(format!("Invalid API key header: {}", e)))?;
                value.set_sensitive(true);
                headers.insert(API_KEY_HEADER, value);
            }
            None => {
                tracing::warn!("No Solana Tracker API key configured; requests will likely be rejected");
            }
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| TrackerError::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Absolute URL for an API path
    pub fn url_for(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// GET `path` and return the body as untyped JSON
    pub async fn request(&self, path: &str) -> Result<Value, TrackerError> {
        let url = self.url_for(path);
        tracing::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            // hyper only records the phrase when it differs from the canonical one
            let status_text = response
                .extensions()
                .get::<hyper::ext::ReasonPhrase>()
                .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned())
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_default();
            tracing::debug!("{} returned {} {}", url, status.as_u16(), status_text);
            return Err(TrackerError::Api {
                status: status.as_u16(),
                status_text,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| TrackerError::Decode(e.to_string()))
    }

    /// Get the configured API base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[async_trait]
impl TrackerDataPort for TrackerApiClient {
    async fn request(&self, path: &str) -> Result<Value, TrackerError> {
        TrackerApiClient::request(self, path).await
    }
}
