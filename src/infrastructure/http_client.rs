//! Single-shot page fetch for the listing page.
//!
//! The run is a one-shot batch job: one GET, no retries, no rate limiting.
//! Any fetch failure is fatal to the whole run.

use std::time::Duration;

use anyhow::{Result, anyhow};
use reqwest::{Client, ClientBuilder, StatusCode};
use thiserror::Error;
use tracing::info;

/// Fetch failures. Every variant aborts the run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed for {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    Status { status: StatusCode, url: String },

    #[error("empty response body from {url}")]
    EmptyBody { url: String },
}

/// Configuration for HTTP client behavior.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "westtamar-scraper/0.1 (planning application monitor)".to_string(),
        }
    }
}

/// Thin wrapper around a configured reqwest client.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client })
    }

    /// Fetches the page body as text. A non-2xx status or an empty body is
    /// as fatal as a transport failure.
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        info!("Fetching page content from: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            source: e,
        })?;

        if body.is_empty() {
            return Err(FetchError::EmptyBody {
                url: url.to_string(),
            });
        }

        info!("Successfully fetched page content ({} bytes)", body.len());
        Ok(body)
    }
}
