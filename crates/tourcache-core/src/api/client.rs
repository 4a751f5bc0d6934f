//! Sheet client for downloading the published CSV export.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use super::FetchError;
use crate::config::Config;

/// Anything that can hand back the raw text behind a sheet URL.
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP client for the sheet host.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct SheetClient {
    client: Client,
}

impl SheetClient {
    /// Create a client with the timeout and User-Agent from `config`
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }

    /// Create a client with an explicit timeout, keeping the default User-Agent.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(crate::config::DEFAULT_USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(FetchError::from_status(status, &body))
        }
    }
}

#[async_trait]
impl SheetSource for SheetClient {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "text/csv, text/plain;q=0.9, */*;q=0.1")
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let response = Self::check_response(response).await?;

        let body = response.text().await.map_err(FetchError::from_transport)?;
        debug!(url = url, bytes = body.len(), "Sheet response received");
        Ok(body)
    }
}
