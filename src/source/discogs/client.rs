//! Discogs HTTP client
//!
//! Handles communication with the Discogs database API.
//! See: https://www.discogs.com/developers
//!
//! IMPORTANT: Discogs rejects requests without a User-Agent. Unauthenticated
//! clients are limited to 25 requests per minute, authenticated ones to 60.

use async_trait::async_trait;

use super::{adapter, dto};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::source::{MetadataSource, Release, SourceError};

/// Domain whose resources this client handles
pub const DISCOGS_DOMAIN: &str = "api.discogs.com";

/// Default user agent string
pub const USER_AGENT: &str = concat!("AlbumTagger/", env!("CARGO_PKG_VERSION"));

/// Discogs API client
pub struct DiscogsClient {
    http_client: reqwest::Client,
    token: Option<String>,
}

impl DiscogsClient {
    /// Create a new client
    pub fn new(user_agent: &str, token: Option<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http_client, token })
    }

    /// Create a client from the user agent and token in `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.source.user_agent,
            config.credentials.discogs_token.clone(),
        )
    }

    /// Look up a release by its API URI and convert it to model types
    pub async fn lookup_release(&self, uri: &str) -> std::result::Result<Release, SourceError> {
        let response = self.send_release_request(uri).await?;
        Ok(adapter::to_release(response))
    }

    /// Send the HTTP request and parse the response
    async fn send_release_request(
        &self,
        uri: &str,
    ) -> std::result::Result<dto::ReleaseResponse, SourceError> {
        let mut request = self.http_client.get(uri);
        if let Some(ref token) = self.token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Discogs token={token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited);
        }

        if !status.is_success() {
            // Try to parse error response
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(SourceError::ApiError(error.message));
            }
            return Err(SourceError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<dto::ReleaseResponse>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl MetadataSource for DiscogsClient {
    fn name(&self) -> &str {
        "discogs"
    }

    fn is_mine_resource(&self, domain: &str) -> bool {
        domain == DISCOGS_DOMAIN
    }

    async fn fetch(&self, uri: &str) -> std::result::Result<Release, SourceError> {
        self.lookup_release(uri).await
    }
}
