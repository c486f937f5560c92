//! API client for the PokeAPI REST service.
//!
//! This module provides the `PokeApiClient` struct for fetching catalog
//! headers and creature details.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::{EntryDto, HeaderListDto, HeaderPage};

use super::{ApiError, CatalogSource};

// ============================================================================
// Constants
// ============================================================================

/// Public PokeAPI host
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co";

/// Path of the creature resource, relative to the host
const POKEMON_PATH: &str = "api/v2/pokemon";

/// HTTP request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// API client for PokeAPI.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone, Debug)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
    initial_backoff: Duration,
}

impl PokeApiClient {
    /// Create a client for another host serving the same API (mirrors, local fixtures)
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            initial_backoff: Duration::from_millis(INITIAL_BACKOFF_MS),
        })
    }

    #[cfg(test)]
    fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn list_url(&self, offset: usize, count: usize) -> String {
        format!(
            "{}/{}/?limit={}&offset={}",
            self.base_url, POKEMON_PATH, count, offset
        )
    }

    fn entry_url(&self, name: &str) -> String {
        format!("{}/{}/{}/", self.base_url, POKEMON_PATH, name)
    }

    /// Check if response is successful, returning an error with body if not.
    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other errors.
    async fn check_response_for_retry(
        response: reqwest::Response,
    ) -> Result<Option<reqwest::Response>, ApiError> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ApiError> {
        if body.trim().is_empty() {
            return Err(ApiError::EmptyBody(url.to_string()));
        }
        serde_json::from_str(body)
            .map_err(|e| ApiError::InvalidResponse(format!("Bad JSON received from {}: {}", url, e)))
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let mut retries = 0;
        let mut backoff = self.initial_backoff;

        loop {
            let response = self
                .client
                .get(url)
                .header(header::ACCEPT, "application/json")
                .send()
                .await?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => {
                    let body = response.text().await?;
                    return Self::decode(url, &body);
                }
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited);
                    }
                    warn!(url = url, retry = retries, backoff_ms = backoff.as_millis() as u64, "Rate limited, backing off");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2; // Exponential backoff
                }
            }
        }
    }
}

#[async_trait]
impl CatalogSource for PokeApiClient {
    async fn fetch_headers(&self, offset: usize, count: usize) -> Result<HeaderPage, ApiError> {
        let url = self.list_url(offset, count);
        debug!(offset, count, "Fetching catalog headers");
        let list: HeaderListDto = self.get(&url).await?;
        Ok(list.into())
    }

    async fn fetch_entry(&self, name: &str) -> Result<EntryDto, ApiError> {
        let url = self.entry_url(name);
        debug!(name, "Fetching catalog entry");
        self.get(&url).await
    }
}
