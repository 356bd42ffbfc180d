//! API client for communicating with the Trello REST API.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests to fetch a member's boards, a board's lists and a list's cards.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::{header, Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Credentials;
use crate::models::{Board, Card, List};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Default base URL for the Trello API (paths carry the `1` version segment)
pub const DEFAULT_BASE_URL: &str = "https://api.trello.com";

/// Trello REST API version segment
const API_VERSION: &str = "1";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// API client for Trello.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    key: String,
    token: String,
    initial_backoff: Duration,
}

impl ApiClient {
    /// Create a new API client against the public Trello endpoint
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a new API client against another endpoint (proxies, tests)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Invalid API base URL: {}", base_url));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url,
            key: String::new(),
            token: String::new(),
            initial_backoff: Duration::from_millis(INITIAL_BACKOFF_MS),
        })
    }

    /// Create a new ApiClient with the given credentials, sharing the connection pool.
    pub fn with_credentials(&self, credentials: &Credentials) -> Self {
        Self {
            key: credentials.auth_key.clone(),
            token: credentials.auth_token.clone(),
            ..self.clone()
        }
    }

    /// Override the first rate-limit backoff; later retries double it.
    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL below the base, escaping each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Invalid API base URL: {}", self.base_url))?
            .pop_if_empty()
            .push(API_VERSION)
            .extend(segments);
        Ok(url)
    }

    /// Trello's OAuth-style header. Kept out of the URL so it never shows up
    /// in request errors.
    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut value = header::HeaderValue::from_str(&format!(
            "OAuth oauth_consumer_key=\"{}\", oauth_token=\"{}\"",
            self.key, self.token
        ))
        .map_err(|_| anyhow!("Credentials contain characters not allowed in an HTTP header"))?;
        value.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value);
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other errors.
    async fn check_response_for_retry(
        response: reqwest::Response,
    ) -> Result<Option<reqwest::Response>> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status().as_u16() == 429 {
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();
        let mut retries = 0;
        let mut backoff = self.initial_backoff;

        loop {
            debug!(path = %path, "GET");
            let response = self
                .client
                .get(url.clone())
                .headers(self.auth_headers()?)
                .send()
                .await
                .map_err(|e| ApiError::from(e.without_url()))
                .with_context(|| format!("Failed to send GET request to {}", path))?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => {
                    return response
                        .json()
                        .await
                        .map_err(|e| ApiError::from(e.without_url()))
                        .with_context(|| format!("Failed to parse JSON response from {}", path));
                }
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited.into());
                    }
                    warn!(path = %path, retry = retries, backoff_ms = backoff.as_millis() as u64, "Rate limited, backing off");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
            }
        }
    }

    // ===== Data Fetching Methods =====

    /// Fetch every board visible to a member, open and closed
    pub async fn fetch_boards(&self, username: &str) -> Result<Vec<Board>> {
        self.get(&["members", username, "boards"]).await
    }

    /// Fetch the lists on a board
    pub async fn fetch_lists(&self, board_id: &str) -> Result<Vec<List>> {
        self.get(&["boards", board_id, "lists"]).await
    }

    /// Fetch the cards on a list
    pub async fn fetch_cards(&self, list_id: &str) -> Result<Vec<Card>> {
        self.get(&["lists", list_id, "cards"]).await
    }

    /// Fetch a board's open lists together with their cards.
    ///
    /// Card requests for all open lists run concurrently; results come back
    /// in the board's list order. Closed lists are never queried.
    pub async fn fetch_open_lists_with_cards(&self, board_id: &str) -> Result<Vec<(List, Vec<Card>)>> {
        let lists: Vec<List> = self
            .fetch_lists(board_id)
            .await?
            .into_iter()
            .filter(List::is_open)
            .collect();
        debug!(board = board_id, lists = lists.len(), "Fetching cards for open lists");

        let card_requests = lists.iter().map(|list| self.fetch_cards(&list.id));
        let results = futures::future::join_all(card_requests).await;

        lists
            .into_iter()
            .zip(results)
            .map(|(list, cards)| -> Result<(List, Vec<Card>)> {
                let cards = cards.with_context(|| format!("Failed to fetch cards for list '{}'", list.name))?;
                Ok((list, cards))
            })
            .collect()
    }
}
