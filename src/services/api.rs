use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::Client;
use thiserror::Error;

use crate::models::{ActionResponse, Decision, FeedResponse, Profile};

/// Errors that can occur when talking to the connection API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: session cookie missing or expired")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the connection API
///
/// Covers the two endpoints the deck consumes:
/// - Feed fetch: the ordered list of candidate profiles
/// - Decision send: one interested/ignored call per committed swipe
///
/// Credentials are ambient: the session cookie from configuration is
/// attached to every request, the engine never handles login itself.
pub struct FeedClient {
    base_url: String,
    client: Client,
}

impl FeedClient {
    /// Create a new API client
    pub fn new(base_url: String, session_cookie: Option<String>, timeout_secs: u64) -> Self {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = session_cookie {
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    headers.insert(COOKIE, value);
                }
                Err(e) => tracing::warn!("Ignoring invalid session cookie: {}", e),
            }
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    /// Fetch the candidate feed
    ///
    /// An empty list is a valid result and distinct from a failed fetch:
    /// the caller records it as an exhausted feed, not as "never loaded".
    pub async fn fetch_feed(&self) -> Result<Vec<Profile>, ApiError> {
        let url = format!("{}/user/feed", self.base_url.trim_end_matches('/'));

        tracing::debug!("Fetching feed from: {}", url);

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(ApiError::ApiError(format!(
                "Failed to fetch feed: {}",
                response.status()
            )));
        }

        let envelope: FeedResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse feed: {}", e)))?;

        let profiles = envelope.into_profiles();
        tracing::debug!("Fetched {} candidate profiles", profiles.len());

        Ok(profiles)
    }

    /// Send one committed decision
    ///
    /// The caller treats this as best-effort: failures are reported but
    /// never retried, and the deck has already advanced by the time the
    /// response arrives.
    pub async fn send_decision(&self, decision: &Decision) -> Result<(), ApiError> {
        let url = format!(
            "{}/request/send/{}/{}",
            self.base_url.trim_end_matches('/'),
            decision.outcome.as_str(),
            urlencoding::encode(&decision.profile_id)
        );

        let response = self.client.post(&url).send().await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(ApiError::ApiError(format!(
                "Failed to send decision: {}",
                response.status()
            )));
        }

        tracing::debug!(
            "Recorded decision: {} -> {}",
            decision.outcome.as_str(),
            decision.profile_id
        );

        if let Ok(body) = response.json::<ActionResponse>().await {
            if let Some(message) = body.message {
                tracing::debug!("Decision response: {}", message);
            }
        }

        Ok(())
    }
}
