use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::models::{ApiError, FeedResponse};

/// NASA NeoWs API client for the close-approach feed
pub struct NeoWsClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl NeoWsClient {
    pub const DEFAULT_FEED_URL: &'static str = "https://api.nasa.gov/neo/rest/v1/feed";

    /// Create a new client against `base_url` with a request timeout
    pub fn with_base_url(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        Self::from_builder(HttpClient::builder().timeout(timeout), api_key, base_url)
    }

    /// Client for a local responder, never routed through a system proxy
    #[cfg(test)]
    pub(crate) fn without_proxy(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        Self::from_builder(
            HttpClient::builder().timeout(timeout).no_proxy(),
            api_key,
            base_url,
        )
    }

    fn from_builder(
        builder: reqwest::ClientBuilder,
        api_key: String,
        base_url: String,
    ) -> Result<Self, ApiError> {
        let http_client = builder
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            base_url,
        })
    }

    /// Feed endpoint this client queries
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let remaining = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            401 | 403 => ApiError::Unauthorized(body_text),
            429 => {
                warn!("Feed rate limited, {:?} requests remaining", remaining);
                ApiError::RateLimited { remaining }
            }
            500..=599 => {
                warn!("Feed server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// GET /feed?start_date=..&end_date=..
    ///
    /// Retrieves every close approach between the two dates (inclusive).
    ///
    /// # Returns
    /// * `Ok(FeedResponse)` - Parsed feed body
    /// * `Err(ApiError)` - Transport, status or body-shape failure
    pub async fn get_feed(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<FeedResponse, ApiError> {
        let start = start_date.format("%Y-%m-%d").to_string();
        let end = end_date.format("%Y-%m-%d").to_string();
        debug!("Requesting feed {} from {} to {}", self.base_url, start, end);

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[
                ("start_date", start.as_str()),
                ("end_date", end.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout(format!("Request failed: {}", e.without_url()))
                } else {
                    ApiError::RequestError(format!("Request failed: {}", e.without_url()))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(format!("Reading body failed: {}", e.without_url()))
            } else {
                ApiError::RequestError(format!("Reading body failed: {}", e.without_url()))
            }
        })?;

        serde_json::from_str::<FeedResponse>(&body)
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}
