//! HTTP client for the Places "Nearby Search" and "Place Details" JSON API.
//!
//! Wraps `reqwest` with API key handling, envelope status checks, and retry
//! on transient failures. Errors never carry the request URL, since it holds
//! the API key.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::api::PlacesApi;
use crate::error::PlacesError;
use crate::retry::retry_with_backoff;
use crate::types::{
    DetailsResponse, NearbyPage, NearbyRequest, NearbySearchResponse, PlaceDetails, DETAIL_FIELDS,
};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_BACKOFF_BASE_MS: u64 = 1_000;

/// Client for the Places JSON API.
///
/// Use [`GooglePlacesClient::new`] for production or
/// [`GooglePlacesClient::with_base_url`] to point at a mock server in tests.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    nearby_url: Url,
    details_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl std::fmt::Debug for GooglePlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GooglePlacesClient")
            .field("api_key", &"[redacted]")
            .field("nearby_url", &self.nearby_url.as_str())
            .field("details_url", &self.details_url.as_str())
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .finish_non_exhaustive()
    }
}

impl GooglePlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("looker/0.1 (places-search)")
            .build()?;

        // Exactly one trailing slash so `join` appends the endpoint path
        // instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |reason: String| PlacesError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason,
        };
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_owned()));
        }
        let nearby_url = base
            .join("nearbysearch/json")
            .map_err(|e| invalid(e.to_string()))?;
        let details_url = base
            .join("details/json")
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            nearby_url,
            details_url,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        })
    }

    /// Builds a client from application config.
    ///
    /// # Errors
    ///
    /// See [`GooglePlacesClient::with_base_url`].
    pub fn from_config(config: &looker_core::AppConfig) -> Result<Self, PlacesError> {
        Ok(Self::with_base_url(
            &config.places_api_key,
            config.request_timeout_secs,
            &config.places_base_url,
        )?
        .with_retry_policy(config.max_retries, config.retry_backoff_base_ms))
    }

    /// Overrides the retry policy. `max_retries = 0` disables retries.
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Builds the nearby-search URL for `request`.
    fn nearby_request_url(&self, request: &NearbyRequest) -> Url {
        match request {
            NearbyRequest::Query {
                location,
                radius,
                place_type,
                keyword,
            } => {
                let location = location.to_query_param();
                let radius = radius.to_string();
                let mut params = vec![("location", location.as_str()), ("radius", radius.as_str())];
                if let Some(t) = place_type {
                    params.push(("type", t.as_str()));
                }
                if let Some(k) = keyword {
                    params.push(("keyword", k.as_str()));
                }
                self.build_url(&self.nearby_url, &params)
            }
            NearbyRequest::Page { token } => {
                self.build_url(&self.nearby_url, &[("pagetoken", token.as_str())])
            }
        }
    }

    /// Clones `endpoint` and appends `key` plus `extra` as percent-encoded
    /// query parameters.
    fn build_url(&self, endpoint: &Url, extra: &[(&str, &str)]) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] on network failure or a non-2xx status,
    /// [`PlacesError::Deserialize`] if the body does not match `T`.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, PlacesError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(redact_url)?;
        let response = response.error_for_status().map_err(redact_url)?;
        let body = response.text().await.map_err(redact_url)?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[async_trait]
impl PlacesApi for GooglePlacesClient {
    async fn nearby_search(&self, request: &NearbyRequest) -> Result<NearbyPage, PlacesError> {
        let url = self.nearby_request_url(request);
        let context = describe_nearby(request);

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            let context = context.clone();
            async move {
                let response: NearbySearchResponse = self.request_json(&url, &context).await?;
                check_status(&response.status, response.error_message.as_deref())?;
                Ok(NearbyPage::from(response))
            }
        })
        .await
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = self.build_url(
            &self.details_url,
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        );
        let context = format!("details(place_id={place_id})");

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            let context = context.clone();
            async move {
                let response: DetailsResponse = self.request_json(&url, &context).await?;
                check_status(&response.status, response.error_message.as_deref())?;
                let result = response.result.ok_or_else(|| PlacesError::ApiStatus {
                    status: response.status.clone(),
                    message: format!("no result in {context}"),
                })?;
                Ok(PlaceDetails::from(result))
            }
        })
        .await
    }
}

/// Maps the envelope `status` to an error. `OK` and `ZERO_RESULTS` pass.
fn check_status(status: &str, error_message: Option<&str>) -> Result<(), PlacesError> {
    let message = || error_message.unwrap_or("no error message").to_owned();
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        "OVER_QUERY_LIMIT" => Err(PlacesError::QuotaExceeded(message())),
        "REQUEST_DENIED" => Err(PlacesError::RequestDenied(message())),
        other => Err(PlacesError::ApiStatus {
            status: other.to_owned(),
            message: message(),
        }),
    }
}

/// Log/error context for a nearby request. Never includes the key or token.
fn describe_nearby(request: &NearbyRequest) -> String {
    match request {
        NearbyRequest::Query {
            place_type,
            keyword,
            ..
        } => format!(
            "nearbysearch(type={}, keyword={})",
            place_type.as_deref().unwrap_or("-"),
            keyword.as_deref().unwrap_or("-")
        ),
        NearbyRequest::Page { .. } => "nearbysearch(pagetoken)".to_owned(),
    }
}

fn redact_url(e: reqwest::Error) -> PlacesError {
    PlacesError::Http(e.without_url())
}
