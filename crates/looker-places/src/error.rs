use thiserror::Error;

/// Errors returned by the Places API client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The envelope returned `"status": "OVER_QUERY_LIMIT"`.
    #[error("Places API quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The envelope returned `"status": "REQUEST_DENIED"`, usually a bad or
    /// unauthorised API key.
    #[error("Places API request denied: {0}")]
    RequestDenied(String),

    /// Any other non-success envelope status (`INVALID_REQUEST`,
    /// `UNKNOWN_ERROR`, `NOT_FOUND`, ...).
    #[error("Places API returned {status}: {message}")]
    ApiStatus { status: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
