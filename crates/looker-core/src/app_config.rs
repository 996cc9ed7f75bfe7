use std::path::PathBuf;
use std::time::Duration;

/// Fixed delays applied between upstream requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    /// Wait before a continuation token is used. The upstream rejects tokens
    /// that are reused too soon after they are issued.
    pub page_token_delay_ms: u64,
    /// Wait after each keyword query.
    pub keyword_delay_ms: u64,
    /// Wait after each successful detail fetch.
    pub detail_delay_ms: u64,
}

impl PacingConfig {
    /// No delays at all. Used by tests and mock-server runs.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            page_token_delay_ms: 0,
            keyword_delay_ms: 0,
            detail_delay_ms: 0,
        }
    }

    #[must_use]
    pub fn page_token_delay(&self) -> Duration {
        Duration::from_millis(self.page_token_delay_ms)
    }

    #[must_use]
    pub fn keyword_delay(&self) -> Duration {
        Duration::from_millis(self.keyword_delay_ms)
    }

    #[must_use]
    pub fn detail_delay(&self) -> Duration {
        Duration::from_millis(self.detail_delay_ms)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            page_token_delay_ms: 2_000,
            keyword_delay_ms: 300,
            detail_delay_ms: 100,
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub places_api_key: String,
    pub places_base_url: String,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub pacing: PacingConfig,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("places_api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("output_dir", &self.output_dir)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("pacing", &self.pacing)
            .finish()
    }
}
