use crate::app_config::{AppConfig, PacingConfig};
use crate::ConfigError;

const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let places_api_key = require("LOOKER_PLACES_API_KEY")?;
    let places_base_url = or_default("LOOKER_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    let output_dir = PathBuf::from(or_default("LOOKER_OUTPUT_DIR", "./output"));
    let log_level = or_default("LOOKER_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("LOOKER_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LOOKER_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let max_retries = parse_u32("LOOKER_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("LOOKER_RETRY_BACKOFF_BASE_MS", "1000")?;

    let pacing = PacingConfig {
        page_token_delay_ms: parse_u64("LOOKER_PAGE_TOKEN_DELAY_MS", "2000")?,
        keyword_delay_ms: parse_u64("LOOKER_KEYWORD_DELAY_MS", "300")?,
        detail_delay_ms: parse_u64("LOOKER_DETAIL_DELAY_MS", "100")?,
    };

    Ok(AppConfig {
        places_api_key,
        places_base_url,
        output_dir,
        log_level,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        pacing,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("LOOKER_PLACES_API_KEY", "test-key");
        m
    }

    #[test]
    fn build_app_config_fails_without_api_key() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "LOOKER_PLACES_API_KEY"),
            "expected MissingEnvVar(LOOKER_PLACES_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_treats_blank_api_key_as_missing() {
        let mut map = HashMap::new();
        map.insert("LOOKER_PLACES_API_KEY", "   ");
        let result = build_app_config(lookup_from_map(&map));
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
    }

    #[test]
    fn build_app_config_succeeds_with_defaults() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.places_api_key, "test-key");
        assert_eq!(cfg.places_base_url, DEFAULT_PLACES_BASE_URL);
        assert_eq!(cfg.output_dir.to_str(), Some("./output"));
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.max_retries, 2);
        assert_eq!(cfg.retry_backoff_base_ms, 1000);
        assert_eq!(cfg.pacing, PacingConfig::default());
    }

    #[test]
    fn pacing_overrides_are_applied() {
        let mut map = full_env();
        map.insert("LOOKER_PAGE_TOKEN_DELAY_MS", "2500");
        map.insert("LOOKER_KEYWORD_DELAY_MS", "0");
        map.insert("LOOKER_DETAIL_DELAY_MS", "50");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.pacing.page_token_delay_ms, 2500);
        assert_eq!(cfg.pacing.keyword_delay_ms, 0);
        assert_eq!(cfg.pacing.detail_delay_ms, 50);
    }

    #[test]
    fn output_dir_override() {
        let mut map = full_env();
        map.insert("LOOKER_OUTPUT_DIR", "/tmp/looker-out");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.output_dir.to_str(), Some("/tmp/looker-out"));
    }

    #[test]
    fn max_retries_invalid() {
        let mut map = full_env();
        map.insert("LOOKER_MAX_RETRIES", "lots");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LOOKER_MAX_RETRIES"),
            "expected InvalidEnvVar(LOOKER_MAX_RETRIES), got: {result:?}"
        );
    }

    #[test]
    fn page_token_delay_invalid() {
        let mut map = full_env();
        map.insert("LOOKER_PAGE_TOKEN_DELAY_MS", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LOOKER_PAGE_TOKEN_DELAY_MS"),
            "expected InvalidEnvVar(LOOKER_PAGE_TOKEN_DELAY_MS), got: {result:?}"
        );
    }

    #[test]
    fn zero_request_timeout_is_rejected() {
        let mut map = full_env();
        map.insert("LOOKER_REQUEST_TIMEOUT_SECS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LOOKER_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(LOOKER_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("test-key"), "api key leaked: {rendered}");
        assert!(rendered.contains("[redacted]"));
    }
}
