pub mod app_config;
pub mod catalog;
pub mod config;
pub mod geo;
pub mod record;

pub use app_config::{AppConfig, PacingConfig};
pub use catalog::{categories, find_category, parse_selection, Category};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{parse_radius, GeoPoint};
pub use record::{PlaceRecord, SearchQuery};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid coordinate ({lat}, {lng}): latitude must be in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("invalid radius {0}: must be a positive number of meters")]
    InvalidRadius(i64),
}
