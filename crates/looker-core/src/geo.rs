//! Coordinates and search radius validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A validated WGS84 coordinate.
///
/// Construction through [`GeoPoint::new`] guarantees a finite latitude in
/// `[-90, 90]` and a finite longitude in `[-180, 180]`. Deserialization goes
/// through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawPoint {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawPoint> for GeoPoint {
    type Error = CoreError;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.lat, raw.lng)
    }
}

impl GeoPoint {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] if either component is out of
    /// range or not finite.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        if is_valid_lat(lat) && is_valid_lng(lng) {
            Ok(Self { lat, lng })
        } else {
            Err(CoreError::InvalidCoordinate { lat, lng })
        }
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// The `"lat,lng"` form the upstream `location` parameter expects.
    #[must_use]
    pub fn to_query_param(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

/// Renders as `"{lat}, {lng}"`, the search-origin tag written on each record.
/// Whole numbers keep their fractional part (`40.0`, not `40`).
impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}, {:?}", self.lat, self.lng)
    }
}

/// Parses `"38.7,-9.1"` or `"38.7, -9.1"`.
impl FromStr for GeoPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lat,lng\", got \"{s}\""))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid latitude \"{}\": {e}", lat.trim()))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid longitude \"{}\": {e}", lng.trim()))?;
        GeoPoint::new(lat, lng).map_err(|e| e.to_string())
    }
}

#[must_use]
pub fn is_valid_lat(lat: f64) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

#[must_use]
pub fn is_valid_lng(lng: f64) -> bool {
    lng.is_finite() && (-180.0..=180.0).contains(&lng)
}

/// Parse a search radius in meters. Must be a positive integer.
///
/// # Errors
///
/// Returns [`CoreError::InvalidRadius`] for zero or negative values. Non-numeric
/// input is reported as radius `0`.
pub fn parse_radius(raw: &str) -> Result<u32, CoreError> {
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| CoreError::InvalidRadius(0))?;
    if value <= 0 {
        return Err(CoreError::InvalidRadius(value));
    }
    u32::try_from(value).map_err(|_| CoreError::InvalidRadius(value))
}
