//! Places API request and response types.
//!
//! The wire types model the legacy JSON endpoints, which wrap every response
//! in a `{"status": "OK", ...}` envelope. The domain types ([`RawHit`],
//! [`NearbyPage`], [`PlaceDetails`]) are what the rest of the crate works with.

use looker_core::geo::{is_valid_lat, is_valid_lng};
use looker_core::GeoPoint;
use serde::Deserialize;

/// Field mask requested from the details endpoint.
pub const DETAIL_FIELDS: &str =
    "name,formatted_address,formatted_phone_number,website,geometry,rating,user_ratings_total";

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// One nearby-search request: either a fresh query or a continuation page.
#[derive(Debug, Clone, PartialEq)]
pub enum NearbyRequest {
    Query {
        location: GeoPoint,
        radius: u32,
        place_type: Option<String>,
        keyword: Option<String>,
    },
    Page {
        token: String,
    },
}

// ---------------------------------------------------------------------------
// Domain results
// ---------------------------------------------------------------------------

/// A nearby-search candidate. Only the identifier is carried forward; the
/// name is kept for log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHit {
    pub place_id: String,
    pub name: Option<String>,
}

/// One page of nearby-search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NearbyPage {
    pub hits: Vec<RawHit>,
    pub next_page_token: Option<String>,
}

/// Detail fields for a single place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
}

// ---------------------------------------------------------------------------
// Wire format: nearbysearch/json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<NearbyResult>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NearbyResult {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<NearbySearchResponse> for NearbyPage {
    /// Drops candidates without an identifier and treats an empty token as
    /// no token.
    fn from(response: NearbySearchResponse) -> Self {
        let returned = response.results.len();
        let hits: Vec<RawHit> = response
            .results
            .into_iter()
            .filter_map(|r| {
                let place_id = r.place_id.filter(|id| !id.trim().is_empty())?;
                Some(RawHit {
                    place_id,
                    name: r.name,
                })
            })
            .collect();
        let dropped = returned - hits.len();
        if dropped > 0 {
            tracing::debug!(dropped, returned, "skipping nearby results without a place_id");
        }
        Self {
            hits,
            next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire format: details/json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    #[serde(default)]
    pub location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<DetailsResult> for PlaceDetails {
    /// Out-of-range coordinates are discarded rather than exported.
    fn from(result: DetailsResult) -> Self {
        let location = result.geometry.and_then(|g| g.location);
        let latitude = location.as_ref().map(|l| l.lat).filter(|v| is_valid_lat(*v));
        let longitude = location.as_ref().map(|l| l.lng).filter(|v| is_valid_lng(*v));
        Self {
            name: result.name,
            address: result.formatted_address,
            phone: result.formatted_phone_number,
            website: result.website,
            latitude,
            longitude,
            rating: result.rating,
            rating_count: result.user_ratings_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn dropped_results_are_logged() {
        let response: NearbySearchResponse = serde_json::from_value(serde_json::json!({
            "status": "OK",
            "results": [{ "place_id": "a" }, { "name": "No id" }, { "place_id": "" }]
        }))
        .unwrap();
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();

        let page = tracing::subscriber::with_default(subscriber, || NearbyPage::from(response));

        assert_eq!(page.hits.len(), 1);
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("dropped=2"), "logs: {output}");
    }

    #[test]
    fn nearby_page_skips_results_without_place_id() {
        let response: NearbySearchResponse = serde_json::from_value(serde_json::json!({
            "status": "OK",
            "results": [
                { "place_id": "a", "name": "Alpha" },
                { "name": "No id" },
                { "place_id": "  " },
                { "place_id": "b" }
            ],
            "next_page_token": ""
        }))
        .unwrap();
        let page = NearbyPage::from(response);
        let ids: Vec<&str> = page.hits.iter().map(|h| h.place_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(page.next_page_token, None);
    }

    #[test]
    fn details_flatten_geometry() {
        let response: DetailsResponse = serde_json::from_value(serde_json::json!({
            "status": "OK",
            "result": {
                "name": "Casa Nova Imobiliária",
                "formatted_address": "Rua Augusta 1, Lisboa",
                "formatted_phone_number": "21 000 0000",
                "website": "https://casanova.example",
                "geometry": { "location": { "lat": 38.71, "lng": -9.14 } },
                "rating": 4.6,
                "user_ratings_total": 87
            }
        }))
        .unwrap();
        let details = PlaceDetails::from(response.result.unwrap());
        assert_eq!(details.latitude, Some(38.71));
        assert_eq!(details.longitude, Some(-9.14));
        assert_eq!(details.rating_count, Some(87));
        assert_eq!(details.phone.as_deref(), Some("21 000 0000"));
    }

    #[test]
    fn details_drop_out_of_range_coordinates() {
        let response: DetailsResponse = serde_json::from_value(serde_json::json!({
            "status": "OK",
            "result": {
                "name": "Nowhere",
                "geometry": { "location": { "lat": 123.0, "lng": -9.14 } }
            }
        }))
        .unwrap();
        let details = PlaceDetails::from(response.result.unwrap());
        assert_eq!(details.latitude, None);
        assert_eq!(details.longitude, Some(-9.14));
    }

    #[test]
    fn details_tolerate_missing_fields() {
        let response: DetailsResponse =
            serde_json::from_value(serde_json::json!({ "status": "OK", "result": {} })).unwrap();
        assert_eq!(
            PlaceDetails::from(response.result.unwrap()),
            PlaceDetails::default()
        );
    }
}
