//! Places API client and the category search aggregator.

pub mod aggregate;
pub mod api;
pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use aggregate::{dedup_by_place_id, Aggregator, SearchStats, MAX_EXTRA_PAGES};
pub use api::PlacesApi;
pub use client::GooglePlacesClient;
pub use error::PlacesError;
pub use types::{NearbyPage, NearbyRequest, PlaceDetails, RawHit};
