use async_trait::async_trait;

use crate::error::PlacesError;
use crate::types::{NearbyPage, NearbyRequest, PlaceDetails};

/// The two upstream capabilities the aggregator needs.
///
/// [`crate::GooglePlacesClient`] is the production implementation; tests
/// substitute an in-memory stub.
#[async_trait]
pub trait PlacesApi: Send + Sync {
    /// Fetch one page of nearby-search candidates.
    async fn nearby_search(&self, request: &NearbyRequest) -> Result<NearbyPage, PlacesError>;

    /// Fetch the detail fields for one place.
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError>;
}
