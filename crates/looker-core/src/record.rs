use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::geo::GeoPoint;

/// One Aggregator invocation: a point, a radius, and the category to search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub point: GeoPoint,
    /// Search radius in meters.
    pub radius: u32,
    /// Used only to tag output records.
    pub category_label: String,
    /// Free-text keywords, queried in order. May be empty.
    pub keywords: Vec<String>,
    /// Upstream place type. When set, a single query is issued.
    pub fixed_type: Option<String>,
}

impl SearchQuery {
    #[must_use]
    pub fn for_category(point: GeoPoint, radius: u32, category: &Category) -> Self {
        Self {
            point,
            radius,
            category_label: category.label.to_string(),
            keywords: category.keywords.iter().map(|k| (*k).to_string()).collect(),
            fixed_type: category.place_type.map(str::to_string),
        }
    }

    /// The `"{lat}, {lng}"` tag written on every record from this query.
    #[must_use]
    pub fn search_origin(&self) -> String {
        self.point.to_string()
    }
}

/// A place enriched with detail fields, ready for export.
///
/// Serialized field names are the spreadsheet column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    #[serde(rename = "Place ID")]
    pub place_id: String,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "Phone")]
    pub phone: Option<String>,
    #[serde(rename = "Website")]
    pub website: Option<String>,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
    #[serde(rename = "Total Ratings")]
    pub rating_count: Option<u32>,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Search Origin")]
    pub search_origin: String,
}

impl PlaceRecord {
    /// Column headers in export order.
    pub const COLUMNS: [&'static str; 11] = [
        "Place ID",
        "Name",
        "Address",
        "Phone",
        "Website",
        "Latitude",
        "Longitude",
        "Rating",
        "Total Ratings",
        "Category",
        "Search Origin",
    ];

    /// Returns the record's coordinates when both are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}
