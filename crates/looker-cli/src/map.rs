//! Standalone Leaflet map of the exported places.

use std::path::Path;

use anyhow::Context;
use looker_core::PlaceRecord;
use serde::Serialize;

const INITIAL_ZOOM: u8 = 12;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>__TITLE__</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map('map').setView([__CENTER_LAT__, __CENTER_LNG__], __ZOOM__);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
  maxZoom: 19,
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);
var markers = __MARKERS__;
markers.forEach(function (m) {
  L.marker([m.lat, m.lng]).addTo(map).bindPopup(m.popup).bindTooltip(m.tooltip);
});
</script>
</body>
</html>
"#;

#[derive(Debug, Serialize)]
struct Marker {
    lat: f64,
    lng: f64,
    popup: String,
    tooltip: String,
}

impl Marker {
    fn from_record(record: &PlaceRecord) -> Option<Self> {
        let (lat, lng) = record.coordinates()?;
        let name = escape_html(record.name.as_deref().unwrap_or_default());
        let address = escape_html(record.address.as_deref().unwrap_or_default());
        let category = escape_html(&record.category);
        Some(Self {
            lat,
            lng,
            popup: format!("{name}<br>{address}<br><b>{category}</b>"),
            tooltip: address,
        })
    }
}

/// Render the map document, or `None` when no record has coordinates.
///
/// The view is centered on the first record that has coordinates.
pub(crate) fn render_map(
    title: &str,
    records: &[PlaceRecord],
) -> anyhow::Result<Option<String>> {
    let markers: Vec<Marker> = records.iter().filter_map(Marker::from_record).collect();
    let Some(center) = markers.first() else {
        return Ok(None);
    };

    // `</` inside a script block would end it early.
    let markers_json = serde_json::to_string(&markers)?.replace("</", "<\\/");
    let html = TEMPLATE
        .replace("__TITLE__", &escape_html(title))
        .replace("__CENTER_LAT__", &center.lat.to_string())
        .replace("__CENTER_LNG__", &center.lng.to_string())
        .replace("__ZOOM__", &INITIAL_ZOOM.to_string())
        .replace("__MARKERS__", &markers_json);
    Ok(Some(html))
}

/// Write the map to `path`. Returns `false`, writing nothing, when no record
/// has coordinates.
pub(crate) fn write_map(path: &Path, records: &[PlaceRecord]) -> anyhow::Result<bool> {
    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("places");
    let Some(html) = render_map(title, records)? else {
        tracing::warn!(path = %path.display(), "no places with coordinates; skipping map");
        return Ok(false);
    };
    std::fs::write(path, html)
        .with_context(|| format!("failed to write map {}", path.display()))?;
    Ok(true)
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
