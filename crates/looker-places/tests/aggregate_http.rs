//! End-to-end `Aggregator` runs against a wiremock Places API.

use looker_core::{find_category, GeoPoint, PacingConfig, SearchQuery};
use looker_places::{dedup_by_place_id, Aggregator, GooglePlacesClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GooglePlacesClient {
    GooglePlacesClient::with_base_url("test-key", 5, base_url)
        .expect("client construction should not fail")
        .with_retry_policy(0, 0)
}

fn lisbon() -> GeoPoint {
    GeoPoint::new(38.7, -9.1).unwrap()
}

async fn mount_details(server: &MockServer, place_id: &str, name: &str) {
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", place_id))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "name": name,
                "formatted_address": format!("{name}, Lisboa"),
                "geometry": { "location": { "lat": 38.71, "lng": -9.14 } },
                "rating": 4.2,
                "user_ratings_total": 15
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn real_estate_search_returns_tagged_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("type", "real_estate_agency"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{ "place_id": "re-1" }, { "place_id": "re-2" }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_details(&server, "re-1", "Casa Nova").await;
    mount_details(&server, "re-2", "Lar Doce Lar").await;

    let client = test_client(&server.uri());
    let aggregator = Aggregator::new(&client, PacingConfig::none());
    let query = SearchQuery::for_category(lisbon(), 5000, find_category("1").unwrap());

    let records = aggregator.search(&query).await;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name.as_deref(), Some("Casa Nova"));
    assert_eq!(records[1].address.as_deref(), Some("Lar Doce Lar, Lisboa"));
    for r in &records {
        assert_eq!(r.category, "Real Estate Agencies");
        assert_eq!(r.search_origin, "38.7, -9.1");
    }
}

#[tokio::test]
async fn pagination_and_detail_failure_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("keyword", "clube de caça"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{ "place_id": "a" }],
            "next_page_token": "T1"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("pagetoken", "T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{ "place_id": "b" }, { "place_id": "a" }],
            "next_page_token": "T2"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("pagetoken", "T2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{ "place_id": "c" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_details(&server, "a", "Clube A").await;
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "b"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_details(&server, "c", "Clube C").await;

    let client = test_client(&server.uri());
    let aggregator = Aggregator::new(&client, PacingConfig::none());
    let query = SearchQuery {
        point: lisbon(),
        radius: 10_000,
        category_label: "Hunting Associations".to_owned(),
        keywords: vec!["clube de caça".to_owned()],
        fixed_type: None,
    };

    let (records, stats) = aggregator.search_with_stats(&query).await;

    let ids: Vec<&str> = records.iter().map(|r| r.place_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(stats.pages, 3);
    assert_eq!(stats.failed_details, 1);
}

#[tokio::test]
async fn global_merge_across_categories_has_unique_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{ "place_id": "shared" }, { "place_id": "other" }]
        })))
        .mount(&server)
        .await;
    mount_details(&server, "shared", "Shared").await;
    mount_details(&server, "other", "Other").await;

    let client = test_client(&server.uri());
    let aggregator = Aggregator::new(&client, PacingConfig::none());

    let mut all = Vec::new();
    for key in ["3", "5"] {
        let query = SearchQuery::for_category(lisbon(), 5000, find_category(key).unwrap());
        all.extend(aggregator.search(&query).await);
    }
    let merged = dedup_by_place_id(all);

    let ids: Vec<&str> = merged.iter().map(|r| r.place_id.as_str()).collect();
    assert_eq!(ids, vec!["shared", "other"]);
    assert_eq!(merged[0].category, "Hunting Associations");
}
