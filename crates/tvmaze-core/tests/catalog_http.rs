//! Integration tests for `CatalogService` against a mock catalog.
//!
//! Each test stands up its own `wiremock` server, so no real network
//! traffic is made.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tvmaze_core::{CatalogError, CatalogService, ClientConfig, Episode, MISSING_IMAGE_URL};

fn service(server: &MockServer) -> CatalogService {
    let config = ClientConfig {
        timeout_secs: 5,
        ..ClientConfig::with_base_url(server.uri())
    };
    CatalogService::with_config(config).expect("failed to build test CatalogService")
}

#[tokio::test]
async fn search_with_null_image_substitutes_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/shows"))
        .and(query_param("q", "bletchley"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "score": 17.4,
            "show": {
                "id": 1767,
                "name": "The Bletchley Circle",
                "summary": "<p>Four women codebreakers</p>",
                "image": null
            }
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let shows = service(&server).search_shows("bletchley").await.unwrap();

    assert_eq!(shows.len(), 1);
    assert_eq!(shows[0].id, 1767);
    assert_eq!(shows[0].image, MISSING_IMAGE_URL);
}

#[tokio::test]
async fn search_preserves_upstream_order_and_count() {
    let server = MockServer::start().await;

    let results: Vec<_> = [5, 3, 9, 1]
        .iter()
        .map(|id| {
            json!({"show": {
                "id": id,
                "name": format!("Show {id}"),
                "summary": null,
                "image": {"medium": format!("https://img/{id}.jpg"), "original": "o"}
            }})
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/search/shows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(results)))
        .mount(&server)
        .await;

    let shows = service(&server).search_shows("show").await.unwrap();

    let ids: Vec<u64> = shows.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![5, 3, 9, 1]);
    assert_eq!(shows[2].image, "https://img/9.jpg");
    assert_eq!(shows[2].summary, "");
}

#[tokio::test]
async fn search_term_is_percent_encoded_on_the_wire() {
    let server = MockServer::start().await;

    // query_param matches the decoded value, so the whole term must arrive
    // as one parameter
    Mock::given(method("GET"))
        .and(path("/search/shows"))
        .and(query_param("q", "law & order #1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let shows = service(&server).search_shows("law & order #1").await.unwrap();
    assert!(shows.is_empty());
}

#[tokio::test]
async fn search_server_error_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/shows"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = service(&server).search_shows("x").await.unwrap_err();

    assert!(err.is_network());
    match err {
        CatalogError::HttpStatus { status, url } => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/search/shows?q=x"));
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn search_unexpected_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/shows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "nope"})))
        .mount(&server)
        .await;

    let err = service(&server).search_shows("x").await.unwrap_err();
    assert!(matches!(err, CatalogError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn episodes_for_show_are_normalized_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shows/1/episodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Pilot", "season": 1, "number": 1, "runtime": 60},
            {"id": 2, "name": "Second", "season": 1, "number": 2, "runtime": 60}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let episodes = service(&server).get_episodes(1).await.unwrap();

    assert_eq!(
        episodes,
        vec![
            Episode {
                id: 1,
                name: "Pilot".to_string(),
                season: 1,
                number: 1
            },
            Episode {
                id: 2,
                name: "Second".to_string(),
                season: 1,
                number: 2
            },
        ]
    );
}

#[tokio::test]
async fn episodes_with_special_surface_normalization_gap() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shows/1767/episodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 10, "name": "Pilot", "season": 1, "number": 1},
            {"id": 11, "name": "Special", "season": 1, "number": null}
        ])))
        .mount(&server)
        .await;

    let err = service(&server).get_episodes(1767).await.unwrap_err();

    assert!(!err.is_network());
    match err {
        CatalogError::NormalizationGap { episode, field } => {
            assert_eq!(episode, "11");
            assert_eq!(field, "number");
        }
        other => panic!("Expected NormalizationGap, got {other:?}"),
    }
}

#[tokio::test]
async fn episodes_for_unknown_show_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shows/999999/episodes"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = service(&server).get_episodes(999_999).await.unwrap_err();
    assert!(matches!(err, CatalogError::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn each_call_issues_exactly_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shows/3/episodes"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    // no retry on failure; the expectation is verified when the server drops
    let result = service(&server).get_episodes(3).await;
    assert!(result.is_err());
}
