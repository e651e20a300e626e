use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;
use std::sync::Arc;

use reelmatch::{
    api::{create_router, AppState},
    catalog::CatalogStore,
    models::{MovieEntry, RecommendationResponse},
    services::PassthroughImageResolver,
};

const DEFAULT_POSTER: &str = "https://img.example/default.jpg";

const TITLES: [&str; 10] = [
    "Avatar",
    "Brazil",
    "Casablanca",
    "Dune",
    "Eraserhead",
    "Fargo",
    "Gattaca",
    "Heat",
    "Inception",
    "Jaws",
];

fn ten_movie_catalog() -> CatalogStore {
    let movies = TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| {
            // Every other movie has a poster.
            let poster = format!("https://img.example/{}.jpg", title.to_lowercase());
            MovieEntry::new(*title, (i % 2 == 0).then_some(poster.as_str()))
        })
        .collect();

    let mut matrix = vec![vec![0.5; 10]; 10];
    matrix[3] = vec![0.1, 0.9, 0.3, 1.0, 0.95, 0.2, 0.4, 0.05, 0.6, 0.8];

    CatalogStore::from_entries(movies, matrix).unwrap()
}

fn create_test_server(catalog: CatalogStore) -> TestServer {
    let state = AppState::new(
        Arc::new(catalog),
        Arc::new(PassthroughImageResolver::new(DEFAULT_POSTER)),
    );
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn recommended_titles(response: &RecommendationResponse) -> Vec<&str> {
    response
        .recommendations
        .iter()
        .map(|card| card.title.as_str())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(ten_movie_catalog());
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["titles"], 10);
    assert!(body["loaded_at"].is_string());
}

#[tokio::test]
async fn test_titles_in_catalog_order() {
    let server = create_test_server(ten_movie_catalog());
    let response = server.get("/titles").await;
    response.assert_status_ok();

    let titles: Vec<String> = response.json();
    assert_eq!(titles, TITLES.to_vec());
}

#[tokio::test]
async fn test_recommendations_follow_similarity() {
    let server = create_test_server(ten_movie_catalog());
    let response = server
        .get("/recommendations")
        .add_query_param("title", "Dune")
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert_eq!(body.selected, "Dune");
    assert_eq!(
        recommended_titles(&body),
        vec!["Eraserhead", "Brazil", "Jaws", "Inception", "Gattaca"]
    );
}

#[tokio::test]
async fn test_recommendations_fill_missing_posters() {
    let server = create_test_server(ten_movie_catalog());
    let body: RecommendationResponse = server
        .get("/recommendations")
        .add_query_param("title", "Dune")
        .await
        .json();

    // Eraserhead (index 4) has a poster, Brazil (index 1) does not.
    assert_eq!(
        body.recommendations[0].poster_url,
        "https://img.example/eraserhead.jpg"
    );
    assert_eq!(body.recommendations[1].poster_url, DEFAULT_POSTER);
}

#[tokio::test]
async fn test_unknown_title_still_recommends() {
    let server = create_test_server(ten_movie_catalog());
    let response = server
        .get("/recommendations")
        .add_query_param("title", "does-not-exist")
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert_eq!(
        recommended_titles(&body),
        vec!["Avatar", "Brazil", "Casablanca", "Dune", "Eraserhead"]
    );
}

#[tokio::test]
async fn test_tiny_catalog_repeats_cards() {
    let movies = vec![
        MovieEntry::new("A", None),
        MovieEntry::new("B", None),
        MovieEntry::new("C", None),
    ];
    let catalog = CatalogStore::from_entries(movies, vec![vec![1.0; 3]; 3]).unwrap();
    let server = create_test_server(catalog);

    let body: RecommendationResponse = server
        .get("/recommendations")
        .add_query_param("title", "A")
        .await
        .json();

    let titles = recommended_titles(&body);
    assert_eq!(titles.len(), 5);
    assert!(!titles.contains(&"A"));
    assert_eq!(titles, vec!["B", "C", "B", "C", "B"]);
}

#[tokio::test]
async fn test_empty_catalog_returns_no_cards() {
    let catalog = CatalogStore::from_entries(Vec::new(), Vec::new()).unwrap();
    let server = create_test_server(catalog);

    let response = server
        .get("/recommendations")
        .add_query_param("title", "Anything")
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert!(body.recommendations.is_empty());
}

#[tokio::test]
async fn test_missing_title_parameter() {
    let server = create_test_server(ten_movie_catalog());
    let response = server.get("/recommendations").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(ten_movie_catalog());
    let response = server
        .get("/titles")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("trace-123"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-request-id"), "trace-123");
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let server = create_test_server(ten_movie_catalog());
    let response = server.get("/health").await;

    let request_id = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
}
