//! API integration tests, driving the router in-process

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use library_api::{
    api::create_router,
    models::{Book, CreateBook},
    repository::Repository,
    AppState,
};

const BASE: &str = "/api/v1";

/// Router over the two-book catalogue used throughout these tests
fn app() -> Router {
    let repository = Repository::with_books(vec![
        Book {
            id: 1,
            name: "War and Peace".to_string(),
            author: "Leo Tolstoy".to_string(),
            year: None,
            pages: None,
            genre: Some(vec!["epic".to_string(), "classics".to_string()]),
            rating: None,
        },
        Book {
            id: 2,
            name: "Crime and Punishment".to_string(),
            author: "Feodor Dostoevsky".to_string(),
            year: Some(1853),
            pages: None,
            genre: None,
            rating: None,
        },
    ]);
    create_router(AppState::new(repository))
}

async fn send(app: &Router, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(format!("{}{}", BASE, path));
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
    send(app, Method::GET, path, None).await
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("Expected an array")
        .iter()
        .map(|b| b["id"].as_i64().expect("Book without id"))
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books"], 2);
}

#[tokio::test]
async fn test_list_books() {
    let (status, body) = get(&app(), "/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), [1, 2]);
    assert_eq!(body[0]["year"], Value::Null);
    assert_eq!(body[0]["genre"], json!(["epic", "classics"]));
}

#[tokio::test]
async fn test_create_and_get_book() {
    let app = app();
    let (status, created) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({
            "name": "Dead Souls",
            "author": "Nikolai Gogol",
            "year": 1842,
            "genre": ["satire"],
            "rating": 3.9
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 3);
    assert_eq!(created["pages"], Value::Null);

    let (status, fetched) = get(&app, "/books/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_into_empty_store() {
    let app = create_router(AppState::new(Repository::new()));
    let (status, created) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({ "name": "Fathers and Sons", "author": "Ivan Turgenev" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
}

#[tokio::test]
async fn test_create_requires_name_and_author() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(json!({ "name": "Nameless" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (status, _) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({ "name": "", "author": "Anon" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, "/books").await;
    assert_eq!(ids(&body), [1, 2]);
}

#[tokio::test]
async fn test_malformed_id_returns_error_body() {
    let app = app();
    for (method, path) in [
        (Method::GET, "/books/abc"),
        (Method::GET, "/books/99999999999"),
        (Method::DELETE, "/books/x"),
    ] {
        let (status, body) = send(&app, method, path, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body["error"], "BadValue", "{path}");
        assert_eq!(body["code"], 3, "{path}");
    }

    let (status, body) = send(&app, Method::PUT, "/books/x", Some(json!({ "pages": 1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_get_missing_book() {
    let (status, body) = get(&app(), "/books/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchBook");
}

#[tokio::test]
async fn test_delete_book() {
    let app = app();
    let (status, body) = send(&app, Method::DELETE, "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Book 1 deleted");

    let (status, _) = get(&app, "/books/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get(&app, "/books").await;
    assert_eq!(ids(&body), [2]);

    let (status, _) = send(&app, Method::DELETE, "/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let app = app();
    let (status, updated) = send(&app, Method::PUT, "/books/1", Some(json!({ "pages": 500 }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({
            "id": 1,
            "name": "War and Peace",
            "author": "Leo Tolstoy",
            "year": null,
            "pages": 500,
            "genre": ["epic", "classics"],
            "rating": null
        })
    );

    let (_, fetched) = get(&app, "/books/1").await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_missing_book() {
    let (status, _) = send(&app(), Method::PUT, "/books/9", Some(json!({ "pages": 1 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_find_by_name_and_author() {
    let app = app();
    let (status, body) = get(&app, "/books/names/war%20and%20peace").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), [1]);

    let (status, body) = get(&app, "/books/authors/FEODOR%20DOSTOEVSKY").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), [2]);

    let (status, _) = get(&app, "/books/names/war").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_find_by_genre() {
    let app = app();
    let (status, body) = get(&app, "/books/genres/Classics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), [1]);

    let (status, _) = get(&app, "/books/genres/horror").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_find_by_years() {
    let app = app();
    let (status, body) = get(&app, "/books/years/1800-1900").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), [2]);

    let (status, _) = get(&app, "/books/years/1900-2000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, "/books/years/eighteen-1900").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_find_by_pages_and_ratings() {
    let app = app();
    send(&app, Method::PUT, "/books/1", Some(json!({ "pages": 1225, "rating": 4.1 }))).await;

    let (status, body) = get(&app, "/books/pages/1000-1300").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), [1]);

    let (status, body) = get(&app, "/books/ratings/4-4.5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), [1]);

    let (status, _) = get(&app, "/books/pages/1-2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rating_stats() {
    let app = app();
    send(&app, Method::PUT, "/books/1", Some(json!({ "rating": 4.3 }))).await;
    send(&app, Method::PUT, "/books/2", Some(json!({ "rating": 4.7 }))).await;

    let (status, body) = get(&app, "/books/stats/rating").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["field"], "rating");
    assert_eq!(body["count"], 2);
    assert_eq!(body["min"]["id"], 1);
    assert_eq!(body["max"]["id"], 2);
    let average = body["average"].as_f64().expect("Average should be a number");
    assert!((average - 4.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_year_stats() {
    let app = app();
    let (status, body) = get(&app, "/books/stats/year").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["min"]["id"], 2);
    assert_eq!(body["max"]["id"], 2);
    assert_eq!(body["average"], json!(1853));
}

#[tokio::test]
async fn test_stats_without_values() {
    let app = app();
    let (status, body) = get(&app, "/books/stats/pages").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["min"], Value::Null);
    assert_eq!(body["max"], Value::Null);
    assert_eq!(body["average"], Value::Null);
}

#[tokio::test]
async fn test_stats_unknown_field() {
    let (status, _) = get(&app(), "/books/stats/author").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_repository_shared_with_router() {
    let repository = Repository::new();
    let app = create_router(AppState::new(repository.clone()));

    repository
        .books_create(&CreateBook {
            name: "Oblomov".to_string(),
            author: "Ivan Goncharov".to_string(),
            ..Default::default()
        })
        .await;

    let (_, body) = get(&app, "/books/names/oblomov").await;
    assert_eq!(ids(&body), [1]);
}
