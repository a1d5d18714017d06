//! API integration tests driving the router in-process

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use tokio_stream::StreamExt;
use tower::ServiceExt;

use libris_server::{
    api,
    config::{AppConfig, DatabaseConfig},
    AppState,
};

async fn app() -> Router {
    let config = AppConfig {
        database: DatabaseConfig::in_memory(),
        ..Default::default()
    };
    let state = AppState::connect(config).await.expect("Failed to build state");
    api::router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(format!("/api/v1{}", uri));
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, value)
}

async fn add_book(app: &Router, title: &str, author: &str, year: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/admin/books",
        Some(json!({ "title": title, "author": author, "year": year })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["book"]["id"].as_i64().expect("No id in response")
}

#[tokio::test]
async fn test_health_check() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_add_and_list_books() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/admin/books",
        Some(json!({ "title": "Dune", "author": "Herbert", "year": "1965" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["notice"]["level"], "info");
    assert_eq!(body["book"]["available"], true);

    let (status, body) = send(&app, Method::GET, "/admin/books", None).await;
    assert_eq!(status, StatusCode::OK);
    let books = body.as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Dune");
    assert_eq!(books[0]["author"], "Herbert");
    assert_eq!(books[0]["year"], 1965);
    assert_eq!(books[0]["available"], true);
}

#[tokio::test]
async fn test_malformed_form_is_error() {
    let app = app().await;

    for form in [
        json!({ "title": "Dune", "author": "Herbert", "year": "1965a" }),
        json!({ "title": "Dune", "author": "Herbert", "year": "-1" }),
        json!({ "title": "", "author": "Herbert", "year": "1965" }),
        json!({ "title": "Dune", "author": "", "year": "1965" }),
    ] {
        let (status, body) = send(&app, Method::POST, "/admin/books", Some(form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["severity"], "error");
        assert_eq!(body["code"], 18);
    }

    let (_, body) = send(&app, Method::GET, "/admin/books", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_request_is_json_error() {
    let app = app().await;
    let id = add_book(&app, "Dune", "Herbert", "1965").await;

    let cases = [
        (
            Method::POST,
            "/admin/books".to_string(),
            Some(json!({ "title": "Dune", "author": "Herbert", "year": 1965 })),
        ),
        (
            Method::PUT,
            format!("/admin/books/{}", id),
            Some(json!({ "title": "Dune" })),
        ),
        (
            Method::POST,
            "/portal/borrow".to_string(),
            Some(json!({ "patron": "alice", "book_id": "x" })),
        ),
        (
            Method::POST,
            "/portal/return".to_string(),
            Some(json!({ "patron": "alice", "book_id": 1.5 })),
        ),
        (Method::GET, "/admin/books/abc".to_string(), None),
        (Method::DELETE, "/admin/books/abc".to_string(), None),
        (Method::GET, "/admin/books?available_only=yes".to_string(), None),
    ];

    for (method, uri, body) in cases {
        let (status, body) = send(&app, method, &uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}: {}", uri, body);
        assert_eq!(body["code"], 18, "{}", uri);
        assert_eq!(body["error"], "BadValue", "{}", uri);
        assert_eq!(body["severity"], "error", "{}", uri);
        assert!(body["message"].is_string(), "{}", uri);
    }

    // Nothing changed
    let (_, body) = send(&app, Method::GET, "/admin/books", None).await;
    assert_eq!(body[0]["available"], true);
    assert_eq!(body[0]["author"], "Herbert");
}

#[tokio::test]
async fn test_events_stream_reports_borrow() {
    let app = app().await;
    let id = add_book(&app, "Dune", "Herbert", "1965").await;

    let response = app
        .clone()
        .oneshot(Request::get("/api/v1/events").body(Body::empty()).unwrap())
        .await
        .expect("Failed to open event stream");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/event-stream");
    let mut frames = response.into_body().into_data_stream();

    let (status, _) = send(
        &app,
        Method::POST,
        "/portal/borrow",
        Some(json!({ "patron": "alice", "book_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let frame = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let chunk = frames
                .next()
                .await
                .expect("Event stream ended")
                .expect("Failed to read event");
            let text = String::from_utf8_lossy(&chunk).to_string();
            if text.contains("event: book_borrowed") {
                return text;
            }
        }
    })
    .await
    .expect("No book_borrowed event received");

    let data = frame
        .lines()
        .find_map(|line| line.strip_prefix("data: "))
        .expect("Event without data");
    let change: Value = serde_json::from_str(data).unwrap();
    assert_eq!(change["type"], "book_borrowed");
    assert_eq!(change["book_id"], id);
    assert_eq!(change["patron"], "alice");
}

#[tokio::test]
async fn test_edit_and_delete_book() {
    let app = app().await;
    let id = add_book(&app, "Dune", "Herbert", "1956").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/admin/books/{}", id),
        Some(json!({ "title": "Dune", "author": "Frank Herbert", "year": "1965" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["author"], "Frank Herbert");
    assert_eq!(body["book"]["year"], 1965);

    let (status, body) = send(&app, Method::DELETE, &format!("/admin/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["level"], "info");

    let (status, body) = send(&app, Method::GET, &format!("/admin/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["severity"], "warning");
}

#[tokio::test]
async fn test_edit_unknown_book_not_found() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/admin/books/404",
        Some(json!({ "title": "Dune", "author": "Herbert", "year": "1965" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchBook");
}

#[tokio::test]
async fn test_borrow_and_return_flow() {
    let app = app().await;
    let id = add_book(&app, "Dune", "Herbert", "1965").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/portal/borrow",
        Some(json!({ "patron": "  alice  ", "book_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["level"], "info");

    // Name is trimmed before use as the key
    let (_, body) = send(&app, Method::GET, "/portal/patrons/alice/books", None).await;
    let held = body.as_array().unwrap();
    assert_eq!(held.len(), 1);
    assert_eq!(held[0]["id"], id);
    assert_eq!(held[0]["title"], "Dune");
    assert!(held[0].get("available").is_none());

    let (_, body) = send(&app, Method::GET, "/portal/books", None).await;
    assert!(body.as_array().unwrap().is_empty());

    let (_, body) = send(&app, Method::GET, "/admin/loans", None).await;
    assert_eq!(body[0]["book_id"], id);
    assert_eq!(body[0]["patron"], "alice");

    let (status, body) = send(
        &app,
        Method::POST,
        "/portal/borrow",
        Some(json!({ "patron": "bob", "book_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["severity"], "warning");
    assert_eq!(body["error"], "BookNotAvailable");

    let (status, body) = send(
        &app,
        Method::POST,
        "/portal/return",
        Some(json!({ "patron": "bob", "book_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchPatron");

    let (status, _) = send(&app, Method::DELETE, &format!("/admin/books/{}", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/portal/return",
        Some(json!({ "patron": "alice", "book_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/portal/books", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    let (_, body) = send(&app, Method::GET, "/portal/patrons/alice/books", None).await;
    assert!(body.as_array().unwrap().is_empty());

    let (_, body) = send(&app, Method::GET, "/admin/patrons", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "alice");
}

#[tokio::test]
async fn test_return_of_book_held_by_someone_else() {
    let app = app().await;
    let dune = add_book(&app, "Dune", "Herbert", "1965").await;
    let emma = add_book(&app, "Emma", "Austen", "1815").await;

    send(&app, Method::POST, "/portal/borrow", Some(json!({ "patron": "alice", "book_id": dune }))).await;
    send(&app, Method::POST, "/portal/borrow", Some(json!({ "patron": "bob", "book_id": emma }))).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/portal/return",
        Some(json!({ "patron": "bob", "book_id": dune })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "NotBorrowed");
    assert_eq!(body["severity"], "warning");

    let (_, body) = send(&app, Method::GET, "/admin/books?available_only=true", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_patron_name_rejected() {
    let app = app().await;
    let id = add_book(&app, "Dune", "Herbert", "1965").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/portal/borrow",
        Some(json!({ "patron": "   ", "book_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["severity"], "error");

    let (_, body) = send(&app, Method::GET, "/admin/books", None).await;
    assert_eq!(body[0]["available"], true);
}
