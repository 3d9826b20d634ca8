use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

mod common;

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_body(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn read_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("Response body should be JSON")
}

#[tokio::test]
async fn get_tasks_returns_empty_array_when_store_is_empty() {
    let app = common::setup_router();

    let response = app
        .oneshot(empty_request(Method::GET, "/tasks"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );
    assert_eq!(read_json(response).await, json!([]));
}

#[tokio::test]
async fn get_tasks_returns_seeded_tasks_in_insertion_order() {
    let app = common::setup_seeded_router();

    let response = app
        .oneshot(empty_request(Method::GET, "/tasks"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let tasks = body.as_array().expect("Body should be a JSON array");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["id"], 1);
    assert_eq!(tasks[0]["title"], "Book Flight to Vienna");
    assert_eq!(tasks[1]["id"], 2);
    assert_eq!(tasks[1]["title"], "Hotel Reservation");
}

#[tokio::test]
async fn get_task_by_id_uses_the_wire_field_names() {
    let app = common::setup_router();

    let create = json_request(
        Method::POST,
        "/tasks",
        json!({
            "title": "Book Flight to Vienna",
            "description": "Flight via Austrian Airlines",
            "date": "2025-03-15T10:00:00Z",
            "isCompleted": false
        }),
    );
    app.clone().oneshot(create).await.unwrap();

    let response = app
        .oneshot(empty_request(Method::GET, "/tasks/1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "Book Flight to Vienna");
    assert_eq!(body["description"], "Flight via Austrian Airlines");
    assert_eq!(body["date"], "2025-03-15T10:00:00Z");
    assert_eq!(
        body["isCompleted"], false,
        "Completion flag must serialize as camelCase isCompleted"
    );
}

#[tokio::test]
async fn get_task_with_unknown_id_returns_404_with_empty_body() {
    let app = common::setup_router();

    let response = app
        .oneshot(empty_request(Method::GET, "/tasks/999"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(
        read_body(response).await.is_empty(),
        "404 responses carry no body"
    );
}

#[tokio::test]
async fn post_creates_task_with_location_header() {
    let app = common::setup_router();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/tasks",
            json!({
                "title": "Pack luggage",
                "description": "Two bags",
                "date": "2025-06-01T08:00:00Z",
                "isCompleted": false
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/tasks/1")
    );
    let body = read_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "Pack luggage");
    assert_eq!(body["description"], "Two bags");
    assert_eq!(body["isCompleted"], false);
}

#[tokio::test]
async fn post_ignores_client_supplied_id() {
    let app = common::setup_router();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/tasks",
            json!({
                "id": 999,
                "title": "Forged",
                "description": "",
                "date": "2025-06-01T08:00:00Z",
                "isCompleted": false
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["id"], 1, "The store assigns IDs, not the client");

    let response = app
        .oneshot(empty_request(Method::GET, "/tasks/999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_with_missing_fields_uses_explicit_defaults() {
    let app = common::setup_router();

    let response = app
        .oneshot(json_request(Method::POST, "/tasks", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["title"], "");
    assert_eq!(body["description"], "");
    assert_eq!(body["isCompleted"], false);
    let date = body["date"].as_str().expect("date should be present");
    assert!(
        chrono::DateTime::parse_from_rfc3339(date).is_ok(),
        "A missing date defaults to the current time: {date}"
    );
}

#[tokio::test]
async fn put_replaces_task_and_returns_204_with_empty_body() {
    let app = common::setup_seeded_router();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/tasks/1",
            json!({
                "id": 1,
                "title": "Book Flight to Vienna",
                "description": "Flight via Austrian Airlines",
                "date": "2025-03-15T10:00:00Z",
                "isCompleted": true
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(read_body(response).await.is_empty());

    let response = app
        .oneshot(empty_request(Method::GET, "/tasks/1"))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["isCompleted"], true);
    assert_eq!(body["date"], "2025-03-15T10:00:00Z");
}

#[tokio::test]
async fn put_with_unknown_id_returns_404_and_changes_nothing() {
    let app = common::setup_seeded_router();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/tasks/999",
            json!({
                "title": "Phantom",
                "description": "",
                "date": "2025-03-15T10:00:00Z",
                "isCompleted": true
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(read_body(response).await.is_empty());

    let response = app
        .oneshot(empty_request(Method::GET, "/tasks"))
        .await
        .unwrap();
    let body = read_json(response).await;
    let tasks = body.as_array().expect("Body should be a JSON array");
    assert_eq!(tasks.len(), 2, "A failed update must not touch the store");
    assert!(tasks.iter().all(|task| task["isCompleted"] == false));
}

#[tokio::test]
async fn delete_returns_204_then_404_on_second_call() {
    let app = common::setup_seeded_router();

    let response = app
        .clone()
        .oneshot(empty_request(Method::DELETE, "/tasks/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(read_body(response).await.is_empty());

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/tasks"))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(
        body.as_array().map(Vec::len),
        Some(1),
        "Delete removes exactly one task"
    );

    let response = app
        .oneshot(empty_request(Method::DELETE, "/tasks/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_body_is_rejected_with_client_error() {
    let app = common::setup_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/tasks")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert!(
        response.status().is_client_error(),
        "Malformed JSON is a 4xx from the framework, got {}",
        response.status()
    );
}
