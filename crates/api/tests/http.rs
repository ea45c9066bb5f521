//! End-to-end tests driving the router against an in-memory database.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use partsbin_api::{create_router, AppState};
use partsbin_database::Database;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

async fn test_app() -> Router {
    let db = Database::in_memory().await.unwrap();
    create_router(Arc::new(AppState::new(db)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn create_then_fetch_round_trip() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v1/component",
        Some(json!({ "code": "BC548", "price": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["code"], "BC548");
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(
        &app,
        Method::GET,
        &format!("/api/v1/component/id/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["code"], "BC548");
    assert_eq!(fetched["price"], 0.0);
}

#[tokio::test]
async fn missing_id_is_informational_not_an_error() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/component/id/99999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], "No items found according to the id.");
}

#[tokio::test]
async fn empty_list_is_informational_not_an_error() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/component/list", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], "No items found according to all attributes.");
}

#[tokio::test]
async fn unknown_order_by_is_rejected_on_every_list_route() {
    let app = test_app().await;

    for uri in [
        "/api/v1/component/list?orderBy=bogus",
        "/api/v1/component/code/BC548?orderBy=bogus",
        "/api/v1/component/details?orderBy=bogus",
        "/api/v1/component/stock-range?min=0&max=10&orderBy=bogus",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
        assert!(body["error"].as_str().unwrap().contains("orderBy"));
    }
}

#[tokio::test]
async fn unknown_order_direction_is_rejected() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/component/list?orderBy=price&orderAt=sideways",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("orderAt"));
}

#[tokio::test]
async fn update_requires_an_id() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/component",
        Some(json!({ "stock": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad request, could not update a component.");
}

#[tokio::test]
async fn update_and_delete_acknowledge_under_wrapper_keys() {
    let app = test_app().await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/v1/component",
        Some(json!({ "code": "R-10K", "stock": 500, "price": 0.02 })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/component",
        Some(json!({ "id": id, "stock": 450 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["objectUpdated"]["stock"], 450);
    assert_eq!(body["objectUpdated"]["code"], "R-10K");

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/component?id={id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["objectDeleted"], id);

    // Deleting again matches nothing, which is informational.
    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/component?id={id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], "No items found according to the id.");
}

#[tokio::test]
async fn delete_requires_an_id() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::DELETE, "/api/v1/component", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad request, could not delete a component.");
}

#[tokio::test]
async fn filter_routes_match_and_report_empty() {
    let app = test_app().await;

    send(
        &app,
        Method::POST,
        "/api/v1/component",
        Some(json!({ "code": "BC548", "category": "transistor", "maker": "ON", "price": 0.15 })),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/v1/component/code/BC5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, "/api/v1/component/code/XYZ", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], "No items found according to the code.");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/component/category-maker?category=transistor&maker=ON",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/component/price-max/0.05",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], "No items found according to the price max.");
}

#[tokio::test]
async fn category_maker_requires_both_parameters() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/component/category-maker?category=transistor",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("category and maker"));
}

#[tokio::test]
async fn range_routes_require_both_bounds() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/component/price-range?min=0.01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("price min and max"));
}

#[tokio::test]
async fn auxiliary_records_round_trip_through_join_routes() {
    let app = test_app().await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/v1/component",
        Some(json!({ "code": "BC548" })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/component/bipolar-transistor",
        Some(json!({ "component_id": id, "transistor_type": "NPN" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/component/bipolar-transistor",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let first = &body.as_array().unwrap()[0];
    assert_eq!(first["code"], "BC548");
    assert_eq!(first["bipolar_transistors"][0]["transistor_type"], "NPN");

    let (status, body) = send(&app, Method::GET, "/api/v1/component/all-models", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap()[0]["details"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn auxiliary_create_with_missing_parent_is_a_bad_request() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/component/detail",
        Some(json!({ "component_id": 4242, "datasheet": "missing.pdf" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad request, could not add a component detail.");
}

#[tokio::test]
async fn create_without_a_usable_body_is_a_bad_request() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/api/v1/component", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad request, could not add a component.");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/component",
        Some(json!({ "price": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad request, could not add a component.");
}

#[tokio::test]
async fn health_check_reports_healthy() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
