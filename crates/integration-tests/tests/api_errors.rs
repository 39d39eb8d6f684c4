//! Status and message contract of the JSON API.
//!
//! These tests require a running dashboard and the test account
//! (see the crate docs).

use reqwest::StatusCode;
use serde_json::json;

use storedash_integration_tests::{base_url, client, get_json, logged_in_client, post_json};

#[tokio::test]
#[ignore = "Requires running dashboard server"]
async fn test_write_without_session_is_401() {
    let (status, body) = post_json(
        &client(),
        &format!("/api/{}/sizes", uuid::Uuid::new_v4()),
        &json!({ "name": "Small", "value": "S" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Unauthenticated");
}

#[tokio::test]
#[ignore = "Requires running dashboard server"]
async fn test_missing_field_is_400_before_ownership() {
    let client = logged_in_client().await;

    let (status, body) = post_json(
        &client,
        &format!("/api/{}/billboards", uuid::Uuid::new_v4()),
        &json!({ "imageUrl": "https://example.com/a.jpg" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "label is required");
}

#[tokio::test]
#[ignore = "Requires running dashboard server"]
async fn test_foreign_or_malformed_store_is_403() {
    let client = logged_in_client().await;
    let body = json!({ "name": "Small", "value": "S" });

    let (status, text) = post_json(&client, &format!("/api/{}/sizes", uuid::Uuid::new_v4()), &body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(text, "Unauthorized");

    let (status, _) = post_json(&client, "/api/not-a-store/sizes", &body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running dashboard server"]
async fn test_public_reads() {
    let (status, body) = get_json(&client(), "/api/not-a-store/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = get_json(
        &client(),
        &format!("/api/{}/billboards/{}", uuid::Uuid::new_v4(), uuid::Uuid::new_v4()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running dashboard server"]
async fn test_health() {
    let resp = client()
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
}
