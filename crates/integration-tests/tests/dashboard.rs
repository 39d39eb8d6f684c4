//! Server-rendered pages.
//!
//! These tests require a running dashboard and the test account
//! (see the crate docs).

use reqwest::{StatusCode, header};

use storedash_integration_tests::{Fixture, base_url, client, logged_in_client};

#[tokio::test]
#[ignore = "Requires running dashboard server"]
async fn test_pages_redirect_to_login() {
    let resp = client()
        .get(format!("{}/", base_url()))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("/auth/login")
    );
}

#[tokio::test]
#[ignore = "Requires running dashboard server"]
async fn test_login_page_renders() {
    let resp = client()
        .get(format!("{}/auth/login", base_url()))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Sign in"));
}

#[tokio::test]
#[ignore = "Requires running dashboard server"]
async fn test_overview_and_tables() {
    let client = logged_in_client().await;
    let fixture = Fixture::create(&client).await;
    let root = format!("{}/{}", base_url(), fixture.store_id);

    let overview = client.get(&root).send().await.expect("Request failed");
    assert_eq!(overview.status(), StatusCode::OK);
    let body = overview.text().await.expect("Failed to read body");
    assert!(body.contains("Total revenue"));
    assert!(body.contains("Jan"));

    let sizes = client
        .get(format!("{root}/sizes"))
        .send()
        .await
        .expect("Request failed");
    let body = sizes.text().await.expect("Failed to read body");
    assert!(body.contains("Sizes (1)"));
    assert!(body.contains("Medium"));
}

#[tokio::test]
#[ignore = "Requires running dashboard server"]
async fn test_form_validation_rerenders() {
    let client = logged_in_client().await;
    let fixture = Fixture::create(&client).await;

    let resp = client
        .post(format!("{}/{}/colors/new", base_url(), fixture.store_id))
        .form(&[("name", "Blue"), ("value", "")])
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Value is required"));
    assert!(body.contains("Blue"));
}

#[tokio::test]
#[ignore = "Requires running dashboard server"]
async fn test_foreign_store_page_is_404() {
    let client = logged_in_client().await;

    let resp = client
        .get(format!("{}/{}/billboards", base_url(), uuid::Uuid::new_v4()))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
