//! Catalog CRUD through the JSON API.
//!
//! These tests require a running dashboard and the test account
//! (see the crate docs).

use reqwest::StatusCode;
use serde_json::{Value, json};

use storedash_integration_tests::{
    Fixture, base_url, create, get_json, id_of, logged_in_client, post_json,
};

#[tokio::test]
#[ignore = "Requires running dashboard server"]
async fn test_not_applicable_hidden_from_public_list() {
    let client = logged_in_client().await;
    let fixture = Fixture::create(&client).await;
    let api = format!("/api/{}/provinces", fixture.store_id);

    create(
        &client,
        &api,
        &json!({ "name": "Quebec", "valueEn": "Quebec", "valueFr": "Québec", "valueSp": "Quebec" }),
    )
    .await;

    let (status, body) = get_json(&client, &api).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .expect("list")
        .iter()
        .map(|row| row["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, ["Quebec"]);
}

#[tokio::test]
#[ignore = "Requires running dashboard server"]
async fn test_product_filters_and_archived() {
    let client = logged_in_client().await;
    let fixture = Fixture::create(&client).await;
    let api = format!("/api/{}/products", fixture.store_id);

    create(&client, &api, &fixture.product("Featured jersey", true)).await;
    create(&client, &api, &fixture.product("Plain jersey", false)).await;
    let mut archived = fixture.product("Old jersey", false);
    archived["isArchived"] = Value::Bool(true);
    create(&client, &api, &archived).await;

    let (_, all) = get_json(&client, &api).await;
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    let (_, featured) = get_json(&client, &format!("{api}?isFeatured=true")).await;
    assert_eq!(featured[0]["nameEn"], "Featured jersey");
    assert_eq!(featured.as_array().map(Vec::len), Some(1));

    let (_, by_color) = get_json(&client, &format!("{api}?colorId={}", fixture.color_id)).await;
    assert_eq!(by_color.as_array().map(Vec::len), Some(2));
    assert_eq!(by_color[0]["color"]["value"], "#ff0000");

    let (_, malformed) = get_json(&client, &format!("{api}?sizeId=large")).await;
    assert_eq!(malformed, json!([]));
}

#[tokio::test]
#[ignore = "Requires running dashboard server"]
async fn test_product_update_replaces_images() {
    let client = logged_in_client().await;
    let fixture = Fixture::create(&client).await;
    let api = format!("/api/{}/products", fixture.store_id);

    let product = create(&client, &api, &fixture.product("Jersey", false)).await;
    let id = id_of(&product);

    let mut body = fixture.product("Jersey", false);
    body["images"] = json!([{ "url": "https://example.com/2.jpg" }, { "url": "https://example.com/3.jpg" }]);
    let resp = client
        .patch(format!("{}{api}/{id}", base_url()))
        .json(&body)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let (_, detail) = get_json(&client, &format!("{api}/{id}")).await;
    let urls: Vec<_> = detail["images"]
        .as_array()
        .expect("images")
        .iter()
        .map(|image| image["url"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(urls, ["https://example.com/2.jpg", "https://example.com/3.jpg"]);
}

#[tokio::test]
#[ignore = "Requires running dashboard server"]
async fn test_reference_from_other_store_is_rejected() {
    let client = logged_in_client().await;
    let fixture = Fixture::create(&client).await;
    let other = Fixture::create(&client).await;

    let mut body = fixture.product("Jersey", false);
    body["categoryId"] = Value::String(other.category_id);

    let (status, text) =
        post_json(&client, &format!("/api/{}/products", fixture.store_id), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, "category Id is invalid");
}

#[tokio::test]
#[ignore = "Requires running dashboard server"]
async fn test_billboard_in_use_cannot_be_deleted() {
    let client = logged_in_client().await;
    let fixture = Fixture::create(&client).await;

    let resp = client
        .delete(format!(
            "{}/api/{}/billboards/{}",
            base_url(),
            fixture.store_id,
            fixture.billboard_id
        ))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}
