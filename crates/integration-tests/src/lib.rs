//! Integration tests for Storedash.
//!
//! The tests talk HTTP to a running dashboard and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! sd-cli migrate
//! sd-cli user create -u itest -p 'integration-password'
//! cargo run -p storedash-admin &
//! cargo test -p storedash-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `DASHBOARD_TEST_URL` - Dashboard base URL (default: `http://localhost:3001`)
//! - `DASHBOARD_TEST_USERNAME` / `DASHBOARD_TEST_PASSWORD` - An existing account

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use reqwest::{Client, StatusCode, redirect::Policy};
use serde_json::{Value, json};

/// Base URL of the dashboard under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("DASHBOARD_TEST_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// A client that keeps cookies and does not follow redirects.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// A client logged in as the test account.
pub async fn logged_in_client() -> Client {
    let username = std::env::var("DASHBOARD_TEST_USERNAME").unwrap_or_else(|_| "itest".to_string());
    let password = std::env::var("DASHBOARD_TEST_PASSWORD")
        .unwrap_or_else(|_| "integration-password".to_string());

    let client = client();
    let resp = client
        .post(format!("{}/auth/login", base_url()))
        .form(&[("username", username.as_str()), ("password", password.as_str())])
        .send()
        .await
        .expect("Failed to log in");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER, "login should redirect");
    client
}

/// A short unique suffix for names created by a test.
#[must_use]
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", &uuid::Uuid::new_v4().simple().to_string()[..8])
}

/// POST JSON and return the status with the body text.
pub async fn post_json(client: &Client, path: &str, body: &Value) -> (StatusCode, String) {
    let resp = client
        .post(format!("{}{path}", base_url()))
        .json(body)
        .send()
        .await
        .expect("Request failed");
    let status = resp.status();
    (status, resp.text().await.expect("Failed to read body"))
}

/// POST JSON that must succeed and return the parsed body.
pub async fn create(client: &Client, path: &str, body: &Value) -> Value {
    let (status, text) = post_json(client, path, body).await;
    assert_eq!(status, StatusCode::OK, "POST {path} failed: {text}");
    serde_json::from_str(&text).expect("Response is not JSON")
}

/// GET a JSON body.
pub async fn get_json(client: &Client, path: &str) -> (StatusCode, Value) {
    let resp = client
        .get(format!("{}{path}", base_url()))
        .send()
        .await
        .expect("Request failed");
    let status = resp.status();
    let body = resp.json().await.unwrap_or(Value::Null);
    (status, body)
}

/// The `id` field of a created row.
#[must_use]
pub fn id_of(row: &Value) -> String {
    row["id"].as_str().expect("Row has no id").to_string()
}

/// A store with one of everything a product needs.
pub struct Fixture {
    pub store_id: String,
    pub billboard_id: String,
    pub category_id: String,
    pub size_id: String,
    pub color_id: String,
    /// `N/A` entries of provinces, types, sportsteams and cdays.
    pub not_applicable: [String; 4],
}

impl Fixture {
    /// Create a fresh store and its reference rows.
    pub async fn create(client: &Client) -> Self {
        let store = create(client, "/api/stores", &json!({ "name": unique("itest") })).await;
        let store_id = id_of(&store);
        let api = format!("/api/{store_id}");

        let billboard = create(
            client,
            &format!("{api}/billboards"),
            &json!({ "label": "Summer", "imageUrl": "https://example.com/summer.jpg" }),
        )
        .await;
        let billboard_id = id_of(&billboard);

        let category = create(
            client,
            &format!("{api}/categories"),
            &json!({
                "nameEn": "Shirts", "nameFr": "Chemises", "nameSp": "Camisas",
                "billboardId": billboard_id,
            }),
        )
        .await;

        let size = create(client, &format!("{api}/sizes"), &json!({ "name": "Medium", "value": "M" })).await;
        let color =
            create(client, &format!("{api}/colors"), &json!({ "name": "Red", "value": "#ff0000" })).await;

        let mut not_applicable = Vec::new();
        for slug in ["provinces", "types", "sportsteams", "cdays"] {
            let row = create(
                client,
                &format!("{api}/{slug}"),
                &json!({ "name": "N/A", "valueEn": "N/A", "valueFr": "N/A", "valueSp": "N/A" }),
            )
            .await;
            not_applicable.push(id_of(&row));
        }

        Self {
            store_id,
            billboard_id,
            category_id: id_of(&category),
            size_id: id_of(&size),
            color_id: id_of(&color),
            not_applicable: not_applicable.try_into().expect("four localized kinds"),
        }
    }

    /// JSON body for a valid product named `name`.
    #[must_use]
    pub fn product(&self, name: &str, featured: bool) -> Value {
        let [province, kind, sportsteam, cday] = &self.not_applicable;
        json!({
            "nameEn": name, "nameFr": name, "nameSp": name,
            "descriptionEn": "Description", "descriptionFr": "Description", "descriptionSp": "Descripción",
            "price": "45.00",
            "categoryId": self.category_id,
            "sizeId": self.size_id,
            "colorId": self.color_id,
            "provinceId": province,
            "typeId": kind,
            "sportsteamId": sportsteam,
            "cdayId": cday,
            "images": [{ "url": "https://example.com/1.jpg" }],
            "isFeatured": featured,
            "isArchived": false,
        })
    }
}
