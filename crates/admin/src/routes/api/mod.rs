//! JSON API consumed by the dashboard pages and the storefront.
//!
//! ```text
//! POST   /api/stores                       - Create store
//! PATCH  /api/stores/{store_id}            - Rename store
//! DELETE /api/stores/{store_id}            - Delete store
//!
//! POST   /api/{store_id}/{entity}          - Create (owner)
//! GET    /api/{store_id}/{entity}          - List (public)
//! GET    /api/{store_id}/{entity}/{id}     - Show (public)
//! PATCH  /api/{store_id}/{entity}/{id}     - Update (owner)
//! DELETE /api/{store_id}/{entity}/{id}     - Delete (owner)
//! ```
//!
//! Errors are plain text: `401 Unauthenticated`, `400 <field> is required`,
//! `403 Unauthorized`, `404 Not found`, `500 Internal error`, checked in
//! that order.

pub mod billboards;
pub mod categories;
pub mod localized;
pub mod options;
pub mod products;
pub mod stores;

use axum::Router;
use uuid::Uuid;

use storedash_core::{StoreId, parse_id};

use crate::db::StoreRepository;
use crate::error::AppError;
use crate::models::{CurrentUser, LocalizedKind, OptionKind};
use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<AppState> {
    let router = Router::new()
        .merge(stores::router())
        .merge(billboards::router())
        .merge(categories::router())
        .merge(products::router());

    let router = OptionKind::ALL
        .into_iter()
        .fold(router, |router, kind| router.merge(options::router(kind)));

    LocalizedKind::ALL
        .into_iter()
        .fold(router, |router, kind| router.merge(localized::router(kind)))
}

/// Resolve a store the user owns. Anything else is `403 Unauthorized`.
pub(crate) async fn owned_store(
    state: &AppState,
    segment: &str,
    user: &CurrentUser,
) -> Result<StoreId, AppError> {
    let store_id: StoreId = parse_id(segment).ok_or(AppError::Forbidden)?;

    StoreRepository::new(state.pool())
        .find_owned(store_id, user.id)
        .await?
        .map(|store| store.id)
        .ok_or(AppError::Forbidden)
}

/// Parse an ID from a path segment. Malformed IDs cannot exist, so `404`.
pub(crate) fn path_id<T: From<Uuid>>(segment: &str) -> Result<T, AppError> {
    parse_id(segment).ok_or(AppError::NotFound)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::DashboardConfig;
    use storedash_core::GraphBaseline;

    // Requests that never reach the database, so the pool is never connected.
    fn app() -> Router {
        let config = DashboardConfig {
            database_url: SecretString::from("postgres://localhost/unused"),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            session_secret: SecretString::from("unused"),
            graph_baseline: GraphBaseline::Zero,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
            tls: None,
        };
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        router().with_state(AppState::new(config, pool))
    }

    async fn get(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_list_for_malformed_store_is_empty() {
        for entity in ["billboards", "categories", "sizes", "cdays", "products"] {
            let (status, body) = get(&format!("/api/not-a-store/{entity}")).await;
            assert_eq!(status, StatusCode::OK, "{entity}");
            assert_eq!(body, "[]", "{entity}");
        }
    }

    #[tokio::test]
    async fn test_malformed_product_filter_is_empty() {
        let store = Uuid::new_v4();
        let (status, body) = get(&format!("/api/{store}/products?colorId=red")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn test_show_with_malformed_id_is_not_found() {
        let store = Uuid::new_v4();
        let (status, body) = get(&format!("/api/{store}/colors/not-an-id")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not found");
    }
}
