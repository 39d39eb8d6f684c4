//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check (main.rs)
//! GET  /health/ready           - Readiness check (main.rs)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Username + password login
//! POST /auth/logout            - Logout
//!
//! # JSON API (see `api`)
//! /api/stores[/{store_id}]
//! /api/{store_id}/{billboards,categories,sizes,colors,provinces,
//!                  types,sportsteams,cdays,products}[/{id}]
//!
//! # Pages (see `pages`)
//! GET  /                       - Redirect to the first store
//! /stores/new
//! /{store_id}[/{entity}[/new|/{id}[/delete]]]
//! /{store_id}/orders
//! /{store_id}/settings[/delete]
//! ```

pub mod api;
pub mod auth;
pub mod pages;

use axum::Router;

use crate::state::AppState;

/// Every dashboard route except health checks and static files.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(api::router())
        .merge(pages::router())
}
