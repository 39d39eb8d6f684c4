//! Storedash Admin library.
//!
//! The store administration dashboard as a library, so the binary, the CLI
//! and tests share one implementation.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`db`] - `PostgreSQL` repositories
//! - [`models`] - Catalog rows, request bodies, orders and sessions
//! - [`services`] - Authentication and analytics
//! - [`routes`] - JSON API, auth and server-rendered pages
//! - [`middleware`] - Session layer and auth extractors
//! - [`components`] - Data table and form view models

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
