//! Storedash Core - Shared types library.
//!
//! This crate provides common types used across all Storedash components:
//! - `admin` - The store administration dashboard
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, usernames, and months
//! - [`revenue`] - Monthly revenue aggregation for the dashboard graph
//! - [`validate`] - Required-field validation shared by the API and the forms

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod revenue;
pub mod types;
pub mod validate;

pub use revenue::{GraphBaseline, GraphPoint, PaidOrder, graph_revenue, total_revenue};
pub use types::*;
pub use validate::ValidationError;
