//! Business logic services for the dashboard.
//!
//! # Services
//!
//! - `analytics` - Revenue graph and overview counters
//! - `auth` - Username and password authentication

pub mod analytics;
pub mod auth;

pub use analytics::{AnalyticsService, Overview};
pub use auth::{AuthError, AuthService};
