//! HTTP middleware for the dashboard.
//!
//! # Layer order (outermost first)
//!
//! 1. Sentry (`NewSentryLayer`, `SentryHttpLayer`)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Security headers
//! 4. Session layer (tower-sessions with `PostgreSQL` store)
//!
//! Authentication is per handler through the [`auth`] extractors.

pub mod auth;
pub mod session;

pub use auth::{OptionalUser, RequireUser, clear_current_user, set_current_user};
pub use session::{create_session_layer, set_flash, take_flash};
