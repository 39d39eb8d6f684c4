//! Database operations for the dashboard `PostgreSQL` database.
//!
//! # Schema: `dashboard`
//!
//! ## Tables
//!
//! - `users` - Dashboard accounts (username + argon2 hash)
//! - `stores` - Stores, each owned by one user
//! - `billboards` - Category banners
//! - `categories` - Product categories (trilingual names)
//! - `sizes`, `colors` - Name/value option lists
//! - `provinces`, `types`, `sportsteams`, `cdays` - Trilingual option lists
//! - `products`, `product_images` - Catalog
//! - `orders`, `order_items` - Orders placed through the storefront
//! - `session` - tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p storedash-cli -- migrate
//! ```

pub mod billboards;
pub mod categories;
pub mod localized;
pub mod options;
pub mod orders;
pub mod products;
pub mod stores;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::error::ErrorKind;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use billboards::BillboardRepository;
pub use categories::CategoryRepository;
pub use localized::LocalizedRepository;
pub use options::OptionRepository;
pub use orders::{NewOrder, OrderRepository};
pub use products::{ProductFilter, ProductRepository};
pub use stores::StoreRepository;
pub use users::UserRepository;

/// SQLSTATE for a value that overflows its numeric column.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate username, row still referenced).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The database refused a value (check constraint, numeric overflow).
    #[error("{0}")]
    Rejected(String),
}

impl RepositoryError {
    /// Classify a sqlx error, turning constraint violations into `Conflict`.
    ///
    /// `what` names the row being written, e.g. `"size"`.
    pub(crate) fn from_write(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && let Some(classified) = Self::violation(db_err.kind(), db_err.code().as_deref(), what)
        {
            return classified;
        }
        Self::Database(err)
    }

    fn violation(kind: ErrorKind, code: Option<&str>, what: &str) -> Option<Self> {
        match kind {
            ErrorKind::UniqueViolation => Some(Self::Conflict(format!("{what} already exists"))),
            ErrorKind::ForeignKeyViolation => Some(Self::Conflict(format!("{what} is still in use"))),
            ErrorKind::CheckViolation => Some(Self::Rejected(format!("{what} is invalid"))),
            _ if code == Some(NUMERIC_VALUE_OUT_OF_RANGE) => {
                Some(Self::Rejected(format!("{what} is out of range")))
            }
            _ => None,
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_classification() {
        assert!(matches!(
            RepositoryError::violation(ErrorKind::UniqueViolation, Some("23505"), "size"),
            Some(RepositoryError::Conflict(m)) if m == "size already exists"
        ));
        assert!(matches!(
            RepositoryError::violation(ErrorKind::ForeignKeyViolation, Some("23503"), "billboard"),
            Some(RepositoryError::Conflict(m)) if m == "billboard is still in use"
        ));
        assert!(matches!(
            RepositoryError::violation(ErrorKind::CheckViolation, Some("23514"), "product"),
            Some(RepositoryError::Rejected(m)) if m == "product is invalid"
        ));
        assert!(matches!(
            RepositoryError::violation(ErrorKind::Other, Some("22003"), "product"),
            Some(RepositoryError::Rejected(m)) if m == "product is out of range"
        ));
        assert!(RepositoryError::violation(ErrorKind::Other, Some("40001"), "product").is_none());
    }
}
