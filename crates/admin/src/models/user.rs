//! Dashboard account domain type.

use chrono::{DateTime, Utc};

use storedash_core::{UserId, Username};

/// A dashboard account (store owner).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name.
    pub username: Username,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
