//! Store domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use storedash_core::{StoreId, UserId};

/// A store. Every catalog row belongs to exactly one store.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    /// Owner; only this user may modify the store or its catalog.
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
