//! Store repository.
//!
//! Ownership checks for every catalog write go through
//! [`StoreRepository::find_owned`].

use sqlx::PgPool;

use storedash_core::{StoreId, UserId};

use super::RepositoryError;
use crate::models::Store;

const COLUMNS: &str = "id, name, user_id, created_at, updated_at";

/// Repository for stores.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a store owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, user_id: UserId, name: &str) -> Result<Store, RepositoryError> {
        let store = sqlx::query_as::<_, Store>(&format!(
            "INSERT INTO dashboard.stores (name, user_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        ))
        .bind(name)
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(store)
    }

    /// Get a store by ID regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let store = sqlx::query_as::<_, Store>(&format!(
            "SELECT {COLUMNS} FROM dashboard.stores WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(store)
    }

    /// Get a store only if `user_id` owns it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_owned(
        &self,
        id: StoreId,
        user_id: UserId,
    ) -> Result<Option<Store>, RepositoryError> {
        let store = sqlx::query_as::<_, Store>(&format!(
            "SELECT {COLUMNS} FROM dashboard.stores WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(store)
    }

    /// All stores of a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Store>, RepositoryError> {
        let stores = sqlx::query_as::<_, Store>(&format!(
            "SELECT {COLUMNS} FROM dashboard.stores WHERE user_id = $1 ORDER BY created_at"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(stores)
    }

    /// The user's oldest store, used as the landing page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn first_for_user(&self, user_id: UserId) -> Result<Option<Store>, RepositoryError> {
        let store = sqlx::query_as::<_, Store>(&format!(
            "SELECT {COLUMNS} FROM dashboard.stores WHERE user_id = $1 ORDER BY created_at LIMIT 1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(store)
    }

    /// Rename a store owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such store is owned by the user.
    pub async fn rename(
        &self,
        id: StoreId,
        user_id: UserId,
        name: &str,
    ) -> Result<Store, RepositoryError> {
        sqlx::query_as::<_, Store>(&format!(
            "UPDATE dashboard.stores SET name = $3, updated_at = now()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .bind(name)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a store and, by cascade, its whole catalog and orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such store is owned by the user.
    pub async fn delete(&self, id: StoreId, user_id: UserId) -> Result<Store, RepositoryError> {
        sqlx::query_as::<_, Store>(&format!(
            "DELETE FROM dashboard.stores WHERE id = $1 AND user_id = $2 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }
}
