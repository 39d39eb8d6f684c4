//! Size and color repository.
//!
//! Both tables share one shape, so the repository takes an [`OptionKind`]
//! and interpolates its table name. Table names are static, never user input.

use sqlx::PgPool;

use storedash_core::{OptionId, StoreId};

use super::RepositoryError;
use crate::models::input::OptionDraft;
use crate::models::{OptionKind, OptionValue};

const COLUMNS: &str = "id, store_id, name, value, created_at, updated_at";

/// Repository for one name/value option list.
pub struct OptionRepository<'a> {
    pool: &'a PgPool,
    kind: OptionKind,
}

impl<'a> OptionRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, kind: OptionKind) -> Self {
        Self { pool, kind }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<OptionValue>, RepositoryError> {
        let rows = sqlx::query_as::<_, OptionValue>(&format!(
            "SELECT {COLUMNS} FROM {} WHERE store_id = $1 ORDER BY created_at DESC",
            self.kind.table()
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        store_id: StoreId,
        id: OptionId,
    ) -> Result<Option<OptionValue>, RepositoryError> {
        let row = sqlx::query_as::<_, OptionValue>(&format!(
            "SELECT {COLUMNS} FROM {} WHERE store_id = $1 AND id = $2",
            self.kind.table()
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: StoreId,
        draft: &OptionDraft,
    ) -> Result<OptionValue, RepositoryError> {
        sqlx::query_as::<_, OptionValue>(&format!(
            "INSERT INTO {} (store_id, name, value) VALUES ($1, $2, $3) RETURNING {COLUMNS}",
            self.kind.table()
        ))
        .bind(store_id)
        .bind(&draft.name)
        .bind(&draft.value)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, self.kind.noun()))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row is not in this store.
    pub async fn update(
        &self,
        store_id: StoreId,
        id: OptionId,
        draft: &OptionDraft,
    ) -> Result<OptionValue, RepositoryError> {
        sqlx::query_as::<_, OptionValue>(&format!(
            "UPDATE {} SET name = $3, value = $4, updated_at = now()
             WHERE store_id = $1 AND id = $2
             RETURNING {COLUMNS}",
            self.kind.table()
        ))
        .bind(store_id)
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.value)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, self.kind.noun()))?
        .ok_or(RepositoryError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row is not in this store.
    /// Returns `RepositoryError::Conflict` if products still use it.
    pub async fn delete(&self, store_id: StoreId, id: OptionId) -> Result<OptionValue, RepositoryError> {
        sqlx::query_as::<_, OptionValue>(&format!(
            "DELETE FROM {} WHERE store_id = $1 AND id = $2 RETURNING {COLUMNS}",
            self.kind.table()
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, self.kind.noun()))?
        .ok_or(RepositoryError::NotFound)
    }
}
