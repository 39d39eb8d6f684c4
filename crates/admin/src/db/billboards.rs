//! Billboard repository.

use sqlx::PgPool;

use storedash_core::{BillboardId, StoreId};

use super::RepositoryError;
use crate::models::Billboard;
use crate::models::input::BillboardDraft;

const COLUMNS: &str = "id, store_id, label, image_url, created_at, updated_at";

/// Repository for billboards. Every method is scoped to one store.
pub struct BillboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BillboardRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<Billboard>, RepositoryError> {
        let rows = sqlx::query_as::<_, Billboard>(&format!(
            "SELECT {COLUMNS} FROM dashboard.billboards
             WHERE store_id = $1
             ORDER BY created_at DESC"
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
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let row = sqlx::query_as::<_, Billboard>(&format!(
            "SELECT {COLUMNS} FROM dashboard.billboards WHERE store_id = $1 AND id = $2"
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
        draft: &BillboardDraft,
    ) -> Result<Billboard, RepositoryError> {
        sqlx::query_as::<_, Billboard>(&format!(
            "INSERT INTO dashboard.billboards (store_id, label, image_url)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(&draft.label)
        .bind(&draft.image_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "billboard"))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the billboard is not in this store.
    pub async fn update(
        &self,
        store_id: StoreId,
        id: BillboardId,
        draft: &BillboardDraft,
    ) -> Result<Billboard, RepositoryError> {
        sqlx::query_as::<_, Billboard>(&format!(
            "UPDATE dashboard.billboards
             SET label = $3, image_url = $4, updated_at = now()
             WHERE store_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(id)
        .bind(&draft.label)
        .bind(&draft.image_url)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "billboard"))?
        .ok_or(RepositoryError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the billboard is not in this store.
    /// Returns `RepositoryError::Conflict` if categories still use it.
    pub async fn delete(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Billboard, RepositoryError> {
        sqlx::query_as::<_, Billboard>(&format!(
            "DELETE FROM dashboard.billboards
             WHERE store_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "billboard"))?
        .ok_or(RepositoryError::NotFound)
    }

    /// Whether a billboard exists in this store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, store_id: StoreId, id: BillboardId) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM dashboard.billboards WHERE store_id = $1 AND id = $2)",
        )
        .bind(store_id)
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }
}
