//! Province, type, sports team and celebration day repository.
//!
//! The four tables share one shape; see [`LocalizedKind`].

use sqlx::PgPool;

use storedash_core::{OptionId, StoreId};

use super::RepositoryError;
use crate::models::input::LocalizedDraft;
use crate::models::{LocalizedKind, LocalizedOption};

const COLUMNS: &str = "id, store_id, name, value_en, value_fr, value_sp, created_at, updated_at";

/// Repository for one trilingual option list.
pub struct LocalizedRepository<'a> {
    pool: &'a PgPool,
    kind: LocalizedKind,
}

impl<'a> LocalizedRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, kind: LocalizedKind) -> Self {
        Self { pool, kind }
    }

    /// Every entry, including the `N/A` sentinel. Used by the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<LocalizedOption>, RepositoryError> {
        let rows = sqlx::query_as::<_, LocalizedOption>(&format!(
            "SELECT {COLUMNS} FROM {} WHERE store_id = $1 ORDER BY created_at DESC",
            self.kind.table()
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Entries shown to the storefront: everything except `N/A`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_public(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<LocalizedOption>, RepositoryError> {
        let rows = sqlx::query_as::<_, LocalizedOption>(&format!(
            "SELECT {COLUMNS} FROM {}
             WHERE store_id = $1 AND name <> $2
             ORDER BY created_at DESC",
            self.kind.table()
        ))
        .bind(store_id)
        .bind(LocalizedKind::NOT_APPLICABLE)
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
    ) -> Result<Option<LocalizedOption>, RepositoryError> {
        let row = sqlx::query_as::<_, LocalizedOption>(&format!(
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
        draft: &LocalizedDraft,
    ) -> Result<LocalizedOption, RepositoryError> {
        sqlx::query_as::<_, LocalizedOption>(&format!(
            "INSERT INTO {} (store_id, name, value_en, value_fr, value_sp)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}",
            self.kind.table()
        ))
        .bind(store_id)
        .bind(&draft.name)
        .bind(&draft.value.en)
        .bind(&draft.value.fr)
        .bind(&draft.value.sp)
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
        draft: &LocalizedDraft,
    ) -> Result<LocalizedOption, RepositoryError> {
        sqlx::query_as::<_, LocalizedOption>(&format!(
            "UPDATE {}
             SET name = $3, value_en = $4, value_fr = $5, value_sp = $6, updated_at = now()
             WHERE store_id = $1 AND id = $2
             RETURNING {COLUMNS}",
            self.kind.table()
        ))
        .bind(store_id)
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.value.en)
        .bind(&draft.value.fr)
        .bind(&draft.value.sp)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, self.kind.noun()))?
        .ok_or(RepositoryError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row is not in this store.
    /// Returns `RepositoryError::Conflict` if products still use it.
    pub async fn delete(
        &self,
        store_id: StoreId,
        id: OptionId,
    ) -> Result<LocalizedOption, RepositoryError> {
        sqlx::query_as::<_, LocalizedOption>(&format!(
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
