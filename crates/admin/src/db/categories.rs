//! Category repository.

use sqlx::PgPool;

use storedash_core::{CategoryId, StoreId};
use storedash_core::validate::ValidationError;

use super::{BillboardRepository, RepositoryError};
use crate::models::input::CategoryDraft;
use crate::models::{Category, CategoryWithBillboard};

const COLUMNS: &str = "id, store_id, billboard_id, name_en, name_fr, name_sp, created_at, updated_at";

/// Repository for categories. Every method is scoped to one store.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, Category>(&format!(
            "SELECT {COLUMNS} FROM dashboard.categories
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
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, Category>(&format!(
            "SELECT {COLUMNS} FROM dashboard.categories WHERE store_id = $1 AND id = $2"
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// A category with its billboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the billboard is missing.
    pub async fn get_with_billboard(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<CategoryWithBillboard>, RepositoryError> {
        let Some(category) = self.get(store_id, id).await? else {
            return Ok(None);
        };

        let billboard = BillboardRepository::new(self.pool)
            .get(store_id, category.billboard_id)
            .await?
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!(
                    "category {} references missing billboard {}",
                    category.id, category.billboard_id
                ))
            })?;

        Ok(Some(CategoryWithBillboard {
            category,
            billboard,
        }))
    }

    /// Check that the draft's billboard belongs to this store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn check_references(
        &self,
        store_id: StoreId,
        draft: &CategoryDraft,
    ) -> Result<Option<ValidationError>, RepositoryError> {
        let exists = BillboardRepository::new(self.pool)
            .exists(store_id, draft.billboard_id)
            .await?;

        Ok((!exists).then_some(ValidationError::Invalid("billboard Id")))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: StoreId,
        draft: &CategoryDraft,
    ) -> Result<Category, RepositoryError> {
        sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO dashboard.categories (store_id, billboard_id, name_en, name_fr, name_sp)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(draft.billboard_id)
        .bind(&draft.name.en)
        .bind(&draft.name.fr)
        .bind(&draft.name.sp)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "category"))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category is not in this store.
    pub async fn update(
        &self,
        store_id: StoreId,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Category, RepositoryError> {
        sqlx::query_as::<_, Category>(&format!(
            "UPDATE dashboard.categories
             SET billboard_id = $3, name_en = $4, name_fr = $5, name_sp = $6, updated_at = now()
             WHERE store_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(id)
        .bind(draft.billboard_id)
        .bind(&draft.name.en)
        .bind(&draft.name.fr)
        .bind(&draft.name.sp)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "category"))?
        .ok_or(RepositoryError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category is not in this store.
    /// Returns `RepositoryError::Conflict` if products still use it.
    pub async fn delete(&self, store_id: StoreId, id: CategoryId) -> Result<Category, RepositoryError> {
        sqlx::query_as::<_, Category>(&format!(
            "DELETE FROM dashboard.categories
             WHERE store_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "category"))?
        .ok_or(RepositoryError::NotFound)
    }
}
