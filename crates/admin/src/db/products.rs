//! Product repository.
//!
//! Products reference seven option rows. Reads return [`ProductDetail`] with
//! every reference resolved, assembled in Rust from per-store lookup maps
//! rather than a seven-way join.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use sqlx::PgPool;

use storedash_core::validate::ValidationError;
use storedash_core::{CategoryId, OptionId, ProductId, StoreId};

use super::{CategoryRepository, LocalizedRepository, OptionRepository, RepositoryError};
use crate::models::input::ProductDraft;
use crate::models::{
    Category, LocalizedKind, LocalizedOption, OptionKind, OptionValue, Product, ProductDetail,
    ProductImage,
};

const COLUMNS: &str = "id, store_id, category_id, name_en, name_fr, name_sp, \
    description_en, description_fr, description_sp, price, is_featured, is_archived, \
    size_id, color_id, province_id, type_id, sportsteam_id, cday_id, created_at, updated_at";

const IMAGE_COLUMNS: &str = "id, product_id, url, created_at, updated_at";

/// Filters for the product list. `None` fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub color_id: Option<OptionId>,
    pub size_id: Option<OptionId>,
    pub province_id: Option<OptionId>,
    pub type_id: Option<OptionId>,
    pub sportsteam_id: Option<OptionId>,
    pub cday_id: Option<OptionId>,
    /// Only featured products.
    pub featured_only: bool,
    /// Include archived products (dashboard table only).
    pub include_archived: bool,
}

// =============================================================================
// Lookups
// =============================================================================

/// Every option row of a store, keyed by ID.
struct Lookups {
    categories: HashMap<CategoryId, Category>,
    sizes: HashMap<OptionId, OptionValue>,
    colors: HashMap<OptionId, OptionValue>,
    provinces: HashMap<OptionId, LocalizedOption>,
    types: HashMap<OptionId, LocalizedOption>,
    sportsteams: HashMap<OptionId, LocalizedOption>,
    cdays: HashMap<OptionId, LocalizedOption>,
}

impl Lookups {
    async fn load(pool: &PgPool, store_id: StoreId) -> Result<Self, RepositoryError> {
        let category_repo = CategoryRepository::new(pool);
        let size_repo = OptionRepository::new(pool, OptionKind::Size);
        let color_repo = OptionRepository::new(pool, OptionKind::Color);
        let province_repo = LocalizedRepository::new(pool, LocalizedKind::Province);
        let type_repo = LocalizedRepository::new(pool, LocalizedKind::Type);
        let sportsteam_repo = LocalizedRepository::new(pool, LocalizedKind::Sportsteam);
        let cday_repo = LocalizedRepository::new(pool, LocalizedKind::Cday);

        let (categories, sizes, colors, provinces, types, sportsteams, cdays) = tokio::try_join!(
            category_repo.list(store_id),
            size_repo.list(store_id),
            color_repo.list(store_id),
            province_repo.list(store_id),
            type_repo.list(store_id),
            sportsteam_repo.list(store_id),
            cday_repo.list(store_id),
        )?;

        Ok(Self {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            sizes: options_by_id(sizes),
            colors: options_by_id(colors),
            provinces: localized_by_id(provinces),
            types: localized_by_id(types),
            sportsteams: localized_by_id(sportsteams),
            cdays: localized_by_id(cdays),
        })
    }

    fn detail(
        &self,
        product: Product,
        images: Vec<ProductImage>,
    ) -> Result<ProductDetail, RepositoryError> {
        let id = product.id;
        Ok(ProductDetail {
            category: resolve(&self.categories, product.category_id, "category", id)?,
            size: resolve(&self.sizes, product.size_id, "size", id)?,
            color: resolve(&self.colors, product.color_id, "color", id)?,
            province: resolve(&self.provinces, product.province_id, "province", id)?,
            kind: resolve(&self.types, product.type_id, "type", id)?,
            sportsteam: resolve(&self.sportsteams, product.sportsteam_id, "sportsteam", id)?,
            cday: resolve(&self.cdays, product.cday_id, "cday", id)?,
            images,
            product,
        })
    }
}

fn options_by_id(rows: Vec<OptionValue>) -> HashMap<OptionId, OptionValue> {
    rows.into_iter().map(|r| (r.id, r)).collect()
}

fn localized_by_id(rows: Vec<LocalizedOption>) -> HashMap<OptionId, LocalizedOption> {
    rows.into_iter().map(|r| (r.id, r)).collect()
}

fn resolve<K, V>(
    map: &HashMap<K, V>,
    key: K,
    what: &str,
    product: ProductId,
) -> Result<V, RepositoryError>
where
    K: Eq + Hash + Display,
    V: Clone,
{
    map.get(&key).cloned().ok_or_else(|| {
        RepositoryError::DataCorruption(format!("product {product} references missing {what} {key}"))
    })
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for products and their images.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Products of a store matching `filter`, newest first, with relations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if a reference is dangling.
    pub async fn list(
        &self,
        store_id: StoreId,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductDetail>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM dashboard.products
             WHERE store_id = $1
               AND ($2::uuid IS NULL OR category_id = $2)
               AND ($3::uuid IS NULL OR color_id = $3)
               AND ($4::uuid IS NULL OR size_id = $4)
               AND ($5::uuid IS NULL OR province_id = $5)
               AND ($6::uuid IS NULL OR type_id = $6)
               AND ($7::uuid IS NULL OR sportsteam_id = $7)
               AND ($8::uuid IS NULL OR cday_id = $8)
               AND (NOT $9 OR is_featured)
               AND ($10 OR NOT is_archived)
             ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .bind(filter.category_id)
        .bind(filter.color_id)
        .bind(filter.size_id)
        .bind(filter.province_id)
        .bind(filter.type_id)
        .bind(filter.sportsteam_id)
        .bind(filter.cday_id)
        .bind(filter.featured_only)
        .bind(filter.include_archived)
        .fetch_all(self.pool)
        .await?;

        if products.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<_> = products.iter().map(|p| p.id.as_uuid()).collect();
        let (lookups, images) =
            tokio::try_join!(Lookups::load(self.pool, store_id), self.images_for(&ids))?;

        let mut images_by_product: HashMap<ProductId, Vec<ProductImage>> = HashMap::new();
        for image in images {
            images_by_product
                .entry(image.product_id)
                .or_default()
                .push(image);
        }

        products
            .into_iter()
            .map(|product| {
                let images = images_by_product.remove(&product.id).unwrap_or_default();
                lookups.detail(product, images)
            })
            .collect()
    }

    /// A single product with relations. Archived products are included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if a reference is dangling.
    pub async fn get(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<ProductDetail>, RepositoryError> {
        let Some(product) = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM dashboard.products WHERE store_id = $1 AND id = $2"
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        else {
            return Ok(None);
        };

        let ids = [id.as_uuid()];
        let (lookups, images) =
            tokio::try_join!(Lookups::load(self.pool, store_id), self.images_for(&ids))?;

        lookups.detail(product, images).map(Some)
    }

    async fn images_for(&self, ids: &[uuid::Uuid]) -> Result<Vec<ProductImage>, RepositoryError> {
        let images = sqlx::query_as::<_, ProductImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM dashboard.product_images
             WHERE product_id = ANY($1)
             ORDER BY product_id, position"
        ))
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(images)
    }

    /// Check that every reference in the draft belongs to this store.
    ///
    /// Returns the first offending field in validation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn check_references(
        &self,
        store_id: StoreId,
        draft: &ProductDraft,
    ) -> Result<Option<ValidationError>, RepositoryError> {
        let found: (bool, bool, bool, bool, bool, bool, bool) = sqlx::query_as(
            r"
            SELECT
                EXISTS (SELECT 1 FROM dashboard.categories  WHERE store_id = $1 AND id = $2),
                EXISTS (SELECT 1 FROM dashboard.sizes       WHERE store_id = $1 AND id = $3),
                EXISTS (SELECT 1 FROM dashboard.colors      WHERE store_id = $1 AND id = $4),
                EXISTS (SELECT 1 FROM dashboard.provinces   WHERE store_id = $1 AND id = $5),
                EXISTS (SELECT 1 FROM dashboard.types       WHERE store_id = $1 AND id = $6),
                EXISTS (SELECT 1 FROM dashboard.sportsteams WHERE store_id = $1 AND id = $7),
                EXISTS (SELECT 1 FROM dashboard.cdays       WHERE store_id = $1 AND id = $8)
            ",
        )
        .bind(store_id)
        .bind(draft.category_id)
        .bind(draft.size_id)
        .bind(draft.color_id)
        .bind(draft.province_id)
        .bind(draft.type_id)
        .bind(draft.sportsteam_id)
        .bind(draft.cday_id)
        .fetch_one(self.pool)
        .await?;

        let checks = [
            (found.0, "category Id"),
            (found.1, "size Id"),
            (found.2, "color Id"),
            (found.3, "province Id"),
            (found.4, "type Id"),
            (found.5, "sportsteam Id"),
            (found.6, "cday Id"),
        ];

        Ok(checks
            .into_iter()
            .find(|(ok, _)| !ok)
            .map(|(_, field)| ValidationError::Invalid(field)))
    }

    /// Create a product and its images in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a write fails.
    pub async fn create(
        &self,
        store_id: StoreId,
        draft: &ProductDraft,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO dashboard.products (
                store_id, category_id, name_en, name_fr, name_sp,
                description_en, description_fr, description_sp, price,
                is_featured, is_archived,
                size_id, color_id, province_id, type_id, sportsteam_id, cday_id
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(draft.category_id)
        .bind(&draft.name.en)
        .bind(&draft.name.fr)
        .bind(&draft.name.sp)
        .bind(&draft.description.en)
        .bind(&draft.description.fr)
        .bind(&draft.description.sp)
        .bind(draft.price)
        .bind(draft.is_featured)
        .bind(draft.is_archived)
        .bind(draft.size_id)
        .bind(draft.color_id)
        .bind(draft.province_id)
        .bind(draft.type_id)
        .bind(draft.sportsteam_id)
        .bind(draft.cday_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_write(e, "product"))?;

        insert_images(&mut tx, product.id, &draft.images).await?;
        tx.commit().await?;

        Ok(product)
    }

    /// Update a product and replace its image set in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product is not in this store.
    pub async fn update(
        &self,
        store_id: StoreId,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE dashboard.products SET
                category_id = $3, name_en = $4, name_fr = $5, name_sp = $6,
                description_en = $7, description_fr = $8, description_sp = $9,
                price = $10, is_featured = $11, is_archived = $12,
                size_id = $13, color_id = $14, province_id = $15,
                type_id = $16, sportsteam_id = $17, cday_id = $18,
                updated_at = now()
             WHERE store_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(id)
        .bind(draft.category_id)
        .bind(&draft.name.en)
        .bind(&draft.name.fr)
        .bind(&draft.name.sp)
        .bind(&draft.description.en)
        .bind(&draft.description.fr)
        .bind(&draft.description.sp)
        .bind(draft.price)
        .bind(draft.is_featured)
        .bind(draft.is_archived)
        .bind(draft.size_id)
        .bind(draft.color_id)
        .bind(draft.province_id)
        .bind(draft.type_id)
        .bind(draft.sportsteam_id)
        .bind(draft.cday_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_write(e, "product"))?
        .ok_or(RepositoryError::NotFound)?;

        sqlx::query("DELETE FROM dashboard.product_images WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_images(&mut tx, id, &draft.images).await?;

        tx.commit().await?;

        Ok(product)
    }

    /// Delete a product. Images go with it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product is not in this store.
    /// Returns `RepositoryError::Conflict` if orders reference it.
    pub async fn delete(&self, store_id: StoreId, id: ProductId) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(&format!(
            "DELETE FROM dashboard.products
             WHERE store_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "product"))?
        .ok_or(RepositoryError::NotFound)
    }

    /// Number of products in stock (not archived).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stock_count(&self, store_id: StoreId) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM dashboard.products WHERE store_id = $1 AND NOT is_archived",
        )
        .bind(store_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}

async fn insert_images(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    product_id: ProductId,
    urls: &[String],
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO dashboard.product_images (product_id, url, position)
        SELECT $1, url, position::int
        FROM UNNEST($2::text[]) WITH ORDINALITY AS t(url, position)
        ",
    )
    .bind(product_id)
    .bind(urls)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use sqlx::postgres::PgPoolOptions;
    use uuid::Uuid;

    use super::*;

    // Nothing listens on port 1, so every acquire fails fast.
    fn unreachable_pool() -> PgPool {
        PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://storedash@127.0.0.1:1/storedash")
            .unwrap()
    }

    #[tokio::test]
    async fn test_lookups_report_database_errors() {
        let pool = unreachable_pool();

        let result = Lookups::load(&pool, StoreId::new(Uuid::new_v4())).await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }

    #[tokio::test]
    async fn test_get_reports_database_errors() {
        let pool = unreachable_pool();

        let result = ProductRepository::new(&pool)
            .get(StoreId::new(Uuid::new_v4()), ProductId::new(Uuid::new_v4()))
            .await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }

    #[test]
    fn test_default_filter_hides_archived() {
        let filter = ProductFilter::default();
        assert!(!filter.include_archived);
        assert!(!filter.featured_only);
        assert!(filter.category_id.is_none());
    }
}
