//! Product endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use storedash_core::{ProductId, StoreId, parse_id};

use super::{owned_store, path_id};
use crate::db::{ProductFilter, ProductRepository};
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::models::input::ProductInput;
use crate::models::{Product, ProductDetail};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/{store_id}/products", get(list).post(create))
        .route(
            "/api/{store_id}/products/{id}",
            get(show).patch(update).delete(destroy),
        )
}

/// Query string of the product list. Empty values are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category_id: Option<String>,
    pub color_id: Option<String>,
    pub size_id: Option<String>,
    pub province_id: Option<String>,
    pub type_id: Option<String>,
    pub sportsteam_id: Option<String>,
    pub cday_id: Option<String>,
    pub is_featured: Option<String>,
}

/// One filter value: `Ok(None)` when absent, `Err(())` when malformed.
fn filter_id<T: From<uuid::Uuid>>(value: Option<&str>) -> Result<Option<T>, ()> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_id(text).map(Some).ok_or(()),
    }
}

impl ProductQuery {
    /// Build the repository filter. `None` means a malformed ID was given,
    /// which can match nothing.
    #[must_use]
    pub fn into_filter(self) -> Option<ProductFilter> {
        let featured_only = self
            .is_featured
            .as_deref()
            .map(str::trim)
            .is_some_and(|v| !v.is_empty() && v != "false" && v != "0");

        Some(ProductFilter {
            category_id: filter_id(self.category_id.as_deref()).ok()?,
            color_id: filter_id(self.color_id.as_deref()).ok()?,
            size_id: filter_id(self.size_id.as_deref()).ok()?,
            province_id: filter_id(self.province_id.as_deref()).ok()?,
            type_id: filter_id(self.type_id.as_deref()).ok()?,
            sportsteam_id: filter_id(self.sportsteam_id.as_deref()).ok()?,
            cday_id: filter_id(self.cday_id.as_deref()).ok()?,
            featured_only,
            include_archived: false,
        })
    }
}

#[instrument(skip(state, user, input))]
async fn create(
    State(state): State<AppState>,
    Path(store): Path<String>,
    RequireUser(user): RequireUser,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, AppError> {
    let draft = input.validate()?;
    let store_id = owned_store(&state, &store, &user).await?;

    let repo = ProductRepository::new(state.pool());
    if let Some(invalid) = repo.check_references(store_id, &draft).await? {
        return Err(invalid.into());
    }

    Ok(Json(repo.create(store_id, &draft).await?))
}

/// Public product list. Archived products never appear.
#[instrument(skip(state))]
async fn list(
    State(state): State<AppState>,
    Path(store): Path<String>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductDetail>>, AppError> {
    let (Some(store_id), Some(filter)) = (parse_id::<StoreId>(&store), query.into_filter()) else {
        return Ok(Json(Vec::new()));
    };

    let products = ProductRepository::new(state.pool())
        .list(store_id, &filter)
        .await?;

    Ok(Json(products))
}

#[instrument(skip(state))]
async fn show(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
) -> Result<Json<ProductDetail>, AppError> {
    let store_id: StoreId = path_id(&store)?;
    let id: ProductId = path_id(&id)?;

    ProductRepository::new(state.pool())
        .get(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// Updates the product and replaces its images.
#[instrument(skip(state, user, input))]
async fn update(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
    RequireUser(user): RequireUser,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, AppError> {
    let draft = input.validate()?;
    let store_id = owned_store(&state, &store, &user).await?;
    let id: ProductId = path_id(&id)?;

    let repo = ProductRepository::new(state.pool());
    if let Some(invalid) = repo.check_references(store_id, &draft).await? {
        return Err(invalid.into());
    }

    Ok(Json(repo.update(store_id, id, &draft).await?))
}

#[instrument(skip(state, user))]
async fn destroy(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
    RequireUser(user): RequireUser,
) -> Result<Json<Product>, AppError> {
    let store_id = owned_store(&state, &store, &user).await?;
    let id: ProductId = path_id(&id)?;

    let product = ProductRepository::new(state.pool())
        .delete(store_id, id)
        .await?;

    Ok(Json(product))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storedash_core::{CategoryId, OptionId};

    use super::*;

    #[test]
    fn test_empty_query_is_unfiltered() {
        let filter = ProductQuery::default().into_filter().unwrap();
        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn test_query_ids_and_blank_values() {
        let category = CategoryId::generate();
        let color = OptionId::generate();
        let query = ProductQuery {
            category_id: Some(category.to_string()),
            color_id: Some(color.to_string()),
            size_id: Some(String::new()),
            is_featured: Some("true".to_owned()),
            ..ProductQuery::default()
        };

        let filter = query.into_filter().unwrap();
        assert_eq!(filter.category_id, Some(category));
        assert_eq!(filter.color_id, Some(color));
        assert_eq!(filter.size_id, None);
        assert!(filter.featured_only);
        assert!(!filter.include_archived);
    }

    #[test]
    fn test_malformed_id_matches_nothing() {
        let query = ProductQuery {
            cday_id: Some("christmas".to_owned()),
            ..ProductQuery::default()
        };
        assert!(query.into_filter().is_none());
    }

    #[test]
    fn test_is_featured_false_does_not_filter() {
        let query = ProductQuery {
            is_featured: Some("false".to_owned()),
            ..ProductQuery::default()
        };
        assert!(!query.into_filter().unwrap().featured_only);
    }
}
