//! Category endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use storedash_core::{CategoryId, StoreId, parse_id};

use super::{owned_store, path_id};
use crate::db::CategoryRepository;
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::models::input::CategoryInput;
use crate::models::{Category, CategoryWithBillboard};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/{store_id}/categories", get(list).post(create))
        .route(
            "/api/{store_id}/categories/{id}",
            get(show).patch(update).delete(destroy),
        )
}

#[instrument(skip(state, user, input))]
async fn create(
    State(state): State<AppState>,
    Path(store): Path<String>,
    RequireUser(user): RequireUser,
    Json(input): Json<CategoryInput>,
) -> Result<Json<Category>, AppError> {
    let draft = input.validate()?;
    let store_id = owned_store(&state, &store, &user).await?;

    let repo = CategoryRepository::new(state.pool());
    if let Some(invalid) = repo.check_references(store_id, &draft).await? {
        return Err(invalid.into());
    }

    Ok(Json(repo.create(store_id, &draft).await?))
}

#[instrument(skip(state))]
async fn list(
    State(state): State<AppState>,
    Path(store): Path<String>,
) -> Result<Json<Vec<Category>>, AppError> {
    let Some(store_id) = parse_id::<StoreId>(&store) else {
        return Ok(Json(Vec::new()));
    };

    let categories = CategoryRepository::new(state.pool()).list(store_id).await?;
    Ok(Json(categories))
}

/// A single category includes its billboard.
#[instrument(skip(state))]
async fn show(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
) -> Result<Json<CategoryWithBillboard>, AppError> {
    let store_id: StoreId = path_id(&store)?;
    let id: CategoryId = path_id(&id)?;

    CategoryRepository::new(state.pool())
        .get_with_billboard(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[instrument(skip(state, user, input))]
async fn update(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
    RequireUser(user): RequireUser,
    Json(input): Json<CategoryInput>,
) -> Result<Json<Category>, AppError> {
    let draft = input.validate()?;
    let store_id = owned_store(&state, &store, &user).await?;
    let id: CategoryId = path_id(&id)?;

    let repo = CategoryRepository::new(state.pool());
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
) -> Result<Json<Category>, AppError> {
    let store_id = owned_store(&state, &store, &user).await?;
    let id: CategoryId = path_id(&id)?;

    let category = CategoryRepository::new(state.pool())
        .delete(store_id, id)
        .await?;

    Ok(Json(category))
}
