//! Store endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{patch, post},
};
use tracing::instrument;

use super::owned_store;
use crate::db::StoreRepository;
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::models::Store;
use crate::models::input::StoreInput;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stores", post(create))
        .route("/api/stores/{store_id}", patch(update).delete(destroy))
}

#[instrument(skip(state, user, input))]
async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(input): Json<StoreInput>,
) -> Result<Json<Store>, AppError> {
    let name = input.validate()?;
    let store = StoreRepository::new(state.pool())
        .create(user.id, &name)
        .await?;

    tracing::info!(store_id = %store.id, "Store created");
    Ok(Json(store))
}

#[instrument(skip(state, user, input))]
async fn update(
    State(state): State<AppState>,
    Path(store): Path<String>,
    RequireUser(user): RequireUser,
    Json(input): Json<StoreInput>,
) -> Result<Json<Store>, AppError> {
    let name = input.validate()?;
    let store_id = owned_store(&state, &store, &user).await?;

    let store = StoreRepository::new(state.pool())
        .rename(store_id, user.id, &name)
        .await?;

    Ok(Json(store))
}

#[instrument(skip(state, user))]
async fn destroy(
    State(state): State<AppState>,
    Path(store): Path<String>,
    RequireUser(user): RequireUser,
) -> Result<Json<Store>, AppError> {
    let store_id = owned_store(&state, &store, &user).await?;

    let store = StoreRepository::new(state.pool())
        .delete(store_id, user.id)
        .await?;

    tracing::info!(store_id = %store.id, "Store deleted");
    Ok(Json(store))
}
