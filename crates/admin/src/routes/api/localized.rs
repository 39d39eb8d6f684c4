//! Province, type, sports team and celebration day endpoints, mounted once
//! per [`LocalizedKind`].
//!
//! The public list hides the `N/A` entry; the single-row `GET` does not, so
//! the storefront can still resolve a product that points at it.

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use storedash_core::{OptionId, StoreId, parse_id};

use super::{owned_store, path_id};
use crate::db::LocalizedRepository;
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::models::input::LocalizedInput;
use crate::models::{LocalizedKind, LocalizedOption};
use crate::state::AppState;

/// Routes for one kind, e.g. `/api/{store_id}/cdays`.
pub fn router(kind: LocalizedKind) -> Router<AppState> {
    let base = format!("/api/{{store_id}}/{}", kind.slug());
    Router::new()
        .route(&base, get(list).post(create))
        .route(
            &format!("{base}/{{id}}"),
            get(show).patch(update).delete(destroy),
        )
        .layer(Extension(kind))
}

#[instrument(skip(state, user, input), fields(kind = kind.slug()))]
async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<LocalizedKind>,
    Path(store): Path<String>,
    RequireUser(user): RequireUser,
    Json(input): Json<LocalizedInput>,
) -> Result<Json<LocalizedOption>, AppError> {
    let draft = input.validate()?;
    let store_id = owned_store(&state, &store, &user).await?;

    let row = LocalizedRepository::new(state.pool(), kind)
        .create(store_id, &draft)
        .await?;

    Ok(Json(row))
}

#[instrument(skip(state), fields(kind = kind.slug()))]
async fn list(
    State(state): State<AppState>,
    Extension(kind): Extension<LocalizedKind>,
    Path(store): Path<String>,
) -> Result<Json<Vec<LocalizedOption>>, AppError> {
    let Some(store_id) = parse_id::<StoreId>(&store) else {
        return Ok(Json(Vec::new()));
    };

    let rows = LocalizedRepository::new(state.pool(), kind)
        .list_public(store_id)
        .await?;
    Ok(Json(rows))
}

#[instrument(skip(state), fields(kind = kind.slug()))]
async fn show(
    State(state): State<AppState>,
    Extension(kind): Extension<LocalizedKind>,
    Path((store, id)): Path<(String, String)>,
) -> Result<Json<LocalizedOption>, AppError> {
    let store_id: StoreId = path_id(&store)?;
    let id: OptionId = path_id(&id)?;

    LocalizedRepository::new(state.pool(), kind)
        .get(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[instrument(skip(state, user, input), fields(kind = kind.slug()))]
async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<LocalizedKind>,
    Path((store, id)): Path<(String, String)>,
    RequireUser(user): RequireUser,
    Json(input): Json<LocalizedInput>,
) -> Result<Json<LocalizedOption>, AppError> {
    let draft = input.validate()?;
    let store_id = owned_store(&state, &store, &user).await?;
    let id: OptionId = path_id(&id)?;

    let row = LocalizedRepository::new(state.pool(), kind)
        .update(store_id, id, &draft)
        .await?;

    Ok(Json(row))
}

#[instrument(skip(state, user), fields(kind = kind.slug()))]
async fn destroy(
    State(state): State<AppState>,
    Extension(kind): Extension<LocalizedKind>,
    Path((store, id)): Path<(String, String)>,
    RequireUser(user): RequireUser,
) -> Result<Json<LocalizedOption>, AppError> {
    let store_id = owned_store(&state, &store, &user).await?;
    let id: OptionId = path_id(&id)?;

    let row = LocalizedRepository::new(state.pool(), kind)
        .delete(store_id, id)
        .await?;

    Ok(Json(row))
}
