//! Size and color endpoints, mounted once per [`OptionKind`].

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use storedash_core::{OptionId, StoreId, parse_id};

use super::{owned_store, path_id};
use crate::db::OptionRepository;
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::models::input::OptionInput;
use crate::models::{OptionKind, OptionValue};
use crate::state::AppState;

/// Routes for one option kind, e.g. `/api/{store_id}/sizes`.
pub fn router(kind: OptionKind) -> Router<AppState> {
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
    Extension(kind): Extension<OptionKind>,
    Path(store): Path<String>,
    RequireUser(user): RequireUser,
    Json(input): Json<OptionInput>,
) -> Result<Json<OptionValue>, AppError> {
    let draft = input.validate(kind)?;
    let store_id = owned_store(&state, &store, &user).await?;

    let row = OptionRepository::new(state.pool(), kind)
        .create(store_id, &draft)
        .await?;

    Ok(Json(row))
}

#[instrument(skip(state), fields(kind = kind.slug()))]
async fn list(
    State(state): State<AppState>,
    Extension(kind): Extension<OptionKind>,
    Path(store): Path<String>,
) -> Result<Json<Vec<OptionValue>>, AppError> {
    let Some(store_id) = parse_id::<StoreId>(&store) else {
        return Ok(Json(Vec::new()));
    };

    let rows = OptionRepository::new(state.pool(), kind).list(store_id).await?;
    Ok(Json(rows))
}

#[instrument(skip(state), fields(kind = kind.slug()))]
async fn show(
    State(state): State<AppState>,
    Extension(kind): Extension<OptionKind>,
    Path((store, id)): Path<(String, String)>,
) -> Result<Json<OptionValue>, AppError> {
    let store_id: StoreId = path_id(&store)?;
    let id: OptionId = path_id(&id)?;

    OptionRepository::new(state.pool(), kind)
        .get(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[instrument(skip(state, user, input), fields(kind = kind.slug()))]
async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<OptionKind>,
    Path((store, id)): Path<(String, String)>,
    RequireUser(user): RequireUser,
    Json(input): Json<OptionInput>,
) -> Result<Json<OptionValue>, AppError> {
    let draft = input.validate(kind)?;
    let store_id = owned_store(&state, &store, &user).await?;
    let id: OptionId = path_id(&id)?;

    let row = OptionRepository::new(state.pool(), kind)
        .update(store_id, id, &draft)
        .await?;

    Ok(Json(row))
}

#[instrument(skip(state, user), fields(kind = kind.slug()))]
async fn destroy(
    State(state): State<AppState>,
    Extension(kind): Extension<OptionKind>,
    Path((store, id)): Path<(String, String)>,
    RequireUser(user): RequireUser,
) -> Result<Json<OptionValue>, AppError> {
    let store_id = owned_store(&state, &store, &user).await?;
    let id: OptionId = path_id(&id)?;

    let row = OptionRepository::new(state.pool(), kind)
        .delete(store_id, id)
        .await?;

    Ok(Json(row))
}
