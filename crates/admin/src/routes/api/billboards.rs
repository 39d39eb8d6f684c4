//! Billboard endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use storedash_core::{BillboardId, StoreId, parse_id};

use super::{owned_store, path_id};
use crate::db::BillboardRepository;
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::models::Billboard;
use crate::models::input::BillboardInput;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/{store_id}/billboards", get(list).post(create))
        .route(
            "/api/{store_id}/billboards/{id}",
            get(show).patch(update).delete(destroy),
        )
}

#[instrument(skip(state, user, input))]
async fn create(
    State(state): State<AppState>,
    Path(store): Path<String>,
    RequireUser(user): RequireUser,
    Json(input): Json<BillboardInput>,
) -> Result<Json<Billboard>, AppError> {
    let draft = input.validate()?;
    let store_id = owned_store(&state, &store, &user).await?;

    let billboard = BillboardRepository::new(state.pool())
        .create(store_id, &draft)
        .await?;

    Ok(Json(billboard))
}

#[instrument(skip(state))]
async fn list(
    State(state): State<AppState>,
    Path(store): Path<String>,
) -> Result<Json<Vec<Billboard>>, AppError> {
    let Some(store_id) = parse_id::<StoreId>(&store) else {
        return Ok(Json(Vec::new()));
    };

    let billboards = BillboardRepository::new(state.pool()).list(store_id).await?;
    Ok(Json(billboards))
}

#[instrument(skip(state))]
async fn show(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
) -> Result<Json<Billboard>, AppError> {
    let store_id: StoreId = path_id(&store)?;
    let id: BillboardId = path_id(&id)?;

    BillboardRepository::new(state.pool())
        .get(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[instrument(skip(state, user, input))]
async fn update(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
    RequireUser(user): RequireUser,
    Json(input): Json<BillboardInput>,
) -> Result<Json<Billboard>, AppError> {
    let draft = input.validate()?;
    let store_id = owned_store(&state, &store, &user).await?;
    let id: BillboardId = path_id(&id)?;

    let billboard = BillboardRepository::new(state.pool())
        .update(store_id, id, &draft)
        .await?;

    Ok(Json(billboard))
}

#[instrument(skip(state, user))]
async fn destroy(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
    RequireUser(user): RequireUser,
) -> Result<Json<Billboard>, AppError> {
    let store_id = owned_store(&state, &store, &user).await?;
    let id: BillboardId = path_id(&id)?;

    let billboard = BillboardRepository::new(state.pool())
        .delete(store_id, id)
        .await?;

    Ok(Json(billboard))
}
