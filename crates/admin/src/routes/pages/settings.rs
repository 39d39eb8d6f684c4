//! Store settings: rename and delete.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use super::{Shell, StorePage, form_error, redirect_with_flash};
use crate::db::StoreRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireUser;
use crate::models::input::StoreInput;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{store_id}/settings", get(show).post(rename))
        .route("/{store_id}/settings/delete", post(destroy))
}

/// Settings page template.
#[derive(Template, WebTemplate)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub shell: Shell,
    pub action: String,
    pub delete_action: String,
    pub name: String,
    /// Public API base for this store, shown for storefront setup.
    pub api_url: String,
    pub error: Option<String>,
}

impl SettingsTemplate {
    fn new(state: &AppState, page: StorePage, name: String, error: Option<String>) -> Self {
        Self {
            action: page.href("settings"),
            delete_action: page.href("settings/delete"),
            api_url: format!(
                "{}/api/{}",
                state.config().base_url.trim_end_matches('/'),
                page.store_id()
            ),
            name,
            error,
            shell: page.shell,
        }
    }
}

async fn show(
    State(state): State<AppState>,
    Path(store): Path<String>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let page = StorePage::load(&state, &session, &user, &store, "settings").await?;
    let name = page.store.name.clone();

    Ok(SettingsTemplate::new(&state, page, name, None).into_response())
}

#[instrument(skip(state, session, user, input))]
async fn rename(
    State(state): State<AppState>,
    Path(store): Path<String>,
    session: Session,
    RequireUser(user): RequireUser,
    Form(input): Form<StoreInput>,
) -> Result<Response, AppError> {
    let page = StorePage::load(&state, &session, &user, &store, "settings").await?;
    let submitted = input.name.clone().unwrap_or_default();

    let name = match input.validate() {
        Ok(name) => name,
        Err(e) => {
            let error = form_error(e.into())?;
            return Ok(SettingsTemplate::new(&state, page, submitted, Some(error)).into_response());
        }
    };

    StoreRepository::new(state.pool())
        .rename(page.store_id(), user.id, &name)
        .await?;

    Ok(redirect_with_flash(&session, &page.href("settings"), "Store updated.").await)
}

#[instrument(skip(state, session, user))]
async fn destroy(
    State(state): State<AppState>,
    Path(store): Path<String>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let page = StorePage::load(&state, &session, &user, &store, "settings").await?;

    let store = StoreRepository::new(state.pool())
        .delete(page.store_id(), user.id)
        .await?;

    tracing::info!(store_id = %store.id, "Store deleted");
    Ok(redirect_with_flash(&session, "/", "Store deleted.").await)
}
