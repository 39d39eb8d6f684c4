//! Create-store page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_sessions::Session;
use tracing::instrument;

use super::{Shell, redirect_with_flash};
use crate::db::StoreRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireUser;
use crate::models::input::StoreInput;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/stores/new", get(new).post(create))
}

/// Create-store page template.
#[derive(Template, WebTemplate)]
#[template(path = "stores/new.html")]
pub struct NewStoreTemplate {
    pub shell: Shell,
    pub name: String,
    pub error: Option<String>,
}

async fn new(
    State(state): State<AppState>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let shell = Shell::plain(&state, &session, &user, "/stores/new").await?;

    Ok(NewStoreTemplate {
        shell,
        name: String::new(),
        error: None,
    }
    .into_response())
}

#[instrument(skip(state, session, user, input))]
async fn create(
    State(state): State<AppState>,
    session: Session,
    RequireUser(user): RequireUser,
    Form(input): Form<StoreInput>,
) -> Result<Response, AppError> {
    let submitted = input.name.clone().unwrap_or_default();

    let name = match input.validate() {
        Ok(name) => name,
        Err(e) => {
            let shell = Shell::plain(&state, &session, &user, "/stores/new").await?;
            return Ok(NewStoreTemplate {
                shell,
                name: submitted,
                error: Some(super::form_error(e.into())?),
            }
            .into_response());
        }
    };

    let store = StoreRepository::new(state.pool())
        .create(user.id, &name)
        .await?;

    tracing::info!(store_id = %store.id, "Store created");
    Ok(redirect_with_flash(&session, &format!("/{}", store.id), "Store created.").await)
}
