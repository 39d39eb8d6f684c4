//! Billboard pages.

use axum::{
    Form, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use storedash_core::{BillboardId, StoreId};

use super::{
    EntityIndexTemplate, StorePage, api_routes, deleted, form_error, form_page,
    redirect_with_flash,
};
use crate::components::{DataTableConfig, EntityForm, FormField, TableCell, TableColumn, TableRow};
use crate::db::BillboardRepository;
use crate::error::AppError;
use crate::filters::long_date;
use crate::middleware::RequireUser;
use crate::models::Billboard;
use crate::models::input::BillboardInput;
use crate::routes::api::path_id;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{store_id}/billboards", get(index))
        .route("/{store_id}/billboards/new", get(new).post(create))
        .route("/{store_id}/billboards/{id}", get(edit).post(update))
        .route("/{store_id}/billboards/{id}/delete", post(destroy))
}

fn form_fields(input: &BillboardInput) -> Vec<FormField> {
    vec![
        FormField::text(
            "imageUrl",
            "Background image",
            input.image_url.clone().unwrap_or_default(),
        )
        .placeholder("https://"),
        FormField::text("label", "Label", input.label.clone().unwrap_or_default())
            .placeholder("Billboard label"),
    ]
}

/// Validate and write. `id` is `None` when creating.
async fn save(
    state: &AppState,
    store_id: StoreId,
    id: Option<BillboardId>,
    input: BillboardInput,
) -> Result<Billboard, AppError> {
    let draft = input.validate()?;
    let repo = BillboardRepository::new(state.pool());

    let billboard = match id {
        Some(id) => repo.update(store_id, id, &draft).await?,
        None => repo.create(store_id, &draft).await?,
    };
    Ok(billboard)
}

#[instrument(skip(state, session, user))]
async fn index(
    State(state): State<AppState>,
    Path(store): Path<String>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let page = StorePage::load(&state, &session, &user, &store, "billboards").await?;
    let billboards = BillboardRepository::new(state.pool())
        .list(page.store_id())
        .await?;

    let href = page.href("billboards");
    let rows = billboards
        .iter()
        .map(|billboard| {
            TableRow::new(vec![
                TableCell::text(&billboard.label),
                TableCell::text(long_date(&billboard.created_at)),
            ])
            .with_actions(&format!("{href}/{}", billboard.id))
        })
        .collect();

    let table = DataTableConfig::new("billboards")
        .column(TableColumn::new("label", "Label"))
        .column(TableColumn::new("date", "Date"))
        .rows(rows)
        .search_placeholder("Search by label...")
        .empty_state(
            "No billboards yet",
            Some("Billboards are the banners shown on category pages."),
        );

    Ok(EntityIndexTemplate {
        title: format!("Billboards ({})", billboards.len()),
        description: "Manage billboards for your store".to_owned(),
        new_href: format!("{href}/new"),
        table,
        api_routes: api_routes(page.store_id(), "billboards", "billboardId"),
        shell: page.shell,
    }
    .into_response())
}

async fn new(
    State(state): State<AppState>,
    Path(store): Path<String>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let page = StorePage::load(&state, &session, &user, &store, "billboards/new").await?;
    let form = EntityForm::create("Billboard", &page.href("billboards"))
        .fields(form_fields(&BillboardInput::default()));

    Ok(form_page(page, form))
}

#[instrument(skip(state, session, user, input))]
async fn create(
    State(state): State<AppState>,
    Path(store): Path<String>,
    session: Session,
    RequireUser(user): RequireUser,
    Form(input): Form<BillboardInput>,
) -> Result<Response, AppError> {
    let page = StorePage::load(&state, &session, &user, &store, "billboards/new").await?;

    let saved = save(&state, page.store_id(), None, input.clone()).await;

    match saved {
        Ok(billboard) => {
            tracing::info!(billboard_id = %billboard.id, "Billboard created");
            Ok(redirect_with_flash(&session, &page.href("billboards"), "Billboard created.").await)
        }
        Err(e) => {
            let form = EntityForm::create("Billboard", &page.href("billboards"))
                .fields(form_fields(&input))
                .error(Some(form_error(e)?));
            Ok(form_page(page, form))
        }
    }
}

async fn edit(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let id: BillboardId = path_id(&id)?;
    let page = StorePage::load(&state, &session, &user, &store, &format!("billboards/{id}")).await?;

    let billboard = BillboardRepository::new(state.pool())
        .get(page.store_id(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    let form = EntityForm::edit("Billboard", &page.href(&format!("billboards/{id}")))
        .fields(form_fields(&BillboardInput::from(&billboard)));

    Ok(form_page(page, form))
}

#[instrument(skip(state, session, user, input))]
async fn update(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
    session: Session,
    RequireUser(user): RequireUser,
    Form(input): Form<BillboardInput>,
) -> Result<Response, AppError> {
    let id: BillboardId = path_id(&id)?;
    let page = StorePage::load(&state, &session, &user, &store, &format!("billboards/{id}")).await?;

    let saved = save(&state, page.store_id(), Some(id), input.clone()).await;

    match saved {
        Ok(_) => Ok(redirect_with_flash(&session, &page.href("billboards"), "Billboard updated.").await),
        Err(e) => {
            let form = EntityForm::edit("Billboard", &page.href(&format!("billboards/{id}")))
                .fields(form_fields(&input))
                .error(Some(form_error(e)?));
            Ok(form_page(page, form))
        }
    }
}

#[instrument(skip(state, session, user))]
async fn destroy(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let id: BillboardId = path_id(&id)?;
    let page = StorePage::load(&state, &session, &user, &store, &format!("billboards/{id}")).await?;

    let result = BillboardRepository::new(state.pool())
        .delete(page.store_id(), id)
        .await
        .map_err(AppError::from);

    deleted(
        &session,
        result,
        &page.href("billboards"),
        &page.href(&format!("billboards/{id}")),
        "Billboard",
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields_use_json_names() {
        let fields = form_fields(&BillboardInput::default());
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["imageUrl", "label"]);
    }
}
