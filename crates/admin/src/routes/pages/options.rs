//! Size and color pages, mounted once per [`OptionKind`].

use axum::{
    Extension, Form, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use storedash_core::{OptionId, StoreId};

use super::{
    EntityIndexTemplate, StorePage, api_routes, deleted, form_error, form_page,
    redirect_with_flash,
};
use crate::components::{DataTableConfig, EntityForm, FormField, TableCell, TableColumn, TableRow};
use crate::db::OptionRepository;
use crate::error::AppError;
use crate::filters::long_date;
use crate::middleware::RequireUser;
use crate::models::input::OptionInput;
use crate::models::{OptionKind, OptionValue};
use crate::routes::api::path_id;
use crate::state::AppState;

/// Pages for one option kind, e.g. `/{store_id}/sizes`.
pub fn router(kind: OptionKind) -> Router<AppState> {
    let base = format!("/{{store_id}}/{}", kind.slug());
    Router::new()
        .route(&base, get(index))
        .route(&format!("{base}/new"), get(new).post(create))
        .route(&format!("{base}/{{id}}"), get(edit).post(update))
        .route(&format!("{base}/{{id}}/delete"), post(destroy))
        .layer(Extension(kind))
}

fn form_fields(kind: OptionKind, input: &OptionInput) -> Vec<FormField> {
    let value = input.value.clone().unwrap_or_default();
    let value_field = match kind {
        OptionKind::Color => FormField::color("value", "Value", value)
            .placeholder("#000000")
            .description("Hex code, e.g. #1e293b"),
        OptionKind::Size => FormField::text("value", "Value", value).placeholder("M"),
    };

    vec![
        FormField::text("name", "Name", input.name.clone().unwrap_or_default())
            .placeholder(&format!("{} name", kind.label())),
        value_field,
    ]
}

fn value_cell(kind: OptionKind, row: &OptionValue) -> TableCell {
    match kind {
        OptionKind::Color => TableCell::color(&row.value),
        OptionKind::Size => TableCell::text(&row.value),
    }
}

async fn save(
    state: &AppState,
    kind: OptionKind,
    store_id: StoreId,
    id: Option<OptionId>,
    input: OptionInput,
) -> Result<OptionValue, AppError> {
    let draft = input.validate(kind)?;
    let repo = OptionRepository::new(state.pool(), kind);

    let row = match id {
        Some(id) => repo.update(store_id, id, &draft).await?,
        None => repo.create(store_id, &draft).await?,
    };
    Ok(row)
}

#[instrument(skip(state, session, user), fields(kind = kind.slug()))]
async fn index(
    State(state): State<AppState>,
    Extension(kind): Extension<OptionKind>,
    Path(store): Path<String>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let page = StorePage::load(&state, &session, &user, &store, kind.slug()).await?;
    let rows = OptionRepository::new(state.pool(), kind)
        .list(page.store_id())
        .await?;

    let href = page.href(kind.slug());
    let table_rows = rows
        .iter()
        .map(|row| {
            TableRow::new(vec![
                TableCell::text(&row.name),
                value_cell(kind, row),
                TableCell::text(long_date(&row.created_at)),
            ])
            .with_actions(&format!("{href}/{}", row.id))
        })
        .collect();

    let table = DataTableConfig::new(kind.slug())
        .column(TableColumn::new("name", "Name"))
        .column(TableColumn::new("value", "Value"))
        .column(TableColumn::new("date", "Date"))
        .rows(table_rows)
        .search_placeholder("Search by name...")
        .empty_state(&format!("No {} yet", kind.plural().to_lowercase()), None);

    Ok(EntityIndexTemplate {
        title: format!("{} ({})", kind.plural(), rows.len()),
        description: format!("Manage {} for your products", kind.plural().to_lowercase()),
        new_href: format!("{href}/new"),
        table,
        api_routes: api_routes(page.store_id(), kind.slug(), &format!("{}Id", kind.noun())),
        shell: page.shell,
    }
    .into_response())
}

async fn new(
    State(state): State<AppState>,
    Extension(kind): Extension<OptionKind>,
    Path(store): Path<String>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let page = StorePage::load(&state, &session, &user, &store, &format!("{}/new", kind.slug())).await?;
    let form = EntityForm::create(kind.label(), &page.href(kind.slug()))
        .fields(form_fields(kind, &OptionInput::default()));

    Ok(form_page(page, form))
}

#[instrument(skip(state, session, user, input), fields(kind = kind.slug()))]
async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<OptionKind>,
    Path(store): Path<String>,
    session: Session,
    RequireUser(user): RequireUser,
    Form(input): Form<OptionInput>,
) -> Result<Response, AppError> {
    let page = StorePage::load(&state, &session, &user, &store, &format!("{}/new", kind.slug())).await?;

    match save(&state, kind, page.store_id(), None, input.clone()).await {
        Ok(row) => {
            tracing::info!(id = %row.id, "{} created", kind.label());
            let message = format!("{} created.", kind.label());
            Ok(redirect_with_flash(&session, &page.href(kind.slug()), message).await)
        }
        Err(e) => {
            let form = EntityForm::create(kind.label(), &page.href(kind.slug()))
                .fields(form_fields(kind, &input))
                .error(Some(form_error(e)?));
            Ok(form_page(page, form))
        }
    }
}

async fn edit(
    State(state): State<AppState>,
    Extension(kind): Extension<OptionKind>,
    Path((store, id)): Path<(String, String)>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let id: OptionId = path_id(&id)?;
    let section = format!("{}/{id}", kind.slug());
    let page = StorePage::load(&state, &session, &user, &store, &section).await?;

    let row = OptionRepository::new(state.pool(), kind)
        .get(page.store_id(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    let form = EntityForm::edit(kind.label(), &page.href(&section))
        .fields(form_fields(kind, &OptionInput::from(&row)));

    Ok(form_page(page, form))
}

#[instrument(skip(state, session, user, input), fields(kind = kind.slug()))]
async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<OptionKind>,
    Path((store, id)): Path<(String, String)>,
    session: Session,
    RequireUser(user): RequireUser,
    Form(input): Form<OptionInput>,
) -> Result<Response, AppError> {
    let id: OptionId = path_id(&id)?;
    let section = format!("{}/{id}", kind.slug());
    let page = StorePage::load(&state, &session, &user, &store, &section).await?;

    match save(&state, kind, page.store_id(), Some(id), input.clone()).await {
        Ok(_) => {
            let message = format!("{} updated.", kind.label());
            Ok(redirect_with_flash(&session, &page.href(kind.slug()), message).await)
        }
        Err(e) => {
            let form = EntityForm::edit(kind.label(), &page.href(&section))
                .fields(form_fields(kind, &input))
                .error(Some(form_error(e)?));
            Ok(form_page(page, form))
        }
    }
}

#[instrument(skip(state, session, user), fields(kind = kind.slug()))]
async fn destroy(
    State(state): State<AppState>,
    Extension(kind): Extension<OptionKind>,
    Path((store, id)): Path<(String, String)>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let id: OptionId = path_id(&id)?;
    let section = format!("{}/{id}", kind.slug());
    let page = StorePage::load(&state, &session, &user, &store, &section).await?;

    let result = OptionRepository::new(state.pool(), kind)
        .delete(page.store_id(), id)
        .await
        .map_err(AppError::from);

    deleted(
        &session,
        result,
        &page.href(kind.slug()),
        &page.href(&section),
        kind.label(),
    )
    .await
}

#[cfg(test)]
mod tests {
    use crate::components::FieldKind;

    use super::*;

    #[test]
    fn test_color_form_uses_color_picker() {
        let fields = form_fields(OptionKind::Color, &OptionInput::default());
        assert_eq!(fields[1].kind, FieldKind::Color);

        let fields = form_fields(OptionKind::Size, &OptionInput::default());
        assert_eq!(fields[1].kind, FieldKind::Text);
    }
}
