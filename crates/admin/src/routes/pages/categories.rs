//! Category pages.

use std::collections::HashMap;

use axum::{
    Form, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use storedash_core::{CategoryId, StoreId};

use super::{
    EntityIndexTemplate, StorePage, api_routes, choices, deleted, form_error, form_page,
    redirect_with_flash,
};
use crate::components::{DataTableConfig, EntityForm, FormField, TableCell, TableColumn, TableRow};
use crate::db::{BillboardRepository, CategoryRepository};
use crate::error::AppError;
use crate::filters::long_date;
use crate::middleware::RequireUser;
use crate::models::{Billboard, Category};
use crate::models::input::CategoryInput;
use crate::routes::api::path_id;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{store_id}/categories", get(index))
        .route("/{store_id}/categories/new", get(new).post(create))
        .route("/{store_id}/categories/{id}", get(edit).post(update))
        .route("/{store_id}/categories/{id}/delete", post(destroy))
}

fn form_fields(input: &CategoryInput, billboards: &[Billboard]) -> Vec<FormField> {
    vec![
        FormField::text("nameEn", "Name in English", input.name_en.clone().unwrap_or_default())
            .placeholder("Category name"),
        FormField::text("nameFr", "Name in French", input.name_fr.clone().unwrap_or_default())
            .placeholder("Nom de la catégorie"),
        FormField::text("nameSp", "Name in Spanish", input.name_sp.clone().unwrap_or_default())
            .placeholder("Nombre de la categoría"),
        FormField::select(
            "billboardId",
            "Billboard",
            input.billboard_id.as_deref().unwrap_or_default(),
            choices(billboards, |b| b.id.to_string(), |b| b.label.clone()),
        ),
    ]
}

/// Validate, check the billboard belongs to the store, and write.
async fn save(
    state: &AppState,
    store_id: StoreId,
    id: Option<CategoryId>,
    input: CategoryInput,
) -> Result<Category, AppError> {
    let draft = input.validate()?;
    let repo = CategoryRepository::new(state.pool());

    if let Some(invalid) = repo.check_references(store_id, &draft).await? {
        return Err(invalid.into());
    }

    let category = match id {
        Some(id) => repo.update(store_id, id, &draft).await?,
        None => repo.create(store_id, &draft).await?,
    };
    Ok(category)
}

/// Render the form again with the submitted values and `error`.
async fn rerender(
    state: &AppState,
    page: StorePage,
    form: EntityForm,
    input: &CategoryInput,
    error: AppError,
) -> Result<Response, AppError> {
    let error = form_error(error)?;
    let billboards = BillboardRepository::new(state.pool())
        .list(page.store_id())
        .await?;

    Ok(form_page(
        page,
        form.fields(form_fields(input, &billboards)).error(Some(error)),
    ))
}

#[instrument(skip(state, session, user))]
async fn index(
    State(state): State<AppState>,
    Path(store): Path<String>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let page = StorePage::load(&state, &session, &user, &store, "categories").await?;
    let category_repo = CategoryRepository::new(state.pool());
    let billboard_repo = BillboardRepository::new(state.pool());
    let (categories, billboards) = tokio::try_join!(
        category_repo.list(page.store_id()),
        billboard_repo.list(page.store_id()),
    )?;

    let labels: HashMap<_, _> = billboards
        .iter()
        .map(|billboard| (billboard.id, billboard.label.as_str()))
        .collect();

    let href = page.href("categories");
    let rows = categories
        .iter()
        .map(|category| {
            let billboard = labels.get(&category.billboard_id).copied().unwrap_or_default();
            TableRow::new(vec![
                TableCell::text(&category.name_en),
                TableCell::text(billboard),
                TableCell::text(long_date(&category.created_at)),
            ])
            .with_actions(&format!("{href}/{}", category.id))
        })
        .collect();

    let table = DataTableConfig::new("categories")
        .column(TableColumn::new("name", "Name"))
        .column(TableColumn::new("billboard", "Billboard"))
        .column(TableColumn::new("date", "Date"))
        .rows(rows)
        .search_placeholder("Search by name...")
        .empty_state("No categories yet", Some("Every category needs a billboard first."));

    Ok(EntityIndexTemplate {
        title: format!("Categories ({})", categories.len()),
        description: "Manage categories for your store".to_owned(),
        new_href: format!("{href}/new"),
        table,
        api_routes: api_routes(page.store_id(), "categories", "categoryId"),
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
    let page = StorePage::load(&state, &session, &user, &store, "categories/new").await?;
    let billboards = BillboardRepository::new(state.pool())
        .list(page.store_id())
        .await?;

    let form = EntityForm::create("Category", &page.href("categories"))
        .fields(form_fields(&CategoryInput::default(), &billboards));

    Ok(form_page(page, form))
}

#[instrument(skip(state, session, user, input))]
async fn create(
    State(state): State<AppState>,
    Path(store): Path<String>,
    session: Session,
    RequireUser(user): RequireUser,
    Form(input): Form<CategoryInput>,
) -> Result<Response, AppError> {
    let page = StorePage::load(&state, &session, &user, &store, "categories/new").await?;

    let saved = save(&state, page.store_id(), None, input.clone()).await;

    match saved {
        Ok(category) => {
            tracing::info!(category_id = %category.id, "Category created");
            Ok(redirect_with_flash(&session, &page.href("categories"), "Category created.").await)
        }
        Err(e) => {
            let form = EntityForm::create("Category", &page.href("categories"));
            rerender(&state, page, form, &input, e).await
        }
    }
}

async fn edit(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let id: CategoryId = path_id(&id)?;
    let page = StorePage::load(&state, &session, &user, &store, &format!("categories/{id}")).await?;

    let category_repo = CategoryRepository::new(state.pool());
    let billboard_repo = BillboardRepository::new(state.pool());
    let (category, billboards) = tokio::try_join!(
        category_repo.get(page.store_id(), id),
        billboard_repo.list(page.store_id()),
    )?;
    let category = category.ok_or(AppError::NotFound)?;

    let form = EntityForm::edit("Category", &page.href(&format!("categories/{id}")))
        .fields(form_fields(&CategoryInput::from(&category), &billboards));

    Ok(form_page(page, form))
}

#[instrument(skip(state, session, user, input))]
async fn update(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
    session: Session,
    RequireUser(user): RequireUser,
    Form(input): Form<CategoryInput>,
) -> Result<Response, AppError> {
    let id: CategoryId = path_id(&id)?;
    let page = StorePage::load(&state, &session, &user, &store, &format!("categories/{id}")).await?;

    let saved = save(&state, page.store_id(), Some(id), input.clone()).await;

    match saved {
        Ok(_) => Ok(redirect_with_flash(&session, &page.href("categories"), "Category updated.").await),
        Err(e) => {
            let form = EntityForm::edit("Category", &page.href(&format!("categories/{id}")));
            rerender(&state, page, form, &input, e).await
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
    let id: CategoryId = path_id(&id)?;
    let page = StorePage::load(&state, &session, &user, &store, &format!("categories/{id}")).await?;

    let result = CategoryRepository::new(state.pool())
        .delete(page.store_id(), id)
        .await
        .map_err(AppError::from);

    deleted(
        &session,
        result,
        &page.href("categories"),
        &page.href(&format!("categories/{id}")),
        "Category",
    )
    .await
}
