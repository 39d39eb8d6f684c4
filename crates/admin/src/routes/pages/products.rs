//! Product pages.
//!
//! The form posts a [`ProductForm`]: price as text, image URLs one per line,
//! checkboxes present only when ticked.

use axum::{
    Form, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use storedash_core::{ProductId, StoreId};

use super::{
    EntityIndexTemplate, StorePage, api_routes, choices, deleted, form_error, form_page,
    redirect_with_flash,
};
use crate::components::{DataTableConfig, EntityForm, FormField, TableCell, TableColumn, TableRow};
use crate::db::{
    CategoryRepository, LocalizedRepository, OptionRepository, ProductFilter, ProductRepository,
};
use crate::error::AppError;
use crate::filters::long_date;
use crate::middleware::RequireUser;
use crate::models::input::ProductForm;
use crate::models::{
    Category, LocalizedKind, LocalizedOption, OptionKind, OptionValue, Product, ProductDetail,
};
use crate::routes::api::path_id;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{store_id}/products", get(index))
        .route("/{store_id}/products/new", get(new).post(create))
        .route("/{store_id}/products/{id}", get(edit).post(update))
        .route("/{store_id}/products/{id}/delete", post(destroy))
}

/// Everything the product form lets the user pick from.
struct Choices {
    categories: Vec<Category>,
    sizes: Vec<OptionValue>,
    colors: Vec<OptionValue>,
    provinces: Vec<LocalizedOption>,
    types: Vec<LocalizedOption>,
    sportsteams: Vec<LocalizedOption>,
    cdays: Vec<LocalizedOption>,
}

impl Choices {
    async fn load(state: &AppState, store_id: StoreId) -> Result<Self, AppError> {
        let pool = state.pool();
        let category_repo = CategoryRepository::new(pool);
        let size_repo = OptionRepository::new(pool, OptionKind::Size);
        let color_repo = OptionRepository::new(pool, OptionKind::Color);
        let province_repo = LocalizedRepository::new(pool, LocalizedKind::Province);
        let type_repo = LocalizedRepository::new(pool, LocalizedKind::Type);
        let sportsteam_repo = LocalizedRepository::new(pool, LocalizedKind::Sportsteam);
        let cday_repo = LocalizedRepository::new(pool, LocalizedKind::Cday);

        let (categories, sizes, colors, provinces, types, sportsteams, cdays) = tokio::try_join!(
            category_repo.list(store_id),
            size_repo.list(store_id),
            color_repo.list(store_id),
            province_repo.list(store_id),
            type_repo.list(store_id),
            sportsteam_repo.list(store_id),
            cday_repo.list(store_id),
        )?;

        Ok(Self {
            categories,
            sizes,
            colors,
            provinces,
            types,
            sportsteams,
            cdays,
        })
    }
}

fn option_select(name: &str, label: &str, selected: Option<&str>, rows: &[OptionValue]) -> FormField {
    FormField::select(
        name,
        label,
        selected.unwrap_or_default(),
        choices(rows, |row| row.id.to_string(), |row| row.name.clone()),
    )
}

fn localized_select(
    kind: LocalizedKind,
    name: &str,
    selected: Option<&str>,
    rows: &[LocalizedOption],
) -> FormField {
    FormField::select(
        name,
        kind.label(),
        selected.unwrap_or_default(),
        choices(rows, |row| row.id.to_string(), |row| row.name.clone()),
    )
}

fn form_fields(form: &ProductForm, lists: &Choices) -> Vec<FormField> {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let images: Vec<String> = form
        .images
        .as_deref()
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_owned)
        .collect();

    vec![
        FormField::image_list("images", "Images", &images),
        FormField::text("nameEn", "Name in English", text(&form.name_en)),
        FormField::text("nameFr", "Name in French", text(&form.name_fr)),
        FormField::text("nameSp", "Name in Spanish", text(&form.name_sp)),
        FormField::textarea("descriptionEn", "Description in English", text(&form.description_en)),
        FormField::textarea("descriptionFr", "Description in French", text(&form.description_fr)),
        FormField::textarea("descriptionSp", "Description in Spanish", text(&form.description_sp)),
        FormField::number("price", "Price", text(&form.price)),
        FormField::select(
            "categoryId",
            "Category",
            form.category_id.as_deref().unwrap_or_default(),
            choices(&lists.categories, |c| c.id.to_string(), |c| c.name_en.clone()),
        ),
        option_select("sizeId", "Size", form.size_id.as_deref(), &lists.sizes),
        option_select("colorId", "Color", form.color_id.as_deref(), &lists.colors),
        localized_select(
            LocalizedKind::Province,
            "provinceId",
            form.province_id.as_deref(),
            &lists.provinces,
        ),
        localized_select(LocalizedKind::Type, "typeId", form.type_id.as_deref(), &lists.types),
        localized_select(
            LocalizedKind::Sportsteam,
            "sportsteamId",
            form.sportsteam_id.as_deref(),
            &lists.sportsteams,
        ),
        localized_select(LocalizedKind::Cday, "cdayId", form.cday_id.as_deref(), &lists.cdays),
        FormField::checkbox("isFeatured", "Featured", form.is_featured.is_some())
            .description("This product will appear on the home page."),
        FormField::checkbox("isArchived", "Archived", form.is_archived.is_some())
            .description("This product will not appear anywhere in the store."),
    ]
}

fn table_row(href: &str, detail: &ProductDetail) -> TableRow {
    let product = &detail.product;
    TableRow::new(vec![
        TableCell::text(&product.name_en),
        TableCell::flag(product.is_archived),
        TableCell::flag(product.is_featured),
        TableCell::text(product.price.to_string()),
        TableCell::text(&detail.category.name_en),
        TableCell::text(&detail.size.name),
        TableCell::color(&detail.color.value),
        TableCell::text(&detail.province.name),
        TableCell::text(&detail.kind.name),
        TableCell::text(&detail.sportsteam.name),
        TableCell::text(&detail.cday.name),
        TableCell::text(long_date(&product.created_at)),
    ])
    .with_actions(&format!("{href}/{}", product.id))
}

/// Validate, check every referenced row belongs to the store, and write.
async fn save(
    state: &AppState,
    store_id: StoreId,
    id: Option<ProductId>,
    form: ProductForm,
) -> Result<Product, AppError> {
    let draft = form.validate()?;
    let repo = ProductRepository::new(state.pool());

    if let Some(invalid) = repo.check_references(store_id, &draft).await? {
        return Err(invalid.into());
    }

    let product = match id {
        Some(id) => repo.update(store_id, id, &draft).await?,
        None => repo.create(store_id, &draft).await?,
    };
    Ok(product)
}

/// Render the form again with the submitted values and `error`.
async fn rerender(
    state: &AppState,
    page: StorePage,
    form: EntityForm,
    submitted: &ProductForm,
    error: AppError,
) -> Result<Response, AppError> {
    let error = form_error(error)?;
    let lists = Choices::load(state, page.store_id()).await?;

    Ok(form_page(
        page,
        form.fields(form_fields(submitted, &lists)).error(Some(error)),
    ))
}

#[instrument(skip(state, session, user))]
async fn index(
    State(state): State<AppState>,
    Path(store): Path<String>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let page = StorePage::load(&state, &session, &user, &store, "products").await?;

    let filter = ProductFilter {
        include_archived: true,
        ..ProductFilter::default()
    };
    let products = ProductRepository::new(state.pool())
        .list(page.store_id(), &filter)
        .await?;

    let href = page.href("products");
    let rows = products.iter().map(|detail| table_row(&href, detail)).collect();

    let table = DataTableConfig::new("products")
        .column(TableColumn::new("name", "Name"))
        .column(TableColumn::new("isArchived", "Archived"))
        .column(TableColumn::new("isFeatured", "Featured"))
        .column(TableColumn::new("price", "Price"))
        .column(TableColumn::new("category", "Category"))
        .column(TableColumn::new("size", "Size"))
        .column(TableColumn::new("color", "Color"))
        .column(TableColumn::new("province", "Province"))
        .column(TableColumn::new("type", "Type"))
        .column(TableColumn::new("sportsteam", "Sports team"))
        .column(TableColumn::new("cday", "Celebration day"))
        .column(TableColumn::new("date", "Date"))
        .rows(rows)
        .search_placeholder("Search by name...")
        .empty_state(
            "No products yet",
            Some("Products need a category, a size, a color and the four localized options."),
        );

    Ok(EntityIndexTemplate {
        title: format!("Products ({})", products.len()),
        description: "Manage products for your store".to_owned(),
        new_href: format!("{href}/new"),
        table,
        api_routes: api_routes(page.store_id(), "products", "productId"),
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
    let page = StorePage::load(&state, &session, &user, &store, "products/new").await?;
    let lists = Choices::load(&state, page.store_id()).await?;

    let form = EntityForm::create("Product", &page.href("products"))
        .fields(form_fields(&ProductForm::default(), &lists));

    Ok(form_page(page, form))
}

#[instrument(skip(state, session, user, form))]
async fn create(
    State(state): State<AppState>,
    Path(store): Path<String>,
    session: Session,
    RequireUser(user): RequireUser,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let page = StorePage::load(&state, &session, &user, &store, "products/new").await?;

    match save(&state, page.store_id(), None, form.clone()).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "Product created");
            Ok(redirect_with_flash(&session, &page.href("products"), "Product created.").await)
        }
        Err(e) => {
            let entity_form = EntityForm::create("Product", &page.href("products"));
            rerender(&state, page, entity_form, &form, e).await
        }
    }
}

async fn edit(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let id: ProductId = path_id(&id)?;
    let section = format!("products/{id}");
    let page = StorePage::load(&state, &session, &user, &store, &section).await?;

    let (detail, lists) = tokio::try_join!(
        async {
            ProductRepository::new(state.pool())
                .get(page.store_id(), id)
                .await
                .map_err(AppError::from)
        },
        Choices::load(&state, page.store_id()),
    )?;
    let detail = detail.ok_or(AppError::NotFound)?;

    let form = EntityForm::edit("Product", &page.href(&section))
        .fields(form_fields(&ProductForm::from(&detail), &lists));

    Ok(form_page(page, form))
}

#[instrument(skip(state, session, user, form))]
async fn update(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
    session: Session,
    RequireUser(user): RequireUser,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let id: ProductId = path_id(&id)?;
    let section = format!("products/{id}");
    let page = StorePage::load(&state, &session, &user, &store, &section).await?;

    match save(&state, page.store_id(), Some(id), form.clone()).await {
        Ok(_) => Ok(redirect_with_flash(&session, &page.href("products"), "Product updated.").await),
        Err(e) => {
            let entity_form = EntityForm::edit("Product", &page.href(&section));
            rerender(&state, page, entity_form, &form, e).await
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
    let id: ProductId = path_id(&id)?;
    let section = format!("products/{id}");
    let page = StorePage::load(&state, &session, &user, &store, &section).await?;

    let result = ProductRepository::new(state.pool())
        .delete(page.store_id(), id)
        .await
        .map_err(AppError::from);

    deleted(
        &session,
        result,
        &page.href("products"),
        &page.href(&section),
        "Product",
    )
    .await
}

#[cfg(test)]
mod tests {
    use crate::components::FieldKind;

    use super::*;

    fn empty_choices() -> Choices {
        Choices {
            categories: vec![],
            sizes: vec![],
            colors: vec![],
            provinces: vec![],
            types: vec![],
            sportsteams: vec![],
            cdays: vec![],
        }
    }

    #[test]
    fn test_form_fields_keep_submitted_values() {
        let form = ProductForm {
            name_en: Some("Jersey".to_owned()),
            images: Some("https://a.test/1.png\n\nhttps://a.test/2.png".to_owned()),
            is_featured: Some("on".to_owned()),
            ..ProductForm::default()
        };

        let fields = form_fields(&form, &empty_choices());

        assert_eq!(fields[0].kind, FieldKind::ImageList);
        assert_eq!(fields[0].value, "https://a.test/1.png\nhttps://a.test/2.png");
        assert_eq!(fields[1].value, "Jersey");

        let featured = fields.iter().find(|f| f.name == "isFeatured");
        assert!(featured.is_some_and(FormField::is_checked));
        let archived = fields.iter().find(|f| f.name == "isArchived");
        assert!(archived.is_some_and(|f| !f.is_checked()));
    }

    #[test]
    fn test_form_field_names_match_json_keys() {
        let fields = form_fields(&ProductForm::default(), &empty_choices());
        let selects: Vec<_> = fields
            .iter()
            .filter(|f| f.kind.is_select())
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(
            selects,
            ["categoryId", "sizeId", "colorId", "provinceId", "typeId", "sportsteamId", "cdayId"]
        );
    }
}
