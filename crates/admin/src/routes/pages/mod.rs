//! Server-rendered dashboard pages.
//!
//! ```text
//! GET  /                               - Redirect to the first store
//! GET  /stores/new, POST /stores/new   - Create store
//! GET  /{store_id}                     - Overview
//! GET  /{store_id}/{entity}            - Table
//! GET  /{store_id}/{entity}/new        - Create form
//! POST /{store_id}/{entity}/new
//! GET  /{store_id}/{entity}/{id}       - Edit form
//! POST /{store_id}/{entity}/{id}
//! POST /{store_id}/{entity}/{id}/delete
//! GET  /{store_id}/orders              - Orders
//! GET  /{store_id}/settings, POST      - Rename store
//! POST /{store_id}/settings/delete     - Delete store
//! ```
//!
//! Every page requires a login. Stores the user does not own are `404`.
//! Form posts share validation and repositories with the JSON API.

pub mod billboards;
pub mod categories;
pub mod localized;
pub mod options;
pub mod orders;
pub mod overview;
pub mod products;
pub mod settings;
pub mod stores;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use storedash_core::{StoreId, parse_id};

use crate::components::{DataTableConfig, EntityForm};
use crate::db::StoreRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{set_flash, take_flash};
use crate::models::{CurrentUser, LocalizedKind, OptionKind, Store};
use crate::state::AppState;

/// Build the pages router.
pub fn router() -> Router<AppState> {
    let router = Router::new()
        .merge(overview::router())
        .merge(stores::router())
        .merge(billboards::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(settings::router());

    let router = OptionKind::ALL
        .into_iter()
        .fold(router, |router, kind| router.merge(options::router(kind)));

    LocalizedKind::ALL
        .into_iter()
        .fold(router, |router, kind| router.merge(localized::router(kind)))
}

// =============================================================================
// Layout
// =============================================================================

/// A store in the store switcher.
#[derive(Debug, Clone)]
pub struct StoreLink {
    pub href: String,
    pub name: String,
    pub current: bool,
}

/// A sidebar entry.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: String,
    pub label: String,
    pub active: bool,
}

/// Everything `base.html` needs around the page content.
#[derive(Debug, Clone)]
pub struct Shell {
    pub username: String,
    /// Name of the store being viewed.
    pub store_name: Option<String>,
    pub stores: Vec<StoreLink>,
    pub nav: Vec<NavLink>,
    pub flash: Option<String>,
    pub current_path: String,
}

impl Shell {
    /// Layout for pages outside any store.
    pub async fn plain(
        state: &AppState,
        session: &Session,
        user: &CurrentUser,
        current_path: &str,
    ) -> Result<Self, AppError> {
        let stores = StoreRepository::new(state.pool())
            .list_for_user(user.id)
            .await?;

        Ok(Self::build(user, &stores, None, take_flash(session).await, current_path))
    }

    fn build(
        user: &CurrentUser,
        stores: &[Store],
        current: Option<&Store>,
        flash: Option<String>,
        current_path: &str,
    ) -> Self {
        let store_links = stores
            .iter()
            .map(|store| StoreLink {
                href: format!("/{}", store.id),
                name: store.name.clone(),
                current: current.is_some_and(|c| c.id == store.id),
            })
            .collect();

        Self {
            username: user.username.to_string(),
            store_name: current.map(|store| store.name.clone()),
            stores: store_links,
            nav: current.map_or_else(Vec::new, |store| nav_links(store.id, current_path)),
            flash,
            current_path: current_path.to_owned(),
        }
    }
}

/// Sidebar links for a store, marking the section `current_path` is in.
fn nav_links(store_id: StoreId, current_path: &str) -> Vec<NavLink> {
    let root = format!("/{store_id}");

    let mut sections: Vec<(String, String)> = vec![
        ("billboards".to_owned(), "Billboards".to_owned()),
        ("categories".to_owned(), "Categories".to_owned()),
    ];
    sections.extend(
        OptionKind::ALL
            .iter()
            .map(|kind| (kind.slug().to_owned(), kind.plural().to_owned())),
    );
    sections.extend(
        LocalizedKind::ALL
            .iter()
            .map(|kind| (kind.slug().to_owned(), kind.plural().to_owned())),
    );
    sections.extend([
        ("products".to_owned(), "Products".to_owned()),
        ("orders".to_owned(), "Orders".to_owned()),
        ("settings".to_owned(), "Settings".to_owned()),
    ]);

    let mut links = vec![NavLink {
        href: root.clone(),
        label: "Overview".to_owned(),
        active: current_path == root,
    }];
    links.extend(sections.into_iter().map(|(slug, label)| {
        let href = format!("{root}/{slug}");
        let active = current_path == href || current_path.starts_with(&format!("{href}/"));
        NavLink {
            href,
            label,
            active,
        }
    }));
    links
}

/// A page inside one of the user's stores.
pub struct StorePage {
    pub store: Store,
    pub shell: Shell,
}

impl StorePage {
    /// Load the store from its path segment and the layout around it.
    ///
    /// `section` is the path below the store, e.g. `"billboards/new"`, or
    /// empty for the overview.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` unless the user owns the store.
    pub async fn load(
        state: &AppState,
        session: &Session,
        user: &CurrentUser,
        segment: &str,
        section: &str,
    ) -> Result<Self, AppError> {
        let store_id: StoreId = parse_id(segment).ok_or(AppError::NotFound)?;

        let stores = StoreRepository::new(state.pool())
            .list_for_user(user.id)
            .await?;
        let store = stores
            .iter()
            .find(|store| store.id == store_id)
            .cloned()
            .ok_or(AppError::NotFound)?;

        let current_path = if section.is_empty() {
            format!("/{store_id}")
        } else {
            format!("/{store_id}/{section}")
        };
        let shell = Shell::build(
            user,
            &stores,
            Some(&store),
            take_flash(session).await,
            &current_path,
        );

        Ok(Self { store, shell })
    }

    #[must_use]
    pub const fn store_id(&self) -> StoreId {
        self.store.id
    }

    /// URL of a section of this store, e.g. `/{store_id}/billboards`.
    #[must_use]
    pub fn href(&self, section: &str) -> String {
        format!("/{}/{section}", self.store.id)
    }
}

// =============================================================================
// Shared entity pages
// =============================================================================

/// One line of the "API" card under each table.
#[derive(Debug, Clone)]
pub struct ApiRoute {
    pub method: &'static str,
    pub path: String,
    /// Whether the route needs a logged-in owner.
    pub admin: bool,
}

/// The JSON endpoints for `slug`, as shown under its table.
#[must_use]
pub fn api_routes(store_id: StoreId, slug: &str, id_name: &str) -> Vec<ApiRoute> {
    let base = format!("/api/{store_id}/{slug}");
    let item = format!("{base}/{{{id_name}}}");

    vec![
        ApiRoute { method: "GET", path: base.clone(), admin: false },
        ApiRoute { method: "GET", path: item.clone(), admin: false },
        ApiRoute { method: "POST", path: base, admin: true },
        ApiRoute { method: "PATCH", path: item.clone(), admin: true },
        ApiRoute { method: "DELETE", path: item, admin: true },
    ]
}

/// Table page shared by every catalog entity.
#[derive(Template, WebTemplate)]
#[template(path = "entities/index.html")]
pub struct EntityIndexTemplate {
    pub shell: Shell,
    pub title: String,
    pub description: String,
    pub new_href: String,
    pub table: DataTableConfig,
    pub api_routes: Vec<ApiRoute>,
}

/// Create/edit page shared by every catalog entity.
#[derive(Template, WebTemplate)]
#[template(path = "entities/form.html")]
pub struct EntityFormTemplate {
    pub shell: Shell,
    pub form: EntityForm,
}

/// Render a form page.
pub fn form_page(page: StorePage, form: EntityForm) -> Response {
    EntityFormTemplate {
        shell: page.shell,
        form,
    }
    .into_response()
}

/// Split a failed write into a message to show on the form, or a hard error.
///
/// # Errors
///
/// Returns the error unchanged unless it is a validation or conflict error.
pub fn form_error(err: AppError) -> Result<String, AppError> {
    match err {
        AppError::Validation(e) => Ok(capitalize(&e.to_string())),
        AppError::Conflict(message) | AppError::Rejected(message) => Ok(capitalize(&message)),
        other => Err(other),
    }
}

/// Queue `message` and redirect to `href`.
pub async fn redirect_with_flash(session: &Session, href: &str, message: impl Into<String>) -> Response {
    set_flash(session, message).await;
    Redirect::to(href).into_response()
}

/// Outcome of a delete form post: back to the table, or back to the edit
/// page with the reason it failed.
///
/// # Errors
///
/// Returns the error unless it is a conflict.
pub async fn deleted<T>(
    session: &Session,
    result: Result<T, AppError>,
    table_href: &str,
    edit_href: &str,
    label: &str,
) -> Result<Response, AppError> {
    match result {
        Ok(_) => Ok(redirect_with_flash(session, table_href, format!("{label} deleted.")).await),
        Err(AppError::Conflict(message)) => {
            Ok(redirect_with_flash(session, edit_href, capitalize(&message)).await)
        }
        Err(e) => Err(e),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// `(value, label)` select choices from rows.
pub fn choices<'a, T: 'a>(
    rows: impl IntoIterator<Item = &'a T>,
    value: impl Fn(&T) -> String,
    label: impl Fn(&T) -> String,
) -> Vec<(String, String)> {
    rows.into_iter().map(|row| (value(row), label(row))).collect()
}

#[cfg(test)]
mod tests {
    use storedash_core::validate::ValidationError;

    use super::*;

    #[test]
    fn test_nav_marks_active_section() {
        let store_id = StoreId::generate();
        let links = nav_links(store_id, &format!("/{store_id}/sizes/new"));

        let active: Vec<_> = links.iter().filter(|l| l.active).map(|l| l.label.as_str()).collect();
        assert_eq!(active, ["Sizes"]);
        assert_eq!(links[0].label, "Overview");
        assert_eq!(links.last().map(|l| l.label.as_str()), Some("Settings"));
    }

    #[test]
    fn test_nav_overview_is_exact() {
        let store_id = StoreId::generate();
        let links = nav_links(store_id, &format!("/{store_id}"));
        assert!(links[0].active);
        assert_eq!(links.iter().filter(|l| l.active).count(), 1);
    }

    #[test]
    fn test_api_routes() {
        let store_id = StoreId::generate();
        let routes = api_routes(store_id, "sizes", "sizeId");

        assert_eq!(routes.len(), 5);
        assert_eq!(routes[1].path, format!("/api/{store_id}/sizes/{{sizeId}}"));
        assert!(!routes[0].admin);
        assert!(routes[4].admin);
    }

    #[test]
    fn test_form_error_keeps_user_errors() {
        let message = form_error(AppError::Validation(ValidationError::Required("label"))).ok();
        assert_eq!(message.as_deref(), Some("Label is required"));

        let conflict = form_error(AppError::Conflict("size already exists".into())).ok();
        assert_eq!(conflict.as_deref(), Some("Size already exists"));

        assert!(form_error(AppError::NotFound).is_err());
    }
}
