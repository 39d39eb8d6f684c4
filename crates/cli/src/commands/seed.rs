//! Seed a store's catalog from a YAML file.
//!
//! Every entry goes through the same validation as the dashboard forms.
//! Each localized list gets an `N/A` entry unless the file already has one,
//! and products default to it for any localized option they leave out.
//! Meant for a fresh store: running it twice creates duplicates.
//!
//! # File format
//!
//! ```yaml
//! sizes:
//!   - { name: Medium, value: M }
//! colors:
//!   - { name: Red, value: "#ff0000" }
//! provinces:
//!   - { name: Quebec, valueEn: Quebec, valueFr: Québec, valueSp: Quebec }
//! types: []
//! sportsteams: []
//! cdays: []
//! billboards:
//!   - label: Summer
//!     imageUrl: https://example.com/summer.jpg
//!     categories:
//!       - { nameEn: Shirts, nameFr: Chemises, nameSp: Camisas }
//! products:
//!   - nameEn: Jersey
//!     nameFr: Maillot
//!     nameSp: Camiseta
//!     descriptionEn: Home jersey
//!     descriptionFr: Maillot domicile
//!     descriptionSp: Camiseta local
//!     price: "45.00"
//!     category: Shirts
//!     size: Medium
//!     color: Red
//!     province: Quebec
//!     images: [https://example.com/jersey.jpg]
//!     isFeatured: true
//! orders:
//!   - phone: 555-0100
//!     address: 1 Main St
//!     isPaid: true
//!     createdAt: 2026-03-02T12:00:00Z
//!     products: [Jersey]
//! ```

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;

use storedash_admin::db::{
    BillboardRepository, CategoryRepository, LocalizedRepository, NewOrder, OptionRepository,
    OrderRepository, ProductRepository, RepositoryError, StoreRepository,
};
use storedash_admin::models::input::{
    BillboardInput, CategoryInput, ImageInput, LocalizedInput, OptionInput, ProductInput,
};
use storedash_admin::models::{LocalizedKind, OptionKind};
use storedash_core::validate::ValidationError;
use storedash_core::{OptionId, Price, ProductId, StoreId, parse_id};

use super::{ConnectError, connect};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Could not read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid store ID: {0}")]
    InvalidStoreId(String),

    #[error("Store not found: {0}")]
    StoreNotFound(StoreId),

    #[error("{what}: {source}")]
    Validation {
        what: String,
        source: ValidationError,
    },

    #[error("{what} refers to unknown {kind} {name:?}")]
    UnknownReference {
        what: String,
        kind: &'static str,
        name: String,
    },

    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),
}

// =============================================================================
// File format
// =============================================================================

/// A catalog file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogFile {
    pub sizes: Vec<OptionInput>,
    pub colors: Vec<OptionInput>,
    pub provinces: Vec<LocalizedInput>,
    pub types: Vec<LocalizedInput>,
    pub sportsteams: Vec<LocalizedInput>,
    pub cdays: Vec<LocalizedInput>,
    pub billboards: Vec<BillboardSeed>,
    pub products: Vec<ProductSeed>,
    pub orders: Vec<OrderSeed>,
}

impl CatalogFile {
    fn localized(&self, kind: LocalizedKind) -> &[LocalizedInput] {
        match kind {
            LocalizedKind::Province => &self.provinces,
            LocalizedKind::Type => &self.types,
            LocalizedKind::Sportsteam => &self.sportsteams,
            LocalizedKind::Cday => &self.cdays,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillboardSeed {
    #[serde(flatten)]
    pub billboard: BillboardInput,
    #[serde(default)]
    pub categories: Vec<CategoryInput>,
}

/// A product, referring to other rows by name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSeed {
    pub name_en: Option<String>,
    pub name_fr: Option<String>,
    pub name_sp: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_sp: Option<String>,
    pub price: Option<Price>,
    /// English category name.
    pub category: String,
    pub size: String,
    pub color: String,
    pub province: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub sportsteam: Option<String>,
    pub cday: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_archived: bool,
}

impl ProductSeed {
    fn localized(&self, kind: LocalizedKind) -> Option<&str> {
        match kind {
            LocalizedKind::Province => self.province.as_deref(),
            LocalizedKind::Type => self.kind.as_deref(),
            LocalizedKind::Sportsteam => self.sportsteam.as_deref(),
            LocalizedKind::Cday => self.cday.as_deref(),
        }
    }
}

/// An order, referring to products by English name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSeed {
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub is_paid: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub products: Vec<String>,
}

/// The `N/A` entry added to a localized list that lacks one.
fn not_applicable() -> LocalizedInput {
    let na = || Some(LocalizedKind::NOT_APPLICABLE.to_owned());
    LocalizedInput {
        name: na(),
        value_en: na(),
        value_fr: na(),
        value_sp: na(),
    }
}

/// The localized entries to create for `kind`, `N/A` first when missing.
fn with_sentinel(entries: &[LocalizedInput]) -> Vec<LocalizedInput> {
    let has_sentinel = entries
        .iter()
        .any(|e| e.name.as_deref().map(str::trim) == Some(LocalizedKind::NOT_APPLICABLE));

    let mut all = Vec::with_capacity(entries.len() + 1);
    if !has_sentinel {
        all.push(not_applicable());
    }
    all.extend(entries.iter().cloned());
    all
}

fn lookup<T: Copy>(
    names: &HashMap<String, T>,
    what: &str,
    kind: &'static str,
    name: &str,
) -> Result<T, SeedError> {
    names
        .get(name)
        .copied()
        .ok_or_else(|| SeedError::UnknownReference {
            what: what.to_owned(),
            kind,
            name: name.to_owned(),
        })
}

fn invalid(what: impl Into<String>) -> impl FnOnce(ValidationError) -> SeedError {
    let what = what.into();
    move |source| SeedError::Validation { what, source }
}

// =============================================================================
// Seeding
// =============================================================================

/// Totals reported at the end of a run.
#[derive(Debug, Default)]
struct Summary {
    options: usize,
    billboards: usize,
    categories: usize,
    products: usize,
    orders: usize,
}

/// Seed the store `store` from the YAML file at `file_path`.
///
/// # Errors
///
/// Returns `SeedError` if the file is invalid, an entry fails validation or
/// names an unknown row, or a database write fails.
pub async fn run(store: &str, file_path: &str) -> Result<(), SeedError> {
    let store_id: StoreId =
        parse_id(store).ok_or_else(|| SeedError::InvalidStoreId(store.to_owned()))?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(SeedError::FileNotFound(file_path.to_owned()));
    }

    tracing::info!(path = %file_path, "Loading catalog from file");
    let content = tokio::fs::read_to_string(path).await?;
    let catalog: CatalogFile = serde_yaml::from_str(&content)?;

    let pool = connect().await?;
    if StoreRepository::new(&pool).get(store_id).await?.is_none() {
        return Err(SeedError::StoreNotFound(store_id));
    }

    let summary = seed(&pool, store_id, &catalog).await?;

    tracing::info!("Seeding complete!");
    tracing::info!("  Options: {}", summary.options);
    tracing::info!("  Billboards: {}", summary.billboards);
    tracing::info!("  Categories: {}", summary.categories);
    tracing::info!("  Products: {}", summary.products);
    tracing::info!("  Orders: {}", summary.orders);
    Ok(())
}

async fn seed(pool: &PgPool, store_id: StoreId, catalog: &CatalogFile) -> Result<Summary, SeedError> {
    let mut summary = Summary::default();

    let mut options: HashMap<OptionKind, HashMap<String, OptionId>> = HashMap::new();
    for (kind, entries) in [
        (OptionKind::Size, &catalog.sizes),
        (OptionKind::Color, &catalog.colors),
    ] {
        let repo = OptionRepository::new(pool, kind);
        let names = options.entry(kind).or_default();
        for entry in entries {
            let draft = entry.clone().validate(kind).map_err(invalid(kind.label()))?;
            let row = repo.create(store_id, &draft).await?;
            names.insert(row.name, row.id);
            summary.options += 1;
        }
    }

    let mut localized: HashMap<LocalizedKind, HashMap<String, OptionId>> = HashMap::new();
    for kind in LocalizedKind::ALL {
        let repo = LocalizedRepository::new(pool, kind);
        let names = localized.entry(kind).or_default();
        for entry in with_sentinel(catalog.localized(kind)) {
            let draft = entry.validate().map_err(invalid(kind.label()))?;
            let row = repo.create(store_id, &draft).await?;
            names.insert(row.name, row.id);
            summary.options += 1;
        }
    }

    let mut categories: HashMap<String, String> = HashMap::new();
    for seed in &catalog.billboards {
        let draft = seed.billboard.clone().validate().map_err(invalid("Billboard"))?;
        let billboard = BillboardRepository::new(pool).create(store_id, &draft).await?;
        summary.billboards += 1;

        for category in &seed.categories {
            let input = CategoryInput {
                billboard_id: Some(billboard.id.to_string()),
                ..category.clone()
            };
            let draft = input.validate().map_err(invalid("Category"))?;
            let row = CategoryRepository::new(pool).create(store_id, &draft).await?;
            categories.insert(row.name_en, row.id.to_string());
            summary.categories += 1;
        }
    }

    let products = ProductRepository::new(pool);
    let mut product_ids: HashMap<String, ProductId> = HashMap::new();
    for seed in &catalog.products {
        let what = format!("Product {:?}", seed.name_en.as_deref().unwrap_or_default());
        let input = product_input(seed, &what, &categories, &options, &localized)?;
        let draft = input.validate().map_err(invalid(what))?;

        let product = products.create(store_id, &draft).await?;
        product_ids.insert(product.name_en, product.id);
        summary.products += 1;
    }

    let orders = OrderRepository::new(pool);
    for (index, seed) in catalog.orders.iter().enumerate() {
        let what = format!("Order #{}", index + 1);
        let lines = seed
            .products
            .iter()
            .map(|name| lookup(&product_ids, &what, "product", name))
            .collect::<Result<Vec<_>, _>>()?;

        let order = NewOrder {
            is_paid: seed.is_paid,
            phone: seed.phone.clone(),
            address: seed.address.clone(),
            created_at: seed.created_at.unwrap_or_else(Utc::now),
            product_ids: lines,
        };
        orders.create(store_id, &order).await?;
        summary.orders += 1;
    }

    Ok(summary)
}

/// Resolve a product's references by name into the API input shape.
fn product_input(
    seed: &ProductSeed,
    what: &str,
    categories: &HashMap<String, String>,
    options: &HashMap<OptionKind, HashMap<String, OptionId>>,
    localized: &HashMap<LocalizedKind, HashMap<String, OptionId>>,
) -> Result<ProductInput, SeedError> {
    let empty = HashMap::new();

    let option = |kind: OptionKind, name: &str| {
        lookup(options.get(&kind).unwrap_or(&empty), what, kind.noun(), name)
            .map(|id| id.to_string())
    };
    let localized_id = |kind: LocalizedKind| {
        let name = seed.localized(kind).unwrap_or(LocalizedKind::NOT_APPLICABLE);
        lookup(localized.get(&kind).unwrap_or(&empty), what, kind.noun(), name)
            .map(|id| id.to_string())
    };

    let category_id = categories
        .get(&seed.category)
        .cloned()
        .ok_or_else(|| SeedError::UnknownReference {
            what: what.to_owned(),
            kind: "category",
            name: seed.category.clone(),
        })?;

    Ok(ProductInput {
        name_en: seed.name_en.clone(),
        name_fr: seed.name_fr.clone(),
        name_sp: seed.name_sp.clone(),
        description_en: seed.description_en.clone(),
        description_fr: seed.description_fr.clone(),
        description_sp: seed.description_sp.clone(),
        price: seed.price,
        category_id: Some(category_id),
        size_id: Some(option(OptionKind::Size, &seed.size)?),
        images: Some(
            seed.images
                .iter()
                .map(|url| ImageInput { url: url.clone() })
                .collect(),
        ),
        color_id: Some(option(OptionKind::Color, &seed.color)?),
        province_id: Some(localized_id(LocalizedKind::Province)?),
        type_id: Some(localized_id(LocalizedKind::Type)?),
        sportsteam_id: Some(localized_id(LocalizedKind::Sportsteam)?),
        cday_id: Some(localized_id(LocalizedKind::Cday)?),
        is_featured: Some(seed.is_featured),
        is_archived: Some(seed.is_archived),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG: &str = r##"
sizes:
  - { name: Medium, value: M }
colors:
  - { name: Red, value: "#ff0000" }
provinces:
  - { name: Quebec, valueEn: Quebec, valueFr: Québec, valueSp: Quebec }
billboards:
  - label: Summer
    imageUrl: https://example.com/summer.jpg
    categories:
      - { nameEn: Shirts, nameFr: Chemises, nameSp: Camisas }
products:
  - nameEn: Jersey
    price: "45.00"
    category: Shirts
    size: Medium
    color: Red
    province: Quebec
    type: Home
orders:
  - { phone: 555-0100, address: 1 Main St, isPaid: true, products: [Jersey] }
"##;

    #[test]
    fn test_parse_catalog() {
        let catalog: CatalogFile = serde_yaml::from_str(CATALOG).unwrap();

        assert_eq!(catalog.sizes.len(), 1);
        assert_eq!(catalog.colors[0].value.as_deref(), Some("#ff0000"));
        assert_eq!(catalog.billboards[0].billboard.image_url.as_deref(), Some("https://example.com/summer.jpg"));
        assert_eq!(catalog.billboards[0].categories[0].name_fr.as_deref(), Some("Chemises"));
        assert_eq!(catalog.products[0].kind.as_deref(), Some("Home"));
        assert_eq!(catalog.products[0].price, Some(Price::from_cents(4_500)));
        assert!(catalog.orders[0].is_paid);
        assert!(catalog.types.is_empty());
    }

    #[test]
    fn test_sentinel_added_once() {
        let entries = with_sentinel(&[]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name.as_deref(), Some("N/A"));

        let existing = with_sentinel(&[not_applicable()]);
        assert_eq!(existing.len(), 1);
    }

    #[test]
    fn test_product_defaults_to_not_applicable() {
        let catalog: CatalogFile = serde_yaml::from_str(CATALOG).unwrap();
        let seed = &catalog.products[0];

        let id = |n: u128| OptionId::new(uuid_from(n));
        let categories = HashMap::from([("Shirts".to_owned(), "c".to_owned())]);
        let options = HashMap::from([
            (OptionKind::Size, HashMap::from([("Medium".to_owned(), id(1))])),
            (OptionKind::Color, HashMap::from([("Red".to_owned(), id(2))])),
        ]);
        let localized: HashMap<_, _> = LocalizedKind::ALL
            .into_iter()
            .map(|kind| {
                let mut names = HashMap::from([("N/A".to_owned(), id(10))]);
                names.insert("Quebec".to_owned(), id(11));
                names.insert("Home".to_owned(), id(12));
                (kind, names)
            })
            .collect();

        let input = product_input(seed, "Product", &categories, &options, &localized).unwrap();
        assert_eq!(input.province_id, Some(id(11).to_string()));
        assert_eq!(input.type_id, Some(id(12).to_string()));
        assert_eq!(input.cday_id, Some(id(10).to_string()));
    }

    #[test]
    fn test_unknown_reference_is_reported() {
        let catalog: CatalogFile = serde_yaml::from_str(CATALOG).unwrap();
        let err = product_input(
            &catalog.products[0],
            "Product \"Jersey\"",
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Product \"Jersey\" refers to unknown category \"Shirts\"");
    }

    fn uuid_from(n: u128) -> sqlx::types::Uuid {
        sqlx::types::Uuid::from_u128(n)
    }
}
