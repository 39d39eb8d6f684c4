//! Catalog domain types.
//!
//! Row types derive `FromRow` directly and serialize in camelCase, which is
//! the shape the storefront consumes from the public `GET` endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use storedash_core::{
    BillboardId, CategoryId, LocalizedText, OptionId, Price, ProductId, ProductImageId, StoreId,
};

// =============================================================================
// Option kinds
// =============================================================================

/// Name/value option lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    Size,
    Color,
}

impl OptionKind {
    pub const ALL: [Self; 2] = [Self::Size, Self::Color];

    /// Table name in the `dashboard` schema.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Size => "dashboard.sizes",
            Self::Color => "dashboard.colors",
        }
    }

    /// URL segment, e.g. `/api/{store_id}/sizes`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Size => "sizes",
            Self::Color => "colors",
        }
    }

    /// Singular display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Size => "Size",
            Self::Color => "Color",
        }
    }

    /// Plural display name.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Size => "Sizes",
            Self::Color => "Colors",
        }
    }

    /// Lowercase noun used in messages, e.g. `color`.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Color => "color",
        }
    }
}

/// Option lists with a trilingual value and an `N/A` sentinel entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalizedKind {
    Province,
    Type,
    Sportsteam,
    Cday,
}

impl LocalizedKind {
    pub const ALL: [Self; 4] = [Self::Province, Self::Type, Self::Sportsteam, Self::Cday];

    /// Name of the entry meaning "not applicable". Hidden from public lists.
    pub const NOT_APPLICABLE: &'static str = "N/A";

    /// Table name in the `dashboard` schema.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Province => "dashboard.provinces",
            Self::Type => "dashboard.types",
            Self::Sportsteam => "dashboard.sportsteams",
            Self::Cday => "dashboard.cdays",
        }
    }

    /// URL segment, e.g. `/api/{store_id}/cdays`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Province => "provinces",
            Self::Type => "types",
            Self::Sportsteam => "sportsteams",
            Self::Cday => "cdays",
        }
    }

    /// Singular display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Province => "Province",
            Self::Type => "Type",
            Self::Sportsteam => "Sports team",
            Self::Cday => "Celebration day",
        }
    }

    /// Plural display name.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Province => "Provinces",
            Self::Type => "Types",
            Self::Sportsteam => "Sports teams",
            Self::Cday => "Celebration days",
        }
    }

    /// Lowercase noun used in messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Province => "province",
            Self::Type => "type",
            Self::Sportsteam => "sportsteam",
            Self::Cday => "cday",
        }
    }
}

// =============================================================================
// Rows
// =============================================================================

/// A category banner.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Billboard {
    pub id: BillboardId,
    pub store_id: StoreId,
    pub label: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product category.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub store_id: StoreId,
    pub billboard_id: BillboardId,
    pub name_en: String,
    pub name_fr: String,
    pub name_sp: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    #[must_use]
    pub fn name(&self) -> LocalizedText {
        LocalizedText::new(&self.name_en, &self.name_fr, &self.name_sp)
    }
}

/// A category together with its billboard.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithBillboard {
    #[serde(flatten)]
    pub category: Category,
    pub billboard: Billboard,
}

/// A size or color.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OptionValue {
    pub id: OptionId,
    pub store_id: StoreId,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A province, type, sports team or celebration day.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedOption {
    pub id: OptionId,
    pub store_id: StoreId,
    pub name: String,
    pub value_en: String,
    pub value_fr: String,
    pub value_sp: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LocalizedOption {
    #[must_use]
    pub fn is_not_applicable(&self) -> bool {
        self.name == LocalizedKind::NOT_APPLICABLE
    }
}

/// A product image URL.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: ProductImageId,
    pub product_id: ProductId,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product row, with references left as IDs.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub category_id: CategoryId,
    pub name_en: String,
    pub name_fr: String,
    pub name_sp: String,
    pub description_en: String,
    pub description_fr: String,
    pub description_sp: String,
    pub price: Price,
    pub is_featured: bool,
    pub is_archived: bool,
    pub size_id: OptionId,
    pub color_id: OptionId,
    pub province_id: OptionId,
    pub type_id: OptionId,
    pub sportsteam_id: OptionId,
    pub cday_id: OptionId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[must_use]
    pub fn name(&self) -> LocalizedText {
        LocalizedText::new(&self.name_en, &self.name_fr, &self.name_sp)
    }

    #[must_use]
    pub fn description(&self) -> LocalizedText {
        LocalizedText::new(
            &self.description_en,
            &self.description_fr,
            &self.description_sp,
        )
    }
}

/// A product with its images and every referenced option row.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<ProductImage>,
    pub category: Category,
    pub size: OptionValue,
    pub color: OptionValue,
    pub province: LocalizedOption,
    #[serde(rename = "type")]
    pub kind: LocalizedOption,
    pub sportsteam: LocalizedOption,
    pub cday: LocalizedOption,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<_> = OptionKind::ALL
            .iter()
            .map(|k| k.slug())
            .chain(LocalizedKind::ALL.iter().map(|k| k.slug()))
            .collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), 6);
    }

    #[test]
    fn test_tables_live_in_dashboard_schema() {
        for kind in LocalizedKind::ALL {
            assert!(kind.table().starts_with("dashboard."));
            assert!(kind.table().ends_with(kind.slug()));
        }
        for kind in OptionKind::ALL {
            assert!(kind.table().ends_with(kind.slug()));
        }
    }

    #[test]
    fn test_option_serializes_camel_case() {
        let option = LocalizedOption {
            id: OptionId::generate(),
            store_id: StoreId::generate(),
            name: "QC".to_owned(),
            value_en: "Quebec".to_owned(),
            value_fr: "Québec".to_owned(),
            value_sp: "Quebec".to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&option).unwrap();
        assert_eq!(json["valueFr"], "Québec");
        assert!(json.get("storeId").is_some());
        assert!(!option.is_not_applicable());
    }
}
