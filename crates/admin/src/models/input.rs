//! Request bodies for catalog writes and their validated drafts.
//!
//! The JSON API and the HTML forms deserialize into the same `*Input` types
//! (camelCase field names, every field optional) and call `validate()`, so a
//! missing field produces the same `"<field> is required"` message on both
//! surfaces. Fields are checked in declaration order and the first failure
//! wins.

use rust_decimal::Decimal;
use serde::Deserialize;

use storedash_core::validate::{
    non_empty, positive_price, required_id, required_text, ValidationError,
};
use storedash_core::{BillboardId, CategoryId, LocalizedText, OptionId, Price};

use super::catalog::{Billboard, Category, LocalizedOption, OptionKind, OptionValue, ProductDetail};

// =============================================================================
// Stores
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreInput {
    pub name: Option<String>,
}

impl StoreInput {
    /// Validate into the store name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name is blank.
    pub fn validate(self) -> Result<String, ValidationError> {
        required_text(self.name, "name")
    }
}

// =============================================================================
// Billboards
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillboardInput {
    pub label: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillboardDraft {
    pub label: String,
    pub image_url: String,
}

impl BillboardInput {
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn validate(self) -> Result<BillboardDraft, ValidationError> {
        Ok(BillboardDraft {
            label: required_text(self.label, "label")?,
            image_url: required_text(self.image_url, "image Url")?,
        })
    }
}

// =============================================================================
// Categories
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name_en: Option<String>,
    pub name_fr: Option<String>,
    pub name_sp: Option<String>,
    pub billboard_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: LocalizedText,
    pub billboard_id: BillboardId,
}

impl CategoryInput {
    /// # Errors
    ///
    /// Returns the first missing field, or `Invalid` for a malformed billboard ID.
    pub fn validate(self) -> Result<CategoryDraft, ValidationError> {
        Ok(CategoryDraft {
            name: LocalizedText::new(
                required_text(self.name_en, "name in english")?,
                required_text(self.name_fr, "name in french")?,
                required_text(self.name_sp, "name in spanish")?,
            ),
            billboard_id: required_id(self.billboard_id, "billboard Id")?,
        })
    }
}

// =============================================================================
// Sizes and colors
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionInput {
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDraft {
    pub name: String,
    pub value: String,
}

impl OptionInput {
    /// Colors additionally require a `#RGB` or `#RRGGBB` value.
    ///
    /// # Errors
    ///
    /// Returns the first missing field, or `Invalid("value")` for a bad color.
    pub fn validate(self, kind: OptionKind) -> Result<OptionDraft, ValidationError> {
        let name = required_text(self.name, "name")?;
        let value = required_text(self.value, "value")?;

        if kind == OptionKind::Color && !is_hex_color(&value) {
            return Err(ValidationError::Invalid("value"));
        }

        Ok(OptionDraft { name, value })
    }
}

fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

// =============================================================================
// Provinces, types, sports teams, celebration days
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedInput {
    pub name: Option<String>,
    pub value_en: Option<String>,
    pub value_fr: Option<String>,
    pub value_sp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedDraft {
    pub name: String,
    pub value: LocalizedText,
}

impl LocalizedInput {
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn validate(self) -> Result<LocalizedDraft, ValidationError> {
        Ok(LocalizedDraft {
            name: required_text(self.name, "name")?,
            value: LocalizedText::new(
                required_text(self.value_en, "value in english")?,
                required_text(self.value_fr, "value in french")?,
                required_text(self.value_sp, "value in spanish")?,
            ),
        })
    }
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ImageInput {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name_en: Option<String>,
    pub name_fr: Option<String>,
    pub name_sp: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_sp: Option<String>,
    pub price: Option<Price>,
    pub category_id: Option<String>,
    pub size_id: Option<String>,
    pub images: Option<Vec<ImageInput>>,
    pub color_id: Option<String>,
    pub province_id: Option<String>,
    pub type_id: Option<String>,
    pub sportsteam_id: Option<String>,
    pub cday_id: Option<String>,
    /// Absent or `null` means `false`.
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub price: Price,
    pub category_id: CategoryId,
    pub size_id: OptionId,
    pub color_id: OptionId,
    pub province_id: OptionId,
    pub type_id: OptionId,
    pub sportsteam_id: OptionId,
    pub cday_id: OptionId,
    pub images: Vec<String>,
    pub is_featured: bool,
    pub is_archived: bool,
}

impl ProductInput {
    /// # Errors
    ///
    /// Returns the first missing field, `NotPositive("price")` for a zero or
    /// negative price, and `Invalid` for a malformed reference ID.
    pub fn validate(self) -> Result<ProductDraft, ValidationError> {
        let name = LocalizedText::new(
            required_text(self.name_en, "name in english")?,
            required_text(self.name_fr, "name in french")?,
            required_text(self.name_sp, "name in spanish")?,
        );
        let description = LocalizedText::new(
            required_text(self.description_en, "description in english")?,
            required_text(self.description_fr, "description in french")?,
            required_text(self.description_sp, "description in spanish")?,
        );
        let price = positive_price(self.price, "price")?;
        let category_id = required_id(self.category_id, "category Id")?;
        let size_id = required_id(self.size_id, "size Id")?;

        let images = self.images.map(|images| {
            images
                .into_iter()
                .map(|image| image.url.trim().to_owned())
                .filter(|url| !url.is_empty())
                .collect::<Vec<_>>()
        });
        let images = non_empty(images, "images")?;

        Ok(ProductDraft {
            name,
            description,
            price,
            category_id,
            size_id,
            color_id: required_id(self.color_id, "color Id")?,
            province_id: required_id(self.province_id, "province Id")?,
            type_id: required_id(self.type_id, "type Id")?,
            sportsteam_id: required_id(self.sportsteam_id, "sportsteam Id")?,
            cday_id: required_id(self.cday_id, "cday Id")?,
            images,
            is_featured: self.is_featured.unwrap_or_default(),
            is_archived: self.is_archived.unwrap_or_default(),
        })
    }
}

/// The product form as posted by the browser.
///
/// Prices arrive as text, images as one URL per line, and checkboxes are
/// present only when ticked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name_en: Option<String>,
    pub name_fr: Option<String>,
    pub name_sp: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_sp: Option<String>,
    pub price: Option<String>,
    pub category_id: Option<String>,
    pub size_id: Option<String>,
    pub images: Option<String>,
    pub color_id: Option<String>,
    pub province_id: Option<String>,
    pub type_id: Option<String>,
    pub sportsteam_id: Option<String>,
    pub cday_id: Option<String>,
    pub is_featured: Option<String>,
    pub is_archived: Option<String>,
}

impl ProductForm {
    /// Convert the posted form into the shared input shape.
    ///
    /// # Errors
    ///
    /// Returns `Invalid("price")` if the price is not a number.
    pub fn into_input(self) -> Result<ProductInput, ValidationError> {
        let price = match self.price.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(Price::new(
                text.trim_start_matches('$')
                    .replace(',', "")
                    .parse::<Decimal>()
                    .map_err(|_| ValidationError::Invalid("price"))?,
            )),
        };

        let images = self.images.map(|text| {
            text.lines()
                .map(|url| ImageInput {
                    url: url.to_owned(),
                })
                .collect()
        });

        Ok(ProductInput {
            name_en: self.name_en,
            name_fr: self.name_fr,
            name_sp: self.name_sp,
            description_en: self.description_en,
            description_fr: self.description_fr,
            description_sp: self.description_sp,
            price,
            category_id: self.category_id,
            size_id: self.size_id,
            images,
            color_id: self.color_id,
            province_id: self.province_id,
            type_id: self.type_id,
            sportsteam_id: self.sportsteam_id,
            cday_id: self.cday_id,
            is_featured: Some(self.is_featured.is_some()),
            is_archived: Some(self.is_archived.is_some()),
        })
    }

    /// Validate straight from the form.
    ///
    /// # Errors
    ///
    /// Same as [`ProductInput::validate`].
    pub fn validate(self) -> Result<ProductDraft, ValidationError> {
        self.into_input()?.validate()
    }
}

// =============================================================================
// Edit form prefill
// =============================================================================

impl From<&Billboard> for BillboardInput {
    fn from(billboard: &Billboard) -> Self {
        Self {
            label: Some(billboard.label.clone()),
            image_url: Some(billboard.image_url.clone()),
        }
    }
}

impl From<&Category> for CategoryInput {
    fn from(category: &Category) -> Self {
        Self {
            name_en: Some(category.name_en.clone()),
            name_fr: Some(category.name_fr.clone()),
            name_sp: Some(category.name_sp.clone()),
            billboard_id: Some(category.billboard_id.to_string()),
        }
    }
}

impl From<&OptionValue> for OptionInput {
    fn from(option: &OptionValue) -> Self {
        Self {
            name: Some(option.name.clone()),
            value: Some(option.value.clone()),
        }
    }
}

impl From<&LocalizedOption> for LocalizedInput {
    fn from(option: &LocalizedOption) -> Self {
        Self {
            name: Some(option.name.clone()),
            value_en: Some(option.value_en.clone()),
            value_fr: Some(option.value_fr.clone()),
            value_sp: Some(option.value_sp.clone()),
        }
    }
}

impl From<&ProductDetail> for ProductForm {
    fn from(detail: &ProductDetail) -> Self {
        let product = &detail.product;
        let images: Vec<&str> = detail.images.iter().map(|image| image.url.as_str()).collect();

        Self {
            name_en: Some(product.name_en.clone()),
            name_fr: Some(product.name_fr.clone()),
            name_sp: Some(product.name_sp.clone()),
            description_en: Some(product.description_en.clone()),
            description_fr: Some(product.description_fr.clone()),
            description_sp: Some(product.description_sp.clone()),
            price: Some(product.price.amount().to_string()),
            category_id: Some(product.category_id.to_string()),
            size_id: Some(product.size_id.to_string()),
            images: Some(images.join("\n")),
            color_id: Some(product.color_id.to_string()),
            province_id: Some(product.province_id.to_string()),
            type_id: Some(product.type_id.to_string()),
            sportsteam_id: Some(product.sportsteam_id.to_string()),
            cday_id: Some(product.cday_id.to_string()),
            is_featured: product.is_featured.then(|| "on".to_owned()),
            is_archived: product.is_archived.then(|| "on".to_owned()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_owned())
    }

    fn uuid() -> Option<String> {
        Some(uuid::Uuid::new_v4().to_string())
    }

    fn full_product() -> ProductInput {
        ProductInput {
            name_en: some("Jersey"),
            name_fr: some("Maillot"),
            name_sp: some("Camiseta"),
            description_en: some("Home jersey"),
            description_fr: some("Maillot domicile"),
            description_sp: some("Camiseta local"),
            price: Some(Price::from_cents(4_999)),
            category_id: uuid(),
            size_id: uuid(),
            images: Some(vec![ImageInput {
                url: "https://cdn.example.com/a.png".to_owned(),
            }]),
            color_id: uuid(),
            province_id: uuid(),
            type_id: uuid(),
            sportsteam_id: uuid(),
            cday_id: uuid(),
            is_featured: Some(true),
            is_archived: Some(false),
        }
    }

    #[test]
    fn test_product_valid() {
        let draft = full_product().validate().unwrap();
        assert_eq!(draft.name.fr, "Maillot");
        assert_eq!(draft.images.len(), 1);
        assert!(draft.is_featured);
    }

    #[test]
    fn test_product_first_missing_field_wins() {
        let input = ProductInput {
            name_fr: None,
            description_en: None,
            ..full_product()
        };
        assert_eq!(
            input.validate().unwrap_err().to_string(),
            "name in french is required"
        );
    }

    #[test]
    fn test_product_images_checked_before_color() {
        let input = ProductInput {
            images: Some(vec![ImageInput { url: "  ".to_owned() }]),
            color_id: None,
            ..full_product()
        };
        assert_eq!(
            input.validate().unwrap_err(),
            ValidationError::Required("images")
        );
    }

    #[test]
    fn test_product_price_must_be_positive() {
        let input = ProductInput {
            price: Some(Price::ZERO),
            ..full_product()
        };
        assert_eq!(
            input.validate().unwrap_err(),
            ValidationError::NotPositive("price")
        );
    }

    #[test]
    fn test_product_malformed_reference() {
        let input = ProductInput {
            cday_id: some("not-a-uuid"),
            ..full_product()
        };
        assert_eq!(
            input.validate().unwrap_err(),
            ValidationError::Invalid("cday Id")
        );
    }

    #[test]
    fn test_product_json_shape() {
        let json = serde_json::json!({
            "nameEn": "a", "nameFr": "b", "nameSp": "c",
            "descriptionEn": "d", "descriptionFr": "e", "descriptionSp": "f",
            "price": "12.50",
            "categoryId": uuid::Uuid::new_v4(),
            "sizeId": uuid::Uuid::new_v4(),
            "colorId": uuid::Uuid::new_v4(),
            "provinceId": uuid::Uuid::new_v4(),
            "typeId": uuid::Uuid::new_v4(),
            "sportsteamId": uuid::Uuid::new_v4(),
            "cdayId": uuid::Uuid::new_v4(),
            "images": [{ "url": "https://cdn.example.com/x.png" }]
        });
        let input: ProductInput = serde_json::from_value(json).unwrap();
        let draft = input.validate().unwrap();
        assert_eq!(draft.price, Price::from_cents(1_250));
        assert!(!draft.is_featured);
    }

    #[test]
    fn test_product_null_flags_are_false() {
        let json = serde_json::json!({
            "nameEn": "a", "nameFr": "b", "nameSp": "c",
            "descriptionEn": "d", "descriptionFr": "e", "descriptionSp": "f",
            "price": "12.50",
            "categoryId": uuid::Uuid::new_v4(),
            "sizeId": uuid::Uuid::new_v4(),
            "colorId": uuid::Uuid::new_v4(),
            "provinceId": uuid::Uuid::new_v4(),
            "typeId": uuid::Uuid::new_v4(),
            "sportsteamId": uuid::Uuid::new_v4(),
            "cdayId": uuid::Uuid::new_v4(),
            "images": [{ "url": "https://cdn.example.com/x.png" }],
            "isFeatured": null,
            "isArchived": null
        });
        let input: ProductInput = serde_json::from_value(json).unwrap();
        let draft = input.validate().unwrap();
        assert!(!draft.is_featured);
        assert!(!draft.is_archived);
    }

    #[test]
    fn test_product_price_fraction_of_cent() {
        let input = ProductInput {
            price: Some(Price::new("0.001".parse().unwrap())),
            ..full_product()
        };
        assert_eq!(
            input.validate().unwrap_err(),
            ValidationError::Invalid("price")
        );
    }

    #[test]
    fn test_product_form_conversion() {
        let form = ProductForm {
            name_en: some("Jersey"),
            name_fr: some("Maillot"),
            name_sp: some("Camiseta"),
            description_en: some("x"),
            description_fr: some("y"),
            description_sp: some("z"),
            price: some("$1,200.00"),
            category_id: uuid(),
            size_id: uuid(),
            images: some("https://a.example/1.png\r\n\r\nhttps://a.example/2.png\n"),
            color_id: uuid(),
            province_id: uuid(),
            type_id: uuid(),
            sportsteam_id: uuid(),
            cday_id: uuid(),
            is_featured: some("on"),
            is_archived: None,
        };
        let draft = form.validate().unwrap();
        assert_eq!(draft.price, Price::from_cents(120_000));
        assert_eq!(draft.images.len(), 2);
        assert!(draft.is_featured);
        assert!(!draft.is_archived);
    }

    #[test]
    fn test_product_form_bad_price() {
        let form = ProductForm {
            price: some("twelve"),
            ..ProductForm::default()
        };
        assert_eq!(
            form.into_input().unwrap_err(),
            ValidationError::Invalid("price")
        );
    }

    #[test]
    fn test_localized_requires_every_value() {
        let input = LocalizedInput {
            name: some("QC"),
            value_en: some("Quebec"),
            value_fr: some("   "),
            value_sp: some("Quebec"),
        };
        assert_eq!(
            input.validate().unwrap_err().to_string(),
            "value in french is required"
        );
    }

    #[test]
    fn test_color_value_must_be_hex() {
        let input = |value: &str| OptionInput {
            name: some("Red"),
            value: some(value),
        };
        assert!(input("#FF0000").validate(OptionKind::Color).is_ok());
        assert!(input("#f00").validate(OptionKind::Color).is_ok());
        assert_eq!(
            input("red").validate(OptionKind::Color).unwrap_err(),
            ValidationError::Invalid("value")
        );
        // Sizes accept any value
        assert!(input("XL").validate(OptionKind::Size).is_ok());
    }

    #[test]
    fn test_category_requires_billboard() {
        let input = CategoryInput {
            name_en: some("Shirts"),
            name_fr: some("Chemises"),
            name_sp: some("Camisas"),
            billboard_id: some(""),
        };
        assert_eq!(
            input.validate().unwrap_err().to_string(),
            "billboard Id is required"
        );
    }

    #[test]
    fn test_billboard_and_store() {
        assert_eq!(
            BillboardInput {
                label: some("Summer"),
                image_url: None
            }
            .validate()
            .unwrap_err()
            .to_string(),
            "image Url is required"
        );
        assert_eq!(
            StoreInput { name: some(" Shop ") }.validate().unwrap(),
            "Shop"
        );
    }
}
