//! Required-field validation.
//!
//! Every catalog write (JSON API or HTML form) goes through these helpers so
//! both surfaces report the same messages, e.g. `name in english is required`.

use thiserror::Error;
use uuid::Uuid;

use crate::Price;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The field is missing or blank.
    #[error("{0} is required")]
    Required(&'static str),

    /// The field is present but does not refer to anything usable.
    #[error("{0} is invalid")]
    Invalid(&'static str),

    /// A numeric field must be greater than zero.
    #[error("{0} must be greater than 0")]
    NotPositive(&'static str),
}

impl ValidationError {
    /// Label of the field that failed.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Required(field) | Self::Invalid(field) | Self::NotPositive(field) => field,
        }
    }
}

/// Require a non-blank string. The returned value is trimmed.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] when the value is absent or only whitespace.
pub fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_owned()),
        _ => Err(ValidationError::Required(field)),
    }
}

/// Require any present value.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] when the value is absent.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Required(field))
}

/// Require a price greater than zero that fits the stored precision.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] when absent,
/// [`ValidationError::NotPositive`] when zero or negative and
/// [`ValidationError::Invalid`] for fractions of a cent or amounts above
/// [`Price::MAX`].
pub fn positive_price(value: Option<Price>, field: &'static str) -> Result<Price, ValidationError> {
    let price = required(value, field)?;
    if !price.is_positive() {
        return Err(ValidationError::NotPositive(field));
    }
    if !price.fits_column() {
        return Err(ValidationError::Invalid(field));
    }
    Ok(price)
}

/// Require a non-empty list.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] when absent or empty.
pub fn non_empty<T>(value: Option<Vec<T>>, field: &'static str) -> Result<Vec<T>, ValidationError> {
    match value {
        Some(items) if !items.is_empty() => Ok(items),
        _ => Err(ValidationError::Required(field)),
    }
}

/// Require a reference to another row, given as a UUID string.
///
/// Blank values (an unselected `<select>`) count as missing.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] when absent or blank and
/// [`ValidationError::Invalid`] when the value is not a UUID.
pub fn required_id<T: From<Uuid>>(
    value: Option<String>,
    field: &'static str,
) -> Result<T, ValidationError> {
    let raw = required_text(value, field)?;
    Uuid::parse_str(&raw)
        .map(T::from)
        .map_err(|_| ValidationError::Invalid(field))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::CategoryId;

    #[test]
    fn test_required_id() {
        assert_eq!(
            required_id::<CategoryId>(Some(String::new()), "category Id"),
            Err(ValidationError::Required("category Id"))
        );
        assert_eq!(
            required_id::<CategoryId>(Some("not-a-uuid".to_owned()), "category Id"),
            Err(ValidationError::Invalid("category Id"))
        );
        let id = CategoryId::generate();
        assert_eq!(
            required_id::<CategoryId>(Some(id.to_string()), "category Id"),
            Ok(id)
        );
    }

    #[test]
    fn test_required_text_rejects_blank() {
        assert_eq!(
            required_text(None, "name"),
            Err(ValidationError::Required("name"))
        );
        assert_eq!(
            required_text(Some("   ".to_owned()), "name"),
            Err(ValidationError::Required("name"))
        );
    }

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text(Some(" XL ".to_owned()), "name").unwrap(), "XL");
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::Required("name in english").to_string(),
            "name in english is required"
        );
        assert_eq!(
            ValidationError::Invalid("category Id").to_string(),
            "category Id is invalid"
        );
        assert_eq!(
            ValidationError::NotPositive("price").to_string(),
            "price must be greater than 0"
        );
    }

    #[test]
    fn test_positive_price() {
        assert!(positive_price(Some(Price::from_cents(1)), "price").is_ok());
        assert_eq!(
            positive_price(Some(Price::ZERO), "price"),
            Err(ValidationError::NotPositive("price"))
        );
        assert_eq!(
            positive_price(None, "price"),
            Err(ValidationError::Required("price"))
        );
    }

    #[test]
    fn test_price_precision_and_range() {
        let price = |s: &str| Some(Price::new(s.parse().unwrap()));

        assert!(positive_price(price("45.00"), "price").is_ok());
        assert!(positive_price(price("0.010"), "price").is_ok());
        assert!(positive_price(price("99999999.99"), "price").is_ok());
        assert_eq!(
            positive_price(price("0.001"), "price"),
            Err(ValidationError::Invalid("price"))
        );
        assert_eq!(
            positive_price(price("100000000"), "price"),
            Err(ValidationError::Invalid("price"))
        );
        assert_eq!(
            positive_price(price("123456789012"), "price"),
            Err(ValidationError::Invalid("price"))
        );
    }

    #[test]
    fn test_non_empty() {
        assert!(non_empty(Some(vec![1]), "images").is_ok());
        assert_eq!(
            non_empty::<u8>(Some(vec![]), "images"),
            Err(ValidationError::Required("images"))
        );
    }
}
