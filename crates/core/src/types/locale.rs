//! Trilingual catalog text.
//!
//! Catalog names and descriptions are maintained in English, French and
//! Spanish. The column suffixes (`_en`, `_fr`, `_sp`) follow the storefront's
//! existing locale keys.

use serde::{Deserialize, Serialize};

/// A storefront locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Fr,
    Sp,
}

impl Locale {
    /// All locales, in display order.
    pub const ALL: [Self; 3] = [Self::En, Self::Fr, Self::Sp];

    /// Human-readable language name.
    #[must_use]
    pub const fn language(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Fr => "French",
            Self::Sp => "Spanish",
        }
    }
}

/// The same piece of text in every storefront locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub fr: String,
    pub sp: String,
}

impl LocalizedText {
    /// Create localized text from its three translations.
    #[must_use]
    pub fn new(en: impl Into<String>, fr: impl Into<String>, sp: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            fr: fr.into(),
            sp: sp.into(),
        }
    }

    /// The translation for a locale.
    #[must_use]
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Fr => &self.fr,
            Locale::Sp => &self.sp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_locale() {
        let text = LocalizedText::new("Shirt", "Chemise", "Camisa");
        assert_eq!(text.get(Locale::En), "Shirt");
        assert_eq!(text.get(Locale::Fr), "Chemise");
        assert_eq!(text.get(Locale::Sp), "Camisa");
    }

    #[test]
    fn test_language_names() {
        let names: Vec<_> = Locale::ALL.iter().map(|l| l.language()).collect();
        assert_eq!(names, ["English", "French", "Spanish"]);
    }
}
