//! Entity form component types.
//!
//! Create and edit pages render `templates/components/entity_form.html` from
//! an [`EntityForm`]. Field names match the camelCase JSON keys so the same
//! input types deserialize both the API body and the posted form.

use serde::Serialize;

/// Input widget for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Textarea,
    Number,
    Color,
    Select,
    Checkbox,
    /// One image URL per line.
    ImageList,
}

impl FieldKind {
    /// `type` attribute for `<input>` widgets.
    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Color => "color",
            Self::Checkbox => "checkbox",
            Self::Text | Self::Textarea | Self::Select | Self::ImageList => "text",
        }
    }

    #[must_use]
    pub const fn is_select(self) -> bool {
        matches!(self, Self::Select)
    }

    #[must_use]
    pub const fn is_checkbox(self) -> bool {
        matches!(self, Self::Checkbox)
    }

    /// Rendered as `<textarea>`.
    #[must_use]
    pub const fn is_multiline(self) -> bool {
        matches!(self, Self::Textarea | Self::ImageList)
    }
}

/// An `<option>` of a select field.
#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One form field with its current value.
#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
    pub placeholder: String,
    pub description: Option<String>,
    pub options: Vec<SelectOption>,
}

impl FormField {
    fn build(kind: FieldKind, name: &str, label: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            value: value.into(),
            placeholder: label.to_string(),
            description: None,
            options: vec![],
        }
    }

    #[must_use]
    pub fn text(name: &str, label: &str, value: impl Into<String>) -> Self {
        Self::build(FieldKind::Text, name, label, value)
    }

    #[must_use]
    pub fn textarea(name: &str, label: &str, value: impl Into<String>) -> Self {
        Self::build(FieldKind::Textarea, name, label, value)
    }

    #[must_use]
    pub fn number(name: &str, label: &str, value: impl Into<String>) -> Self {
        Self::build(FieldKind::Number, name, label, value).placeholder("9.99")
    }

    #[must_use]
    pub fn color(name: &str, label: &str, value: impl Into<String>) -> Self {
        Self::build(FieldKind::Color, name, label, value)
    }

    #[must_use]
    pub fn image_list(name: &str, label: &str, urls: &[String]) -> Self {
        Self::build(FieldKind::ImageList, name, label, urls.join("\n"))
            .placeholder("https://...")
            .description("One image URL per line.")
    }

    /// A checkbox; `value` is `"on"` when ticked.
    #[must_use]
    pub fn checkbox(name: &str, label: &str, checked: bool) -> Self {
        Self::build(
            FieldKind::Checkbox,
            name,
            label,
            if checked { "on" } else { "" },
        )
    }

    /// A select over `(value, label)` pairs with `selected` preselected.
    #[must_use]
    pub fn select<I>(name: &str, label: &str, selected: &str, choices: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let options = choices
            .into_iter()
            .map(|(value, label)| SelectOption {
                selected: value == selected,
                value,
                label,
            })
            .collect();

        Self {
            options,
            placeholder: format!("Select a {}", label.to_lowercase()),
            ..Self::build(FieldKind::Select, name, label, selected)
        }
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.kind.is_checkbox() && self.value == "on"
    }
}

/// A create or edit form.
#[derive(Debug, Clone, Serialize)]
pub struct EntityForm {
    pub title: String,
    pub description: String,
    /// Form `action` URL.
    pub action: String,
    pub fields: Vec<FormField>,
    pub submit_label: String,
    /// Delete form action, shown when editing.
    pub delete_action: Option<String>,
    /// Validation message from the last submit.
    pub error: Option<String>,
}

impl EntityForm {
    /// Form for creating a new `label` entity, posting to `{base}/new`.
    #[must_use]
    pub fn create(label: &str, base: &str) -> Self {
        Self {
            title: format!("Create {}", label.to_lowercase()),
            description: format!("Add a new {}", label.to_lowercase()),
            action: format!("{base}/new"),
            fields: vec![],
            submit_label: "Create".to_string(),
            delete_action: None,
            error: None,
        }
    }

    /// Form for editing an existing entity at `href`.
    #[must_use]
    pub fn edit(label: &str, href: &str) -> Self {
        Self {
            title: format!("Edit {}", label.to_lowercase()),
            description: format!("Edit a {}", label.to_lowercase()),
            action: href.to_string(),
            fields: vec![],
            submit_label: "Save changes".to_string(),
            delete_action: Some(format!("{href}/delete")),
            error: None,
        }
    }

    #[must_use]
    pub fn fields(mut self, fields: Vec<FormField>) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_marks_current_value() {
        let field = FormField::select(
            "sizeId",
            "Size",
            "b",
            vec![("a".to_string(), "Small".to_string()), ("b".to_string(), "Large".to_string())],
        );
        assert!(field.kind.is_select());
        assert!(!field.options[0].selected);
        assert!(field.options[1].selected);
        assert_eq!(field.placeholder, "Select a size");
    }

    #[test]
    fn test_checkbox_and_image_list() {
        assert!(FormField::checkbox("isFeatured", "Featured", true).is_checked());
        assert!(!FormField::checkbox("isArchived", "Archived", false).is_checked());

        let images = FormField::image_list("images", "Images", &["a".into(), "b".into()]);
        assert_eq!(images.value, "a\nb");
        assert!(images.kind.is_multiline());
    }

    #[test]
    fn test_create_and_edit_forms() {
        let create = EntityForm::create("Sports team", "/s/sportsteams");
        assert_eq!(create.title, "Create sports team");
        assert_eq!(create.action, "/s/sportsteams/new");
        assert!(create.delete_action.is_none());

        let edit = EntityForm::edit("Size", "/s/sizes/1");
        assert_eq!(edit.action, "/s/sizes/1");
        assert_eq!(edit.delete_action.as_deref(), Some("/s/sizes/1/delete"));
    }
}
