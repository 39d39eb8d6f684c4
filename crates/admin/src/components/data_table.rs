//! Data table component types.
//!
//! Every list page (catalog entities and orders) renders through
//! `templates/components/data_table.html` with a [`DataTableConfig`].

use serde::Serialize;

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
}

impl TableColumn {
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// One cell. `swatch` renders a color chip next to the text.
#[derive(Debug, Clone, Serialize)]
pub struct TableCell {
    pub text: String,
    pub swatch: Option<String>,
}

impl TableCell {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            swatch: None,
        }
    }

    #[must_use]
    pub fn color(value: &str) -> Self {
        Self {
            text: value.to_string(),
            swatch: Some(value.to_string()),
        }
    }

    #[must_use]
    pub fn flag(value: bool) -> Self {
        Self::text(if value { "Yes" } else { "No" })
    }
}

/// One row with its per-row actions.
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    /// Link to the edit form.
    pub edit_href: Option<String>,
    /// Form action that deletes the row.
    pub delete_action: Option<String>,
    /// Text searched by the client-side filter box.
    pub search_text: String,
}

impl TableRow {
    #[must_use]
    pub fn new(cells: Vec<TableCell>) -> Self {
        let search_text = cells
            .iter()
            .map(|c| c.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            cells,
            edit_href: None,
            delete_action: None,
            search_text,
        }
    }

    /// Add edit and delete actions rooted at `href`.
    #[must_use]
    pub fn with_actions(mut self, href: &str) -> Self {
        self.edit_href = Some(href.to_string());
        self.delete_action = Some(format!("{href}/delete"));
        self
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Rows, already formatted.
    pub rows: Vec<TableRow>,
    /// Search placeholder text.
    pub search_placeholder: String,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
}

impl DataTableConfig {
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            rows: vec![],
            search_placeholder: "Search...".to_string(),
            empty_title: "No results.".to_string(),
            empty_description: None,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Set the rows.
    #[must_use]
    pub fn rows(mut self, rows: Vec<TableRow>) -> Self {
        self.rows = rows;
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, title: &str, description: Option<&str>) -> Self {
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Whether any row has actions, which adds a trailing column.
    #[must_use]
    pub fn has_actions(&self) -> bool {
        self.rows
            .iter()
            .any(|r| r.edit_href.is_some() || r.delete_action.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_table_config_builder() {
        let config = DataTableConfig::new("sizes")
            .column(TableColumn::new("name", "Name"))
            .column(TableColumn::new("value", "Value"))
            .search_placeholder("Filter sizes...")
            .empty_state("No sizes yet", Some("Create one to get started"));

        assert_eq!(config.table_id, "sizes");
        assert_eq!(config.columns.len(), 2);
        assert_eq!(config.search_placeholder, "Filter sizes...");
        assert_eq!(config.empty_description.as_deref(), Some("Create one to get started"));
        assert!(!config.has_actions());
    }

    #[test]
    fn test_row_actions_and_search_text() {
        let row = TableRow::new(vec![TableCell::text("Large"), TableCell::color("#FF0000")])
            .with_actions("/abc/sizes/123");

        assert_eq!(row.edit_href.as_deref(), Some("/abc/sizes/123"));
        assert_eq!(row.delete_action.as_deref(), Some("/abc/sizes/123/delete"));
        assert_eq!(row.search_text, "large #ff0000");
        assert_eq!(row.cells[1].swatch.as_deref(), Some("#FF0000"));

        let config = DataTableConfig::new("sizes").rows(vec![row]);
        assert!(config.has_actions());
    }

    #[test]
    fn test_flag_cell() {
        assert_eq!(TableCell::flag(true).text, "Yes");
        assert_eq!(TableCell::flag(false).text, "No");
    }
}
