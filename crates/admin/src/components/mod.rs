//! Shared UI components.
//!
//! - [`data_table`] - Table pages
//! - [`form`] - Create and edit forms

pub mod data_table;
pub mod form;

pub use data_table::{DataTableConfig, TableCell, TableColumn, TableRow};
pub use form::{EntityForm, FieldKind, FormField, SelectOption};
