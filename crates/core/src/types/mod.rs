//! Core types for Storedash.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod locale;
pub mod month;
pub mod price;
pub mod username;

pub use id::*;
pub use locale::{Locale, LocalizedText};
pub use month::Month;
pub use price::Price;
pub use username::{Username, UsernameError};
