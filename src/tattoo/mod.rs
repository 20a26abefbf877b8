//! Tattoo records and categories.
//!
//! This module provides:
//! - Record and category types
//! - sqlx repositories over SQLite
//! - The [`TattooModel`] trait the web layer depends on

mod category;
mod model;
mod record;

pub use category::{Category, CategoryRepository, NewCategory};
pub use model::{SqliteTattooModel, TattooModel};
pub use record::{NewTattoo, Tattoo, TattooRepository, TattooUpdate};

/// Maximum length for a tattoo name (in characters).
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for a tattoo description (in characters).
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Maximum length for a category name (in characters).
pub const MAX_CATEGORY_NAME_LENGTH: usize = 50;
