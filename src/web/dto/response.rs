//! Response DTOs for Web API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::tattoo::{Category, Tattoo};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Tattoo record.
#[derive(Debug, Serialize, ToSchema)]
pub struct TattooResponse {
    /// Record ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Category ID.
    pub category_id: Option<i64>,
    /// Stored image file name, served under `/uploads/`.
    pub image: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl From<Tattoo> for TattooResponse {
    fn from(tattoo: Tattoo) -> Self {
        Self {
            id: tattoo.id,
            name: tattoo.name,
            description: tattoo.description,
            category_id: tattoo.category_id,
            image: tattoo.image,
            created_at: tattoo.created_at,
            updated_at: tattoo.updated_at,
        }
    }
}

/// Tattoo category.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    /// Category ID.
    pub id: i64,
    /// Unique name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
        }
    }
}
