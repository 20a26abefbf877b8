//! Request DTOs for Web API.
//!
//! Tattoo create/update arrive as multipart text fields next to the image;
//! categories arrive as JSON.

use std::collections::HashMap;

use serde::Deserialize;
use validator::Validate;

use super::validation::single_line_text;
use crate::tattoo::{
    NewCategory, NewTattoo, TattooUpdate, MAX_CATEGORY_NAME_LENGTH, MAX_DESCRIPTION_LENGTH,
    MAX_NAME_LENGTH,
};
use crate::web::error::ApiError;

// validator's `length` bounds are u64; mirror the model limits at that type.
const MAX_NAME_LENGTH_U64: u64 = MAX_NAME_LENGTH as u64;
const MAX_DESCRIPTION_LENGTH_U64: u64 = MAX_DESCRIPTION_LENGTH as u64;
const MAX_CATEGORY_NAME_LENGTH_U64: u64 = MAX_CATEGORY_NAME_LENGTH as u64;

/// Parse an optional integer form field. An empty value means "none".
fn parse_optional_id(fields: &HashMap<String, String>, key: &str) -> Result<Option<Option<i64>>, ApiError> {
    match fields.get(key).map(|v| v.trim()) {
        None => Ok(None),
        Some("") => Ok(Some(None)),
        Some(value) => value
            .parse()
            .map(|id| Some(Some(id)))
            .map_err(|_| ApiError::bad_request(format!("{key} must be an integer"))),
    }
}

/// Tattoo creation form.
#[derive(Debug, Clone, Validate)]
pub struct CreateTattooRequest {
    /// Display name.
    #[validate(
        length(
            min = 1,
            max = MAX_NAME_LENGTH_U64,
            message = "Name must be between 1 and 100 characters"
        ),
        custom(function = "single_line_text")
    )]
    pub name: String,
    /// Description.
    #[validate(length(
        max = MAX_DESCRIPTION_LENGTH_U64,
        message = "Description must be at most 1000 characters"
    ))]
    pub description: Option<String>,
    /// Category ID.
    pub category_id: Option<i64>,
}

impl CreateTattooRequest {
    /// Build from multipart text fields.
    ///
    /// A missing name becomes an empty one so validation reports it.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, ApiError> {
        let request = Self {
            name: fields.get("name").cloned().unwrap_or_default(),
            description: fields.get("description").filter(|d| !d.is_empty()).cloned(),
            category_id: parse_optional_id(fields, "category_id")?.flatten(),
        };
        request.validate().map_err(ApiError::from_validation_errors)?;
        Ok(request)
    }

    /// Convert into the model's creation data.
    pub fn into_new_tattoo(self) -> NewTattoo {
        NewTattoo {
            name: self.name.trim().to_string(),
            description: self.description,
            category_id: self.category_id,
        }
    }
}

/// Tattoo update form. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateTattooRequest {
    /// New display name.
    #[validate(
        length(
            min = 1,
            max = MAX_NAME_LENGTH_U64,
            message = "Name must be between 1 and 100 characters"
        ),
        custom(function = "single_line_text")
    )]
    pub name: Option<String>,
    /// New description; an empty value clears it.
    #[validate(length(
        max = MAX_DESCRIPTION_LENGTH_U64,
        message = "Description must be at most 1000 characters"
    ))]
    pub description: Option<String>,
    /// New category; an empty value clears it.
    pub category_id: Option<Option<i64>>,
}

impl UpdateTattooRequest {
    /// Build from multipart text fields.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, ApiError> {
        let request = Self {
            name: fields.get("name").cloned(),
            description: fields.get("description").cloned(),
            category_id: parse_optional_id(fields, "category_id")?,
        };
        request.validate().map_err(ApiError::from_validation_errors)?;
        Ok(request)
    }

    /// Convert into the model's update data.
    pub fn into_update(self) -> TattooUpdate {
        TattooUpdate {
            name: self.name.map(|n| n.trim().to_string()),
            description: self.description.map(|d| Some(d).filter(|d| !d.is_empty())),
            category_id: self.category_id,
        }
    }
}

/// Category creation request.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateCategoryRequest {
    /// Category name.
    #[validate(
        length(
            min = 1,
            max = MAX_CATEGORY_NAME_LENGTH_U64,
            message = "Name must be between 1 and 50 characters"
        ),
        custom(function = "single_line_text")
    )]
    pub name: String,
}

impl CreateCategoryRequest {
    /// Convert into the model's creation data.
    pub fn into_new_category(self) -> NewCategory {
        NewCategory::new(self.name.trim())
    }
}
