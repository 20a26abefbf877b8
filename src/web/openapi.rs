//! OpenAPI document for the record routes.

use utoipa::OpenApi;

use super::dto::{CategoryResponse, CreateCategoryRequest, TattooResponse};
use super::error::ErrorBody;
use super::handlers;

/// OpenAPI documentation root.
#[derive(OpenApi)]
#[openapi(
    info(title = "Tattoo API", description = "Tattoo records, categories and image uploads"),
    paths(
        handlers::list_tattoos,
        handlers::list_categories,
        handlers::get_tattoo,
        handlers::get_category,
        handlers::delete_tattoo,
        handlers::create_tattoo,
        handlers::create_category,
        handlers::update_tattoo,
    ),
    components(schemas(TattooResponse, CategoryResponse, CreateCategoryRequest, ErrorBody)),
    tags(
        (name = "records", description = "Tattoo records"),
        (name = "categories", description = "Tattoo categories")
    )
)]
pub struct ApiDoc;
