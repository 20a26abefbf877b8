//! Tattoo record handlers for Web API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::web::dto::{
    ApiResponse, CategoryResponse, CreateCategoryRequest, CreateTattooRequest, TattooResponse,
    UpdateTattooRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{ImageUpload, OptionalUser};

/// GET /records - List all tattoos.
#[utoipa::path(
    get,
    path = "/records",
    tag = "records",
    responses(
        (status = 200, description = "All tattoo records", body = Vec<TattooResponse>)
    )
)]
pub async fn list_tattoos(
    State(state): State<Arc<AppState>>,
    user: OptionalUser,
) -> Result<Json<ApiResponse<Vec<TattooResponse>>>, ApiError> {
    tracing::debug!(user_id = ?user.id(), "Listing tattoos");

    let tattoos = state.model.list_all().await?;
    let responses: Vec<TattooResponse> = tattoos.into_iter().map(TattooResponse::from).collect();

    Ok(Json(ApiResponse::new(responses)))
}

/// GET /records/category - List all categories.
#[utoipa::path(
    get,
    path = "/records/category",
    tag = "categories",
    responses(
        (status = 200, description = "All categories", body = Vec<CategoryResponse>)
    )
)]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    user: OptionalUser,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, ApiError> {
    tracing::debug!(user_id = ?user.id(), "Listing categories");

    let categories = state.model.list_all_categories().await?;
    let responses: Vec<CategoryResponse> = categories.into_iter().map(CategoryResponse::from).collect();

    Ok(Json(ApiResponse::new(responses)))
}

/// GET /records/:id - Get a tattoo.
#[utoipa::path(
    get,
    path = "/records/{id}",
    tag = "records",
    params(
        ("id" = i64, Path, description = "Tattoo ID")
    ),
    responses(
        (status = 200, description = "Tattoo record", body = TattooResponse),
        (status = 404, description = "Tattoo not found", body = crate::web::error::ErrorBody)
    )
)]
pub async fn get_tattoo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<TattooResponse>>, ApiError> {
    let tattoo = state
        .model
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tattoo not found"))?;

    Ok(Json(ApiResponse::new(tattoo.into())))
}

/// GET /records/category/:id - Get a category.
#[utoipa::path(
    get,
    path = "/records/category/{id}",
    tag = "categories",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 404, description = "Category not found", body = crate::web::error::ErrorBody)
    )
)]
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CategoryResponse>>, ApiError> {
    let category = state
        .model
        .get_category_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    Ok(Json(ApiResponse::new(category.into())))
}

/// DELETE /records/:id - Delete a tattoo.
#[utoipa::path(
    delete,
    path = "/records/{id}",
    tag = "records",
    params(
        ("id" = i64, Path, description = "Tattoo ID")
    ),
    responses(
        (status = 204, description = "Tattoo deleted"),
        (status = 404, description = "Tattoo not found", body = crate::web::error::ErrorBody)
    )
)]
pub async fn delete_tattoo(
    State(state): State<Arc<AppState>>,
    user: OptionalUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.model.delete(id).await? {
        return Err(ApiError::not_found("Tattoo not found"));
    }

    tracing::info!(tattoo_id = id, user_id = ?user.id(), "Tattoo deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /records - Create a tattoo.
///
/// Request body: multipart/form-data with `name`, optional `description`,
/// optional `category_id` and an optional `image` file (JPEG or PNG).
#[utoipa::path(
    post,
    path = "/records",
    tag = "records",
    responses(
        (status = 201, description = "Tattoo created", body = TattooResponse),
        (status = 400, description = "Upload rejected", body = crate::web::error::ErrorBody),
        (status = 422, description = "Invalid fields", body = crate::web::error::ErrorBody)
    )
)]
pub async fn create_tattoo(
    State(state): State<Arc<AppState>>,
    user: OptionalUser,
    upload: ImageUpload,
) -> Result<(StatusCode, Json<ApiResponse<TattooResponse>>), ApiError> {
    let request = CreateTattooRequest::from_fields(&upload.fields)?;
    let stored_name = upload.stored_name().map(str::to_string);

    let tattoo = state
        .model
        .create(request.into_new_tattoo(), stored_name)
        .await?;

    tracing::info!(
        tattoo_id = tattoo.id,
        image = ?tattoo.image,
        user_id = ?user.id(),
        "Tattoo created"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::new(tattoo.into()))))
}

/// POST /records/category - Create a category.
#[utoipa::path(
    post,
    path = "/records/category",
    tag = "categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 409, description = "Category already exists", body = crate::web::error::ErrorBody),
        (status = 422, description = "Invalid name", body = crate::web::error::ErrorBody)
    )
)]
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    user: OptionalUser,
    ValidatedJson(request): ValidatedJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponse>>), ApiError> {
    let category = state
        .model
        .create_category(request.into_new_category())
        .await?;

    tracing::info!(category_id = category.id, user_id = ?user.id(), "Category created");

    Ok((StatusCode::CREATED, Json(ApiResponse::new(category.into()))))
}

/// PUT /records/:id - Update a tattoo.
///
/// Request body: multipart/form-data; every field is optional. A new
/// `image` file replaces the stored image name.
#[utoipa::path(
    put,
    path = "/records/{id}",
    tag = "records",
    params(
        ("id" = i64, Path, description = "Tattoo ID")
    ),
    responses(
        (status = 200, description = "Tattoo updated", body = TattooResponse),
        (status = 400, description = "Upload rejected", body = crate::web::error::ErrorBody),
        (status = 404, description = "Tattoo not found", body = crate::web::error::ErrorBody),
        (status = 422, description = "Invalid fields", body = crate::web::error::ErrorBody)
    )
)]
pub async fn update_tattoo(
    State(state): State<Arc<AppState>>,
    user: OptionalUser,
    Path(id): Path<i64>,
    upload: ImageUpload,
) -> Result<Json<ApiResponse<TattooResponse>>, ApiError> {
    let request = UpdateTattooRequest::from_fields(&upload.fields)?;
    let stored_name = upload.stored_name().map(str::to_string);

    let tattoo = state
        .model
        .update(id, request.into_update(), stored_name)
        .await?
        .ok_or_else(|| ApiError::not_found("Tattoo not found"))?;

    tracing::info!(tattoo_id = id, user_id = ?user.id(), "Tattoo updated");

    Ok(Json(ApiResponse::new(tattoo.into())))
}
