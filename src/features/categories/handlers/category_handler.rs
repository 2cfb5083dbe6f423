use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::categories::dtos::{CategoryResponseDto, CategoryTreeDto, SaveCategoryDto};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{send_response, ApiResponse, Meta};
use crate::shared::validation::validated;

/// Query params for listing categories
#[derive(Debug, Deserialize)]
pub struct ListCategoriesQuery {
    /// If true, return tree structure. Default: false (flat list)
    #[serde(default)]
    pub tree: bool,
}

/// Query params for looking a category up by id
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLookupQuery {
    /// If true, only root categories are searched. Default: false (whole tree)
    #[serde(default)]
    pub top_level: bool,
}

/// List all active categories
///
/// Returns categories as flat list or tree structure based on `tree` query param.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(
        ("tree" = Option<bool>, Query, description = "Return tree structure if true")
    ),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    let (value, total) = if query.tree {
        let tree = service.list_tree().await?;
        let total = tree.len();
        (serde_json::to_value(tree), total)
    } else {
        let categories = service.list().await?;
        let total = categories.len();
        (serde_json::to_value(categories), total)
    };

    let value = value.map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(ApiResponse::success(
        Some(value),
        "Lấy danh sách danh mục thành công",
        Some(Meta {
            total: total as i64,
        }),
    )))
}

/// Get category by slug
#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(slug): AppPath<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(
        Some(category),
        "Lấy danh mục thành công",
        None,
    )))
}

/// Get category by id
///
/// Searches the whole category tree, including nested children, unless
/// `topLevel=true`.
#[utoipa::path(
    get,
    path = "/api/categories/id/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id"),
        ("topLevel" = Option<bool>, Query, description = "Search root categories only if true")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryTreeDto>),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category_by_id(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
    Query(query): Query<CategoryLookupQuery>,
) -> Result<Json<ApiResponse<CategoryTreeDto>>> {
    let category = service.get_by_id(id, query.top_level).await?;
    Ok(Json(ApiResponse::success(
        Some(category),
        "Lấy danh mục thành công",
        None,
    )))
}

/// Create a category (admin)
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = SaveCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or unknown parent"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Slug already used")
    ),
    tag = "admin",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<SaveCategoryDto>,
) -> Result<Response> {
    let dto = validated(dto)?;

    let category = service.create(dto).await?;
    Ok(send_response(
        StatusCode::CREATED,
        "Tạo danh mục thành công",
        Some(category),
    ))
}

/// Replace a category (admin)
#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    request_body = SaveCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or unknown parent"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Slug already used or parent would create a cycle")
    ),
    tag = "admin",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<SaveCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let dto = validated(dto)?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(category),
        "Cập nhật danh mục thành công",
        None,
    )))
}

/// Delete a category (admin)
///
/// Rejected while the category still has child categories.
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still has children")
    ),
    tag = "admin",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response> {
    service.delete(id).await?;
    Ok(send_response::<()>(
        StatusCode::OK,
        "Xoá danh mục thành công",
        None,
    ))
}
