use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppPath;
use crate::features::products::dtos::ProductResponseDto;
use crate::features::products::services::ProductService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List products of a category (paginated)
#[utoipa::path(
    get,
    path = "/api/categories/{slug}/products",
    params(
        ("slug" = String, Path, description = "Category slug"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Products in the category", body = ApiResponse<Vec<ProductResponseDto>>),
        (status = 404, description = "Category not found")
    ),
    tag = "products"
)]
pub async fn list_category_products(
    State(service): State<Arc<ProductService>>,
    AppPath(slug): AppPath<String>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let category_id = service.category_id_by_slug(&slug).await?;
    let (items, total) = service
        .list_by_category(category_id, params.offset(), params.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        "Lấy danh sách sản phẩm thành công",
        Some(Meta { total }),
    )))
}

/// Get product by slug
#[utoipa::path(
    get,
    path = "/api/products/{slug}",
    params(
        ("slug" = String, Path, description = "Product slug")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponseDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    AppPath(slug): AppPath<String>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(
        Some(product),
        "Lấy sản phẩm thành công",
        None,
    )))
}
