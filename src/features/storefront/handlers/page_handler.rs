use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::core::error::AppError;
use crate::features::storefront::views;
use crate::features::storefront::StorefrontState;
use crate::shared::constants::CATEGORY_PAGE_PRODUCTS;
use crate::shared::pages::TemplateError;

/// Turn a rendered page into a response; template failures become a bare 500
fn html_page(status: StatusCode, rendered: Result<String, TemplateError>) -> Response {
    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Lỗi máy chủ nội bộ").into_response()
        }
    }
}

fn not_found(state: &StorefrontState, message: &str) -> Response {
    html_page(
        StatusCode::NOT_FOUND,
        views::render_not_found(&state.store_name, message),
    )
}

/// Render an HTML page for a service error instead of the JSON envelope
fn error_page(state: &StorefrontState, error: AppError) -> Response {
    match error {
        AppError::NotFound(_) => not_found(state, views::NOT_FOUND_MESSAGE),
        other => {
            tracing::error!("Page request failed: {}", other);
            html_page(
                other.status_code(),
                views::render_error(&state.store_name, views::INTERNAL_ERROR_MESSAGE),
            )
        }
    }
}

/// Order detail page: `/user/order/detail/{order_id}`
pub async fn order_detail_page(
    State(state): State<StorefrontState>,
    Path(order_id): Path<String>,
) -> Response {
    match state.orders.find(&order_id).await {
        Ok(Some(order)) => html_page(
            StatusCode::OK,
            views::render_order_detail(&state.store_name, &order),
        ),
        Ok(None) => not_found(&state, views::ORDER_NOT_FOUND_MESSAGE),
        Err(e) => error_page(&state, e),
    }
}

/// Order review page: `/user/order/review-products/{order_id}`
pub async fn order_review_page(
    State(state): State<StorefrontState>,
    Path(order_id): Path<String>,
) -> Response {
    match state.orders.find(&order_id).await {
        Ok(Some(order)) => html_page(
            StatusCode::OK,
            views::render_order_review(&state.store_name, &order),
        ),
        Ok(None) => not_found(&state, views::ORDER_NOT_FOUND_MESSAGE),
        Err(e) => error_page(&state, e),
    }
}

/// Category page: `/category/{slug}` with the first page of products
pub async fn category_page(
    State(state): State<StorefrontState>,
    Path(slug): Path<String>,
) -> Response {
    let category = match state.categories.get_by_slug(&slug).await {
        Ok(category) => category,
        Err(e) => return error_page(&state, e),
    };

    let products = match state
        .products
        .list_by_category(category.id, 0, CATEGORY_PAGE_PRODUCTS)
        .await
    {
        Ok((products, _)) => products,
        Err(e) => return error_page(&state, e),
    };

    html_page(
        StatusCode::OK,
        views::render_category(&state.store_name, &category, &products),
    )
}

/// Fallback for every unmatched route
pub async fn not_found_page(State(state): State<StorefrontState>) -> Response {
    not_found(&state, views::NOT_FOUND_MESSAGE)
}
