use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};

use crate::core::error::Result;
use crate::core::extractor::AppPath;
use crate::features::orders::dtos::OrderLookupDto;
use crate::features::orders::services::OrderService;
use crate::shared::types::send_merged;

/// Get order by id
///
/// The body carries `order` and `links` (storefront page URLs) next to
/// `success` and `message`.
#[utoipa::path(
    get,
    path = "/api/orders/{order_id}",
    params(
        ("order_id" = String, Path, description = "Opaque order id")
    ),
    responses(
        (status = 200, description = "Order found", body = OrderLookupDto),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn get_order(
    State(service): State<Arc<OrderService>>,
    AppPath(order_id): AppPath<String>,
) -> Result<Response> {
    let order = service.get(&order_id).await?;
    Ok(send_merged(
        StatusCode::OK,
        "Lấy đơn hàng thành công",
        OrderLookupDto::from(order),
    ))
}
