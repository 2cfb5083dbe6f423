use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::orders::models::Order;
use crate::shared::constants::{ORDER_DETAIL_ROUTE, ORDER_REVIEW_ROUTE};

/// Order line as shown to the customer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub product_image: Option<String>,
    pub quantity: i32,
    pub unit_price: i64,
    pub line_total: i64,
}

/// Response DTO for order with its lines
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailDto {
    pub id: String,
    pub user_id: Option<Uuid>,
    pub status: String,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemDto>,
}

impl OrderDetailDto {
    pub fn new(order: Order, items: Vec<OrderItemDto>) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            status: order.status,
            total_amount: order.total_amount,
            created_at: order.created_at,
            items,
        }
    }
}

pub fn order_detail_url(order_id: &str) -> String {
    format!("{}/{}", ORDER_DETAIL_ROUTE, urlencoding::encode(order_id))
}

pub fn order_review_url(order_id: &str) -> String {
    format!("{}/{}", ORDER_REVIEW_ROUTE, urlencoding::encode(order_id))
}

/// Storefront pages of an order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLinksDto {
    pub detail_url: String,
    pub review_url: String,
}

impl OrderLinksDto {
    pub fn for_order(order_id: &str) -> Self {
        Self {
            detail_url: order_detail_url(order_id),
            review_url: order_review_url(order_id),
        }
    }
}

/// Order lookup payload, merged into the top level of the response envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLookupDto {
    pub order: OrderDetailDto,
    pub links: OrderLinksDto,
}

impl From<OrderDetailDto> for OrderLookupDto {
    fn from(order: OrderDetailDto) -> Self {
        let links = OrderLinksDto::for_order(&order.id);
        Self { order, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_urls_encode_id() {
        assert_eq!(order_detail_url("a b/c"), "/user/order/detail/a%20b%2Fc");
        assert_eq!(order_review_url("42"), "/user/order/review-products/42");
    }

    #[test]
    fn test_links_serialize_camel_case() {
        let value = serde_json::to_value(OrderLinksDto::for_order("DH-1")).unwrap();
        assert_eq!(value["detailUrl"], "/user/order/detail/DH-1");
        assert_eq!(value["reviewUrl"], "/user/order/review-products/DH-1");
    }
}
