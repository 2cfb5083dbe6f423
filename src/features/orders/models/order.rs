use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::orders::dtos::OrderItemDto;

/// Database model for order
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: String,
    pub user_id: Option<Uuid>,
    /// Free-form label; no transitions are enforced here
    pub status: String,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Database model for an order line
#[derive(Debug, Clone, FromRow)]
pub struct OrderItem {
    pub id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub product_image: Option<String>,
    pub quantity: i32,
    pub unit_price: i64,
}

impl From<OrderItem> for OrderItemDto {
    fn from(i: OrderItem) -> Self {
        Self {
            id: i.id,
            product_id: i.product_id,
            product_name: i.product_name,
            product_image: i.product_image,
            quantity: i.quantity,
            unit_price: i.unit_price,
            line_total: i.unit_price * i64::from(i.quantity),
        }
    }
}
