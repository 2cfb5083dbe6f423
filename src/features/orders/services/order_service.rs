use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::orders::dtos::OrderDetailDto;
use crate::features::orders::models::{Order, OrderItem};

/// Read access to orders, keyed by their opaque id
pub struct OrderService {
    pool: PgPool,
}

impl OrderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an order with its lines; `None` when the id is unknown
    pub async fn find(&self, order_id: &str) -> Result<Option<OrderDetailDto>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, status, total_amount, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get order: {:?}", e);
            AppError::Database(e)
        })?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, product_id, product_name, product_image, quantity, unit_price
            FROM order_items
            WHERE order_id = $1
            ORDER BY product_name
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list order items: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(Some(OrderDetailDto::new(
            order,
            items.into_iter().map(Into::into).collect(),
        )))
    }

    /// Like [`find`](Self::find) but unknown ids are an error
    pub async fn get(&self, order_id: &str) -> Result<OrderDetailDto> {
        self.find(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Không tìm thấy đơn hàng '{}'", order_id)))
    }
}
