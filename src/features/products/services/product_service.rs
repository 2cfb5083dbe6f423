use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::dtos::ProductResponseDto;
use crate::features::products::models::Product;

/// Service for read-only catalog browsing
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List products of a category with pagination
    pub async fn list_by_category(
        &self,
        category_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<ProductResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count products: {:?}", e);
                AppError::Database(e)
            })?;

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, category_id, name, slug, price, image_url, created_at
            FROM products
            WHERE category_id = $1
            ORDER BY created_at DESC, name
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(category_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((products.into_iter().map(Into::into).collect(), total))
    }

    /// Resolve an active category slug to its id
    pub async fn category_id_by_slug(&self, slug: &str) -> Result<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM categories WHERE slug = $1 AND is_active = TRUE",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve category slug: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Không tìm thấy danh mục '{}'", slug)))
    }

    /// Get product by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<ProductResponseDto> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, category_id, name, slug, price, image_url, created_at
            FROM products
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get product by slug: {:?}", e);
            AppError::Database(e)
        })?
        .map(Into::into)
        .ok_or_else(|| AppError::NotFound(format!("Không tìm thấy sản phẩm '{}'", slug)))
    }
}
