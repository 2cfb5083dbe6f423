use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Create routes for the products feature
///
/// Note: This feature is public and read-only.
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/api/categories/{slug}/products",
            get(handlers::list_category_products),
        )
        .route("/api/products/{slug}", get(handlers::get_product))
        .with_state(service)
}
