use axum::{routing::get, Router};

use crate::features::storefront::handlers;
use crate::features::storefront::StorefrontState;

/// Create routes for the server-rendered storefront pages.
///
/// Also installs the not-found page as the fallback, so merge this router
/// last or re-apply the fallback on the final router.
pub fn routes(state: StorefrontState) -> Router {
    Router::new()
        .route(
            "/user/order/detail/{order_id}",
            get(handlers::order_detail_page),
        )
        .route(
            "/user/order/review-products/{order_id}",
            get(handlers::order_review_page),
        )
        .route("/category/{slug}", get(handlers::category_page))
        .fallback(handlers::not_found_page)
        .with_state(state)
}
