//! Server-rendered storefront pages.
//!
//! ## Pages
//!
//! | Path | Description |
//! |------|-------------|
//! | `/user/order/detail/{orderId}` | Order detail |
//! | `/user/order/review-products/{orderId}` | Products of an order to review |
//! | `/category/{slug}` | Category with subcategories and products |
//! | anything else | Not-found page linking home |

pub mod handlers;
pub mod routes;
pub mod views;

use std::sync::Arc;

use crate::features::categories::CategoryService;
use crate::features::orders::OrderService;
use crate::features::products::ProductService;

/// Shared state of the page handlers
#[derive(Clone)]
pub struct StorefrontState {
    pub orders: Arc<OrderService>,
    pub categories: Arc<CategoryService>,
    pub products: Arc<ProductService>,
    pub store_name: Arc<str>,
}
