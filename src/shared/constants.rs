/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// STOREFRONT ROUTES
// =============================================================================

/// Home route linked from error pages
pub const HOME_ROUTE: &str = "/";

/// Prefix of the order detail page, followed by the order id
pub const ORDER_DETAIL_ROUTE: &str = "/user/order/detail";

/// Prefix of the order review page, followed by the order id
pub const ORDER_REVIEW_ROUTE: &str = "/user/order/review-products";

/// Prefix of the category page, followed by the category slug
pub const CATEGORY_ROUTE: &str = "/category";

/// Slugs that would collide with fixed `/api/categories/...` segments
pub const RESERVED_CATEGORY_SLUGS: &[&str] = &["id"];

/// Number of products shown on the category page
pub const CATEGORY_PAGE_PRODUCTS: i64 = 24;

/// Postgres SQLSTATE for unique constraint violations
pub const PG_UNIQUE_VIOLATION: &str = "23505";
