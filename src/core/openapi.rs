use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::orders::{dtos as orders_dtos, handlers as orders_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Users
        users_handlers::create_user,
        users_handlers::list_users,
        users_handlers::get_user,
        // Categories (public)
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::get_category_by_id,
        // Categories (admin)
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Products
        products_handlers::list_category_products,
        products_handlers::get_product,
        // Orders
        orders_handlers::get_order,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Users
            users_dtos::CreateUserDto,
            users_dtos::UserResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Categories
            categories_dtos::CategorySummaryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            categories_dtos::SaveCategoryDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<categories_dtos::CategoryTreeDto>,
            // Products
            products_dtos::ProductResponseDto,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<products_dtos::ProductResponseDto>,
            // Orders
            orders_dtos::OrderItemDto,
            orders_dtos::OrderDetailDto,
            orders_dtos::OrderLinksDto,
            orders_dtos::OrderLookupDto,
        )
    ),
    tags(
        (name = "users", description = "Storefront user registration"),
        (name = "categories", description = "Catalog categories (public)"),
        (name = "products", description = "Catalog products (public)"),
        (name = "orders", description = "Order lookup"),
        (name = "admin", description = "Catalog and user administration (basic auth)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "API documentation for the storefront backend",
    )
)]
pub struct ApiDoc;

/// Adds the admin Basic auth security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_admin_paths_and_basic_auth() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/admin/categories/{id}"));
        assert!(doc.paths.paths.contains_key("/api/categories/id/{id}"));
        assert!(doc.paths.paths.contains_key("/api/orders/{order_id}"));

        let components = doc.components.expect("components should be present");
        assert!(components.security_schemes.contains_key("basic_auth"));
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Tiệm Nhỏ API".to_string(),
            version: "1.2.3".to_string(),
            description: "Tài liệu".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Tiệm Nhỏ API");
        assert_eq!(doc.info.version, "1.2.3");
        assert_eq!(doc.info.description.as_deref(), Some("Tài liệu"));
    }
}
