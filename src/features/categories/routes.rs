use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create public routes for the categories feature
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/categories/{slug}", get(handlers::get_category))
        .route("/api/categories/id/{id}", get(handlers::get_category_by_id))
        .with_state(service)
}

/// Create admin routes for the categories feature (nested under `/api/admin`)
pub fn admin_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/categories", post(handlers::create_category))
        .route(
            "/categories/{id}",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        let service = Arc::new(CategoryService::new(lazy_pool()));
        let app = Router::new()
            .merge(routes(Arc::clone(&service)))
            .nest("/api/admin", admin_routes(service));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_by_malformed_id_is_bad_request() {
        let response = server().get("/api/categories/id/not-a-uuid").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["data"], Value::Null);
    }

    #[tokio::test]
    async fn test_create_with_invalid_slug_is_rejected_before_storage() {
        let response = server()
            .post("/api/admin/categories")
            .json(&json!({ "name": "Điện thoại", "slug": "Dien Thoai" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["errors"]["slug"].is_array());
        assert!(body["errors"].get("name").is_none());
    }

    #[tokio::test]
    async fn test_slug_shadowed_by_id_route_is_rejected() {
        let response = server()
            .post("/api/admin/categories")
            .json(&json!({ "name": "Id", "slug": "id" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["errors"]["slug"][0],
            json!("Slug này đã được hệ thống sử dụng")
        );
    }
}
