use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Create public routes for the users feature
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/users", post(handlers::create_user))
        .with_state(service)
}

/// Create admin routes for the users feature (nested under `/api/admin`)
pub fn admin_routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/users", get(handlers::list_users))
        .route("/users/{id}", get(handlers::get_user))
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
        let service = Arc::new(UserService::new(lazy_pool()));
        TestServer::new(routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected_with_field_error() {
        let response = server()
            .post("/api/users")
            .json(&json!({ "name": "", "email": "a@b.com" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["errors"]["name"][0], json!("Tên không được để trống"));
        assert!(body["errors"].get("email").is_none());
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected_with_field_error() {
        let response = server()
            .post("/api/users")
            .json(&json!({ "name": "Alice", "email": "not-an-email" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["errors"]["email"][0], json!("Email không hợp lệ"));
    }

    #[tokio::test]
    async fn test_wrong_json_type_is_bad_request() {
        let response = server()
            .post("/api/users")
            .json(&json!({ "name": 42, "email": "a@b.com" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
    }
}
