use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Field name -> human readable messages
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Uniform envelope around every API response.
///
/// `data` is always serialized (as `null` when absent); `meta` and `errors`
/// only appear when set.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Standard pagination query parameters for list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase")]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    /// Calculate SQL OFFSET from page number, saturating for absurd pages
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit())
    }

    /// Get clamped page_size (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// `true` exactly for 2xx statuses
pub fn is_success_status(status: StatusCode) -> bool {
    status.is_success()
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: impl Into<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            meta,
            errors: None,
        }
    }

    /// Envelope whose `success` flag follows the status code
    pub fn with_status(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: is_success_status(status),
            message: message.into(),
            data,
            meta: None,
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>, errors: Option<FieldErrors>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            message: message.into(),
            data: None,
            meta: None,
            errors,
        }
    }
}

// =============================================================================
// RESPONSE FORMATTER
// =============================================================================

/// Write `{ success, message, data }` with the given status.
pub fn send_response<T: Serialize>(
    status: StatusCode,
    message: impl Into<String>,
    data: Option<T>,
) -> Response {
    (status, Json(ApiResponse::with_status(status, message, data))).into_response()
}

/// Write `{ success, message, ...fields }` with the given status.
///
/// Object payloads are merged into the top level without overriding
/// `success`/`message`; any other payload lands under `data`.
pub fn send_merged<T: Serialize>(
    status: StatusCode,
    message: impl Into<String>,
    payload: T,
) -> Response {
    let payload = match serde_json::to_value(payload) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("Failed to serialize response payload: {}", e);
            return send_response::<()>(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Lỗi máy chủ nội bộ",
                None,
            );
        }
    };

    (status, Json(merge_envelope(status, message.into(), payload))).into_response()
}

fn merge_envelope(status: StatusCode, message: String, payload: Value) -> Value {
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(is_success_status(status)));
    body.insert("message".to_string(), Value::String(message));

    match payload {
        Value::Object(fields) => {
            for (key, value) in fields {
                if key != "success" && key != "message" {
                    body.insert(key, value);
                }
            }
        }
        Value::Null => {}
        other => {
            body.insert("data".to_string(), other);
        }
    }

    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_flag_follows_status_range() {
        for code in 100u16..600 {
            let status = StatusCode::from_u16(code).unwrap();
            let envelope = ApiResponse::<()>::with_status(status, "x", None);
            assert_eq!(envelope.success, (200..300).contains(&code), "status {}", code);
        }
    }

    #[test]
    fn test_envelope_serializes_null_data() {
        let envelope = ApiResponse::<()>::with_status(StatusCode::OK, "ok", None);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value, json!({ "success": true, "message": "ok", "data": null }));
    }

    #[test]
    fn test_error_envelope_carries_field_errors() {
        let mut errors = FieldErrors::new();
        errors.insert("email".to_string(), vec!["Email không hợp lệ".to_string()]);

        let value = serde_json::to_value(ApiResponse::<()>::error("bad", Some(errors))).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["errors"]["email"][0], json!("Email không hợp lệ"));
    }

    #[test]
    fn test_merge_envelope_flattens_object_payload() {
        let merged = merge_envelope(
            StatusCode::OK,
            "done".to_string(),
            json!({ "token": "abc", "success": false }),
        );

        assert_eq!(
            merged,
            json!({ "success": true, "message": "done", "token": "abc" })
        );
    }

    #[test]
    fn test_merge_envelope_wraps_scalar_payload() {
        let merged = merge_envelope(StatusCode::CREATED, "ok".to_string(), json!([1, 2]));
        assert_eq!(merged["data"], json!([1, 2]));
    }

    #[test]
    fn test_send_response_writes_status() {
        let response = send_response(StatusCode::NOT_FOUND, "missing", None::<()>);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_pagination_offset_and_limit() {
        let query = PaginationQuery {
            page: 3,
            page_size: 500,
        };
        assert_eq!(query.limit(), MAX_PAGE_SIZE);
        assert_eq!(query.offset(), 2 * MAX_PAGE_SIZE);

        let first = PaginationQuery {
            page: 0,
            page_size: 0,
        };
        assert_eq!(first.offset(), 0);
        assert_eq!(first.limit(), 1);
    }

    #[test]
    fn test_pagination_huge_page_does_not_overflow() {
        let query: PaginationQuery =
            serde_json::from_str(r#"{"page":9223372036854775807,"pageSize":100}"#).unwrap();

        assert_eq!(query.offset(), i64::MAX);
        assert_eq!(query.limit(), 100);

        let negative: PaginationQuery =
            serde_json::from_str(r#"{"page":-9223372036854775808,"pageSize":100}"#).unwrap();
        assert_eq!(negative.offset(), 0);
    }
}
