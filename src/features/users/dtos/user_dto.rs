use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request DTO for creating a user.
///
/// Missing fields deserialize as empty strings so they surface as field
/// validation errors instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, message = "Tên không được để trống"))]
    #[serde(default)]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email không được để trống"),
        email(message = "Email không hợp lệ")
    )]
    #[serde(default)]
    pub email: String,
}

/// Response DTO for user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::validation::validated;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn dto(name: &str, email: &str) -> CreateUserDto {
        CreateUserDto {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    fn failing_fields(dto: CreateUserDto) -> Vec<String> {
        match validated(dto) {
            Err(AppError::Validation(fields)) => fields.into_keys().collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert_eq!(failing_fields(dto("", "a@b.com")), vec!["name"]);
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        assert_eq!(failing_fields(dto("Alice", "not-an-email")), vec!["email"]);
    }

    #[test]
    fn test_both_fields_reported_together() {
        assert_eq!(failing_fields(dto("", "")), vec!["email", "name"]);
    }

    #[test]
    fn test_messages_are_vietnamese() {
        match validated(dto("", "a@b.com")) {
            Err(AppError::Validation(fields)) => {
                assert_eq!(fields["name"], vec!["Tên không được để trống".to_string()]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_body_is_returned_unchanged() {
        let input = dto("Alice", "a@b.com");
        assert_eq!(validated(input.clone()).unwrap(), input);
    }

    #[test]
    fn test_generated_users_pass() {
        for _ in 0..20 {
            let name: String = Name().fake();
            let email: String = SafeEmail().fake();
            let input = dto(&name, &email);
            assert_eq!(validated(input.clone()).unwrap(), input);
        }
    }

    #[test]
    fn test_missing_fields_become_field_errors() {
        let parsed: CreateUserDto = serde_json::from_str(r#"{"email": "a@b.com"}"#).unwrap();
        assert_eq!(failing_fields(parsed), vec!["name"]);
    }
}
