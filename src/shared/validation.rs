use lazy_static::lazy_static;
use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::core::error::{AppError, Result};
use crate::shared::constants::RESERVED_CATEGORY_SLUGS;
use crate::shared::types::FieldErrors;

lazy_static! {
    /// Regex for validating slug fields
    /// Must be lowercase alphanumeric with single hyphens between words
    /// - Valid: "dien-thoai", "laptop", "phu-kien-2024"
    /// - Invalid: "-laptop", "laptop-", "dien--thoai", "Laptop", "dien_thoai"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Reject slugs that are taken by fixed route segments
pub fn validate_category_slug(slug: &str) -> std::result::Result<(), ValidationError> {
    if RESERVED_CATEGORY_SLUGS.contains(&slug) {
        return Err(ValidationError::new("reserved_slug"));
    }
    Ok(())
}

/// Run the `validator` rules of a DTO and hand it back unchanged on success.
pub fn validated<T: Validate>(dto: T) -> Result<T> {
    dto.validate()?;
    Ok(dto)
}

/// Flatten `validator` errors into field-keyed messages.
///
/// Rules without an explicit message fall back to their code.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(field_errors(&errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_category_slugs() {
        assert!(validate_category_slug("id").is_err());
        assert!(validate_category_slug("idol").is_ok());
        assert!(validate_category_slug("dien-thoai").is_ok());
    }

    #[derive(Debug, Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "bắt buộc"))]
        title: String,
        #[validate(range(min = 1))]
        quantity: i32,
    }

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("dien-thoai"));
        assert!(SLUG_REGEX.is_match("laptop"));
        assert!(SLUG_REGEX.is_match("phu-kien-2024"));
        assert!(SLUG_REGEX.is_match("a"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-laptop")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("laptop-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("dien--thoai")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Laptop")); // uppercase
        assert!(!SLUG_REGEX.is_match("dien_thoai")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
        assert!(!SLUG_REGEX.is_match("điện-thoại")); // diacritics
    }

    #[test]
    fn test_field_errors_uses_message_or_code() {
        let probe = Probe {
            title: String::new(),
            quantity: 0,
        };
        let errors = probe.validate().unwrap_err();

        let fields = field_errors(&errors);

        assert_eq!(fields["title"], vec!["bắt buộc".to_string()]);
        assert_eq!(fields["quantity"], vec!["range".to_string()]);
    }

    #[test]
    fn test_validated_maps_to_app_error() {
        let probe = Probe {
            title: String::new(),
            quantity: 2,
        };

        match validated(probe) {
            Err(AppError::Validation(fields)) => {
                assert!(fields.contains_key("title"));
                assert!(!fields.contains_key("quantity"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
