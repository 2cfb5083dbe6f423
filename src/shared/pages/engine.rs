//! Template engine for storefront pages using Jinja2 syntax.
//!
//! Templates live in `templates/pages/` and are compiled into the binary, so
//! rendering never touches the filesystem at runtime. `.html` templates are
//! auto-escaped.

use minijinja::Environment;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static PAGE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Embedded templates as (name, source)
const TEMPLATES: &[(&str, &str)] = &[
    (
        "layout.html",
        include_str!("../../../templates/pages/layout.html"),
    ),
    (
        "not_found.html",
        include_str!("../../../templates/pages/not_found.html"),
    ),
    (
        "error.html",
        include_str!("../../../templates/pages/error.html"),
    ),
    (
        "order_detail.html",
        include_str!("../../../templates/pages/order_detail.html"),
    ),
    (
        "order_review.html",
        include_str!("../../../templates/pages/order_review.html"),
    ),
    (
        "category.html",
        include_str!("../../../templates/pages/category.html"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.add_filter("vnd", format_vnd);

    for &(name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    PAGE_ENV.get_or_init(init_environment)
}

/// Render a page template with a serializable context.
///
/// # Example
/// ```ignore
/// let html = render_page("not_found.html", &view)?;
/// ```
pub fn render_page<S: Serialize>(template_name: &str, ctx: S) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Check if a template exists
#[cfg(test)]
pub fn template_exists(template_name: &str) -> bool {
    get_environment().get_template(template_name).is_ok()
}

/// Format an amount in VND with dot thousands separators, e.g. `1.250.000 ₫`
pub fn format_vnd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-{} ₫", grouped)
    } else {
        format!("{} ₫", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_load() {
        for (name, _) in TEMPLATES {
            assert!(template_exists(name), "template {} failed to load", name);
        }
    }

    #[test]
    fn test_missing_template() {
        assert!(!template_exists("definitely_not_a_real_template.html"));
        assert!(matches!(
            render_page("nonexistent.html", context! {}),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_format_vnd() {
        assert_eq!(format_vnd(0), "0 ₫");
        assert_eq!(format_vnd(999), "999 ₫");
        assert_eq!(format_vnd(1_000), "1.000 ₫");
        assert_eq!(format_vnd(1_250_000), "1.250.000 ₫");
        assert_eq!(format_vnd(-45_000), "-45.000 ₫");
    }
}
