//! Server-rendered storefront pages.
//!
//! Views are plain serializable structs; the engine turns them into HTML.

pub mod engine;

pub use engine::{render_page, TemplateError};
