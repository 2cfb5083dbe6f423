use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for category, with its derived product count
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub product_count: i64,
}

/// Parent link of a category, enough to reason about the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct CategoryLink {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
}
