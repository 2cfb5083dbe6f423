use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryResponseDto, CategoryTreeDto, SaveCategoryDto};
use crate::features::categories::lookup::{self, HierarchyError};
use crate::features::categories::models::{Category, CategoryLink};

const SELECT_CATEGORIES: &str = r#"
    SELECT c.id, c.parent_id, c.name, c.slug, c.image_url, c.display_order, c.is_active,
           c.created_at, c.updated_at,
           (SELECT COUNT(*) FROM products p WHERE p.category_id = c.id) AS product_count
    FROM categories c
    WHERE $1 OR c.is_active = TRUE
    ORDER BY c.display_order, c.name
"#;

/// Which categories a read should see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CategoryScope {
    /// Public reads
    Active,
    /// Admin write responses; a category saved as inactive is still returned
    All,
}

impl CategoryScope {
    fn include_inactive(self) -> bool {
        self == CategoryScope::All
    }
}

/// Scope used to answer create/update
const WRITE_RESPONSE_SCOPE: CategoryScope = CategoryScope::All;

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load(&self, scope: CategoryScope) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(SELECT_CATEGORIES)
            .bind(scope.include_inactive())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn load_active(&self) -> Result<Vec<Category>> {
        self.load(CategoryScope::Active).await
    }

    /// List all active categories (flat list)
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.load_active().await?;
        Ok(CategoryResponseDto::list_from_flat(&categories))
    }

    /// List all active categories as tree structure
    pub async fn list_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let categories = self.load_active().await?;
        Ok(CategoryTreeDto::build_tree(&categories))
    }

    /// Get category by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryResponseDto> {
        let categories = self.load_active().await?;

        categories
            .iter()
            .find(|c| c.slug == slug)
            .map(|c| CategoryResponseDto::from_flat(c, &categories))
            .ok_or_else(|| AppError::NotFound(format!("Không tìm thấy danh mục '{}'", slug)))
    }

    /// Get category by id from the active tree.
    ///
    /// Searches nested children too unless `top_level` is set.
    pub async fn get_by_id(&self, id: Uuid, top_level: bool) -> Result<CategoryTreeDto> {
        let tree = self.list_tree().await?;

        let found = if top_level {
            lookup::find_top_level(&tree, id)
        } else {
            lookup::find_category_by_id(&tree, id)
        };

        found.cloned().ok_or_else(|| not_found(id))
    }

    async fn get_response(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let categories = self.load(WRITE_RESPONSE_SCOPE).await?;
        response_for(&categories, id)
    }

    /// Lock every category row and return the parent links.
    ///
    /// Hierarchy changes run inside this lock so two concurrent moves cannot
    /// jointly create a cycle.
    async fn lock_links(tx: &mut Transaction<'_, Postgres>) -> Result<Vec<CategoryLink>> {
        sqlx::query_as::<_, CategoryLink>("SELECT id, parent_id FROM categories FOR UPDATE")
            .fetch_all(&mut **tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to lock categories: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Create a category
    pub async fn create(&self, dto: SaveCategoryDto) -> Result<CategoryResponseDto> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        let links = Self::lock_links(&mut tx).await?;
        ensure_valid_parent(&links, id, dto.parent_id)?;

        sqlx::query(
            r#"
            INSERT INTO categories (id, parent_id, name, slug, image_url, display_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(dto.parent_id)
        .bind(&dto.name)
        .bind(&dto.slug)
        .bind(dto.image.as_deref())
        .bind(dto.display_order.unwrap_or(0))
        .bind(dto.is_active.unwrap_or(true))
        .execute(&mut *tx)
        .await
        .map_err(|e| slug_conflict(e, &dto.slug))?;

        tx.commit().await?;

        tracing::info!(
            "Category created: id={}, slug={}, parent_id={:?}",
            id,
            dto.slug,
            dto.parent_id
        );

        self.get_response(id).await
    }

    /// Replace a category's editable fields
    pub async fn update(&self, id: Uuid, dto: SaveCategoryDto) -> Result<CategoryResponseDto> {
        let mut tx = self.pool.begin().await?;

        let links = Self::lock_links(&mut tx).await?;
        ensure_known(&links, id)?;
        ensure_valid_parent(&links, id, dto.parent_id)?;

        sqlx::query(
            r#"
            UPDATE categories
            SET parent_id = $2, name = $3, slug = $4, image_url = $5,
                display_order = $6, is_active = $7, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(dto.parent_id)
        .bind(&dto.name)
        .bind(&dto.slug)
        .bind(dto.image.as_deref())
        .bind(dto.display_order.unwrap_or(0))
        .bind(dto.is_active.unwrap_or(true))
        .execute(&mut *tx)
        .await
        .map_err(|e| slug_conflict(e, &dto.slug))?;

        tx.commit().await?;

        tracing::info!("Category updated: id={}, slug={}", id, dto.slug);

        self.get_response(id).await
    }

    /// Delete a category that has no child categories.
    ///
    /// Products keep existing; the foreign key clears their category.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let links = Self::lock_links(&mut tx).await?;
        ensure_known(&links, id)?;
        ensure_childless(&links, id)?;

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category: {:?}", e);
                AppError::Database(e)
            })?;

        tx.commit().await?;

        tracing::info!("Category deleted: id={}", id);
        Ok(())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Không tìm thấy danh mục {}", id))
}

/// Build the response for `id` with parent and children resolved from `categories`
fn response_for(categories: &[Category], id: Uuid) -> Result<CategoryResponseDto> {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| CategoryResponseDto::from_flat(c, categories))
        .ok_or_else(|| not_found(id))
}

fn ensure_known(links: &[CategoryLink], id: Uuid) -> Result<()> {
    if lookup::contains(links, id) {
        Ok(())
    } else {
        Err(not_found(id))
    }
}

fn ensure_valid_parent(links: &[CategoryLink], id: Uuid, parent_id: Option<Uuid>) -> Result<()> {
    lookup::validate_parent(links, id, parent_id).map_err(hierarchy_error)
}

/// Categories with children cannot be deleted
fn ensure_childless(links: &[CategoryLink], id: Uuid) -> Result<()> {
    match lookup::child_count(links, id) {
        0 => Ok(()),
        children => Err(AppError::Conflict(format!(
            "Danh mục còn {} danh mục con, hãy xoá hoặc chuyển chúng trước",
            children
        ))),
    }
}

fn hierarchy_error(e: HierarchyError) -> AppError {
    match e {
        HierarchyError::UnknownParent(parent_id) => {
            AppError::BadRequest(format!("Danh mục cha {} không tồn tại", parent_id))
        }
        HierarchyError::Cycle { .. } => AppError::Conflict(
            "Không thể đặt danh mục dưới chính nó hoặc danh mục con của nó".to_string(),
        ),
    }
}

fn slug_conflict(e: sqlx::Error, slug: &str) -> AppError {
    tracing::error!("Failed to save category '{}': {:?}", slug, e);
    AppError::from_unique_violation(e, format!("Slug '{}' đã được sử dụng", slug))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::unique_violation;
    use chrono::Utc;

    fn link(id: Uuid, parent_id: Option<Uuid>) -> CategoryLink {
        CategoryLink { id, parent_id }
    }

    fn category(slug: &str, parent_id: Option<Uuid>, is_active: bool) -> Category {
        Category {
            id: Uuid::new_v4(),
            parent_id,
            name: slug.to_string(),
            slug: slug.to_string(),
            image_url: None,
            display_order: 0,
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            product_count: 0,
        }
    }

    #[test]
    fn test_hierarchy_errors_map_to_http_errors() {
        let parent = Uuid::new_v4();

        assert!(matches!(
            hierarchy_error(HierarchyError::UnknownParent(parent)),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            hierarchy_error(HierarchyError::Cycle {
                category: Uuid::new_v4(),
                parent
            }),
            AppError::Conflict(_)
        ));
    }

    #[test]
    fn test_write_responses_include_inactive_categories() {
        assert!(WRITE_RESPONSE_SCOPE.include_inactive());
        assert!(!CategoryScope::Active.include_inactive());

        let parent = category("thoi-trang", None, true);
        let hidden = category("giay-cu", Some(parent.id), false);
        let categories = vec![parent.clone(), hidden.clone()];

        let response = response_for(&categories, hidden.id).unwrap();
        assert_eq!(response.slug, "giay-cu");
        assert_eq!(response.parent.unwrap().id, parent.id);

        // The parent still lists its inactive child in an admin response
        let parent_response = response_for(&categories, parent.id).unwrap();
        assert_eq!(parent_response.children.len(), 1);
    }

    #[test]
    fn test_response_for_unknown_id_is_not_found() {
        let categories = vec![category("sach", None, true)];
        assert!(matches!(
            response_for(&categories, Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_of_unknown_category_is_not_found() {
        let links = vec![link(Uuid::new_v4(), None)];
        assert!(matches!(
            ensure_known(&links, Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
        assert!(ensure_known(&links, links[0].id).is_ok());
    }

    #[test]
    fn test_update_under_own_descendant_is_conflict() {
        let root = Uuid::new_v4();
        let child = Uuid::new_v4();
        let grandchild = Uuid::new_v4();
        let links = vec![
            link(root, None),
            link(child, Some(root)),
            link(grandchild, Some(child)),
        ];

        assert!(matches!(
            ensure_valid_parent(&links, root, Some(grandchild)),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            ensure_valid_parent(&links, child, Some(child)),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            ensure_valid_parent(&links, child, Some(Uuid::new_v4())),
            Err(AppError::BadRequest(_))
        ));
        assert!(ensure_valid_parent(&links, grandchild, Some(root)).is_ok());
    }

    #[test]
    fn test_delete_with_children_is_conflict() {
        let root = Uuid::new_v4();
        let leaf = Uuid::new_v4();
        let links = vec![link(root, None), link(leaf, Some(root))];

        assert!(matches!(
            ensure_childless(&links, root),
            Err(AppError::Conflict(_))
        ));
        assert!(ensure_childless(&links, leaf).is_ok());
    }

    #[test]
    fn test_duplicate_slug_is_conflict() {
        assert!(matches!(
            slug_conflict(unique_violation(), "ao-thun"),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            slug_conflict(sqlx::Error::RowNotFound, "ao-thun"),
            AppError::Database(_)
        ));
    }
}
