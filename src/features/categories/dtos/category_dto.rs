use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;

/// Minimal reference to a category (parent or child)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategorySummaryDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<&Category> for CategorySummaryDto {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            slug: c.slug.clone(),
        }
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub parent: Option<CategorySummaryDto>,
    pub children: Vec<CategorySummaryDto>,
    pub display_order: i32,
    pub product_count: i64,
}

impl CategoryResponseDto {
    /// Build the response for `category`, resolving its parent and children
    /// from the same flat list so both directions agree.
    pub fn from_flat(category: &Category, all_categories: &[Category]) -> Self {
        let parent = category.parent_id.and_then(|parent_id| {
            all_categories
                .iter()
                .find(|c| c.id == parent_id)
                .map(CategorySummaryDto::from)
        });

        let children = all_categories
            .iter()
            .filter(|c| c.parent_id == Some(category.id))
            .map(CategorySummaryDto::from)
            .collect();

        Self {
            id: category.id,
            name: category.name.clone(),
            slug: category.slug.clone(),
            image: category.image_url.clone(),
            parent,
            children,
            display_order: category.display_order,
            product_count: category.product_count,
        }
    }

    pub fn list_from_flat(categories: &[Category]) -> Vec<Self> {
        categories
            .iter()
            .map(|c| Self::from_flat(c, categories))
            .collect()
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub display_order: i32,
    pub product_count: i64,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Build tree from flat list of categories.
    ///
    /// Categories whose parent is not in the list (e.g. an inactive parent)
    /// are promoted to roots.
    pub fn build_tree(categories: &[Category]) -> Vec<CategoryTreeDto> {
        let known: HashSet<Uuid> = categories.iter().map(|c| c.id).collect();

        categories
            .iter()
            .filter(|c| !c.parent_id.is_some_and(|parent_id| known.contains(&parent_id)))
            .map(|root| Self::build_node(root, categories))
            .collect()
    }

    fn build_node(category: &Category, all_categories: &[Category]) -> CategoryTreeDto {
        let children: Vec<CategoryTreeDto> = all_categories
            .iter()
            .filter(|c| c.parent_id == Some(category.id))
            .map(|child| Self::build_node(child, all_categories))
            .collect();

        CategoryTreeDto {
            id: category.id,
            parent_id: category.parent_id,
            name: category.name.clone(),
            slug: category.slug.clone(),
            image: category.image_url.clone(),
            display_order: category.display_order,
            product_count: category.product_count,
            children,
        }
    }
}

/// Request DTO for creating or replacing a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveCategoryDto {
    #[validate(length(min = 1, max = 255, message = "Tên danh mục phải từ 1 đến 255 ký tự"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 255, message = "Slug phải từ 1 đến 255 ký tự"),
        regex(
            path = "*crate::shared::validation::SLUG_REGEX",
            message = "Slug chỉ gồm chữ thường, số và dấu gạch ngang"
        ),
        custom(
            function = "crate::shared::validation::validate_category_slug",
            message = "Slug này đã được hệ thống sử dụng"
        )
    )]
    pub slug: String,

    #[validate(url(message = "Ảnh phải là một URL hợp lệ"))]
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub parent_id: Option<Uuid>,

    #[serde(default)]
    pub display_order: Option<i32>,

    #[serde(default)]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(name: &str, parent_id: Option<Uuid>) -> Category {
        Category {
            id: Uuid::new_v4(),
            parent_id,
            name: name.to_string(),
            slug: name.to_lowercase(),
            image_url: None,
            display_order: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            product_count: 0,
        }
    }

    #[test]
    fn test_build_tree_nests_children() {
        let electronics = category("Electronics", None);
        let phones = category("Phones", Some(electronics.id));
        let cases = category("Cases", Some(phones.id));
        let books = category("Books", None);
        let all = vec![electronics.clone(), phones.clone(), cases.clone(), books.clone()];

        let tree = CategoryTreeDto::build_tree(&all);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].id, electronics.id);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].id, phones.id);
        assert_eq!(tree[0].children[0].children[0].id, cases.id);
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn test_build_tree_children_point_back_to_parent() {
        let root = category("Root", None);
        let a = category("A", Some(root.id));
        let b = category("B", Some(root.id));
        let a1 = category("A1", Some(a.id));
        let all = vec![root, a, b, a1];

        fn check(node: &CategoryTreeDto) {
            for child in &node.children {
                assert_eq!(child.parent_id, Some(node.id));
                check(child);
            }
        }

        for root in CategoryTreeDto::build_tree(&all) {
            check(&root);
        }
    }

    #[test]
    fn test_build_tree_promotes_orphans() {
        let orphan = category("Orphan", Some(Uuid::new_v4()));

        let tree = CategoryTreeDto::build_tree(std::slice::from_ref(&orphan));

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, orphan.id);
    }

    #[test]
    fn test_from_flat_resolves_parent_and_children() {
        let parent = category("Fashion", None);
        let child = category("Shoes", Some(parent.id));
        let all = vec![parent.clone(), child.clone()];

        let parent_dto = CategoryResponseDto::from_flat(&parent, &all);
        let child_dto = CategoryResponseDto::from_flat(&child, &all);

        assert!(parent_dto.parent.is_none());
        assert_eq!(parent_dto.children, vec![CategorySummaryDto::from(&child)]);
        assert_eq!(child_dto.parent, Some(CategorySummaryDto::from(&parent)));
        assert!(child_dto.children.is_empty());
    }

    #[test]
    fn test_save_category_validation() {
        let valid = SaveCategoryDto {
            name: "Điện thoại".to_string(),
            slug: "dien-thoai".to_string(),
            image: Some("https://cdn.example.com/phone.png".to_string()),
            parent_id: None,
            display_order: None,
            is_active: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = SaveCategoryDto {
            slug: "Điện Thoại".to_string(),
            image: Some("not a url".to_string()),
            ..valid
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("slug"));
        assert!(fields.contains_key("image"));
    }
}
