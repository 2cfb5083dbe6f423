//! In-memory category lookup and hierarchy checks.
//!
//! Everything here works over already-loaded collections; the service decides
//! what to load and how to map the outcomes to HTTP errors.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use uuid::Uuid;

use crate::features::categories::dtos::CategoryTreeDto;
use crate::features::categories::models::CategoryLink;

/// Depth-first, pre-order search of the whole tree.
///
/// A node is checked before its children and siblings are visited in order,
/// so with duplicate ids the first one in that order wins.
pub fn find_category_by_id(categories: &[CategoryTreeDto], id: Uuid) -> Option<&CategoryTreeDto> {
    categories.iter().find_map(|category| {
        if category.id == id {
            Some(category)
        } else {
            find_category_by_id(&category.children, id)
        }
    })
}

/// Search the given level only, ignoring nested children.
pub fn find_top_level(categories: &[CategoryTreeDto], id: Uuid) -> Option<&CategoryTreeDto> {
    categories.iter().find(|category| category.id == id)
}

pub fn contains(links: &[CategoryLink], id: Uuid) -> bool {
    links.iter().any(|link| link.id == id)
}

/// Number of direct children of `id`
pub fn child_count(links: &[CategoryLink], id: Uuid) -> usize {
    links
        .iter()
        .filter(|link| link.parent_id == Some(id))
        .count()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("Parent category {0} does not exist")]
    UnknownParent(Uuid),

    #[error("Category {category} cannot be placed under {parent}: it would become its own ancestor")]
    Cycle { category: Uuid, parent: Uuid },
}

/// Check that `category_id` may hang under `parent_id`.
///
/// The parent must exist and must not be the category itself or one of its
/// descendants. `category_id` need not exist yet (creation).
pub fn validate_parent(
    links: &[CategoryLink],
    category_id: Uuid,
    parent_id: Option<Uuid>,
) -> Result<(), HierarchyError> {
    let Some(parent_id) = parent_id else {
        return Ok(());
    };

    let parents: HashMap<Uuid, Option<Uuid>> =
        links.iter().map(|link| (link.id, link.parent_id)).collect();

    if !parents.contains_key(&parent_id) {
        return Err(HierarchyError::UnknownParent(parent_id));
    }

    let cycle = HierarchyError::Cycle {
        category: category_id,
        parent: parent_id,
    };

    // Walk up from the proposed parent; meeting the category means a cycle
    let mut visited = HashSet::new();
    let mut current = Some(parent_id);
    while let Some(node) = current {
        if node == category_id || !visited.insert(node) {
            return Err(cycle);
        }
        current = parents.get(&node).copied().flatten();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: Uuid, children: Vec<CategoryTreeDto>) -> CategoryTreeDto {
        CategoryTreeDto {
            id,
            parent_id: None,
            name: format!("category-{}", id),
            slug: id.to_string(),
            image: None,
            display_order: 0,
            product_count: 0,
            children,
        }
    }

    fn link(id: Uuid, parent_id: Option<Uuid>) -> CategoryLink {
        CategoryLink { id, parent_id }
    }

    #[test]
    fn test_find_in_empty_collection() {
        assert!(find_category_by_id(&[], Uuid::new_v4()).is_none());
        assert!(find_top_level(&[], Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_find_every_existing_id() {
        let ids: Vec<Uuid> = (0..6).map(|_| Uuid::new_v4()).collect();
        let tree = vec![
            node(ids[0], vec![node(ids[1], vec![node(ids[2], vec![])])]),
            node(ids[3], vec![]),
            node(ids[4], vec![node(ids[5], vec![])]),
        ];

        for id in &ids {
            let found = find_category_by_id(&tree, *id).expect("id should be found");
            assert_eq!(found.id, *id);
        }
        assert!(find_category_by_id(&tree, Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_top_level_search_ignores_children() {
        let root = Uuid::new_v4();
        let child = Uuid::new_v4();
        let tree = vec![node(root, vec![node(child, vec![])])];

        assert!(find_top_level(&tree, root).is_some());
        assert!(find_top_level(&tree, child).is_none());
        assert!(find_category_by_id(&tree, child).is_some());
    }

    #[test]
    fn test_duplicate_ids_first_in_pre_order_wins() {
        let dup = Uuid::new_v4();
        let mut nested = node(dup, vec![]);
        nested.name = "nested".to_string();
        let mut sibling = node(dup, vec![]);
        sibling.name = "sibling".to_string();

        let tree = vec![node(Uuid::new_v4(), vec![nested]), sibling];

        assert_eq!(find_category_by_id(&tree, dup).unwrap().name, "nested");
        assert_eq!(find_top_level(&tree, dup).unwrap().name, "sibling");
    }

    #[test]
    fn test_child_count_counts_direct_children_only() {
        let root = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let links = vec![
            link(root, None),
            link(a, Some(root)),
            link(b, Some(root)),
            link(Uuid::new_v4(), Some(a)),
        ];

        assert_eq!(child_count(&links, root), 2);
        assert_eq!(child_count(&links, a), 1);
        assert_eq!(child_count(&links, b), 0);
        assert_eq!(child_count(&links, Uuid::new_v4()), 0);
        assert!(contains(&links, b));
        assert!(!contains(&links, Uuid::new_v4()));
    }

    #[test]
    fn test_validate_parent_accepts_root_and_valid_parent() {
        let root = Uuid::new_v4();
        let child = Uuid::new_v4();
        let links = vec![link(root, None), link(child, Some(root))];

        assert_eq!(validate_parent(&links, child, None), Ok(()));
        assert_eq!(validate_parent(&links, Uuid::new_v4(), Some(child)), Ok(()));
    }

    #[test]
    fn test_validate_parent_rejects_unknown_parent() {
        let missing = Uuid::new_v4();
        assert_eq!(
            validate_parent(&[], Uuid::new_v4(), Some(missing)),
            Err(HierarchyError::UnknownParent(missing))
        );
    }

    #[test]
    fn test_validate_parent_rejects_self_and_descendants() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let links = vec![link(a, None), link(b, Some(a)), link(c, Some(b))];

        assert!(matches!(
            validate_parent(&links, a, Some(a)),
            Err(HierarchyError::Cycle { .. })
        ));
        assert!(matches!(
            validate_parent(&links, a, Some(c)),
            Err(HierarchyError::Cycle { .. })
        ));
        // Moving c directly under a is fine
        assert_eq!(validate_parent(&links, c, Some(a)), Ok(()));
    }

    #[test]
    fn test_validate_parent_stops_on_corrupt_loop() {
        let x = Uuid::new_v4();
        let y = Uuid::new_v4();
        let links = vec![link(x, Some(y)), link(y, Some(x))];

        assert!(matches!(
            validate_parent(&links, Uuid::new_v4(), Some(x)),
            Err(HierarchyError::Cycle { .. })
        ));
    }
}
