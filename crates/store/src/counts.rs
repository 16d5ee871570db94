//! Derived per-category resource counts.
//!
//! Counts are always recomputed from the canonical resource collection in a
//! single pass. There is deliberately no incremental ±1 path: recomputation
//! is O(n) over a small user-scoped collection and cannot drift from the
//! local truth.

use uuid::Uuid;

use crate::records::{Category, Note, Resource};

/// Recompute `Category.count` for every category from scratch.
pub fn recount(categories: &mut [Category], resources: &[Resource]) {
    for category in categories.iter_mut() {
        category.count = resources
            .iter()
            .filter(|resource| resource.category_id == category.id)
            .count();
    }
}

/// Number of resources referencing the given category.
pub fn resources_in_category(resources: &[Resource], category_id: Uuid) -> usize {
    resources
        .iter()
        .filter(|resource| resource.category_id == category_id)
        .count()
}

/// Number of resources referencing the given subcategory.
pub fn resources_in_subcategory(resources: &[Resource], subcategory_id: Uuid) -> usize {
    resources
        .iter()
        .filter(|resource| resource.subcategory_id == Some(subcategory_id))
        .count()
}

/// Number of notes referencing the given note category.
pub fn notes_in_category(notes: &[Note], category_id: Uuid) -> usize {
    notes
        .iter()
        .filter(|note| note.category_id == Some(category_id))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::ResourceKind;
    use chrono::Utc;

    fn resource(category_id: Uuid) -> Resource {
        Resource {
            id: Uuid::new_v4(),
            title: "Algebra cheat sheet".to_string(),
            kind: ResourceKind::Document,
            category_id,
            subcategory_id: None,
            url: None,
            description: None,
            file_path: Some("files/algebra.pdf".to_string()),
            file_size: Some(2048),
            file_type: Some("application/pdf".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn recount_covers_empty_and_populated_categories() {
        let math = Uuid::new_v4();
        let physics = Uuid::new_v4();
        let mut categories = vec![
            Category {
                id: math,
                name: "Math".to_string(),
                count: 99,
            },
            Category {
                id: physics,
                name: "Physics".to_string(),
                count: 99,
            },
        ];
        let resources = vec![resource(math), resource(math)];

        recount(&mut categories, &resources);
        assert_eq!(categories[0].count, 2);
        assert_eq!(categories[1].count, 0);
    }
}
