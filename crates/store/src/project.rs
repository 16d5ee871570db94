//! View projection: pure filter + sort over an in-memory collection.
//!
//! Recomputed from scratch on every render; there is no memoized state to
//! invalidate. Filtering is conjunctive, empty search text matches all
//! records, and each sort order is total and stable.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Fields the projection reads from a record.
pub trait Projectable {
    fn title(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;

    fn description(&self) -> Option<&str> {
        None
    }
    fn category_id(&self) -> Option<Uuid> {
        None
    }
    fn subcategory_id(&self) -> Option<Uuid> {
        None
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Alphabetical,
}

impl SortOrder {
    pub fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest",
            Self::Oldest => "Oldest",
            Self::Alphabetical => "A-Z",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::Alphabetical,
            Self::Alphabetical => Self::Newest,
        }
    }
}

/// Transient view state driving the projection.
#[derive(Clone, Debug, Default)]
pub struct ViewFilter {
    pub category: Option<Uuid>,
    pub subcategory: Option<Uuid>,
    pub search: String,
}

impl ViewFilter {
    pub fn matches<T: Projectable>(&self, item: &T) -> bool {
        if let Some(category) = self.category
            && item.category_id() != Some(category)
        {
            return false;
        }
        if let Some(subcategory) = self.subcategory
            && item.subcategory_id() != Some(subcategory)
        {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        item.title().to_lowercase().contains(&needle)
            || item
                .description()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
    }
}

/// Produce the display list: the items satisfying the filter, in the order
/// dictated by the sort key.
pub fn project<'a, T: Projectable>(
    items: &'a [T],
    filter: &ViewFilter,
    sort: SortOrder,
) -> Vec<&'a T> {
    let mut out: Vec<&T> = items.iter().filter(|item| filter.matches(*item)).collect();
    match sort {
        SortOrder::Newest => out.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        SortOrder::Oldest => out.sort_by(|a, b| a.created_at().cmp(&b.created_at())),
        SortOrder::Alphabetical => {
            out.sort_by(|a, b| a.title().to_lowercase().cmp(&b.title().to_lowercase()))
        }
    }
    out
}

mod impls {
    use super::Projectable;
    use crate::records::{FocusSession, Goal, Note, Resource, Student, Task};
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    impl Projectable for Note {
        fn title(&self) -> &str {
            &self.title
        }
        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
        fn description(&self) -> Option<&str> {
            self.content.as_deref()
        }
        fn category_id(&self) -> Option<Uuid> {
            self.category_id
        }
    }

    impl Projectable for Resource {
        fn title(&self) -> &str {
            &self.title
        }
        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
        fn description(&self) -> Option<&str> {
            self.description.as_deref()
        }
        fn category_id(&self) -> Option<Uuid> {
            Some(self.category_id)
        }
        fn subcategory_id(&self) -> Option<Uuid> {
            self.subcategory_id
        }
    }

    impl Projectable for Task {
        fn title(&self) -> &str {
            &self.title
        }
        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
        fn description(&self) -> Option<&str> {
            self.description.as_deref()
        }
    }

    impl Projectable for Goal {
        fn title(&self) -> &str {
            &self.title
        }
        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
        fn description(&self) -> Option<&str> {
            self.description.as_deref()
        }
    }

    impl Projectable for Student {
        fn title(&self) -> &str {
            &self.name
        }
        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
        fn description(&self) -> Option<&str> {
            self.notes.as_deref()
        }
    }

    impl Projectable for FocusSession {
        fn title(&self) -> &str {
            self.notes.as_deref().unwrap_or("")
        }
        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
    }
}
