//! In-memory copy of one remote table.
//!
//! A collection is only ever changed two ways: `replace_all` after a full
//! refetch, or a merge/remove applied after a remote write succeeded. A
//! failed write leaves it untouched.

use uuid::Uuid;

use crate::records::Record;

#[derive(Clone, Debug)]
pub struct Collection<T> {
    items: Vec<T>,
}

// Not derived: that would bound `T: Default`, and record types carry no
// meaningful default. An empty collection needs no such bound.
impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Replace the whole collection with the result of a refetch. The remote
    /// read supplies the ordering; it is preserved as-is.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Merge a row returned by an insert or update: replaces the matching
    /// record in place, or appends when the id is new.
    pub fn merge(&mut self, record: T) {
        match self.items.iter_mut().find(|item| item.id() == record.id()) {
            Some(slot) => *slot = record,
            None => self.items.push(record),
        }
    }

    /// Remove the record with the given id, returning it if present.
    pub fn remove(&mut self, id: Uuid) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::NoteCategory;

    fn category(name: &str) -> NoteCategory {
        NoteCategory {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    #[test]
    fn merge_replaces_existing_and_appends_new() {
        let mut collection = Collection::new();
        let first = category("Math");
        collection.merge(first.clone());
        collection.merge(category("Physics"));
        assert_eq!(collection.len(), 2);

        let renamed = NoteCategory {
            id: first.id,
            name: "Maths".to_string(),
        };
        collection.merge(renamed);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(first.id).map(|c| c.name.as_str()), Some("Maths"));
    }

    #[test]
    fn default_is_empty_even_for_records_without_default() {
        // `Note` implements no `Default` of its own.
        let collection: Collection<crate::records::Note> = Collection::default();
        assert!(collection.is_empty());
    }

    #[test]
    fn remove_is_a_noop_for_unknown_ids() {
        let mut collection = Collection::new();
        collection.merge(category("Math"));
        assert!(collection.remove(Uuid::new_v4()).is_none());
        assert_eq!(collection.len(), 1);
    }
}
