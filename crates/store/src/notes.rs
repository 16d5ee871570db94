//! Notes and note categories.

use uuid::Uuid;

use api_types::note::{
    NoteCategoryInsert, NoteCategoryPatch, NoteCategoryRow, NoteInsert, NotePatch, NoteRow,
};

use crate::{
    StoreError,
    collection::Collection,
    counts,
    error::ResultStore,
    gateway::TableGateway,
    records::{Note, NoteCategory},
};

/// Local reflected store for the notes view: the full note collection plus
/// its category registry.
#[derive(Debug, Default)]
pub struct Notebook {
    user_id: Uuid,
    pub notes: Collection<Note>,
    pub categories: Collection<NoteCategory>,
}

impl Notebook {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            notes: Collection::new(),
            categories: Collection::new(),
        }
    }

    /// Replace both collections with fresh remote reads. Notes come back
    /// newest-first, categories by name.
    pub async fn refetch<G: TableGateway>(&mut self, gateway: &G) -> ResultStore<()> {
        let notes: Vec<NoteRow> = gateway.select_all().await?;
        let categories: Vec<NoteCategoryRow> = gateway.select_all().await?;
        self.notes
            .replace_all(notes.into_iter().map(Note::from).collect());
        self.categories
            .replace_all(categories.into_iter().map(NoteCategory::from).collect());
        Ok(())
    }

    pub async fn create_note<G: TableGateway>(
        &mut self,
        gateway: &G,
        title: &str,
        content: &str,
        category_id: Option<Uuid>,
    ) -> ResultStore<Uuid> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::Validation("Note title is required".to_string()));
        }
        let row: NoteRow = gateway
            .insert(&NoteInsert {
                title: title.to_string(),
                content: non_empty(content),
                note_category_id: category_id,
                user_id: self.user_id,
            })
            .await?;
        let id = row.id;
        self.notes.merge(Note::from(row));
        Ok(id)
    }

    pub async fn update_note<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
        title: &str,
        content: &str,
        category_id: Option<Uuid>,
    ) -> ResultStore<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::Validation("Note title is required".to_string()));
        }
        let row: NoteRow = gateway
            .update(
                id,
                &NotePatch {
                    title: title.to_string(),
                    content: non_empty(content),
                    note_category_id: category_id,
                },
            )
            .await?;
        self.notes.merge(Note::from(row));
        Ok(())
    }

    /// Notes are deleted unconditionally; nothing references them.
    pub async fn delete_note<G: TableGateway>(&mut self, gateway: &G, id: Uuid) -> ResultStore<()> {
        gateway.delete::<NoteRow>(id).await?;
        self.notes.remove(id);
        Ok(())
    }

    pub async fn create_category<G: TableGateway>(
        &mut self,
        gateway: &G,
        name: &str,
    ) -> ResultStore<Uuid> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation(
                "Category name is required".to_string(),
            ));
        }
        let row: NoteCategoryRow = gateway
            .insert(&NoteCategoryInsert {
                name: name.to_string(),
                user_id: self.user_id,
            })
            .await?;
        let id = row.id;
        self.categories.merge(NoteCategory::from(row));
        Ok(id)
    }

    pub async fn rename_category<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
        name: &str,
    ) -> ResultStore<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation(
                "Category name is required".to_string(),
            ));
        }
        let row: NoteCategoryRow = gateway
            .update(
                id,
                &NoteCategoryPatch {
                    name: name.to_string(),
                },
            )
            .await?;
        self.categories.merge(NoteCategory::from(row));
        Ok(())
    }

    /// Refused while any note still references the category. The check runs
    /// against the in-memory note collection, so it is subject to the usual
    /// cross-session race.
    pub async fn delete_category<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
    ) -> ResultStore<()> {
        if counts::notes_in_category(self.notes.items(), id) > 0 {
            return Err(StoreError::InUse {
                entity: "category",
                dependents: "notes",
            });
        }
        gateway.delete::<NoteCategoryRow>(id).await?;
        self.categories.remove(id);
        Ok(())
    }

    pub fn category_name(&self, id: Option<Uuid>) -> &str {
        id.and_then(|id| self.categories.get(id))
            .map(|category| category.name.as_str())
            .unwrap_or("Uncategorized")
    }

    pub fn notes_in_category(&self, id: Uuid) -> usize {
        counts::notes_in_category(self.notes.items(), id)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
