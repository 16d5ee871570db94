//! Notes section: list, search, note dialog and category management.

use uuid::Uuid;

use store::notes::Notebook;
use store::records::{Note, NoteCategory};
use store::{DialogState, SortOrder, ViewFilter, project};

use crate::error::Result;
use crate::ui::keymap::AppAction;

use super::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    Title,
    Content,
    Category,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteForm {
    pub id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub category_id: Option<Uuid>,
    pub focus: NoteField,
}

impl NoteForm {
    fn create() -> Self {
        Self {
            id: None,
            title: String::new(),
            content: String::new(),
            category_id: None,
            focus: NoteField::Title,
        }
    }

    fn edit(note: &Note) -> Self {
        Self {
            id: Some(note.id),
            title: note.title.clone(),
            content: note.content.clone().unwrap_or_default(),
            category_id: note.category_id,
            focus: NoteField::Title,
        }
    }

    fn text_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            NoteField::Title => Some(&mut self.title),
            NoteField::Content => Some(&mut self.content),
            NoteField::Category => None,
        }
    }

    fn next_focus(&mut self) {
        self.focus = match self.focus {
            NoteField::Title => NoteField::Content,
            NoteField::Content => NoteField::Category,
            NoteField::Category => NoteField::Title,
        };
    }

    fn cycle_category(&mut self, categories: &[NoteCategory], forward: bool) {
        self.category_id = cycle_option(self.category_id, categories.iter().map(|c| c.id), forward);
    }
}

/// Name dialog shared by category create and rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryForm {
    pub id: Option<Uuid>,
    pub name: String,
}

#[derive(Debug)]
pub struct NotesState {
    pub store: Notebook,
    pub selected: usize,
    pub filter: ViewFilter,
    pub sort: SortOrder,
    pub search_active: bool,
    pub dialog: DialogState<NoteForm>,
    pub category_dialog: DialogState<CategoryForm>,
}

impl NotesState {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            store: Notebook::new(user_id),
            selected: 0,
            filter: ViewFilter::default(),
            sort: SortOrder::default(),
            search_active: false,
            dialog: DialogState::default(),
            category_dialog: DialogState::default(),
        }
    }

    pub fn visible(&self) -> Vec<&Note> {
        project(self.store.notes.items(), &self.filter, self.sort)
    }

    pub fn editing(&self) -> bool {
        self.search_active || self.dialog.is_open() || self.category_dialog.is_open()
    }

    fn selected_id(&self) -> Option<Uuid> {
        self.visible().get(self.selected).map(|note| note.id)
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn cycle_category_filter(&mut self) {
        self.filter.category = cycle_option(
            self.filter.category,
            self.store.categories.iter().map(|c| c.id),
            true,
        );
        self.clamp_selection();
    }
}

impl App {
    pub(crate) async fn notes_key(&mut self, action: AppAction) -> Result<()> {
        if self.state.notes.category_dialog.is_open() {
            self.notes_category_dialog_key(action).await;
            return Ok(());
        }
        if self.state.notes.dialog.is_open() {
            self.notes_dialog_key(action).await;
            return Ok(());
        }
        if self.state.notes.search_active {
            let notes = &mut self.state.notes;
            match action {
                AppAction::Input(ch) => {
                    notes.filter.search.push(ch);
                    notes.clamp_selection();
                }
                AppAction::Backspace => {
                    notes.filter.search.pop();
                }
                AppAction::Submit | AppAction::Cancel => notes.search_active = false,
                _ => {}
            }
            return Ok(());
        }

        match action {
            AppAction::Up => self.state.notes.select_prev(),
            AppAction::Down => self.state.notes.select_next(),
            AppAction::Input(ch) => match ch {
                'j' => self.state.notes.select_next(),
                'k' => self.state.notes.select_prev(),
                'n' => self.state.notes.dialog.open(NoteForm::create()),
                'e' => {
                    if let Some(id) = self.state.notes.selected_id()
                        && let Some(note) = self.state.notes.store.notes.get(id)
                    {
                        let form = NoteForm::edit(note);
                        self.state.notes.dialog.open(form);
                    }
                }
                'd' => self.delete_note().await,
                '/' => {
                    self.state.notes.filter.search.clear();
                    self.state.notes.search_active = true;
                }
                'o' => self.state.notes.sort = self.state.notes.sort.next(),
                'f' => self.state.notes.cycle_category_filter(),
                'c' => self.state.notes.category_dialog.open(CategoryForm {
                    id: None,
                    name: String::new(),
                }),
                'm' => {
                    if let Some(id) = self.state.notes.filter.category
                        && let Some(category) = self.state.notes.store.categories.get(id)
                    {
                        let form = CategoryForm {
                            id: Some(id),
                            name: category.name.clone(),
                        };
                        self.state.notes.category_dialog.open(form);
                    }
                }
                'x' => self.delete_note_category().await,
                _ => {}
            },
            _ => {}
        }
        Ok(())
    }

    async fn notes_dialog_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.notes.dialog.close(),
            AppAction::NextField => {
                if let Some(form) = self.state.notes.dialog.form_mut() {
                    form.next_focus();
                }
            }
            AppAction::Up | AppAction::Down => {
                let notes = &mut self.state.notes;
                if let Some(form) = notes.dialog.form_mut()
                    && form.focus == NoteField::Category
                {
                    form.cycle_category(
                        notes.store.categories.items(),
                        action == AppAction::Down,
                    );
                }
            }
            AppAction::Backspace => {
                if let Some(form) = self.state.notes.dialog.form_mut()
                    && let Some(field) = form.text_field_mut()
                {
                    field.pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(form) = self.state.notes.dialog.form_mut()
                    && let Some(field) = form.text_field_mut()
                {
                    field.push(ch);
                }
            }
            AppAction::Submit => self.submit_note().await,
            _ => {}
        }
    }

    async fn submit_note(&mut self) {
        let Some(form) = self.state.notes.dialog.begin_submit() else {
            return;
        };
        let result = match form.id {
            Some(id) => self
                .state
                .notes
                .store
                .update_note(&self.gateway, id, &form.title, &form.content, form.category_id)
                .await
                .map(|_| "Note updated"),
            None => self
                .state
                .notes
                .store
                .create_note(&self.gateway, &form.title, &form.content, form.category_id)
                .await
                .map(|_| "Note created"),
        };
        match result {
            Ok(message) => {
                self.state.notes.dialog.resolve(Ok(()));
                self.state.notes.clamp_selection();
                self.toast_success(message);
            }
            Err(err) => self.state.notes.dialog.resolve(Err(err.to_string())),
        }
    }

    async fn notes_category_dialog_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.notes.category_dialog.close(),
            AppAction::Backspace => {
                if let Some(form) = self.state.notes.category_dialog.form_mut() {
                    form.name.pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(form) = self.state.notes.category_dialog.form_mut() {
                    form.name.push(ch);
                }
            }
            AppAction::Submit => self.submit_note_category().await,
            _ => {}
        }
    }

    async fn submit_note_category(&mut self) {
        let Some(form) = self.state.notes.category_dialog.begin_submit() else {
            return;
        };
        let result = match form.id {
            Some(id) => self
                .state
                .notes
                .store
                .rename_category(&self.gateway, id, &form.name)
                .await
                .map(|_| "Category renamed"),
            None => self
                .state
                .notes
                .store
                .create_category(&self.gateway, &form.name)
                .await
                .map(|_| "Category created"),
        };
        match result {
            Ok(message) => {
                self.state.notes.category_dialog.resolve(Ok(()));
                self.toast_success(message);
            }
            Err(err) => self.state.notes.category_dialog.resolve(Err(err.to_string())),
        }
    }

    async fn delete_note(&mut self) {
        let Some(id) = self.state.notes.selected_id() else {
            return;
        };
        match self.state.notes.store.delete_note(&self.gateway, id).await {
            Ok(()) => {
                self.state.notes.clamp_selection();
                self.toast_success("Note deleted");
            }
            Err(err) => self.toast_error(err.to_string()),
        }
    }

    async fn delete_note_category(&mut self) {
        let Some(id) = self.state.notes.filter.category else {
            return;
        };
        match self
            .state
            .notes
            .store
            .delete_category(&self.gateway, id)
            .await
        {
            Ok(()) => {
                self.state.notes.filter.category = None;
                self.toast_success("Category deleted");
            }
            Err(err) => self.toast_error(err.to_string()),
        }
    }
}

/// Step an optional selection through `None -> a -> b -> ... -> None`.
pub(crate) fn cycle_option<I>(current: Option<Uuid>, options: I, forward: bool) -> Option<Uuid>
where
    I: Iterator<Item = Uuid>,
{
    let ids: Vec<Uuid> = options.collect();
    if ids.is_empty() {
        return None;
    }
    let position = current.and_then(|id| ids.iter().position(|other| *other == id));
    if forward {
        match position {
            None => Some(ids[0]),
            Some(index) if index + 1 < ids.len() => Some(ids[index + 1]),
            Some(_) => None,
        }
    } else {
        match position {
            None => Some(ids[ids.len() - 1]),
            Some(0) => None,
            Some(index) => Some(ids[index - 1]),
        }
    }
}
