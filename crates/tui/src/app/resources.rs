//! Resources section: filterable library plus category and subcategory
//! management.

use uuid::Uuid;

use store::records::{Resource, ResourceKind};
use store::resources::{FileAttachment, ResourceDraft, ResourceLibrary};
use store::{DialogState, SortOrder, ViewFilter, project};

use crate::error::Result;
use crate::ui::keymap::AppAction;

use super::App;
use super::notes::{CategoryForm, cycle_option};

/// Lifetime of a signed download link, in seconds. Links are short-lived
/// and requested fresh on every access.
const SIGNED_URL_TTL: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceField {
    Title,
    Kind,
    Category,
    Subcategory,
    Url,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceForm {
    pub id: Option<Uuid>,
    pub title: String,
    pub kind: ResourceKind,
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
    pub url: String,
    pub description: String,
    /// Carried through edits unchanged; uploads happen outside the client.
    pub file: Option<FileAttachment>,
    pub focus: ResourceField,
}

impl ResourceForm {
    fn create(category_id: Option<Uuid>) -> Self {
        Self {
            id: None,
            title: String::new(),
            kind: ResourceKind::Link,
            category_id,
            subcategory_id: None,
            url: String::new(),
            description: String::new(),
            file: None,
            focus: ResourceField::Title,
        }
    }

    fn edit(resource: &Resource) -> Self {
        let file = match (&resource.file_path, resource.file_size, &resource.file_type) {
            (Some(path), Some(size), Some(mime)) => Some(FileAttachment {
                path: path.clone(),
                size,
                mime_type: mime.clone(),
            }),
            _ => None,
        };
        Self {
            id: Some(resource.id),
            title: resource.title.clone(),
            kind: resource.kind,
            category_id: Some(resource.category_id),
            subcategory_id: resource.subcategory_id,
            url: resource.url.clone().unwrap_or_default(),
            description: resource.description.clone().unwrap_or_default(),
            file,
            focus: ResourceField::Title,
        }
    }

    fn text_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            ResourceField::Title => Some(&mut self.title),
            ResourceField::Url => Some(&mut self.url),
            ResourceField::Description => Some(&mut self.description),
            _ => None,
        }
    }

    fn next_focus(&mut self) {
        self.focus = match self.focus {
            ResourceField::Title => ResourceField::Kind,
            ResourceField::Kind => ResourceField::Category,
            ResourceField::Category => ResourceField::Subcategory,
            ResourceField::Subcategory => ResourceField::Url,
            ResourceField::Url => ResourceField::Description,
            ResourceField::Description => ResourceField::Title,
        };
    }

    fn cycle_kind(&mut self) {
        self.kind = match self.kind {
            ResourceKind::Link => ResourceKind::Document,
            ResourceKind::Document => ResourceKind::Spreadsheet,
            ResourceKind::Spreadsheet => ResourceKind::Link,
        };
    }

    fn draft(&self) -> ResourceDraft {
        ResourceDraft {
            title: self.title.clone(),
            kind: Some(self.kind),
            category_id: self.category_id,
            subcategory_id: self.subcategory_id,
            url: self.url.clone(),
            description: self.description.clone(),
            file: self.file.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryForm {
    pub id: Option<Uuid>,
    pub name: String,
    pub category_id: Uuid,
}

#[derive(Debug)]
pub struct ResourcesState {
    pub store: ResourceLibrary,
    pub selected: usize,
    pub filter: ViewFilter,
    pub sort: SortOrder,
    pub search_active: bool,
    pub dialog: DialogState<ResourceForm>,
    pub category_dialog: DialogState<CategoryForm>,
    pub subcategory_dialog: DialogState<SubcategoryForm>,
}

impl ResourcesState {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            store: ResourceLibrary::new(user_id),
            selected: 0,
            filter: ViewFilter::default(),
            sort: SortOrder::default(),
            search_active: false,
            dialog: DialogState::default(),
            category_dialog: DialogState::default(),
            subcategory_dialog: DialogState::default(),
        }
    }

    pub fn visible(&self) -> Vec<&Resource> {
        project(self.store.resources.items(), &self.filter, self.sort)
    }

    pub fn editing(&self) -> bool {
        self.search_active
            || self.dialog.is_open()
            || self.category_dialog.is_open()
            || self.subcategory_dialog.is_open()
    }

    fn selected_id(&self) -> Option<Uuid> {
        self.visible().get(self.selected).map(|resource| resource.id)
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
        // Subcategory filters only make sense inside one category.
        self.filter.subcategory = None;
        self.clamp_selection();
    }

    fn cycle_subcategory_filter(&mut self) {
        let Some(category_id) = self.filter.category else {
            return;
        };
        self.filter.subcategory = cycle_option(
            self.filter.subcategory,
            self.store
                .subcategories_of(category_id)
                .into_iter()
                .map(|s| s.id),
            true,
        );
        self.clamp_selection();
    }
}

impl App {
    pub(crate) async fn resources_key(&mut self, action: AppAction) -> Result<()> {
        if self.state.resources.category_dialog.is_open() {
            self.resources_category_dialog_key(action).await;
            return Ok(());
        }
        if self.state.resources.subcategory_dialog.is_open() {
            self.subcategory_dialog_key(action).await;
            return Ok(());
        }
        if self.state.resources.dialog.is_open() {
            self.resource_dialog_key(action).await;
            return Ok(());
        }
        if self.state.resources.search_active {
            let resources = &mut self.state.resources;
            match action {
                AppAction::Input(ch) => {
                    resources.filter.search.push(ch);
                    resources.clamp_selection();
                }
                AppAction::Backspace => {
                    resources.filter.search.pop();
                }
                AppAction::Submit | AppAction::Cancel => resources.search_active = false,
                _ => {}
            }
            return Ok(());
        }

        match action {
            AppAction::Up => self.state.resources.select_prev(),
            AppAction::Down => self.state.resources.select_next(),
            AppAction::Input(ch) => match ch {
                'j' => self.state.resources.select_next(),
                'k' => self.state.resources.select_prev(),
                'n' => {
                    let form = ResourceForm::create(self.state.resources.filter.category);
                    self.state.resources.dialog.open(form);
                }
                'e' => {
                    if let Some(id) = self.state.resources.selected_id()
                        && let Some(resource) = self.state.resources.store.resources.get(id)
                    {
                        let form = ResourceForm::edit(resource);
                        self.state.resources.dialog.open(form);
                    }
                }
                'd' => self.delete_resource().await,
                '/' => {
                    self.state.resources.filter.search.clear();
                    self.state.resources.search_active = true;
                }
                'o' => self.state.resources.sort = self.state.resources.sort.next(),
                'f' => self.state.resources.cycle_category_filter(),
                'g' => self.state.resources.cycle_subcategory_filter(),
                'c' => self.state.resources.category_dialog.open(CategoryForm {
                    id: None,
                    name: String::new(),
                }),
                'm' => {
                    if let Some(id) = self.state.resources.filter.category
                        && let Some(category) = self.state.resources.store.categories.get(id)
                    {
                        let form = CategoryForm {
                            id: Some(id),
                            name: category.name.clone(),
                        };
                        self.state.resources.category_dialog.open(form);
                    }
                }
                'x' => self.delete_resource_category().await,
                'b' => {
                    if let Some(category_id) = self.state.resources.filter.category {
                        self.state.resources.subcategory_dialog.open(SubcategoryForm {
                            id: None,
                            name: String::new(),
                            category_id,
                        });
                    } else {
                        self.toast_info("Pick a category filter first (f)");
                    }
                }
                'z' => self.delete_subcategory().await,
                'u' => self.show_resource_link().await,
                _ => {}
            },
            _ => {}
        }
        Ok(())
    }

    async fn resource_dialog_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.resources.dialog.close(),
            AppAction::NextField => {
                if let Some(form) = self.state.resources.dialog.form_mut() {
                    form.next_focus();
                }
            }
            AppAction::Up | AppAction::Down => {
                let resources = &mut self.state.resources;
                let forward = action == AppAction::Down;
                if let Some(form) = resources.dialog.form_mut() {
                    match form.focus {
                        ResourceField::Kind => form.cycle_kind(),
                        ResourceField::Category => {
                            form.category_id = cycle_option(
                                form.category_id,
                                resources.store.categories.iter().map(|c| c.id),
                                forward,
                            );
                            form.subcategory_id = None;
                        }
                        ResourceField::Subcategory => {
                            if let Some(category_id) = form.category_id {
                                form.subcategory_id = cycle_option(
                                    form.subcategory_id,
                                    resources
                                        .store
                                        .subcategories_of(category_id)
                                        .into_iter()
                                        .map(|s| s.id),
                                    forward,
                                );
                            }
                        }
                        _ => {}
                    }
                }
            }
            AppAction::Backspace => {
                if let Some(form) = self.state.resources.dialog.form_mut()
                    && let Some(field) = form.text_field_mut()
                {
                    field.pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(form) = self.state.resources.dialog.form_mut()
                    && let Some(field) = form.text_field_mut()
                {
                    field.push(ch);
                }
            }
            AppAction::Submit => self.submit_resource().await,
            _ => {}
        }
    }

    async fn submit_resource(&mut self) {
        let Some(form) = self.state.resources.dialog.begin_submit() else {
            return;
        };
        let draft = form.draft();
        let result = match form.id {
            Some(id) => self
                .state
                .resources
                .store
                .update_resource(&self.gateway, id, &draft)
                .await
                .map(|_| "Resource updated"),
            None => self
                .state
                .resources
                .store
                .create_resource(&self.gateway, &draft)
                .await
                .map(|_| "Resource added"),
        };
        match result {
            Ok(message) => {
                self.state.resources.dialog.resolve(Ok(()));
                self.state.resources.clamp_selection();
                self.toast_success(message);
            }
            Err(err) => self.state.resources.dialog.resolve(Err(err.to_string())),
        }
    }

    async fn resources_category_dialog_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.resources.category_dialog.close(),
            AppAction::Backspace => {
                if let Some(form) = self.state.resources.category_dialog.form_mut() {
                    form.name.pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(form) = self.state.resources.category_dialog.form_mut() {
                    form.name.push(ch);
                }
            }
            AppAction::Submit => self.submit_resource_category().await,
            _ => {}
        }
    }

    async fn submit_resource_category(&mut self) {
        let Some(form) = self.state.resources.category_dialog.begin_submit() else {
            return;
        };
        let result = match form.id {
            Some(id) => self
                .state
                .resources
                .store
                .rename_category(&self.gateway, id, &form.name)
                .await
                .map(|_| "Category renamed"),
            None => self
                .state
                .resources
                .store
                .create_category(&self.gateway, &form.name)
                .await
                .map(|_| "Category created"),
        };
        match result {
            Ok(message) => {
                self.state.resources.category_dialog.resolve(Ok(()));
                self.toast_success(message);
            }
            Err(err) => self
                .state
                .resources
                .category_dialog
                .resolve(Err(err.to_string())),
        }
    }

    async fn subcategory_dialog_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.resources.subcategory_dialog.close(),
            AppAction::Backspace => {
                if let Some(form) = self.state.resources.subcategory_dialog.form_mut() {
                    form.name.pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(form) = self.state.resources.subcategory_dialog.form_mut() {
                    form.name.push(ch);
                }
            }
            AppAction::Submit => self.submit_subcategory().await,
            _ => {}
        }
    }

    async fn submit_subcategory(&mut self) {
        let Some(form) = self.state.resources.subcategory_dialog.begin_submit() else {
            return;
        };
        let result = match form.id {
            Some(id) => self
                .state
                .resources
                .store
                .update_subcategory(&self.gateway, id, &form.name, form.category_id)
                .await
                .map(|_| "Subcategory renamed"),
            None => self
                .state
                .resources
                .store
                .create_subcategory(&self.gateway, &form.name, form.category_id)
                .await
                .map(|_| "Subcategory created"),
        };
        match result {
            Ok(message) => {
                self.state.resources.subcategory_dialog.resolve(Ok(()));
                self.toast_success(message);
            }
            Err(err) => self
                .state
                .resources
                .subcategory_dialog
                .resolve(Err(err.to_string())),
        }
    }

    async fn delete_resource(&mut self) {
        let Some(id) = self.state.resources.selected_id() else {
            return;
        };
        match self
            .state
            .resources
            .store
            .delete_resource(&self.gateway, id)
            .await
        {
            Ok(()) => {
                self.state.resources.clamp_selection();
                self.toast_success("Resource deleted");
            }
            Err(err) => self.toast_error(err.to_string()),
        }
    }

    async fn delete_resource_category(&mut self) {
        let Some(id) = self.state.resources.filter.category else {
            return;
        };
        match self
            .state
            .resources
            .store
            .delete_category(&self.gateway, id)
            .await
        {
            Ok(()) => {
                self.state.resources.filter.category = None;
                self.state.resources.filter.subcategory = None;
                self.toast_success("Category deleted");
            }
            Err(err) => self.toast_error(err.to_string()),
        }
    }

    async fn delete_subcategory(&mut self) {
        let Some(id) = self.state.resources.filter.subcategory else {
            return;
        };
        match self
            .state
            .resources
            .store
            .delete_subcategory(&self.gateway, id)
            .await
        {
            Ok(()) => {
                self.state.resources.filter.subcategory = None;
                self.toast_success("Subcategory deleted");
            }
            Err(err) => self.toast_error(err.to_string()),
        }
    }

    /// Surface where the selected resource points: the stored URL for
    /// links, a freshly signed download URL for uploaded files.
    async fn show_resource_link(&mut self) {
        let Some(id) = self.state.resources.selected_id() else {
            return;
        };
        let Some(resource) = self.state.resources.store.resources.get(id) else {
            return;
        };
        if let Some(url) = resource.url.as_deref() {
            let url = url.to_string();
            self.toast_info(url);
            return;
        }
        let Some(path) = resource.file_path.clone() else {
            self.toast_info("Nothing to open for this resource");
            return;
        };
        match self
            .gateway
            .signed_url(&self.config.bucket, &path, SIGNED_URL_TTL)
            .await
        {
            Ok(url) => self.toast_info(url),
            Err(err) => self.toast_error(format!("Could not sign URL: {err}")),
        }
    }
}
