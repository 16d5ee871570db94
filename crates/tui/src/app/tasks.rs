//! Tasks section: board list, status cycling, subtasks.

use uuid::Uuid;

use store::records::{Task, TaskPriority, TaskStatus};
use store::tasks::{TaskBoard, TaskDraft};
use store::{DialogState, SortOrder, StoreError, ViewFilter, project};

use crate::error::Result;
use crate::ui::keymap::AppAction;

use super::{App, parse_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
    Priority,
    DueDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub priority: Option<TaskPriority>,
    /// Typed as YYYY-MM-DD, parsed on submit.
    pub due_date: String,
    pub focus: TaskField,
}

impl TaskForm {
    fn create() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            priority: None,
            due_date: String::new(),
            focus: TaskField::Title,
        }
    }

    fn edit(task: &Task) -> Self {
        Self {
            id: Some(task.id),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
            due_date: task
                .due_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            focus: TaskField::Title,
        }
    }

    fn text_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            TaskField::Title => Some(&mut self.title),
            TaskField::Description => Some(&mut self.description),
            TaskField::DueDate => Some(&mut self.due_date),
            TaskField::Priority => None,
        }
    }

    fn next_focus(&mut self) {
        self.focus = match self.focus {
            TaskField::Title => TaskField::Description,
            TaskField::Description => TaskField::Priority,
            TaskField::Priority => TaskField::DueDate,
            TaskField::DueDate => TaskField::Title,
        };
    }

    fn cycle_priority(&mut self) {
        self.priority = match self.priority {
            None => Some(TaskPriority::Low),
            Some(TaskPriority::Low) => Some(TaskPriority::Medium),
            Some(TaskPriority::Medium) => Some(TaskPriority::High),
            Some(TaskPriority::High) => None,
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskForm {
    pub task_id: Uuid,
    pub title: String,
}

#[derive(Debug)]
pub struct TasksState {
    pub store: TaskBoard,
    pub selected: usize,
    pub selected_subtask: usize,
    pub filter: ViewFilter,
    pub sort: SortOrder,
    pub search_active: bool,
    pub dialog: DialogState<TaskForm>,
    pub subtask_dialog: DialogState<SubtaskForm>,
}

impl TasksState {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            store: TaskBoard::new(user_id),
            selected: 0,
            selected_subtask: 0,
            filter: ViewFilter::default(),
            sort: SortOrder::default(),
            search_active: false,
            dialog: DialogState::default(),
            subtask_dialog: DialogState::default(),
        }
    }

    pub fn visible(&self) -> Vec<&Task> {
        project(self.store.tasks.items(), &self.filter, self.sort)
    }

    pub fn editing(&self) -> bool {
        self.search_active || self.dialog.is_open() || self.subtask_dialog.is_open()
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.visible().get(self.selected).map(|task| task.id)
    }

    fn selected_subtask_id(&self) -> Option<Uuid> {
        let task_id = self.selected_id()?;
        self.store
            .subtasks_of(task_id)
            .get(self.selected_subtask)
            .map(|subtask| subtask.id)
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
        self.clamp_subtask_selection();
    }

    fn clamp_subtask_selection(&mut self) {
        let len = self
            .selected_id()
            .map_or(0, |id| self.store.subtasks_of(id).len());
        self.selected_subtask = self.selected_subtask.min(len.saturating_sub(1));
    }

    fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
        self.selected_subtask = 0;
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.selected_subtask = 0;
    }
}

impl App {
    pub(crate) async fn tasks_key(&mut self, action: AppAction) -> Result<()> {
        if self.state.tasks.subtask_dialog.is_open() {
            self.subtask_dialog_key(action).await;
            return Ok(());
        }
        if self.state.tasks.dialog.is_open() {
            self.task_dialog_key(action).await;
            return Ok(());
        }
        if self.state.tasks.search_active {
            let tasks = &mut self.state.tasks;
            match action {
                AppAction::Input(ch) => {
                    tasks.filter.search.push(ch);
                    tasks.clamp_selection();
                }
                AppAction::Backspace => {
                    tasks.filter.search.pop();
                }
                AppAction::Submit | AppAction::Cancel => tasks.search_active = false,
                _ => {}
            }
            return Ok(());
        }

        match action {
            AppAction::Up => self.state.tasks.select_prev(),
            AppAction::Down => self.state.tasks.select_next(),
            AppAction::Input(ch) => match ch {
                'j' => self.state.tasks.select_next(),
                'k' => self.state.tasks.select_prev(),
                'n' => self.state.tasks.dialog.open(TaskForm::create()),
                'e' => {
                    if let Some(id) = self.state.tasks.selected_id()
                        && let Some(task) = self.state.tasks.store.tasks.get(id)
                    {
                        let form = TaskForm::edit(task);
                        self.state.tasks.dialog.open(form);
                    }
                }
                'd' => self.delete_task().await,
                ' ' => self.cycle_task_status().await,
                'a' => {
                    if let Some(task_id) = self.state.tasks.selected_id() {
                        self.state.tasks.subtask_dialog.open(SubtaskForm {
                            task_id,
                            title: String::new(),
                        });
                    }
                }
                'J' => {
                    let tasks = &mut self.state.tasks;
                    tasks.selected_subtask += 1;
                    tasks.clamp_subtask_selection();
                }
                'K' => {
                    self.state.tasks.selected_subtask =
                        self.state.tasks.selected_subtask.saturating_sub(1);
                }
                't' => self.toggle_subtask().await,
                'D' => self.delete_subtask().await,
                '/' => {
                    self.state.tasks.filter.search.clear();
                    self.state.tasks.search_active = true;
                }
                'o' => self.state.tasks.sort = self.state.tasks.sort.next(),
                _ => {}
            },
            _ => {}
        }
        Ok(())
    }

    async fn task_dialog_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.tasks.dialog.close(),
            AppAction::NextField => {
                if let Some(form) = self.state.tasks.dialog.form_mut() {
                    form.next_focus();
                }
            }
            AppAction::Up | AppAction::Down => {
                if let Some(form) = self.state.tasks.dialog.form_mut()
                    && form.focus == TaskField::Priority
                {
                    form.cycle_priority();
                }
            }
            AppAction::Backspace => {
                if let Some(form) = self.state.tasks.dialog.form_mut()
                    && let Some(field) = form.text_field_mut()
                {
                    field.pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(form) = self.state.tasks.dialog.form_mut()
                    && let Some(field) = form.text_field_mut()
                {
                    field.push(ch);
                }
            }
            AppAction::Submit => self.submit_task().await,
            _ => {}
        }
    }

    async fn submit_task(&mut self) {
        let due_date = match self.state.tasks.dialog.form() {
            Some(form) if !form.due_date.trim().is_empty() => match parse_date(&form.due_date) {
                Some(date) => Some(date),
                None => {
                    self.state
                        .tasks
                        .dialog
                        .reject("Due date must be YYYY-MM-DD".to_string());
                    return;
                }
            },
            _ => None,
        };
        let Some(form) = self.state.tasks.dialog.begin_submit() else {
            return;
        };
        let draft = TaskDraft {
            title: form.title.clone(),
            description: form.description.clone(),
            priority: form.priority,
            due_date,
        };
        let result = match form.id {
            Some(id) => self
                .state
                .tasks
                .store
                .update_task(&self.gateway, id, &draft)
                .await
                .map(|_| "Task updated"),
            None => self
                .state
                .tasks
                .store
                .create_task(&self.gateway, &draft)
                .await
                .map(|_| "Task created"),
        };
        match result {
            Ok(message) => {
                self.state.tasks.dialog.resolve(Ok(()));
                self.state.tasks.clamp_selection();
                self.toast_success(message);
            }
            Err(err) => self.state.tasks.dialog.resolve(Err(err.to_string())),
        }
    }

    async fn subtask_dialog_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.tasks.subtask_dialog.close(),
            AppAction::Backspace => {
                if let Some(form) = self.state.tasks.subtask_dialog.form_mut() {
                    form.title.pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(form) = self.state.tasks.subtask_dialog.form_mut() {
                    form.title.push(ch);
                }
            }
            AppAction::Submit => self.submit_subtask().await,
            _ => {}
        }
    }

    async fn submit_subtask(&mut self) {
        let Some(form) = self.state.tasks.subtask_dialog.begin_submit() else {
            return;
        };
        let result: std::result::Result<Uuid, StoreError> = self
            .state
            .tasks
            .store
            .add_subtask(&self.gateway, form.task_id, &form.title)
            .await;
        match result {
            Ok(_) => {
                self.state.tasks.subtask_dialog.resolve(Ok(()));
                self.toast_success("Subtask added");
            }
            Err(err) => self.state.tasks.subtask_dialog.resolve(Err(err.to_string())),
        }
    }

    async fn cycle_task_status(&mut self) {
        let Some(id) = self.state.tasks.selected_id() else {
            return;
        };
        let Some(task) = self.state.tasks.store.tasks.get(id) else {
            return;
        };
        let next = match task.status {
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        };
        if let Err(err) = self
            .state
            .tasks
            .store
            .set_status(&self.gateway, id, next)
            .await
        {
            self.toast_error(err.to_string());
        }
    }

    async fn toggle_subtask(&mut self) {
        let Some(id) = self.state.tasks.selected_subtask_id() else {
            return;
        };
        if let Err(err) = self
            .state
            .tasks
            .store
            .toggle_subtask(&self.gateway, id)
            .await
        {
            self.toast_error(err.to_string());
        }
    }

    async fn delete_subtask(&mut self) {
        let Some(id) = self.state.tasks.selected_subtask_id() else {
            return;
        };
        match self
            .state
            .tasks
            .store
            .delete_subtask(&self.gateway, id)
            .await
        {
            Ok(()) => {
                self.state.tasks.clamp_subtask_selection();
                self.toast_success("Subtask deleted");
            }
            Err(err) => self.toast_error(err.to_string()),
        }
    }

    async fn delete_task(&mut self) {
        let Some(id) = self.state.tasks.selected_id() else {
            return;
        };
        match self.state.tasks.store.delete_task(&self.gateway, id).await {
            Ok(()) => {
                self.state.tasks.clamp_selection();
                self.toast_success("Task deleted");
            }
            Err(err) => self.toast_error(err.to_string()),
        }
    }
}
