//! Focus section: session log and the standing task list.

use chrono::Local;
use uuid::Uuid;

use store::DialogState;
use store::focus::FocusLog;

use crate::error::Result;
use crate::ui::keymap::AppAction;

use super::{App, parse_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStartField {
    Date,
    Duration,
}

/// Plan a session: date plus intended minutes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStartForm {
    pub date: String,
    pub duration: String,
    pub focus: SessionStartField,
}

impl SessionStartForm {
    fn today() -> Self {
        Self {
            date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            duration: "25".to_string(),
            focus: SessionStartField::Date,
        }
    }

    fn text_field_mut(&mut self) -> &mut String {
        match self.focus {
            SessionStartField::Date => &mut self.date,
            SessionStartField::Duration => &mut self.duration,
        }
    }

    fn next_focus(&mut self) {
        self.focus = match self.focus {
            SessionStartField::Date => SessionStartField::Duration,
            SessionStartField::Duration => SessionStartField::Date,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCloseField {
    ActualMinutes,
    Notes,
}

/// Close a session: time actually spent plus optional notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCloseForm {
    pub id: Uuid,
    pub actual_minutes: String,
    pub notes: String,
    pub focus: SessionCloseField,
}

impl SessionCloseForm {
    fn text_field_mut(&mut self) -> &mut String {
        match self.focus {
            SessionCloseField::ActualMinutes => &mut self.actual_minutes,
            SessionCloseField::Notes => &mut self.notes,
        }
    }

    fn next_focus(&mut self) {
        self.focus = match self.focus {
            SessionCloseField::ActualMinutes => SessionCloseField::Notes,
            SessionCloseField::Notes => SessionCloseField::ActualMinutes,
        };
    }
}

/// One-line input for a new focus task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTaskForm {
    pub text: String,
}

#[derive(Debug)]
pub struct FocusState {
    pub store: FocusLog,
    pub selected_session: usize,
    pub selected_task: usize,
    pub start_dialog: DialogState<SessionStartForm>,
    pub close_dialog: DialogState<SessionCloseForm>,
    pub task_dialog: DialogState<FocusTaskForm>,
}

impl FocusState {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            store: FocusLog::new(user_id),
            selected_session: 0,
            selected_task: 0,
            start_dialog: DialogState::default(),
            close_dialog: DialogState::default(),
            task_dialog: DialogState::default(),
        }
    }

    pub fn editing(&self) -> bool {
        self.start_dialog.is_open() || self.close_dialog.is_open() || self.task_dialog.is_open()
    }

    pub fn selected_session_id(&self) -> Option<Uuid> {
        self.store
            .sessions
            .items()
            .get(self.selected_session)
            .map(|session| session.id)
    }

    pub fn selected_task_id(&self) -> Option<Uuid> {
        self.store
            .tasks
            .items()
            .get(self.selected_task)
            .map(|task| task.id)
    }

    fn clamp_selection(&mut self) {
        self.selected_session = self
            .selected_session
            .min(self.store.sessions.len().saturating_sub(1));
        self.selected_task = self
            .selected_task
            .min(self.store.tasks.len().saturating_sub(1));
    }
}

impl App {
    pub(crate) async fn focus_key(&mut self, action: AppAction) -> Result<()> {
        if self.state.focus.start_dialog.is_open() {
            self.focus_start_dialog_key(action).await;
            return Ok(());
        }
        if self.state.focus.close_dialog.is_open() {
            self.focus_close_dialog_key(action).await;
            return Ok(());
        }
        if self.state.focus.task_dialog.is_open() {
            self.focus_task_dialog_key(action).await;
            return Ok(());
        }

        match action {
            AppAction::Up => {
                self.state.focus.selected_session =
                    self.state.focus.selected_session.saturating_sub(1);
            }
            AppAction::Down => {
                let focus = &mut self.state.focus;
                if !focus.store.sessions.is_empty() {
                    focus.selected_session =
                        (focus.selected_session + 1).min(focus.store.sessions.len() - 1);
                }
            }
            AppAction::Input(ch) => match ch {
                'j' => {
                    let focus = &mut self.state.focus;
                    if !focus.store.sessions.is_empty() {
                        focus.selected_session =
                            (focus.selected_session + 1).min(focus.store.sessions.len() - 1);
                    }
                }
                'k' => {
                    self.state.focus.selected_session =
                        self.state.focus.selected_session.saturating_sub(1);
                }
                'n' => self.state.focus.start_dialog.open(SessionStartForm::today()),
                'c' => {
                    if let Some(id) = self.state.focus.selected_session_id()
                        && let Some(session) = self.state.focus.store.sessions.get(id)
                        && !session.completed
                    {
                        let form = SessionCloseForm {
                            id,
                            actual_minutes: session.duration_minutes.to_string(),
                            notes: String::new(),
                            focus: SessionCloseField::ActualMinutes,
                        };
                        self.state.focus.close_dialog.open(form);
                    }
                }
                'd' => self.delete_focus_session().await,
                'a' => self.state.focus.task_dialog.open(FocusTaskForm {
                    text: String::new(),
                }),
                'J' => {
                    let focus = &mut self.state.focus;
                    if !focus.store.tasks.is_empty() {
                        focus.selected_task =
                            (focus.selected_task + 1).min(focus.store.tasks.len() - 1);
                    }
                }
                'K' => {
                    self.state.focus.selected_task =
                        self.state.focus.selected_task.saturating_sub(1);
                }
                't' => self.toggle_focus_task().await,
                'D' => self.delete_focus_task().await,
                _ => {}
            },
            _ => {}
        }
        Ok(())
    }

    async fn focus_start_dialog_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.focus.start_dialog.close(),
            AppAction::NextField => {
                if let Some(form) = self.state.focus.start_dialog.form_mut() {
                    form.next_focus();
                }
            }
            AppAction::Backspace => {
                if let Some(form) = self.state.focus.start_dialog.form_mut() {
                    form.text_field_mut().pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(form) = self.state.focus.start_dialog.form_mut() {
                    form.text_field_mut().push(ch);
                }
            }
            AppAction::Submit => self.submit_focus_start().await,
            _ => {}
        }
    }

    async fn submit_focus_start(&mut self) {
        let parsed = self.state.focus.start_dialog.form().and_then(|form| {
            let date = parse_date(&form.date)?;
            let duration: i32 = form.duration.trim().parse().ok()?;
            Some((date, duration))
        });
        let Some((date, duration)) = parsed else {
            self.state
                .focus
                .start_dialog
                .reject("Need a YYYY-MM-DD date and minutes".to_string());
            return;
        };
        let Some(_form) = self.state.focus.start_dialog.begin_submit() else {
            return;
        };
        match self
            .state
            .focus
            .store
            .start_session(&self.gateway, date, duration)
            .await
        {
            Ok(_) => {
                self.state.focus.start_dialog.resolve(Ok(()));
                self.toast_success("Session started");
            }
            Err(err) => self.state.focus.start_dialog.resolve(Err(err.to_string())),
        }
    }

    async fn focus_close_dialog_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.focus.close_dialog.close(),
            AppAction::NextField => {
                if let Some(form) = self.state.focus.close_dialog.form_mut() {
                    form.next_focus();
                }
            }
            AppAction::Backspace => {
                if let Some(form) = self.state.focus.close_dialog.form_mut() {
                    form.text_field_mut().pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(form) = self.state.focus.close_dialog.form_mut() {
                    form.text_field_mut().push(ch);
                }
            }
            AppAction::Submit => self.submit_focus_close().await,
            _ => {}
        }
    }

    async fn submit_focus_close(&mut self) {
        let actual = self
            .state
            .focus
            .close_dialog
            .form()
            .and_then(|form| form.actual_minutes.trim().parse::<i32>().ok());
        let Some(actual) = actual else {
            self.state
                .focus
                .close_dialog
                .reject("Actual minutes must be a number".to_string());
            return;
        };
        let Some(form) = self.state.focus.close_dialog.begin_submit() else {
            return;
        };
        match self
            .state
            .focus
            .store
            .complete_session(&self.gateway, form.id, actual, &form.notes)
            .await
        {
            Ok(()) => {
                self.state.focus.close_dialog.resolve(Ok(()));
                self.toast_success("Session completed");
            }
            Err(err) => self.state.focus.close_dialog.resolve(Err(err.to_string())),
        }
    }

    async fn focus_task_dialog_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.focus.task_dialog.close(),
            AppAction::Backspace => {
                if let Some(form) = self.state.focus.task_dialog.form_mut() {
                    form.text.pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(form) = self.state.focus.task_dialog.form_mut() {
                    form.text.push(ch);
                }
            }
            AppAction::Submit => self.submit_focus_task().await,
            _ => {}
        }
    }

    async fn submit_focus_task(&mut self) {
        let Some(form) = self.state.focus.task_dialog.begin_submit() else {
            return;
        };
        match self.state.focus.store.add_task(&self.gateway, &form.text).await {
            Ok(_) => {
                self.state.focus.task_dialog.resolve(Ok(()));
                self.toast_success("Task added");
            }
            Err(err) => self.state.focus.task_dialog.resolve(Err(err.to_string())),
        }
    }

    async fn toggle_focus_task(&mut self) {
        let Some(id) = self.state.focus.selected_task_id() else {
            return;
        };
        if let Err(err) = self.state.focus.store.toggle_task(&self.gateway, id).await {
            self.toast_error(err.to_string());
        }
    }

    async fn delete_focus_task(&mut self) {
        let Some(id) = self.state.focus.selected_task_id() else {
            return;
        };
        match self.state.focus.store.delete_task(&self.gateway, id).await {
            Ok(()) => {
                self.state.focus.clamp_selection();
                self.toast_success("Task deleted");
            }
            Err(err) => self.toast_error(err.to_string()),
        }
    }

    async fn delete_focus_session(&mut self) {
        let Some(id) = self.state.focus.selected_session_id() else {
            return;
        };
        match self
            .state
            .focus
            .store
            .delete_session(&self.gateway, id)
            .await
        {
            Ok(()) => {
                self.state.focus.clamp_selection();
                self.toast_success("Session deleted");
            }
            Err(err) => self.toast_error(err.to_string()),
        }
    }
}
