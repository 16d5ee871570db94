//! Application state and event loop.
//!
//! Each section owns its reflected store plus the transient view state
//! around it (selection, filter, open dialogs). Remote work happens inline
//! in the key handlers; the stores only change after the backend confirmed
//! a write.

mod focus;
mod goals;
mod notes;
mod resources;
mod tasks;
mod tutoring;

pub use focus::{FocusState, SessionCloseField, SessionStartField};
pub use goals::{GoalField, GoalsState};
pub use notes::{NoteField, NotesState};
pub use resources::{ResourceField, ResourcesState};
pub use tasks::{TaskField, TasksState};
pub use tutoring::{PaymentField, SessionField, StudentField, TutoringState};

use std::time::{Duration, Instant};

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use crossterm::event::{self, Event, KeyEvent};
use uuid::Uuid;

use store::StoreError;

use crate::{
    client::RestGateway,
    config::AppConfig,
    error::{AppError, Result},
    ui::{self, keymap::AppAction},
};

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Notes,
    Resources,
    Tasks,
    Goals,
    Focus,
    Tutoring,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Notes,
        Section::Resources,
        Section::Tasks,
        Section::Goals,
        Section::Focus,
        Section::Tutoring,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Notes => "Notes",
            Self::Resources => "Resources",
            Self::Tasks => "Tasks",
            Self::Goals => "Goals",
            Self::Focus => "Focus",
            Self::Tutoring => "Tutoring",
        }
    }

    fn from_digit(ch: char) -> Option<Self> {
        match ch {
            '1' => Some(Self::Notes),
            '2' => Some(Self::Resources),
            '3' => Some(Self::Tasks),
            '4' => Some(Self::Goals),
            '5' => Some(Self::Focus),
            '6' => Some(Self::Tutoring),
            _ => None,
        }
    }

    fn next(self) -> Self {
        let position = Self::ALL
            .iter()
            .position(|section| *section == self)
            .unwrap_or(0);
        Self::ALL[(position + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct AppState {
    pub section: Section,
    pub notes: NotesState,
    pub resources: ResourcesState,
    pub tasks: TasksState,
    pub goals: GoalsState,
    pub focus: FocusState,
    pub tutoring: TutoringState,
    pub toast: Option<ToastState>,
    pub last_refresh: Option<DateTime<Local>>,
    pub connected: bool,
    pub base_url: String,
}

impl AppState {
    /// True while keystrokes belong to a text field instead of the list.
    pub fn editing(&self) -> bool {
        self.notes.editing()
            || self.resources.editing()
            || self.tasks.editing()
            || self.goals.editing()
            || self.focus.editing()
            || self.tutoring.editing()
    }
}

pub struct App {
    config: AppConfig,
    gateway: RestGateway,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let gateway = RestGateway::new(&config.base_url, &config.api_key)?;
        let user_id = Uuid::parse_str(config.user_id.trim())
            .map_err(|err| AppError::Setting(format!("invalid user_id: {err}")))?;

        let state = AppState {
            section: Section::Notes,
            notes: NotesState::new(user_id),
            resources: ResourcesState::new(user_id),
            tasks: TasksState::new(user_id),
            goals: GoalsState::new(user_id),
            focus: FocusState::new(user_id),
            tutoring: TutoringState::new(user_id),
            toast: None,
            last_refresh: None,
            connected: false,
            base_url: config.base_url.clone(),
        };

        Ok(Self {
            config,
            gateway,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::init_terminal()?;
        self.refresh_all().await;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Tui) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.expire_toast();
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Draw(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let editing = self.state.editing();
        let action = ui::keymap::map_key(key, editing);

        if action == AppAction::Quit {
            self.should_quit = true;
            return Ok(());
        }
        if !editing {
            if action == AppAction::NextField {
                self.state.section = self.state.section.next();
                return Ok(());
            }
            if let AppAction::Input(ch) = action {
                if let Some(section) = Section::from_digit(ch) {
                    self.state.section = section;
                    return Ok(());
                }
                if ch == 'R' {
                    self.refresh_all().await;
                    return Ok(());
                }
            }
        }

        match self.state.section {
            Section::Notes => self.notes_key(action).await,
            Section::Resources => self.resources_key(action).await,
            Section::Tasks => self.tasks_key(action).await,
            Section::Goals => self.goals_key(action).await,
            Section::Focus => self.focus_key(action).await,
            Section::Tutoring => self.tutoring_key(action).await,
        }
    }

    /// Refetch every section's tables. Errors land in a toast, not a crash;
    /// the stale local state stays usable.
    async fn refresh_all(&mut self) {
        let result = async {
            self.state.notes.store.refetch(&self.gateway).await?;
            self.state.resources.store.refetch(&self.gateway).await?;
            self.state.tasks.store.refetch(&self.gateway).await?;
            self.state.goals.store.refetch(&self.gateway).await?;
            self.state.focus.store.refetch(&self.gateway).await?;
            self.state.tutoring.store.refetch(&self.gateway).await?;
            Ok::<(), StoreError>(())
        }
        .await;

        match result {
            Ok(()) => {
                self.state.connected = true;
                self.state.last_refresh = Some(Local::now());
            }
            Err(err) => {
                self.state.connected = false;
                tracing::warn!(error = %err, "refresh failed");
                self.toast_error(format!("Refresh failed: {err}"));
            }
        }
    }

    fn expire_toast(&mut self) {
        if let Some(toast) = self.state.toast.as_ref()
            && toast.expires_at <= Instant::now()
        {
            self.state.toast = None;
        }
    }

    pub(crate) fn toast_success(&mut self, message: impl Into<String>) {
        self.push_toast(ToastLevel::Success, message.into());
    }

    pub(crate) fn toast_info(&mut self, message: impl Into<String>) {
        self.push_toast(ToastLevel::Info, message.into());
    }

    pub(crate) fn toast_error(&mut self, message: impl Into<String>) {
        self.push_toast(ToastLevel::Error, message.into());
    }

    fn push_toast(&mut self, level: ToastLevel, message: String) {
        self.state.toast = Some(ToastState {
            message,
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }
}

/// Form dates are typed as text and parsed on submit.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub(crate) fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// Parse an amount like "45" or "45.50" into minor currency units.
pub(crate) fn parse_minor(value: &str) -> Option<i64> {
    let value = value.trim();
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };
    if fraction.len() > 2 {
        return None;
    }
    let whole: i64 = whole.parse().ok()?;
    if whole < 0 {
        return None;
    }
    let cents: i64 = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{fraction:0<2}");
        padded.parse().ok()?
    };
    whole.checked_mul(100)?.checked_add(cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minor_accepts_whole_and_decimal_amounts() {
        assert_eq!(parse_minor("45"), Some(4500));
        assert_eq!(parse_minor("45.5"), Some(4550));
        assert_eq!(parse_minor(" 45.50 "), Some(4550));
        assert_eq!(parse_minor("0.05"), Some(5));
    }

    #[test]
    fn parse_minor_rejects_junk() {
        assert_eq!(parse_minor("-3"), None);
        assert_eq!(parse_minor("4.505"), None);
        assert_eq!(parse_minor("abc"), None);
        assert_eq!(parse_minor(""), None);
    }

    #[test]
    fn parse_minor_rejects_amounts_that_overflow_minor_units() {
        // Larger than i64 outright.
        assert_eq!(parse_minor("92233720368547758080"), None);
        // Fits in i64 but not once scaled to cents.
        assert_eq!(parse_minor("92233720368547758"), None);
    }
}
