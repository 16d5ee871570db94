//! Tutoring section: student registry and the per-student session ledger.

use chrono::Local;
use uuid::Uuid;

use store::records::Student;
use store::tutoring::{StudentDraft, TutoringLedger};
use store::{DialogState, SortOrder, ViewFilter, project};

use crate::error::Result;
use crate::ui::keymap::AppAction;

use super::{App, parse_date, parse_minor, parse_time};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    Name,
    Email,
    Phone,
    HourlyRate,
    Notes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentForm {
    pub id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Typed in major units ("45" or "45.50"), stored in cents.
    pub hourly_rate: String,
    pub notes: String,
    pub focus: StudentField,
}

impl StudentForm {
    fn create() -> Self {
        Self {
            id: None,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            hourly_rate: String::new(),
            notes: String::new(),
            focus: StudentField::Name,
        }
    }

    fn edit(student: &Student) -> Self {
        Self {
            id: Some(student.id),
            name: student.name.clone(),
            email: student.email.clone().unwrap_or_default(),
            phone: student.phone.clone().unwrap_or_default(),
            hourly_rate: format!(
                "{}.{:02}",
                student.hourly_rate_minor / 100,
                student.hourly_rate_minor % 100
            ),
            notes: student.notes.clone().unwrap_or_default(),
            focus: StudentField::Name,
        }
    }

    fn text_field_mut(&mut self) -> &mut String {
        match self.focus {
            StudentField::Name => &mut self.name,
            StudentField::Email => &mut self.email,
            StudentField::Phone => &mut self.phone,
            StudentField::HourlyRate => &mut self.hourly_rate,
            StudentField::Notes => &mut self.notes,
        }
    }

    fn next_focus(&mut self) {
        self.focus = match self.focus {
            StudentField::Name => StudentField::Email,
            StudentField::Email => StudentField::Phone,
            StudentField::Phone => StudentField::HourlyRate,
            StudentField::HourlyRate => StudentField::Notes,
            StudentField::Notes => StudentField::Name,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionField {
    Date,
    StartTime,
    Duration,
    Notes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionForm {
    pub student_id: Uuid,
    pub date: String,
    pub start_time: String,
    pub duration: String,
    pub notes: String,
    pub focus: SessionField,
}

impl SessionForm {
    fn for_student(student_id: Uuid) -> Self {
        Self {
            student_id,
            date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            start_time: "15:00".to_string(),
            duration: "60".to_string(),
            notes: String::new(),
            focus: SessionField::Date,
        }
    }

    fn text_field_mut(&mut self) -> &mut String {
        match self.focus {
            SessionField::Date => &mut self.date,
            SessionField::StartTime => &mut self.start_time,
            SessionField::Duration => &mut self.duration,
            SessionField::Notes => &mut self.notes,
        }
    }

    fn next_focus(&mut self) {
        self.focus = match self.focus {
            SessionField::Date => SessionField::StartTime,
            SessionField::StartTime => SessionField::Duration,
            SessionField::Duration => SessionField::Notes,
            SessionField::Notes => SessionField::Date,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentField {
    Date,
    Method,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentForm {
    pub session_id: Uuid,
    pub date: String,
    pub method: String,
    pub focus: PaymentField,
}

impl PaymentForm {
    fn for_session(session_id: Uuid) -> Self {
        Self {
            session_id,
            date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            method: String::new(),
            focus: PaymentField::Date,
        }
    }

    fn text_field_mut(&mut self) -> &mut String {
        match self.focus {
            PaymentField::Date => &mut self.date,
            PaymentField::Method => &mut self.method,
        }
    }

    fn next_focus(&mut self) {
        self.focus = match self.focus {
            PaymentField::Date => PaymentField::Method,
            PaymentField::Method => PaymentField::Date,
        };
    }
}

#[derive(Debug)]
pub struct TutoringState {
    pub store: TutoringLedger,
    pub selected_student: usize,
    pub selected_session: usize,
    pub filter: ViewFilter,
    pub sort: SortOrder,
    pub search_active: bool,
    pub student_dialog: DialogState<StudentForm>,
    pub session_dialog: DialogState<SessionForm>,
    pub payment_dialog: DialogState<PaymentForm>,
}

impl TutoringState {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            store: TutoringLedger::new(user_id),
            selected_student: 0,
            selected_session: 0,
            filter: ViewFilter::default(),
            sort: SortOrder::default(),
            search_active: false,
            student_dialog: DialogState::default(),
            session_dialog: DialogState::default(),
            payment_dialog: DialogState::default(),
        }
    }

    pub fn visible_students(&self) -> Vec<&Student> {
        project(self.store.students.items(), &self.filter, self.sort)
    }

    pub fn editing(&self) -> bool {
        self.search_active
            || self.student_dialog.is_open()
            || self.session_dialog.is_open()
            || self.payment_dialog.is_open()
    }

    pub fn selected_student_id(&self) -> Option<Uuid> {
        self.visible_students()
            .get(self.selected_student)
            .map(|student| student.id)
    }

    pub fn selected_session_id(&self) -> Option<Uuid> {
        let student_id = self.selected_student_id()?;
        self.store
            .sessions_of(student_id)
            .get(self.selected_session)
            .map(|session| session.id)
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_students().len();
        self.selected_student = self.selected_student.min(len.saturating_sub(1));
        self.clamp_session_selection();
    }

    fn clamp_session_selection(&mut self) {
        let len = self
            .selected_student_id()
            .map_or(0, |id| self.store.sessions_of(id).len());
        self.selected_session = self.selected_session.min(len.saturating_sub(1));
    }

    fn select_next(&mut self) {
        let len = self.visible_students().len();
        if len > 0 {
            self.selected_student = (self.selected_student + 1).min(len - 1);
        }
        self.selected_session = 0;
    }

    fn select_prev(&mut self) {
        self.selected_student = self.selected_student.saturating_sub(1);
        self.selected_session = 0;
    }
}

impl App {
    pub(crate) async fn tutoring_key(&mut self, action: AppAction) -> Result<()> {
        if self.state.tutoring.student_dialog.is_open() {
            self.student_dialog_key(action).await;
            return Ok(());
        }
        if self.state.tutoring.session_dialog.is_open() {
            self.session_dialog_key(action).await;
            return Ok(());
        }
        if self.state.tutoring.payment_dialog.is_open() {
            self.payment_dialog_key(action).await;
            return Ok(());
        }
        if self.state.tutoring.search_active {
            let tutoring = &mut self.state.tutoring;
            match action {
                AppAction::Input(ch) => {
                    tutoring.filter.search.push(ch);
                    tutoring.clamp_selection();
                }
                AppAction::Backspace => {
                    tutoring.filter.search.pop();
                }
                AppAction::Submit | AppAction::Cancel => tutoring.search_active = false,
                _ => {}
            }
            return Ok(());
        }

        match action {
            AppAction::Up => self.state.tutoring.select_prev(),
            AppAction::Down => self.state.tutoring.select_next(),
            AppAction::Input(ch) => match ch {
                'j' => self.state.tutoring.select_next(),
                'k' => self.state.tutoring.select_prev(),
                'n' => self.state.tutoring.student_dialog.open(StudentForm::create()),
                'e' => {
                    if let Some(id) = self.state.tutoring.selected_student_id()
                        && let Some(student) = self.state.tutoring.store.students.get(id)
                    {
                        let form = StudentForm::edit(student);
                        self.state.tutoring.student_dialog.open(form);
                    }
                }
                'd' => self.delete_student().await,
                'a' => {
                    if let Some(student_id) = self.state.tutoring.selected_student_id() {
                        self.state
                            .tutoring
                            .session_dialog
                            .open(SessionForm::for_student(student_id));
                    }
                }
                'J' => {
                    let tutoring = &mut self.state.tutoring;
                    tutoring.selected_session += 1;
                    tutoring.clamp_session_selection();
                }
                'K' => {
                    self.state.tutoring.selected_session =
                        self.state.tutoring.selected_session.saturating_sub(1);
                }
                'p' => {
                    if let Some(session_id) = self.state.tutoring.selected_session_id() {
                        self.state
                            .tutoring
                            .payment_dialog
                            .open(PaymentForm::for_session(session_id));
                    }
                }
                'P' => self.mark_session_pending().await,
                'D' => self.delete_tutoring_session().await,
                '/' => {
                    self.state.tutoring.filter.search.clear();
                    self.state.tutoring.search_active = true;
                }
                'o' => self.state.tutoring.sort = self.state.tutoring.sort.next(),
                _ => {}
            },
            _ => {}
        }
        Ok(())
    }

    async fn student_dialog_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.tutoring.student_dialog.close(),
            AppAction::NextField => {
                if let Some(form) = self.state.tutoring.student_dialog.form_mut() {
                    form.next_focus();
                }
            }
            AppAction::Backspace => {
                if let Some(form) = self.state.tutoring.student_dialog.form_mut() {
                    form.text_field_mut().pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(form) = self.state.tutoring.student_dialog.form_mut() {
                    form.text_field_mut().push(ch);
                }
            }
            AppAction::Submit => self.submit_student().await,
            _ => {}
        }
    }

    async fn submit_student(&mut self) {
        let rate = self
            .state
            .tutoring
            .student_dialog
            .form()
            .and_then(|form| parse_minor(&form.hourly_rate));
        let Some(hourly_rate_minor) = rate else {
            self.state
                .tutoring
                .student_dialog
                .reject("Hourly rate must be an amount like 45 or 45.50".to_string());
            return;
        };
        let Some(form) = self.state.tutoring.student_dialog.begin_submit() else {
            return;
        };
        let draft = StudentDraft {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            hourly_rate_minor,
            notes: form.notes.clone(),
        };
        let result = match form.id {
            Some(id) => self
                .state
                .tutoring
                .store
                .update_student(&self.gateway, id, &draft)
                .await
                .map(|_| "Student updated"),
            None => self
                .state
                .tutoring
                .store
                .create_student(&self.gateway, &draft)
                .await
                .map(|_| "Student added"),
        };
        match result {
            Ok(message) => {
                self.state.tutoring.student_dialog.resolve(Ok(()));
                self.state.tutoring.clamp_selection();
                self.toast_success(message);
            }
            Err(err) => self
                .state
                .tutoring
                .student_dialog
                .resolve(Err(err.to_string())),
        }
    }

    async fn session_dialog_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.tutoring.session_dialog.close(),
            AppAction::NextField => {
                if let Some(form) = self.state.tutoring.session_dialog.form_mut() {
                    form.next_focus();
                }
            }
            AppAction::Backspace => {
                if let Some(form) = self.state.tutoring.session_dialog.form_mut() {
                    form.text_field_mut().pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(form) = self.state.tutoring.session_dialog.form_mut() {
                    form.text_field_mut().push(ch);
                }
            }
            AppAction::Submit => self.submit_tutoring_session().await,
            _ => {}
        }
    }

    async fn submit_tutoring_session(&mut self) {
        let parsed = self.state.tutoring.session_dialog.form().and_then(|form| {
            let date = parse_date(&form.date)?;
            let time = parse_time(&form.start_time)?;
            let duration: i32 = form.duration.trim().parse().ok()?;
            Some((date, time, duration))
        });
        let Some((date, time, duration)) = parsed else {
            self.state
                .tutoring
                .session_dialog
                .reject("Need YYYY-MM-DD, HH:MM and minutes".to_string());
            return;
        };
        let Some(form) = self.state.tutoring.session_dialog.begin_submit() else {
            return;
        };
        match self
            .state
            .tutoring
            .store
            .log_session(&self.gateway, form.student_id, date, time, duration, &form.notes)
            .await
        {
            Ok(_) => {
                self.state.tutoring.session_dialog.resolve(Ok(()));
                self.toast_success("Session logged");
            }
            Err(err) => self
                .state
                .tutoring
                .session_dialog
                .resolve(Err(err.to_string())),
        }
    }

    async fn payment_dialog_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.tutoring.payment_dialog.close(),
            AppAction::NextField => {
                if let Some(form) = self.state.tutoring.payment_dialog.form_mut() {
                    form.next_focus();
                }
            }
            AppAction::Backspace => {
                if let Some(form) = self.state.tutoring.payment_dialog.form_mut() {
                    form.text_field_mut().pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(form) = self.state.tutoring.payment_dialog.form_mut() {
                    form.text_field_mut().push(ch);
                }
            }
            AppAction::Submit => self.submit_payment().await,
            _ => {}
        }
    }

    async fn submit_payment(&mut self) {
        let date = self
            .state
            .tutoring
            .payment_dialog
            .form()
            .and_then(|form| parse_date(&form.date));
        let Some(date) = date else {
            self.state
                .tutoring
                .payment_dialog
                .reject("Payment date must be YYYY-MM-DD".to_string());
            return;
        };
        let Some(form) = self.state.tutoring.payment_dialog.begin_submit() else {
            return;
        };
        match self
            .state
            .tutoring
            .store
            .mark_paid(&self.gateway, form.session_id, date, &form.method)
            .await
        {
            Ok(()) => {
                self.state.tutoring.payment_dialog.resolve(Ok(()));
                self.toast_success("Session marked paid");
            }
            Err(err) => self
                .state
                .tutoring
                .payment_dialog
                .resolve(Err(err.to_string())),
        }
    }

    async fn mark_session_pending(&mut self) {
        let Some(id) = self.state.tutoring.selected_session_id() else {
            return;
        };
        match self
            .state
            .tutoring
            .store
            .mark_pending(&self.gateway, id)
            .await
        {
            Ok(()) => self.toast_success("Session marked pending"),
            Err(err) => self.toast_error(err.to_string()),
        }
    }

    async fn delete_tutoring_session(&mut self) {
        let Some(id) = self.state.tutoring.selected_session_id() else {
            return;
        };
        match self
            .state
            .tutoring
            .store
            .delete_session(&self.gateway, id)
            .await
        {
            Ok(()) => {
                self.state.tutoring.clamp_session_selection();
                self.toast_success("Session deleted");
            }
            Err(err) => self.toast_error(err.to_string()),
        }
    }

    async fn delete_student(&mut self) {
        let Some(id) = self.state.tutoring.selected_student_id() else {
            return;
        };
        match self
            .state
            .tutoring
            .store
            .delete_student(&self.gateway, id)
            .await
        {
            Ok(()) => {
                self.state.tutoring.clamp_selection();
                self.toast_success("Student deleted");
            }
            Err(err) => self.toast_error(err.to_string()),
        }
    }
}
