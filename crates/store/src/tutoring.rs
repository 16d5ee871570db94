//! Tutoring students and session ledger.
//!
//! All money is carried in minor currency units. A session snapshots the
//! student's hourly rate at logging time, so later rate changes never
//! rewrite history.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use api_types::tutoring::{
    StudentInsert, StudentPatch, StudentRow, TutoringSessionInsert, TutoringSessionPatch,
    TutoringSessionRow,
};

use crate::{
    StoreError,
    collection::Collection,
    error::ResultStore,
    gateway::TableGateway,
    records::{PaymentStatus, Student, TutoringSession},
};

/// Form payload for creating or editing a student.
#[derive(Clone, Debug, Default)]
pub struct StudentDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub hourly_rate_minor: i64,
    pub notes: String,
}

/// Local reflected store for the tutoring view.
#[derive(Debug, Default)]
pub struct TutoringLedger {
    user_id: Uuid,
    pub students: Collection<Student>,
    pub sessions: Collection<TutoringSession>,
}

impl TutoringLedger {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            students: Collection::new(),
            sessions: Collection::new(),
        }
    }

    pub async fn refetch<G: TableGateway>(&mut self, gateway: &G) -> ResultStore<()> {
        let students: Vec<StudentRow> = gateway.select_all().await?;
        let sessions: Vec<TutoringSessionRow> = gateway.select_all().await?;
        self.students
            .replace_all(students.into_iter().map(Student::from).collect());
        self.sessions
            .replace_all(sessions.into_iter().map(TutoringSession::from).collect());
        Ok(())
    }

    pub async fn create_student<G: TableGateway>(
        &mut self,
        gateway: &G,
        draft: &StudentDraft,
    ) -> ResultStore<Uuid> {
        let name = required(&draft.name, "Student name is required")?;
        if draft.hourly_rate_minor < 0 {
            return Err(StoreError::Validation(
                "Hourly rate cannot be negative".to_string(),
            ));
        }
        let row: StudentRow = gateway
            .insert(&StudentInsert {
                name,
                email: non_empty(&draft.email),
                phone: non_empty(&draft.phone),
                hourly_rate_minor: draft.hourly_rate_minor,
                notes: non_empty(&draft.notes),
                user_id: self.user_id,
            })
            .await?;
        let id = row.id;
        self.students.merge(Student::from(row));
        Ok(id)
    }

    pub async fn update_student<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
        draft: &StudentDraft,
    ) -> ResultStore<()> {
        let name = required(&draft.name, "Student name is required")?;
        if draft.hourly_rate_minor < 0 {
            return Err(StoreError::Validation(
                "Hourly rate cannot be negative".to_string(),
            ));
        }
        let row: StudentRow = gateway
            .update(
                id,
                &StudentPatch {
                    name,
                    email: non_empty(&draft.email),
                    phone: non_empty(&draft.phone),
                    hourly_rate_minor: draft.hourly_rate_minor,
                    notes: non_empty(&draft.notes),
                },
            )
            .await?;
        self.students.merge(Student::from(row));
        Ok(())
    }

    /// Refused while any logged session still references the student.
    pub async fn delete_student<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
    ) -> ResultStore<()> {
        let in_use = self
            .sessions
            .iter()
            .any(|session| session.student_id == id);
        if in_use {
            return Err(StoreError::InUse {
                entity: "student",
                dependents: "sessions",
            });
        }
        gateway.delete::<StudentRow>(id).await?;
        self.students.remove(id);
        Ok(())
    }

    /// Log a session. The rate is snapshotted from the student and the
    /// total derives from it pro rata by the minute.
    pub async fn log_session<G: TableGateway>(
        &mut self,
        gateway: &G,
        student_id: Uuid,
        session_date: NaiveDate,
        start_time: NaiveTime,
        duration_minutes: i32,
        notes: &str,
    ) -> ResultStore<Uuid> {
        if duration_minutes <= 0 {
            return Err(StoreError::Validation(
                "Session length must be positive".to_string(),
            ));
        }
        let student = self
            .students
            .get(student_id)
            .ok_or(StoreError::NotFound("student"))?;
        let rate_minor = student.hourly_rate_minor;
        let total_amount_minor = rate_minor * i64::from(duration_minutes) / 60;
        let row: TutoringSessionRow = gateway
            .insert(&TutoringSessionInsert {
                student_id,
                session_date,
                start_time,
                duration_minutes,
                rate_minor,
                total_amount_minor,
                payment_status: PaymentStatus::Pending.as_str().to_string(),
                notes: non_empty(notes),
                user_id: self.user_id,
            })
            .await?;
        let id = row.id;
        self.sessions.merge(TutoringSession::from(row));
        Ok(id)
    }

    pub async fn mark_paid<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
        payment_date: NaiveDate,
        payment_method: &str,
    ) -> ResultStore<()> {
        if !self.sessions.contains(id) {
            return Err(StoreError::NotFound("session"));
        }
        let row: TutoringSessionRow = gateway
            .update(
                id,
                &TutoringSessionPatch {
                    payment_status: PaymentStatus::Paid.as_str().to_string(),
                    payment_date: Some(payment_date),
                    payment_method: non_empty(payment_method),
                },
            )
            .await?;
        self.sessions.merge(TutoringSession::from(row));
        Ok(())
    }

    pub async fn mark_pending<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
    ) -> ResultStore<()> {
        if !self.sessions.contains(id) {
            return Err(StoreError::NotFound("session"));
        }
        let row: TutoringSessionRow = gateway
            .update(
                id,
                &TutoringSessionPatch {
                    payment_status: PaymentStatus::Pending.as_str().to_string(),
                    payment_date: None,
                    payment_method: None,
                },
            )
            .await?;
        self.sessions.merge(TutoringSession::from(row));
        Ok(())
    }

    pub async fn delete_session<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
    ) -> ResultStore<()> {
        gateway.delete::<TutoringSessionRow>(id).await?;
        self.sessions.remove(id);
        Ok(())
    }

    pub fn sessions_of(&self, student_id: Uuid) -> Vec<&TutoringSession> {
        self.sessions
            .iter()
            .filter(|session| session.student_id == student_id)
            .collect()
    }

    /// Minor units still unpaid for a student.
    pub fn outstanding_minor(&self, student_id: Uuid) -> i64 {
        self.sessions
            .iter()
            .filter(|session| {
                session.student_id == student_id
                    && session.payment_status == PaymentStatus::Pending
            })
            .map(|session| session.total_amount_minor)
            .sum()
    }
}

fn required(value: &str, message: &str) -> ResultStore<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
