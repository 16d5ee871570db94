//! Focus sessions and the standing focus task list.

use chrono::NaiveDate;
use uuid::Uuid;

use api_types::focus::{
    FocusSessionInsert, FocusSessionPatch, FocusSessionRow, FocusTaskInsert, FocusTaskPatch,
    FocusTaskRow,
};

use crate::{
    StoreError,
    collection::Collection,
    error::ResultStore,
    gateway::TableGateway,
    records::{FocusSession, FocusTask},
};

/// Local reflected store for the focus view.
#[derive(Debug, Default)]
pub struct FocusLog {
    user_id: Uuid,
    pub sessions: Collection<FocusSession>,
    pub tasks: Collection<FocusTask>,
}

impl FocusLog {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            sessions: Collection::new(),
            tasks: Collection::new(),
        }
    }

    pub async fn refetch<G: TableGateway>(&mut self, gateway: &G) -> ResultStore<()> {
        let sessions: Vec<FocusSessionRow> = gateway.select_all().await?;
        let tasks: Vec<FocusTaskRow> = gateway.select_all().await?;
        self.sessions
            .replace_all(sessions.into_iter().map(FocusSession::from).collect());
        self.tasks
            .replace_all(tasks.into_iter().map(FocusTask::from).collect());
        Ok(())
    }

    /// Open a planned session. It stays incomplete until [`complete_session`]
    /// closes it.
    ///
    /// [`complete_session`]: Self::complete_session
    pub async fn start_session<G: TableGateway>(
        &mut self,
        gateway: &G,
        date: NaiveDate,
        duration_minutes: i32,
    ) -> ResultStore<Uuid> {
        if duration_minutes <= 0 {
            return Err(StoreError::Validation(
                "Session length must be positive".to_string(),
            ));
        }
        let row: FocusSessionRow = gateway
            .insert(&FocusSessionInsert {
                date,
                duration_minutes,
                user_id: self.user_id,
            })
            .await?;
        let id = row.id;
        self.sessions.merge(FocusSession::from(row));
        Ok(id)
    }

    /// Close a session with the time actually spent.
    pub async fn complete_session<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
        actual_duration_minutes: i32,
        notes: &str,
    ) -> ResultStore<()> {
        if actual_duration_minutes < 0 {
            return Err(StoreError::Validation(
                "Session length cannot be negative".to_string(),
            ));
        }
        if !self.sessions.contains(id) {
            return Err(StoreError::NotFound("focus session"));
        }
        let row: FocusSessionRow = gateway
            .update(
                id,
                &FocusSessionPatch {
                    actual_duration_minutes: Some(actual_duration_minutes),
                    completed: true,
                    notes: non_empty(notes),
                },
            )
            .await?;
        self.sessions.merge(FocusSession::from(row));
        Ok(())
    }

    pub async fn delete_session<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
    ) -> ResultStore<()> {
        gateway.delete::<FocusSessionRow>(id).await?;
        self.sessions.remove(id);
        Ok(())
    }

    pub async fn add_task<G: TableGateway>(&mut self, gateway: &G, text: &str) -> ResultStore<Uuid> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::Validation("Task text is required".to_string()));
        }
        let row: FocusTaskRow = gateway
            .insert(&FocusTaskInsert {
                text: text.to_string(),
                user_id: self.user_id,
            })
            .await?;
        let id = row.id;
        self.tasks.merge(FocusTask::from(row));
        Ok(id)
    }

    pub async fn toggle_task<G: TableGateway>(&mut self, gateway: &G, id: Uuid) -> ResultStore<()> {
        let task = self.tasks.get(id).ok_or(StoreError::NotFound("focus task"))?;
        let row: FocusTaskRow = gateway
            .update(
                id,
                &FocusTaskPatch {
                    text: task.text.clone(),
                    completed: !task.completed,
                },
            )
            .await?;
        self.tasks.merge(FocusTask::from(row));
        Ok(())
    }

    pub async fn delete_task<G: TableGateway>(&mut self, gateway: &G, id: Uuid) -> ResultStore<()> {
        gateway.delete::<FocusTaskRow>(id).await?;
        self.tasks.remove(id);
        Ok(())
    }

    /// Total completed minutes on a day, preferring actual over planned time.
    pub fn minutes_on(&self, date: NaiveDate) -> i32 {
        self.sessions
            .iter()
            .filter(|session| session.date == date && session.completed)
            .map(|session| {
                session
                    .actual_duration_minutes
                    .unwrap_or(session.duration_minutes)
            })
            .sum()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
