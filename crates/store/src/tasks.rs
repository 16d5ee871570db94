//! Tasks and their subtasks.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use api_types::task::{SubtaskInsert, SubtaskPatch, SubtaskRow, TaskInsert, TaskPatch, TaskRow};

use crate::{
    StoreError,
    collection::Collection,
    error::ResultStore,
    gateway::TableGateway,
    records::{Subtask, Task, TaskPriority, TaskStatus},
};

/// Form payload for creating or editing a task.
#[derive(Clone, Debug, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
}

/// Local reflected store for the tasks view.
#[derive(Debug, Default)]
pub struct TaskBoard {
    user_id: Uuid,
    pub tasks: Collection<Task>,
    pub subtasks: Collection<Subtask>,
}

impl TaskBoard {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            tasks: Collection::new(),
            subtasks: Collection::new(),
        }
    }

    pub async fn refetch<G: TableGateway>(&mut self, gateway: &G) -> ResultStore<()> {
        let tasks: Vec<TaskRow> = gateway.select_all().await?;
        let subtasks: Vec<SubtaskRow> = gateway.select_all().await?;
        self.tasks
            .replace_all(tasks.into_iter().map(Task::from).collect());
        self.subtasks
            .replace_all(subtasks.into_iter().map(Subtask::from).collect());
        Ok(())
    }

    pub async fn create_task<G: TableGateway>(
        &mut self,
        gateway: &G,
        draft: &TaskDraft,
    ) -> ResultStore<Uuid> {
        let title = required(&draft.title, "Task title is required")?;
        let row: TaskRow = gateway
            .insert(&TaskInsert {
                title,
                description: non_empty(&draft.description),
                status: TaskStatus::Pending.as_str().to_string(),
                priority: draft.priority.map(|p| p.as_str().to_string()),
                due_date: draft.due_date,
                user_id: self.user_id,
            })
            .await?;
        let id = row.id;
        self.tasks.merge(Task::from(row));
        Ok(id)
    }

    pub async fn update_task<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
        draft: &TaskDraft,
    ) -> ResultStore<()> {
        let title = required(&draft.title, "Task title is required")?;
        let task = self.tasks.get(id).ok_or(StoreError::NotFound("task"))?;
        let row: TaskRow = gateway
            .update(
                id,
                &TaskPatch {
                    title,
                    description: non_empty(&draft.description),
                    status: task.status.as_str().to_string(),
                    priority: draft.priority.map(|p| p.as_str().to_string()),
                    due_date: draft.due_date,
                    completed_at: task.completed_at,
                },
            )
            .await?;
        self.tasks.merge(Task::from(row));
        Ok(())
    }

    /// Change a task's status. Entering `Completed` stamps `completed_at`,
    /// leaving it clears the stamp.
    pub async fn set_status<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
        status: TaskStatus,
    ) -> ResultStore<()> {
        let task = self.tasks.get(id).ok_or(StoreError::NotFound("task"))?;
        let completed_at = match status {
            TaskStatus::Completed => task.completed_at.or_else(|| Some(Utc::now())),
            _ => None,
        };
        let row: TaskRow = gateway
            .update(
                id,
                &TaskPatch {
                    title: task.title.clone(),
                    description: task.description.clone(),
                    status: status.as_str().to_string(),
                    priority: task.priority.map(|p| p.as_str().to_string()),
                    due_date: task.due_date,
                    completed_at,
                },
            )
            .await?;
        self.tasks.merge(Task::from(row));
        Ok(())
    }

    /// Deleting a task also drops its subtasks locally; the backend cascades
    /// the foreign key.
    pub async fn delete_task<G: TableGateway>(&mut self, gateway: &G, id: Uuid) -> ResultStore<()> {
        gateway.delete::<TaskRow>(id).await?;
        self.tasks.remove(id);
        let orphans: Vec<Uuid> = self
            .subtasks
            .iter()
            .filter(|subtask| subtask.task_id == id)
            .map(|subtask| subtask.id)
            .collect();
        for subtask_id in orphans {
            self.subtasks.remove(subtask_id);
        }
        Ok(())
    }

    pub async fn add_subtask<G: TableGateway>(
        &mut self,
        gateway: &G,
        task_id: Uuid,
        title: &str,
    ) -> ResultStore<Uuid> {
        let title = required(title, "Subtask title is required")?;
        if !self.tasks.contains(task_id) {
            return Err(StoreError::NotFound("task"));
        }
        let row: SubtaskRow = gateway
            .insert(&SubtaskInsert {
                task_id,
                title,
                status: TaskStatus::Pending.as_str().to_string(),
                user_id: self.user_id,
            })
            .await?;
        let id = row.id;
        self.subtasks.merge(Subtask::from(row));
        Ok(id)
    }

    /// Flip a subtask between pending and completed.
    pub async fn toggle_subtask<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
    ) -> ResultStore<()> {
        let subtask = self
            .subtasks
            .get(id)
            .ok_or(StoreError::NotFound("subtask"))?;
        let (status, completed_at) = match subtask.status {
            TaskStatus::Completed => (TaskStatus::Pending, None),
            _ => (TaskStatus::Completed, Some(Utc::now())),
        };
        let row: SubtaskRow = gateway
            .update(
                id,
                &SubtaskPatch {
                    status: status.as_str().to_string(),
                    completed_at,
                },
            )
            .await?;
        self.subtasks.merge(Subtask::from(row));
        Ok(())
    }

    pub async fn delete_subtask<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
    ) -> ResultStore<()> {
        gateway.delete::<SubtaskRow>(id).await?;
        self.subtasks.remove(id);
        Ok(())
    }

    pub fn subtasks_of(&self, task_id: Uuid) -> Vec<&Subtask> {
        self.subtasks
            .iter()
            .filter(|subtask| subtask.task_id == task_id)
            .collect()
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
