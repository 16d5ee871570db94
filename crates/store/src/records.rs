//! Typed in-memory records.
//!
//! Wire rows keep enum-like columns as plain strings; this module narrows
//! them into closed variants and adds the derived fields the views need
//! (currently only `Category.count`). Unknown strings map to a fallback
//! variant with a warning instead of failing a whole refetch.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use api_types::{focus, goal, note, resource, task, tutoring};

/// One row of a domain entity, identified by its remote id.
pub trait Record {
    fn id(&self) -> Uuid;
}

macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(impl Record for $ty {
            fn id(&self) -> Uuid {
                self.id
            }
        })+
    };
}

impl_record!(
    Note,
    NoteCategory,
    Resource,
    Category,
    Subcategory,
    Task,
    Subtask,
    Goal,
    Subgoal,
    FocusSession,
    FocusTask,
    Student,
    TutoringSession,
);

#[derive(Clone, Debug, PartialEq)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<note::NoteRow> for Note {
    fn from(row: note::NoteRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            category_id: row.note_category_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NoteCategory {
    pub id: Uuid,
    pub name: String,
}

impl From<note::NoteCategoryRow> for NoteCategory {
    fn from(row: note::NoteCategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Document,
    Spreadsheet,
    Link,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Spreadsheet => "spreadsheet",
            Self::Link => "link",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "document" => Some(Self::Document),
            "spreadsheet" => Some(Self::Spreadsheet),
            "link" => Some(Self::Link),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Spreadsheet => "Spreadsheet",
            Self::Link => "Link",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub kind: ResourceKind,
    pub category_id: Uuid,
    pub subcategory_id: Option<Uuid>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub file_path: Option<String>,
    pub file_size: Option<i64>,
    pub file_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<resource::ResourceRow> for Resource {
    fn from(row: resource::ResourceRow) -> Self {
        let kind = ResourceKind::parse(&row.kind).unwrap_or_else(|| {
            tracing::warn!(resource = %row.id, kind = %row.kind, "unknown resource kind, treating as document");
            ResourceKind::Document
        });
        Self {
            id: row.id,
            title: row.title,
            kind,
            category_id: row.category_id,
            subcategory_id: row.subcategory_id,
            url: row.url,
            description: row.description,
            file_path: row.file_path,
            file_size: row.file_size,
            file_type: row.file_type,
            created_at: row.created_at,
        }
    }
}

/// Resource category with its derived resource count.
///
/// `count` is never persisted; it is recomputed from the resource
/// collection after every refetch and every single resource mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub count: usize,
}

impl From<resource::CategoryRow> for Category {
    fn from(row: resource::CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            count: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Subcategory {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
}

impl From<resource::SubcategoryRow> for Subcategory {
    fn from(row: resource::SubcategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category_id: row.category_id,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<task::TaskRow> for Task {
    fn from(row: task::TaskRow) -> Self {
        let status = TaskStatus::parse(&row.status).unwrap_or_else(|| {
            tracing::warn!(task = %row.id, status = %row.status, "unknown task status, treating as pending");
            TaskStatus::Pending
        });
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            status,
            priority: row.priority.as_deref().and_then(TaskPriority::parse),
            due_date: row.due_date,
            completed_at: row.completed_at,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Subtask {
    pub id: Uuid,
    pub task_id: Uuid,
    pub title: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl From<task::SubtaskRow> for Subtask {
    fn from(row: task::SubtaskRow) -> Self {
        Self {
            id: row.id,
            task_id: row.task_id,
            title: row.title,
            status: TaskStatus::parse(&row.status).unwrap_or(TaskStatus::Pending),
            created_at: row.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<goal::GoalRow> for Goal {
    fn from(row: goal::GoalRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            target_date: row.target_date,
            completed: row.completed,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Subgoal {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub title: String,
    pub completed: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl From<goal::SubgoalRow> for Subgoal {
    fn from(row: goal::SubgoalRow) -> Self {
        Self {
            id: row.id,
            goal_id: row.goal_id,
            title: row.title,
            completed: row.completed,
            position: row.position,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FocusSession {
    pub id: Uuid,
    pub date: NaiveDate,
    pub duration_minutes: i32,
    pub actual_duration_minutes: Option<i32>,
    pub completed: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<focus::FocusSessionRow> for FocusSession {
    fn from(row: focus::FocusSessionRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            duration_minutes: row.duration_minutes,
            actual_duration_minutes: row.actual_duration_minutes,
            completed: row.completed,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FocusTask {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<focus::FocusTaskRow> for FocusTask {
    fn from(row: focus::FocusTaskRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
            completed: row.completed,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hourly_rate_minor: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<tutoring::StudentRow> for Student {
    fn from(row: tutoring::StudentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            hourly_rate_minor: row.hourly_rate_minor,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TutoringSession {
    pub id: Uuid,
    pub student_id: Uuid,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub rate_minor: i64,
    pub total_amount_minor: i64,
    pub payment_status: PaymentStatus,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<tutoring::TutoringSessionRow> for TutoringSession {
    fn from(row: tutoring::TutoringSessionRow) -> Self {
        let payment_status = PaymentStatus::parse(&row.payment_status).unwrap_or_else(|| {
            tracing::warn!(session = %row.id, status = %row.payment_status, "unknown payment status, treating as pending");
            PaymentStatus::Pending
        });
        Self {
            id: row.id,
            student_id: row.student_id,
            session_date: row.session_date,
            start_time: row.start_time,
            duration_minutes: row.duration_minutes,
            rate_minor: row.rate_minor,
            total_amount_minor: row.total_amount_minor,
            payment_status,
            payment_date: row.payment_date,
            payment_method: row.payment_method,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_kind_round_trips() {
        for kind in [
            ResourceKind::Document,
            ResourceKind::Spreadsheet,
            ResourceKind::Link,
        ] {
            assert_eq!(ResourceKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ResourceKind::parse("presentation"), None);
    }

    #[test]
    fn unknown_resource_kind_falls_back_to_document() {
        let row = resource::ResourceRow {
            id: Uuid::new_v4(),
            title: "Syllabus".to_string(),
            kind: "presentation".to_string(),
            category_id: Uuid::new_v4(),
            subcategory_id: None,
            url: None,
            description: None,
            file_path: Some("files/syllabus.pdf".to_string()),
            file_size: Some(1024),
            file_type: Some("application/pdf".to_string()),
            created_at: Utc::now(),
            user_id: Uuid::new_v4(),
        };
        let resource = Resource::from(row);
        assert_eq!(resource.kind, ResourceKind::Document);
    }
}
