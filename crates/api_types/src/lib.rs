//! Wire types for the hosted table API.
//!
//! One module per domain. Each table gets a `*Row` (what the backend
//! returns), an `*Insert` (what a create sends, without server-assigned
//! columns) and a `*Patch` (the full form payload an edit sends).
//!
//! Enum-like columns (`resources.type`, `tasks.status`, ...) stay loosely
//! typed `String`s here; the store narrows them into closed variants.
//! Columns the database fills by default (`completed`, `updated_at`,
//! payment fields) are `#[serde(default)]` so partial representations
//! still decode.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod note {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct NoteRow {
        pub id: Uuid,
        pub title: String,
        pub content: Option<String>,
        /// Nullable foreign key into `note_categories`.
        pub note_category_id: Option<Uuid>,
        pub created_at: DateTime<Utc>,
        #[serde(default)]
        pub updated_at: Option<DateTime<Utc>>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct NoteInsert {
        pub title: String,
        pub content: Option<String>,
        pub note_category_id: Option<Uuid>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct NotePatch {
        pub title: String,
        pub content: Option<String>,
        pub note_category_id: Option<Uuid>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct NoteCategoryRow {
        pub id: Uuid,
        pub name: String,
        pub created_at: DateTime<Utc>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct NoteCategoryInsert {
        pub name: String,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct NoteCategoryPatch {
        pub name: String,
    }
}

pub mod resource {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ResourceRow {
        pub id: Uuid,
        pub title: String,
        /// document | spreadsheet | link
        #[serde(rename = "type")]
        pub kind: String,
        pub category_id: Uuid,
        pub subcategory_id: Option<Uuid>,
        pub url: Option<String>,
        pub description: Option<String>,
        pub file_path: Option<String>,
        pub file_size: Option<i64>,
        pub file_type: Option<String>,
        pub created_at: DateTime<Utc>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ResourceInsert {
        pub title: String,
        #[serde(rename = "type")]
        pub kind: String,
        pub category_id: Uuid,
        pub subcategory_id: Option<Uuid>,
        pub url: Option<String>,
        pub description: Option<String>,
        pub file_path: Option<String>,
        pub file_size: Option<i64>,
        pub file_type: Option<String>,
        pub user_id: Uuid,
    }

    /// Edit payload. File columns are immutable after upload and therefore
    /// not part of the patch.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ResourcePatch {
        pub title: String,
        #[serde(rename = "type")]
        pub kind: String,
        pub category_id: Uuid,
        pub subcategory_id: Option<Uuid>,
        pub url: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CategoryRow {
        pub id: Uuid,
        pub name: String,
        pub created_at: DateTime<Utc>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryInsert {
        pub name: String,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryPatch {
        pub name: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct SubcategoryRow {
        pub id: Uuid,
        pub name: String,
        pub category_id: Uuid,
        pub created_at: DateTime<Utc>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubcategoryInsert {
        pub name: String,
        pub category_id: Uuid,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubcategoryPatch {
        pub name: String,
        pub category_id: Uuid,
    }
}

pub mod task {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TaskRow {
        pub id: Uuid,
        pub title: String,
        pub description: Option<String>,
        /// pending | in_progress | completed
        pub status: String,
        /// low | medium | high
        pub priority: Option<String>,
        pub due_date: Option<NaiveDate>,
        #[serde(default)]
        pub completed_at: Option<DateTime<Utc>>,
        pub created_at: DateTime<Utc>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TaskInsert {
        pub title: String,
        pub description: Option<String>,
        pub status: String,
        pub priority: Option<String>,
        pub due_date: Option<NaiveDate>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TaskPatch {
        pub title: String,
        pub description: Option<String>,
        pub status: String,
        pub priority: Option<String>,
        pub due_date: Option<NaiveDate>,
        pub completed_at: Option<DateTime<Utc>>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct SubtaskRow {
        pub id: Uuid,
        pub task_id: Uuid,
        pub title: String,
        pub status: String,
        #[serde(default)]
        pub completed_at: Option<DateTime<Utc>>,
        pub created_at: DateTime<Utc>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubtaskInsert {
        pub task_id: Uuid,
        pub title: String,
        pub status: String,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubtaskPatch {
        pub status: String,
        pub completed_at: Option<DateTime<Utc>>,
    }
}

pub mod goal {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct GoalRow {
        pub id: Uuid,
        pub title: String,
        pub description: Option<String>,
        pub target_date: Option<NaiveDate>,
        #[serde(default)]
        pub completed: bool,
        pub created_at: DateTime<Utc>,
        #[serde(default)]
        pub updated_at: Option<DateTime<Utc>>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalInsert {
        pub title: String,
        pub description: Option<String>,
        pub target_date: Option<NaiveDate>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalPatch {
        pub title: String,
        pub description: Option<String>,
        pub target_date: Option<NaiveDate>,
        pub completed: bool,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct SubgoalRow {
        pub id: Uuid,
        pub goal_id: Uuid,
        pub title: String,
        #[serde(default)]
        pub completed: bool,
        /// Display order inside the parent goal.
        pub position: i32,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubgoalInsert {
        pub goal_id: Uuid,
        pub title: String,
        pub position: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubgoalPatch {
        pub title: String,
        pub completed: bool,
        pub position: i32,
    }
}

pub mod focus {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct FocusSessionRow {
        pub id: Uuid,
        pub date: NaiveDate,
        /// Planned length in minutes.
        pub duration_minutes: i32,
        /// Actual length, set when the session is closed.
        #[serde(default)]
        pub actual_duration_minutes: Option<i32>,
        #[serde(default)]
        pub completed: bool,
        #[serde(default)]
        pub notes: Option<String>,
        pub created_at: DateTime<Utc>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FocusSessionInsert {
        pub date: NaiveDate,
        pub duration_minutes: i32,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FocusSessionPatch {
        pub actual_duration_minutes: Option<i32>,
        pub completed: bool,
        pub notes: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct FocusTaskRow {
        pub id: Uuid,
        pub text: String,
        #[serde(default)]
        pub completed: bool,
        pub created_at: DateTime<Utc>,
        #[serde(default)]
        pub updated_at: Option<DateTime<Utc>>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FocusTaskInsert {
        pub text: String,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FocusTaskPatch {
        pub text: String,
        pub completed: bool,
    }
}

pub mod tutoring {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct StudentRow {
        pub id: Uuid,
        pub name: String,
        pub email: Option<String>,
        pub phone: Option<String>,
        /// Hourly rate in minor currency units (cents).
        pub hourly_rate_minor: i64,
        pub notes: Option<String>,
        pub created_at: DateTime<Utc>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StudentInsert {
        pub name: String,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub hourly_rate_minor: i64,
        pub notes: Option<String>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StudentPatch {
        pub name: String,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub hourly_rate_minor: i64,
        pub notes: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TutoringSessionRow {
        pub id: Uuid,
        pub student_id: Uuid,
        pub session_date: NaiveDate,
        pub start_time: NaiveTime,
        pub duration_minutes: i32,
        /// Rate charged for this session, minor units. Snapshotted from the
        /// student's hourly rate at logging time.
        pub rate_minor: i64,
        /// rate_minor * duration_minutes / 60, computed client-side.
        pub total_amount_minor: i64,
        /// pending | paid
        pub payment_status: String,
        #[serde(default)]
        pub payment_date: Option<NaiveDate>,
        #[serde(default)]
        pub payment_method: Option<String>,
        pub notes: Option<String>,
        pub created_at: DateTime<Utc>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TutoringSessionInsert {
        pub student_id: Uuid,
        pub session_date: NaiveDate,
        pub start_time: NaiveTime,
        pub duration_minutes: i32,
        pub rate_minor: i64,
        pub total_amount_minor: i64,
        pub payment_status: String,
        pub notes: Option<String>,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TutoringSessionPatch {
        pub payment_status: String,
        pub payment_date: Option<NaiveDate>,
        pub payment_method: Option<String>,
    }
}
