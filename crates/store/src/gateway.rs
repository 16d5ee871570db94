//! Remote table gateway contract.
//!
//! The hosted backend exposes generic CRUD over named tables. The store only
//! needs four operations: an unfiltered ordered read, an insert returning
//! the created row, a patch-by-id returning the updated row, and a
//! delete-by-id. Expected failures come back as [`GatewayError`] values,
//! never as panics.

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use uuid::Uuid;

use api_types::{focus, goal, note, resource, task, tutoring};

/// Errors reported by the remote table API.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    /// Uniqueness violation (Postgres error code 23505); distinguished so
    /// duplicate names get a tailored message.
    #[error("already exists: {0}")]
    Conflict(String),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Fixed ordering applied to full-table reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub descending: bool,
}

impl Order {
    pub const CREATED_DESC: Order = Order {
        column: "created_at",
        descending: true,
    };
    pub const NAME_ASC: Order = Order {
        column: "name",
        descending: false,
    };
}

/// Binds a wire row type to its remote table.
pub trait Table: DeserializeOwned + Send {
    const NAME: &'static str;
    /// Ordering used by refetch.
    const ORDER: Order;
    type Insert: Serialize + Send + Sync;
    type Patch: Serialize + Send + Sync;

    fn row_id(&self) -> Uuid;
}

macro_rules! impl_table {
    ($row:ty, $insert:ty, $patch:ty, $name:literal, $order:expr) => {
        impl Table for $row {
            const NAME: &'static str = $name;
            const ORDER: Order = $order;
            type Insert = $insert;
            type Patch = $patch;

            fn row_id(&self) -> Uuid {
                self.id
            }
        }
    };
}

impl_table!(
    note::NoteRow,
    note::NoteInsert,
    note::NotePatch,
    "notes",
    Order::CREATED_DESC
);
impl_table!(
    note::NoteCategoryRow,
    note::NoteCategoryInsert,
    note::NoteCategoryPatch,
    "note_categories",
    Order::NAME_ASC
);
impl_table!(
    resource::ResourceRow,
    resource::ResourceInsert,
    resource::ResourcePatch,
    "resources",
    Order::CREATED_DESC
);
impl_table!(
    resource::CategoryRow,
    resource::CategoryInsert,
    resource::CategoryPatch,
    "categories",
    Order::NAME_ASC
);
impl_table!(
    resource::SubcategoryRow,
    resource::SubcategoryInsert,
    resource::SubcategoryPatch,
    "subcategories",
    Order::NAME_ASC
);
impl_table!(
    task::TaskRow,
    task::TaskInsert,
    task::TaskPatch,
    "tasks",
    Order::CREATED_DESC
);
impl_table!(
    task::SubtaskRow,
    task::SubtaskInsert,
    task::SubtaskPatch,
    "subtasks",
    Order::CREATED_DESC
);
impl_table!(
    goal::GoalRow,
    goal::GoalInsert,
    goal::GoalPatch,
    "goals",
    Order::CREATED_DESC
);
impl_table!(
    goal::SubgoalRow,
    goal::SubgoalInsert,
    goal::SubgoalPatch,
    "subgoals",
    Order::CREATED_DESC
);
impl_table!(
    focus::FocusSessionRow,
    focus::FocusSessionInsert,
    focus::FocusSessionPatch,
    "focus_sessions",
    Order::CREATED_DESC
);
impl_table!(
    focus::FocusTaskRow,
    focus::FocusTaskInsert,
    focus::FocusTaskPatch,
    "focus_tasks",
    Order::CREATED_DESC
);
impl_table!(
    tutoring::StudentRow,
    tutoring::StudentInsert,
    tutoring::StudentPatch,
    "tutoring_students",
    Order::NAME_ASC
);
impl_table!(
    tutoring::TutoringSessionRow,
    tutoring::TutoringSessionInsert,
    tutoring::TutoringSessionPatch,
    "tutoring_sessions",
    Order::CREATED_DESC
);

/// Generic CRUD against the remote table API.
///
/// Implemented by the HTTP client in the TUI crate and by an in-memory fake
/// in the store tests.
#[allow(async_fn_in_trait)]
pub trait TableGateway {
    /// Full-table read, ordered by [`Table::ORDER`]. No pagination: the
    /// collections are user-scoped and small.
    async fn select_all<T: Table>(&self) -> GatewayResult<Vec<T>>;

    /// Insert one row, returning the created row with server-assigned
    /// columns filled in.
    async fn insert<T: Table>(&self, row: &T::Insert) -> GatewayResult<T>;

    /// Patch the row with the given id, returning the updated row.
    async fn update<T: Table>(&self, id: Uuid, patch: &T::Patch) -> GatewayResult<T>;

    /// Delete the row with the given id.
    async fn delete<T: Table>(&self, id: Uuid) -> GatewayResult<()>;
}
