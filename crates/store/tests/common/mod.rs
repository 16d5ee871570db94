//! In-memory table gateway used by the store integration tests.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use store::gateway::{GatewayError, GatewayResult, Table, TableGateway};

/// Stores rows as JSON values keyed by table name, mimicking the generic
/// row handling of the hosted API. Tests run on a single thread, so plain
/// `RefCell` interior mutability is enough.
#[derive(Default)]
pub struct FakeGateway {
    tables: RefCell<HashMap<&'static str, Vec<Value>>>,
    fail_next: RefCell<Option<GatewayError>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next gateway call fail with the given error.
    pub fn fail_next(&self, error: GatewayError) {
        *self.fail_next.borrow_mut() = Some(error);
    }

    /// Seed a row directly, bypassing the insert path.
    pub fn seed<T: Table>(&self, row: Value) {
        self.tables.borrow_mut().entry(T::NAME).or_default().push(row);
    }

    pub fn rows<T: Table>(&self) -> usize {
        self.tables
            .borrow()
            .get(T::NAME)
            .map_or(0, |rows| rows.len())
    }

    fn take_failure(&self) -> GatewayResult<()> {
        match self.fail_next.borrow_mut().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl TableGateway for FakeGateway {
    async fn select_all<T: Table>(&self) -> GatewayResult<Vec<T>> {
        self.take_failure()?;
        self.tables
            .borrow()
            .get(T::NAME)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|row| {
                serde_json::from_value(row)
                    .map_err(|err| GatewayError::Server(err.to_string()))
            })
            .collect()
    }

    async fn insert<T: Table>(&self, row: &T::Insert) -> GatewayResult<T> {
        self.take_failure()?;
        let mut value =
            serde_json::to_value(row).map_err(|err| GatewayError::Server(err.to_string()))?;
        let object = value
            .as_object_mut()
            .ok_or_else(|| GatewayError::Server("insert payload is not an object".to_string()))?;
        object.insert("id".to_string(), json!(Uuid::new_v4()));
        object.insert("created_at".to_string(), json!(Utc::now()));
        self.tables
            .borrow_mut()
            .entry(T::NAME)
            .or_default()
            .push(value.clone());
        serde_json::from_value(value).map_err(|err| GatewayError::Server(err.to_string()))
    }

    async fn update<T: Table>(&self, id: Uuid, patch: &T::Patch) -> GatewayResult<T> {
        self.take_failure()?;
        let patch =
            serde_json::to_value(patch).map_err(|err| GatewayError::Server(err.to_string()))?;
        let mut tables = self.tables.borrow_mut();
        let rows = tables.get_mut(T::NAME).ok_or(GatewayError::NotFound)?;
        let row = rows
            .iter_mut()
            .find(|row| row.get("id") == Some(&json!(id)))
            .ok_or(GatewayError::NotFound)?;
        if let (Some(target), Some(fields)) = (row.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value(row.clone()).map_err(|err| GatewayError::Server(err.to_string()))
    }

    async fn delete<T: Table>(&self, id: Uuid) -> GatewayResult<()> {
        self.take_failure()?;
        let mut tables = self.tables.borrow_mut();
        if let Some(rows) = tables.get_mut(T::NAME) {
            rows.retain(|row| row.get("id") != Some(&json!(id)));
        }
        Ok(())
    }
}
