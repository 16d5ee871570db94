//! Client-side state for the quaderno workspace.
//!
//! Each view owns a local reflected store: a typed mirror of the remote
//! tables it cares about, refreshed by full refetches and kept current by
//! merging the rows that mutations return. All remote traffic goes through
//! the [`gateway::TableGateway`] trait so the stores stay testable against
//! a fake.

pub mod collection;
pub mod counts;
pub mod dialog;
pub mod error;
pub mod focus;
pub mod gateway;
pub mod goals;
pub mod notes;
pub mod project;
pub mod records;
pub mod resources;
pub mod tasks;
pub mod tutoring;

pub use collection::Collection;
pub use dialog::DialogState;
pub use error::{ResultStore, StoreError};
pub use gateway::{GatewayError, GatewayResult, Order, Table, TableGateway};
pub use project::{Projectable, SortOrder, ViewFilter, project};
