//! The module contains the errors the store can throw.
//!
//! Validation errors are detected before any remote call; gateway errors
//! wrap whatever the remote table API reported. Both are scoped to the
//! single attempted action, nothing here is fatal.

use thiserror::Error;

use crate::gateway::GatewayError;

/// Store custom errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required field is missing or malformed. No remote call was issued.
    #[error("{0}")]
    Validation(String),
    /// A delete was refused because dependent records still reference the
    /// target (client-side pre-check, not a database constraint).
    #[error("cannot delete {entity}: {dependents} still reference it")]
    InUse {
        entity: &'static str,
        dependents: &'static str,
    },
    /// The referenced record is not in the local collection.
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl StoreError {
    /// True when the user can fix the problem by editing the form.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type ResultStore<T> = Result<T, StoreError>;
