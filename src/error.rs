//! Errors surfaced by the employee registry and attendance ledger.
//!
//! Nothing here knows about HTTP; `api` maps each kind to a status code.

use crate::store::{StoreError, UniqueField};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HrmError {
    /// Malformed or missing input. Always caller-fixable.
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Conflict { field: UniqueField, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("record store failure")]
    Internal(#[source] StoreError),
}

impl HrmError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Short machine-readable tag for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Conflict { .. } => "conflict_error",
            Self::NotFound(_) => "not_found_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl From<StoreError> for HrmError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err)
    }
}

pub type HrmResult<T> = Result<T, HrmError>;
