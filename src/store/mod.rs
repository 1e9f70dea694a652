//! Persistence capability used by the registry and the ledger.

use crate::model::attendance::{AttendanceEntry, UpsertOutcome};
use crate::model::employee::Employee;
use async_trait::async_trait;
use serde::Serialize;
use strum_macros::Display;
use thiserror::Error;

pub mod memory;
pub mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

/// Employee field guarded by a uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UniqueField {
    EmployeeId,
    Email,
    /// The store rejected the write but could not say which constraint.
    Unknown,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate value for unique field `{0}`")]
    DuplicateKey(UniqueField),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored record is invalid: {0}")]
    Corrupt(String),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Record store contract.
///
/// Uniqueness of `employee_id` and `email` must be enforced by the
/// implementation itself, and `upsert_attendance` must be atomic per
/// (`employee_id`, `date`).
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new employee, failing with [`StoreError::DuplicateKey`] on a
    /// uniqueness violation.
    async fn insert_employee(&self, employee: &Employee) -> Result<(), StoreError>;

    async fn find_employee(&self, employee_id: &str) -> Result<Option<Employee>, StoreError>;

    /// All employees in insertion order.
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;

    async fn delete_employee(&self, employee_id: &str) -> Result<u64, StoreError>;

    /// Entries for one employee, most recent date first.
    async fn attendance_for(&self, employee_id: &str) -> Result<Vec<AttendanceEntry>, StoreError>;

    async fn delete_attendance_for(&self, employee_id: &str) -> Result<u64, StoreError>;

    async fn upsert_attendance(&self, entry: &AttendanceEntry) -> Result<UpsertOutcome, StoreError>;
}
