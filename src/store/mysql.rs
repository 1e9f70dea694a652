use super::{RecordStore, StoreError, UniqueField};
use crate::model::attendance::{AttendanceEntry, AttendanceStatus, UpsertOutcome};
use crate::model::employee::Employee;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, MySqlPool};
use tracing::{debug, error};

/// Unique key names created by `db::ensure_schema`.
pub(crate) const EMPLOYEE_ID_KEY: &str = "uq_employees_employee_id";
pub(crate) const EMAIL_KEY: &str = "uq_employees_email";

#[derive(FromRow)]
struct EmployeeRow {
    employee_id: String,
    full_name: String,
    email: String,
    department: String,
    created_at: DateTime<Utc>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            employee_id: row.employee_id,
            full_name: row.full_name,
            email: row.email,
            department: row.department,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct AttendanceRow {
    employee_id: String,
    date: NaiveDate,
    status: String,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AttendanceRow> for AttendanceEntry {
    type Error = StoreError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<AttendanceStatus>().map_err(|_| {
            StoreError::Corrupt(format!(
                "attendance status '{}' for {} on {}",
                row.status, row.employee_id, row.date
            ))
        })?;

        Ok(AttendanceEntry {
            employee_id: row.employee_id,
            date: row.date,
            status,
            updated_at: row.updated_at,
        })
    }
}

/// Work out which unique key a MySQL duplicate-entry message refers to.
///
/// MySQL reports `Duplicate entry '<value>' for key '<table>.<key>'`; only the
/// key name is looked at, never the offending value.
pub(crate) fn duplicate_field(message: &str) -> UniqueField {
    let key = message
        .rsplit_once(" for key ")
        .map(|(_, key)| key)
        .unwrap_or_default();

    if key.contains(EMPLOYEE_ID_KEY) {
        UniqueField::EmployeeId
    } else if key.contains(EMAIL_KEY) {
        UniqueField::Email
    } else {
        UniqueField::Unknown
    }
}

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Remove every employee and attendance row. Used by the seed tool.
    pub async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM attendance")
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM employees")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MySqlStore {
    async fn insert_employee(&self, employee: &Employee) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (employee_id, full_name, email, department, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.employee_id)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(employee.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return Err(StoreError::DuplicateKey(duplicate_field(db_err.message())));
                    }
                }

                error!(error = %e, employee_id = %employee.employee_id, "Employee insert failed");
                Err(e.into())
            }
        }
    }

    async fn find_employee(&self, employee_id: &str) -> Result<Option<Employee>, StoreError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT employee_id, full_name, email, department, created_at
            FROM employees
            WHERE employee_id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Employee::from))
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT employee_id, full_name, email, department, created_at
            FROM employees
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Fetched employees");
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn delete_employee(&self, employee_id: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn attendance_for(&self, employee_id: &str) -> Result<Vec<AttendanceEntry>, StoreError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT employee_id, date, status, updated_at
            FROM attendance
            WHERE employee_id = ?
            ORDER BY date DESC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttendanceEntry::try_from).collect()
    }

    async fn delete_attendance_for(&self, employee_id: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM attendance WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn upsert_attendance(&self, entry: &AttendanceEntry) -> Result<UpsertOutcome, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, date, status, updated_at)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                status = VALUES(status),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(&entry.employee_id)
        .bind(entry.date)
        .bind(entry.status.to_string())
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await?;

        // MySQL counts an inserted row as 1 and an updated row as 2
        match result.rows_affected() {
            1 => Ok(UpsertOutcome::Inserted),
            _ => Ok(UpsertOutcome::Updated),
        }
    }
}
