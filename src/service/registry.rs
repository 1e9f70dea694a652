use crate::error::{HrmError, HrmResult};
use crate::model::employee::Employee;
use crate::service::validation::validate_new_employee;
use crate::store::{RecordStore, StoreError, UniqueField};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Owns the employee lifecycle.
#[derive(Clone)]
pub struct EmployeeRegistry {
    store: Arc<dyn RecordStore>,
}

/// Result of a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deletion {
    pub employees_deleted: u64,
    pub attendance_deleted: u64,
}

fn conflict_message(field: UniqueField, employee: &Employee) -> String {
    match field {
        UniqueField::EmployeeId => {
            format!("Employee ID '{}' already exists", employee.employee_id)
        }
        UniqueField::Email => format!(
            "Email '{}' is already registered to another employee",
            employee.email
        ),
        UniqueField::Unknown => "Duplicate key error".to_string(),
    }
}

impl EmployeeRegistry {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    #[instrument(name = "employee_create", skip_all, fields(employee_id = %employee_id.trim()))]
    pub async fn create(
        &self,
        employee_id: &str,
        full_name: &str,
        email: &str,
        department: &str,
    ) -> HrmResult<Employee> {
        let employee = validate_new_employee(employee_id, full_name, email, department)?
            .stamp(Utc::now());

        match self.store.insert_employee(&employee).await {
            Ok(()) => {
                info!("Employee created");
                Ok(employee)
            }
            Err(StoreError::DuplicateKey(field)) => {
                warn!(%field, "Employee rejected as duplicate");
                Err(HrmError::Conflict {
                    field,
                    message: conflict_message(field, &employee),
                })
            }
            Err(e) => {
                error!(error = %e, "Failed to create employee");
                Err(e.into())
            }
        }
    }

    pub async fn list(&self) -> HrmResult<Vec<Employee>> {
        let employees = self.store.list_employees().await.map_err(|e| {
            error!(error = %e, "Failed to list employees");
            HrmError::from(e)
        })?;

        debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    pub async fn get(&self, employee_id: &str) -> HrmResult<Employee> {
        self.store
            .find_employee(employee_id)
            .await
            .map_err(|e| {
                error!(error = %e, employee_id, "Failed to fetch employee");
                HrmError::from(e)
            })?
            .ok_or_else(|| HrmError::not_found("Employee does not exist"))
    }

    /// Delete the employee, then every attendance entry it owns.
    ///
    /// The two deletes are separate store calls. The employee row always goes
    /// first, so an interruption can only leave orphaned attendance rows.
    #[instrument(name = "employee_delete", skip(self))]
    pub async fn delete(&self, employee_id: &str) -> HrmResult<Deletion> {
        let employees_deleted = self.store.delete_employee(employee_id).await.map_err(|e| {
            error!(error = %e, "Failed to delete employee");
            HrmError::from(e)
        })?;

        if employees_deleted == 0 {
            return Err(HrmError::not_found("Employee not found"));
        }

        let attendance_deleted = self
            .store
            .delete_attendance_for(employee_id)
            .await
            .map_err(|e| {
                error!(error = %e, "Employee deleted but attendance cascade failed");
                HrmError::from(e)
            })?;

        info!(attendance_deleted, "Employee and attendance deleted");
        Ok(Deletion {
            employees_deleted,
            attendance_deleted,
        })
    }
}
