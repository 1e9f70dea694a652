use super::{RecordStore, StoreError, UniqueField};
use crate::model::attendance::{AttendanceEntry, UpsertOutcome};
use crate::model::employee::Employee;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
struct Collections {
    employees: Vec<Employee>,
    attendance: BTreeMap<(String, NaiveDate), AttendanceEntry>,
}

/// In-process store. Every write takes the same lock, which is what makes
/// insert-unique and upsert atomic here.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_employee(&self, employee: &Employee) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;

        if inner
            .employees
            .iter()
            .any(|e| e.employee_id == employee.employee_id)
        {
            return Err(StoreError::DuplicateKey(UniqueField::EmployeeId));
        }
        if inner.employees.iter().any(|e| e.email == employee.email) {
            return Err(StoreError::DuplicateKey(UniqueField::Email));
        }

        inner.employees.push(employee.clone());
        Ok(())
    }

    async fn find_employee(&self, employee_id: &str) -> Result<Option<Employee>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner
            .employees
            .iter()
            .find(|e| e.employee_id == employee_id)
            .cloned())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.employees.clone())
    }

    async fn delete_employee(&self, employee_id: &str) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        match inner
            .employees
            .iter()
            .position(|e| e.employee_id == employee_id)
        {
            Some(index) => {
                inner.employees.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn attendance_for(&self, employee_id: &str) -> Result<Vec<AttendanceEntry>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        // keys are ordered by (employee_id, date); walking backwards yields newest first
        Ok(inner
            .attendance
            .values()
            .filter(|entry| entry.employee_id == employee_id)
            .rev()
            .cloned()
            .collect())
    }

    async fn delete_attendance_for(&self, employee_id: &str) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let before = inner.attendance.len();
        inner
            .attendance
            .retain(|(owner, _), _| owner.as_str() != employee_id);
        Ok((before - inner.attendance.len()) as u64)
    }

    async fn upsert_attendance(&self, entry: &AttendanceEntry) -> Result<UpsertOutcome, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let key = (entry.employee_id.clone(), entry.date);
        match inner.attendance.insert(key, entry.clone()) {
            Some(_) => Ok(UpsertOutcome::Updated),
            None => Ok(UpsertOutcome::Inserted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::AttendanceStatus;
    use chrono::Utc;

    fn employee(id: &str, email: &str) -> Employee {
        Employee {
            employee_id: id.to_string(),
            full_name: "Test Person".to_string(),
            email: email.to_string(),
            department: "QA".to_string(),
            created_at: Utc::now(),
        }
    }

    fn entry(id: &str, date: &str, status: AttendanceStatus) -> AttendanceEntry {
        AttendanceEntry {
            employee_id: id.to_string(),
            date: date.parse().unwrap(),
            status,
            updated_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn insert_reports_the_violated_field() {
        let store = MemoryStore::new();
        store.insert_employee(&employee("E1", "a@x.io")).await.unwrap();

        let by_id = store.insert_employee(&employee("E1", "b@x.io")).await;
        assert!(matches!(
            by_id,
            Err(StoreError::DuplicateKey(UniqueField::EmployeeId))
        ));

        let by_email = store.insert_employee(&employee("E2", "a@x.io")).await;
        assert!(matches!(
            by_email,
            Err(StoreError::DuplicateKey(UniqueField::Email))
        ));

        assert_eq!(store.list_employees().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn identity_matching_is_case_sensitive() {
        let store = MemoryStore::new();
        store.insert_employee(&employee("EMP-1", "a@x.io")).await.unwrap();
        store.insert_employee(&employee("emp-1", "A@x.io")).await.unwrap();

        assert_eq!(
            store.find_employee("emp-1").await.unwrap().map(|e| e.email),
            Some("A@x.io".to_string())
        );
        assert_eq!(store.delete_employee("Emp-1").await.unwrap(), 0);
        assert_eq!(store.list_employees().await.unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryStore::new();
        for (id, email) in [("E3", "c@x.io"), ("E1", "a@x.io"), ("E2", "b@x.io")] {
            store.insert_employee(&employee(id, email)).await.unwrap();
        }

        let ids: Vec<_> = store
            .list_employees()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.employee_id)
            .collect();
        assert_eq!(ids, ["E3", "E1", "E2"]);
    }

    #[actix_web::test]
    async fn upsert_overwrites_same_key() {
        let store = MemoryStore::new();

        let first = store
            .upsert_attendance(&entry("E1", "2024-03-01", AttendanceStatus::Present))
            .await
            .unwrap();
        let second = store
            .upsert_attendance(&entry("E1", "2024-03-01", AttendanceStatus::Absent))
            .await
            .unwrap();

        assert_eq!(first, UpsertOutcome::Inserted);
        assert_eq!(second, UpsertOutcome::Updated);

        let entries = store.attendance_for("E1").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, AttendanceStatus::Absent);
    }

    #[actix_web::test]
    async fn attendance_is_scoped_and_sorted_newest_first() {
        let store = MemoryStore::new();
        for date in ["2024-01-02", "2024-01-03", "2024-01-01"] {
            store
                .upsert_attendance(&entry("E1", date, AttendanceStatus::Present))
                .await
                .unwrap();
        }
        store
            .upsert_attendance(&entry("E2", "2024-01-05", AttendanceStatus::Absent))
            .await
            .unwrap();

        let dates: Vec<_> = store
            .attendance_for("E1")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.date.to_string())
            .collect();
        assert_eq!(dates, ["2024-01-03", "2024-01-02", "2024-01-01"]);
    }

    #[actix_web::test]
    async fn delete_attendance_leaves_other_employees() {
        let store = MemoryStore::new();
        store
            .upsert_attendance(&entry("E1", "2024-01-01", AttendanceStatus::Present))
            .await
            .unwrap();
        store
            .upsert_attendance(&entry("E1", "2024-01-02", AttendanceStatus::Absent))
            .await
            .unwrap();
        store
            .upsert_attendance(&entry("E2", "2024-01-01", AttendanceStatus::Present))
            .await
            .unwrap();

        assert_eq!(store.delete_attendance_for("E1").await.unwrap(), 2);
        assert!(store.attendance_for("E1").await.unwrap().is_empty());
        assert_eq!(store.attendance_for("E2").await.unwrap().len(), 1);
        assert_eq!(store.delete_attendance_for("E1").await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn delete_missing_employee_counts_zero() {
        let store = MemoryStore::new();
        store.insert_employee(&employee("E1", "a@x.io")).await.unwrap();

        assert_eq!(store.delete_employee("nope").await.unwrap(), 0);
        assert_eq!(store.delete_employee("E1").await.unwrap(), 1);
        assert!(store.find_employee("E1").await.unwrap().is_none());
    }
}
