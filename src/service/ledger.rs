use crate::error::{HrmError, HrmResult};
use crate::model::attendance::{
    AttendanceEntry, AttendanceHistory, AttendanceSummary, MarkConfirmation,
};
use crate::service::registry::EmployeeRegistry;
use crate::service::validation::validate_mark;
use crate::store::RecordStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Per-day attendance entries, one per (employee, date).
#[derive(Clone)]
pub struct AttendanceLedger {
    store: Arc<dyn RecordStore>,
    registry: EmployeeRegistry,
}

impl AttendanceLedger {
    pub fn new(store: Arc<dyn RecordStore>, registry: EmployeeRegistry) -> Self {
        Self { store, registry }
    }

    /// Record `status` for the employee on `date_str`, replacing any entry
    /// already present for that day.
    #[instrument(name = "attendance_mark", skip_all, fields(employee_id = %employee_id.trim()))]
    pub async fn mark(
        &self,
        employee_id: &str,
        date_str: &str,
        status_str: &str,
    ) -> HrmResult<MarkConfirmation> {
        let request = validate_mark(employee_id, date_str, status_str)?;

        // existence is checked here only; a concurrent delete can still orphan the row
        self.registry.get(&request.employee_id).await?;

        let entry = AttendanceEntry {
            employee_id: request.employee_id,
            date: request.date,
            status: request.status,
            updated_at: Utc::now(),
        };

        let outcome = self.store.upsert_attendance(&entry).await.map_err(|e| {
            error!(error = %e, date = %entry.date, "Failed to upsert attendance");
            HrmError::from(e)
        })?;

        info!(date = %entry.date, status = %entry.status, %outcome, "Attendance marked");
        Ok(MarkConfirmation {
            employee_id: entry.employee_id,
            date: entry.date,
            status: entry.status,
            outcome,
        })
    }

    pub async fn history(&self, employee_id: &str) -> HrmResult<AttendanceHistory> {
        let employee = self.registry.get(employee_id).await?;

        let mut records = self
            .store
            .attendance_for(&employee.employee_id)
            .await
            .map_err(|e| {
                error!(error = %e, employee_id, "Failed to fetch attendance");
                HrmError::from(e)
            })?;
        records.sort_by(|a, b| b.date.cmp(&a.date));

        let summary = AttendanceSummary::from_entries(&records);
        debug!(employee_id, total = summary.total_days_recorded, "Fetched attendance history");

        Ok(AttendanceHistory {
            employee_id: employee.employee_id,
            full_name: employee.full_name,
            records,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::{AttendanceStatus, UpsertOutcome};
    use crate::store::MemoryStore;

    async fn ledger_with_employee() -> (AttendanceLedger, EmployeeRegistry, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let registry = EmployeeRegistry::new(store.clone());
        registry
            .create("EMP-1", "Jane Roe", "jane@corp.io", "Ops")
            .await
            .unwrap();
        let ledger = AttendanceLedger::new(store.clone(), registry.clone());
        (ledger, registry, store)
    }

    #[actix_web::test]
    async fn remarking_a_day_overwrites_it() {
        let (ledger, _, store) = ledger_with_employee().await;

        let first = ledger.mark("EMP-1", "2024-03-01", "present").await.unwrap();
        let second = ledger.mark("EMP-1", "2024-03-01", "Absent").await.unwrap();

        assert_eq!(first.outcome, UpsertOutcome::Inserted);
        assert_eq!(first.status, AttendanceStatus::Present);
        assert_eq!(second.outcome, UpsertOutcome::Updated);

        let entries = store.attendance_for("EMP-1").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, AttendanceStatus::Absent);
    }

    #[actix_web::test]
    async fn marking_the_same_status_again_refreshes_timestamp() {
        let (ledger, _, store) = ledger_with_employee().await;

        ledger.mark("EMP-1", "2024-03-01", "Present").await.unwrap();
        let first = store.attendance_for("EMP-1").await.unwrap()[0].updated_at;

        actix_web::rt::time::sleep(std::time::Duration::from_millis(5)).await;
        let checkpoint = Utc::now();
        ledger.mark("EMP-1", "2024-03-01", "Present").await.unwrap();

        let entries = store.attendance_for("EMP-1").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(checkpoint > first);
        assert!(entries[0].updated_at >= checkpoint);
    }

    #[actix_web::test]
    async fn concurrent_marks_on_one_day_leave_one_entry() {
        let (ledger, _, store) = ledger_with_employee().await;

        let (a, b) = futures::future::join(
            ledger.mark("EMP-1", "2024-03-01", "Present"),
            ledger.mark("EMP-1", "2024-03-01", "Absent"),
        )
        .await;
        let a = a.unwrap();
        let b = b.unwrap();

        let mut outcomes = [a.outcome, b.outcome];
        outcomes.sort_by_key(|o| *o == UpsertOutcome::Updated);
        assert_eq!(outcomes, [UpsertOutcome::Inserted, UpsertOutcome::Updated]);

        let entries = store.attendance_for("EMP-1").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!([a.status, b.status].contains(&entries[0].status));
    }

    #[actix_web::test]
    async fn unknown_employee_is_not_found_and_writes_nothing() {
        let (ledger, _, store) = ledger_with_employee().await;

        let err = ledger.mark("ghost", "2024-03-01", "Present").await.unwrap_err();

        assert!(matches!(err, HrmError::NotFound(_)));
        assert!(store.attendance_for("ghost").await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn impossible_date_is_a_validation_error() {
        let (ledger, _, _) = ledger_with_employee().await;

        let err = ledger.mark("EMP-1", "2024-13-40", "Present").await.unwrap_err();
        assert!(matches!(err, HrmError::Validation(_)));
    }

    #[actix_web::test]
    async fn format_errors_win_over_missing_employee() {
        let (ledger, _, _) = ledger_with_employee().await;

        let err = ledger.mark("ghost", "not-a-date", "Present").await.unwrap_err();
        assert!(matches!(err, HrmError::Validation(_)));
    }

    #[actix_web::test]
    async fn history_is_newest_first_with_summary() {
        let (ledger, _, _) = ledger_with_employee().await;
        ledger.mark("EMP-1", "2024-01-01", "Present").await.unwrap();
        ledger.mark("EMP-1", "2024-01-02", "Absent").await.unwrap();
        ledger.mark("EMP-1", "2024-01-03", "Present").await.unwrap();

        let history = ledger.history("EMP-1").await.unwrap();

        let dates: Vec<_> = history.records.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, ["2024-01-03", "2024-01-02", "2024-01-01"]);
        assert_eq!(history.full_name, "Jane Roe");
        assert_eq!(
            history.summary,
            AttendanceSummary {
                total_present: 2,
                total_absent: 1,
                total_days_recorded: 3,
            }
        );
    }

    #[actix_web::test]
    async fn history_of_employee_without_entries_is_empty() {
        let (ledger, _, _) = ledger_with_employee().await;

        let history = ledger.history("EMP-1").await.unwrap();
        assert!(history.records.is_empty());
        assert_eq!(history.summary, AttendanceSummary::default());
    }

    #[actix_web::test]
    async fn history_after_delete_is_not_found() {
        let (ledger, registry, store) = ledger_with_employee().await;
        ledger.mark("EMP-1", "2024-01-01", "Present").await.unwrap();

        registry.delete("EMP-1").await.unwrap();

        assert!(matches!(
            ledger.history("EMP-1").await,
            Err(HrmError::NotFound(_))
        ));
        assert!(store.attendance_for("EMP-1").await.unwrap().is_empty());
    }
}
