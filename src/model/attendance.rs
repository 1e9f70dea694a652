use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceEntry {
    #[schema(example = "EMP-9001")]
    pub employee_id: String,

    #[schema(example = "2024-03-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub status: AttendanceStatus,

    #[schema(example = "2024-03-01T09:00:00Z", value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

/// Whether an upsert created a new entry or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct AttendanceSummary {
    #[schema(example = 2)]
    pub total_present: usize,
    #[schema(example = 1)]
    pub total_absent: usize,
    #[schema(example = 3)]
    pub total_days_recorded: usize,
}

impl AttendanceSummary {
    pub fn from_entries(entries: &[AttendanceEntry]) -> Self {
        let total_present = entries
            .iter()
            .filter(|e| e.status == AttendanceStatus::Present)
            .count();
        let total_absent = entries
            .iter()
            .filter(|e| e.status == AttendanceStatus::Absent)
            .count();

        Self {
            total_present,
            total_absent,
            total_days_recorded: entries.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AttendanceHistory {
    #[schema(example = "EMP-9001")]
    pub employee_id: String,
    #[schema(example = "Arjun Sharma")]
    pub full_name: String,
    /// Most recent date first.
    pub records: Vec<AttendanceEntry>,
    pub summary: AttendanceSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MarkConfirmation {
    #[schema(example = "EMP-9001")]
    pub employee_id: String,
    #[schema(example = "2024-03-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub outcome: UpsertOutcome,
}

impl MarkConfirmation {
    pub fn message(&self) -> String {
        format!("Attendance marked as {} for {}", self.status, self.date)
    }
}
