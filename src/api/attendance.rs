use crate::api::ApiError;
use crate::service::AttendanceLedger;
use crate::model::attendance::AttendanceHistory;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct MarkAttendance {
    #[schema(example = "EMP-9001")]
    pub employee_id: String,
    #[schema(example = "2024-03-01", format = "date")]
    pub date: String,
    /// `Present` or `Absent`, any letter case.
    #[schema(example = "Present")]
    pub status: String,
}

/// Mark attendance for one day
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 200, description = "Attendance recorded", body = Object, example = json!({
            "message": "Attendance marked as Present for 2024-03-01",
            "outcome": "inserted"
        })),
        (status = 400, description = "Missing field, bad status or bad date", body = Object, example = json!({
            "error": "Invalid date format. Please use YYYY-MM-DD"
        })),
        (status = 404, description = "Employee does not exist", body = Object, example = json!({
            "error": "Employee does not exist"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    ledger: web::Data<AttendanceLedger>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, ApiError> {
    let confirmation = ledger
        .mark(&payload.employee_id, &payload.date, &payload.status)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": confirmation.message(),
        "outcome": confirmation.outcome
    })))
}

/// Attendance history and summary for an employee
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Records newest first, with totals", body = AttendanceHistory),
        (status = 404, description = "Employee does not exist", body = Object, example = json!({
            "error": "Employee does not exist"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn get_attendance(
    ledger: web::Data<AttendanceLedger>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let history = ledger.history(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(history))
}
