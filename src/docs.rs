use crate::api::attendance::MarkAttendance;
use crate::api::employee::{CreateEmployee, EmployeeListResponse};
use crate::model::attendance::{
    AttendanceEntry, AttendanceHistory, AttendanceStatus, AttendanceSummary, UpsertOutcome,
};
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "0.1.0",
        description = r#"
## HRMS Lite

A small human-resource record service.

### Key Features
- **Employee Management**
  - Add, list, view and delete employee profiles
  - `employee_id` and `email` are unique
  - Deleting an employee removes their attendance too
- **Attendance Management**
  - Mark an employee `Present` or `Absent` for a date; marking the same date again overwrites it
  - View an employee's history, newest first, with present/absent totals

### Response Format
- JSON bodies
- Errors are `{"error": "...", "kind": "..."}` with 400, 404, 409 or 500

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::health::health_check,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::get_attendance
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            EmployeeListResponse,
            MarkAttendance,
            AttendanceStatus,
            AttendanceEntry,
            AttendanceSummary,
            AttendanceHistory,
            UpsertOutcome
        )
    ),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;
