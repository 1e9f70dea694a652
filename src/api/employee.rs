use crate::api::ApiError;
use crate::model::employee::Employee;
use crate::service::EmployeeRegistry;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreateEmployee {
    #[schema(example = "EMP-9001")]
    pub employee_id: String,
    #[schema(example = "Arjun Sharma")]
    pub full_name: String,
    #[schema(example = "arjun.s@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub employees: Vec<Employee>,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Object, example = json!({
            "message": "Employee added successfully!",
            "employee_id": "EMP-9001"
        })),
        (status = 400, description = "Missing field or invalid email", body = Object, example = json!({
            "error": "Invalid email format"
        })),
        (status = 409, description = "Duplicate employee_id or email", body = Object, example = json!({
            "error": "Employee ID 'EMP-9001' already exists"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    registry: web::Data<EmployeeRegistry>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let employee = registry
        .create(
            &payload.employee_id,
            &payload.full_name,
            &payload.email,
            &payload.department,
        )
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Employee added successfully!",
        "employee_id": employee.employee_id
    })))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees in insertion order", body = EmployeeListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    registry: web::Data<EmployeeRegistry>,
) -> Result<HttpResponse, ApiError> {
    let employees = registry.list().await?;
    Ok(HttpResponse::Ok().json(EmployeeListResponse { employees }))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee does not exist"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    registry: web::Data<EmployeeRegistry>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee = registry.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee and their attendance
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee and attendance deleted", body = Object, example = json!({
            "message": "Employee EMP-9001 and associated attendance deleted successfully.",
            "attendance_deleted": 5
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    registry: web::Data<EmployeeRegistry>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let deletion = registry.delete(&employee_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Employee {employee_id} and associated attendance deleted successfully."),
        "attendance_deleted": deletion.attendance_deleted
    })))
}
