use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "employee_id": "EMP-9001",
        "full_name": "Arjun Sharma",
        "email": "arjun.s@company.com",
        "department": "Engineering",
        "created_at": "2024-01-01T09:00:00Z"
    })
)]
pub struct Employee {
    #[schema(example = "EMP-9001")]
    pub employee_id: String,

    #[schema(example = "Arjun Sharma")]
    pub full_name: String,

    #[schema(example = "arjun.s@company.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "2024-01-01T09:00:00Z", value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

/// Employee fields that passed validation but have not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

impl NewEmployee {
    pub fn stamp(self, created_at: DateTime<Utc>) -> Employee {
        Employee {
            employee_id: self.employee_id,
            full_name: self.full_name,
            email: self.email,
            department: self.department,
            created_at,
        }
    }
}
