use crate::error::{HrmError, HrmResult};
use crate::model::attendance::AttendanceStatus;
use crate::model::employee::NewEmployee;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.\-]+@[A-Za-z0-9_.\-]+\.[A-Za-z0-9_]+$")
        .expect("email pattern must compile")
});

// ASCII digits and dashes only, checked before chrono parses the value
static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$").expect("date pattern must compile"));

/// Longest value the employee columns hold.
pub const MAX_FIELD_CHARS: usize = 255;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn validate_new_employee(
    employee_id: &str,
    full_name: &str,
    email: &str,
    department: &str,
) -> HrmResult<NewEmployee> {
    let employee_id = employee_id.trim();
    let full_name = full_name.trim();
    let email = email.trim();
    let department = department.trim();

    if employee_id.is_empty() || full_name.is_empty() || email.is_empty() || department.is_empty()
    {
        return Err(HrmError::validation(
            "employee_id, full_name, email, and department are required",
        ));
    }

    if !is_valid_email(email) {
        return Err(HrmError::validation("Invalid email format"));
    }

    if [employee_id, full_name, email, department]
        .iter()
        .any(|field| field.chars().count() > MAX_FIELD_CHARS)
    {
        return Err(HrmError::validation(format!(
            "employee_id, full_name, email, and department must be at most {MAX_FIELD_CHARS} characters"
        )));
    }

    Ok(NewEmployee {
        employee_id: employee_id.to_string(),
        full_name: full_name.to_string(),
        email: email.to_string(),
        department: department.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkRequest {
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

pub fn validate_mark(employee_id: &str, date_str: &str, status_str: &str) -> HrmResult<MarkRequest> {
    let employee_id = employee_id.trim();
    let date_str = date_str.trim();
    let status_str = capitalize(status_str.trim());

    if employee_id.is_empty() || date_str.is_empty() || status_str.is_empty() {
        return Err(HrmError::validation(
            "employee_id, date, and status are required",
        ));
    }

    let status = status_str
        .parse::<AttendanceStatus>()
        .map_err(|_| HrmError::validation("Status must be either 'Present' or 'Absent'"))?;

    let date = Some(date_str)
        .filter(|raw| DATE_PATTERN.is_match(raw))
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .ok_or_else(|| HrmError::validation("Invalid date format. Please use YYYY-MM-DD"))?;

    Ok(MarkRequest {
        employee_id: employee_id.to_string(),
        date,
        status,
    })
}
