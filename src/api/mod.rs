pub mod attendance;
pub mod employee;
pub mod health;

use crate::error::HrmError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, error::JsonPayloadError, http::StatusCode};
use serde_json::json;
use std::fmt;

/// Maps core errors onto HTTP responses with an `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError(pub HrmError);

impl From<HrmError> for ApiError {
    fn from(err: HrmError) -> Self {
        Self(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            HrmError::Validation(_) => StatusCode::BAD_REQUEST,
            HrmError::Conflict { .. } => StatusCode::CONFLICT,
            HrmError::NotFound(_) => StatusCode::NOT_FOUND,
            HrmError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match &self.0 {
            HrmError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                json!({ "error": "Internal Server Error", "kind": self.0.kind() })
            }
            HrmError::Conflict { field, message } => {
                json!({ "error": message, "kind": self.0.kind(), "field": field })
            }
            other => json!({ "error": other.to_string(), "kind": other.kind() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Missing or unparsable JSON bodies become a plain 400.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    let response = HttpResponse::BadRequest().json(json!({
        "error": "No data provided",
        "kind": "validation_error"
    }));
    actix_web::error::InternalError::from_response(err, response).into()
}
