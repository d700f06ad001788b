use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use service::errors::ServiceError;
use service::validation::{FieldError, ValidationErrors};

/// The single translation point from failures to HTTP responses.
///
/// Renders `{"errors": "<message>", "details": [{field, message}]}`; `details`
/// only appears for validation failures.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<ValidationErrors>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    errors: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [FieldError]>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, details: Option<ValidationErrors>) -> Self {
        Self { status, message: message.into(), details }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, None)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", None)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { errors: &self.message, details: self.details.as_ref().map(|d| d.fields()) };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(v) => Self::new(StatusCode::BAD_REQUEST, v.to_string(), Some(v)),
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, m, None),
            ServiceError::Unauthorized(m) => Self::new(StatusCode::UNAUTHORIZED, m, None),
            ServiceError::Conflict(m) => Self::new(StatusCode::CONFLICT, m, None),
            other @ (ServiceError::Hash(_) | ServiceError::Db(_)) => {
                error!(code = other.code(), error = %other, "internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        warn!(rejection = %r.body_text(), "bad json body");
        Self::bad_request(r.body_text())
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self {
        Self::bad_request(r.body_text())
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(r: QueryRejection) -> Self {
        Self::bad_request(r.body_text())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
