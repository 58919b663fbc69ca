use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Build the `{"success": false, "error": message}` envelope with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "success": false, "error": message.into() });
    (status, Json(body)).into_response()
}

/// Error returned by every HTTP handler.
///
/// All variants render the same failure envelope; the variant only picks
/// the status code.
pub enum HttpError {
    NotFound(String),
    Unauthorized(String),
    BadRequest(String),
    /// The database or another backing service is unreachable.
    ServiceUnavailable(String),
    Internal(String),
    /// Request body failed validation. Carries one message per field.
    Validation(Vec<FieldError>),
}

/// A single field-level validation failure.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HttpError::BadRequest(_) | HttpError::Validation(_) => StatusCode::BAD_REQUEST,
            HttpError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            HttpError::NotFound(msg)
            | HttpError::Unauthorized(msg)
            | HttpError::BadRequest(msg)
            | HttpError::ServiceUnavailable(msg)
            | HttpError::Internal(msg) => msg.clone(),
            HttpError::Validation(errors) => errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            HttpError::Validation(errors) => {
                let message = HttpError::Validation(errors.clone()).message();
                let body = serde_json::json!({
                    "success": false,
                    "error": message,
                    "details": errors,
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            other => {
                if other.status().is_server_error() {
                    tracing::error!(status = %other.status(), error = %other.message(), "request failed");
                }
                error_response(other.status(), other.message())
            }
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            HttpError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            HttpError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            HttpError::ServiceUnavailable(msg) => write!(f, "Service Unavailable: {msg}"),
            HttpError::Internal(msg) => write!(f, "Internal Error: {msg}"),
            HttpError::Validation(errors) => write!(f, "Validation Error: {} errors", errors.len()),
        }
    }
}

impl std::fmt::Debug for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for HttpError {}

impl From<std::io::Error> for HttpError {
    fn from(err: std::io::Error) -> Self {
        HttpError::Internal(err.to_string())
    }
}

impl From<axum::extract::rejection::JsonRejection> for HttpError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        HttpError::BadRequest(rejection.body_text())
    }
}
