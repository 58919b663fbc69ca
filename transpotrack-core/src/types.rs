//! Handler return type aliases.

use axum::Json;

use crate::error::HttpError;

/// Any response type with [`HttpError`].
pub type ApiResult<T> = Result<T, HttpError>;

/// `Result<Json<T>, HttpError>`, the usual handler return type.
pub type JsonResult<T> = Result<Json<T>, HttpError>;
