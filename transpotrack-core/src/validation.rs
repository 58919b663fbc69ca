use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::{FieldError, HttpError};

pub use garde::Validate;

/// JSON body extractor that runs `garde` validation before the handler sees it.
///
/// Malformed JSON is rejected with 400 and the parser's message; a body that
/// parses but fails validation is rejected with 400 and one entry per field.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<T, S> FromRequest<S> for Validated<T>
where
    T: DeserializeOwned + Validate,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|report| HttpError::Validation(convert_garde_report(&report)))?;
        Ok(Validated(value))
    }
}

fn convert_garde_report(report: &garde::Report) -> Vec<FieldError> {
    report
        .iter()
        .map(|(path, error)| {
            let field = path.to_string();
            FieldError {
                field: if field.is_empty() { "body".to_string() } else { field },
                message: error.message().to_string(),
            }
        })
        .collect()
}
