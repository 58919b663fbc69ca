use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use transpotrack_core::HttpError;

/// Numeric `{id}` path segment. Anything else is answered with 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| HttpError::NotFound("Not found".into()))?;
        Ok(RecordId(id))
    }
}
