use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::warn;
use transpotrack_core::{JsonResult, Validated};
use transpotrack_data::QueryOutcome;

use super::execute;
use crate::extract::RecordId;
use crate::models::PassengerRequest;
use crate::services::passengers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/passengers", get(list).post(create))
        .route("/api/passengers/{id}", get(find).put(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> JsonResult<QueryOutcome> {
    execute(&state, passengers::list()).await
}

async fn find(State(state): State<AppState>, RecordId(id): RecordId) -> JsonResult<QueryOutcome> {
    execute(&state, passengers::find(id)).await
}

/// Insert the passenger, then their phone under the generated id.
///
/// A failed phone insert is logged; the passenger insert still stands.
async fn create(
    State(state): State<AppState>,
    Validated(req): Validated<PassengerRequest>,
) -> JsonResult<QueryOutcome> {
    let outcome = state.db.execute(passengers::create(&req)).await?;

    if let (Some(phone), Some(passenger_id)) = (req.phone(), outcome.last_insert_id()) {
        if let Err(err) = state
            .db
            .execute(passengers::add_primary_phone(passenger_id, phone))
            .await
        {
            warn!(passenger_id, error = %err, "primary phone not recorded");
        }
    }
    Ok(Json(outcome))
}

async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Validated(req): Validated<PassengerRequest>,
) -> JsonResult<QueryOutcome> {
    execute(&state, passengers::update(id, &req)).await
}

async fn remove(State(state): State<AppState>, RecordId(id): RecordId) -> JsonResult<QueryOutcome> {
    execute(&state, passengers::delete(id)).await
}
