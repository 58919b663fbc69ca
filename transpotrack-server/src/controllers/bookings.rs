use axum::extract::State;
use axum::routing::{get, put};
use axum::Router;
use transpotrack_core::{JsonResult, Validated};
use transpotrack_data::QueryOutcome;

use super::execute;
use crate::extract::RecordId;
use crate::models::ComplaintStatusRequest;
use crate::services::bookings;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/tickets", get(list_tickets))
        .route("/api/passes", get(list_passes))
        .route("/api/complaints", get(list_complaints))
        .route("/api/complaints/{id}/status", put(update_complaint_status))
}

async fn list_tickets(State(state): State<AppState>) -> JsonResult<QueryOutcome> {
    execute(&state, bookings::list_tickets()).await
}

async fn list_passes(State(state): State<AppState>) -> JsonResult<QueryOutcome> {
    execute(&state, bookings::list_passes()).await
}

async fn list_complaints(State(state): State<AppState>) -> JsonResult<QueryOutcome> {
    execute(&state, bookings::list_complaints()).await
}

async fn update_complaint_status(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Validated(req): Validated<ComplaintStatusRequest>,
) -> JsonResult<QueryOutcome> {
    execute(&state, bookings::update_complaint_status(id, &req)).await
}
