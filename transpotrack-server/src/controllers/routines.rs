use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use transpotrack_core::{JsonResult, Validated};
use transpotrack_data::{ProcedureOutcome, QueryOutcome};

use super::execute;
use crate::extract::RecordId;
use crate::models::{BookTicketRequest, RevenueReportRequest, SeatCheckRequest};
use crate::services::routines;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/book-ticket", post(book_ticket))
        .route("/api/revenue-report", post(revenue_report))
        .route("/api/passenger-age/{id}", get(passenger_age))
        .route("/api/check-seat", post(check_seat))
}

async fn book_ticket(
    State(state): State<AppState>,
    Validated(req): Validated<BookTicketRequest>,
) -> JsonResult<ProcedureOutcome> {
    Ok(Json(state.db.call_procedure(routines::book_ticket(&req)).await?))
}

async fn revenue_report(
    State(state): State<AppState>,
    Validated(req): Validated<RevenueReportRequest>,
) -> JsonResult<ProcedureOutcome> {
    Ok(Json(state.db.call_procedure(routines::revenue_report(&req)).await?))
}

async fn passenger_age(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> JsonResult<QueryOutcome> {
    execute(&state, routines::passenger_age(id)).await
}

async fn check_seat(
    State(state): State<AppState>,
    Validated(req): Validated<SeatCheckRequest>,
) -> JsonResult<QueryOutcome> {
    execute(&state, routines::seat_availability(&req)).await
}
