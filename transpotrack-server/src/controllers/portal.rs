use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use transpotrack_core::{JsonResult, Validated};
use transpotrack_data::QueryOutcome;

use super::execute;
use crate::models::{FileComplaintRequest, PassApplication, PortalTicketRequest};
use crate::services::portal;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/user/schedules", get(schedules))
        .route("/api/user/tickets", get(tickets))
        .route("/api/user/passes", get(passes))
        .route("/api/user/complaints", get(complaints))
        .route("/api/user/book-ticket", post(book_ticket))
        .route("/api/user/get-pass", post(get_pass))
        .route("/api/user/file-complaint", post(file_complaint))
}

async fn schedules(State(state): State<AppState>) -> JsonResult<QueryOutcome> {
    execute(&state, portal::recent_schedules()).await
}

async fn tickets(State(state): State<AppState>) -> JsonResult<QueryOutcome> {
    execute(&state, portal::recent_tickets()).await
}

async fn passes(State(state): State<AppState>) -> JsonResult<QueryOutcome> {
    execute(&state, portal::recent_passes()).await
}

async fn complaints(State(state): State<AppState>) -> JsonResult<QueryOutcome> {
    execute(&state, portal::recent_complaints()).await
}

async fn book_ticket(
    State(state): State<AppState>,
    Validated(req): Validated<PortalTicketRequest>,
) -> JsonResult<QueryOutcome> {
    let statement = portal::book_ticket(&req, &mut rand::thread_rng());
    execute(&state, statement).await
}

async fn get_pass(
    State(state): State<AppState>,
    Validated(req): Validated<PassApplication>,
) -> JsonResult<QueryOutcome> {
    let statement = portal::apply_for_pass(&req, &mut rand::thread_rng());
    execute(&state, statement).await
}

async fn file_complaint(
    State(state): State<AppState>,
    Validated(req): Validated<FileComplaintRequest>,
) -> JsonResult<QueryOutcome> {
    let statement = portal::file_complaint(&req, &mut rand::thread_rng());
    execute(&state, statement).await
}
