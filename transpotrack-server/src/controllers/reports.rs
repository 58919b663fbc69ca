use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use transpotrack_core::JsonResult;
use transpotrack_data::QueryOutcome;

use super::execute;
use crate::models::{DashboardStats, Success};
use crate::services::{dashboard, reports};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/query/nested", get(nested))
        .route("/api/query/join", get(join))
        .route("/api/query/aggregate", get(aggregate))
        .route("/api/reports/daily-bookings", get(daily_bookings))
        .route("/api/reports/popular-routes", get(popular_routes))
        .route("/api/dashboard/stats", get(stats))
}

async fn nested(State(state): State<AppState>) -> JsonResult<QueryOutcome> {
    execute(&state, reports::above_average_spenders()).await
}

async fn join(State(state): State<AppState>) -> JsonResult<QueryOutcome> {
    execute(&state, reports::route_stations()).await
}

async fn aggregate(State(state): State<AppState>) -> JsonResult<QueryOutcome> {
    execute(&state, reports::revenue_by_payment_method()).await
}

async fn daily_bookings(State(state): State<AppState>) -> JsonResult<QueryOutcome> {
    execute(&state, reports::daily_bookings()).await
}

async fn popular_routes(State(state): State<AppState>) -> JsonResult<QueryOutcome> {
    execute(&state, reports::popular_routes()).await
}

async fn stats(State(state): State<AppState>) -> Json<Success<DashboardStats>> {
    Json(Success::new(dashboard::collect(state.db.as_ref()).await))
}
