use axum::extract::State;
use axum::routing::{get, put};
use axum::Router;
use transpotrack_core::{JsonResult, Validated};
use transpotrack_data::QueryOutcome;

use super::execute;
use crate::extract::RecordId;
use crate::models::{StationRequest, VehicleRequest};
use crate::services::fleet;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/stations", get(list_stations).post(create_station))
        .route("/api/stations/{id}", put(update_station).delete(delete_station))
        .route("/api/vehicles", get(list_vehicles).post(create_vehicle))
        .route("/api/vehicles/{id}", put(update_vehicle).delete(delete_vehicle))
}

async fn list_stations(State(state): State<AppState>) -> JsonResult<QueryOutcome> {
    execute(&state, fleet::list_stations()).await
}

async fn create_station(
    State(state): State<AppState>,
    Validated(req): Validated<StationRequest>,
) -> JsonResult<QueryOutcome> {
    execute(&state, fleet::create_station(&req)).await
}

async fn update_station(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Validated(req): Validated<StationRequest>,
) -> JsonResult<QueryOutcome> {
    execute(&state, fleet::update_station(id, &req)).await
}

async fn delete_station(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> JsonResult<QueryOutcome> {
    execute(&state, fleet::delete_station(id)).await
}

async fn list_vehicles(State(state): State<AppState>) -> JsonResult<QueryOutcome> {
    execute(&state, fleet::list_vehicles()).await
}

async fn create_vehicle(
    State(state): State<AppState>,
    Validated(req): Validated<VehicleRequest>,
) -> JsonResult<QueryOutcome> {
    execute(&state, fleet::create_vehicle(&req)).await
}

async fn update_vehicle(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Validated(req): Validated<VehicleRequest>,
) -> JsonResult<QueryOutcome> {
    execute(&state, fleet::update_vehicle(id, &req)).await
}

async fn delete_vehicle(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> JsonResult<QueryOutcome> {
    execute(&state, fleet::delete_vehicle(id)).await
}
