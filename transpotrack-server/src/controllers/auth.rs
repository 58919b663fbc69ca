use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use transpotrack_core::{JsonResult, Validated};

use crate::models::{LoginRequest, LoginResponse};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    Validated(req): Validated<LoginRequest>,
) -> JsonResult<LoginResponse> {
    let role = state
        .verifier
        .verify(&req.username, &req.password, &req.role)
        .await?;
    Ok(Json(LoginResponse::new(req.username, role)))
}
