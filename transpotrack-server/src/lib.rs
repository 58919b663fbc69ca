//! # transpotrack-server
//!
//! The TranspoTrack admin API. Handlers validate the request body, build a
//! statement through [`services`], and hand it to the
//! [`DataAccess`](transpotrack_data::DataAccess) seam held in [`AppState`].

pub mod config;
mod controllers;
mod extract;
pub mod models;
pub mod services;
pub mod state;

use std::time::Duration;

use axum::Router;
use transpotrack_core::{
    catch_panic_layer, default_cors, default_trace, timeout_layer, HealthState, HttpError,
};
use transpotrack_data::DatabaseHealth;

pub use config::ServerConfig;
pub use state::AppState;

/// The full application: `/api` routes, `/health`, and the cross-cutting layers.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let health = HealthState::new().with(DatabaseHealth::new(state.db.clone()));

    Router::new()
        .merge(controllers::routes())
        .with_state(state)
        .merge(health.into_router())
        .fallback(not_found)
        .layer(timeout_layer(request_timeout))
        .layer(catch_panic_layer())
        .layer(default_cors())
        .layer(default_trace())
}

async fn not_found() -> HttpError {
    HttpError::NotFound("Not found".into())
}
