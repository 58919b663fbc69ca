//! axum routers, one module per area of the admin app.

mod auth;
mod bookings;
mod fleet;
mod passengers;
mod portal;
mod reports;
mod routines;

use axum::{Json, Router};
use transpotrack_core::JsonResult;
use transpotrack_data::{QueryOutcome, Statement};

use crate::state::AppState;

/// Every `/api` route.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(passengers::routes())
        .merge(fleet::routes())
        .merge(bookings::routes())
        .merge(routines::routes())
        .merge(reports::routes())
        .merge(portal::routes())
}

/// Run one statement and answer with its envelope.
async fn execute(state: &AppState, statement: Statement) -> JsonResult<QueryOutcome> {
    Ok(Json(state.db.execute(statement).await?))
}
