//! Health checks.
//!
//! | Path | Description |
//! |------|-------------|
//! | `GET /health` | Aggregated status, 200 if every check is UP, 503 otherwise |
//! | `GET /health/live` | Liveness probe, always 200 |

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

/// Result of a single health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Up,
    Down(String),
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        matches!(self, HealthStatus::Up)
    }
}

/// A named health check, e.g. the database round-trip.
pub trait HealthIndicator: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn check(&self) -> impl Future<Output = HealthStatus> + Send;
}

/// Object-safe form of [`HealthIndicator`].
trait ErasedIndicator: Send + Sync + 'static {
    fn name(&self) -> &str;
    fn check(&self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + '_>>;
}

impl<T: HealthIndicator> ErasedIndicator for T {
    fn name(&self) -> &str {
        HealthIndicator::name(self)
    }

    fn check(&self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + '_>> {
        Box::pin(HealthIndicator::check(self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckState {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: CheckState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: CheckState,
    pub checks: Vec<HealthCheck>,
    pub uptime_seconds: u64,
}

/// The registered checks plus process start time.
pub struct HealthState {
    checks: Vec<Box<dyn ErasedIndicator>>,
    start_time: Instant,
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            start_time: Instant::now(),
        }
    }

    /// Register a check.
    pub fn with<H: HealthIndicator>(mut self, indicator: H) -> Self {
        self.checks.push(Box::new(indicator));
        self
    }

    /// Run every check in registration order.
    pub async fn aggregate(&self) -> HealthResponse {
        let mut checks = Vec::with_capacity(self.checks.len());
        for indicator in &self.checks {
            let started = Instant::now();
            let status = indicator.check().await;
            let (state, reason) = match status {
                HealthStatus::Up => (CheckState::Up, None),
                HealthStatus::Down(reason) => (CheckState::Down, Some(reason)),
            };
            checks.push(HealthCheck {
                name: indicator.name().to_string(),
                status: state,
                reason,
                duration_ms: started.elapsed().as_millis() as u64,
            });
        }

        let status = if checks.iter().all(|c| c.status == CheckState::Up) {
            CheckState::Up
        } else {
            CheckState::Down
        };
        HealthResponse {
            status,
            checks,
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Router serving `/health` and `/health/live`.
    pub fn into_router<S>(self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        Router::new()
            .route("/health", get(health_handler))
            .route("/health/live", get(liveness_handler))
            .with_state(Arc::new(self))
    }
}

async fn health_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let response = state.aggregate().await;
    let code = match response.status {
        CheckState::Up => StatusCode::OK,
        CheckState::Down => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(response))
}

async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
