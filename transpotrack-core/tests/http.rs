use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use garde::Validate;
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::Value;
use tower::ServiceExt;
use transpotrack_core::{
    catch_panic_layer, timeout_layer, HealthIndicator, HealthState, HealthStatus, HttpError,
    JsonResult, Validated,
};

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get_req(path: &str) -> Request<Body> {
    Request::get(path).body(Body::empty()).unwrap()
}

fn post_json(path: &str, body: &str) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn http_errors_render_failure_envelope() {
    let app = Router::new()
        .route("/missing", get(|| async { Err::<(), _>(HttpError::NotFound("no such station".into())) }))
        .route("/down", get(|| async { Err::<(), _>(HttpError::ServiceUnavailable("db down".into())) }))
        .route("/denied", get(|| async { Err::<(), _>(HttpError::Unauthorized("Invalid username or password".into())) }));

    let (status, body) = send(app.clone(), get_req("/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "no such station");

    let (status, body) = send(app.clone(), get_req("/down")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "db down");

    let (status, _) = send(app, get_req("/denied")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct NewStation {
    #[garde(length(min = 1))]
    station_name: String,
    #[garde(range(min = 0))]
    capacity: i64,
}

async fn create_station(Validated(body): Validated<NewStation>) -> JsonResult<Value> {
    Ok(axum::Json(serde_json::json!({ "name": body.station_name, "capacity": body.capacity })))
}

#[tokio::test]
async fn validated_accepts_good_body() {
    let app = Router::new().route("/stations", post(create_station));
    let (status, body) = send(app, post_json("/stations", r#"{"stationName":"Central","capacity":40}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Central");
}

#[tokio::test]
async fn validated_rejects_invalid_fields() {
    let app = Router::new().route("/stations", post(create_station));
    let (status, body) = send(app, post_json("/stations", r#"{"stationName":"","capacity":-1}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn validated_rejects_malformed_json() {
    let app = Router::new().route("/stations", post(create_station));
    let (status, body) = send(app, post_json("/stations", r#"{"stationName":"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

async fn boom() -> &'static str {
    panic!("kaboom")
}

#[tokio::test]
async fn panics_become_json_500() {
    let app = Router::new()
        .route("/boom", get(boom))
        .layer(catch_panic_layer());
    let (status, body) = send(app, get_req("/boom")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn slow_requests_time_out() {
    let app = Router::new()
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                "late"
            }),
        )
        .layer(timeout_layer(Duration::from_millis(20)));
    let resp = app.oneshot(get_req("/slow")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
}

struct Fixed(&'static str, HealthStatus);

impl HealthIndicator for Fixed {
    fn name(&self) -> &str {
        self.0
    }

    async fn check(&self) -> HealthStatus {
        self.1.clone()
    }
}

#[tokio::test]
async fn health_is_up_when_all_checks_pass() {
    let app: Router = HealthState::new().with(Fixed("db", HealthStatus::Up)).into_router();
    let (status, body) = send(app, get_req("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");
    assert_eq!(body["checks"][0]["name"], "db");
}

#[tokio::test]
async fn health_is_down_when_a_check_fails() {
    let app: Router = HealthState::new()
        .with(Fixed("db", HealthStatus::Down("connection refused".into())))
        .into_router();
    let (status, body) = send(app.clone(), get_req("/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "DOWN");
    assert_eq!(body["checks"][0]["reason"], "connection refused");

    let resp = app.oneshot(get_req("/health/live")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
