use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use selectio::server::{AppState, router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::default())
}

async fn request(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = request(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn start_returns_initial_snapshot() {
    let app = app();
    let (status, body) = request(
        &app,
        "POST",
        "/api/simulation/start",
        Some(json!({ "popSize": 10, "seed": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    // Supplied fields are echoed, omitted ones take their defaults.
    assert_eq!(body["config"]["popSize"], 10);
    assert_eq!(body["config"]["mutationRate"], 0.1);
    assert_eq!(body["config"]["carryingCapacity"], 1000.0);

    assert_eq!(body["initialStats"]["generation"], 0);
    assert_eq!(body["initialStats"]["populationSize"], 10);
    assert!(body["initialStats"]["avgFitness"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn start_without_body_uses_defaults() {
    let app = app();
    let (status, body) = request(&app, "POST", "/api/simulation/start", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["config"]["popSize"], 50);
    assert_eq!(body["initialStats"]["populationSize"], 50);
}

#[tokio::test]
async fn start_rejects_invalid_config() {
    let app = app();
    let (status, body) = request(
        &app,
        "POST",
        "/api/simulation/start",
        Some(json!({ "tolerance": 0.0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("tolerance")
    );
}

#[tokio::test]
async fn step_requires_active_simulation() {
    let app = app();
    let (status, body) = request(
        &app,
        "POST",
        "/api/simulation/step",
        Some(json!({ "steps": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no active simulation");
}

#[tokio::test]
async fn step_advances_and_appends_history() {
    let app = app();
    request(
        &app,
        "POST",
        "/api/simulation/start",
        Some(json!({ "popSize": 10, "seed": 2 })),
    )
    .await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/simulation/step",
        Some(json!({ "steps": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["generation"], 3);
    assert_eq!(body["message"], "Advanced 3 generation(s).");

    let (status, body) = request(&app, "GET", "/api/simulation/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generation"], 3);

    let (status, body) = request(&app, "GET", "/api/simulation/history", None).await;
    assert_eq!(status, StatusCode::OK);
    let history = body.as_array().unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0]["generation"], 1);
    assert_eq!(history[2]["generation"], 3);
}

#[tokio::test]
async fn step_defaults_to_one_generation() {
    let app = app();
    request(
        &app,
        "POST",
        "/api/simulation/start",
        Some(json!({ "popSize": 10, "seed": 3 })),
    )
    .await;

    // Missing body and non-positive counts both fall back to a single step.
    let (status, body) = request(&app, "POST", "/api/simulation/step", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["generation"], 1);

    let (status, body) = request(
        &app,
        "POST",
        "/api/simulation/step",
        Some(json!({ "steps": -5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["generation"], 2);
}

#[tokio::test]
async fn reset_is_idempotent_and_clears_state() {
    let app = app();
    request(
        &app,
        "POST",
        "/api/simulation/start",
        Some(json!({ "popSize": 10, "seed": 4 })),
    )
    .await;

    let (status, body) = request(&app, "DELETE", "/api/simulation/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Simulation reset.");

    let (status, _) = request(&app, "DELETE", "/api/simulation/reset", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(&app, "GET", "/api/simulation/stats", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no active simulation");
}

#[tokio::test]
async fn start_replaces_previous_simulation() {
    let app = app();
    request(
        &app,
        "POST",
        "/api/simulation/start",
        Some(json!({ "popSize": 10, "seed": 5 })),
    )
    .await;
    request(&app, "POST", "/api/simulation/step", Some(json!({ "steps": 5 }))).await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/simulation/start",
        Some(json!({ "popSize": 20, "seed": 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["initialStats"]["generation"], 0);

    let (_, body) = request(&app, "GET", "/api/simulation/history", None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}
