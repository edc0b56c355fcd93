//! HTTP adapter for the simulation engine.
//!
//! Thin JSON layer over [`Simulation`]: start, step, stats, history, reset.
//! The process holds at most one live simulation; it is replaced on start
//! and cleared on reset. The mutex around it is the external
//! mutual-exclusion boundary the single-threaded core requires.

use crate::config::EnvironmentConfig;
use crate::error::Error;
use crate::simulation::Simulation;
use crate::stats::GenerationStats;
use anyhow::Context;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

/// Budget on a single step request; larger step counts must be split across
/// requests.
const MAX_STEPS_PER_REQUEST: i64 = 10_000;

/// Shared server state: the at-most-one live simulation.
#[derive(Clone, Default)]
pub struct AppState {
    sim: Arc<Mutex<Option<Simulation>>>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartResponse {
    message: String,
    config: EnvironmentConfig,
    initial_stats: GenerationStats,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StepRequest {
    steps: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StepResponse {
    message: String,
    stats: GenerationStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageResponse {
    message: String,
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/simulation/start", post(start))
        .route("/api/simulation/step", post(step))
        .route("/api/simulation/stats", get(stats))
        .route("/api/simulation/history", get(history))
        .route("/api/simulation/reset", delete(reset))
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind `addr` and serve the API until the process exits.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("listening on http://{addr}");

    axum::serve(listener, router(state))
        .await
        .context("server exited unexpectedly")?;

    Ok(())
}

async fn start(
    State(state): State<AppState>,
    body: Option<Json<EnvironmentConfig>>,
) -> Result<Json<StartResponse>, Error> {
    let cfg = body.map(|Json(cfg)| cfg).unwrap_or_default();
    let mut sim = Simulation::new(cfg)?;

    let initial_stats = sim.current_state();
    let config = sim.config().clone();
    log::info!(
        "started simulation: N0 = {}, optimum = {}",
        config.pop_size,
        config.optimal_value
    );

    *state.sim.lock().await = Some(sim);

    Ok(Json(StartResponse {
        message: "Simulation started successfully.".to_string(),
        config,
        initial_stats,
    }))
}

async fn step(
    State(state): State<AppState>,
    body: Option<Json<StepRequest>>,
) -> Result<Json<StepResponse>, Error> {
    let steps = body
        .and_then(|Json(req)| req.steps)
        .filter(|&steps| steps > 0)
        .unwrap_or(1)
        .min(MAX_STEPS_PER_REQUEST) as usize;

    let mut slot = state.sim.lock().await;
    let sim = slot.as_mut().ok_or(Error::NoActiveSimulation)?;

    let stats = sim.step(steps);
    log::debug!("advanced {steps} generation(s) to {}", stats.generation);

    Ok(Json(StepResponse {
        message: format!("Advanced {steps} generation(s)."),
        stats,
    }))
}

async fn stats(State(state): State<AppState>) -> Result<Json<GenerationStats>, Error> {
    let mut slot = state.sim.lock().await;
    let sim = slot.as_mut().ok_or(Error::NoActiveSimulation)?;

    Ok(Json(sim.current_state()))
}

async fn history(State(state): State<AppState>) -> Result<Json<Vec<GenerationStats>>, Error> {
    let slot = state.sim.lock().await;
    let sim = slot.as_ref().ok_or(Error::NoActiveSimulation)?;

    Ok(Json(sim.history().to_vec()))
}

async fn reset(State(state): State<AppState>) -> Json<MessageResponse> {
    // Idempotent: clearing an empty slot is fine.
    state.sim.lock().await.take();
    log::info!("simulation reset");

    Json(MessageResponse {
        message: "Simulation reset.".to_string(),
    })
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
