//! HTTP surface: route registration and request/response glue.
//!
//! Handlers delegate to the simulator facade; all telemetry semantics live
//! in drivesim-core. Storage failures surface as 500s with a JSON message.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use drivesim_core::error::SimError;
use drivesim_core::scenario::DEFAULT_DURATION;
use drivesim_core::simulator::Simulator;
use drivesim_core::store::RowMap;
use drivesim_core::types::Tick;

const DEFAULT_LIMIT: i64 = 10;

/// Shared API state exposed to handlers.
pub struct ApiState {
    pub simulator: Simulator,
}

pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/simulate", post(run_simulation))
        .route("/query/lane_change", get(query_lane_change))
        .route("/query/pedestrian_stop", get(query_pedestrian_stop))
        .route("/query/obstacle_avoidance", get(query_obstacle_avoidance))
        .route("/query/all", get(query_all))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SimulateRequest {
    #[serde(default = "default_duration")]
    scenario_duration: Tick,
    seed: Option<u64>,
}

impl Default for SimulateRequest {
    fn default() -> Self {
        Self {
            scenario_duration: DEFAULT_DURATION,
            seed: None,
        }
    }
}

fn default_duration() -> Tick {
    DEFAULT_DURATION
}

#[derive(Debug, Serialize)]
struct SimulateResponse {
    message: &'static str,
    seed: u64,
}

#[derive(Debug, Deserialize)]
struct LimitQuery {
    #[serde(default = "default_limit")]
    limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<SimError> for ApiError {
    fn from(err: SimError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

async fn run_simulation(
    State(state): State<Arc<ApiState>>,
    payload: Option<Json<SimulateRequest>>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let seed = match request.seed {
        Some(seed) => {
            state
                .simulator
                .run_all_seeded(request.scenario_duration, seed)?;
            seed
        }
        None => state.simulator.run_all(request.scenario_duration)?,
    };
    log::info!(
        "simulations stored: duration={} seed={seed}",
        request.scenario_duration
    );
    Ok(Json(SimulateResponse {
        message: "Simulations completed and stored in database",
        seed,
    }))
}

async fn query_lane_change(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<RowMap>>, ApiError> {
    Ok(Json(state.simulator.query_lane_change(query.limit)?))
}

async fn query_pedestrian_stop(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<RowMap>>, ApiError> {
    Ok(Json(state.simulator.query_pedestrian_stop(query.limit)?))
}

async fn query_obstacle_avoidance(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<RowMap>>, ApiError> {
    Ok(Json(state.simulator.query_obstacle_avoidance(query.limit)?))
}

async fn query_all(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<BTreeMap<&'static str, Vec<RowMap>>>, ApiError> {
    Ok(Json(state.simulator.query_all(query.limit)?))
}
