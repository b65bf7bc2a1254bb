//! API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<ServerState>`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info_span, warn};
use uuid::Uuid;

use crate::model::Estimator;
use crate::types::{EngineError, MetricsReport, PitcherInputs, PlayerBoardRow};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct ServerState {
    pub estimator: Estimator,
}

impl ServerState {
    pub fn new(estimator: Estimator) -> Self {
        Self { estimator }
    }
}

pub type AppState = Arc<ServerState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SimulateResponse {
    pub simulation_id: Uuid,
    pub simulated_at: DateTime<Utc>,
    pub report: MetricsReport,
    pub board: PlayerBoardRow,
    pub caution: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

/// Engine failures rendered as `400 Bad Request`.
pub struct ApiError(EngineError);

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.0.kind(),
            message: self.0.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// POST /api/simulate
pub async fn simulate(
    State(state): State<AppState>,
    Json(inputs): Json<PitcherInputs>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let simulation_id = Uuid::new_v4();

    let report = info_span!("simulate", %simulation_id)
        .in_scope(|| state.estimator.simulate(&inputs))
        .map_err(|e| {
            warn!(%simulation_id, error = %e, pitcher = %inputs.pitcher_name, "Simulation rejected");
            ApiError::from(e)
        })?;

    Ok(Json(SimulateResponse {
        simulation_id,
        simulated_at: Utc::now(),
        board: report.board_row(),
        caution: report.caution_message(),
        report,
    }))
}

/// GET /api/defaults
pub async fn get_defaults() -> Json<PitcherInputs> {
    Json(PitcherInputs::default())
}

/// GET /health
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
