use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use super::domain::{
    DeviceProfile, EnvironmentContext, FactorKind, RiskError, RiskScoreResult, SimulationConfig,
};
use super::engine::RiskEngine;
use super::weights::FactorWeights;

/// Shared state behind the risk endpoints.
#[derive(Clone)]
pub struct RiskRouterState {
    pub engine: Arc<RiskEngine>,
    /// Seed applied to simulations that do not bring their own.
    pub default_seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub profile: DeviceProfile,
    pub context: EnvironmentContext,
    #[serde(default)]
    pub weights: Option<FactorWeights>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub profile: DeviceProfile,
    pub context: EnvironmentContext,
    #[serde(default)]
    pub weights: Option<FactorWeights>,
    #[serde(default)]
    pub config: Option<SimulationConfig>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedFactor {
    pub factor: FactorKind,
    pub pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplainResponse {
    #[serde(flatten)]
    pub result: RiskScoreResult,
    pub ranked: Vec<RankedFactor>,
}

/// Router exposing deterministic evaluation, explanation, and simulation.
pub fn risk_router(engine: Arc<RiskEngine>, default_seed: Option<u64>) -> Router {
    Router::new()
        .route("/api/v1/risk/evaluate", post(evaluate_handler))
        .route("/api/v1/risk/explain", post(explain_handler))
        .route("/api/v1/risk/simulate", post(simulate_handler))
        .with_state(RiskRouterState {
            engine,
            default_seed,
        })
}

fn risk_error_response(error: RiskError) -> Response {
    warn!(%error, "rejected risk request");
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

pub(crate) async fn evaluate_handler(
    State(state): State<RiskRouterState>,
    Json(request): Json<EvaluateRequest>,
) -> Response {
    match state
        .engine
        .evaluate(&request.profile, &request.context, request.weights.as_ref())
    {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => risk_error_response(error),
    }
}

pub(crate) async fn explain_handler(
    State(state): State<RiskRouterState>,
    Json(request): Json<EvaluateRequest>,
) -> Response {
    match state
        .engine
        .explain(&request.profile, &request.context, request.weights.as_ref())
    {
        Ok(result) => {
            let ranked = result
                .ranked_attribution()
                .into_iter()
                .map(|(factor, pct)| RankedFactor { factor, pct })
                .collect();
            (StatusCode::OK, Json(ExplainResponse { result, ranked })).into_response()
        }
        Err(error) => risk_error_response(error),
    }
}

pub(crate) async fn simulate_handler(
    State(state): State<RiskRouterState>,
    Json(request): Json<SimulateRequest>,
) -> Response {
    let SimulateRequest {
        profile,
        context,
        weights,
        config,
        seed,
    } = request;

    let engine = Arc::clone(&state.engine);
    let seed = seed.or(state.default_seed);

    // path loop is CPU-bound; keep it off the async workers
    let outcome = tokio::task::spawn_blocking(move || match seed {
        Some(seed) => {
            engine.simulate_seeded(&profile, &context, weights.as_ref(), config.as_ref(), seed)
        }
        None => engine.simulate(&profile, &context, weights.as_ref(), config.as_ref()),
    })
    .await;

    match outcome {
        Ok(Ok(result)) => (StatusCode::OK, Json(result)).into_response(),
        Ok(Err(error)) => risk_error_response(error),
        Err(join_error) => {
            error!(error = %join_error, "simulation task failed");
            let payload = json!({
                "error": "simulation task failed",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
