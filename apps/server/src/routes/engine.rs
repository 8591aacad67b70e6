//! Pricing engine endpoints. CPU-bound work runs on the blocking pool.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use pricing_core::Competitor;
use pricing_game::CompetitiveAnalysis;
use pricing_runtime::{AnalyticsReport, OptimizationReport, SimulationReport};
use serde::Deserialize;
use tokio::task;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SimulateRequest {
    #[serde(default)]
    pub samples: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CompetitorRequest {
    pub competitors: Vec<Competitor>,
}

/// `GET /api/forecast-and-optimize` over the current inventory snapshot.
pub async fn forecast_and_optimize(
    State(state): State<AppState>,
) -> AppResult<Json<OptimizationReport>> {
    let skus = state.products.list()?;
    let engine = state.engine.clone();
    let report = task::spawn_blocking(move || engine.forecast_and_optimize(&skus)).await??;
    Ok(Json(report))
}

/// `GET /api/analytics`
pub async fn analytics(State(state): State<AppState>) -> Json<AnalyticsReport> {
    Json(state.engine.analytics())
}

/// `POST /api/simulate { samples }`
pub async fn simulate(
    State(state): State<AppState>,
    payload: Result<Json<SimulateRequest>, JsonRejection>,
) -> AppResult<Json<SimulationReport>> {
    let Json(req) = payload?;
    let engine = state.engine.clone();
    let report = task::spawn_blocking(move || engine.simulate(req.samples)).await??;
    Ok(Json(report))
}

/// `POST /api/competitor-simulate { competitors }`
pub async fn competitor_simulate(
    State(state): State<AppState>,
    payload: Result<Json<CompetitorRequest>, JsonRejection>,
) -> AppResult<Json<CompetitiveAnalysis>> {
    let Json(req) = payload?;
    Ok(Json(state.engine.competitor_simulate(&req.competitors)?))
}
