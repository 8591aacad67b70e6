use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub products: usize,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let products = state.products.list()?.len();
    Ok(Json(HealthResponse {
        status: "healthy",
        products,
    }))
}
