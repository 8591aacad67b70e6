//! Product inventory endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use inventory::{NewProduct, StockHealth};
use pricing_core::Sku;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub success: bool,
    pub id: String,
}

/// `GET /api/products`
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Sku>>> {
    Ok(Json(state.products.list()?))
}

/// `POST /api/products`
pub async fn add(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Sku>)> {
    let Json(product) = payload?;
    let sku = state.products.add(product)?;
    Ok((StatusCode::CREATED, Json(sku)))
}

/// `DELETE /api/products/:id`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Deleted>> {
    state.products.delete(&id)?;
    Ok(Json(Deleted { success: true, id }))
}

/// `GET /api/products/health`
pub async fn stock_health(State(state): State<AppState>) -> AppResult<Json<Vec<StockHealth>>> {
    let skus = state.products.list()?;
    Ok(Json(inventory::stock_health(&skus)))
}
