#![deny(warnings)]

//! HTTP front end for the pricing engine.
//!
//! - `GET /health`
//! - `GET|POST /api/products`, `DELETE /api/products/:id`,
//!   `GET /api/products/health`
//! - `GET /api/forecast-and-optimize`, `GET /api/analytics`
//! - `POST /api/simulate`, `POST /api/competitor-simulate`

pub mod app;
pub mod error;
pub mod routes;
pub mod state;

pub use app::{create_app, ServerConfig};
pub use error::{AppError, AppResult};
pub use state::AppState;
