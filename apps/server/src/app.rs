//! Router, middleware and listener configuration.

use axum::routing::{delete, get, post};
use axum::Router;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{engine, health, products};
use crate::state::AppState;

pub const HOST_ENV: &str = "PRICING_SERVER_HOST";
pub const PORT_ENV: &str = "PRICING_SERVER_PORT";

/// Build the application with every route.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health::health))
        .route("/api/products", get(products::list).post(products::add))
        .route("/api/products/health", get(products::stock_health))
        .route("/api/products/:id", delete(products::remove))
        .route("/api/forecast-and-optimize", get(engine::forecast_and_optimize))
        .route("/api/analytics", get(engine::analytics))
        .route("/api/simulate", post(engine::simulate))
        .route("/api/competitor-simulate", post(engine::competitor_simulate))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Listener address.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Unset or unparsable values keep their defaults.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup(HOST_ENV).unwrap_or(defaults.host),
            port: lookup(PORT_ENV)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_and_overrides() {
        assert_eq!(ServerConfig::default().bind_addr(), "0.0.0.0:8080");
        let cfg = ServerConfig::from_lookup(|k| match k {
            HOST_ENV => Some("127.0.0.1".into()),
            PORT_ENV => Some("9000".into()),
            _ => None,
        });
        assert_eq!(cfg.bind_addr(), "127.0.0.1:9000");
        let bad_port = ServerConfig::from_lookup(|k| (k == PORT_ENV).then(|| "http".into()));
        assert_eq!(bad_port.port, 8080);
    }
}
