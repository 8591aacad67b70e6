#![deny(warnings)]

use anyhow::{Context, Result};
use inventory::{load_snapshot, sample_inventory, InMemoryRepository};
use markdown_server::{create_app, AppState, ServerConfig};
use pricing_runtime::{EngineConfig, PricingEngine};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// YAML engine config path.
const CONFIG_ENV: &str = "PRICING_CONFIG";
/// JSON inventory snapshot served at startup; a sample inventory otherwise.
const INVENTORY_ENV: &str = "PRICING_INVENTORY";

fn initial_repository(seed: Option<u64>) -> Result<InMemoryRepository> {
    let skus = match std::env::var_os(INVENTORY_ENV).map(PathBuf::from) {
        Some(path) => load_snapshot(&path)
            .with_context(|| format!("loading inventory from {}", path.display()))?,
        None => {
            let seed = seed.unwrap_or_else(rand::random);
            info!(seed, "seeding sample inventory");
            sample_inventory(&mut ChaCha8Rng::seed_from_u64(seed))
        }
    };
    Ok(InMemoryRepository::with_products(skus)?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let engine_config =
        EngineConfig::load(config_path.as_deref()).context("loading engine config")?;
    let repo = initial_repository(engine_config.rng_seed)?;
    info!(products = repo.len()?, "inventory ready");

    let state = AppState::new(PricingEngine::new(engine_config), Arc::new(repo));
    let app = create_app(state);

    let server = ServerConfig::from_env();
    let addr = server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
