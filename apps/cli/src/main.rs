#![deny(warnings)]

//! Headless CLI over the pricing engine. Prints JSON reports to stdout.

use anyhow::{anyhow, bail, Context, Result};
use inventory::{load_snapshot, sample_inventory, save_snapshot};
use pricing_core::{Competitor, Sku};
use pricing_runtime::{EngineConfig, PricingEngine};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: markdown-cli <command> [options]

commands:
  optimize                      forecast and optimize the inventory
  analytics                     demand, seasonality and sensitivity view
  simulate [--samples N]        Monte Carlo profit simulation
  compete --competitor NAME=PRICE ...
                                competitive market analysis
  seed --out FILE               write a sample inventory snapshot
  health                        stock health of the inventory

options:
  --inventory FILE              JSON inventory (default: sample inventory)
  --config FILE                 YAML engine config
  --seed N                      fixed RNG seed";

#[derive(Debug, PartialEq)]
enum Command {
    Optimize,
    Analytics,
    Simulate { samples: Option<i64> },
    Compete { competitors: Vec<Competitor> },
    Seed { out: PathBuf },
    Health,
}

#[derive(Debug, PartialEq)]
struct Cli {
    command: Command,
    inventory: Option<PathBuf>,
    config: Option<PathBuf>,
    seed: Option<u64>,
}

fn parse_competitor(raw: &str) -> Result<Competitor> {
    let (name, price) = raw
        .rsplit_once('=')
        .ok_or_else(|| anyhow!("expected NAME=PRICE, got {raw:?}"))?;
    let price = price
        .trim()
        .parse::<f64>()
        .with_context(|| format!("bad price in {raw:?}"))?;
    Ok(Competitor {
        name: name.trim().to_string(),
        price,
    })
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Cli> {
    let mut it = args.into_iter();
    let name = it.next().ok_or_else(|| anyhow!("missing command\n\n{USAGE}"))?;
    let mut inventory = None;
    let mut config = None;
    let mut seed = None;
    let mut samples = None;
    let mut out = None;
    let mut competitors = Vec::new();

    while let Some(arg) = it.next() {
        let mut value = |flag: &str| it.next().ok_or_else(|| anyhow!("{flag} needs a value"));
        match arg.as_str() {
            "--inventory" => inventory = Some(PathBuf::from(value("--inventory")?)),
            "--config" => config = Some(PathBuf::from(value("--config")?)),
            "--seed" => {
                let raw = value("--seed")?;
                seed = Some(raw.parse::<u64>().context("--seed must be an integer")?);
            }
            "--samples" => {
                let raw = value("--samples")?;
                samples = Some(raw.parse::<i64>().context("--samples must be an integer")?);
            }
            "--out" => out = Some(PathBuf::from(value("--out")?)),
            "--competitor" => competitors.push(parse_competitor(&value("--competitor")?)?),
            other => bail!("unknown argument {other:?}\n\n{USAGE}"),
        }
    }

    let command = match name.as_str() {
        "optimize" => Command::Optimize,
        "analytics" => Command::Analytics,
        "simulate" => Command::Simulate { samples },
        "compete" => Command::Compete { competitors },
        "seed" => Command::Seed {
            out: out.ok_or_else(|| anyhow!("seed needs --out FILE"))?,
        },
        "health" => Command::Health,
        "help" | "--help" | "-h" => bail!("{USAGE}"),
        other => bail!("unknown command {other:?}\n\n{USAGE}"),
    };
    Ok(Cli {
        command,
        inventory,
        config,
        seed,
    })
}

fn load_inventory(cli: &Cli) -> Result<Vec<Sku>> {
    match &cli.inventory {
        Some(path) => load_snapshot(path)
            .with_context(|| format!("loading inventory from {}", path.display())),
        None => {
            let seed = cli.seed.unwrap_or_else(rand::random);
            info!(seed, "using sample inventory");
            Ok(sample_inventory(&mut ChaCha8Rng::seed_from_u64(seed)))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut config = EngineConfig::load(cli.config.as_deref()).context("loading engine config")?;
    if cli.seed.is_some() {
        config.rng_seed = cli.seed;
    }
    let engine = PricingEngine::new(config);
    info!(command = ?cli.command, "starting CLI");

    match &cli.command {
        Command::Optimize => {
            let skus = load_inventory(&cli)?;
            print_json(&engine.forecast_and_optimize(&skus)?)
        }
        Command::Analytics => print_json(&engine.analytics()),
        Command::Simulate { samples } => print_json(&engine.simulate(*samples)?),
        Command::Compete { competitors } => print_json(&engine.competitor_simulate(competitors)?),
        Command::Seed { out } => {
            let skus = load_inventory(&cli)?;
            save_snapshot(out, &skus).with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {} products to {}", skus.len(), out.display());
            Ok(())
        }
        Command::Health => print_json(&inventory::stock_health(&load_inventory(&cli)?)),
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run(parse_args(std::env::args().skip(1))?)
}
