//! Engine configuration: YAML file, defaults and environment overrides.

use pricing_econ::{DecayParams, ForecastParams, OptimizerParams};
use pricing_game::MarketParams;
use pricing_risk::SimulationParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Environment variable holding a fixed RNG seed.
pub const SEED_ENV: &str = "PRICING_RNG_SEED";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value for {var}: {value}")]
    Env { var: &'static str, value: String },
}

/// Tuning of every engine stage. Missing sections take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed seed for reproducible runs; `None` draws one per request.
    pub rng_seed: Option<u64>,
    pub forecast: ForecastParams,
    pub decay: DecayParams,
    pub optimizer: OptimizerParams,
    pub simulation: SimulationParams,
    pub market: MarketParams,
}

impl EngineConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let cfg = Self::from_yaml_str(&text)?;
        info!(path = %path.as_ref().display(), "engine config loaded");
        Ok(cfg)
    }

    /// Load from `path` when given, otherwise defaults, then apply the
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let cfg = match path {
            Some(p) => Self::from_yaml_file(p)?,
            None => Self::default(),
        };
        cfg.with_env_overrides(|k| std::env::var(k).ok())
    }

    /// Apply overrides from a variable lookup. Takes the lookup as a
    /// closure so tests need not touch the process environment.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(SEED_ENV) {
            let seed = raw.trim().parse::<u64>().map_err(|_| ConfigError::Env {
                var: SEED_ENV,
                value: raw.clone(),
            })?;
            self.rng_seed = Some(seed);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg = EngineConfig::from_yaml_str(
            "rng_seed: 9\noptimizer:\n  elasticity: -2.0\ndecay:\n  clamp_perishable: true\n",
        )
        .unwrap();
        assert_eq!(cfg.rng_seed, Some(9));
        assert_eq!(cfg.optimizer.elasticity, -2.0);
        assert_eq!(cfg.optimizer.min_markup, 1.15);
        assert!(cfg.decay.clamp_perishable);
        assert_eq!(cfg.simulation, SimulationParams::default());
    }

    #[test]
    fn empty_document_is_default() {
        let cfg = EngineConfig::from_yaml_str("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn file_and_env_override() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "rng_seed: 1\nsimulation:\n  max_samples: 500").unwrap();
        let cfg = EngineConfig::from_yaml_file(f.path())
            .unwrap()
            .with_env_overrides(|k| (k == SEED_ENV).then(|| " 77 ".to_string()))
            .unwrap();
        assert_eq!(cfg.rng_seed, Some(77));
        assert_eq!(cfg.simulation.max_samples, 500);
    }

    #[test]
    fn bad_env_seed_is_rejected() {
        let err = EngineConfig::default()
            .with_env_overrides(|_| Some("soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: SEED_ENV, .. }));
    }

    #[test]
    fn unknown_type_is_a_yaml_error() {
        assert!(matches!(
            EngineConfig::from_yaml_str("rng_seed: [1, 2]"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
