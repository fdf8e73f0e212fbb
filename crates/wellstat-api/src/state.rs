//! # Application State
//!
//! Shared state passed to every handler through the `State` extractor.
//! The engine is stateless, so this holds configuration only: there is no
//! per-request data shared between concurrent computations.

use std::str::FromStr;
use std::sync::Arc;

use wellstat_core::{EngineConfig, WellstatError};
use wellstat_spatial::SummaryAggregator;

/// Default number of records returned by the proximity ranker.
pub const DEFAULT_PROXIMITY_LIMIT: usize = 25;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Engine tunables.
    pub engine: EngineConfig,
    /// Limit applied when a proximity request omits one.
    pub default_proximity_limit: usize,
    /// Largest limit a proximity request may ask for.
    pub max_proximity_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            engine: EngineConfig::default(),
            default_proximity_limit: DEFAULT_PROXIMITY_LIMIT,
            max_proximity_limit: 500,
        }
    }
}

impl AppConfig {
    /// Build configuration from process environment variables.
    ///
    /// | Variable                       | Field                            |
    /// |--------------------------------|----------------------------------|
    /// | `PORT`                         | `port`                           |
    /// | `WELLSTAT_NND_THRESHOLD`       | `engine.nnd.high_input_threshold`|
    /// | `WELLSTAT_NND_REDUCED_CAP`     | `engine.nnd.reduced_cap`         |
    /// | `WELLSTAT_NND_DEFAULT_CAP`     | `engine.nnd.default_cap`         |
    /// | `WELLSTAT_TOP_COMPANIES`       | `engine.top_companies_limit`     |
    /// | `WELLSTAT_MAX_PROXIMITY_LIMIT` | `max_proximity_limit`            |
    ///
    /// Unset variables keep their defaults; set but unparseable ones fail.
    pub fn from_env() -> Result<Self, WellstatError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WellstatError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let parse = |key: &str, slot: &mut usize| -> Result<(), WellstatError> {
            if let Some(v) = parse_var(&lookup, key)? {
                *slot = v;
            }
            Ok(())
        };

        if let Some(port) = parse_var(&lookup, "PORT")? {
            config.port = port;
        }
        parse("WELLSTAT_NND_THRESHOLD", &mut config.engine.nnd.high_input_threshold)?;
        parse("WELLSTAT_NND_REDUCED_CAP", &mut config.engine.nnd.reduced_cap)?;
        parse("WELLSTAT_NND_DEFAULT_CAP", &mut config.engine.nnd.default_cap)?;
        parse("WELLSTAT_TOP_COMPANIES", &mut config.engine.top_companies_limit)?;
        parse("WELLSTAT_MAX_PROXIMITY_LIMIT", &mut config.max_proximity_limit)?;

        config.engine.validate()?;
        if config.default_proximity_limit > config.max_proximity_limit {
            config.default_proximity_limit = config.max_proximity_limit;
        }
        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, WellstatError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| WellstatError::Config(format!("{key}={raw:?} is not a valid value"))),
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub aggregator: SummaryAggregator,
}

impl AppState {
    /// State with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// State with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let aggregator = SummaryAggregator::new(config.engine.clone());
        Self {
            config: Arc::new(config),
            aggregator,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
