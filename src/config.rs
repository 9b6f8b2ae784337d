//! Configuration loading from TOML files.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub betting: BettingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Tunables for the betting core.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BettingConfig {
    /// Points credited to a freshly registered account.
    pub starting_points: i64,
    /// Half-width of the uniform price drift applied to non-player templates.
    pub template_drift_spread: f64,
    /// Half-width of the uniform price drift applied to per-player templates.
    pub player_drift_spread: f64,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.url",
            }
            .into());
        }
        if self.betting.starting_points < 0 {
            return Err(ConfigError::InvalidValue {
                field: "betting.starting_points",
                reason: format!("must be non-negative, got {}", self.betting.starting_points),
            }
            .into());
        }
        for (field, spread) in [
            ("betting.template_drift_spread", self.betting.template_drift_spread),
            ("betting.player_drift_spread", self.betting.player_drift_spread),
        ] {
            if !spread.is_finite() || spread < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be a non-negative number, got {spread}"),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Initialize the tracing subscriber from the logging section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            betting: BettingConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "matchbook.db".into(),
        }
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Default for BettingConfig {
    fn default() -> Self {
        Self {
            starting_points: 100,
            template_drift_spread: 0.3,
            player_drift_spread: 0.5,
        }
    }
}
