//! Configuration handling for the pipeline runner.
//!
//! All knobs are optional environment variables with sensible development
//! defaults. `Config::from_env` performs the loading and validates the
//! numeric values.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::runner::RunnerConfig;

/// Environment variable names. Keeping them public lets tests and deployment
/// scripts refer to them directly.
pub const ENV_MAX_STAGE_ATTEMPTS: &str = "PRESSROOM_MAX_STAGE_ATTEMPTS";
pub const ENV_BASE_BACKOFF_SECS: &str = "PRESSROOM_BASE_BACKOFF_SECS";

/// Default development values used when environment variables are absent.
const DEFAULT_MAX_STAGE_ATTEMPTS: u32 = 3;
const DEFAULT_BASE_BACKOFF_SECS: u32 = 2;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    max_stage_attempts: u32,
    base_backoff_secs: u32,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(max_stage_attempts: u32, base_backoff_secs: u32) -> Self {
        Self {
            max_stage_attempts,
            base_backoff_secs,
        }
    }

    /// Load from environment variables, falling back to development defaults.
    /// Unparsable numeric values yield a `ConfigError`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_stage_attempts =
            parse_env_u32(ENV_MAX_STAGE_ATTEMPTS, DEFAULT_MAX_STAGE_ATTEMPTS)?;
        let base_backoff_secs = parse_env_u32(ENV_BASE_BACKOFF_SECS, DEFAULT_BASE_BACKOFF_SECS)?;

        if max_stage_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_MAX_STAGE_ATTEMPTS,
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            max_stage_attempts,
            base_backoff_secs,
        })
    }

    /// How many times the runner tries a stage before declaring it failed.
    pub fn max_stage_attempts(&self) -> u32 {
        self.max_stage_attempts
    }

    /// Base delay for the exponential retry backoff.
    pub fn base_backoff_secs(&self) -> u32 {
        self.base_backoff_secs
    }

    /// Runner configuration derived from this config.
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            max_stage_attempts: self.max_stage_attempts,
            base_backoff_secs: self.base_backoff_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STAGE_ATTEMPTS, DEFAULT_BASE_BACKOFF_SECS)
    }
}

fn parse_env_u32(key: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            field: key,
            reason: format!("expected an unsigned integer, got '{raw}'"),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
