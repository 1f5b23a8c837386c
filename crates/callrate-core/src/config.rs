//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.
//! The per-state rate table is fixed at build time and is not configurable here.

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::env;

use crate::RatingResult;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub rating: RatingConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// What a batch run does when a record fails to rate
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Rate every other record and collect failures in the batch report
    #[default]
    SkipAndReport,
    /// Stop at the first failing record
    AbortBatch,
}

/// Rating engine configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RatingConfig {
    /// Batch failure policy
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Rate batches across the rayon thread pool
    #[serde(default)]
    pub parallel: bool,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::SkipAndReport,
            parallel: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// Default filter level when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON formatted log lines
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config files
    pub fn load() -> RatingResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // e.g. CALLRATE__RATING__FAILURE_POLICY=abort_batch
            .add_source(
                Environment::with_prefix("CALLRATE")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::build(builder)
    }

    fn defaults() -> RatingResult<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("rating.failure_policy", "skip_and_report")?
            .set_default("rating.parallel", false)?
            .set_default("log.level", "info")?
            .set_default("log.json", false)?)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> RatingResult<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }
}
