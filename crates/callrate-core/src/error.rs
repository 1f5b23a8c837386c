//! Unified error handling for CallRate
//!
//! Rating failures are per-record. A batch caller decides whether a failure
//! aborts the run or is collected into the batch report.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main rating error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RatingError {
    // ==================== Record Errors ====================
    #[error("Unrecognized state: {0:?}")]
    UnrecognizedState(String),

    #[error("Malformed date: {0:?} (expected YYYY-MM-DD)")]
    MalformedDate(String),

    #[error("Invalid duration: {0} (must be non-negative)")]
    InvalidDuration(Decimal),

    #[error("Cost overflow for duration {0}")]
    CostOverflow(Decimal),

    // ==================== Batch Errors ====================
    #[error("Batch aborted at record {index}: {source}")]
    BatchAborted {
        index: usize,
        source: Box<RatingError>,
    },

    // ==================== Internal Errors ====================
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RatingError {
    /// Returns the stable error code for reports and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            RatingError::UnrecognizedState(_) => "unrecognized_state",
            RatingError::MalformedDate(_) => "malformed_date",
            RatingError::InvalidDuration(_) => "invalid_duration",
            RatingError::CostOverflow(_) => "cost_overflow",
            RatingError::BatchAborted { .. } => "batch_aborted",
            RatingError::Config(_) => "config_error",
        }
    }
}

// ==================== From implementations ====================

impl From<config::ConfigError> for RatingError {
    fn from(err: config::ConfigError) -> Self {
        RatingError::Config(err.to_string())
    }
}
