//! CallRate batch runner
//!
//! Rates the reference batch of call records against the standard state
//! rate table and prints one report line per record.

use anyhow::Context;
use callrate_core::{
    config::LogConfig,
    models::{CallRecord, State},
    traits::BatchReport,
    AppConfig,
};
use callrate_services::{RatingEngine, StandardRateTable};
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the reference call batch
fn create_records() -> Vec<CallRecord> {
    vec![
        CallRecord::new("Alice", "Bob", dec!(5), "2023-10-01", "Texas"),
        CallRecord::new("Bob", "Charlie", dec!(7), "2023-10-02", "California"),
        CallRecord::new("Charlie", "David", dec!(4), "2023-10-03", "New York"),
        CallRecord::new("David", "Eve", dec!(6), "2023-10-04", "Florida"),
        CallRecord::new("Eve", "Frank", dec!(8.1), "2023-10-05", "Illinois"),
        CallRecord::new("Frank", "Grace", dec!(9), "2023-10-06", "Michigan"),
    ]
}

/// Initialize tracing/logging
fn init_tracing(log: &LogConfig) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "callrate={},callrate_services={},callrate_core={}",
            log.level, log.level, log.level
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);
    if log.json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

/// One line per record; failed records are marked instead of showing a cost
fn format_line(index: usize, record: &CallRecord, report: &BatchReport) -> String {
    match (record.cost, report.failure_at(index)) {
        (Some(cost), _) => format!(
            "State: {}, Duration: {}, Cost: ${:5.2}",
            record.state, record.duration, cost
        ),
        (None, Some(failure)) => format!(
            "State: {}, Duration: {}, FAILED: {}",
            record.state, record.duration, failure.error
        ),
        (None, None) => format!(
            "State: {}, Duration: {}, FAILED: not rated",
            record.state, record.duration
        ),
    }
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config.log);

    info!("Starting CallRate v{}", env!("CARGO_PKG_VERSION"));

    for state in State::ALL {
        info!(state = %state, rule = %StandardRateTable::rule(state), "Rate rule");
    }

    let engine = RatingEngine::from_config(Arc::new(StandardRateTable), &config.rating);
    info!(policy = ?engine.policy(), "Rating engine ready");
    let mut records = create_records();

    let report = engine
        .rate(&mut records)
        .context("batch rating aborted")?;

    for (index, record) in records.iter().enumerate() {
        println!("{}", format_line(index, record, &report));
    }

    if !report.is_clean() {
        warn!(
            processed = report.processed(),
            failed = report.failures.len(),
            "Some call records could not be rated"
        );
    }

    Ok(())
}
