//! Rating engine implementation
//!
//! Looks up each record's rate rule in the rate table, applies it, and writes
//! the cost back onto the record.

use callrate_core::{
    config::{FailurePolicy, RatingConfig},
    models::{CallRecord, RateRule, State},
    traits::{BatchReport, RateTable, RatingService, RecordFailure},
    RatingError, RatingResult,
};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::constants::*;

/// Constant state to rule bindings
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRateTable;

impl StandardRateTable {
    /// Pricing rule for a state
    pub const fn rule(state: State) -> RateRule {
        match state {
            State::Texas => RateRule::YearConditional {
                year: REFERENCE_YEAR,
                current: TEXAS_CURRENT_RATE,
                other: TEXAS_OTHER_RATE,
            },
            State::California => RateRule::Flat {
                rate: CALIFORNIA_RATE,
            },
            State::NewYork => RateRule::YearConditional {
                year: REFERENCE_YEAR,
                current: NEW_YORK_CURRENT_RATE,
                other: NEW_YORK_OTHER_RATE,
            },
            State::Florida => RateRule::Flat { rate: FLORIDA_RATE },
            State::Illinois => RateRule::TruncatedFlat {
                rate: ILLINOIS_RATE,
                step: ILLINOIS_TRUNCATION_STEP,
            },
            State::Michigan => RateRule::Flat {
                rate: MICHIGAN_RATE,
            },
        }
    }
}

impl RateTable for StandardRateTable {
    fn rule_for(&self, state: &str) -> RatingResult<RateRule> {
        let state: State = state.parse()?;
        Ok(Self::rule(state))
    }
}

/// Batch rating engine
///
/// Rating is a pure function of a record's `state`, `duration` and `date`,
/// so re-rating an unchanged record always yields the same cost.
pub struct RatingEngine<T: RateTable> {
    table: Arc<T>,
    policy: FailurePolicy,
    parallel: bool,
}

impl RatingEngine<StandardRateTable> {
    /// Engine over the standard rate table with default settings
    pub fn standard() -> Self {
        Self::new(Arc::new(StandardRateTable))
    }
}

impl<T: RateTable> RatingEngine<T> {
    /// Create a new rating engine
    pub fn new(table: Arc<T>) -> Self {
        Self {
            table,
            policy: FailurePolicy::default(),
            parallel: false,
        }
    }

    /// Create an engine configured from `RatingConfig`
    pub fn from_config(table: Arc<T>, config: &RatingConfig) -> Self {
        Self {
            table,
            policy: config.failure_policy,
            parallel: config.parallel,
        }
    }

    /// Set the batch failure policy
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Price a record without touching it
    fn price(&self, record: &CallRecord) -> RatingResult<Decimal> {
        let rule = self.table.rule_for(&record.state)?;
        let duration = record.billable_duration()?;
        let year = record.year()?;
        rule.apply(duration, year)
    }

    /// Write one outcome onto its record and into the report
    fn settle(
        &self,
        index: usize,
        record: &mut CallRecord,
        outcome: RatingResult<Decimal>,
        report: &mut BatchReport,
    ) -> RatingResult<()> {
        match outcome {
            Ok(cost) => {
                debug!(
                    index,
                    state = %record.state,
                    duration = %record.duration,
                    cost = %cost,
                    "Rated call record"
                );
                record.cost = Some(cost);
                report.rated += 1;
                report.total_cost += cost;
                Ok(())
            }
            Err(error) => {
                record.cost = None;
                warn!(
                    index,
                    state = %record.state,
                    code = error.error_code(),
                    "Failed to rate call record: {}",
                    error
                );
                match self.policy {
                    FailurePolicy::AbortBatch => Err(RatingError::BatchAborted {
                        index,
                        source: Box::new(error),
                    }),
                    FailurePolicy::SkipAndReport => {
                        report.failures.push(RecordFailure { index, error });
                        Ok(())
                    }
                }
            }
        }
    }

    /// Rate a batch in input order
    ///
    /// With `SkipAndReport` every record is visited and failed records are
    /// listed in the report with their cost cleared. With `AbortBatch` the
    /// first failure is returned; records before it keep their new cost and
    /// records after it are left untouched.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn rate(&self, records: &mut [CallRecord]) -> RatingResult<BatchReport> {
        if self.parallel {
            return self.rate_parallel(records);
        }

        let mut report = BatchReport::default();
        for (index, record) in records.iter_mut().enumerate() {
            let outcome = self.price(record);
            self.settle(index, record, outcome, &mut report)?;
        }

        Self::log_summary(&report);
        Ok(report)
    }

    /// Rate a batch using the rayon thread pool
    ///
    /// Records are priced concurrently against the shared read-only table;
    /// costs are then written in input order, so the result matches `rate`.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn rate_parallel(&self, records: &mut [CallRecord]) -> RatingResult<BatchReport> {
        let priced: Vec<RatingResult<Decimal>> =
            records.par_iter().map(|record| self.price(record)).collect();

        let mut report = BatchReport::default();
        for (index, (record, outcome)) in records.iter_mut().zip(priced).enumerate() {
            self.settle(index, record, outcome, &mut report)?;
        }

        Self::log_summary(&report);
        Ok(report)
    }

    fn log_summary(report: &BatchReport) {
        info!(
            rated = report.rated,
            failed = report.failures.len(),
            total_cost = %report.total_cost,
            "Batch rating complete"
        );
    }
}

impl<T: RateTable> RatingService for RatingEngine<T> {
    fn calculate_cost(&self, state: &str, duration: Decimal, year: i32) -> RatingResult<Decimal> {
        if duration < Decimal::ZERO {
            return Err(RatingError::InvalidDuration(duration));
        }
        let rule = self.table.rule_for(state)?;
        rule.apply(duration, year)
    }

    fn rate_record(&self, record: &mut CallRecord) -> RatingResult<Decimal> {
        let outcome = self.price(record);
        record.cost = outcome.as_ref().ok().copied();
        outcome
    }
}
