//! Common traits for rate lookup and rating services
//!
//! Defines the seams between the static rate table, the rating engine, and
//! the batch callers that consume its results.

use crate::error::RatingError;
use crate::models::{CallRecord, RateRule};
use rust_decimal::Decimal;

/// Rate table trait
///
/// Maps a state name to its pricing rule. Implementations are read-only
/// after construction so a single table can be shared by every worker.
pub trait RateTable: Send + Sync {
    /// Find the rule for a state name (exact match)
    fn rule_for(&self, state: &str) -> Result<RateRule, RatingError>;
}

/// Rating service trait
pub trait RatingService: Send + Sync {
    /// Calculate cost for a state, duration and year
    fn calculate_cost(&self, state: &str, duration: Decimal, year: i32)
        -> Result<Decimal, RatingError>;

    /// Rate one record in place, overwriting any previous cost
    fn rate_record(&self, record: &mut CallRecord) -> Result<Decimal, RatingError>;
}

/// A record that could not be rated
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFailure {
    /// Position of the record in the input batch
    pub index: usize,
    pub error: RatingError,
}

/// Outcome of rating a batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Number of records that received a cost
    pub rated: usize,
    /// Sum of all costs assigned in this run
    pub total_cost: Decimal,
    /// Records left unrated, in input order
    pub failures: Vec<RecordFailure>,
}

impl BatchReport {
    /// True when every record was rated
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total records seen
    pub fn processed(&self) -> usize {
        self.rated + self.failures.len()
    }

    /// Look up the failure for a record position
    pub fn failure_at(&self, index: usize) -> Option<&RecordFailure> {
        self.failures.iter().find(|f| f.index == index)
    }
}
