//! Call record model
//!
//! Represents one phone call as supplied by the caller. The `cost` field
//! stays empty until the rating engine prices the record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RatingError;
use crate::RatingResult;

/// Call detail record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Caller identifier
    pub from: String,

    /// Callee identifier
    pub to: String,

    /// Call length in minutes, may be fractional
    pub duration: Decimal,

    /// Call date as `YYYY-MM-DD`; only the year is used for rating
    pub date: String,

    /// Billing jurisdiction name
    pub state: String,

    /// Rated cost in dollars (None until rated, or after a failed rating)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
}

impl CallRecord {
    /// Create an unrated call record
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        duration: Decimal,
        date: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            duration,
            date: date.into(),
            state: state.into(),
            cost: None,
        }
    }

    /// Year the call was placed in
    ///
    /// Taken from the first `-` separated component of `date`, which must be
    /// a non-empty run of ASCII digits.
    pub fn year(&self) -> RatingResult<i32> {
        let head = self.date.split('-').next().unwrap_or_default();

        if head.is_empty() || !head.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RatingError::MalformedDate(self.date.clone()));
        }

        head.parse()
            .map_err(|_| RatingError::MalformedDate(self.date.clone()))
    }

    /// Duration checked for rating
    pub fn billable_duration(&self) -> RatingResult<Decimal> {
        if self.duration < Decimal::ZERO {
            return Err(RatingError::InvalidDuration(self.duration));
        }
        Ok(self.duration)
    }
}
