//! Rating services for CallRate
//!
//! This crate contains the rate table and the rating engine that prices
//! batches of call records.
//!
//! # Architecture
//!
//! - The rate table is a constant binding of each state to its pricing rule
//! - The rating engine owns an `Arc` to a table and is safe to share
//! - Batch operations are instrumented with tracing
//! - Per-record failures are reported with `RatingError`
//!
//! # Services
//!
//! - `StandardRateTable` - State to rate rule bindings
//! - `RatingEngine` - Sequential and parallel batch rating

pub mod rating;

pub use rating::{RatingEngine, StandardRateTable};

/// Rate constants, in dollars per minute
pub mod constants {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Calls placed in this year get the year-conditional "current" rate
    pub const REFERENCE_YEAR: i32 = 2023;

    /// Texas rate for calls in the reference year
    pub const TEXAS_CURRENT_RATE: Decimal = dec!(0.15);

    /// Texas rate for calls in any other year
    pub const TEXAS_OTHER_RATE: Decimal = dec!(0.08);

    /// California flat rate
    pub const CALIFORNIA_RATE: Decimal = dec!(0.20);

    /// New York rate for calls in the reference year
    pub const NEW_YORK_CURRENT_RATE: Decimal = dec!(0.25);

    /// New York rate for calls in any other year
    pub const NEW_YORK_OTHER_RATE: Decimal = dec!(0.10);

    /// Florida flat rate
    pub const FLORIDA_RATE: Decimal = dec!(0.30);

    /// Illinois rate before truncation
    pub const ILLINOIS_RATE: Decimal = dec!(0.35);

    /// Illinois costs are truncated down to a multiple of this amount (5 cents)
    pub const ILLINOIS_TRUNCATION_STEP: Decimal = dec!(0.05);

    /// Michigan flat rate
    pub const MICHIGAN_RATE: Decimal = dec!(0.40);
}
