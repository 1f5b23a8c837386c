//! Domain models for CallRate
//!
//! This module contains the core domain models used throughout the application.

pub mod cdr;
pub mod rate;
pub mod state;

pub use cdr::CallRecord;
pub use rate::{round_cents, RateRule};
pub use state::State;
