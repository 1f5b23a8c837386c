//! CallRate Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the CallRate system. It includes:
//!
//! - Domain models (CallRecord, State, RateRule)
//! - The rate table and rating service traits
//! - Unified error handling with stable error codes
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::RatingError;

/// Result type alias using RatingError
pub type RatingResult<T> = Result<T, RatingError>;
