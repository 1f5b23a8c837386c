//! Rate rule model
//!
//! A rate rule is a pure pricing policy mapping a call's duration (minutes)
//! and year to a cost in dollars. All arithmetic is decimal, so amounts that
//! are exact multiples of a cent stay exact.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RatingError;
use crate::RatingResult;

/// Round a monetary amount to whole cents, halves away from zero
#[inline]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Pricing policy for one billing jurisdiction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateRule {
    /// `duration * rate`, rounded to cents
    Flat { rate: Decimal },

    /// `current` per minute for calls placed in `year`, `other` for any other year
    YearConditional {
        year: i32,
        current: Decimal,
        other: Decimal,
    },

    /// Flat cost rounded to cents, then truncated down to a multiple of `step`
    TruncatedFlat { rate: Decimal, step: Decimal },
}

impl RateRule {
    /// Calculate the cost of a call
    ///
    /// # Arguments
    /// * `duration` - Call length in minutes, assumed non-negative
    /// * `year` - Calendar year the call was placed in
    ///
    /// # Errors
    ///
    /// Returns `RatingError::CostOverflow` when the cost does not fit in a `Decimal`
    #[inline]
    pub fn apply(&self, duration: Decimal, year: i32) -> RatingResult<Decimal> {
        let overflow = || RatingError::CostOverflow(duration);

        match *self {
            RateRule::Flat { rate } => {
                let cost = duration.checked_mul(rate).ok_or_else(overflow)?;
                Ok(round_cents(cost))
            }
            RateRule::YearConditional {
                year: rule_year,
                current,
                other,
            } => {
                let rate = if year == rule_year { current } else { other };
                let cost = duration.checked_mul(rate).ok_or_else(overflow)?;
                Ok(round_cents(cost))
            }
            RateRule::TruncatedFlat { rate, step } => {
                let cost = round_cents(duration.checked_mul(rate).ok_or_else(overflow)?);
                if step <= Decimal::ZERO {
                    return Ok(cost);
                }
                // cost is non-negative, so dropping the remainder floors it
                let excess = cost.checked_rem(step).ok_or_else(overflow)?;
                Ok(round_cents(cost - excess))
            }
        }
    }
}

impl fmt::Display for RateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateRule::Flat { rate } => write!(f, "flat {}/min", rate),
            RateRule::YearConditional {
                year,
                current,
                other,
            } => write!(f, "{}/min in {}, {}/min otherwise", current, year, other),
            RateRule::TruncatedFlat { rate, step } => {
                write!(f, "{}/min truncated to {}", rate, step)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    const ILLINOIS: RateRule = RateRule::TruncatedFlat {
        rate: dec!(0.35),
        step: dec!(0.05),
    };

    const TEXAS: RateRule = RateRule::YearConditional {
        year: 2023,
        current: dec!(0.15),
        other: dec!(0.08),
    };

    #[test]
    fn test_round_cents_half_away_from_zero() {
        assert_eq!(round_cents(dec!(2.835)), dec!(2.84));
        assert_eq!(round_cents(dec!(0.385)), dec!(0.39));
        assert_eq!(round_cents(dec!(1.234)), dec!(1.23));
    }

    #[test]
    fn test_exact_half_cent_rounds_up() {
        assert_eq!(TEXAS.apply(dec!(0.1), 2023), Ok(dec!(0.02)));
    }

    #[test]
    fn test_flat_rate() {
        let rule = RateRule::Flat { rate: dec!(0.20) };
        assert_eq!(rule.apply(dec!(7), 2023), Ok(dec!(1.40)));
        assert_eq!(rule.apply(dec!(7), 1999), Ok(dec!(1.40)));
        assert_eq!(rule.apply(dec!(2.5), 2023), Ok(dec!(0.50)));
    }

    #[test]
    fn test_year_conditional_rate() {
        assert_eq!(TEXAS.apply(dec!(5), 2023), Ok(dec!(0.75)));
        assert_eq!(TEXAS.apply(dec!(5), 2022), Ok(dec!(0.40)));
        assert_eq!(TEXAS.apply(dec!(5), 2024), Ok(dec!(0.40)));
    }

    #[test]
    fn test_truncated_rate_reference_cases() {
        assert_eq!(ILLINOIS.apply(dec!(0), 2023), Ok(dec!(0.00)));
        assert_eq!(ILLINOIS.apply(dec!(1), 2023), Ok(dec!(0.35)));
        assert_eq!(ILLINOIS.apply(dec!(1.1), 2023), Ok(dec!(0.35)));
        assert_eq!(ILLINOIS.apply(dec!(10.1), 2023), Ok(dec!(3.50)));
        assert_eq!(ILLINOIS.apply(dec!(10.2), 2023), Ok(dec!(3.55)));
        assert_eq!(ILLINOIS.apply(dec!(8.1), 2023), Ok(dec!(2.80)));
    }

    #[test]
    fn test_truncated_exact_multiple_is_kept() {
        // 3.55 must not drop to 3.50
        let rule = RateRule::TruncatedFlat {
            rate: dec!(1),
            step: dec!(0.05),
        };
        assert_eq!(rule.apply(dec!(3.55), 2023), Ok(dec!(3.55)));
    }

    #[test]
    fn test_zero_duration_is_free() {
        let rules = [RateRule::Flat { rate: dec!(0.40) }, TEXAS, ILLINOIS];
        for rule in rules {
            assert_eq!(rule.apply(Decimal::ZERO, 2023), Ok(Decimal::ZERO));
            assert_eq!(rule.apply(Decimal::ZERO, 1990), Ok(Decimal::ZERO));
        }
    }

    #[test]
    fn test_truncated_huge_duration_does_not_panic() {
        let duration: Decimal = "20000000000000000000000000000".parse().unwrap();
        assert_eq!(
            ILLINOIS.apply(duration, 2023),
            Ok("7000000000000000000000000000".parse().unwrap())
        );
    }

    #[test]
    fn test_cost_overflow_is_an_error() {
        let rule = RateRule::Flat { rate: dec!(2) };
        assert_eq!(
            rule.apply(Decimal::MAX, 2023),
            Err(RatingError::CostOverflow(Decimal::MAX))
        );
        let rule = RateRule::TruncatedFlat {
            rate: dec!(2),
            step: dec!(0.05),
        };
        assert_eq!(
            rule.apply(Decimal::MAX, 2023),
            Err(RatingError::CostOverflow(Decimal::MAX))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            RateRule::Flat { rate: dec!(0.20) }.to_string(),
            "flat 0.20/min"
        );
        assert_eq!(TEXAS.to_string(), "0.15/min in 2023, 0.08/min otherwise");
        assert_eq!(ILLINOIS.to_string(), "0.35/min truncated to 0.05");
    }

    /// Durations with up to two decimal places, 0.00 to 10000.00 minutes
    fn duration() -> impl Strategy<Value = Decimal> {
        (0i64..=1_000_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
    }

    proptest! {
        #[test]
        fn prop_flat_is_rounded_product(d in duration(), year in any::<i32>()) {
            let rule = RateRule::Flat { rate: dec!(0.30) };
            prop_assert_eq!(rule.apply(d, year), Ok(round_cents(d * dec!(0.30))));
        }

        #[test]
        fn prop_year_conditional_only_matches_exact_year(d in duration(), year in any::<i32>()) {
            let expected = if year == 2023 { dec!(0.15) } else { dec!(0.08) };
            prop_assert_eq!(TEXAS.apply(d, year), Ok(round_cents(d * expected)));
        }

        #[test]
        fn prop_truncated_is_multiple_of_step(d in duration()) {
            let cost = ILLINOIS.apply(d, 2023).unwrap();
            prop_assert_eq!(cost % dec!(0.05), Decimal::ZERO);
            prop_assert!(cost <= round_cents(d * dec!(0.35)));
        }

        #[test]
        fn prop_truncated_is_monotonic(a in duration(), b in duration()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ILLINOIS.apply(lo, 2023).unwrap() <= ILLINOIS.apply(hi, 2023).unwrap());
        }
    }
}
