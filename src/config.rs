//! Decimal precision configuration.
//!
//! Every [`Vector`](crate::Vector) carries the context it was built with, so
//! precision is fixed once by the caller and never read from global state.

use anyhow::Context as _;
use bigdecimal::{BigDecimal, Context, RoundingMode};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

use crate::{Result, VectorError};

/// Significant digits kept when no context is given.
pub const DEFAULT_PRECISION: u64 = 30;

/// Lowest precision a context accepts.
pub const MIN_PRECISION: u64 = 28;

/// Highest precision a context accepts.
pub const MAX_PRECISION: u64 = 1000;

/// Precision settings shared by all arithmetic on a vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecimalContext {
    /// Number of significant decimal digits kept after each operation
    #[serde(default = "default_precision")]
    precision: NonZeroU64,
}

fn default_precision() -> NonZeroU64 {
    NonZeroU64::new(DEFAULT_PRECISION).unwrap_or(NonZeroU64::MIN)
}

impl DecimalContext {
    pub fn new(precision: u64) -> Result<Self> {
        let precision = validate_precision(precision)?;
        Ok(Self { precision })
    }

    /// Parse a context from JSON, e.g. `{"precision": 40}`.
    ///
    /// Missing fields take their defaults. The result is validated the same
    /// way as [`DecimalContext::new`].
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: DecimalContext =
            serde_json::from_str(json).context("Failed to parse decimal context from JSON")?;
        log::trace!("loaded decimal context with precision {}", parsed.precision);
        Self::new(parsed.precision.get())
    }

    pub fn to_json(&self) -> Result<String> {
        let json =
            serde_json::to_string(self).context("Failed to serialize decimal context to JSON")?;
        Ok(json)
    }

    pub fn precision(&self) -> u64 {
        self.precision.get()
    }

    /// Round `value` half-even to this context's precision, leaving shorter
    /// values untouched.
    pub fn round(&self, value: BigDecimal) -> BigDecimal {
        if value.digits() > self.precision.get() {
            value.with_precision_round(self.precision, RoundingMode::HalfEven)
        } else {
            value
        }
    }

    /// Context for inexact operations (square root, reciprocal).
    pub(crate) fn arithmetic(&self) -> Context {
        Context::new(self.precision, RoundingMode::HalfEven)
    }
}

impl Default for DecimalContext {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

fn validate_precision(precision: u64) -> Result<NonZeroU64> {
    if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
        return Err(VectorError::Config(format!(
            "precision must be between {} and {}, got {}",
            MIN_PRECISION, MAX_PRECISION, precision
        )));
    }
    NonZeroU64::new(precision)
        .ok_or_else(|| VectorError::Config("precision must be nonzero".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_precision() {
        assert_eq!(DecimalContext::default().precision(), DEFAULT_PRECISION);
    }

    #[test]
    fn test_precision_bounds() {
        assert!(DecimalContext::new(MIN_PRECISION).is_ok());
        assert!(DecimalContext::new(MAX_PRECISION).is_ok());
        assert!(matches!(
            DecimalContext::new(MIN_PRECISION - 1),
            Err(VectorError::Config(_))
        ));
        assert!(matches!(
            DecimalContext::new(MAX_PRECISION + 1),
            Err(VectorError::Config(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let context = DecimalContext::from_json(r#"{"precision": 40}"#).unwrap();
        assert_eq!(context.precision(), 40);

        let defaulted = DecimalContext::from_json("{}").unwrap();
        assert_eq!(defaulted, DecimalContext::default());

        let json = context.to_json().unwrap();
        assert_eq!(DecimalContext::from_json(&json).unwrap(), context);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            DecimalContext::from_json("not json"),
            Err(VectorError::Other(_))
        ));
        assert!(matches!(
            DecimalContext::from_json(r#"{"precision": 5}"#),
            Err(VectorError::Config(_))
        ));
    }

    #[test]
    fn test_round_limits_significant_digits() {
        let context = DecimalContext::default();
        let long = BigDecimal::from_str("1.23456789012345678901234567890123456789").unwrap();
        let rounded = context.round(long);
        assert_eq!(rounded.digits(), DEFAULT_PRECISION);

        let short = BigDecimal::from_str("2.5").unwrap();
        assert_eq!(context.round(short.clone()), short);
    }

    #[test]
    fn test_round_is_symmetric_in_sign() {
        let context = DecimalContext::default();
        let up = BigDecimal::from_str("1.000000000000000000000000000009").unwrap();
        let expected = BigDecimal::from_str("1.00000000000000000000000000001").unwrap();

        assert_eq!(context.round(up.clone()), expected);
        assert_eq!(context.round(-up), -expected);

        let down = BigDecimal::from_str("-1.000000000000000000000000000001").unwrap();
        assert_eq!(context.round(down), BigDecimal::from(-1));
    }

    #[test]
    fn test_round_ties_to_even() {
        let context = DecimalContext::default();
        let even = BigDecimal::from_str("1.000000000000000000000000000005").unwrap();
        let odd = BigDecimal::from_str("1.000000000000000000000000000015").unwrap();

        assert_eq!(context.round(even.clone()), BigDecimal::from(1));
        assert_eq!(
            context.round(odd.clone()),
            BigDecimal::from_str("1.00000000000000000000000000002").unwrap()
        );
        assert_eq!(context.round(-even), BigDecimal::from(-1));
        assert_eq!(
            context.round(-odd),
            BigDecimal::from_str("-1.00000000000000000000000000002").unwrap()
        );
    }

    #[test]
    fn test_high_precision_is_accepted() {
        let context = DecimalContext::new(500).unwrap();
        assert_eq!(context.precision(), 500);
    }
}
