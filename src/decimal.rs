//! Conversion of coordinate-like values into exact decimals.

use bigdecimal::BigDecimal;
use num_traits::FromPrimitive;
use std::str::FromStr;

use crate::{InvalidArgument, Result};

/// Values that convert exactly into a [`BigDecimal`].
///
/// Integers and decimals always convert. Strings are parsed after trimming
/// surrounding whitespace. Floats convert from their binary value and must be
/// finite.
pub trait IntoDecimal {
    fn into_decimal(self) -> Result<BigDecimal>;
}

impl IntoDecimal for BigDecimal {
    fn into_decimal(self) -> Result<BigDecimal> {
        Ok(self)
    }
}

impl IntoDecimal for &BigDecimal {
    fn into_decimal(self) -> Result<BigDecimal> {
        Ok(self.clone())
    }
}

impl IntoDecimal for &str {
    fn into_decimal(self) -> Result<BigDecimal> {
        parse_decimal(self)
    }
}

impl IntoDecimal for String {
    fn into_decimal(self) -> Result<BigDecimal> {
        parse_decimal(&self)
    }
}

impl IntoDecimal for &String {
    fn into_decimal(self) -> Result<BigDecimal> {
        parse_decimal(self)
    }
}

macro_rules! impl_into_decimal_for_int {
    ($($t:ty),*) => {
        $(
            impl IntoDecimal for $t {
                fn into_decimal(self) -> Result<BigDecimal> {
                    Ok(BigDecimal::from(self))
                }
            }

            impl IntoDecimal for &$t {
                fn into_decimal(self) -> Result<BigDecimal> {
                    Ok(BigDecimal::from(*self))
                }
            }
        )*
    };
}

impl_into_decimal_for_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl IntoDecimal for f64 {
    fn into_decimal(self) -> Result<BigDecimal> {
        BigDecimal::from_f64(self).ok_or_else(|| {
            InvalidArgument::ParseDecimal {
                input: self.to_string(),
                reason: "value is not finite".to_string(),
            }
            .into()
        })
    }
}

impl IntoDecimal for f32 {
    fn into_decimal(self) -> Result<BigDecimal> {
        f64::from(self).into_decimal()
    }
}

fn parse_decimal(input: &str) -> Result<BigDecimal> {
    BigDecimal::from_str(input.trim()).map_err(|e| {
        InvalidArgument::ParseDecimal {
            input: input.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
