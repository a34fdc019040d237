//! Precision handling between base units and human-readable amounts
//!
//! Pools and quotes work in base units (`u128`). People type and read
//! decimal amounts. All conversions between the two live here.
//!
//! ## Rules
//!
//! 1. **NO FLOATING POINT**: human amounts are [`Decimal`]
//! 2. **Truncate, never round up**: a typed amount finer than the token's
//!    precision loses the extra digits
//! 3. **Display rounding is toward zero** so shown balances are never
//!    larger than what is actually held

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{PrecisionError, Result};

/// Largest scale a `Decimal` can carry
const MAX_DECIMAL_SCALE: u32 = 28;

/// Convert a human amount to base units, truncating sub-unit digits
pub fn to_base_units(human: Decimal, decimals: u8) -> Result<u128> {
    if human < Decimal::ZERO {
        return Err(PrecisionError::NegativeAmount {
            value: human.to_string(),
        });
    }

    let mantissa = human.mantissa().unsigned_abs();
    let scale = human.scale();
    let decimals = u32::from(decimals);

    if decimals >= scale {
        10u128
            .checked_pow(decimals - scale)
            .and_then(|factor| mantissa.checked_mul(factor))
            .ok_or_else(|| {
                PrecisionError::overflow(format!("{human} with {decimals} decimals exceeds u128"))
            })
    } else {
        // scale <= 28, so the divisor always fits
        let factor = 10u128.pow(scale - decimals);
        Ok(mantissa / factor)
    }
}

/// Convert base units to a human amount
///
/// Exact whenever the value fits a `Decimal`. Otherwise the lowest digits
/// are dropped until it does; fails only if the integer part itself is too
/// large.
pub fn from_base_units(amount: u128, decimals: u8) -> Result<Decimal> {
    let mut amount = amount;
    let mut scale = u32::from(decimals);

    while scale > MAX_DECIMAL_SCALE {
        amount /= 10;
        scale -= 1;
    }

    loop {
        if let Ok(mantissa) = i128::try_from(amount) {
            if let Ok(value) = Decimal::try_from_i128_with_scale(mantissa, scale) {
                return Ok(value.normalize());
            }
        }
        if scale == 0 {
            return Err(PrecisionError::overflow(format!(
                "{amount} base units do not fit a decimal"
            )));
        }
        amount /= 10;
        scale -= 1;
    }
}

/// Round a human amount toward zero for display
pub fn round_display(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero)
}
