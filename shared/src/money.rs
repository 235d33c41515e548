//! Money helpers using rust_decimal for precision
//!
//! Amounts are stored and serialized as `f64` rounded to two decimals.
//! Arithmetic goes through `Decimal` so that sums and rounding do not pick up
//! binary floating point noise.

use rust_decimal::prelude::*;

/// Monetary values carry two decimal places
const DECIMAL_PLACES: u32 = 2;

/// Convert an `f64` amount to `Decimal`.
///
/// Non-finite input maps to zero. Callers validate finiteness at the boundary.
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Round a `Decimal` to two places (half away from zero) and convert back.
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a price to two decimals, half away from zero.
///
/// ```
/// use shared::money::round_price;
///
/// assert_eq!(round_price(5.005), 5.01);
/// assert_eq!(round_price(5.004), 5.0);
/// assert_eq!(round_price(-5.005), -5.01);
/// ```
pub fn round_price(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Sum amounts in decimal space and round the total.
pub fn sum_amounts<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    to_f64(amounts.into_iter().map(to_decimal).sum())
}
