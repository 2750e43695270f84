//! Conversions between the `f64` amounts carried by listings and the
//! `Decimal` values the arithmetic runs on.

use rust_decimal::prelude::*;

/// `None` for non-finite values and magnitudes outside the `Decimal` range.
pub(crate) fn to_decimal(value: f64) -> Option<Decimal> {
    if value.is_finite() {
        Decimal::from_f64(value)
    } else {
        None
    }
}

pub(crate) fn from_decimal(value: Decimal) -> f64 {
    value.normalize().to_f64().unwrap_or_default()
}

/// Round to a whole amount, halves away from zero.
pub(crate) fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
