use rust_decimal::RoundingStrategy;

use super::super::currency::{CurrencyCode, PriceFormatter};
use super::aggregation::DiscountTotals;
use super::decimal::to_decimal;

/// Decimal places kept in a percentage badge.
const PERCENT_BADGE_PLACES: u32 = 2;

/// Shown when savings exist but neither discount component is positive on its own.
pub const GENERIC_OFFER_BADGE: &str = "Offer";

/// Decide the promotional badge for a composed price.
///
/// The percentage is the headline figure whenever it is positive, even if a
/// fixed discount also applies. No badge is produced without positive savings.
pub fn badge_text(
    totals: &DiscountTotals,
    savings_amount: Option<f64>,
    formatter: &dyn PriceFormatter,
    currency: &CurrencyCode,
) -> Option<String> {
    let savings = savings_amount?;
    if savings <= 0.0 {
        return None;
    }

    if totals.percent > 0.0 {
        Some(format!("-{}%", percent_label(totals.percent)))
    } else if totals.fixed > 0.0 {
        Some(format!("-{}", formatter.format(totals.fixed, currency)))
    } else {
        Some(GENERIC_OFFER_BADGE.to_string())
    }
}

fn percent_label(percent: f64) -> String {
    match to_decimal(percent) {
        Some(percent) => percent
            .round_dp_with_strategy(PERCENT_BADGE_PLACES, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string(),
        None => percent.to_string(),
    }
}
