use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::super::domain::{BonusItem, DiscountItem, DiscountKind};
use super::decimal::{from_decimal, to_decimal};

const MAX_PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Discount set reduced to one clamped percentage and one fixed amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountTotals {
    pub percent: f64,
    pub fixed: f64,
}

impl DiscountTotals {
    pub fn is_empty(&self) -> bool {
        self.percent <= 0.0 && self.fixed <= 0.0
    }
}

/// Sum discounts per kind. Order does not matter.
///
/// A non-finite or negative value contributes nothing, so one corrupt entry
/// never invalidates the rest of the set. The percentage sum is clamped to
/// `[0, 100]`.
pub fn aggregate_discounts(items: &[DiscountItem]) -> DiscountTotals {
    let (raw_percent, fixed) = items.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(percent, fixed), item| {
            let value = sanitize_discount(item.value);
            match item.kind {
                DiscountKind::Percentage => (percent + value, fixed),
                DiscountKind::FixedAmount => (percent, fixed + value),
            }
        },
    );

    DiscountTotals {
        percent: from_decimal(raw_percent.clamp(Decimal::ZERO, MAX_PERCENT)),
        fixed: from_decimal(fixed),
    }
}

/// Sum bonus amounts. Non-finite values count as zero; no clamping applies.
pub fn aggregate_bonuses(items: &[BonusItem]) -> f64 {
    let total = items
        .iter()
        .filter_map(|item| to_decimal(item.value))
        .sum::<Decimal>();
    from_decimal(total)
}

fn sanitize_discount(value: f64) -> Decimal {
    to_decimal(value)
        .filter(|value| value.is_sign_positive() && !value.is_zero())
        .unwrap_or(Decimal::ZERO)
}
