use rust_decimal::Decimal;

use super::aggregation::DiscountTotals;
use super::decimal::{from_decimal, round_whole, to_decimal};

/// Outcome of applying discount totals to a basis amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposedPrice {
    pub final_amount: Option<f64>,
    pub savings_amount: Option<f64>,
}

/// Apply the percentage first, then the fixed amount.
///
/// Only the percentage step is rounded (half-up). The final amount is floored
/// at zero; savings are always `basis - final` and may be non-positive.
pub fn compose(basis_amount: Option<f64>, totals: &DiscountTotals) -> ComposedPrice {
    let Some(basis) = basis_amount else {
        return ComposedPrice {
            final_amount: None,
            savings_amount: None,
        };
    };

    let final_amount = match (to_decimal(basis), to_decimal(totals.percent)) {
        (Some(basis), Some(percent)) => {
            let remaining = (Decimal::ONE_HUNDRED - percent) / Decimal::ONE_HUNDRED;
            let after_percent = round_whole(basis * remaining);
            let after_fixed = to_decimal(totals.fixed)
                .and_then(|fixed| after_percent.checked_sub(fixed))
                .unwrap_or(Decimal::ZERO);
            from_decimal(after_fixed.max(Decimal::ZERO))
        }
        // Outside the decimal range no discount is applied.
        _ => basis.max(0.0),
    };

    ComposedPrice {
        final_amount: Some(final_amount),
        savings_amount: Some(basis - final_amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(percent: f64, fixed: f64) -> DiscountTotals {
        DiscountTotals { percent, fixed }
    }

    #[test]
    fn missing_basis_propagates() {
        let composed = compose(None, &totals(10.0, 0.0));

        assert_eq!(composed.final_amount, None);
        assert_eq!(composed.savings_amount, None);
    }

    #[test]
    fn percentage_applies_before_fixed() {
        let composed = compose(Some(10_000_000.0), &totals(10.0, 500_000.0));

        assert_eq!(composed.final_amount, Some(8_500_000.0));
        assert_eq!(composed.savings_amount, Some(1_500_000.0));
    }

    #[test]
    fn percentage_step_rounds_half_up() {
        // 999 * 0.85 = 849.15 -> 849; 1_001 * 0.5 = 500.5 -> 501
        assert_eq!(compose(Some(999.0), &totals(15.0, 0.0)).final_amount, Some(849.0));
        assert_eq!(compose(Some(1_001.0), &totals(50.0, 0.0)).final_amount, Some(501.0));
    }

    #[test]
    fn exact_halves_round_up_despite_binary_floats() {
        // 250 * 0.93 is 232.5 exactly, which f64 holds as 232.4999...
        let composed = compose(Some(250.0), &totals(7.0, 0.0));

        assert_eq!(composed.final_amount, Some(233.0));
        assert_eq!(composed.savings_amount, Some(17.0));
    }

    #[test]
    fn fixed_subtraction_is_exact_and_floored() {
        let composed = compose(Some(400_000.0), &totals(0.0, 650_000.0));

        assert_eq!(composed.final_amount, Some(0.0));
        assert_eq!(composed.savings_amount, Some(400_000.0));
    }

    #[test]
    fn no_discount_leaves_basis_untouched() {
        let composed = compose(Some(150_000.0), &DiscountTotals::default());

        assert_eq!(composed.final_amount, Some(150_000.0));
        assert_eq!(composed.savings_amount, Some(0.0));
    }
}
