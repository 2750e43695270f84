//! Commercial pricing resolution.
//!
//! Every surface that shows a listing price (detail page, admin cards, list
//! cards) goes through [`PricingEngine::resolve`] so the percentage/fixed
//! composition and the rent period waterfall are applied identically:
//!
//! `resolve_basis` → (`aggregate_discounts`, `aggregate_bonuses`) → `compose` → `badge_text`

mod aggregation;
mod badge;
mod basis;
mod composer;
mod decimal;

pub use aggregation::{aggregate_bonuses, aggregate_discounts, DiscountTotals};
pub use badge::{badge_text, GENERIC_OFFER_BADGE};
pub use basis::{resolve_basis, PriceBasis};
pub use composer::{compose, ComposedPrice};

use std::sync::Arc;

use serde::Serialize;

use super::currency::{CurrencyCode, GroupedFormatter, PriceFormatter};
use super::domain::{CommercialConditions, Listing, PriceResolution};

/// Resolution plus the aggregated figures it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub resolution: PriceResolution,
    pub discounts: DiscountTotals,
    pub bonus_total: f64,
}

/// Stateless engine; safe to share across threads and call concurrently.
#[derive(Clone)]
pub struct PricingEngine {
    formatter: Arc<dyn PriceFormatter>,
    native_currency: CurrencyCode,
}

impl PricingEngine {
    pub fn new(formatter: Arc<dyn PriceFormatter>, native_currency: CurrencyCode) -> Self {
        Self {
            formatter,
            native_currency,
        }
    }

    pub fn resolve(&self, listing: &Listing, conditions: &CommercialConditions) -> PriceQuote {
        let basis = resolve_basis(listing);
        let discounts = aggregate_discounts(&conditions.discounts);
        let bonus_total = aggregate_bonuses(&conditions.bonuses);
        let composed = compose(basis.amount, &discounts);
        let badge = badge_text(
            &discounts,
            composed.savings_amount,
            self.formatter.as_ref(),
            &self.native_currency,
        );

        PriceQuote {
            resolution: PriceResolution {
                basis_amount: basis.amount,
                unit_label: basis.unit_label,
                final_amount: composed.final_amount,
                savings_amount: composed.savings_amount,
                badge_text: badge,
            },
            discounts,
            bonus_total,
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(Arc::new(GroupedFormatter), CurrencyCode::native_default())
    }
}

/// Resolve a listing price with the default engine (CLP, grouped formatting).
pub fn resolve_price(listing: &Listing, conditions: &CommercialConditions) -> PriceResolution {
    PricingEngine::default()
        .resolve(listing, conditions)
        .resolution
}
