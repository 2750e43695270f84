use super::super::domain::{Listing, ListingType, RentPeriod, UnitLabel};

/// Nominal amount a listing is priced from, before any commercial condition applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBasis {
    pub amount: Option<f64>,
    pub unit_label: UnitLabel,
}

impl PriceBasis {
    fn resolved(amount: f64, unit_label: UnitLabel) -> Self {
        Self {
            amount: Some(amount),
            unit_label,
        }
    }

    fn unavailable(unit_label: UnitLabel) -> Self {
        Self {
            amount: None,
            unit_label,
        }
    }
}

/// Pick the basis amount and unit label for a listing.
///
/// Precedence:
///
/// | listing type | basis                                                          | unit        |
/// |--------------|----------------------------------------------------------------|-------------|
/// | sale         | `price`                                                        | `""`        |
/// | auction      | `auction_start_price`, else `price`                            | base price  |
/// | rent         | advertised period amount                                       | that period |
/// |              | else first amount in daily → weekly → monthly order            | that period |
/// |              | else flat `price` (legacy records)                             | monthly     |
///
/// Non-finite amounts count as missing. A missing basis is not an error: it
/// propagates as `None` and surfaces as "price unavailable".
pub fn resolve_basis(listing: &Listing) -> PriceBasis {
    match listing.listing_type {
        ListingType::Sale => match finite(listing.price) {
            Some(price) => PriceBasis::resolved(price, UnitLabel::Unspecified),
            None => PriceBasis::unavailable(UnitLabel::Unspecified),
        },
        ListingType::Auction => {
            match finite(listing.auction_start_price).or_else(|| finite(listing.price)) {
                Some(amount) => PriceBasis::resolved(amount, UnitLabel::BasePrice),
                None => PriceBasis::unavailable(UnitLabel::BasePrice),
            }
        }
        ListingType::Rent => rent_basis(listing),
    }
}

fn rent_basis(listing: &Listing) -> PriceBasis {
    let rent = &listing.rent;

    if let Some(period) = rent.period {
        if let Some(amount) = finite(rent.amount_for(period)) {
            return PriceBasis::resolved(amount, period.unit_label());
        }
    }

    for period in RentPeriod::waterfall() {
        if let Some(amount) = finite(rent.amount_for(period)) {
            return PriceBasis::resolved(amount, period.unit_label());
        }
    }

    match finite(listing.price) {
        Some(price) => PriceBasis::resolved(price, UnitLabel::Monthly),
        None => PriceBasis::unavailable(UnitLabel::Unspecified),
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|amount| amount.is_finite())
}
