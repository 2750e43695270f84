use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::listings::currency::{
    ConversionError, CurrencyCode, CurrencyConverter, GroupedFormatter, StaticRateConverter,
};
use crate::listings::domain::{
    CommercialConditions, DiscountItem, Listing, ListingType, RentPeriod, RentTerms,
};
use crate::listings::service::{ListingQuoteService, QuoteRequest};
use crate::listings::{quote_router, PricingEngine};

pub(super) fn sale_listing(price: f64) -> Listing {
    let mut listing = Listing::new("veh-1001", ListingType::Sale);
    listing.price = Some(price);
    listing
}

pub(super) fn auction_listing(start: Option<f64>, price: Option<f64>) -> Listing {
    let mut listing = Listing::new("auc-2002", ListingType::Auction);
    listing.auction_start_price = start;
    listing.price = price;
    listing
}

pub(super) fn rent_listing(
    daily: Option<f64>,
    weekly: Option<f64>,
    monthly: Option<f64>,
    period: Option<RentPeriod>,
) -> Listing {
    let mut listing = Listing::new("prop-3003", ListingType::Rent);
    listing.rent = RentTerms {
        daily,
        weekly,
        monthly,
        period,
    };
    listing
}

pub(super) fn discounts(items: Vec<DiscountItem>) -> CommercialConditions {
    CommercialConditions {
        discounts: items,
        ..CommercialConditions::default()
    }
}

pub(super) fn engine() -> PricingEngine {
    PricingEngine::default()
}

pub(super) fn converter() -> StaticRateConverter {
    StaticRateConverter::default().with_rate(CurrencyCode::new("USD"), 0.001)
}

pub(super) fn build_service() -> ListingQuoteService<StaticRateConverter, GroupedFormatter> {
    ListingQuoteService::new(Arc::new(converter()), Arc::new(GroupedFormatter))
}

pub(super) fn quote_request(listing: Listing, conditions: Value) -> QuoteRequest {
    QuoteRequest {
        listing,
        conditions,
        currency: None,
    }
}

pub(super) fn current_conditions() -> Value {
    json!({
        "schemaVersion": 2,
        "discounts": [
            { "kind": "percentage", "value": 10 },
            { "kind": "fixed_amount", "value": 500000 }
        ],
        "bonuses": [{ "value": 300000 }],
        "financing": [{ "bank": "Banco Andes", "ratePercent": 1.2, "termMonths": 36 }],
        "tradeIn": { "accepts": "any_vehicle", "balance": "buyer_pays_difference" },
        "notes": "  Includes first service.  "
    })
}

pub(super) fn quote_router_with_service(
    service: ListingQuoteService<StaticRateConverter, GroupedFormatter>,
) -> axum::Router {
    quote_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Converter that knows no currency besides its own, used to exercise error paths.
pub(super) struct NativeOnlyConverter {
    native: CurrencyCode,
}

impl Default for NativeOnlyConverter {
    fn default() -> Self {
        Self {
            native: CurrencyCode::native_default(),
        }
    }
}

impl CurrencyConverter for NativeOnlyConverter {
    fn native(&self) -> &CurrencyCode {
        &self.native
    }

    fn convert(&self, amount: f64, target: &CurrencyCode) -> Result<f64, ConversionError> {
        if *target == self.native {
            Ok(amount)
        } else {
            Err(ConversionError::UnsupportedCurrency {
                native: self.native.clone(),
                target: target.clone(),
            })
        }
    }
}
