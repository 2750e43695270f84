//! Listing price resolution and commercial-conditions projection.

pub mod conditions;
pub mod currency;
pub mod domain;
pub mod payload;
pub mod pricing;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use conditions::{summarize, CommercialConditionsSummary, ASK_THE_SELLER};
pub use currency::{
    present, ConversionError, CurrencyCode, CurrencyConverter, GroupedFormatter, PriceDisplay,
    PriceFormatter, StaticRateConverter,
};
pub use domain::{
    BonusItem, CommercialConditions, DiscountItem, DiscountKind, FinancingOption, Listing,
    ListingId, ListingType, PriceResolution, RentPeriod, RentTerms, TradeInAcceptance,
    TradeInBalance, TradeInPolicy, UnitLabel, WarrantyKind, WarrantyOffer,
};
pub use payload::{ConditionsPayload, PayloadError};
pub use pricing::{resolve_price, DiscountTotals, PriceQuote, PricingEngine};
pub use router::quote_router;
pub use service::{ListingQuote, ListingQuoteService, QuoteRequest, QuoteServiceError};
