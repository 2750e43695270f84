use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::conditions::{summarize, CommercialConditionsSummary};
use super::currency::{
    present, ConversionError, CurrencyCode, CurrencyConverter, PriceDisplay, PriceFormatter,
};
use super::domain::{Listing, ListingId, PriceResolution};
use super::payload::{ConditionsPayload, PayloadError};
use super::pricing::{DiscountTotals, PricingEngine};

/// Listing snapshot plus its raw commercial-conditions payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub listing: Listing,
    #[serde(default)]
    pub conditions: Value,
    /// Display currency; the converter's native currency when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<CurrencyCode>,
}

/// Everything a rendering surface needs to show a listing's price block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuote {
    pub listing_id: ListingId,
    pub schema: &'static str,
    pub resolution: PriceResolution,
    pub discounts: DiscountTotals,
    pub bonus_total: f64,
    pub display: PriceDisplay,
    pub conditions: CommercialConditionsSummary,
}

/// Service composing payload normalization, the pricing engine and the
/// currency collaborators.
pub struct ListingQuoteService<C, F> {
    engine: PricingEngine,
    converter: Arc<C>,
    formatter: Arc<F>,
}

impl<C, F> ListingQuoteService<C, F>
where
    C: CurrencyConverter + 'static,
    F: PriceFormatter + 'static,
{
    pub fn new(converter: Arc<C>, formatter: Arc<F>) -> Self {
        let engine = PricingEngine::new(formatter.clone(), converter.native().clone());
        Self {
            engine,
            converter,
            formatter,
        }
    }

    /// Price a single listing for display.
    pub fn quote(&self, request: QuoteRequest) -> Result<ListingQuote, QuoteServiceError> {
        let QuoteRequest {
            listing,
            conditions,
            currency,
        } = request;

        let payload = ConditionsPayload::from_value(conditions)?;
        let schema = payload.schema();
        let conditions = payload.into_conditions();

        let quote = self.engine.resolve(&listing, &conditions);
        let target = currency.unwrap_or_else(|| self.converter.native().clone());
        let display = present(
            &quote,
            self.converter.as_ref(),
            self.formatter.as_ref(),
            &target,
        )?;
        let summary = summarize(&listing, &conditions);

        debug!(
            listing_id = %listing.id.0,
            listing_type = listing.listing_type.label(),
            schema,
            discounts = conditions.discounts.len(),
            bonuses = conditions.bonuses.len(),
            available = quote.resolution.is_available(),
            currency = %target,
            "listing quoted"
        );

        Ok(ListingQuote {
            listing_id: listing.id,
            schema,
            resolution: quote.resolution,
            discounts: quote.discounts,
            bonus_total: quote.bonus_total,
            display,
            conditions: summary,
        })
    }

    /// Price a batch of listings (list and card surfaces). Fails on the first
    /// invalid request.
    pub fn quote_many(
        &self,
        requests: Vec<QuoteRequest>,
    ) -> Result<Vec<ListingQuote>, QuoteServiceError> {
        requests
            .into_iter()
            .map(|request| self.quote(request))
            .collect()
    }
}

/// Error raised by the quote service.
#[derive(Debug, thiserror::Error)]
pub enum QuoteServiceError {
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}
