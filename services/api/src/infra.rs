use listing_pricing::config::PricingConfig;
use listing_pricing::error::AppError;
use listing_pricing::listings::{
    GroupedFormatter, ListingQuoteService, QuoteRequest, StaticRateConverter,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type QuoteService = ListingQuoteService<StaticRateConverter, GroupedFormatter>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_quote_service(config: &PricingConfig) -> QuoteService {
    ListingQuoteService::new(Arc::new(config.converter()), Arc::new(GroupedFormatter))
}

/// Read a `{ "listing": ..., "conditions": ... }` document from disk.
pub(crate) fn load_quote_request<P: AsRef<Path>>(path: P) -> Result<QuoteRequest, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let request = serde_json::from_str(&raw)?;
    Ok(request)
}
