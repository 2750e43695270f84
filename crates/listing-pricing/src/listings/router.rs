use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};

use crate::error::AppError;

use super::currency::{CurrencyConverter, PriceFormatter};
use super::service::{ListingQuoteService, QuoteRequest, QuoteServiceError};

/// Router builder exposing the quote endpoints used by detail pages and cards.
pub fn quote_router<C, F>(service: Arc<ListingQuoteService<C, F>>) -> Router
where
    C: CurrencyConverter + 'static,
    F: PriceFormatter + 'static,
{
    Router::new()
        .route("/api/v1/listings/quote", post(quote_handler::<C, F>))
        .route("/api/v1/listings/quotes", post(batch_quote_handler::<C, F>))
        .with_state(service)
}

pub(crate) async fn quote_handler<C, F>(
    State(service): State<Arc<ListingQuoteService<C, F>>>,
    axum::Json(request): axum::Json<QuoteRequest>,
) -> Response
where
    C: CurrencyConverter + 'static,
    F: PriceFormatter + 'static,
{
    match service.quote(request) {
        Ok(quote) => (StatusCode::OK, axum::Json(quote)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn batch_quote_handler<C, F>(
    State(service): State<Arc<ListingQuoteService<C, F>>>,
    axum::Json(requests): axum::Json<Vec<QuoteRequest>>,
) -> Response
where
    C: CurrencyConverter + 'static,
    F: PriceFormatter + 'static,
{
    match service.quote_many(requests) {
        Ok(quotes) => (StatusCode::OK, axum::Json(quotes)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: QuoteServiceError) -> Response {
    AppError::from(error).into_response()
}
