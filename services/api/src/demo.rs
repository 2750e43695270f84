use crate::infra::{build_quote_service, load_quote_request, QuoteService};
use clap::Args;
use listing_pricing::config::AppConfig;
use listing_pricing::error::AppError;
use listing_pricing::listings::{CurrencyCode, ListingQuote, QuoteRequest};
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// JSON file holding `{ "listing": ..., "conditions": ... }`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Display currency (defaults to the native currency)
    #[arg(long)]
    pub(crate) currency: Option<String>,
    /// Print the full quote as JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Display currency for every scenario (defaults to the native currency)
    #[arg(long)]
    pub(crate) currency: Option<String>,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let QuoteArgs {
        input,
        currency,
        json,
    } = args;

    let config = AppConfig::load()?;
    let service = build_quote_service(&config.pricing);

    let mut request = load_quote_request(&input)?;
    if let Some(code) = currency {
        request.currency = Some(CurrencyCode::new(code));
    }

    let quote = service.quote(request)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        render_quote(&quote);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_quote_service(&config.pricing);
    let currency = args.currency.map(CurrencyCode::new);

    println!("Listing pricing demo");
    for (title, mut request) in demo_scenarios()? {
        request.currency = currency.clone();
        println!("\n{title}");
        match quote_scenario(&service, request) {
            Ok(quote) => render_quote(&quote),
            Err(err) => println!("  Quote unavailable: {}", err),
        }
    }

    Ok(())
}

fn quote_scenario(service: &QuoteService, request: QuoteRequest) -> Result<ListingQuote, AppError> {
    Ok(service.quote(request)?)
}

fn demo_scenarios() -> Result<Vec<(&'static str, QuoteRequest)>, AppError> {
    let scenarios = [
        (
            "Sale with a 10% discount",
            json!({
                "listing": { "id": "demo-sale", "type": "sale", "price": 10000000.0 },
                "conditions": { "discounts": [{ "type": "percentage", "value": 10 }] }
            }),
        ),
        (
            "Sale with stacked percentage and fixed discounts",
            json!({
                "listing": { "id": "demo-stacked", "type": "sale", "price": 10000000.0 },
                "conditions": {
                    "discounts": [
                        { "type": "percentage", "value": 10 },
                        { "type": "fixed_amount", "value": 500000 }
                    ]
                }
            }),
        ),
        (
            "Sale with an out-of-range percentage",
            json!({
                "listing": { "id": "demo-clamped", "type": "sale", "price": 1000000.0 },
                "conditions": { "discounts": [{ "type": "percentage", "value": 150 }] }
            }),
        ),
        (
            "Rent listing without a daily amount",
            json!({
                "listing": {
                    "id": "demo-rent",
                    "type": "rent",
                    "rent": { "weekly": 50000.0, "monthly": 150000.0 },
                    "allowExchange": true
                },
                "conditions": null
            }),
        ),
        (
            "Auction without a starting price (legacy payload)",
            json!({
                "listing": { "id": "demo-auction", "type": "auction", "price": 5000000.0 },
                "conditions": {
                    "bonusAmount": 250000,
                    "warrantyMonths": 6,
                    "warrantyProvider": "Dealer"
                }
            }),
        ),
        (
            "Sale with financing enabled and no conditions",
            json!({
                "listing": {
                    "id": "demo-plain",
                    "type": "sale",
                    "price": 7490000.0,
                    "allowFinancing": true
                }
            }),
        ),
    ];

    scenarios
        .into_iter()
        .map(|(title, value)| Ok((title, serde_json::from_value(value)?)))
        .collect()
}

fn render_quote(quote: &ListingQuote) {
    let display = &quote.display;
    println!(
        "- Listing {} ({} conditions)",
        quote.listing_id.0, quote.schema
    );

    let unit = display.unit_label.as_str();
    match &display.final_label {
        Some(label) if unit.is_empty() => println!("  Price: {}", label),
        Some(label) => println!("  Price: {} ({})", label, unit),
        None => println!("  Price unavailable"),
    }
    if let Some(strikethrough) = &display.strikethrough_label {
        println!("  Was: {}", strikethrough);
    }
    if let Some(savings) = &display.savings_label {
        println!("  You save: {}", savings);
    }
    if let Some(badge) = &display.badge_text {
        println!("  Badge: {}", badge);
    }
    if let Some(bonus) = &display.bonus_label {
        println!("  Bonus: {}", bonus);
    }

    let conditions = &quote.conditions;
    if let Some(financing) = &conditions.financing {
        match financing.fallback {
            Some(fallback) => println!("  Financing: {}", fallback),
            None => {
                for option in &financing.options {
                    println!("  Financing: {}", option.headline);
                }
            }
        }
    }
    if let Some(trade_in) = &conditions.trade_in {
        println!("  Trade-in: {}", trade_in.narrative);
    }
    if let Some(warranty) = &conditions.warranty {
        println!("  Warranty: {}", warranty.headline);
    }
    if let Some(additional) = &conditions.additional_conditions {
        println!("  Conditions: {}", additional);
    }
    if let Some(notes) = &conditions.notes {
        println!("  Notes: {}", notes);
    }
}
