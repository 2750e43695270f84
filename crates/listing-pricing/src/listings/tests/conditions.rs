use super::common::*;
use crate::listings::conditions::{summarize, ASK_THE_SELLER};
use crate::listings::domain::{
    CommercialConditions, FinancingOption, TradeInAcceptance, TradeInBalance, TradeInPolicy,
    WarrantyKind, WarrantyOffer,
};

#[test]
fn sections_follow_listing_flags() {
    let listing = sale_listing(8_000_000.0);
    let conditions = CommercialConditions {
        financing: vec![FinancingOption {
            bank: Some("Banco Andes".to_string()),
            ..FinancingOption::default()
        }],
        trade_in: Some(TradeInPolicy {
            accepts: Some(TradeInAcceptance::AnyVehicle),
            balance: None,
        }),
        ..CommercialConditions::default()
    };

    let summary = summarize(&listing, &conditions);

    assert!(summary.financing.is_none());
    assert!(summary.trade_in.is_none());
    assert!(summary.is_empty());
}

#[test]
fn enabled_sections_without_data_ask_the_seller() {
    let mut listing = sale_listing(8_000_000.0);
    listing.allow_financing = true;
    listing.allow_exchange = true;

    let summary = summarize(&listing, &CommercialConditions::default());

    let financing = summary.financing.expect("financing enabled");
    assert!(financing.options.is_empty());
    assert_eq!(financing.fallback, Some(ASK_THE_SELLER));
    let trade_in = summary.trade_in.expect("exchange enabled");
    assert_eq!(trade_in.narrative, ASK_THE_SELLER);
}

#[test]
fn financing_options_get_headlines() {
    let mut listing = sale_listing(8_000_000.0);
    listing.allow_financing = true;
    let conditions = CommercialConditions {
        financing: vec![
            FinancingOption {
                bank: Some("Banco Andes".to_string()),
                rate_percent: Some(1.2),
                term_months: Some(36),
                down_payment_percent: Some(20.0),
            },
            FinancingOption {
                bank: Some("   ".to_string()),
                ..FinancingOption::default()
            },
        ],
        ..CommercialConditions::default()
    };

    let summary = summarize(&listing, &conditions);
    let financing = summary.financing.expect("financing enabled");

    assert_eq!(financing.fallback, None);
    assert_eq!(
        financing.options[0].headline,
        "Banco Andes · 1.2% rate · 36 months · 20% down payment"
    );
    assert_eq!(financing.options[1].bank, None);
    assert_eq!(financing.options[1].headline, ASK_THE_SELLER);
}

#[test]
fn trade_in_narrative_uses_vocabulary_labels() {
    let mut listing = sale_listing(8_000_000.0);
    listing.allow_exchange = true;
    let conditions = CommercialConditions {
        trade_in: Some(TradeInPolicy {
            accepts: Some(TradeInAcceptance::SameBrand),
            balance: Some(TradeInBalance::Negotiable),
        }),
        ..CommercialConditions::default()
    };

    let summary = summarize(&listing, &conditions);

    assert_eq!(
        summary.trade_in.expect("exchange enabled").narrative,
        "Accepts vehicles of the same brand as part of the payment; the difference is negotiable."
    );
}

#[test]
fn warranty_and_free_text_are_projected() {
    let listing = sale_listing(8_000_000.0);
    let conditions = CommercialConditions {
        warranty: Some(WarrantyOffer {
            kind: WarrantyKind::Extended,
            duration_months: Some(24),
            provider: Some("AutoCare".to_string()),
            details: Some("".to_string()),
        }),
        additional_conditions: Some("Transfer costs included".to_string()),
        notes: Some("   ".to_string()),
        ..CommercialConditions::default()
    };

    let summary = summarize(&listing, &conditions);
    let warranty = summary.warranty.expect("warranty offered");

    assert_eq!(warranty.kind_label, "Extended warranty");
    assert_eq!(warranty.headline, "Extended warranty for 24 months by AutoCare");
    assert_eq!(warranty.details, None);
    assert_eq!(
        summary.additional_conditions.as_deref(),
        Some("Transfer costs included")
    );
    assert_eq!(summary.notes, None);
}
