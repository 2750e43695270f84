use serde_json::json;

use crate::listings::domain::{
    BonusItem, DiscountItem, TradeInAcceptance, TradeInBalance, WarrantyKind,
};
use crate::listings::payload::{ConditionsPayload, PayloadError};

#[test]
fn current_schema_is_detected_by_markers() {
    let payload = ConditionsPayload::from_value(json!({
        "discounts": [{ "kind": "percentage", "value": 5 }]
    }))
    .expect("current payload parses");

    assert_eq!(payload.schema(), "current");
    assert_eq!(
        payload.into_conditions().discounts,
        vec![DiscountItem::percentage(5.0)]
    );
}

#[test]
fn malformed_discount_items_are_dropped_individually() {
    let conditions = ConditionsPayload::from_value(json!({
        "schemaVersion": 2,
        "discounts": [
            { "kind": "percentage", "value": "12" },
            { "kind": "bogo", "value": 50 },
            { "kind": "fixed_amount", "value": "a lot" },
            { "kind": "fixed_amount", "value": -300 },
            { "value": 10 },
            { "type": "fixed", "value": 250000 }
        ],
        "bonuses": [{ "value": 100000 }, { "amount": "50000" }, { "value": null }]
    }))
    .expect("payload parses")
    .into_conditions();

    assert_eq!(
        conditions.discounts,
        vec![
            DiscountItem::percentage(12.0),
            DiscountItem::fixed_amount(250_000.0)
        ]
    );
    assert_eq!(
        conditions.bonuses,
        vec![BonusItem { value: 100_000.0 }, BonusItem { value: 50_000.0 }]
    );
}

#[test]
fn null_lists_are_treated_as_empty() {
    let conditions = ConditionsPayload::from_value(json!({
        "schemaVersion": 2,
        "discounts": null,
        "financing": null
    }))
    .expect("payload parses")
    .into_conditions();

    assert!(conditions.discounts.is_empty());
    assert!(conditions.financing.is_empty());
}

#[test]
fn unknown_trade_in_vocabulary_is_left_unset() {
    let conditions = ConditionsPayload::from_value(json!({
        "schemaVersion": 2,
        "tradeIn": { "accepts": "boats_only", "balance": "seller_pays" }
    }))
    .expect("payload parses")
    .into_conditions();

    let trade_in = conditions.trade_in.expect("trade-in present");
    assert_eq!(trade_in.accepts, None);
    assert_eq!(trade_in.balance, Some(TradeInBalance::SellerPaysDifference));
}

#[test]
fn legacy_flat_fields_map_to_canonical_shape() {
    let payload = ConditionsPayload::from_value(json!({
        "discountPercent": 8,
        "discountAmount": "150000",
        "bonusAmount": 200000,
        "financingBank": "Banco Sur",
        "financingRate": 0.99,
        "financingTermMonths": 48,
        "tradeInAccepts": "subject_to_appraisal",
        "warrantyKind": "extended",
        "warrantyMonths": 12,
        "conditions": "Price valid this month"
    }))
    .expect("legacy payload parses");

    assert_eq!(payload.schema(), "legacy");
    let conditions = payload.into_conditions();

    assert_eq!(
        conditions.discounts,
        vec![
            DiscountItem::percentage(8.0),
            DiscountItem::fixed_amount(150_000.0)
        ]
    );
    assert_eq!(conditions.bonuses, vec![BonusItem { value: 200_000.0 }]);
    assert_eq!(conditions.financing.len(), 1);
    assert_eq!(conditions.financing[0].bank.as_deref(), Some("Banco Sur"));
    assert_eq!(conditions.financing[0].term_months, Some(48));
    assert_eq!(
        conditions.trade_in.and_then(|policy| policy.accepts),
        Some(TradeInAcceptance::SubjectToAppraisal)
    );
    let warranty = conditions.warranty.expect("warranty mapped");
    assert_eq!(warranty.kind, WarrantyKind::Extended);
    assert_eq!(warranty.duration_months, Some(12));
    assert_eq!(
        conditions.additional_conditions.as_deref(),
        Some("Price valid this month")
    );
}

#[test]
fn empty_legacy_object_yields_no_conditions() {
    let conditions = ConditionsPayload::from_value(json!({}))
        .expect("empty object accepted")
        .into_conditions();

    assert!(conditions.discounts.is_empty());
    assert!(conditions.financing.is_empty());
    assert!(conditions.trade_in.is_none());
    assert!(conditions.warranty.is_none());
}

#[test]
fn mistyped_discount_entries_do_not_blank_the_set() {
    let conditions = ConditionsPayload::from_value(json!({
        "discounts": [
            { "kind": "percentage", "value": 10 },
            { "kind": 7, "value": 5 },
            "junk",
            null,
            [1, 2],
            { "type": "fixed_amount", "value": 100000 }
        ]
    }))
    .expect("payload parses")
    .into_conditions();

    assert_eq!(
        conditions.discounts,
        vec![
            DiscountItem::percentage(10.0),
            DiscountItem::fixed_amount(100_000.0)
        ]
    );
}

#[test]
fn mistyped_bonus_entries_are_skipped() {
    let conditions = ConditionsPayload::from_value(json!({
        "bonuses": [null, 250000, { "value": 300000 }, { "value": [1] }]
    }))
    .expect("payload parses")
    .into_conditions();

    assert_eq!(conditions.bonuses, vec![BonusItem { value: 300_000.0 }]);
}

#[test]
fn non_list_fields_are_ignored_rather_than_rejected() {
    let conditions = ConditionsPayload::from_value(json!({
        "schemaVersion": "2",
        "discounts": "ten percent",
        "bonuses": { "value": 5 },
        "financing": 3
    }))
    .expect("payload parses")
    .into_conditions();

    assert!(conditions.discounts.is_empty());
    assert!(conditions.bonuses.is_empty());
    assert!(conditions.financing.is_empty());
}

#[test]
fn financing_numbers_are_read_leniently() {
    let conditions = ConditionsPayload::from_value(json!({
        "schemaVersion": 2,
        "financing": [
            { "bank": "Banco Andes", "ratePercent": "1.2", "termMonths": 36.5 },
            { "bank": 42, "termMonths": "sixty" },
            "not an option",
            { "downPaymentPercent": 20 }
        ]
    }))
    .expect("payload parses")
    .into_conditions();

    assert_eq!(conditions.financing.len(), 2);
    assert_eq!(conditions.financing[0].bank.as_deref(), Some("Banco Andes"));
    assert_eq!(conditions.financing[0].rate_percent, Some(1.2));
    assert_eq!(conditions.financing[0].term_months, Some(37));
    assert_eq!(conditions.financing[1].down_payment_percent, Some(20.0));
}

#[test]
fn unknown_warranty_kind_defaults_to_seller() {
    let conditions = ConditionsPayload::from_value(json!({
        "schemaVersion": 2,
        "warranty": { "kind": "manufacturer", "durationMonths": "24", "provider": "Toyota" }
    }))
    .expect("payload parses")
    .into_conditions();

    let warranty = conditions.warranty.expect("warranty kept");
    assert_eq!(warranty.kind, WarrantyKind::Seller);
    assert_eq!(warranty.duration_months, Some(24));
    assert_eq!(warranty.provider.as_deref(), Some("Toyota"));
}

#[test]
fn mistyped_text_fields_are_dropped() {
    let conditions = ConditionsPayload::from_value(json!({
        "schemaVersion": 2,
        "tradeIn": "yes",
        "warranty": true,
        "additionalConditions": 12,
        "notes": "Papers in order"
    }))
    .expect("payload parses")
    .into_conditions();

    assert!(conditions.trade_in.is_none());
    assert!(conditions.warranty.is_none());
    assert!(conditions.additional_conditions.is_none());
    assert_eq!(conditions.notes.as_deref(), Some("Papers in order"));
}

#[test]
fn legacy_fields_with_wrong_types_are_skipped() {
    let conditions = ConditionsPayload::from_value(json!({
        "discountPercent": 10,
        "financingBank": 99,
        "financingTermMonths": 24,
        "tradeInAccepts": false,
        "notes": ["a", "b"]
    }))
    .expect("legacy payload parses")
    .into_conditions();

    assert_eq!(conditions.discounts, vec![DiscountItem::percentage(10.0)]);
    assert_eq!(conditions.financing.len(), 1);
    assert_eq!(conditions.financing[0].bank, None);
    assert_eq!(conditions.financing[0].term_months, Some(24));
    assert!(conditions.trade_in.is_none());
    assert!(conditions.notes.is_none());
}

#[test]
fn scalar_payload_is_rejected() {
    let err = ConditionsPayload::from_value(json!("10% off")).expect_err("string rejected");

    assert!(matches!(err, PayloadError::NotAnObject { found: "string" }));
}
