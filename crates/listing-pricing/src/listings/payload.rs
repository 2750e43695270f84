//! Data-loading boundary for commercial conditions.
//!
//! Listings written by older back-office versions store a flat set of fields
//! (`discountPercent`, `financingBank`, ...) while current ones carry typed
//! lists. Both are resolved here, once, into [`CommercialConditions`].

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::domain::{
    BonusItem, CommercialConditions, DiscountItem, DiscountKind, FinancingOption,
    TradeInAcceptance, TradeInBalance, TradeInPolicy, WarrantyKind, WarrantyOffer,
};

/// Keys only present in the current schema.
const CURRENT_SCHEMA_MARKERS: [&str; 3] = ["schemaVersion", "discounts", "bonuses"];

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("commercial conditions must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("invalid {schema} commercial conditions: {source}")]
    Invalid {
        schema: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw commercial conditions in one of the known schema versions.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionsPayload {
    Legacy(LegacyConditionsPayload),
    Current(CurrentConditionsPayload),
}

impl ConditionsPayload {
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        match value {
            Value::Null => Ok(Self::Current(CurrentConditionsPayload::default())),
            Value::Object(ref map) => {
                if CURRENT_SCHEMA_MARKERS
                    .iter()
                    .any(|marker| map.contains_key(*marker))
                {
                    serde_json::from_value(value)
                        .map(Self::Current)
                        .map_err(|source| PayloadError::Invalid {
                            schema: "current",
                            source,
                        })
                } else {
                    serde_json::from_value(value)
                        .map(Self::Legacy)
                        .map_err(|source| PayloadError::Invalid {
                            schema: "legacy",
                            source,
                        })
                }
            }
            other => Err(PayloadError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    pub fn schema(&self) -> &'static str {
        match self {
            Self::Legacy(_) => "legacy",
            Self::Current(_) => "current",
        }
    }

    pub fn into_conditions(self) -> CommercialConditions {
        match self {
            Self::Legacy(payload) => payload.into_conditions(),
            Self::Current(payload) => payload.into_conditions(),
        }
    }
}

/// List-based schema. Every field is kept as raw JSON so that a single
/// malformed entry is dropped on its own instead of failing the payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditionsPayload {
    #[serde(default)]
    pub schema_version: Option<Value>,
    #[serde(default)]
    pub discounts: Option<Value>,
    #[serde(default)]
    pub bonuses: Option<Value>,
    #[serde(default)]
    pub financing: Option<Value>,
    #[serde(default)]
    pub trade_in: Option<Value>,
    #[serde(default)]
    pub warranty: Option<Value>,
    #[serde(default)]
    pub additional_conditions: Option<Value>,
    #[serde(default)]
    pub notes: Option<Value>,
}

impl CurrentConditionsPayload {
    pub fn into_conditions(self) -> CommercialConditions {
        let discounts = list_items("discounts", self.discounts)
            .into_iter()
            .filter_map(normalize_discount)
            .collect();

        let bonuses = list_items("bonuses", self.bonuses)
            .into_iter()
            .filter_map(normalize_bonus)
            .collect();

        let financing = list_items("financing", self.financing)
            .into_iter()
            .filter_map(normalize_financing)
            .collect();

        CommercialConditions {
            discounts,
            bonuses,
            financing,
            trade_in: self.trade_in.as_ref().and_then(normalize_trade_in),
            warranty: self.warranty.as_ref().and_then(normalize_warranty),
            additional_conditions: self.additional_conditions.as_ref().and_then(text),
            notes: self.notes.as_ref().and_then(text),
        }
    }
}

/// Elements of a list field; `null`, a missing field or a non-list yields none.
fn list_items(field: &'static str, value: Option<Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            debug!(field, found = json_kind(&other), "ignoring non-list conditions field");
            Vec::new()
        }
    }
}

fn normalize_discount(raw: Value) -> Option<DiscountItem> {
    let Value::Object(item) = &raw else {
        debug!(found = json_kind(&raw), "dropping discount item that is not an object");
        return None;
    };

    let kind_field = item.get("kind").or_else(|| item.get("type"));
    let Some(kind) = kind_field.and_then(Value::as_str).and_then(discount_kind) else {
        debug!(kind = ?kind_field, "dropping discount item with unrecognized kind");
        return None;
    };

    let value = item.get("value").unwrap_or(&Value::Null);
    match numeric_value(value).filter(|value| *value >= 0.0) {
        Some(value) => Some(DiscountItem { kind, value }),
        None => {
            debug!(?kind, %value, "dropping discount item with unusable value");
            None
        }
    }
}

fn normalize_bonus(raw: Value) -> Option<BonusItem> {
    let value = match &raw {
        Value::Object(item) => item.get("value").or_else(|| item.get("amount")),
        _ => None,
    };

    match value.and_then(numeric_value) {
        Some(value) => Some(BonusItem { value }),
        None => {
            debug!(item = %raw, "dropping bonus item without a numeric value");
            None
        }
    }
}

fn normalize_financing(raw: Value) -> Option<FinancingOption> {
    let Value::Object(item) = &raw else {
        debug!(found = json_kind(&raw), "dropping financing option that is not an object");
        return None;
    };

    let option = FinancingOption {
        bank: item.get("bank").and_then(text),
        rate_percent: item
            .get("ratePercent")
            .or_else(|| item.get("rate"))
            .and_then(numeric_value),
        term_months: item.get("termMonths").and_then(whole_months),
        down_payment_percent: item.get("downPaymentPercent").and_then(numeric_value),
    };

    if option == FinancingOption::default() {
        debug!(item = %raw, "dropping financing option without usable fields");
        return None;
    }
    Some(option)
}

fn normalize_trade_in(raw: &Value) -> Option<TradeInPolicy> {
    let Value::Object(policy) = raw else {
        debug!(found = json_kind(raw), "ignoring trade-in policy that is not an object");
        return None;
    };

    Some(TradeInPolicy {
        accepts: policy
            .get("accepts")
            .and_then(Value::as_str)
            .and_then(TradeInAcceptance::parse),
        balance: policy
            .get("balance")
            .and_then(Value::as_str)
            .and_then(TradeInBalance::parse),
    })
}

fn normalize_warranty(raw: &Value) -> Option<WarrantyOffer> {
    let Value::Object(offer) = raw else {
        debug!(found = json_kind(raw), "ignoring warranty that is not an object");
        return None;
    };

    Some(WarrantyOffer {
        kind: warranty_kind(offer.get("kind").and_then(Value::as_str)),
        duration_months: offer
            .get("durationMonths")
            .or_else(|| offer.get("months"))
            .and_then(whole_months),
        provider: offer.get("provider").and_then(text),
        details: offer.get("details").and_then(text),
    })
}

/// Unknown or missing kinds fall back to a seller warranty.
fn warranty_kind(raw: Option<&str>) -> WarrantyKind {
    match raw.map(str::trim) {
        Some(kind) if kind.eq_ignore_ascii_case("extended") => WarrantyKind::Extended,
        _ => WarrantyKind::Seller,
    }
}

fn discount_kind(raw: &str) -> Option<DiscountKind> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "percentage" | "percent" => Some(DiscountKind::Percentage),
        "fixed_amount" | "fixed" | "amount" => Some(DiscountKind::FixedAmount),
        _ => None,
    }
}

/// Flat, pre-list schema.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyConditionsPayload {
    #[serde(default)]
    pub discount_percent: Option<Value>,
    #[serde(default)]
    pub discount_amount: Option<Value>,
    #[serde(default)]
    pub bonus_amount: Option<Value>,
    #[serde(default)]
    pub financing_bank: Option<Value>,
    #[serde(default)]
    pub financing_rate: Option<Value>,
    #[serde(default)]
    pub financing_term_months: Option<Value>,
    #[serde(default)]
    pub down_payment_percent: Option<Value>,
    #[serde(default)]
    pub trade_in_accepts: Option<Value>,
    #[serde(default)]
    pub trade_in_balance: Option<Value>,
    #[serde(default)]
    pub warranty_kind: Option<Value>,
    #[serde(default)]
    pub warranty_months: Option<Value>,
    #[serde(default)]
    pub warranty_provider: Option<Value>,
    #[serde(default)]
    pub warranty_details: Option<Value>,
    #[serde(default)]
    pub conditions: Option<Value>,
    #[serde(default)]
    pub notes: Option<Value>,
}

impl LegacyConditionsPayload {
    pub fn into_conditions(self) -> CommercialConditions {
        let mut discounts = Vec::new();
        if let Some(value) = positive(self.discount_percent.as_ref()) {
            discounts.push(DiscountItem::percentage(value));
        }
        if let Some(value) = positive(self.discount_amount.as_ref()) {
            discounts.push(DiscountItem::fixed_amount(value));
        }

        let bonuses = positive(self.bonus_amount.as_ref())
            .map(|value| vec![BonusItem { value }])
            .unwrap_or_default();

        let financing_option = FinancingOption {
            bank: self.financing_bank.as_ref().and_then(text),
            rate_percent: self.financing_rate.as_ref().and_then(numeric_value),
            term_months: self.financing_term_months.as_ref().and_then(whole_months),
            down_payment_percent: self.down_payment_percent.as_ref().and_then(numeric_value),
        };
        let financing = if financing_option == FinancingOption::default() {
            Vec::new()
        } else {
            vec![financing_option]
        };

        let accepts = self.trade_in_accepts.as_ref().and_then(text);
        let balance = self.trade_in_balance.as_ref().and_then(text);
        let trade_in = if accepts.is_some() || balance.is_some() {
            Some(TradeInPolicy {
                accepts: accepts.as_deref().and_then(TradeInAcceptance::parse),
                balance: balance.as_deref().and_then(TradeInBalance::parse),
            })
        } else {
            None
        };

        let duration_months = self.warranty_months.as_ref().and_then(whole_months);
        let provider = self.warranty_provider.as_ref().and_then(text);
        let details = self.warranty_details.as_ref().and_then(text);
        let warranty = if duration_months.is_some() || provider.is_some() || details.is_some() {
            Some(WarrantyOffer {
                kind: warranty_kind(self.warranty_kind.as_ref().and_then(Value::as_str)),
                duration_months,
                provider,
                details,
            })
        } else {
            None
        };

        CommercialConditions {
            discounts,
            bonuses,
            financing,
            trade_in,
            warranty,
            additional_conditions: self.conditions.as_ref().and_then(text),
            notes: self.notes.as_ref().and_then(text),
        }
    }
}

/// Finite number from a JSON number or numeric string.
fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn positive(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(numeric_value)
        .filter(|number| *number > 0.0)
}

fn whole_months(value: &Value) -> Option<u32> {
    numeric_value(value)
        .filter(|months| *months > 0.0 && *months <= f64::from(u32::MAX))
        .map(|months| months.round() as u32)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_payload_is_empty_current() {
        let payload = ConditionsPayload::from_value(Value::Null).expect("null accepted");

        assert_eq!(payload.schema(), "current");
        assert_eq!(payload.into_conditions(), CommercialConditions::default());
    }

    #[test]
    fn rejects_non_object_payloads() {
        let err = ConditionsPayload::from_value(json!([1, 2, 3])).expect_err("array rejected");

        assert!(matches!(err, PayloadError::NotAnObject { found: "array" }));
    }

    #[test]
    fn numeric_strings_are_accepted() {
        assert_eq!(numeric_value(&json!(" 12.5 ")), Some(12.5));
        assert_eq!(numeric_value(&json!("ten")), None);
        assert_eq!(numeric_value(&json!(true)), None);
    }

    #[test]
    fn discount_kind_aliases() {
        assert_eq!(discount_kind("Percent"), Some(DiscountKind::Percentage));
        assert_eq!(discount_kind("fixed"), Some(DiscountKind::FixedAmount));
        assert_eq!(discount_kind("bogo"), None);
    }
}
