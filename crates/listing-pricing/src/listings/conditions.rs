use serde::Serialize;

use super::domain::{
    CommercialConditions, FinancingOption, Listing, TradeInPolicy, WarrantyKind, WarrantyOffer,
};

/// Shown when a section is enabled but the seller left no structured detail.
pub const ASK_THE_SELLER: &str = "Ask the seller for details";

/// Human-facing projection of a listing's commercial conditions.
///
/// Section visibility follows the listing flags; section content is best effort.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommercialConditionsSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing: Option<FinancingSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_in: Option<TradeInSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty: Option<WarrantySection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_conditions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CommercialConditionsSummary {
    pub fn is_empty(&self) -> bool {
        self.financing.is_none()
            && self.trade_in.is_none()
            && self.warranty.is_none()
            && self.additional_conditions.is_none()
            && self.notes.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingSection {
    pub options: Vec<FinancingOptionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingOptionView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_payment_percent: Option<f64>,
    pub headline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeInSection {
    pub narrative: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarrantySection {
    pub kind: WarrantyKind,
    pub kind_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub headline: String,
}

pub fn summarize(
    listing: &Listing,
    conditions: &CommercialConditions,
) -> CommercialConditionsSummary {
    let financing = listing
        .allow_financing
        .then(|| financing_section(&conditions.financing));
    let trade_in = listing
        .allow_exchange
        .then(|| trade_in_section(conditions.trade_in.as_ref()));

    CommercialConditionsSummary {
        financing,
        trade_in,
        warranty: conditions.warranty.as_ref().map(warranty_section),
        additional_conditions: non_blank(conditions.additional_conditions.as_deref()),
        notes: non_blank(conditions.notes.as_deref()),
    }
}

fn financing_section(options: &[FinancingOption]) -> FinancingSection {
    let options: Vec<FinancingOptionView> = options
        .iter()
        .map(|option| FinancingOptionView {
            bank: non_blank(option.bank.as_deref()),
            rate_percent: option.rate_percent.filter(|rate| rate.is_finite()),
            term_months: option.term_months.filter(|months| *months > 0),
            down_payment_percent: option
                .down_payment_percent
                .filter(|percent| percent.is_finite()),
            headline: String::new(),
        })
        .map(|mut view| {
            view.headline = financing_headline(&view);
            view
        })
        .collect();

    let fallback = options.is_empty().then_some(ASK_THE_SELLER);
    FinancingSection { options, fallback }
}

fn financing_headline(view: &FinancingOptionView) -> String {
    let mut parts = Vec::new();
    if let Some(bank) = &view.bank {
        parts.push(bank.clone());
    }
    if let Some(rate) = view.rate_percent {
        parts.push(format!("{rate}% rate"));
    }
    if let Some(months) = view.term_months {
        parts.push(format!("{months} months"));
    }
    if let Some(down) = view.down_payment_percent {
        parts.push(format!("{down}% down payment"));
    }

    if parts.is_empty() {
        ASK_THE_SELLER.to_string()
    } else {
        parts.join(" · ")
    }
}

fn trade_in_section(policy: Option<&TradeInPolicy>) -> TradeInSection {
    let accepts = policy.and_then(|policy| policy.accepts);
    let balance = policy.and_then(|policy| policy.balance);

    let narrative = match (accepts, balance) {
        (Some(accepts), Some(balance)) => format!("{}; {}.", accepts.label(), balance.label()),
        (Some(accepts), None) => format!("{}.", accepts.label()),
        (None, Some(balance)) => format!("Trade-in accepted; {}.", balance.label()),
        (None, None) => ASK_THE_SELLER.to_string(),
    };

    TradeInSection { narrative }
}

fn warranty_section(offer: &WarrantyOffer) -> WarrantySection {
    let duration_months = offer.duration_months.filter(|months| *months > 0);
    let provider = non_blank(offer.provider.as_deref());

    let headline = match (duration_months, &provider) {
        (Some(months), Some(provider)) => {
            format!("{} for {months} months by {provider}", offer.kind.label())
        }
        (Some(months), None) => format!("{} for {months} months", offer.kind.label()),
        (None, Some(provider)) => format!("{} by {provider}", offer.kind.label()),
        (None, None) => offer.kind.label().to_string(),
    };

    WarrantySection {
        kind: offer.kind,
        kind_label: offer.kind.label(),
        duration_months,
        provider,
        details: non_blank(offer.details.as_deref()),
        headline,
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
