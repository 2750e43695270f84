use serde::{Deserialize, Serialize};

/// Identifier wrapper for marketplace listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

/// Determines which price fields are authoritative for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    Sale,
    Rent,
    Auction,
}

impl ListingType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sale => "Sale",
            Self::Rent => "Rent",
            Self::Auction => "Auction",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl RentPeriod {
    /// Fallback order used when no explicit period is set or its amount is missing.
    pub const fn waterfall() -> [Self; 3] {
        [Self::Daily, Self::Weekly, Self::Monthly]
    }

    pub const fn unit_label(self) -> UnitLabel {
        match self {
            Self::Daily => UnitLabel::Daily,
            Self::Weekly => UnitLabel::Weekly,
            Self::Monthly => UnitLabel::Monthly,
        }
    }
}

/// Rent amounts per billing period plus the period the seller advertised.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentTerms {
    #[serde(default, alias = "rentDaily")]
    pub daily: Option<f64>,
    #[serde(default, alias = "rentWeekly")]
    pub weekly: Option<f64>,
    #[serde(default, alias = "rentMonthly")]
    pub monthly: Option<f64>,
    #[serde(default, alias = "rentPeriod")]
    pub period: Option<RentPeriod>,
}

impl RentTerms {
    pub fn amount_for(&self, period: RentPeriod) -> Option<f64> {
        match period {
            RentPeriod::Daily => self.daily,
            RentPeriod::Weekly => self.weekly,
            RentPeriod::Monthly => self.monthly,
        }
    }
}

/// Read-only listing snapshot as delivered by the data-loading layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    #[serde(alias = "type")]
    pub listing_type: ListingType,
    #[serde(default, alias = "basePrice")]
    pub price: Option<f64>,
    #[serde(default)]
    pub rent: RentTerms,
    #[serde(default, alias = "startingPrice")]
    pub auction_start_price: Option<f64>,
    #[serde(default)]
    pub allow_financing: bool,
    #[serde(default)]
    pub allow_exchange: bool,
}

impl Listing {
    pub fn new(id: impl Into<String>, listing_type: ListingType) -> Self {
        Self {
            id: ListingId(id.into()),
            listing_type,
            price: None,
            rent: RentTerms::default(),
            auction_start_price: None,
            allow_financing: false,
            allow_exchange: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Percentage,
    FixedAmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountItem {
    pub kind: DiscountKind,
    pub value: f64,
}

impl DiscountItem {
    pub fn percentage(value: f64) -> Self {
        Self {
            kind: DiscountKind::Percentage,
            value,
        }
    }

    pub fn fixed_amount(value: f64) -> Self {
        Self {
            kind: DiscountKind::FixedAmount,
            value,
        }
    }
}

/// Additive incentive expressed in the listing's native currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusItem {
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingOption {
    #[serde(default)]
    pub bank: Option<String>,
    #[serde(default)]
    pub rate_percent: Option<f64>,
    #[serde(default)]
    pub term_months: Option<u32>,
    #[serde(default)]
    pub down_payment_percent: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarrantyKind {
    Seller,
    Extended,
}

impl WarrantyKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Seller => "Seller warranty",
            Self::Extended => "Extended warranty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyOffer {
    pub kind: WarrantyKind,
    #[serde(default)]
    pub duration_months: Option<u32>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// Which vehicles the seller takes as part of the payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeInAcceptance {
    AnyVehicle,
    SameBrand,
    SubjectToAppraisal,
}

impl TradeInAcceptance {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AnyVehicle => "Accepts any vehicle as part of the payment",
            Self::SameBrand => "Accepts vehicles of the same brand as part of the payment",
            Self::SubjectToAppraisal => "Accepts vehicles subject to appraisal",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "any_vehicle" | "any" => Some(Self::AnyVehicle),
            "same_brand" => Some(Self::SameBrand),
            "subject_to_appraisal" | "appraisal" => Some(Self::SubjectToAppraisal),
            _ => None,
        }
    }
}

/// Who covers the difference between the trade-in value and the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeInBalance {
    BuyerPaysDifference,
    SellerPaysDifference,
    Negotiable,
}

impl TradeInBalance {
    pub const fn label(self) -> &'static str {
        match self {
            Self::BuyerPaysDifference => "the buyer pays the difference",
            Self::SellerPaysDifference => "the seller pays the difference",
            Self::Negotiable => "the difference is negotiable",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "buyer_pays_difference" | "buyer_pays" => Some(Self::BuyerPaysDifference),
            "seller_pays_difference" | "seller_pays" => Some(Self::SellerPaysDifference),
            "negotiable" => Some(Self::Negotiable),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInPolicy {
    #[serde(default)]
    pub accepts: Option<TradeInAcceptance>,
    #[serde(default)]
    pub balance: Option<TradeInBalance>,
}

/// Canonical commercial conditions attached to a listing.
///
/// Produced once at the data-loading boundary by
/// [`ConditionsPayload`](super::payload::ConditionsPayload); the pricing engine only ever
/// sees this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommercialConditions {
    #[serde(default)]
    pub discounts: Vec<DiscountItem>,
    #[serde(default)]
    pub bonuses: Vec<BonusItem>,
    #[serde(default)]
    pub financing: Vec<FinancingOption>,
    #[serde(default)]
    pub trade_in: Option<TradeInPolicy>,
    #[serde(default)]
    pub warranty: Option<WarrantyOffer>,
    #[serde(default)]
    pub additional_conditions: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Unit shown next to the basis amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitLabel {
    #[serde(rename = "")]
    Unspecified,
    #[serde(rename = "base price")]
    BasePrice,
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "monthly")]
    Monthly,
}

impl UnitLabel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::BasePrice => "base price",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Price actually shown to a user, derived on every request and never persisted.
///
/// `final_amount` is never negative, `savings_amount` equals
/// `basis_amount - final_amount` whenever a basis exists, and a badge is only
/// present when savings are positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResolution {
    pub basis_amount: Option<f64>,
    pub unit_label: UnitLabel,
    pub final_amount: Option<f64>,
    pub savings_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_text: Option<String>,
}

impl PriceResolution {
    /// `false` when no usable basis was found ("price unavailable").
    pub fn is_available(&self) -> bool {
        self.basis_amount.is_some()
    }

    pub fn has_savings(&self) -> bool {
        self.savings_amount.map(|savings| savings > 0.0).unwrap_or(false)
    }
}
