//! Currency conversion and display formatting collaborators.
//!
//! The pricing engine always works in the listing's native currency. Conversion
//! and formatting happen here, after composition, so figures are never
//! converted twice.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::UnitLabel;
use super::pricing::{badge_text, DiscountTotals, PriceQuote};

pub const DEFAULT_NATIVE_CURRENCY: &str = "CLP";

/// Upper-cased ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn native_default() -> Self {
        Self::new(DEFAULT_NATIVE_CURRENCY)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn minor_digits(&self) -> usize {
        match self.as_str() {
            "CLP" | "JPY" | "KRW" | "PYG" => 0,
            _ => 2,
        }
    }

    fn symbol(&self) -> String {
        match self.as_str() {
            "CLP" => "$".to_string(),
            "USD" => "US$".to_string(),
            "EUR" => "€".to_string(),
            other => format!("{other} "),
        }
    }
}

impl From<String> for CurrencyCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("no exchange rate from {native} to {target}")]
    UnsupportedCurrency {
        native: CurrencyCode,
        target: CurrencyCode,
    },
}

/// Converts native-currency amounts into a display currency.
pub trait CurrencyConverter: Send + Sync {
    fn native(&self) -> &CurrencyCode;
    fn convert(&self, amount: f64, target: &CurrencyCode) -> Result<f64, ConversionError>;
}

/// Renders an amount as a human-readable price string.
pub trait PriceFormatter: Send + Sync {
    fn format(&self, amount: f64, currency: &CurrencyCode) -> String;
}

/// Converter backed by a fixed table of native → target rates.
#[derive(Debug, Clone)]
pub struct StaticRateConverter {
    native: CurrencyCode,
    rates: BTreeMap<CurrencyCode, f64>,
}

impl StaticRateConverter {
    pub fn new(native: CurrencyCode) -> Self {
        Self {
            native,
            rates: BTreeMap::new(),
        }
    }

    pub fn with_rates(native: CurrencyCode, rates: BTreeMap<CurrencyCode, f64>) -> Self {
        Self { native, rates }
    }

    pub fn with_rate(mut self, target: CurrencyCode, rate: f64) -> Self {
        self.rates.insert(target, rate);
        self
    }
}

impl Default for StaticRateConverter {
    fn default() -> Self {
        Self::new(CurrencyCode::native_default())
    }
}

impl CurrencyConverter for StaticRateConverter {
    fn native(&self) -> &CurrencyCode {
        &self.native
    }

    fn convert(&self, amount: f64, target: &CurrencyCode) -> Result<f64, ConversionError> {
        if *target == self.native {
            return Ok(amount);
        }

        self.rates
            .get(target)
            .map(|rate| amount * rate)
            .ok_or_else(|| ConversionError::UnsupportedCurrency {
                native: self.native.clone(),
                target: target.clone(),
            })
    }
}

/// Formatter grouping thousands the way each currency is usually written:
/// `$10.000.000` for CLP, `US$1,234.50` for USD.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupedFormatter;

impl PriceFormatter for GroupedFormatter {
    fn format(&self, amount: f64, currency: &CurrencyCode) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        let symbol = currency.symbol();
        let magnitude = amount.abs();

        if currency.minor_digits() == 0 {
            let whole = (magnitude + 0.5).floor() as u64;
            return format!("{sign}{symbol}{}", group_thousands(whole, '.'));
        }

        let cents = (magnitude * 100.0).round() as u64;
        format!(
            "{sign}{symbol}{}.{:02}",
            group_thousands(cents / 100, ','),
            cents % 100
        )
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Converted, formatted view of a [`PriceQuote`] for one display currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDisplay {
    pub currency: CurrencyCode,
    pub unit_label: UnitLabel,
    pub basis_amount: Option<f64>,
    pub final_amount: Option<f64>,
    pub savings_amount: Option<f64>,
    pub fixed_discount: f64,
    pub bonus_amount: f64,
    /// `None` renders as "price unavailable".
    pub final_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_text: Option<String>,
}

/// Convert and format a composed quote. Runs strictly after composition; the
/// badge is rebuilt in the target currency.
pub fn present(
    quote: &PriceQuote,
    converter: &dyn CurrencyConverter,
    formatter: &dyn PriceFormatter,
    target: &CurrencyCode,
) -> Result<PriceDisplay, ConversionError> {
    let resolution = &quote.resolution;
    let convert = |amount: Option<f64>| {
        amount
            .map(|value| converter.convert(value, target))
            .transpose()
    };

    let basis_amount = convert(resolution.basis_amount)?;
    let final_amount = convert(resolution.final_amount)?;
    let savings_amount = convert(resolution.savings_amount)?;
    let fixed_discount = converter.convert(quote.discounts.fixed, target)?;
    let bonus_amount = converter.convert(quote.bonus_total, target)?;

    let has_savings = resolution.has_savings();
    // The fixed-amount badge names money, so it follows the display currency.
    let badge = badge_text(
        &DiscountTotals {
            percent: quote.discounts.percent,
            fixed: fixed_discount,
        },
        resolution.savings_amount,
        formatter,
        target,
    );
    let render = |amount: f64| formatter.format(amount, target);

    Ok(PriceDisplay {
        currency: target.clone(),
        unit_label: resolution.unit_label,
        basis_amount,
        final_amount,
        savings_amount,
        fixed_discount,
        bonus_amount,
        final_label: final_amount.map(render),
        strikethrough_label: basis_amount.filter(|_| has_savings).map(render),
        savings_label: savings_amount.filter(|_| has_savings).map(render),
        bonus_label: Some(bonus_amount).filter(|amount| *amount > 0.0).map(render),
        badge_text: badge,
    })
}
