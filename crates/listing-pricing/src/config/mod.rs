use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::listings::currency::{CurrencyCode, StaticRateConverter, DEFAULT_NATIVE_CURRENCY};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub pricing: PricingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let native_currency = CurrencyCode::new(
            env::var("PRICING_NATIVE_CURRENCY")
                .unwrap_or_else(|_| DEFAULT_NATIVE_CURRENCY.to_string()),
        );
        let fx_rates = match env::var("PRICING_FX_RATES") {
            Ok(raw) => parse_fx_rates(&raw)?,
            Err(_) => BTreeMap::new(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            pricing: PricingConfig {
                native_currency,
                fx_rates,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Native currency of listing data and the display-currency rate table.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub native_currency: CurrencyCode,
    pub fx_rates: BTreeMap<CurrencyCode, f64>,
}

impl PricingConfig {
    pub fn converter(&self) -> StaticRateConverter {
        StaticRateConverter::with_rates(self.native_currency.clone(), self.fx_rates.clone())
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            native_currency: CurrencyCode::native_default(),
            fx_rates: BTreeMap::new(),
        }
    }
}

/// Parse `USD=0.00105,EUR=0.00097` into a rate table.
fn parse_fx_rates(raw: &str) -> Result<BTreeMap<CurrencyCode, f64>, ConfigError> {
    let mut rates = BTreeMap::new();

    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let invalid = || ConfigError::InvalidFxRate {
            entry: entry.to_string(),
        };
        let (code, rate) = entry.split_once('=').ok_or_else(invalid)?;
        let rate = rate.trim().parse::<f64>().map_err(|_| invalid())?;
        if code.trim().is_empty() || !rate.is_finite() || rate <= 0.0 {
            return Err(invalid());
        }
        rates.insert(CurrencyCode::new(code), rate);
    }

    Ok(rates)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFxRate { entry: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFxRate { entry } => write!(
                f,
                "PRICING_FX_RATES entry '{entry}' must look like CODE=positive_rate"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidFxRate { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
