//! Environment-based configuration.

use std::env;

use crate::domain::{AppError, ConfigError, Currency};

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidValue {
                name: "LOG_FORMAT".to_string(),
                message: format!("expected 'pretty' or 'json', got '{}'", other),
            }),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Currencies accepted for credits (default: every supported currency)
    pub allowed_currencies: Vec<Currency>,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_currencies: Currency::ALL.to_vec(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_currencies = match lookup("ALLOWED_CURRENCIES").filter(|v| !v.is_empty()) {
            Some(raw) => parse_currency_list(&raw)?,
            None => Currency::ALL.to_vec(),
        };

        let log_format = lookup("LOG_FORMAT")
            .map(|v| v.parse::<LogFormat>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            allowed_currencies,
            log_format,
        })
    }
}

/// Parse a comma-separated list of currency codes.
///
/// Empty entries are ignored, but a list without any code is rejected so a
/// misconfigured allow-list cannot silently refuse every deposit.
pub fn parse_currency_list(raw: &str) -> Result<Vec<Currency>, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        name: "ALLOWED_CURRENCIES".to_string(),
        message,
    };

    let currencies = raw
        .split(',')
        .filter(|code| !code.trim().is_empty())
        .map(|code| Currency::parse(code).map_err(|e| invalid(e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    if currencies.is_empty() {
        return Err(invalid(format!("no currency codes in '{}'", raw)));
    }
    Ok(currencies)
}
