//! In-memory currency allow-list.
//!
//! Thread-safe set of currencies accepted for credits. It can be shared
//! between builders and updated at runtime.

use async_trait::async_trait;
use dashmap::DashSet;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::{AppError, Currency, CurrencyExchange};

/// Currency policy backed by a concurrent allow-list
#[derive(Debug, Default)]
pub struct AllowListCurrencyExchange {
    allowed: DashSet<Currency>,
}

impl AllowListCurrencyExchange {
    #[must_use]
    pub fn new(currencies: impl IntoIterator<Item = Currency>) -> Self {
        let allowed: DashSet<Currency> = currencies.into_iter().collect();
        info!(count = allowed.len(), "Currency allow-list initialized");
        Self { allowed }
    }

    /// Allow every supported currency
    #[must_use]
    pub fn all_supported() -> Self {
        Self::new(Currency::ALL)
    }

    /// Allow-list holding the configured currencies
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.allowed_currencies.iter().copied())
    }

    /// Add a currency. Returns `true` if it was not allowed before.
    pub fn allow(&self, currency: Currency) -> bool {
        let added = self.allowed.insert(currency);
        if added {
            info!(currency = %currency, "Currency allowed");
        }
        added
    }

    /// Remove a currency. Returns `true` if it was present.
    pub fn revoke(&self, currency: Currency) -> bool {
        let removed = self.allowed.remove(&currency).is_some();
        if removed {
            warn!(currency = %currency, "Currency revoked");
        }
        removed
    }

    #[must_use]
    pub fn contains(&self, currency: Currency) -> bool {
        self.allowed.contains(&currency)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Allowed currencies in a stable order
    #[must_use]
    pub fn list_all(&self) -> Vec<Currency> {
        let mut currencies: Vec<Currency> = self.allowed.iter().map(|entry| *entry).collect();
        currencies.sort();
        currencies
    }
}

#[async_trait]
impl CurrencyExchange for AllowListCurrencyExchange {
    async fn is_currency_allowed(&self, currency: Currency) -> Result<bool, AppError> {
        Ok(self.contains(currency))
    }
}
