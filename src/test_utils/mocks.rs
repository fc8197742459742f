//! Mock implementations for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::{
    AccountFactory, AccountId, AppError, Credit, Currency, CurrencyExchange,
    ExternalServiceError, PositiveMoney,
};

/// Configuration for mock behavior
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    pub should_fail: bool,
    pub error_message: Option<String>,
}

impl MockConfig {
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            error_message: Some(message.into()),
        }
    }
}

/// Mock currency policy that counts every check
pub struct MockCurrencyExchange {
    allowed: Mutex<HashSet<Currency>>,
    config: MockConfig,
    is_healthy: AtomicBool,
    calls: AtomicUsize,
}

impl MockCurrencyExchange {
    /// Allows every supported currency
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&Currency::ALL, MockConfig::success())
    }

    #[must_use]
    pub fn allowing(currencies: &[Currency]) -> Self {
        Self::with_config(currencies, MockConfig::success())
    }

    #[must_use]
    pub fn with_config(currencies: &[Currency], config: MockConfig) -> Self {
        Self {
            allowed: Mutex::new(currencies.iter().copied().collect()),
            config,
            is_healthy: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(&Currency::ALL, MockConfig::failure(message))
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.is_healthy.store(healthy, Ordering::Relaxed);
    }

    pub fn set_allowed(&self, currency: Currency, allowed: bool) {
        let mut set = self.allowed.lock().unwrap();
        if allowed {
            set.insert(currency);
        } else {
            set.remove(&currency);
        }
    }

    /// Number of `is_currency_allowed` calls so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check_should_fail(&self) -> Result<(), AppError> {
        if self.config.should_fail {
            let msg = self
                .config
                .error_message
                .clone()
                .unwrap_or_else(|| "Mock error".to_string());
            return Err(AppError::ExternalService(ExternalServiceError::Unavailable(
                msg,
            )));
        }
        Ok(())
    }
}

impl Default for MockCurrencyExchange {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CurrencyExchange for MockCurrencyExchange {
    async fn is_currency_allowed(&self, currency: Currency) -> Result<bool, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_should_fail()?;
        Ok(self.allowed.lock().unwrap().contains(&currency))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        if !self.is_healthy.load(Ordering::Relaxed) {
            return Err(AppError::ExternalService(ExternalServiceError::Unavailable(
                "Unhealthy".to_string(),
            )));
        }
        self.check_should_fail()
    }
}

/// Mock account factory that keeps every credit it creates
#[derive(Default)]
pub struct MockAccountFactory {
    created: Mutex<Vec<Credit>>,
}

impl MockAccountFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All credits created so far (for testing)
    pub fn created(&self) -> Vec<Credit> {
        self.created.lock().unwrap().clone()
    }
}

impl AccountFactory for MockAccountFactory {
    fn new_credit(
        &self,
        account_id: AccountId,
        amount: PositiveMoney,
        transaction_date: DateTime<Utc>,
    ) -> Credit {
        let credit = Credit {
            id: Uuid::new_v4(),
            account_id,
            amount,
            transaction_date,
        };
        self.created.lock().unwrap().push(credit.clone());
        credit
    }
}
