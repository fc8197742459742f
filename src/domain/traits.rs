//! Domain traits defining contracts for collaborators.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::AppError;
use super::types::{AccountId, Credit, Currency, PositiveMoney};

/// Factory for account transactions
pub trait AccountFactory: Send + Sync {
    /// Create a credit from already validated parts
    fn new_credit(
        &self,
        account_id: AccountId,
        amount: PositiveMoney,
        transaction_date: DateTime<Utc>,
    ) -> Credit;
}

/// Currency policy consulted before a credit is created
#[async_trait]
pub trait CurrencyExchange: Send + Sync {
    /// Check whether credits in `currency` are accepted.
    ///
    /// Infrastructure failures are returned as errors and are not
    /// interpreted as a rejection.
    async fn is_currency_allowed(&self, currency: Currency) -> Result<bool, AppError>;

    /// Check connectivity of the policy source
    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    struct EuroOnly;

    #[async_trait]
    impl CurrencyExchange for EuroOnly {
        async fn is_currency_allowed(&self, currency: Currency) -> Result<bool, AppError> {
            Ok(currency == Currency::EUR)
        }
    }

    struct FixedIdFactory(Uuid);

    impl AccountFactory for FixedIdFactory {
        fn new_credit(
            &self,
            account_id: AccountId,
            amount: PositiveMoney,
            transaction_date: DateTime<Utc>,
        ) -> Credit {
            Credit {
                id: self.0,
                account_id,
                amount,
                transaction_date,
            }
        }
    }

    #[tokio::test]
    async fn test_currency_exchange_default_health_check() {
        let exchange = EuroOnly;
        assert!(exchange.health_check().await.is_ok());
        assert!(exchange.is_currency_allowed(Currency::EUR).await.unwrap());
        assert!(!exchange.is_currency_allowed(Currency::USD).await.unwrap());
    }

    #[test]
    fn test_factory_is_object_safe() {
        let id = Uuid::new_v4();
        let factory: Box<dyn AccountFactory> = Box::new(FixedIdFactory(id));
        let money = PositiveMoney::new(Decimal::ONE, Currency::GBP).unwrap();
        let credit = factory.new_credit(AccountId::new(Uuid::new_v4()), money, Utc::now());
        assert_eq!(credit.id, id);
        assert_eq!(credit.currency(), Currency::GBP);
    }
}
