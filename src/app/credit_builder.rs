//! Fluent construction of credit transactions.
//!
//! [`CreditBuilder`] collects the parts of a credit one call at a time and
//! validates each part as it arrives. Invalid input never interrupts the
//! chain: the failure goes into the builder's [`Notification`] and the
//! corresponding field stays unset. [`CreditBuilder::build`] then either
//! produces a complete [`crate::domain::Credit`] or [`CreditOutcome::NoCredit`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::domain::{
    AccountFactory, AccountId, AccountRef, AppError, CreditOutcome, Currency,
    CurrencyExchange, Notification, PositiveMoney,
};

/// Single-use builder for one credit.
///
/// After [`build`](Self::build) has run the builder is finalized: setters
/// become no-ops, while `build` may be called again and yields an equal
/// credit with a fresh id.
pub struct CreditBuilder {
    account_factory: Arc<dyn AccountFactory>,
    currency_exchange: Arc<dyn CurrencyExchange>,
    notification: Notification,

    account: AccountRef,
    currency: Option<Currency>,
    money: Option<PositiveMoney>,
    transaction_date: Option<DateTime<Utc>>,
    amount_failed: bool,
    finalized: bool,
}

impl CreditBuilder {
    #[must_use]
    pub fn new(
        account_factory: Arc<dyn AccountFactory>,
        currency_exchange: Arc<dyn CurrencyExchange>,
    ) -> Self {
        Self::with_notification(account_factory, currency_exchange, Notification::new())
    }

    /// Start from a notification that may already hold request-level failures.
    /// Any failure in it prevents the credit from being built.
    #[must_use]
    pub fn with_notification(
        account_factory: Arc<dyn AccountFactory>,
        currency_exchange: Arc<dyn CurrencyExchange>,
        notification: Notification,
    ) -> Self {
        Self {
            account_factory,
            currency_exchange,
            notification,
            account: AccountRef::Absent,
            currency: None,
            money: None,
            transaction_date: None,
            amount_failed: false,
            finalized: false,
        }
    }

    #[must_use]
    pub fn with_account(mut self, account: AccountRef) -> Self {
        if self.reject_if_finalized("account") {
            return self;
        }
        self.account = account;
        self
    }

    /// Parse `currency_code` and pair it with `amount`.
    ///
    /// The money is only attempted once the currency is valid, so an unknown
    /// code records a single failure. After a failed attempt the amount stays
    /// unset and later calls are ignored.
    #[must_use]
    pub fn with_amount(mut self, amount: Decimal, currency_code: &str) -> Self {
        if self.reject_if_finalized("amount") {
            return self;
        }
        if self.amount_failed {
            warn!("Ignoring amount after a failed amount on the same builder");
            return self;
        }
        self.currency = self.notification.capture(Currency::parse(currency_code));
        self.money = match self.currency {
            Some(currency) => self
                .notification
                .capture(PositiveMoney::new(amount, currency)),
            None => None,
        };
        self.amount_failed = self.money.is_none();
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self) -> Self {
        if self.reject_if_finalized("timestamp") {
            return self;
        }
        self.transaction_date = Some(Utc::now());
        self
    }

    /// Finalize the builder.
    ///
    /// Returns `NoCredit` when any part is missing, the notification holds a
    /// failure, or the currency policy rejects the currency. Errors from the
    /// currency policy itself are propagated.
    #[instrument(skip(self), fields(account = ?self.account, currency = ?self.currency))]
    pub async fn build(&mut self) -> Result<CreditOutcome, AppError> {
        self.finalized = true;

        let Some((account_id, money, transaction_date)) = self.ready_parts() else {
            debug!(
                errors = self.notification.len(),
                "Credit preconditions not met"
            );
            return Ok(CreditOutcome::NoCredit);
        };

        let currency = money.currency();
        if !self
            .currency_exchange
            .is_currency_allowed(currency)
            .await?
        {
            warn!(currency = %currency, "Credit rejected: currency not allowed");
            return Ok(CreditOutcome::NoCredit);
        }

        let credit = self
            .account_factory
            .new_credit(account_id, money, transaction_date);
        info!(id = %credit.id, account = %credit.account_id, amount = %credit.amount, "Credit built");
        Ok(CreditOutcome::Created(credit))
    }

    fn ready_parts(&self) -> Option<(AccountId, PositiveMoney, DateTime<Utc>)> {
        if !self.notification.is_valid() || self.currency.is_none() {
            return None;
        }
        Some((
            self.account.account_id()?,
            self.money?,
            self.transaction_date?,
        ))
    }

    fn reject_if_finalized(&self, field: &str) -> bool {
        if self.finalized {
            warn!(field = field, "Ignoring update to a finalized credit builder");
        }
        self.finalized
    }

    #[must_use]
    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    #[must_use]
    pub fn into_notification(self) -> Notification {
        self.notification
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    #[must_use]
    pub fn account(&self) -> AccountRef {
        self.account
    }

    #[must_use]
    pub fn currency(&self) -> Option<Currency> {
        self.currency
    }

    #[must_use]
    pub fn money(&self) -> Option<PositiveMoney> {
        self.money
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.transaction_date
    }
}

impl std::fmt::Debug for CreditBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditBuilder")
            .field("account", &self.account)
            .field("currency", &self.currency)
            .field("money", &self.money)
            .field("transaction_date", &self.transaction_date)
            .field("notification", &self.notification)
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}
