//! Application service running one deposit request end to end.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use validator::Validate;

use crate::app::credit_builder::CreditBuilder;
use crate::domain::{
    AccountFactory, AccountRef, AppError, CreditReport, CurrencyExchange, DepositRequest,
    Notification, ValidationError,
};

/// Application service containing the deposit workflow
pub struct CreditService {
    account_factory: Arc<dyn AccountFactory>,
    currency_exchange: Arc<dyn CurrencyExchange>,
}

impl CreditService {
    #[must_use]
    pub fn new(
        account_factory: Arc<dyn AccountFactory>,
        currency_exchange: Arc<dyn CurrencyExchange>,
    ) -> Self {
        Self {
            account_factory,
            currency_exchange,
        }
    }

    /// Fresh builder wired to this service's collaborators
    #[must_use]
    pub fn new_builder(&self) -> CreditBuilder {
        CreditBuilder::new(
            Arc::clone(&self.account_factory),
            Arc::clone(&self.currency_exchange),
        )
    }

    /// Credit an account.
    ///
    /// Request validation failures do not abort the workflow; they are
    /// collected alongside the builder's own failures and returned in the
    /// report. Only currency policy errors are returned as `Err`.
    #[instrument(skip(self, request), fields(currency = %request.currency))]
    pub async fn deposit(&self, request: &DepositRequest) -> Result<CreditReport, AppError> {
        let mut notification = Notification::new();
        if let Err(e) = request.validate() {
            warn!(error = %e, "Validation failed");
            record_field_errors(&mut notification, &e);
        }

        let mut builder = CreditBuilder::with_notification(
            Arc::clone(&self.account_factory),
            Arc::clone(&self.currency_exchange),
            notification,
        )
        .with_account(AccountRef::from(request.account_id))
        .with_amount(request.amount, &request.currency)
        .with_timestamp();

        let outcome = builder.build().await?;
        let errors = builder.notification().messages();

        match outcome.credit() {
            Some(credit) => info!(id = %credit.id, "Deposit accepted"),
            None => warn!(errors = errors.len(), "Deposit produced no credit"),
        }

        Ok(CreditReport { outcome, errors })
    }

    /// Check the currency policy source
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.currency_exchange.health_check().await
    }
}

/// Record one `InvalidField` per failed field rule, sorted by field name
fn record_field_errors(notification: &mut Notification, errors: &validator::ValidationErrors) {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, field_errors) in fields {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map_or_else(|| error.code.to_string(), ToString::to_string);
            notification.add(ValidationError::InvalidField {
                field: field.to_string(),
                message,
            });
        }
    }
}
