//! Integration tests for the deposit workflow.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use account_credits::app::CreditService;
use account_credits::domain::{CreditOutcome, Currency, DepositRequest};
use account_credits::infra::{AllowListCurrencyExchange, UuidAccountFactory};
use account_credits::test_utils::{MockAccountFactory, MockCurrencyExchange};

fn create_service(exchange: Arc<AllowListCurrencyExchange>) -> CreditService {
    CreditService::new(Arc::new(UuidAccountFactory::new()), exchange)
}

#[tokio::test]
async fn test_deposit_from_json_request() {
    let service = create_service(Arc::new(AllowListCurrencyExchange::all_supported()));
    let account_id = Uuid::new_v4();
    let json = format!(
        r#"{{"account_id": "{}", "amount": "250.75", "currency": "brl"}}"#,
        account_id
    );
    let request: DepositRequest = serde_json::from_str(&json).unwrap();

    let report = service.deposit(&request).await.unwrap();
    let credit = report.outcome.credit().unwrap();
    assert_eq!(credit.account_id.as_uuid(), &account_id);
    assert_eq!(credit.amount.amount(), Decimal::new(25075, 2));
    assert_eq!(credit.currency(), Currency::BRL);

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["outcome"]["status"], "created");
    assert_eq!(value["outcome"]["amount"]["amount"], "250.75");
    assert!(value["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_deposit_in_disallowed_currency() {
    let service = create_service(Arc::new(AllowListCurrencyExchange::new([Currency::USD])));
    let request = DepositRequest::new(Some(Uuid::new_v4()), Decimal::TEN, "EUR");

    let report = service.deposit(&request).await.unwrap();
    assert_eq!(report.outcome, CreditOutcome::NoCredit);
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn test_deposit_reports_validation_messages() {
    let service = create_service(Arc::new(AllowListCurrencyExchange::all_supported()));
    let request = DepositRequest::new(Some(Uuid::new_v4()), Decimal::ZERO, "CAD");

    let report = service.deposit(&request).await.unwrap();
    assert_eq!(report.outcome, CreditOutcome::NoCredit);
    assert_eq!(
        report.errors,
        vec!["Amount must be greater than zero, got 0".to_string()]
    );

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["outcome"]["status"], "no_credit");
}

#[tokio::test]
async fn test_requests_do_not_share_failures() {
    let factory = Arc::new(MockAccountFactory::new());
    let exchange = Arc::new(MockCurrencyExchange::new());
    let service = CreditService::new(Arc::clone(&factory) as _, Arc::clone(&exchange) as _);

    let bad = DepositRequest::new(Some(Uuid::new_v4()), Decimal::ONE, "XXX");
    let good = DepositRequest::new(Some(Uuid::new_v4()), Decimal::ONE, "USD");

    assert!(!service.deposit(&bad).await.unwrap().outcome.is_created());
    assert!(service.deposit(&good).await.unwrap().outcome.is_created());
    assert_eq!(factory.created().len(), 1);
    assert_eq!(exchange.call_count(), 1);
}

#[tokio::test]
async fn test_health_check_reflects_policy_source() {
    let exchange = Arc::new(MockCurrencyExchange::new());
    let service = CreditService::new(
        Arc::new(MockAccountFactory::new()),
        Arc::clone(&exchange) as _,
    );

    assert!(service.health_check().await.is_ok());

    exchange.set_healthy(false);
    assert!(service.health_check().await.is_err());

    exchange.set_healthy(true);
    assert!(service.health_check().await.is_ok());
}

#[tokio::test]
async fn test_currency_revoked_between_deposits() {
    let exchange = Arc::new(MockCurrencyExchange::new());
    let service = CreditService::new(
        Arc::new(MockAccountFactory::new()),
        Arc::clone(&exchange) as _,
    );
    let request = DepositRequest::new(Some(Uuid::new_v4()), Decimal::ONE, "SEK");

    assert!(service.deposit(&request).await.unwrap().outcome.is_created());

    exchange.set_allowed(Currency::SEK, false);
    let report = service.deposit(&request).await.unwrap();
    assert_eq!(report.outcome, CreditOutcome::NoCredit);
    assert!(report.errors.is_empty());

    exchange.set_allowed(Currency::SEK, true);
    assert!(service.deposit(&request).await.unwrap().outcome.is_created());
}
